use std::path::PathBuf;

use tracing::warn;

use crate::error::{Error, Result};

/// Minimum interval between typed characters that injectors handle
/// reliably; below this the whole text is delivered at once via the
/// clipboard.
pub const MIN_TYPE_INTERVAL: f64 = 0.025;

/// Default typing interval. Lower values may drop characters on some
/// systems.
pub const RECOMMENDED_TYPE_INTERVAL: f64 = 0.05;

/// Immutable per-invocation execution settings, assembled once from the
/// command line and passed explicitly to parsers and executors.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Seconds to sleep after each non-final action.
    pub sleep: f64,
    /// Seconds a cursor move takes; 0 moves instantly.
    pub duration: f64,
    /// Seconds between the two presses of a double click.
    pub doubleclick_interval: f64,
    /// Image-match confidence threshold in [0, 1].
    pub confidence: f64,
    /// Match template images in grayscale.
    pub grayscale: bool,
    /// Seconds between typed characters.
    pub typing_interval: f64,
    /// Seconds between repeated key presses.
    pub press_interval: f64,
    /// Base directory for relative image paths.
    pub images_path: Option<PathBuf>,
    /// Base directory for relative `TYPEFILE` paths.
    pub files_path: Option<PathBuf>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            sleep: 0.0,
            duration: 0.0,
            doubleclick_interval: 0.1,
            confidence: 0.8,
            grayscale: true,
            typing_interval: RECOMMENDED_TYPE_INTERVAL,
            press_interval: 0.0,
            images_path: None,
            files_path: None,
        }
    }
}

impl ExecutionConfig {
    /// Check all option ranges before any action string is parsed.
    ///
    /// A typing interval below [`MIN_TYPE_INTERVAL`] is not an error: it
    /// switches typing to atomic clipboard delivery and is logged as a
    /// warning.
    pub fn validate(&self) -> Result<()> {
        if self.sleep < 0.0 {
            return Err(Error::Config("Sleep time cannot be negative.".into()));
        }
        if self.duration < 0.0 {
            return Err(Error::Config("Duration cannot be negative.".into()));
        }
        if self.doubleclick_interval < 0.0 {
            return Err(Error::Config(
                "Double click interval cannot be negative.".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::Config(
                "Confidence must be between 0.0 and 1.0.".into(),
            ));
        }
        if self.typing_interval < 0.0 {
            return Err(Error::Config("Typing interval cannot be negative.".into()));
        }
        if self.press_interval < 0.0 {
            return Err(Error::Config("Press interval cannot be negative.".into()));
        }
        if self.typing_interval < MIN_TYPE_INTERVAL {
            warn!(
                typing_interval = self.typing_interval,
                "Typing interval below {MIN_TYPE_INTERVAL}s; text will be typed all at once"
            );
        }
        Ok(())
    }

    /// Whether typed text is delivered atomically instead of streamed.
    pub fn atomic_typing(&self) -> bool {
        self.typing_interval < MIN_TYPE_INTERVAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        ExecutionConfig::default().validate().unwrap();
    }

    #[test]
    fn test_negative_values_rejected() {
        let tweaks: [fn(&mut ExecutionConfig); 5] = [
            |c| c.sleep = -0.1,
            |c| c.duration = -1.0,
            |c| c.doubleclick_interval = -0.5,
            |c| c.typing_interval = -0.01,
            |c| c.press_interval = -2.0,
        ];
        for tweak in tweaks {
            let mut cfg = ExecutionConfig::default();
            tweak(&mut cfg);
            assert!(matches!(cfg.validate(), Err(Error::Config(_))));
        }
    }

    #[test]
    fn test_confidence_range() {
        let mut cfg = ExecutionConfig {
            confidence: 1.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        cfg.confidence = -0.1;
        assert!(cfg.validate().is_err());
        cfg.confidence = 0.0;
        cfg.validate().unwrap();
        cfg.confidence = 1.0;
        cfg.validate().unwrap();
    }

    #[test]
    fn test_atomic_typing_threshold() {
        let mut cfg = ExecutionConfig::default();
        assert!(!cfg.atomic_typing());
        cfg.typing_interval = 0.0;
        assert!(cfg.atomic_typing());
        cfg.typing_interval = MIN_TYPE_INTERVAL;
        assert!(!cfg.atomic_typing());
    }
}
