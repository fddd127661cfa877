//! Home-directory expansion and base-directory path resolution.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the user's home directory.
pub fn expand_user(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Resolve a user-supplied path against an optional base directory and
/// require it to exist as a file.
///
/// Absolute paths and paths starting with `~` ignore the base directory.
pub fn resolve_existing_file(raw: &str, base: Option<&Path>) -> Result<PathBuf> {
    let expanded = expand_user(raw);
    let resolved = match base {
        Some(base) if expanded.is_relative() => base.join(expanded),
        _ => expanded,
    };
    if resolved.is_file() {
        Ok(resolved)
    } else {
        Err(Error::missing_file(resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_existing_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("shot.png");
        fs::write(&file, b"png").unwrap();

        let resolved = resolve_existing_file(file.to_str().unwrap(), None).unwrap();
        assert_eq!(resolved, file);
    }

    #[test]
    fn test_relative_path_uses_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shot.png"), b"png").unwrap();

        let resolved = resolve_existing_file("shot.png", Some(dir.path())).unwrap();
        assert_eq!(resolved, dir.path().join("shot.png"));
    }

    #[test]
    fn test_missing_file_names_resolved_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_existing_file("nope.png", Some(dir.path())).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nope.png"), "unexpected message: {msg}");
        assert!(msg.contains("does not exist"));
    }

    #[test]
    fn test_tilde_expansion() {
        let expanded = expand_user("~/somewhere");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("somewhere"));
        }
    }
}
