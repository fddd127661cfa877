use std::time::Duration;

use tracing::{debug, info};

use crate::config::ExecutionConfig;
use crate::error::Result;
use crate::model::InputAction;
use crate::platform::{Clock, InputDriver, ScreenLocator, TextInjector};

/// Executes a parsed action sequence against the platform collaborators.
///
/// The runtime owns the four collaborator implementations and the
/// per-invocation config; it is constructed once per command and never
/// touches global state. Actions run strictly in order: no action starts
/// before the previous one (including its post-action sleep) completes.
pub struct Runtime<D, L, T, C> {
    pub(crate) driver: D,
    pub(crate) locator: L,
    pub(crate) injector: T,
    pub(crate) clock: C,
    pub(crate) config: ExecutionConfig,
}

impl<D, L, T, C> Runtime<D, L, T, C>
where
    D: InputDriver,
    L: ScreenLocator,
    T: TextInjector,
    C: Clock,
{
    pub fn new(config: ExecutionConfig, driver: D, locator: L, injector: T, clock: C) -> Self {
        Self {
            driver,
            locator,
            injector,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Run the whole sequence.
    ///
    /// Pacing rule: after every non-final action the global inter-action
    /// sleep is applied, uniformly for clicks, moves, key presses and
    /// typing; a literal sleep action runs inline and replaces the global
    /// sleep for its step. The final action never incurs a trailing sleep.
    ///
    /// The first failing action (image not on screen, unreadable typed
    /// file, driver error) aborts the remaining queue; side effects
    /// already performed are not undone.
    pub fn run(&mut self, actions: &[InputAction]) -> Result<()> {
        info!(
            target: "input_simulation::runtime",
            count = actions.len(),
            "Starting action sequence"
        );

        for (index, action) in actions.iter().enumerate() {
            debug!(target: "input_simulation::runtime", index, ?action, "Processing action");
            match action {
                InputAction::Mouse(mouse) => self.execute_mouse(mouse)?,
                InputAction::Keyboard(keyboard) => self.execute_keyboard(keyboard)?,
            }

            let is_last = index + 1 == actions.len();
            if !is_last && action.sleep_seconds().is_none() && self.config.sleep > 0.0 {
                debug!(
                    target: "input_simulation::runtime",
                    seconds = self.config.sleep,
                    "Waiting after action"
                );
                self.clock.sleep(Duration::from_secs_f64(self.config.sleep));
            }
        }

        info!(target: "input_simulation::runtime", "Action sequence completed");
        Ok(())
    }

    /// A literal sleep action's body.
    pub(crate) fn sleep_inline(&mut self, seconds: f64) -> Result<()> {
        if seconds > 0.0 {
            debug!(
                target: "input_simulation::runtime",
                seconds,
                "Sleeping (overrides the global inter-action sleep)"
            );
            self.clock.sleep(Duration::from_secs_f64(seconds));
        }
        Ok(())
    }
}
