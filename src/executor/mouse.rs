//! Mouse-side execution: target resolution and move/click dispatch.

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::executor::Runtime;
use crate::model::{Coord, MouseAction, MouseButton, Target};
use crate::platform::{Clock, InputDriver, ScreenLocator, TextInjector};

impl<D, L, T, C> Runtime<D, L, T, C>
where
    D: InputDriver,
    L: ScreenLocator,
    T: TextInjector,
    C: Clock,
{
    pub(crate) fn execute_mouse(&mut self, action: &MouseAction) -> Result<()> {
        match action {
            MouseAction::Sleep(seconds) => self.sleep_inline(*seconds),

            MouseAction::Move(target) => {
                let (x, y) = self.resolve_target(target)?;
                debug!(target: "input_simulation::mouse", x, y, "Moving cursor");
                self.driver
                    .move_cursor(x, y, Duration::from_secs_f64(self.config.duration))
            }

            MouseAction::Click { button, target } => {
                let (x, y) = self.resolve_target(target)?;
                if self.config.duration > 0.0 {
                    self.driver
                        .move_cursor(x, y, Duration::from_secs_f64(self.config.duration))?;
                }
                let interval = match button {
                    MouseButton::DoubleLeft => self.config.doubleclick_interval,
                    _ => 0.0,
                };
                debug!(target: "input_simulation::mouse", ?button, x, y, "Clicking");
                self.driver
                    .click(*button, x, y, Duration::from_secs_f64(interval))
            }
        }
    }

    /// Resolve a target to concrete screen coordinates, at the moment the
    /// action executes.
    ///
    /// Relative axes are added to the cursor position queried right now,
    /// never to a position remembered from parse time. An image target
    /// that is not currently on screen is fatal for the sequence.
    fn resolve_target(&mut self, target: &Target) -> Result<(i32, i32)> {
        match target {
            Target::Current => self.driver.cursor_position(),

            Target::Image(path) => {
                match self.locator.locate_center(
                    path,
                    self.config.confidence,
                    self.config.grayscale,
                )? {
                    Some(center) => Ok(center),
                    None => Err(Error::ImageNotFound { path: path.clone() }),
                }
            }

            Target::Point { x, y } => {
                let needs_cursor =
                    matches!(x, Coord::Rel(_)) || matches!(y, Coord::Rel(_));
                let current = if needs_cursor {
                    self.driver.cursor_position()?
                } else {
                    (0, 0)
                };
                Ok((resolve_axis(*x, current.0), resolve_axis(*y, current.1)))
            }
        }
    }
}

fn resolve_axis(coord: Coord, current: i32) -> i32 {
    match coord {
        Coord::Abs(value) => value,
        Coord::Rel(delta) => current + delta,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::ExecutionConfig;
    use crate::error::Error;
    use crate::executor::testing::runtime_with;
    use crate::model::{Coord, InputAction, MouseAction, MouseButton, Target};

    fn point(x: Coord, y: Coord) -> Target {
        Target::Point { x, y }
    }

    #[test]
    fn test_absolute_point_does_not_query_cursor() {
        let (mut runtime, log) = runtime_with(ExecutionConfig::default(), (10, 20), None);
        runtime
            .run(&[InputAction::Mouse(MouseAction::Move(point(
                Coord::Abs(100),
                Coord::Abs(200),
            )))])
            .unwrap();
        assert_eq!(log.borrow().as_slice(), ["move 100,200 d=0"]);
    }

    #[test]
    fn test_relative_axes_resolve_against_live_cursor() {
        let (mut runtime, log) = runtime_with(ExecutionConfig::default(), (10, 20), None);
        runtime
            .run(&[InputAction::Mouse(MouseAction::Move(point(
                Coord::Rel(50),
                Coord::Rel(-5),
            )))])
            .unwrap();
        assert_eq!(log.borrow().as_slice(), ["move 60,15 d=0"]);
    }

    #[test]
    fn test_relative_moves_chain_from_each_new_position() {
        let (mut runtime, log) = runtime_with(ExecutionConfig::default(), (0, 0), None);
        let step = InputAction::Mouse(MouseAction::Move(point(Coord::Rel(10), Coord::Rel(0))));
        runtime.run(&[step.clone(), step]).unwrap();
        assert_eq!(log.borrow().as_slice(), ["move 10,0 d=0", "move 20,0 d=0"]);
    }

    #[test]
    fn test_mixed_axes() {
        let (mut runtime, log) = runtime_with(ExecutionConfig::default(), (10, 20), None);
        runtime
            .run(&[InputAction::Mouse(MouseAction::Move(point(
                Coord::Abs(100),
                Coord::Rel(0),
            )))])
            .unwrap();
        assert_eq!(log.borrow().as_slice(), ["move 100,20 d=0"]);
    }

    #[test]
    fn test_click_current_position_never_needs_arguments() {
        let (mut runtime, log) = runtime_with(ExecutionConfig::default(), (7, 8), None);
        runtime
            .run(&[InputAction::Mouse(MouseAction::Click {
                button: MouseButton::Left,
                target: Target::Current,
            })])
            .unwrap();
        assert_eq!(log.borrow().as_slice(), ["click Left 7,8 n=1 i=0"]);
    }

    #[test]
    fn test_click_with_duration_moves_first() {
        let config = ExecutionConfig {
            duration: 0.25,
            ..Default::default()
        };
        let (mut runtime, log) = runtime_with(config, (0, 0), None);
        runtime
            .run(&[InputAction::Mouse(MouseAction::Click {
                button: MouseButton::Right,
                target: point(Coord::Abs(5), Coord::Abs(6)),
            })])
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["move 5,6 d=0.25", "click Right 5,6 n=1 i=0"]
        );
    }

    #[test]
    fn test_double_click_uses_configured_interval() {
        let config = ExecutionConfig {
            doubleclick_interval: 0.2,
            ..Default::default()
        };
        let (mut runtime, log) = runtime_with(config, (0, 0), None);
        runtime
            .run(&[InputAction::Mouse(MouseAction::Click {
                button: MouseButton::DoubleLeft,
                target: point(Coord::Abs(1), Coord::Abs(2)),
            })])
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["click DoubleLeft 1,2 n=2 i=0.2"]
        );
    }

    #[test]
    fn test_click_on_located_image() {
        let (mut runtime, log) =
            runtime_with(ExecutionConfig::default(), (0, 0), Some((640, 360)));
        runtime
            .run(&[InputAction::Mouse(MouseAction::Click {
                button: MouseButton::Left,
                target: Target::Image(PathBuf::from("button.png")),
            })])
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            ["locate button.png c=0.8 g=true", "click Left 640,360 n=1 i=0"]
        );
    }

    #[test]
    fn test_image_miss_aborts_remaining_actions() {
        let (mut runtime, log) = runtime_with(ExecutionConfig::default(), (0, 0), None);
        let err = runtime
            .run(&[
                InputAction::Mouse(MouseAction::Move(Target::Image(PathBuf::from(
                    "gone.png",
                )))),
                InputAction::Mouse(MouseAction::Click {
                    button: MouseButton::Left,
                    target: Target::Current,
                }),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::ImageNotFound { .. }));
        assert!(err.to_string().contains("gone.png"));
        // only the failed lookup ran; the queued click never happened
        assert_eq!(log.borrow().as_slice(), ["locate gone.png c=0.8 g=true"]);
    }
}
