//! Recording fake collaborators for executor tests.
//!
//! All fakes append to one shared event log so tests can assert the exact
//! interleaving of driver calls and sleeps.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crate::config::ExecutionConfig;
use crate::error::Result;
use crate::executor::Runtime;
use crate::model::MouseButton;
use crate::platform::{Clock, InputDriver, ScreenLocator, TextInjector};

pub(crate) type EventLog = Rc<RefCell<Vec<String>>>;

pub(crate) struct FakeDriver {
    log: EventLog,
    position: (i32, i32),
}

impl InputDriver for FakeDriver {
    fn cursor_position(&mut self) -> Result<(i32, i32)> {
        Ok(self.position)
    }

    fn move_cursor(&mut self, x: i32, y: i32, duration: Duration) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("move {x},{y} d={}", duration.as_secs_f64()));
        self.position = (x, y);
        Ok(())
    }

    fn click(&mut self, button: MouseButton, x: i32, y: i32, interval: Duration) -> Result<()> {
        self.log.borrow_mut().push(format!(
            "click {button:?} {x},{y} n={} i={}",
            button.click_count(),
            interval.as_secs_f64()
        ));
        self.position = (x, y);
        Ok(())
    }

    fn press_key(&mut self, key: &str, presses: u32, interval: Duration) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("key {key} x{presses} i={}", interval.as_secs_f64()));
        Ok(())
    }

    fn press_chord(&mut self, keys: &[String]) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("chord {}", keys.join("+")));
        Ok(())
    }
}

pub(crate) struct FakeLocator {
    log: EventLog,
    /// Every lookup reports this center; `None` means nothing is on
    /// screen.
    found: Option<(i32, i32)>,
}

impl ScreenLocator for FakeLocator {
    fn locate_center(
        &mut self,
        image: &Path,
        confidence: f64,
        grayscale: bool,
    ) -> Result<Option<(i32, i32)>> {
        self.log.borrow_mut().push(format!(
            "locate {} c={confidence} g={grayscale}",
            image.display()
        ));
        Ok(self.found)
    }
}

pub(crate) struct FakeInjector {
    log: EventLog,
}

impl TextInjector for FakeInjector {
    fn paste_text(&mut self, text: &str) -> Result<()> {
        self.log.borrow_mut().push(format!("paste {text:?}"));
        Ok(())
    }

    fn stream_text(&mut self, text: &str, interval: Duration) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("stream {text:?} i={}", interval.as_secs_f64()));
        Ok(())
    }

    fn press_enter(&mut self) -> Result<()> {
        self.log.borrow_mut().push("enter".to_string());
        Ok(())
    }
}

pub(crate) struct FakeClock {
    log: EventLog,
}

impl Clock for FakeClock {
    fn sleep(&mut self, duration: Duration) {
        self.log
            .borrow_mut()
            .push(format!("sleep {}", duration.as_secs_f64()));
    }
}

/// A runtime over fakes sharing one event log.
pub(crate) fn runtime_with(
    config: ExecutionConfig,
    cursor: (i32, i32),
    found: Option<(i32, i32)>,
) -> (
    Runtime<FakeDriver, FakeLocator, FakeInjector, FakeClock>,
    EventLog,
) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let runtime = Runtime::new(
        config,
        FakeDriver {
            log: log.clone(),
            position: cursor,
        },
        FakeLocator {
            log: log.clone(),
            found,
        },
        FakeInjector { log: log.clone() },
        FakeClock { log: log.clone() },
    );
    (runtime, log)
}
