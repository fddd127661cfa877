#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! input-simulation: simulate sequences of mouse and keyboard input from a
//! compact action mini-language.
//!
//! A single invocation expresses "move, click, wait, type, press a hotkey"
//! as one composable action list: `mouse "100,200 R S,0.5 L,+50,-30"`.
//! Most implementation details live under the internal modules:
//! - `model`: The parsed action and target types.
//! - `parser`: Tokenization and the mouse/keyboard/combined grammars.
//! - `executor`: The sequence runtime (pacing, target resolution, typing).
//! - `platform`: Collaborator traits and their enigo/xcap/arboard-backed
//!   implementations, plus dry-run no-ops.
//! - `config`: Per-invocation execution settings and their validation.
//! - `lock`: The machine-wide cross-process concurrency guard.
//! - `logging`: Console + rolling-file tracing setup.
//! - `utils`: Easing curves and path helpers.
//!
//! Use `input_simulation::prelude::*` to bring commonly used items into
//! scope quickly.

/// Public module: per-invocation execution settings.
pub mod config;
/// Public module: the crate error taxonomy.
pub mod error;
/// Public module: execution engine (runtime, mouse, keyboard).
pub mod executor;
/// Public module: cross-process concurrency guard.
pub mod lock;
/// Public module: tracing initialization.
pub mod logging;
/// Public module: parsed action and target types.
pub mod model;
/// Public module: the action grammar parsers.
pub mod parser;
/// Public module: platform collaborators (traits and implementations).
pub mod platform;
/// Public module: utilities (easing, paths).
pub mod utils;

/// Crate-level constants for consumers that want to inspect package
/// metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use input_simulation::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use anyhow::{Context, anyhow, bail, ensure};

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    // Timing helpers
    pub use std::time::Duration;

    // External crates (namespaced) if callers want direct access
    pub use crate as input_simulation;
    pub use enigo;
    pub use rand;

    // Frequently used internal items
    pub use crate::config::ExecutionConfig;
    pub use crate::error::{Error, Result};
    pub use crate::executor::Runtime;
    pub use crate::model::{InputAction, KeyboardAction, MouseAction, MouseButton, Target};
    pub use crate::{config, executor, lock, model, parser, platform, utils};
}
