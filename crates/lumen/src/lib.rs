//! Lumen geometry and optics math.
//!
//! This crate re-exports the math core as [`linalg`] and adds the pieces that sit between the core
//! and an application:
//!
//! - [`init_logger!`] sets up logging for binaries and examples.
//! - [`intern`] deduplicates geometric values by their structural hash.
//!
//! # Coordinates
//!
//! Vectors are column vectors and matrices are column-major, so transforms apply right to left:
//! in `a * b * v`, `b` is applied to `v` first. Quaternion and [`linalg::Transform`] composition
//! follows the same order.
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the log filter installed by [`init_logger!`], using the
//!   [`env_logger`] syntax.

use log::LevelFilter;

pub use lumen_linalg as linalg;

pub mod intern;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and Lumen will log at *trace* level.
/// Otherwise, they will log at *debug* level. Everything else is filtered out unless enabled via
/// `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
