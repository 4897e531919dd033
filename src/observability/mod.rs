//! Logging setup.
//!
//! The library emits `tracing` spans and events (`evaluate`, `sweep`,
//! `recommend`) and the config loader uses `log` macros. The binary installs a
//! single subscriber that receives both.
//!
//! ```ignore
//! use sepsis_threshold::observability::init_logging;
//!
//! fn main() {
//!     init_logging(cli.verbosity);
//!     // ...
//! }
//! ```

pub mod logging;

pub use logging::{default_directive, init_logging};
