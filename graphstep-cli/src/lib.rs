//! Support library for the graphstep CLI binary.
//!
//! Re-exports the CLI and logging modules so doctests and integration tests
//! can drive commands without forking a subprocess.

pub mod cli;
pub mod logging;
