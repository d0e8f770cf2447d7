//! Command-line interface for generating graphs and stepping traversals.
//!
//! `matrix` prints a generated matrix, `traverse` runs one traversal to the
//! end and `session` replays control actions from a script or stdin.

mod commands;
mod render;
mod session;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GraphArgs, MatrixCommand, ModeArg, OutputFormat,
    SessionCommand, TraverseCommand, run_cli,
};
pub use render::{
    FrameRecord, OutcomeRecord, describe_outcome, matrix_heading, render_frame, render_frame_json,
    render_matrix,
};
pub use session::{Action, Applied, action_word, apply};
