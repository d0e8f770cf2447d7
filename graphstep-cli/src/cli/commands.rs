//! Command implementations and argument parsing for the graphstep CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphstep_core::{
    Explorer, GraphConfig, GraphConfigBuilder, GraphError, Orientation, StepReport, TraversalMode,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

use super::render::{FrameRecord, describe_outcome, render_frame, render_frame_json, render_matrix};
use super::session::{Action, Applied, action_word, apply};

const STEP_IGNORED: &str = "step ignored: no traversal in progress or traversal complete";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphstep",
    about = "Generate a seeded random digraph and step through BFS or DFS."
)]
pub struct Cli {
    /// Graph generation options shared by every command.
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Options controlling graph generation.
#[derive(Debug, Args, Clone, Default)]
pub struct GraphArgs {
    /// Seed of the Park-Miller stream.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of vertices.
    #[arg(long, global = true, conflicts_with = "variant")]
    pub vertices: Option<usize>,

    /// Density constant `k`; larger values give denser graphs.
    #[arg(long, global = true, conflicts_with = "variant")]
    pub density: Option<f64>,

    /// Assignment variant digits; derives the vertex count and density.
    #[arg(long, global = true, num_args = 2, value_names = ["N3", "N4"])]
    pub variant: Option<Vec<u8>>,
}

impl GraphArgs {
    /// Applies the options on top of the default configuration.
    ///
    /// # Errors
    /// Returns [`GraphError`] when the resulting configuration is invalid.
    pub fn to_config(&self) -> Result<GraphConfig, GraphError> {
        let mut builder = GraphConfigBuilder::new();
        if let Some([n3, n4]) = self.variant.as_deref() {
            builder = builder.with_variant(*n3, *n4);
        }
        if let Some(seed) = self.seed {
            builder = builder.with_seed(seed);
        }
        if let Some(vertices) = self.vertices {
            builder = builder.with_vertex_count(vertices);
        }
        if let Some(density) = self.density {
            builder = builder.with_density(density);
        }
        builder.build()
    }
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the generated adjacency matrix.
    Matrix(MatrixCommand),
    /// Run a traversal to completion, printing a frame after every step.
    Traverse(TraverseCommand),
    /// Drive the explorer with one action per input line.
    Session(SessionCommand),
}

/// Options accepted by the `matrix` command.
#[derive(Debug, Args, Clone, Default)]
pub struct MatrixCommand {
    /// Print the undirected closure instead of the directed matrix.
    #[arg(long)]
    pub undirected: bool,
}

/// Options accepted by the `traverse` command.
#[derive(Debug, Args, Clone)]
pub struct TraverseCommand {
    /// Traversal discipline.
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Stop after this many steps even if the traversal is unfinished.
    #[arg(long = "max-steps")]
    pub max_steps: Option<usize>,

    /// Output format for frames.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Options accepted by the `session` command.
#[derive(Debug, Args, Clone)]
pub struct SessionCommand {
    /// Read actions from this file instead of standard input.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Output format for frames.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Traversal discipline selected on the command line.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Breadth-first search.
    Bfs,
    /// Depth-first search.
    Dfs,
}

impl From<ModeArg> for TraversalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Bfs => Self::Bfs,
            ModeArg::Dfs => Self::Dfs,
        }
    }
}

/// Frame output formats.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Graph configuration or generation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// A script file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading a script line failed.
    #[error("failed to read script line {line}: {source}")]
    Script {
        /// One-based line number.
        line: usize,
        /// Underlying read failure.
        #[source]
        source: io::Error,
    },
    /// A script line named no known action.
    #[error("unknown action `{action}` on script line {line}")]
    UnknownAction {
        /// One-based line number.
        line: usize,
        /// The offending word.
        action: String,
    },
    /// Writing a JSON frame failed.
    #[error("failed to write JSON frame: {0}")]
    Json(#[from] serde_json::Error),
    /// Writing text output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ExecutionSummary {
    /// Number of frames (or matrices) written.
    pub frames: usize,
    /// Whether a traversal ran to completion.
    pub completed: bool,
}

/// Executes the CLI command represented by `cli`.
///
/// `input` supplies session actions when no script file is given; all
/// payload output goes to `output`.
///
/// # Errors
/// Returns [`CliError`] when configuration, script parsing or output fails.
///
/// # Examples
/// ```
/// # use graphstep_cli::cli::{Cli, Command, GraphArgs, MatrixCommand, run_cli};
/// let cli = Cli {
///     graph: GraphArgs::default(),
///     command: Command::Matrix(MatrixCommand { undirected: false }),
/// };
/// let mut output = Vec::new();
/// run_cli(cli, std::io::empty(), &mut output)?;
/// let text = String::from_utf8(output)?;
/// assert!(text.starts_with("Directed Matrix (Adir):\n0 1 0 0 0 0 0 1 0 0 0\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip_all,
    fields(command = field::Empty, seed = field::Empty, vertices = field::Empty),
)]
pub fn run_cli(
    cli: Cli,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<ExecutionSummary, CliError> {
    let config = cli.graph.to_config()?;
    let span = Span::current();
    span.record("seed", config.seed());
    span.record("vertices", config.vertex_count());

    let summary = match cli.command {
        Command::Matrix(command) => {
            span.record("command", field::display("matrix"));
            run_matrix(&config, &command, &mut output)?
        }
        Command::Traverse(command) => {
            span.record("command", field::display("traverse"));
            run_traverse(&config, &command, &mut output)?
        }
        Command::Session(command) => {
            span.record("command", field::display("session"));
            match &command.script {
                Some(path) => {
                    let reader = open_script(path)?;
                    run_session(&config, command.format, reader, &mut output)?
                }
                None => run_session(&config, command.format, input, &mut output)?,
            }
        }
    };
    output.flush()?;

    info!(
        frames = summary.frames,
        completed = summary.completed,
        "command completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.matrix", err, skip_all, fields(orientation = field::Empty))]
pub(super) fn run_matrix(
    config: &GraphConfig,
    command: &MatrixCommand,
    output: &mut impl Write,
) -> Result<ExecutionSummary, CliError> {
    let orientation = if command.undirected {
        Orientation::Undirected
    } else {
        Orientation::Directed
    };
    Span::current().record("orientation", orientation.as_str());
    let graph = config.generate()?;
    render_matrix(graph.matrix(orientation), &mut *output)?;
    Ok(ExecutionSummary {
        frames: 1,
        completed: false,
    })
}

#[instrument(
    name = "cli.traverse",
    err,
    skip_all,
    fields(mode = field::Empty, max_steps = field::Empty),
)]
pub(super) fn run_traverse(
    config: &GraphConfig,
    command: &TraverseCommand,
    output: &mut impl Write,
) -> Result<ExecutionSummary, CliError> {
    let mode = TraversalMode::from(command.mode);
    let span = Span::current();
    span.record("mode", mode.as_str());
    if let Some(max_steps) = command.max_steps {
        span.record("max_steps", max_steps);
    }

    let mut explorer = Explorer::new(config)?;
    let mut writer = FrameWriter::new(command.format, output);
    let start = explorer.start(mode);
    writer.write(&explorer, mode.as_str(), Some(&start))?;

    let limit = command.max_steps.unwrap_or(usize::MAX);
    let mut steps = 0;
    while steps < limit {
        let Some(report) = explorer.step() else {
            break;
        };
        steps += 1;
        writer.write(&explorer, Action::Step.as_str(), Some(&report))?;
    }

    Ok(ExecutionSummary {
        frames: writer.frames,
        completed: explorer.engine().session().is_complete(),
    })
}

#[instrument(name = "cli.session", err, skip_all, fields(format = ?format))]
pub(super) fn run_session(
    config: &GraphConfig,
    format: OutputFormat,
    input: impl BufRead,
    output: &mut impl Write,
) -> Result<ExecutionSummary, CliError> {
    let mut explorer = Explorer::new(config)?;
    let mut writer = FrameWriter::new(format, output);
    writer.write(&explorer, "init", None)?;

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| CliError::Script {
            line: line_number,
            source,
        })?;
        let Some(word) = action_word(&line) else {
            continue;
        };
        let action = Action::parse(word).ok_or_else(|| CliError::UnknownAction {
            line: line_number,
            action: word.to_owned(),
        })?;

        match apply(&mut explorer, action) {
            Applied::Quit => break,
            Applied::Ignored => {
                warn!(
                    line = line_number,
                    "step requested while stepping is disabled"
                );
                writer.notice(STEP_IGNORED)?;
            }
            Applied::Changed => writer.write(&explorer, action.as_str(), None)?,
            Applied::Stepped(report) => writer.write(&explorer, action.as_str(), Some(&report))?,
        }
    }

    Ok(ExecutionSummary {
        frames: writer.frames,
        completed: explorer.engine().session().is_complete(),
    })
}

/// Writes numbered frames in the selected format, flushing after each so an
/// interactive session sees its output immediately.
struct FrameWriter<'w, W: Write> {
    format: OutputFormat,
    output: &'w mut W,
    frames: usize,
}

impl<'w, W: Write> FrameWriter<'w, W> {
    const fn new(format: OutputFormat, output: &'w mut W) -> Self {
        Self {
            format,
            output,
            frames: 0,
        }
    }

    fn write(
        &mut self,
        explorer: &Explorer,
        action: &str,
        report: Option<&StepReport>,
    ) -> Result<(), CliError> {
        let frame = explorer.frame();
        match self.format {
            OutputFormat::Text => {
                let label = report.map_or_else(
                    || action.to_owned(),
                    |report| format!("{action}: {}", describe_outcome(report.outcome)),
                );
                render_frame(self.frames, &label, &frame, &mut *self.output)?;
            }
            OutputFormat::Json => {
                let record = FrameRecord::new(self.frames, action, &frame, report);
                render_frame_json(&record, &mut *self.output)?;
            }
        }
        self.frames += 1;
        self.output.flush()?;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => writeln!(self.output, "{message}\n")?,
            OutputFormat::Json => {
                serde_json::to_writer(
                    &mut *self.output,
                    &serde_json::json!({ "notice": message }),
                )?;
                writeln!(self.output)?;
            }
        }
        self.output.flush()?;
        Ok(())
    }
}

#[instrument(name = "cli.open_script", err, fields(path = field::Empty))]
pub(super) fn open_script(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}
