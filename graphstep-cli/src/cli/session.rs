//! Line-oriented scripts that drive an [`Explorer`].

use std::fmt;

use graphstep_core::{Explorer, StepReport};

/// One control action, as typed on a script line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    /// Show the directed matrix.
    Directed,
    /// Show the undirected matrix.
    Undirected,
    /// Start a breadth-first traversal.
    Bfs,
    /// Start a depth-first traversal.
    Dfs,
    /// Advance the traversal by one step.
    Step,
    /// Discard the traversal and show the directed matrix.
    Reset,
    /// Stop reading the script.
    Quit,
}

impl Action {
    /// Parses a script word, ignoring case; `next` is accepted for `step`.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        let action = match word.to_ascii_lowercase().as_str() {
            "directed" => Self::Directed,
            "undirected" => Self::Undirected,
            "bfs" => Self::Bfs,
            "dfs" => Self::Dfs,
            "step" | "next" => Self::Step,
            "reset" => Self::Reset,
            "quit" | "exit" => Self::Quit,
            _ => return None,
        };
        Some(action)
    }

    /// Returns the canonical script word.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Step => "step",
            Self::Reset => "reset",
            Self::Quit => "quit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What applying an action did to the explorer.
#[derive(Debug)]
pub enum Applied {
    /// The view or traversal changed without a step report.
    Changed,
    /// A traversal was started or stepped.
    Stepped(StepReport),
    /// A step was requested while stepping was disabled.
    Ignored,
    /// The script asked to stop.
    Quit,
}

/// Applies `action` to `explorer`.
pub fn apply(explorer: &mut Explorer, action: Action) -> Applied {
    match action {
        Action::Directed => {
            explorer.select_directed_view();
            Applied::Changed
        }
        Action::Undirected => {
            explorer.select_undirected_view();
            Applied::Changed
        }
        Action::Bfs => Applied::Stepped(explorer.start_bfs()),
        Action::Dfs => Applied::Stepped(explorer.start_dfs()),
        Action::Step => explorer.step().map_or(Applied::Ignored, Applied::Stepped),
        Action::Reset => {
            explorer.reset();
            Applied::Changed
        }
        Action::Quit => Applied::Quit,
    }
}

/// Strips comments and surrounding whitespace, returning `None` for lines
/// that carry no action.
#[must_use]
pub fn action_word(line: &str) -> Option<&str> {
    let content = line.split_once('#').map_or(line, |(before, _)| before).trim();
    (!content.is_empty()).then_some(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("bfs", Some(Action::Bfs))]
    #[case("DFS", Some(Action::Dfs))]
    #[case("next", Some(Action::Step))]
    #[case("Undirected", Some(Action::Undirected))]
    #[case("exit", Some(Action::Quit))]
    #[case("jump", None)]
    fn parses_action_words(#[case] word: &str, #[case] expected: Option<Action>) {
        assert_eq!(Action::parse(word), expected);
    }

    #[rstest]
    #[case("  step  ", Some("step"))]
    #[case("bfs # start here", Some("bfs"))]
    #[case("# only a comment", None)]
    #[case("   ", None)]
    fn strips_comments_and_blanks(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(action_word(line), expected);
    }
}
