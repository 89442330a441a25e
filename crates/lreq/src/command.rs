use std::fmt;
use std::str::FromStr;

use lreq_core::MergeMode;
use lreq_types::CombinatorLayout;

/// A player-triggered operation on one entity's requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Encode the entity's requests into the held blank blueprint.
    Export,
    /// Replace all requests with the held template.
    Import,
    Append,
    Increment,
    Decrement,
    Set,
    /// Add trash requests for every unrequested catalog item.
    AutoTrash,
    /// Remove the auto-trash region.
    ClearAutoTrash,
    /// Remove every request.
    ClearRequests,
}

impl Command {
    pub const ALL: [Self; 9] = [
        Self::Export,
        Self::Import,
        Self::Append,
        Self::Increment,
        Self::Decrement,
        Self::Set,
        Self::AutoTrash,
        Self::ClearAutoTrash,
        Self::ClearRequests,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Export => "export",
            Self::Import => "import",
            Self::Append => "append",
            Self::Increment => "increment",
            Self::Decrement => "decrement",
            Self::Set => "set",
            Self::AutoTrash => "auto_trash",
            Self::ClearAutoTrash => "clear_auto_trash",
            Self::ClearRequests => "clear_requests",
        }
    }

    /// The merge a template-consuming command performs, if any.
    pub const fn merge_mode(self) -> Option<MergeMode> {
        match self {
            Self::Import => Some(MergeMode::Replace),
            Self::Append => Some(MergeMode::Append),
            Self::Increment => Some(MergeMode::Increment),
            Self::Decrement => Some(MergeMode::Decrement),
            Self::Set => Some(MergeMode::Set),
            Self::Export | Self::AutoTrash | Self::ClearAutoTrash | Self::ClearRequests => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| format!("unknown command `{s}`"))
    }
}

/// What the player is holding when a command runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cursor {
    #[default]
    Empty,
    /// A blueprint; `None` when it is blank.
    Blueprint(Option<CombinatorLayout>),
    /// Anything else, by name.
    Other(String),
}

impl Cursor {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Empty => "an empty hand".to_owned(),
            Self::Blueprint(None) => "a blank blueprint".to_owned(),
            Self::Blueprint(Some(_)) => "a blueprint that already has contents".to_owned(),
            Self::Other(name) => format!("`{name}`"),
        }
    }
}

/// Result of a successful command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub command: Command,
    /// Slots written, or slots encoded for `export`.
    pub written: usize,
    pub cleared: usize,
}

impl Outcome {
    pub const fn new(command: Command, written: usize, cleared: usize) -> Self {
        Self {
            command,
            written,
            cleared,
        }
    }
}
