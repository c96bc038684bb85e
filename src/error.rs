//! Error types for definition parsing, validation, command resolution and
//! external process execution.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Malformed line in a definition file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A non-flag line without a `key = value` shape
    #[error("line {line_number}: Unrecognized directive \"{line}\"")]
    UnrecognizedLine { line_number: usize, line: String },

    /// A `key = value` line whose key is not a known directive
    #[error("line {line_number}: Unrecognized directive: {key}")]
    UnknownDirective { line_number: usize, key: String },
}

/// Required definition field that was absent or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    RemoteDatabase,
    RemoteServer,
    LocalDatabase,
    LocalServer,
    DataFile,
}

impl MissingField {
    /// Directive name that sets this field
    pub fn directive(&self) -> &'static str {
        match self {
            MissingField::RemoteDatabase => "remote-database",
            MissingField::RemoteServer => "remote-server",
            MissingField::LocalDatabase => "local-database",
            MissingField::LocalServer => "local-server",
            MissingField::DataFile => "data-file",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MissingField::RemoteDatabase => "Remote database name is missing",
            MissingField::RemoteServer => "Remote server connection is missing",
            MissingField::LocalDatabase => "Local database name is missing",
            MissingField::LocalServer => "Local server connection is missing",
            MissingField::DataFile => "No data file specified",
        };
        write!(f, "{} ({}).", text, self.directive())
    }
}

/// Every required field missing from a definition, reported together
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("One or more missing parameters in definition file:{}", format_missing(.missing))]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

fn format_missing(missing: &[MissingField]) -> String {
    missing.iter().map(|m| format!("\n  {}", m)).collect()
}

/// Command token that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("No command given")]
    Empty,

    #[error("Invalid command: {0}")]
    Unknown(String),
}

/// Failure of an external tool invocation
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Unable to start process for `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Subprocess returned exit code {code}")]
    Failed { command: String, code: i32 },
}

impl ProcessError {
    /// Exit code of a process that ran and failed
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessError::Failed { code, .. } => Some(*code),
            ProcessError::Spawn { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShadowError {
    #[error("File definition '{}' does not exist.", .name.display())]
    DefinitionNotFound { name: PathBuf },

    #[error("Unable to read definition file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Process(#[from] ProcessError),
}
