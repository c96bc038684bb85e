use crate::error::CommandError;
use std::fmt;
use std::str::FromStr;

/// Operation the orchestrator can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadowCommand {
    /// Dump remote data to the compressed data file
    Dump,
    /// Recreate the local database from the data file
    Reload,
    /// Dump the local schema
    LocalSchema,
    /// Dump the remote schema
    RemoteSchema,
    /// Apply the transform script to the local database
    Transform,
}

impl ShadowCommand {
    /// Sequence run when no command is given
    pub const DEFAULT_SEQUENCE: [ShadowCommand; 3] = [
        ShadowCommand::Dump,
        ShadowCommand::Reload,
        ShadowCommand::Transform,
    ];

    pub const ALL: [ShadowCommand; 5] = [
        ShadowCommand::Dump,
        ShadowCommand::Reload,
        ShadowCommand::LocalSchema,
        ShadowCommand::RemoteSchema,
        ShadowCommand::Transform,
    ];
}

/// Resolve a user-typed command name.
///
/// Dashes are ignored and matching is case-insensitive, so `local-schema`,
/// `LocalSchema` and `LOCALSCHEMA` are the same command.
pub fn text_to_command(text: &str) -> Result<ShadowCommand, CommandError> {
    if text.is_empty() {
        return Err(CommandError::Empty);
    }

    let normalized = text.replace('-', "");
    match normalized.trim().to_lowercase().as_str() {
        "dump" => Ok(ShadowCommand::Dump),
        "reload" => Ok(ShadowCommand::Reload),
        "localschema" => Ok(ShadowCommand::LocalSchema),
        "remoteschema" => Ok(ShadowCommand::RemoteSchema),
        "transform" => Ok(ShadowCommand::Transform),
        _ => Err(CommandError::Unknown(text.to_string())),
    }
}

impl FromStr for ShadowCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        text_to_command(s)
    }
}

impl fmt::Display for ShadowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShadowCommand::Dump => write!(f, "dump"),
            ShadowCommand::Reload => write!(f, "reload"),
            ShadowCommand::LocalSchema => write!(f, "local-schema"),
            ShadowCommand::RemoteSchema => write!(f, "remote-schema"),
            ShadowCommand::Transform => write!(f, "transform"),
        }
    }
}
