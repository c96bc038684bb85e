//! Orchestration of the external MySQL tools.
//!
//! A [`Shadower`] turns a validated [`Definition`] into shell lines and runs
//! them one at a time. Every line must succeed before the next one starts:
//! reload reads the archive that dump wrote, and so on.

mod command;
mod commands;

use crate::definition::Definition;
use crate::error::{ProcessError, ShadowError};
use crate::executor::Executor;
use crate::report::Reporter;
use std::path::Path;

pub use command::{text_to_command, ShadowCommand};
pub use commands::{
    add_to_file_name, data_archive, default_section_tables, dump_lines, local_schema_line,
    reload_lines, remote_schema_line, transform_line,
};

/// Tables selected with `--table`, compared case-insensitively.
///
/// Keeps the first spelling and order in which each table was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableFilter {
    tables: Vec<String>,
}

impl TableFilter {
    pub fn new<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for table in tables {
            let table = table.as_ref().trim();
            if !table.is_empty() && !filter.contains(table) {
                filter.tables.push(table.to_string());
            }
        }
        filter
    }

    /// Whether any table was selected at all
    pub fn is_active(&self) -> bool {
        !self.tables.is_empty()
    }

    pub fn contains(&self, table: &str) -> bool {
        let lower = table.to_lowercase();
        self.tables.iter().any(|t| t.to_lowercase() == lower)
    }

    pub fn remove(&mut self, table: &str) {
        let lower = table.to_lowercase();
        self.tables.retain(|t| t.to_lowercase() != lower);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tables
    }
}

/// Run-time switches from the command line
#[derive(Debug, Clone, Default)]
pub struct ShadowOptions {
    /// Pass `-v` to the tools and echo each command line
    pub verbose: bool,
    /// Strip `AUTO_INCREMENT=<n>` counters from schema dumps
    pub remove_auto_increment: bool,
    /// Restrict the dump to these tables
    pub tables: TableFilter,
}

/// Runs shadow commands against one definition
pub struct Shadower<'a, E, R> {
    definition: &'a Definition,
    options: ShadowOptions,
    executor: E,
    reporter: R,
}

impl<'a, E: Executor, R: Reporter> Shadower<'a, E, R> {
    pub fn new(
        definition: &'a Definition,
        options: ShadowOptions,
        executor: E,
        reporter: R,
    ) -> Self {
        Self {
            definition,
            options,
            executor,
            reporter,
        }
    }

    pub fn options(&self) -> &ShadowOptions {
        &self.options
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run commands in order, stopping at the first failure
    pub fn run_all(&mut self, commands: &[ShadowCommand]) -> Result<(), ShadowError> {
        for command in commands {
            self.run(*command)?;
        }
        Ok(())
    }

    pub fn run(&mut self, command: ShadowCommand) -> Result<(), ShadowError> {
        tracing::debug!(%command, "running command");
        match command {
            ShadowCommand::Dump => self.dump(),
            ShadowCommand::Reload => self.reload(),
            ShadowCommand::LocalSchema => self.local_schema(),
            ShadowCommand::RemoteSchema => self.remote_schema(),
            ShadowCommand::Transform => self.transform(),
        }
    }

    pub fn dump(&mut self) -> Result<(), ShadowError> {
        self.reporter.info("Dumping remote server data");
        for line in dump_lines(self.definition, &self.options) {
            self.shell(&line)?;
        }
        Ok(())
    }

    pub fn reload(&mut self) -> Result<(), ShadowError> {
        let definition = self.definition;
        let db = &definition.local_database;
        let [recreate, load] = reload_lines(definition);

        self.reporter.info(&format!("Recreating local {} database", db));
        self.shell(&recreate)?;

        self.reporter.info(&format!("Loading database {} with data", db));
        self.shell(&load)
    }

    pub fn local_schema(&mut self) -> Result<(), ShadowError> {
        self.reporter.info("Dumping local schema");
        let line = local_schema_line(self.definition, &self.options);
        self.shell(&line)
    }

    pub fn remote_schema(&mut self) -> Result<(), ShadowError> {
        self.reporter.info("Dumping remote schema");
        let line = remote_schema_line(self.definition, &self.options);
        self.shell(&line)
    }

    /// Apply the transform script; an absent script is not an error
    pub fn transform(&mut self) -> Result<(), ShadowError> {
        let Some(script) = self.definition.transform_file.as_deref() else {
            self.reporter.info("No transformation file specified.");
            return Ok(());
        };

        if !Path::new(script).exists() {
            self.reporter.warn(&format!(
                "Transformation file '{}' does not exist.",
                script
            ));
            return Ok(());
        }

        self.reporter.info("Applying transformations");
        match transform_line(self.definition, &self.options) {
            Some(line) => self.shell(&line),
            None => Ok(()),
        }
    }

    fn shell(&mut self, line: &str) -> Result<(), ShadowError> {
        if self.options.verbose {
            self.reporter.info(line);
        }
        tracing::debug!(command = line, "executing");

        let code = self
            .executor
            .run(line)
            .map_err(|source| ProcessError::Spawn {
                command: line.to_string(),
                source,
            })?;
        tracing::info!(code, "process exited");

        if code != 0 {
            return Err(ProcessError::Failed {
                command: line.to_string(),
                code,
            }
            .into());
        }
        Ok(())
    }
}
