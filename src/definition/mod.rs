//! Shadow definition: which remote database to mirror, where to put it, and
//! per-table dump overrides.
//!
//! A definition file is line oriented:
//!
//! ```text
//! # connection strings are passed verbatim to the mysql tools
//! remote-server   = -h db.example.com -u reader -psecret
//! remote-database = shop
//! local-server    = -u root
//! local-database  = shop_dev
//! data-file       = dumps/shop.sql
//!
//! --skip-triggers          # applies to the default section
//!
//! table = audit_log
//! --where="created_at > NOW() - INTERVAL 7 DAY"
//! ```

mod parser;

use crate::error::{MissingField, ShadowError, ValidationError};
use crate::report::Reporter;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use parser::parse;

/// Extension tried when a definition path does not exist as given
pub const DEFINITION_EXTENSION: &str = "shadow";

/// Collation used for the local database when none is configured
pub const DEFAULT_COLLATION: &str = "utf8mb4_general_ci";

/// Locate a definition file, trying `<name>.shadow` when `name` is missing
pub fn resolve_path(name: &Path) -> Result<PathBuf, ShadowError> {
    if name.exists() {
        return Ok(name.to_path_buf());
    }

    let mut with_extension = name.as_os_str().to_os_string();
    with_extension.push(".");
    with_extension.push(DEFINITION_EXTENSION);
    let with_extension = PathBuf::from(with_extension);
    if with_extension.exists() {
        return Ok(with_extension);
    }

    Err(ShadowError::DefinitionNotFound {
        name: name.to_path_buf(),
    })
}

/// Parsed shadow definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub remote_database: String,
    pub remote_server: String,
    pub local_database: String,
    pub local_server: String,
    pub local_collation: String,
    pub data_file: String,
    pub transform_file: Option<String>,
    /// Extra dump flags per table selector; `""` is the default section
    extra_params: BTreeMap<String, Vec<String>>,
}

impl Default for Definition {
    fn default() -> Self {
        Self::new()
    }
}

impl Definition {
    /// Empty definition holding only the default selector
    pub fn new() -> Self {
        let mut extra_params = BTreeMap::new();
        extra_params.insert(String::new(), Vec::new());
        Self {
            remote_database: String::new(),
            remote_server: String::new(),
            local_database: String::new(),
            local_server: String::new(),
            local_collation: String::new(),
            data_file: String::new(),
            transform_file: None,
            extra_params,
        }
    }

    /// Read and parse a definition file (not yet validated)
    pub fn load(path: &Path) -> Result<Self, ShadowError> {
        let content = fs::read_to_string(path).map_err(|source| ShadowError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(parse(&content)?)
    }

    /// Selectors and their flags, in ascending key order
    pub fn extra_params(&self) -> &BTreeMap<String, Vec<String>> {
        &self.extra_params
    }

    /// Flags configured for a selector
    pub fn flags(&self, selector: &str) -> Option<&[String]> {
        self.extra_params.get(selector).map(Vec::as_slice)
    }

    /// Named (non-default) selectors, ascending
    pub fn table_selectors(&self) -> impl Iterator<Item = &str> {
        self.extra_params
            .keys()
            .map(String::as_str)
            .filter(|k| !k.is_empty())
    }

    /// Register a selector; an existing one keeps its flags
    pub fn add_selector(&mut self, selector: &str) {
        self.extra_params.entry(selector.to_string()).or_default();
    }

    /// Append a flag to a selector, registering it if needed
    pub fn add_flag(&mut self, selector: &str, flag: &str) {
        self.extra_params
            .entry(selector.to_string())
            .or_default()
            .push(flag.to_string());
    }

    /// Check required fields and fill in the default collation.
    ///
    /// Every missing field is collected before failing, so the user sees the
    /// whole list at once.
    pub fn validate(&mut self, reporter: &dyn Reporter) -> Result<(), ValidationError> {
        let checks = [
            (&self.remote_database, MissingField::RemoteDatabase),
            (&self.remote_server, MissingField::RemoteServer),
            (&self.local_database, MissingField::LocalDatabase),
            (&self.local_server, MissingField::LocalServer),
            (&self.data_file, MissingField::DataFile),
        ];

        let missing: Vec<MissingField> = checks
            .iter()
            .filter(|(value, _)| value.is_empty())
            .map(|(_, field)| *field)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        if self.local_collation.is_empty() {
            reporter.warn(&format!(
                "No local collation specified, using '{}'.",
                DEFAULT_COLLATION
            ));
            self.local_collation = DEFAULT_COLLATION.to_string();
        }

        Ok(())
    }
}
