//! Command line construction for each operation.
//!
//! These functions are pure: they only describe what would be run, which is
//! what the orchestrator executes and what the tests inspect.

use super::ShadowOptions;
use crate::definition::Definition;

const DUMP_TOOL: &str = "mysqldump";
const CLIENT_TOOL: &str = "mysql";
const CLIENT_CHARSET: &str = "--default-character-set=utf8mb4";
const STRIP_AUTO_CREATE_USER: &str = "| sed \"s/NO_AUTO_CREATE_USER//\"";
const STRIP_AUTO_INCREMENT: &str = "| sed \"s/ AUTO_INCREMENT=[0-9]*//g\"";

/// Join the non-blank parts of a command line with single spaces
fn shell_line(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn verbose_flag(options: &ShadowOptions) -> &'static str {
    if options.verbose {
        "-v"
    } else {
        ""
    }
}

/// Compressed data file written by dump and read by reload
pub fn data_archive(definition: &Definition) -> String {
    format!("{}.gz", definition.data_file)
}

/// Insert `suffix` right before the extension of the file name in `path`.
///
/// `dump.sql.gz` + `_local` gives `dump.sql_local.gz`; a name without an
/// extension simply gets the suffix appended. Dots in directory names and a
/// leading dot of a hidden file do not count as extensions.
pub fn add_to_file_name(path: &str, suffix: &str) -> String {
    let name_start = path.rfind(['/', '\\']).map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let split = name_start + dot;
            format!("{}{}{}", &path[..split], suffix, &path[split..])
        }
        _ => format!("{}{}", path, suffix),
    }
}

/// Tables for the default section: the filter minus every named selector.
///
/// Empty when no filter is active, meaning the whole database.
pub fn default_section_tables(definition: &Definition, options: &ShadowOptions) -> Vec<String> {
    let mut tables = options.tables.clone();
    for selector in definition.table_selectors() {
        tables.remove(selector);
    }
    tables.into_vec()
}

/// One dump line per selector, default section first.
///
/// All sections go to the same archive: the first line processed truncates
/// it and the rest append, so a later reload sees one continuous dump.
pub fn dump_lines(definition: &Definition, options: &ShadowOptions) -> Vec<String> {
    let archive = data_archive(definition);
    let filtered = options.tables.is_active();
    let default_tables = default_section_tables(definition, options);

    let mut lines = Vec::new();
    for (selector, flags) in definition.extra_params() {
        let tables = if selector.is_empty() {
            // Every filtered table has its own section; dumping the default
            // section with no table list would pull the whole database.
            if filtered && default_tables.is_empty() {
                continue;
            }
            default_tables.join(" ")
        } else {
            if filtered && !options.tables.contains(selector) {
                continue;
            }
            selector.clone()
        };

        let redirect = if lines.is_empty() { ">" } else { ">>" };
        lines.push(shell_line(&[
            DUMP_TOOL,
            &definition.remote_server,
            "-R -E -C --single_transaction",
            verbose_flag(options),
            &flags.join(" "),
            &definition.remote_database,
            &tables,
            "| gzip",
            &format!("{} {}", redirect, archive),
        ]));
    }
    lines
}

/// Recreate the local database, then load the archive into it
pub fn reload_lines(definition: &Definition) -> [String; 2] {
    let db = &definition.local_database;
    let recreate = format!(
        "-e \"drop database if exists {db}; create database {db} collate '{}';\"",
        definition.local_collation
    );

    [
        shell_line(&[
            CLIENT_TOOL,
            &definition.local_server,
            CLIENT_CHARSET,
            &recreate,
        ]),
        shell_line(&[
            "gzip -d -c",
            &data_archive(definition),
            STRIP_AUTO_CREATE_USER,
            "|",
            CLIENT_TOOL,
            &definition.local_server,
            CLIENT_CHARSET,
            db,
        ]),
    ]
}

fn auto_increment_filter(options: &ShadowOptions) -> &'static str {
    if options.remove_auto_increment {
        STRIP_AUTO_INCREMENT
    } else {
        ""
    }
}

pub fn local_schema_line(definition: &Definition, options: &ShadowOptions) -> String {
    shell_line(&[
        DUMP_TOOL,
        &definition.local_server,
        "-R -E -C --comments --no-data",
        verbose_flag(options),
        &definition.local_database,
        auto_increment_filter(options),
        &format!("> {}", add_to_file_name(&definition.data_file, "_local")),
    ])
}

/// Same as the local schema dump but without `-C`
pub fn remote_schema_line(definition: &Definition, options: &ShadowOptions) -> String {
    shell_line(&[
        DUMP_TOOL,
        &definition.remote_server,
        "-R -E --comments --no-data",
        verbose_flag(options),
        &definition.remote_database,
        auto_increment_filter(options),
        &format!("> {}", add_to_file_name(&definition.data_file, "_remote")),
    ])
}

/// Feed the transform script to the local database, if one is configured
pub fn transform_line(definition: &Definition, options: &ShadowOptions) -> Option<String> {
    let script = definition.transform_file.as_deref()?;
    Some(shell_line(&[
        CLIENT_TOOL,
        &definition.local_server,
        CLIENT_CHARSET,
        verbose_flag(options),
        &definition.local_database,
        &format!("< {}", script),
    ]))
}
