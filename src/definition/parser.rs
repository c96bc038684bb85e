use super::Definition;
use crate::error::ParseError;

/// Parse definition text into a [`Definition`].
///
/// Directives apply in file order. A `table = <name>` line switches the
/// selector that subsequent flag lines attach to.
pub fn parse(text: &str) -> Result<Definition, ParseError> {
    let mut definition = Definition::new();
    let mut current_table = String::new();

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = strip_comment(raw);
        if line.is_empty() {
            continue;
        }

        if line.starts_with('-') {
            definition.add_flag(&current_table, line);
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ParseError::UnrecognizedLine {
                line_number,
                line: raw.to_string(),
            });
        };

        apply_directive(
            &mut definition,
            &mut current_table,
            key.trim(),
            value.trim(),
            line_number,
        )?;
    }

    Ok(definition)
}

fn strip_comment(line: &str) -> &str {
    let content = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    content.trim()
}

fn apply_directive(
    definition: &mut Definition,
    current_table: &mut String,
    key: &str,
    value: &str,
    line_number: usize,
) -> Result<(), ParseError> {
    match key.to_lowercase().as_str() {
        "remote-database" => definition.remote_database = value.to_string(),
        "remote-server" => definition.remote_server = value.to_string(),
        "local-database" => definition.local_database = value.to_string(),
        "local-server" => definition.local_server = value.to_string(),
        "local-collation" => definition.local_collation = value.to_string(),
        "data-file" => definition.data_file = value.to_string(),
        "transform-file" => {
            definition.transform_file = (!value.is_empty()).then(|| value.to_string())
        }
        "table" => {
            *current_table = value.to_string();
            definition.add_selector(value);
        }
        _ => {
            return Err(ParseError::UnknownDirective {
                line_number,
                key: key.to_string(),
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Production shop mirror
remote-server   = -h db.example.com -u reader
remote-database = shop
local-server    = -u root
local-database  = shop_dev    # trailing comment
local-collation = utf8mb4_unicode_ci
data-file       = dumps/shop.sql
transform-file  = anonymize.sql

--skip-triggers
--ignore-table=shop.sessions

table = users
--where="id < 1000"

table = audit_log
-t
--no-create-info
"#;

    #[test]
    fn test_parse_fields() {
        let def = parse(SAMPLE).unwrap();
        assert_eq!(def.remote_server, "-h db.example.com -u reader");
        assert_eq!(def.remote_database, "shop");
        assert_eq!(def.local_server, "-u root");
        assert_eq!(def.local_database, "shop_dev");
        assert_eq!(def.local_collation, "utf8mb4_unicode_ci");
        assert_eq!(def.data_file, "dumps/shop.sql");
        assert_eq!(def.transform_file.as_deref(), Some("anonymize.sql"));
    }

    #[test]
    fn test_parse_flags_attach_to_current_table() {
        let def = parse(SAMPLE).unwrap();
        assert_eq!(
            def.flags("").unwrap(),
            ["--skip-triggers", "--ignore-table=shop.sessions"]
        );
        assert_eq!(def.flags("users").unwrap(), ["--where=\"id < 1000\""]);
        assert_eq!(def.flags("audit_log").unwrap(), ["-t", "--no-create-info"]);
    }

    #[test]
    fn test_parse_selectors_are_ordered() {
        let def = parse(SAMPLE).unwrap();
        let keys: Vec<&str> = def.extra_params().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["", "audit_log", "users"]);
    }

    #[test]
    fn test_parse_keys_case_insensitive() {
        let def = parse("Remote-Database = shop\nDATA-FILE=x.sql").unwrap();
        assert_eq!(def.remote_database, "shop");
        assert_eq!(def.data_file, "x.sql");
    }

    #[test]
    fn test_parse_reopened_table_appends() {
        let def = parse("table = a\n-x\ntable = b\n-y\ntable = a\n-z\n").unwrap();
        assert_eq!(def.flags("a").unwrap(), ["-x", "-z"]);
        assert_eq!(def.flags("b").unwrap(), ["-y"]);
    }

    #[test]
    fn test_parse_empty_table_returns_to_default() {
        let def = parse("table = a\n-x\ntable =\n-y\n").unwrap();
        assert_eq!(def.flags("").unwrap(), ["-y"]);
        assert_eq!(def.flags("a").unwrap(), ["-x"]);
    }

    #[test]
    fn test_parse_value_may_contain_equals() {
        let def = parse("remote-server = --password=a=b").unwrap();
        assert_eq!(def.remote_server, "--password=a=b");
    }

    #[test]
    fn test_parse_empty_transform_file_is_none() {
        let def = parse("transform-file =").unwrap();
        assert_eq!(def.transform_file, None);
    }

    #[test]
    fn test_parse_line_without_equals_fails() {
        let err = parse("remote-database = shop\n  just some words  \n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedLine {
                line_number: 2,
                line: "  just some words  ".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_unknown_directive_fails() {
        let err = parse("# header\nremote-port = 3306").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownDirective {
                line_number: 2,
                key: "remote-port".to_string(),
            }
        );
        assert_eq!(err.to_string(), "line 2: Unrecognized directive: remote-port");
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse(SAMPLE).unwrap(), parse(SAMPLE).unwrap());
    }

    #[test]
    fn test_parse_empty_text() {
        let def = parse("").unwrap();
        assert_eq!(def, Definition::new());
    }
}
