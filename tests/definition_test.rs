//! Integration tests for loading and validating shadow definitions

use myshadow::definition::{self, Definition, DEFAULT_COLLATION};
use myshadow::error::{MissingField, ParseError, ShadowError};
use myshadow::report::RecordingReporter;
use std::fs;
use tempfile::TempDir;

const SHOP: &str = "\
# Shop mirror
remote-server   = -h db.example.com -u reader
remote-database = shop
local-server    = -u root
local-database  = shop_dev
data-file       = dumps/shop.sql

--skip-triggers

table = users
--where=\"id < 1000\"

table = orders
-t
";

#[test]
fn test_load_and_validate() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shop.shadow");
    fs::write(&path, SHOP).unwrap();

    let mut def = Definition::load(&path).unwrap();
    let reporter = RecordingReporter::new();
    def.validate(&reporter).unwrap();

    assert!(!def.remote_server.is_empty());
    assert!(!def.remote_database.is_empty());
    assert!(!def.local_server.is_empty());
    assert!(!def.local_database.is_empty());
    assert!(!def.data_file.is_empty());
    assert_eq!(def.local_collation, DEFAULT_COLLATION);
    assert!(def.extra_params().contains_key(""));
    assert_eq!(reporter.warnings().len(), 1);
}

#[test]
fn test_load_resolves_shadow_extension() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("shop.shadow"), SHOP).unwrap();

    let path = definition::resolve_path(&temp_dir.path().join("shop")).unwrap();
    let def = Definition::load(&path).unwrap();
    assert_eq!(def.remote_database, "shop");
}

#[test]
fn test_missing_definition_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = definition::resolve_path(&temp_dir.path().join("nope")).unwrap_err();
    assert!(err.to_string().contains("does not exist"));

    let err = Definition::load(&temp_dir.path().join("nope.shadow")).unwrap_err();
    assert!(matches!(err, ShadowError::Read { .. }));
}

#[test]
fn test_load_reports_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.shadow");
    fs::write(&path, "remote-database = shop\nremote-host = x\n").unwrap();

    match Definition::load(&path).unwrap_err() {
        ShadowError::Parse(ParseError::UnknownDirective { line_number, key }) => {
            assert_eq!(line_number, 2);
            assert_eq!(key, "remote-host");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_twice_gives_equal_definitions() {
    let a = definition::parse(SHOP).unwrap();
    let b = definition::parse(SHOP).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_validation_aggregates_missing_fields() {
    let mut def = definition::parse(
        "remote-database = shop\nlocal-server = -u root\nlocal-database = shop_dev\n",
    )
    .unwrap();

    let err = def.validate(&RecordingReporter::new()).unwrap_err();
    assert_eq!(
        err.missing,
        vec![MissingField::RemoteServer, MissingField::DataFile]
    );

    let message = err.to_string();
    assert!(message.contains("remote-server"));
    assert!(message.contains("data-file"));
}

#[test]
fn test_empty_value_counts_as_missing() {
    let mut def = definition::parse(
        "remote-server = -h r\nremote-database =\nlocal-server = -u root\nlocal-database = d\ndata-file = f.sql\n",
    )
    .unwrap();

    let err = def.validate(&RecordingReporter::new()).unwrap_err();
    assert_eq!(err.missing, vec![MissingField::RemoteDatabase]);
}
