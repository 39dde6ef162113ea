// Tests for SQL and shell injection protection in identifiers and pg_dump arguments

use dbprovision::backup::pg_dump_args;
use dbprovision::config::ConnectionSettings;
use dbprovision::db::identifier::{database_identifier, is_valid_identifier};
use rstest::rstest;
use std::path::Path;

#[rstest]
#[case("financial_app")]
#[case("_scratch")]
#[case("App2024")]
#[case("with$dollar")]
fn test_database_identifier_accepts(#[case] name: &str) {
    assert!(is_valid_identifier(name));
    assert_eq!(database_identifier(name).unwrap(), format!("\"{}\"", name));
}

#[rstest]
#[case("")]
#[case("1starts_with_digit")]
#[case("financial_app; DROP DATABASE postgres")]
#[case("name with spaces")]
#[case("quote\"breakout")]
#[case("dash-name")]
#[case("comment--")]
#[case("ñandú")]
fn test_database_identifier_rejects(#[case] name: &str) {
    assert!(!is_valid_identifier(name));
    let err = database_identifier(name).unwrap_err();
    assert!(err.to_string().contains("Invalid database name"));
}

#[test]
fn test_pg_dump_arguments_are_not_shell_interpreted() {
    let settings = ConnectionSettings {
        host: "localhost && touch /tmp/pwned".to_string(),
        user: "$(whoami)".to_string(),
        database: "db`id`".to_string(),
        ..Default::default()
    };

    let args = pg_dump_args(&settings, Path::new("backup.sql"));

    // Each value is its own argument, passed verbatim
    assert_eq!(args[1], "localhost && touch /tmp/pwned");
    assert_eq!(args[5], "$(whoami)");
    assert_eq!(args[7], "db`id`");
}
