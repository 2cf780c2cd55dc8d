use super::*;

#[test]
fn test_parse_plain_filename() {
    let name = MigrationName::parse("003_storage_buckets.sql").unwrap();
    assert_eq!(name, "003_storage_buckets.sql");
    assert_eq!(name.to_string(), "003_storage_buckets.sql");
}

#[test]
fn test_parse_nested_relative_path() {
    let name = MigrationName::parse("2025/0104_oauth_tokens.sql").unwrap();
    assert_eq!(
        name.resolve(Path::new("/srv/migrations")),
        PathBuf::from("/srv/migrations/2025/0104_oauth_tokens.sql")
    );
}

#[test]
fn test_parse_rejects_empty() {
    let err = MigrationName::parse("   ").unwrap_err();
    assert!(matches!(err, CoreError::InvalidMigrationName { .. }));
}

#[test]
fn test_parse_rejects_parent_dir() {
    let err = MigrationName::parse("../secrets.sql").unwrap_err();
    assert!(err.to_string().contains("'..' is not allowed"));
}

#[test]
fn test_parse_rejects_absolute_path() {
    let err = MigrationName::parse("/etc/passwd").unwrap_err();
    assert!(err.to_string().contains("relative path"));
}

#[test]
fn test_no_extension_check() {
    // Content and extension are not validated before submission
    assert!(MigrationName::parse("seed_data.txt").is_ok());
}

#[test]
fn test_deserialize_validates() {
    let ok: MigrationName = serde_yaml::from_str("a.sql").unwrap();
    assert_eq!(ok.as_str(), "a.sql");

    let bad: Result<MigrationName, _> = serde_yaml::from_str("../a.sql");
    assert!(bad.is_err());
}

#[test]
fn test_parse_rejects_current_dir_only() {
    for name in [".", "./", "././"] {
        let err = MigrationName::parse(name).unwrap_err();
        assert!(
            err.to_string().contains("does not name a file"),
            "{name}: {err}"
        );
        assert!(err.to_string().contains("[E004]"));
    }
}

#[test]
fn test_parse_normalizes_current_dir() {
    let dotted = MigrationName::parse("./a.sql").unwrap();
    assert_eq!(dotted, "a.sql");
    assert_eq!(dotted, MigrationName::parse("a.sql").unwrap());

    let nested = MigrationName::parse("2025/./b.sql").unwrap();
    assert_eq!(nested.as_str(), "2025/b.sql");
}
