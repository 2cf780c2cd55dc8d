use super::*;
use std::fs;
use tempfile::tempdir;

fn names(list: &[&str]) -> Vec<MigrationName> {
    list.iter().map(|n| MigrationName::parse(*n).unwrap()).collect()
}

#[test]
fn test_from_names_preserves_order() {
    let dir = Path::new("/tmp/migrations");
    let plan = MigrationPlan::from_names(
        dir,
        names(&["c.sql", "a.sql", "b.sql"]),
        PlanSource::Explicit,
    )
    .unwrap();

    let order: Vec<&str> = plan.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(order, vec!["c.sql", "a.sql", "b.sql"]);
    assert_eq!(plan.entries[0].path, dir.join("c.sql"));
}

#[test]
fn test_from_names_rejects_duplicates() {
    let result = MigrationPlan::from_names(
        Path::new("/tmp"),
        names(&["a.sql", "a.sql"]),
        PlanSource::Explicit,
    );
    assert!(matches!(result, Err(CoreError::DuplicateMigration { .. })));
}

#[test]
fn test_from_names_rejects_dotted_duplicate() {
    let result = MigrationPlan::from_names(
        Path::new("/tmp"),
        names(&["a.sql", "./a.sql"]),
        PlanSource::Explicit,
    );
    assert!(matches!(result, Err(CoreError::DuplicateMigration { ref name }) if name == "a.sql"));
}

#[test]
fn test_discover_sorts_and_filters() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("20250104_speakers_tables.sql"), "select 1").unwrap();
    fs::write(dir.path().join("003_storage_buckets.sql"), "select 1").unwrap();
    fs::write(dir.path().join("004_analytics_views.sql"), "select 1").unwrap();
    fs::write(dir.path().join("README.md"), "notes").unwrap();
    fs::create_dir(dir.path().join("archive.sql")).unwrap();

    let plan = MigrationPlan::discover(dir.path()).unwrap();
    assert_eq!(plan.source, PlanSource::Discovered);
    let order: Vec<&str> = plan.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "003_storage_buckets.sql",
            "004_analytics_views.sql",
            "20250104_speakers_tables.sql",
        ]
    );
    assert!(plan.entries.iter().all(PlannedMigration::is_present));
}

#[test]
fn test_discover_missing_dir() {
    let dir = tempdir().unwrap();
    let result = MigrationPlan::discover(&dir.path().join("nope"));
    assert!(matches!(
        result,
        Err(CoreError::MigrationsDirNotFound { .. })
    ));
}

#[test]
fn test_discover_empty_dir() {
    let dir = tempdir().unwrap();
    let plan = MigrationPlan::discover(dir.path()).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn test_for_project_prefers_explicit_then_manifest() {
    let root = tempdir().unwrap();
    let config = Config::from_yaml("name: t\nmigrations:\n  - m1.sql\n  - m2.sql\n").unwrap();

    let manifest_plan = MigrationPlan::for_project(&config, root.path(), None).unwrap();
    assert_eq!(manifest_plan.source, PlanSource::Manifest);
    assert_eq!(manifest_plan.len(), 2);
    assert_eq!(manifest_plan.dir, root.path().join("migrations"));

    let explicit_plan =
        MigrationPlan::for_project(&config, root.path(), Some(names(&["x.sql"]))).unwrap();
    assert_eq!(explicit_plan.source, PlanSource::Explicit);
    assert_eq!(explicit_plan.entries[0].name, "x.sql");
}

#[test]
fn test_manifest_plan_reports_missing_files() {
    let root = tempdir().unwrap();
    let migrations = root.path().join("migrations");
    fs::create_dir(&migrations).unwrap();
    fs::write(migrations.join("a.sql"), "select 1").unwrap();

    let config = Config::from_yaml("name: t\nmigrations: [a.sql, b.sql]\n").unwrap();
    let plan = MigrationPlan::for_project(&config, root.path(), None).unwrap();
    assert!(plan.entries[0].is_present());
    assert!(!plan.entries[1].is_present());
}

#[test]
fn test_parse_name_list() {
    let parsed = MigrationPlan::parse_name_list(" a.sql, b.sql ,,c.sql").unwrap();
    assert_eq!(parsed, names(&["a.sql", "b.sql", "c.sql"]));

    assert!(MigrationPlan::parse_name_list("a.sql,../b.sql").is_err());
    assert!(MigrationPlan::parse_name_list("").unwrap().is_empty());
}
