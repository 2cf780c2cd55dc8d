use super::*;
use crate::commands::test_support::{global_args, project};

#[test]
fn test_collect_info_marks_missing() {
    let dir = project(
        "name: ls\nmigrations: [a.sql, b.sql]\n",
        &[("a.sql", "SELECT 1;")],
    );
    let global = global_args(dir.path());
    let config = load_config(&global).unwrap();
    let plan = load_plan(&global, &config, None).unwrap();

    let infos = collect_info(&plan);
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].order, 1);
    assert!(infos[0].present);
    assert_eq!(infos[0].bytes, Some(9));
    assert_eq!(infos[1].name, "b.sql");
    assert!(!infos[1].present);
    assert_eq!(infos[1].bytes, None);
}

#[test]
fn test_json_omits_size_for_missing() {
    let dir = project("name: ls\nmigrations: [gone.sql]\n", &[]);
    let global = global_args(dir.path());
    let config = load_config(&global).unwrap();
    let plan = load_plan(&global, &config, None).unwrap();

    let json = serde_json::to_value(collect_info(&plan)).unwrap();
    assert_eq!(json[0]["name"], "gone.sql");
    assert_eq!(json[0]["present"], false);
    assert!(json[0].get("bytes").is_none());
}

#[tokio::test]
async fn test_ls_table_and_json() {
    let dir = project("name: ls\n", &[("001.sql", "SELECT 1;")]);
    let global = global_args(dir.path());

    for output in [LsOutput::Table, LsOutput::Json] {
        let args = LsArgs {
            output,
            migrations: None,
        };
        execute(&args, &global).await.unwrap();
    }
}

#[tokio::test]
async fn test_ls_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let args = LsArgs {
        output: LsOutput::Table,
        migrations: None,
    };

    let err = execute(&args, &global_args(dir.path())).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Config file not found"));
}
