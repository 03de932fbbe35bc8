//! Runs the `genie` binary against a store prepared on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use genie_model::{EntityKind, NewEntity, TableResult};
use genie_remote::{LocalStore, RemoteClient};

/// Bootstrap a project with one center and return (project id, input id).
fn prepare_store(root: &Path, center: &str) -> (String, String) {
    let store = LocalStore::open(root).expect("open store");
    let mapping = store
        .create_table(
            NewEntity::new("mapping", EntityKind::Table),
            TableResult::new(vec!["Database".to_string(), "Id".to_string()], Vec::new()),
        )
        .expect("mapping");
    let project = store
        .store(NewEntity::new("GENIE", EntityKind::Project).with_annotation("dbMapping", &mapping.id))
        .expect("project");
    let input = store
        .store(NewEntity::folder("input", &project.id))
        .expect("input");
    let centers = store
        .create_table(
            NewEntity::new("centers", EntityKind::Table).with_parent(&project.id),
            TableResult::from_columns(&[("center", &[center]), ("inputSynId", &[input.id.as_str()])]),
        )
        .expect("centers");
    store
        .append_rows(&mapping.id, vec![vec!["centerMapping".to_string(), centers.id]])
        .expect("register");
    (project.id, input.id)
}

fn genie(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_genie"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(["--color", "never"])
        .args(args)
        .output()
        .expect("run genie")
}

#[test]
fn validates_and_uploads_with_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store_dir = dir.path().join("store");
    let (project_id, input_id) = prepare_store(&store_dir, "AAA");
    fs::write(
        dir.path().join("genie.toml"),
        format!(
            "project_id = \"{project_id}\"\nstore = \"{}\"\nformat_registry_packages = [\"example_registry\"]\n",
            store_dir.display()
        ),
    )
    .expect("config");
    fs::write(dir.path().join("TEST-AAAx1.txt"), "VALID").expect("fixture");

    let output = genie(
        dir.path(),
        &["validate", "TEST-AAAx1.txt", "--center", "AAA", "--upload-to-center-input"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.starts_with("YOUR FILE IS VALIDATED!\n"));
    assert!(stdout.contains("example"));

    let store = LocalStore::open(&store_dir).expect("reopen");
    let uploaded = store.children(&input_id).expect("children");
    assert_eq!(uploaded.len(), 1);
    assert_eq!(uploaded[0].name, "TEST-AAAx1.txt");
    assert!(store.fetch(&uploaded[0].id).is_ok());
}

#[test]
fn invalid_submission_exits_non_zero_and_prints_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store_dir = dir.path().join("store");
    let (project_id, _) = prepare_store(&store_dir, "AAA");
    fs::write(dir.path().join("TEST-AAAx1.txt"), "ERROR").expect("fixture");

    let output = genie(
        dir.path(),
        &[
            "validate",
            "TEST-AAAx1.txt",
            "--center",
            "AAA",
            "--project-id",
            &project_id,
            "--store",
            "store",
            "--format-registry-packages",
            "example_registry",
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.starts_with(
        "----------------ERRORS----------------\nTEST-AAAx1.txt: file content is ERROR.\n"
    ));
}

#[test]
fn unknown_center_is_reported_as_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store_dir = dir.path().join("store");
    let (project_id, _) = prepare_store(&store_dir, "AAA");
    fs::write(dir.path().join("TEST-BBBx1.txt"), "VALID").expect("fixture");

    let output = genie(
        dir.path(),
        &[
            "validate",
            "TEST-BBBx1.txt",
            "--center",
            "BBB",
            "--project-id",
            &project_id,
            "--store",
            "store",
        ],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("error: "));
    assert!(stderr.contains("Must specify one of these centers: AAA"));
}

#[test]
fn formats_lists_registered_types() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = genie(
        dir.path(),
        &["formats", "--format-registry-packages", "genie", "example_registry"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for file_type in ["clinical", "cna", "example"] {
        assert!(stdout.contains(file_type), "{stdout}");
    }
}

#[test]
fn unknown_package_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = genie(dir.path(), &["formats", "--format-registry-packages", "nope"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("unknown format registry package 'nope'"));
}
