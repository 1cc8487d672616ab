use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn hr_rag(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hr-rag").expect("binary");
    cmd.current_dir(root)
        .env("EMBEDDING_BACKEND", "hash")
        .env("CHAT_BACKEND", "echo")
        .env("EMBEDDING_DIMENSION", "64")
        .env("RAW_DATA_DIR", root.join("raw"))
        .env("INDEX_DIR", root.join("index"));
    cmd
}

fn setup_index(root: &Path) {
    fs::create_dir_all(root.join("raw")).unwrap();
    fs::write(
        root.join("raw").join("pto.md"),
        "Employees get 20 PTO days per year.\n",
    )
    .unwrap();
    fs::write(
        root.join("raw").join("remote_work.md"),
        "Core hours are 10:00 to 15:00 local time.\n",
    )
    .unwrap();

    hr_rag(root).arg("ingest").assert().success();
}

#[test]
fn eval_passes_builtin_suite_offline() {
    let temp = tempdir().unwrap();
    setup_index(temp.path());

    hr_rag(temp.path())
        .arg("eval")
        .assert()
        .success()
        .stdout(predicate::str::contains("-> contains 'PTO': true"))
        .stdout(predicate::str::contains("Passed 2/2"));
}

#[test]
fn eval_reads_suite_from_file() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_index(root);

    fs::write(
        root.join("suite.json"),
        r#"[{"question": "How many PTO days do I get?", "must_contain": "20 PTO days"}]"#,
    )
    .unwrap();

    hr_rag(root)
        .arg("eval")
        .arg("--suite")
        .arg(root.join("suite.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Passed 1/1"));
}

#[test]
fn eval_rejects_malformed_suite() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_index(root);

    fs::write(root.join("suite.json"), "{not json").unwrap();

    hr_rag(root)
        .arg("eval")
        .arg("--suite")
        .arg(root.join("suite.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid eval suite"));
}
