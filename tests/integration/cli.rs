//! The `sharegen` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use sharegen_cli::share::SHARE_PATH_ENV;
use sharegen_cli::test_utils::{ConfigFixture, TestEnvironment};

fn sharegen(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("sharegen").unwrap();
    cmd.current_dir(env.project_path()).env_remove(SHARE_PATH_ENV).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_build_command() {
    let env = TestEnvironment::with_basic_project().unwrap();

    sharegen(&env)
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("gen.txt"))
        .stdout(predicate::str::contains("Built 1 file(s)"));

    assert_eq!(env.read_file(".build/out/gen.txt").unwrap(), "Value: hello");
}

#[test]
fn test_build_dir_override() {
    let env = TestEnvironment::with_basic_project().unwrap();

    sharegen(&env).args(["build", "--build-dir", "dist-out"]).assert().success();

    assert_eq!(env.read_file("dist-out/out/gen.txt").unwrap(), "Value: hello");
    assert!(!env.file_exists(".build"));
}

#[test]
fn test_release_command() {
    let env = TestEnvironment::with_basic_project().unwrap();

    sharegen(&env)
        .arg("release")
        .assert()
        .success()
        .stdout(predicate::str::contains("Released 1 file(s)"));
}

#[test]
fn test_config_option_from_elsewhere() {
    let env = TestEnvironment::with_basic_project().unwrap();

    Command::cargo_bin("sharegen")
        .unwrap()
        .current_dir(env.temp_dir.path())
        .env_remove(SHARE_PATH_ENV)
        .args(["--config", "project/sharegen.toml", "build"])
        .assert()
        .success();

    assert_eq!(env.read_file(".build/out/gen.txt").unwrap(), "Value: hello");
}

#[test]
fn test_describe_json() {
    let env = TestEnvironment::with_basic_project().unwrap();

    sharegen(&env)
        .args(["describe", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"generate[0]\""))
        .stdout(predicate::str::contains("\"key1\": \"hello\""))
        .stdout(predicate::str::contains("\"dist\": \"Foo-Bar\""))
        .stdout(predicate::str::contains("\"encoding\": \"UTF-8\""));
}

#[test]
fn test_describe_text() {
    let env = TestEnvironment::with_basic_project().unwrap();

    sharegen(&env)
        .arg("describe")
        .assert()
        .success()
        .stdout(predicate::str::contains("destination_filename = out/gen.txt"))
        .stdout(predicate::str::contains("source_filename = tmpl.txt"));
}

#[test]
fn test_missing_config() {
    let env = TestEnvironment::new().unwrap();

    sharegen(&env)
        .arg("build")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("sharegen.toml"));
}

#[test]
fn test_missing_destination_reported() {
    let env = TestEnvironment::new().unwrap();
    ConfigFixture::missing_destination().write_to(env.project_path()).unwrap();

    sharegen(&env)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("destination_filename"));
}

#[test]
fn test_template_error_reported() {
    let env = TestEnvironment::new().unwrap();
    env.add_share_file("Foo-Bar", "tmpl.txt", b"Value: {{ kye1 }}").unwrap();
    ConfigFixture::basic().write_to(env.project_path()).unwrap();

    sharegen(&env)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template Variable Not Found"))
        .stderr(predicate::str::contains("key1"));

    assert!(!env.file_exists(".build/out/gen.txt"));
}

#[test]
fn test_decode_error_reported() {
    let env = TestEnvironment::new().unwrap();
    env.add_share_file("Foo-Bar", "tmpl.txt", b"\xff\xfe").unwrap();
    ConfigFixture::basic().write_to(env.project_path()).unwrap();

    sharegen(&env)
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot decode"))
        .stderr(predicate::str::contains("UTF-8"));
}
