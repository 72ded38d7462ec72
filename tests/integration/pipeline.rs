//! Full builds through the library API.

use anyhow::Result;
use sharegen_cli::build::{BuildReport, Builder};
use sharegen_cli::config::ProjectConfig;
use sharegen_cli::core::SharegenError;
use sharegen_cli::plugin;
use sharegen_cli::test_utils::{ConfigFixture, TestEnvironment};

fn run(env: &TestEnvironment, release: bool) -> Result<BuildReport> {
    let config = ProjectConfig::load(&env.config_path())?;
    let mut builder = Builder::new(config.session(env.project_path(), None));
    for plugin in plugin::from_project(&config, env.project_path())? {
        builder.add_plugin(plugin);
    }
    if release { builder.release() } else { builder.build() }
}

#[test]
fn test_basic_project_build() -> Result<()> {
    let env = TestEnvironment::with_basic_project()?;

    let report = run(&env, false)?;

    assert_eq!(report.written, vec![env.project_path().join(".build/out/gen.txt")]);
    assert_eq!(env.read_file(".build/out/gen.txt")?, "Value: hello");
    Ok(())
}

#[test]
fn test_own_share_dir_and_legacy_alias() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.create_file("share/docs/data.txt", "{{ dist.name }} {{ dist.version }} {{ plugin.dist }}\n")?;
    env.write_config(
        r#"
[dist]
name = "My-Dist"
version = "2.0.0"

[[generate]]
filename = "docs/data.txt"
"#,
    )?;

    run(&env, false)?;

    assert_eq!(env.read_file(".build/docs/data.txt")?, "My-Dist 2.0.0 My-Dist\n");
    Ok(())
}

#[test]
fn test_root_file_written_on_release_only() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_share_file("Foo-Bar", "README.tmpl", b"# {{ dist.name }}\n")?;
    env.write_config(
        r#"
[dist]
name = "My-Dist"

[share]
paths = ["../shares"]

[[generate]]
dist = "Foo-Bar"
source_filename = "README.tmpl"
destination_filename = "README.md"
location = "root"
"#,
    )?;

    let report = run(&env, false)?;
    assert!(report.written.is_empty());
    assert!(!env.file_exists("README.md"));

    run(&env, true)?;
    assert_eq!(env.read_file("README.md")?, "# My-Dist\n");
    assert!(!env.file_exists(".build/README.md"));
    Ok(())
}

#[test]
fn test_host_managed_encoding_written_with_file_encoding() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_share_file("Foo-Bar", "t.txt", b"caf\xe9 {{ word }}")?;
    env.write_config(
        r#"
[dist]
name = "My-Dist"
host_manages_encoding = true

[share]
paths = ["../shares"]

[[generate]]
dist = "Foo-Bar"
source_filename = "t.txt"
destination_filename = "t.txt"
encoding = "latin1"
word = "déjà"
"#,
    )?;

    run(&env, false)?;

    let bytes = std::fs::read(env.project_path().join(".build/t.txt"))?;
    assert_eq!(bytes, b"caf\xe9 d\xe9j\xe0".to_vec());
    Ok(())
}

#[test]
fn test_missing_destination_fails_before_build() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_share_file("Foo-Bar", "tmpl.txt", b"x")?;
    ConfigFixture::missing_destination().write_to(env.project_path())?;

    let err = run(&env, false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SharegenError>(),
        Some(SharegenError::MissingField { field, .. }) if field == "destination_filename"
    ));
    assert!(!env.file_exists(".build"));
    Ok(())
}

#[test]
fn test_misspelled_source_suggests_close_match() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.add_share_file("Foo-Bar", "tmpl.txt", b"x")?;
    env.write_config(
        r#"
[dist]
name = "My-Dist"

[share]
paths = ["../shares"]

[[generate]]
dist = "Foo-Bar"
source_filename = "tmp.txt"
destination_filename = "out.txt"
"#,
    )?;

    let err = run(&env, false).unwrap_err();
    match err.downcast_ref::<SharegenError>() {
        Some(SharegenError::ResourceNotFound {
            suggestions,
            ..
        }) => assert_eq!(suggestions, &vec!["tmpl.txt".to_string()]),
        other => panic!("expected ResourceNotFound, got {other:?}"),
    }
    assert!(!env.file_exists(".build"));
    Ok(())
}

#[test]
fn test_unknown_distribution() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_config(
        r#"
[dist]
name = "My-Dist"

[share]
paths = ["../shares"]

[[generate]]
dist = "No-Such-Dist"
destination_filename = "out.txt"
"#,
    )?;

    let err = run(&env, false).unwrap_err();
    match err.downcast_ref::<SharegenError>() {
        Some(SharegenError::DistributionNotFound {
            dist,
            searched,
        }) => {
            assert_eq!(dist, "No-Such-Dist");
            assert!(searched.iter().any(|dir| dir.contains("shares")));
        }
        other => panic!("expected DistributionNotFound, got {other:?}"),
    }
    Ok(())
}
