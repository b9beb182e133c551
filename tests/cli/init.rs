use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["baselineLocale"], "en-US");
    assert_eq!(parsed["manifestFile"], "chrome.manifest");
    assert_eq!(parsed["descriptorFile"], "install.rdf");
    assert!(
        parsed.get("ignores").is_some(),
        "Config should have 'ignores' field"
    );

    // 2-space indentation
    assert!(content.contains("\n  \""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .checklocrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".checklocrc.json").exists());
    let content = test.read_file(".checklocrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".checklocrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: .checklocrc.json already exists
    ");

    assert_eq!(test.read_file(".checklocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_used_by_check() -> Result<()> {
    let test = CliTest::with_files(&[
        ("chrome.manifest", "locale ext en-US chrome/locale/en-US/\n"),
        ("chrome/locale/en-US/a.properties", "a=1\n"),
        (
            "install.rdf",
            "<RDF xmlns:em=\"http://www.mozilla.org/2004/em-rdf#\"><em:locale>en-US</em:locale></RDF>\n",
        ),
    ])?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .checklocrc.json

    ----- stderr -----
    ");

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 1 locale; 1 key in baseline 'en-US'

    ✓ Checked 1 locale (1 file) against 'en-US' - no problems found

    ----- stderr -----
    ");

    Ok(())
}
