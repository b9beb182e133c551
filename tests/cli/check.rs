use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_clean_locales() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/main.dtd", "<!ENTITY title \"Title\">\n"),
        ("en-US/main.properties", "count=%1$S of %2$S\n"),
        ("fr/main.dtd", "<!ENTITY title \"Titre\">\n"),
        ("fr/main.properties", "count=%1$S sur %2$S\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 2 locales; 2 keys in baseline 'en-US'

    ✓ Checked 2 locales (4 files) against 'en-US' - no problems found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_substitution_mismatch() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/app.properties", "greeting=%S\n"),
        ("fr/app.properties", "greeting=%1$S\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    error: String substitutions for key 'app.properties/greeting' in 'fr' do not match baseline 'en-US'; substitution count and type must match (fr: 0 positional (%S), numbered [%1$S]; en-US: 1 positional (%S), numbered [])  substitution-mismatch
      --> ./fr/app.properties:1

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_blank_entity_is_a_warning() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/main.dtd", "<!ENTITY foo.label \"Foo\">\n"),
        ("fr/main.dtd", "<!ENTITY foo.label \"\">\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    warning: Key 'main.dtd/foo.label' in ./fr/main.dtd has a blank value. Is this desired?  blank-value
      --> ./fr/main.dtd:1:1
     |
    1 | <!ENTITY foo.label "">
     | ^

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_duplicate_property_key() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/a.properties", "a.key=1\n"),
        ("fr/a.properties", "a.key=1\na.key=2\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    error: Duplicate key 'a.properties/a.key' in ./fr/a.properties (lines 1 and 2)  duplicate-key
      --> ./fr/a.properties:2
     |
    2 | a.key=2

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_byte_order_mark() -> Result<()> {
    let test = CliTest::with_files(&[("en-US/a.properties", "a=1\n")])?;
    test.write_bytes("fr/a.properties", b"\xEF\xBB\xBFa=1\n")?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    error: File './fr/a.properties' contains BOM (byte order mark); localization files should not contain BOM  byte-order-mark
      --> ./fr/a.properties

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_missing_and_extra_files() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/a.properties", "a=1\n"),
        ("en-US/b.dtd", "<!ENTITY b \"B\">\n"),
        ("fr/a.properties", "a=1\n"),
        ("fr/c.dtd", "<!ENTITY b \"B\">\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 2 keys in baseline 'en-US'

    error: File 'b.dtd' exists in baseline 'en-US' but not in 'fr'  missing-file
      --> ./fr/b.dtd

    error: File 'c.dtd' exists in 'fr' but not in baseline 'en-US'  extra-file
      --> ./fr/c.dtd

    ✘ 2 problems (2 errors, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_only_selected_checks() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/a.properties", "a=%S\nb=1\n"),
        ("fr/a.properties", "a=%1$S\n"),
    ])?;

    assert_cmd_snapshot!(
        test.check_command()
            .args(["--locales-only", "--only", "substitutions"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 2 keys in baseline 'en-US'

    error: String substitutions for key 'a.properties/a' in 'fr' do not match baseline 'en-US'; substitution count and type must match (fr: 0 positional (%S), numbered [%1$S]; en-US: 1 positional (%S), numbered [])  substitution-mismatch
      --> ./fr/a.properties:1

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    "
    );

    Ok(())
}

#[test]
fn test_baseline_override() -> Result<()> {
    let test = CliTest::with_files(&[("de/a.properties", "a=1\n"), ("fr/a.properties", "a=1\n")])?;

    assert_cmd_snapshot!(
        test.check_command()
            .args(["--locales-only", "--baseline", "de"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'de'

    ✓ Checked 2 locales (2 files) against 'de' - no problems found

    ----- stderr -----
    "
    );

    Ok(())
}

#[test]
fn test_missing_baseline_is_fatal() -> Result<()> {
    let test = CliTest::with_files(&[("fr/a.properties", "a=1\n")])?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Baseline locale 'en-US' has no folder (found: fr)
    ");

    Ok(())
}

#[test]
fn test_missing_path_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(
        test.check_command()
            .args(["does-not-exist", "--locales-only"]),
        @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: Path 'does-not-exist' does not exist
    "
    );

    Ok(())
}

#[test]
fn test_quiet_prints_diagnostics_only() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/a.properties", "a=1\n"),
        ("fr/a.properties", "a=1\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command().args(["--locales-only", "-q"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_group_by_language() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/a.properties", "a=1\nb=2\n"),
        ("de/a.properties", "a=1\n"),
        ("fr/a.properties", "a=1\nb=2\nc=3\n"),
    ])?;

    assert_cmd_snapshot!(
        test.check_command()
            .args(["--locales-only", "--group-by-language"]),
        @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 3 locales; 2 keys in baseline 'en-US'

    de (1 error, 0 warnings)
    error: Key 'a.properties/b' in baseline 'en-US' but not in 'de'  missing-key
      --> ./de/a.properties

    fr (1 error, 0 warnings)
    error: Key 'a.properties/c' in 'fr' but not in baseline 'en-US'  extra-key
      --> ./fr/a.properties:3

    ✘ 2 problems (2 errors, 0 warnings)

    ----- stderr -----
    "
    );

    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/a.properties", "a=%S\n"),
        ("fr/a.properties", "a=%S %S\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command().args(["--locales-only", "--json"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    {
      "baseline": "en-US",
      "localeCount": 2,
      "baselineKeyCount": 1,
      "localeFilesChecked": 2,
      "errorCount": 1,
      "warningCount": 0,
      "diagnostics": {
        "fr": [
          {
            "severity": "error",
            "rule": "substitution-mismatch",
            "locale": "fr",
            "message": "String substitutions for key 'a.properties/a' in 'fr' do not match baseline 'en-US'; substitution count and type must match (fr: 2 positional (%S), numbered []; en-US: 1 positional (%S), numbered [])",
            "location": {
              "filePath": "./fr/a.properties",
              "line": 1,
              "col": 0
            }
          }
        ]
      }
    }

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::with_files(&[
        (
            ".checklocrc.json",
            r#"{ "localesOnly": true, "ignores": ["*.txt"] }"#,
        ),
        ("en-US/a.properties", "a=1\n"),
        ("en-US/notes.txt", "not a locale file"),
        ("fr/a.properties", "a=1\n"),
    ])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    ✓ Checked 2 locales (2 files) against 'en-US' - no problems found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_unrecognized_file_warns() -> Result<()> {
    let test = CliTest::with_files(&[
        ("en-US/a.properties", "a=1\n"),
        ("en-US/notes.txt", "not a locale file"),
    ])?;

    assert_cmd_snapshot!(test.check_command().arg("--locales-only"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 1 locale; 1 key in baseline 'en-US'

    warning: File ./en-US/notes.txt is not a .dtd or .properties file; ignoring  unrecognized-file
      --> ./en-US/notes.txt

    ✘ 1 problem (0 errors, 1 warning)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("--help"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    A fast CLI tool for checking localization consistency in Mozilla-style extensions

    Usage: checkloc [COMMAND]

    Commands:
      check  Check locale files, substitutions and locale registrations against the baseline
      init   Initialize a new .checklocrc.json configuration file
      help   Print this message or the help of the given subcommand(s)

    Options:
      -h, --help     Print help
      -V, --version  Print version

    ----- stderr -----
    ");

    Ok(())
}
