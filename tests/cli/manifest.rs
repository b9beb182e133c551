use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const RDF_HEAD: &str = r#"<?xml version="1.0"?>
<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
     xmlns:em="http://www.mozilla.org/2004/em-rdf#">
  <Description about="urn:mozilla:install-manifest">
"#;

fn install_rdf(locales: &[&str]) -> String {
    let body: String = locales
        .iter()
        .map(|code| format!("    <em:locale>{}</em:locale>\n", code))
        .collect();
    format!("{}{}  </Description>\n</RDF>\n", RDF_HEAD, body)
}

fn extension(manifest: &str, rdf_locales: &[&str]) -> Result<CliTest> {
    let test = CliTest::with_files(&[
        ("chrome.manifest", manifest),
        ("chrome/locale/en-US/main.dtd", "<!ENTITY title \"Title\">\n"),
        ("chrome/locale/fr/main.dtd", "<!ENTITY title \"Titre\">\n"),
    ])?;
    test.write_file("install.rdf", &install_rdf(rdf_locales))?;
    Ok(test)
}

const BOTH: &str = "content ext chrome/content/\n\
                    locale ext en-US chrome/locale/en-US/\n\
                    locale ext fr chrome/locale/fr/\n";

#[test]
fn test_registered_extension() -> Result<()> {
    let test = extension(BOTH, &["en-US", "fr"])?;

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
fn test_manifest_file_as_root() -> Result<()> {
    let test = extension(BOTH, &["en-US", "fr"])?;

    assert_cmd_snapshot!(test.check_command().arg("chrome.manifest"), @r"
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
fn test_unregistered_folder_warns() -> Result<()> {
    let test = extension("locale ext en-US chrome/locale/en-US/\n", &["en-US"])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    warning: Locale folder 'fr' exists in ./chrome/locale, but no corresponding registration exists in chrome.manifest  unregistered-folder
      --> ./chrome.manifest

    warning: Locale folder 'fr' exists in ./chrome/locale, but no corresponding registration exists in install.rdf  unregistered-folder
      --> ./install.rdf

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_registered_folder_missing() -> Result<()> {
    let test = extension(
        &format!("{}locale ext de chrome/locale/de/\n", BOTH),
        &["en-US", "fr"],
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    error: Locale 'de' is registered in chrome.manifest line 4, but ./chrome/locale/de/ does not exist  missing-folder
      --> ./chrome.manifest:4

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_registered_path_differs_from_folder() -> Result<()> {
    let test = extension(
        "locale ext en-US chrome/locale/en-US/\n\
         locale ext fr chrome/locale/fr-FR/\n",
        &["en-US", "fr"],
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    error: Locale 'fr' is registered in chrome.manifest line 2, but ./chrome/locale/fr-FR/ does not exist  missing-folder
      --> ./chrome.manifest:2

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_invalid_registration_line() -> Result<()> {
    let test = extension(&format!("{}locale ext\n", BOTH), &["en-US", "fr"])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    error: Invalid locale registration syntax in ./chrome.manifest on line 4: 'locale ext'  invalid-registration
      --> ./chrome.manifest:4
     |
    4 | locale ext

    ✘ 1 problem (1 error, 0 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_descriptor_locale_not_in_manifest() -> Result<()> {
    let test = extension(
        "locale ext en-US chrome/locale/en-US/\n",
        &["en-US", "fr"],
    )?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    warning: Locale folder 'fr' exists in ./chrome/locale, but no corresponding registration exists in chrome.manifest  unregistered-folder
      --> ./chrome.manifest

    warning: Locale 'fr' is listed in install.rdf but not registered in chrome.manifest  missing-manifest-registration
      --> ./install.rdf:6

    ✘ 2 problems (0 errors, 2 warnings)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_invalid_descriptor() -> Result<()> {
    let test = extension(BOTH, &["en-US", "fr"])?;
    test.write_file("install.rdf", "<RDF><Description></RDF>")?;

    // Position and wording come from the XML reader
    insta::with_settings!({filters => vec![
        (r"at line 1, col \d+: .*  invalid-descriptor", "at line 1, col [COL]: [REASON]  invalid-descriptor"),
        (r"install\.rdf:1:\d+", "install.rdf:1:[COL]"),
        (r"(?m)^ \| +\^$", " | [CARET]"),
    ]}, {
        assert_cmd_snapshot!(test.check_command(), @r"
        success: false
        exit_code: 1
        ----- stdout -----
        Found 2 locales; 1 key in baseline 'en-US'

        error: Could not parse ./install.rdf: invalid XML at line 1, col [COL]: [REASON]  invalid-descriptor
          --> ./install.rdf:1:[COL]
         |
        1 | <RDF><Description></RDF>
         | [CARET]

        ✘ 1 problem (1 error, 0 warnings)

        ----- stderr -----
        ");
    });

    Ok(())
}

#[test]
fn test_missing_manifest_is_fatal() -> Result<()> {
    let test = CliTest::with_files(&[("en-US/a.properties", "a=1\n")])?;

    assert_cmd_snapshot!(test.check_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    error: File chrome.manifest does not exist in '.'; use --locales-only to skip registration checks
    ");

    Ok(())
}

#[test]
fn test_locales_only_skips_registrations() -> Result<()> {
    let test = extension("locale ext en-US chrome/locale/en-US/\n", &["en-US"])?;

    assert_cmd_snapshot!(
        test.check_command()
            .args(["chrome/locale", "--locales-only"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Found 2 locales; 1 key in baseline 'en-US'

    ✓ Checked 2 locales (2 files) against 'en-US' - no problems found

    ----- stderr -----
    "
    );

    Ok(())
}
