use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_sync_grouped_layout() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en/common.json", r#"{"common":{"save":"Save"}}"#)?;
    test.write_file("locales/fr/common.json", "{}")?;

    let output = test.run(&["sync", "common.save"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("wrote fr/common.json"));
    assert!(out.contains("Added 1 key in 1 file"));
    assert_eq!(
        test.read_file("locales/fr/common.json")?,
        "{\n  \"common\": {\n    \"save\": \"Save\"\n  }\n}\n"
    );

    let again = test.run(&["sync", "common.save"])?;
    assert!(stdout(&again).contains("Locales already up to date"));
    Ok(())
}

#[test]
fn test_sync_keeps_existing_translations() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", r#"{"title":"Home","nav":{"back":"Back"}}"#)?;
    test.write_file("locales/fr.json", r#"{"title":"Accueil"}"#)?;

    let output = test.run(&["sync", "title", "nav"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_json("locales/fr.json")?,
        json!({"nav": {"back": "Back"}, "title": "Accueil"})
    );

    let forced = test.run(&["sync", "title", "--force"])?;
    assert!(forced.status.success());
    assert_eq!(test.read_json("locales/fr.json")?["title"], "Home");
    Ok(())
}

#[test]
fn test_sync_explicit_locales_and_root() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("i18n/en.json", r#"{"hello":"Hello"}"#)?;
    test.write_file("i18n/fr.json", "{}")?;
    test.write_file("i18n/de.json", "{}")?;

    let output = test.run(&[
        "sync",
        "hello",
        "--translations-root",
        "i18n",
        "--locale",
        "de",
    ])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_json("i18n/de.json")?, json!({"hello": "Hello"}));
    assert_eq!(test.read_file("i18n/fr.json")?, "{}");
    Ok(())
}

#[test]
fn test_sync_file_from_base_locale() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "locales/en/auth.json",
        r#"{"auth":{"login":"Log in","logout":"Log out"}}"#,
    )?;
    test.write_file("locales/fr/auth.json", r#"{"auth":{"login":"Connexion"}}"#)?;

    let skipped = test.run(&["sync-file", "locales/fr/auth.json"])?;
    assert!(skipped.status.success());
    assert!(stdout(&skipped).contains("Locales already up to date"));

    let output = test.run(&["sync-file", "locales/en/auth.json"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_json("locales/fr/auth.json")?,
        json!({"auth": {"login": "Connexion", "logout": "Log out"}})
    );
    Ok(())
}

#[test]
fn test_sync_reads_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".lingorc.json",
        r#"{ "translationsRoot": "./lang", "baseLocale": "de" }"#,
    )?;
    test.write_file("lang/de.json", r#"{"greeting":"Hallo"}"#)?;
    test.write_file("lang/en.json", "{}")?;

    let output = test.run(&["sync", "greeting"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_json("lang/en.json")?, json!({"greeting": "Hallo"}));
    Ok(())
}
