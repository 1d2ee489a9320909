use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created .lingorc.json"));

    let content = test.read_file(".lingorc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["baseLocale"], "en");
    assert_eq!(parsed["translationsRoot"], "./locales");
    assert_eq!(parsed["importSource"], "i18next");
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lingorc.json", "{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".lingorc.json already exists"));
    assert_eq!(test.read_file(".lingorc.json")?, "{}");
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".lingorc.json", r#"{ "ignorePatterns": ["(unclosed"] }"#)?;
    test.write_file("src/App.tsx", "<h1>Hello there</h1>")?;

    let output = test.run(&["extract", "src"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignorePatterns"));
    Ok(())
}
