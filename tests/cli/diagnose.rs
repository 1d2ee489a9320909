use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stdout};

#[test]
fn test_diagnose_missing_default_locale() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&[
        "diagnose",
        r#"Missing default locale translation for "auth.title" [fr] (exists in: es, de)"#,
    ])?;
    assert!(output.status.success());

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        parsed,
        json!({
            "type": "missing_default_locale",
            "key": "auth.title",
            "default_locale": "fr",
            "existing_locales": ["es", "de"]
        })
    );
    Ok(())
}

#[test]
fn test_diagnose_unrecognized() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&["diagnose", "Something else entirely"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    Ok(())
}
