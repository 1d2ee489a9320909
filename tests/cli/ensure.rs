use anyhow::Result;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_ensure_adds_and_propagates() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", "{}")?;
    test.write_file("locales/fr.json", "{}")?;

    let output = test.run(&["ensure", "common.save_changes", "common.title=Welcome home"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote 4 keys in 2 files"));

    let expected = json!({"common": {"save_changes": "Save changes", "title": "Welcome home"}});
    assert_eq!(test.read_json("locales/en.json")?, expected);
    assert_eq!(test.read_json("locales/fr.json")?, expected);
    Ok(())
}

#[test]
fn test_ensure_force_only_rewrites_base() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", r#"{"title":"Old"}"#)?;
    test.write_file("locales/fr.json", r#"{"title":"Ancien"}"#)?;

    let kept = test.run(&["ensure", "title=New"])?;
    assert!(kept.status.success());
    assert_eq!(test.read_json("locales/en.json")?, json!({"title": "Old"}));

    let forced = test.run(&["ensure", "title=New", "--force"])?;
    assert!(forced.status.success());
    assert_eq!(test.read_json("locales/en.json")?, json!({"title": "New"}));
    assert_eq!(test.read_json("locales/fr.json")?, json!({"title": "Ancien"}));
    Ok(())
}

#[test]
fn test_ensure_rejects_invalid_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", "{}")?;

    let output = test.run(&["ensure", "common..save"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid key"));
    Ok(())
}
