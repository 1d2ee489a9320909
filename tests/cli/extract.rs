use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

pub const APP: &str = r#"export function App() {
  return (
    <main>
      <h1>Welcome back</h1>
      <input placeholder="Search files" />
    </main>
  );
}
"#;

#[test]
fn test_extract_json() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/App.tsx", APP)?;
    test.write_file("src/styles.css", "h1 { color: red; }")?;

    let output = test.run(&["extract", "src", "--json"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    let files = parsed.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["file"], "src/App.tsx");
    assert_eq!(files[0]["framework"], "jsx");

    let items = files[0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["text"], "Welcome back");
    assert_eq!(items[0]["kind"], "title");
    assert_eq!(items[0]["type"], "text");
    assert_eq!(items[0]["line"], 4);
    assert_eq!(items[0]["column"], 11);
    assert_eq!(items[1]["text"], "Search files");
    assert_eq!(items[1]["kind"], "placeholder");
    assert_eq!(items[1]["type"], "attribute-value");
    assert!(items[0].get("key").is_none());
    Ok(())
}

#[test]
fn test_extract_human_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/App.tsx", APP)?;

    let output = test.run(&["extract", "src"])?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("src/App.tsx:4:11  title  \"Welcome back\""));
    assert!(out.contains("Extracted 2 strings from 1 file (0 skipped)"));
    Ok(())
}

#[test]
fn test_extract_assign_writes_key_map() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/App.tsx", APP)?;

    let output = test.run(&["extract", "src", "--assign", "--json"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(parsed[0]["items"][0]["key"], "app.title.welcome_back");

    let key_map = test.read_json(".lingo/keymap.json")?;
    assert_eq!(key_map["version"], 1);
    let keys: Vec<&str> = key_map["entries"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["key"].as_str())
        .collect();
    assert_eq!(keys, vec!["app.placeholder.search_files", "app.title.welcome_back"]);

    // Existing signatures are reused.
    let again = test.run(&["extract", "src", "--assign"])?;
    assert!(stdout(&again).contains("Assigned 0 new keys"));
    Ok(())
}

#[test]
fn test_extract_namespace_and_framework_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("views/home.php", "<h1>Hello there</h1>\n")?;

    let output = test.run(&[
        "extract",
        "views",
        "--framework",
        "blade",
        "--namespace",
        "notes",
        "--assign",
        "--json",
    ])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let parsed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(parsed[0]["framework"], "blade");
    assert_eq!(parsed[0]["items"][0]["text"], "Hello there");
    assert_eq!(parsed[0]["items"][0]["key"], "notes.title.hello_there");

    let bad = test.run(&["extract", "views", "--framework", "svelte"])?;
    assert_eq!(bad.status.code(), Some(2));
    assert!(stderr(&bad).contains("Unknown framework"));
    Ok(())
}
