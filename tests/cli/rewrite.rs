use anyhow::Result;

use crate::{CliTest, extract::APP, stderr, stdout};

#[test]
fn test_rewrite_dry_run_then_apply() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/App.tsx", APP)?;
    test.run(&["extract", "src", "--assign"])?;

    let dry = test.run(&["rewrite", "src"])?;
    assert!(dry.status.success(), "stderr: {}", stderr(&dry));
    let out = stdout(&dry);
    assert!(out.contains("src/App.tsx: 2 changes, 0 unresolved"));
    assert!(out.contains("Would rewrite 2 strings in 1 file (0 unresolved)."));
    assert_eq!(test.read_file("src/App.tsx")?, APP);

    let applied = test.run(&["rewrite", "src", "--apply"])?;
    assert!(applied.status.success(), "stderr: {}", stderr(&applied));
    assert!(stdout(&applied).contains("Rewrote 2 strings in 1 file (0 unresolved)"));

    let content = test.read_file("src/App.tsx")?;
    assert!(content.starts_with("import { t } from 'i18next';\n"));
    assert!(content.contains("<h1>{t('app.title.welcome_back')}</h1>"));
    assert!(content.contains("t('app.placeholder.search_files')"));

    let again = test.run(&["rewrite", "src", "--apply"])?;
    assert!(stdout(&again).contains("Rewrote 0 strings in 0 files"));
    assert_eq!(test.read_file("src/App.tsx")?, content);
    Ok(())
}

#[test]
fn test_rewrite_without_key_map_leaves_text() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/App.tsx", APP)?;

    let output = test.run(&["rewrite", "src", "--apply"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("src/App.tsx: 0 changes, 2 unresolved"));
    assert_eq!(test.read_file("src/App.tsx")?, APP);
    Ok(())
}

#[test]
fn test_rewrite_respects_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".lingorc.json",
        r#"{ "translationFunction": "translate", "importSource": "@/i18n", "namespace": "home" }"#,
    )?;
    test.write_file("src/Title.jsx", "export const Title = () => <h2>Latest news</h2>;\n")?;
    test.run(&["extract", "src", "--assign"])?;

    let output = test.run(&["rewrite", "src", "--apply"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("src/Title.jsx")?,
        "import { translate } from '@/i18n';\nexport const Title = () => <h2>{translate('home.title.latest_news')}</h2>;\n"
    );
    Ok(())
}
