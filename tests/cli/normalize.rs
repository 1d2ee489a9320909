use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const SPLIT: &str = "export const Total = ({ count }) => <p>{t('cart.total')}{count})</p>;\n";

#[test]
fn test_normalize_dry_run_then_apply() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Cart.tsx", SPLIT)?;

    let dry = test.run(&["normalize", "src"])?;
    assert!(dry.status.success(), "stderr: {}", stderr(&dry));
    assert!(stdout(&dry).contains("Would repair 1 split parenthetical in 1 file."));
    assert_eq!(test.read_file("src/Cart.tsx")?, SPLIT);

    let applied = test.run(&["normalize", "src", "--apply"])?;
    assert!(applied.status.success());
    assert_eq!(
        test.read_file("src/Cart.tsx")?,
        "export const Total = ({ count }) => <p>{t('cart.total')} ({count})</p>;\n"
    );
    Ok(())
}

#[test]
fn test_normalize_key_filter() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Cart.tsx", SPLIT)?;

    let output = test.run(&["normalize", "src", "--apply", "--key", "other.key"])?;
    assert!(output.status.success());
    assert_eq!(test.read_file("src/Cart.tsx")?, SPLIT);
    Ok(())
}

#[test]
fn test_normalize_parse_failure_does_not_stop_batch() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/Broken.tsx", "const a = <p>{")?;
    test.write_file("src/Cart.tsx", SPLIT)?;

    let output = test.run(&["normalize", "src", "--apply"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("src/Broken.tsx"));
    assert!(test.read_file("src/Cart.tsx")?.contains("{t('cart.total')} ({count})"));
    Ok(())
}
