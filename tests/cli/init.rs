use anyhow::Result;
use serde_json::json;

use crate::{CliTest, combined_output};

const CONFIG_FILE: &str = "next-intl-scanner.config.json";

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created next-intl-scanner.config.json"));

    let content = test.read_file(CONFIG_FILE)?;
    assert!(content.ends_with("}\n"));
    assert!(content.contains("\n  \"locales\""), "2-space indentation");

    let config = test.read_json(CONFIG_FILE)?;
    assert_eq!(config["locales"], json!(["en"]));
    assert_eq!(config["sourceDirectory"], json!("./"));
    assert_eq!(config["outputDirectory"], json!("./messages"));
    assert_eq!(config["defaultLocale"], json!("en"));
    assert_eq!(config["pages"][0]["match"], json!("**/*.{js,jsx,ts,tsx}"));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(CONFIG_FILE, "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(test.read_file(CONFIG_FILE)?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "src/app.tsx",
        r#"
export function App() {
    const t = useTranslations("App");
    return <div>{t("hello", {}, "Hello")}</div>;
}
"#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "App": { "hello": "Hello" } })
    );

    Ok(())
}
