use std::fs;

use anyhow::Result;
use insta::assert_snapshot;
use serde_json::json;

use crate::{CliTest, combined_output};

const TWO_LOCALES: &str = r#"{
  "locales": ["en", "fr"],
  "defaultLocale": "en"
}"#;

const PAYMENT_PAGE: &str = r#"
export default function Payment() {
    const t = useTranslations("payment");
    return <h1>{t("title", {}, "Payment Title")}</h1>;
}
"#;

#[test]
fn test_extract_writes_every_locale() -> Result<()> {
    let test = CliTest::with_file("next-intl-scanner.config.json", TWO_LOCALES)?;
    test.write_file("src/payment.tsx", PAYMENT_PAGE)?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    let expected = json!({ "payment": { "title": "Payment Title" } });
    assert_eq!(test.read_json("messages/en.json")?, expected);
    assert_eq!(test.read_json("messages/fr.json")?, expected);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("en: 1 added, 0 updated, 0 unchanged"));
    assert!(stdout.contains("Extracted 1 message from 1 source file"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Created messages/en.json"), "{}", stderr);
    assert!(!stderr.contains("./"), "{}", stderr);

    Ok(())
}

#[test]
fn test_catalog_formatting() -> Result<()> {
    let test = CliTest::with_file(
        "app/page.tsx",
        r#"
export default async function Page() {
    const t = await getTranslations({ locale: "en", namespace: "Home" });
    const common = useTranslations();
    return (
        <main>
            <h1>{t("heading", {}, "Welcome")}</h1>
            <p>{common("tagline", {}, "Fast. Friendly.")}</p>
        </main>
    );
}
"#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_snapshot!(test.read_file("messages/en.json")?, @r#"
    {
      "Home": {
        "heading": "Welcome"
      },
      "tagline": "Fast. Friendly."
    }
    "#);

    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let test = CliTest::with_file("src/payment.tsx", PAYMENT_PAGE)?;

    test.extract_command().output()?;
    let first = test.read_file("messages/en.json")?;
    let output = test.extract_command().output()?;
    let second = test.read_file("messages/en.json")?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(first, second);
    assert!(String::from_utf8_lossy(&output.stdout).contains("en: 0 added, 0 updated, 1 unchanged"));

    Ok(())
}

#[test]
fn test_overwrite_precedence() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.tsx",
        r#"
const t = useTranslations("page");
t("title", {}, "New");
"#,
    )?;
    test.write_file("messages/en.json", r#"{ "page": { "title": "Old" } }"#)?;

    test.extract_command().output()?;
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "page": { "title": "Old" } })
    );

    let output = test.extract_command().arg("--overwrite").output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "page": { "title": "New" } })
    );

    Ok(())
}

#[test]
fn test_numeric_keys_are_excluded() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.tsx",
        r#"
const t = useTranslations();
t("42");
t("1.5");
t("label", {}, "Label");
"#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "label": "Label" })
    );

    Ok(())
}

#[test]
fn test_dotted_key_aborts_run() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.tsx",
        r#"
const t = useTranslations("page");
t("ok", {}, "fine");
t("a.b", {}, "x");
"#,
    )?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.lines().last().is_some_and(|line| line.starts_with("Error:")), "{}", stderr);
    assert!(stderr.contains("a.b"));
    assert_eq!(test.read_file("messages/en.json")?, "{}\n");

    Ok(())
}

#[test]
fn test_clean_removes_stale_entries() -> Result<()> {
    let test = CliTest::with_file(
        "src/page.tsx",
        r#"
const t = useTranslations("page");
t("kept", {}, "Kept");
"#,
    )?;
    test.write_file(
        "messages/en.json",
        r#"{ "page": { "kept": "Kept", "stale": "Stale" }, "legacy": { "gone": "Gone" } }"#,
    )?;

    let output = test.extract_command().output()?;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(test.read_json("messages/en.json")?["page"]["stale"], json!("Stale"));

    let output = test.extract_command().arg("--clean").output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "page": { "kept": "Kept" }, "legacy": {} })
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("2 removed"));

    Ok(())
}

#[test]
fn test_conflicts_are_reported() -> Result<()> {
    let test = CliTest::with_file(
        "src/a.tsx",
        r#"
const t = useTranslations("Page");
t("title", {}, "A");
"#,
    )?;
    test.write_file(
        "src/b.tsx",
        r#"
const t = useTranslations("Page");
t("title", {}, "B");
"#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "Page": { "title": "A" } })
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("warning: conflicting default values, keeping \"A\"  conflict"));
    assert!(stdout.contains("--> key Page.title"));
    assert!(stdout.contains("= note: also \"B\" in src/a.tsx, src/b.tsx"));

    Ok(())
}

#[test]
fn test_unparsable_file_is_skipped() -> Result<()> {
    let test = CliTest::with_file("src/broken.tsx", "const = <div")?;
    test.write_file("src/page.tsx", PAYMENT_PAGE)?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "payment": { "title": "Payment Title" } })
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("--> src/broken.tsx"));

    Ok(())
}

#[test]
fn test_invalid_catalog_skips_locale() -> Result<()> {
    let test = CliTest::with_file("next-intl-scanner.config.json", TWO_LOCALES)?;
    test.write_file("src/payment.tsx", PAYMENT_PAGE)?;
    test.write_file("messages/fr.json", "not json")?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(test.read_file("messages/fr.json")?, "not json");
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "payment": { "title": "Payment Title" } })
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("catalog-error"));
    assert!(stdout.contains("fr: skipped"));

    Ok(())
}

#[test]
fn test_custom_marker_elements() -> Result<()> {
    let test = CliTest::with_file(
        "next-intl-scanner.config.json",
        r#"{
  "customJSXPattern": [
    {
      "element": "T",
      "attributes": { "namespace": "ns", "string": "text", "messageKey": "id" }
    }
  ]
}"#,
    )?;
    test.write_file(
        "src/page.tsx",
        r#"
export const Page = () => <T ns="Home" id="intro" text={"Hi there"} />;
"#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "Home": { "intro": "Hi there" } })
    );

    Ok(())
}

#[test]
fn test_ignored_directories_are_not_scanned() -> Result<()> {
    let test = CliTest::with_file("src/page.tsx", PAYMENT_PAGE)?;
    test.write_file(
        "node_modules/lib/index.js",
        r#"const t = useTranslations("lib"); t("x", {}, "X");"#,
    )?;
    test.write_file(
        "src/page.test.tsx",
        r#"const t = useTranslations("test"); t("y", {}, "Y");"#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        test.read_json("messages/en.json")?,
        json!({ "payment": { "title": "Payment Title" } })
    );

    Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
    let test = CliTest::with_file(
        "config/scanner.json",
        r#"{ "sourceDirectory": "./web", "outputDirectory": "./locales" }"#,
    )?;
    test.write_file("web/payment.tsx", PAYMENT_PAGE)?;

    let output = test
        .extract_command()
        .args(["--config", "config/scanner.json", "--verbose"])
        .output()?;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(test.root().join("locales/en.json").exists());
    assert!(!test.root().join("messages").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Using config"));

    Ok(())
}

#[test]
fn test_malformed_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file(
        "next-intl-scanner.config.json",
        r#"{ "locales": ["en"], "defaultLocale": "de" }"#,
    )?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(!test.root().join("messages").exists());

    Ok(())
}

#[test]
fn test_auto_translate_requires_api_key() -> Result<()> {
    let test = CliTest::with_file("next-intl-scanner.config.json", TWO_LOCALES)?;
    test.write_file("src/payment.tsx", PAYMENT_PAGE)?;
    test.write_file("messages/fr.json", r#"{ "payment": { "title": "Titre" } }"#)?;

    let output = test.extract_command().arg("--auto-translate").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("requires an API key"));
    assert_eq!(
        fs::read_to_string(test.root().join("messages/fr.json"))?,
        r#"{ "payment": { "title": "Titre" } }"#
    );

    Ok(())
}

#[test]
fn test_missing_source_directory_is_fatal() -> Result<()> {
    let test = CliTest::with_file(
        "next-intl-scanner.config.json",
        r#"{ "sourceDirectory": "./does-not-exist" }"#,
    )?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("extract"));
    assert!(stdout.contains("init"));

    Ok(())
}
