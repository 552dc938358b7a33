//! Subcommand handlers for the `opshub` binary.

use anyhow::Context;
use clap::{Args, ValueEnum};
use colored::*;
use comfy_table::Table;
use opshub_client::{Notice, SettingsEditor};
use opshub_settings::{DefaultLanguage, ImageKind, SystemSetting};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// System name shown in the console header (max 20 characters)
    #[arg(long)]
    pub system_name: Option<String>,
    /// Browser tab title (max 32 characters, empty string clears it)
    #[arg(long)]
    pub system_title: Option<String>,
    /// Default password assigned to new users (6-15 alphanumerics)
    #[arg(long)]
    pub default_password: Option<String>,
    /// Default language for new users (locale code, e.g. zh_CN)
    #[arg(long)]
    pub default_language: Option<DefaultLanguage>,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Which image to replace
    #[arg(value_enum)]
    pub kind: UploadKind,
    /// Path to the image file (must be under 1 MiB)
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UploadKind {
    Favicon,
    Logo,
}

impl From<UploadKind> for ImageKind {
    fn from(kind: UploadKind) -> Self {
        match kind {
            UploadKind::Favicon => ImageKind::Favicon,
            UploadKind::Logo => ImageKind::Logo,
        }
    }
}

/// Load and print the current settings record.
pub async fn handle_show(editor: &mut SettingsEditor) -> anyhow::Result<()> {
    editor.load().await?;
    match editor.loaded() {
        Some(record) => print_record(record),
        None => println!("{}", "No settings record exists yet.".yellow()),
    }
    Ok(())
}

/// Load, apply the given field changes to the draft and submit.
pub async fn handle_edit(editor: &mut SettingsEditor, args: EditArgs) -> anyhow::Result<()> {
    editor.load().await?;

    if let Some(name) = args.system_name {
        editor.set_system_name(name);
    }
    if let Some(title) = args.system_title {
        // An explicit empty string clears the title.
        editor.set_system_title(if title.is_empty() { None } else { Some(title) });
    }
    if let Some(password) = args.default_password {
        editor.set_default_password(password);
    }
    if let Some(language) = args.default_language {
        editor.set_default_language(language);
    }

    let notice = editor.submit().await?;
    print_notice(&notice);
    Ok(())
}

/// Upload an image, then submit so the new reference is persisted.
pub async fn handle_upload(editor: &mut SettingsEditor, args: UploadArgs) -> anyhow::Result<()> {
    editor.load().await?;
    // Persisting the reference needs a record to attach it to; without one
    // the submit would fail validation after the upload already happened.
    if editor.loaded().is_none() {
        anyhow::bail!(
            "No settings record exists yet; create one first with \
             `opshub edit --system-name <name> --default-password <password> \
             --default-language zh_CN`"
        );
    }

    let bytes = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Could not read {}", args.path.display()))?;
    let filename = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    let notice = editor
        .upload_image(args.kind.into(), &filename, bytes)
        .await?;
    print_notice(&notice);

    let notice = editor.submit().await?;
    print_notice(&notice);
    Ok(())
}

/// Restore server-side defaults and show the reloaded record.
pub async fn handle_reset(editor: &mut SettingsEditor) -> anyhow::Result<()> {
    let notice = editor.reset().await?;
    print_notice(&notice);
    if let Some(record) = editor.loaded() {
        print_record(record);
    }
    Ok(())
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::NothingToSave => println!("⚠️  {}", notice.to_string().yellow()),
        _ => println!("✅ {}", notice.to_string().green()),
    }
}

fn print_record(record: &SystemSetting) {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["System name", &record.system_name]);
    table.add_row(vec![
        "System title",
        record.system_title.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec![
        "Default password".to_string(),
        mask(&record.default_password),
    ]);
    table.add_row(vec![
        "Default language",
        record
            .default_language
            .map(|l| l.as_str())
            .unwrap_or("-"),
    ]);
    table.add_row(vec!["Favicon", record.favicon.as_deref().unwrap_or("-")]);
    table.add_row(vec![
        "Logo",
        record.system_logo.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec![
        "Version".to_string(),
        record
            .object_version_number
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string()),
    ]);
    println!("{table}");
}

fn mask(password: &str) -> String {
    "•".repeat(password.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opshub_client::SettingsClient;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn mask_hides_every_character() {
        assert_eq!(mask("abc123"), "••••••");
        assert_eq!(mask(""), "");
    }

    #[tokio::test]
    async fn upload_on_fresh_system_directs_operator_to_edit_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/system/setting"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&server)
            .await;
        // With no record to attach the reference to, nothing may be uploaded.
        Mock::given(method("POST"))
            .and(path("/system/setting/upload/logo"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("logo.png");
        std::fs::write(&file, b"not a real png").unwrap();

        let client = SettingsClient::new(server.uri(), "token").unwrap();
        let mut editor = SettingsEditor::new(client);
        let err = handle_upload(
            &mut editor,
            UploadArgs {
                kind: UploadKind::Logo,
                path: file,
            },
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("opshub edit"));
    }
}
