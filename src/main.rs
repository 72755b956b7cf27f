use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use file_uploader::app::FileUploaderApp;
use file_uploader::config::{UploadType, UploaderConfig};
use file_uploader::i18n::{Locale, Translator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "file-uploader", version, about = "Batch file uploader")]
struct Cli {
    /// Config file (JSON)
    #[arg(long, env = "FILE_UPLOADER_CONFIG", default_value = "uploader.json")]
    config: PathBuf,

    /// Owner the attachments belong to
    #[arg(long)]
    owner_id: Option<String>,

    /// SIGN_UP, NOTICE_AQ, DOC_AQ or BID
    #[arg(long)]
    upload_type: Option<String>,

    #[arg(long)]
    base_url: Option<String>,

    /// en or zh_cn
    #[arg(long)]
    locale: Option<String>,

    /// Write the effective config back to --config and exit
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut UploaderConfig) -> anyhow::Result<()> {
        if let Some(owner_id) = &self.owner_id {
            config.owner_id = owner_id.clone();
        }
        if let Some(upload_type) = &self.upload_type {
            config.upload_type = upload_type.parse::<UploadType>()?;
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(locale) = &self.locale {
            config.locale = locale.clone();
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("file_uploader=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = UploaderConfig::load(&cli.config);
    cli.apply(&mut config)?;

    if cli.write_config {
        config
            .save(&cli.config)
            .with_context(|| format!("Failed to write {:?}", cli.config))?;
        tracing::info!("Wrote config to {:?}", cli.config);
        return Ok(());
    }

    let locale = Locale::parse(&config.locale).unwrap_or_else(|| {
        tracing::warn!("Unknown locale '{}', using default", config.locale);
        Locale::default()
    });
    let uploader = FileUploaderApp::new(&config, Translator::new(locale))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 420.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "File Uploader",
        options,
        Box::new(move |_cc| Box::new(uploader)),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::parse_from([
            "file-uploader",
            "--owner-id",
            "tender-3",
            "--upload-type",
            "notice_aq",
            "--locale",
            "en",
        ]);
        let mut config = UploaderConfig::default();
        cli.apply(&mut config).unwrap();
        assert_eq!(config.owner_id, "tender-3");
        assert_eq!(config.upload_type, UploadType::NoticeAq);
        assert_eq!(config.locale, "en");
        assert_eq!(config.base_url, UploaderConfig::default().base_url);
    }

    #[test]
    fn bad_upload_type_is_an_error() {
        let cli = Cli::parse_from(["file-uploader", "--upload-type", "INVOICE"]);
        assert!(cli.apply(&mut UploaderConfig::default()).is_err());
    }
}
