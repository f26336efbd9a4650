mod app;
mod config;
mod content;
mod layout;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::UniverseConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Published content file (`{"words": [...]}`).
    #[arg(long, default_value = "content/data.json")]
    content: PathBuf,

    /// Scale at which the nearest word takes focus.
    #[arg(long)]
    scale_threshold: Option<f32>,

    /// Word id the home button navigates to.
    #[arg(long)]
    home_word: Option<i64>,

    /// Layout shuffle seed. Drawn at random and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// tracing filter directive, overrides RUST_LOG.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<UniverseConfig> {
        let mut config = UniverseConfig {
            content_path: self.content,
            layout_seed: self.seed.unwrap_or_else(rand::random),
            ..UniverseConfig::default()
        };
        if let Some(threshold) = self.scale_threshold {
            config.viewport = config.viewport.with_scale_threshold(threshold);
        }
        if let Some(home) = self.home_word {
            config.home_word_id = home;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("word_universe=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_filter.as_deref())?;

    let config = args.into_config()?;
    info!(
        content = %config.content_path.display(),
        seed = config.layout_seed,
        scale_threshold = config.viewport.scale_threshold,
        "starting word universe"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "word-universe",
        options,
        Box::new(move |cc| Ok(Box::new(app::WordUniverseApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("failed to run the word universe window: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "word-universe",
            "--content",
            "words.json",
            "--scale-threshold",
            "8",
            "--home-word",
            "3",
            "--seed",
            "42",
        ]);
        let config = args.into_config().expect("valid config");
        assert_eq!(config.content_path, PathBuf::from("words.json"));
        assert_eq!(config.viewport.scale_threshold, 8.0);
        assert_eq!(config.home_word_id, 3);
        assert_eq!(config.layout_seed, 42);
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let args = Args::parse_from(["word-universe", "--scale-threshold", "0.5"]);
        assert!(args.into_config().is_err());
    }
}
