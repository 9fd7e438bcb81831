//! airframe CLI - view and export aircraft point models
//!
//! Loads the point dataset, builds the marker and hull solid, and shows a
//! summary, writes `aircraft.{stl,step,dxf}`, or serves a web viewer.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use airframe::{AirframeConfig, DirectorySaver, ExportFormat, PointSource};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

mod server;
mod terminal;

use terminal::TerminalViewer;

#[derive(Parser)]
#[command(name = "airframe")]
#[command(about = "Visualize aircraft points and export the model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Common {
    /// Point dataset: a file path or an http(s) URL (overrides the config)
    #[arg(short, long)]
    source: Option<String>,
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Common {
    fn resolve(self) -> Result<(PointSource, AirframeConfig)> {
        let config = match &self.config {
            Some(path) => AirframeConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AirframeConfig::default(),
        };
        let source = self
            .source
            .map(|s| PointSource::parse(&s))
            .unwrap_or_else(|| config.source.clone());
        Ok((source, config))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model and print a summary
    View {
        #[command(flatten)]
        common: Common,
    },
    /// Build the model and write aircraft.<format>
    Export {
        /// Output format: stl, step or dxf
        format: ExportFormat,
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        #[command(flatten)]
        common: Common,
    },
    /// Serve the web viewer with export buttons
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3001")]
        addr: SocketAddr,
        #[command(flatten)]
        common: Common,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::View { common } => {
            let (source, config) = common.resolve()?;
            let mut viewer = TerminalViewer::new(std::io::stdout().lock());
            airframe::render(&source, &config, &mut viewer).await?;
        }
        Commands::Export {
            format,
            out_dir,
            common,
        } => {
            let (source, config) = common.resolve()?;
            let saver = DirectorySaver::new(out_dir);
            let path = airframe::export(&source, &config, format, &saver).await?;
            println!("Exported {format} to {}", path.display());
        }
        Commands::Serve { addr, common } => {
            let (source, config) = common.resolve()?;
            let state = server::AppState {
                source,
                config: Arc::new(config),
            };
            server::serve(addr, state).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_export_command() {
        let cli = Cli::try_parse_from(["airframe", "export", "step", "--out-dir", "out"]).unwrap();
        match cli.command {
            Commands::Export { format, out_dir, common } => {
                assert_eq!(format, ExportFormat::Step);
                assert_eq!(out_dir, PathBuf::from("out"));
                assert!(common.source.is_none());
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["airframe", "export", "obj"]).is_err());
    }

    #[test]
    fn source_flag_overrides_config() {
        let common = Common {
            source: Some("https://example.com/points.json".into()),
            config: None,
        };
        let (source, config) = common.resolve().unwrap();
        assert_eq!(source, PointSource::Http("https://example.com/points.json".into()));
        assert_eq!(config, AirframeConfig::default());
    }
}
