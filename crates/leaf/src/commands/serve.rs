//! `leaf serve` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use leaf_config::{CliSettings, Config};
use leaf_server::{run_server, server_config_from_leaf_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover leaf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding page files (overrides config).
    #[arg(long, env = "LEAF_PAGES_DIR")]
    pages_dir: Option<PathBuf>,

    /// Directory holding view.html and edit.html (overrides config).
    #[arg(long, env = "LEAF_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and save logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            pages_dir: self.pages_dir,
            templates_dir: self.templates_dir,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        ensure_pages_dir(&config.pages_resolved.dir)?;

        output.highlight(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Pages directory: {}",
            config.pages_resolved.dir.display()
        ));
        match &config.templates_dir {
            Some(dir) => output.info(&format!("Templates directory: {}", dir.display())),
            None => output.info("Templates: built-in"),
        }
        output.info(&format!(
            "Front page: /view/{}",
            config.pages_resolved.front_page
        ));

        run_server(server_config_from_leaf_config(&config)).await?;

        Ok(())
    }
}

/// Ensure the pages directory exists.
fn ensure_pages_dir(pages_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(pages_dir)?;
    Ok(())
}
