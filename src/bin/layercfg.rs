// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prints the merged configuration for a directory.
//!
//! ```bash
//! APP_ENV=production layercfg --config-path config --format json
//! RUST_LOG=layercfg=debug layercfg --user-config myapp
//! ```

use clap::{Parser, ValueEnum};
use layercfg::adapters::YamlFileLoader;
use layercfg::service::ConfigLoader;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Merge config files, secrets and environment variables and print the result
#[derive(Parser)]
#[command(name = "layercfg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory layer paths are resolved against (defaults to the current directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Sub-path of the base directory holding the layer files
    #[arg(long, default_value = "")]
    config_path: String,

    /// Environment name, overriding APP_ENV / NODE_ENV
    #[arg(short, long)]
    environment: Option<String>,

    /// Read layer files from the OS config directory of this application instead
    #[arg(long, value_name = "APP", conflicts_with_all = ["base_dir", "config_path"])]
    user_config: Option<String>,

    /// Qualifier used with --user-config
    #[arg(long, default_value = "com.example", requires = "user_config")]
    qualifier: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let mut builder = ConfigLoader::builder().config_path(cli.config_path);
    if let Some(dir) = cli.base_dir {
        builder = builder.base_dir(dir);
    }
    if let Some(environment) = cli.environment {
        builder = builder.environment(environment);
    }
    if let Some(app) = cli.user_config {
        let loader = YamlFileLoader::from_default_location(&app, &cli.qualifier)?;
        builder = builder.with_layer_loader(Box::new(loader));
    }

    let config = builder.build().load();

    let rendered = match cli.format {
        Format::Yaml => serde_yaml::to_string(&config)?,
        Format::Json => serde_json::to_string_pretty(&config)? + "\n",
    };
    print!("{}", rendered);
    Ok(())
}
