//! Command-line interface of the `treaty-links` binary

use crate::config::AppConfig;
use crate::core::error::TreatyResult;
use crate::core::link::LinkIntegrity;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "treaty-links",
    version,
    about = "Link reinsurance treaties to exposure files and compare their exposure"
)]
pub struct Cli {
    #[arg(long, short, help = "YAML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Listen address (host:port), overrides the config file")]
    pub bind: Option<String>,

    #[arg(long, default_value_t = false, help = "Reject dangling and duplicate links")]
    pub strict: bool,

    #[arg(long, default_value_t = false, help = "Start with an empty store")]
    pub no_seed: bool,
}

impl Cli {
    /// Configuration after applying command-line overrides
    ///
    /// Without `--config` the built-in defaults are used.
    pub fn resolve_config(&self) -> TreatyResult<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_yaml_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.set_bind_address(bind)?;
        }
        if self.strict {
            config.store.link_integrity = LinkIntegrity::Strict;
        }
        if self.no_seed {
            config.store.seed_sample_data = false;
        }

        Ok(config)
    }
}
