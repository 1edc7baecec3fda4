use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use digit_net::train::DEFAULT_PROGRESS_INTERVAL;
use digit_net::{NetworkSpec, Result};

use crate::args::Cli;

/// Config file format. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub network: Option<NetworkConfig>,
    pub epochs: Option<usize>,
    pub train_records: Option<usize>,
    pub test_records: Option<usize>,
    pub start_offset: Option<usize>,
    pub progress_interval_ms: Option<u64>,
}

/// Partial network shape; unset fields fall back to [`NetworkSpec::default`].
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub input_size: Option<usize>,
    pub hidden_size: Option<usize>,
    pub output_size: Option<usize>,
    pub learning_rate: Option<f64>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub spec: NetworkSpec,
    pub epochs: usize,
    pub train_records: usize,
    pub test_records: usize,
    pub start_offset: usize,
    pub progress_interval: Duration,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<AppConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Command-line values as a config layer.
    pub fn from_cli(cli: &Cli) -> AppConfig {
        AppConfig {
            network: Some(NetworkConfig {
                hidden_size: cli.hidden_size,
                learning_rate: cli.learning_rate,
                ..NetworkConfig::default()
            }),
            epochs: cli.epochs,
            train_records: cli.train_records,
            test_records: cli.test_records,
            start_offset: cli.start_offset,
            progress_interval_ms: cli.progress_interval_ms,
        }
    }

    // merge configs where the second overwrites the first
    pub fn merge(self, other: Self) -> Self {
        let network = match (self.network, other.network) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (base, over) => over.or(base),
        };
        Self {
            network,
            epochs: other.epochs.or(self.epochs),
            train_records: other.train_records.or(self.train_records),
            test_records: other.test_records.or(self.test_records),
            start_offset: other.start_offset.or(self.start_offset),
            progress_interval_ms: other.progress_interval_ms.or(self.progress_interval_ms),
        }
    }

    pub fn resolve(self) -> Result<Settings> {
        let spec = self.network.unwrap_or_default().resolve();
        spec.validate()?;

        Ok(Settings {
            spec,
            epochs: self.epochs.unwrap_or(1),
            train_records: self.train_records.unwrap_or(0),
            test_records: self.test_records.unwrap_or(0),
            start_offset: self.start_offset.unwrap_or(1),
            progress_interval: self
                .progress_interval_ms
                .map_or(DEFAULT_PROGRESS_INTERVAL, Duration::from_millis),
        })
    }
}

impl NetworkConfig {
    pub fn merge(self, other: Self) -> Self {
        Self {
            input_size: other.input_size.or(self.input_size),
            hidden_size: other.hidden_size.or(self.hidden_size),
            output_size: other.output_size.or(self.output_size),
            learning_rate: other.learning_rate.or(self.learning_rate),
        }
    }

    pub fn resolve(self) -> NetworkSpec {
        let base = NetworkSpec::default();
        NetworkSpec {
            input_size: self.input_size.unwrap_or(base.input_size),
            hidden_size: self.hidden_size.unwrap_or(base.hidden_size),
            output_size: self.output_size.unwrap_or(base.output_size),
            learning_rate: self.learning_rate.unwrap_or(base.learning_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings = AppConfig::default().resolve().unwrap();
        assert_eq!(settings.spec, NetworkSpec::default());
        assert_eq!(settings.epochs, 1);
        assert_eq!(settings.train_records, 0);
        assert_eq!(settings.start_offset, 1);
        assert_eq!(settings.progress_interval, Duration::from_millis(30));
    }

    #[test]
    fn later_layer_wins() {
        let file: AppConfig = serde_json::from_str(r#"{ "epochs": 3, "train_records": 500 }"#).unwrap();
        let cli = AppConfig { epochs: Some(5), ..AppConfig::default() };
        let settings = file.merge(cli).resolve().unwrap();
        assert_eq!(settings.epochs, 5);
        assert_eq!(settings.train_records, 500);
    }

    #[test]
    fn cli_learning_rate_keeps_file_shape() {
        let file: AppConfig =
            serde_json::from_str(r#"{ "network": { "input_size": 4, "hidden_size": 3, "output_size": 2 } }"#).unwrap();
        let cli = AppConfig {
            network: Some(NetworkConfig { learning_rate: Some(0.5), ..NetworkConfig::default() }),
            ..AppConfig::default()
        };
        let spec = file.merge(cli).resolve().unwrap().spec;
        assert_eq!(spec, NetworkSpec::new(4, 3, 2, 0.5));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<AppConfig>(r#"{ "epoch": 3 }"#).is_err());
    }

    #[test]
    fn invalid_network_fails_resolution() {
        let file: AppConfig = serde_json::from_str(r#"{ "network": { "hidden_size": 0 } }"#).unwrap();
        assert!(file.resolve().is_err());
    }
}
