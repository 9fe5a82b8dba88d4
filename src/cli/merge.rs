// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::error::Result;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: &Config) -> Self {
        // Input/Output
        if self.comparisons.is_none() {
            self.comparisons = config.comparisons.clone();
        }
        if self.meta.is_none() {
            self.meta = config.meta.clone();
        }
        if self.meta2.is_none() {
            self.meta2 = config.meta2.clone();
        }
        if self.output.is_none() {
            self.output = config.output.clone();
        }

        // Only override the default format, not an explicit CLI value
        if self.format == "csv" {
            if let Some(format) = &config.format {
                self.format = format.clone();
            }
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args, keeping the config for its region table
    pub fn with_config_file(self, config_path: &str) -> Result<(Self, Config)> {
        let config = Config::from_file(config_path)?;
        let merged = self.merge_with_config(&config);
        Ok((merged, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> Args {
        Args {
            comparisons: None,
            meta: None,
            meta2: None,
            output: Some("cli.csv".to_string()),
            format: "csv".to_string(),
            threads: None,
            dry_run: false,
            config: None,
            generate_config: false,
        }
    }

    #[test]
    fn test_cli_takes_precedence() {
        let config = Config {
            comparisons: Some("cfg_comp.csv".to_string()),
            output: Some("cfg.csv".to_string()),
            format: Some("tsv".to_string()),
            threads: Some(4),
            dry_run: Some(true),
            ..Default::default()
        };
        let args = empty_args().merge_with_config(&config);

        assert_eq!(args.comparisons.as_deref(), Some("cfg_comp.csv"));
        assert_eq!(args.output.as_deref(), Some("cli.csv"));
        assert_eq!(args.format, "tsv");
        assert_eq!(args.threads, Some(4));
        assert!(args.dry_run);
    }
}
