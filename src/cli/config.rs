// config.rs - Configuration file support

use crate::error::{LinkageError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    // Input/Output
    pub comparisons: Option<String>,
    pub meta: Option<String>,
    pub meta2: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,

    /// Extra or replacement state → HHS region entries
    pub regions: Option<HashMap<String, u8>>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LinkageError::Config(e.to_string()))
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinkageError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config = Self::from_toml(&content).map_err(|e| {
            LinkageError::Config(format!("Failed to parse config file '{}': {}", path.display(), e))
        })?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# pairlink.toml - Configuration file for pairlink
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Pairwise comparison table (Genome1, Genome2, ANI, Gene Jaccard, Allele Jaccard, Gene Difference)
comparisons = "/path/to/comparisons.csv"

# Sample metadata table
meta = "/path/to/metadata.csv"

# Optional second metadata table (rows are appended; needs a fasta column)
# meta2 = "/path/to/metadata_extra.csv"

# Labeled output table
output = "labeled_comparisons.csv"

# Output format: csv, tsv
format = "csv"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Validate and load inputs without writing output
dry_run = false

# =============================================================================
# REGIONS
# =============================================================================

# Extra state codes mapped to an HHS region (1-10). Unmapped states are
# reported as "International".
[regions]
# PR = 2
# VI = 2
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml(&Config::generate_sample()).unwrap();
        assert_eq!(config.format.as_deref(), Some("csv"));
        assert_eq!(config.dry_run, Some(false));
        assert!(config.meta2.is_none());
        assert!(config.regions.unwrap().is_empty());
    }

    #[test]
    fn test_region_overrides() {
        let config = Config::from_toml("[regions]\nPR = 2\nGU = 9\n").unwrap();
        let regions = config.regions.unwrap();
        assert_eq!(regions["PR"], 2);
        assert_eq!(regions["GU"], 9);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("threads = \"many\"").unwrap_err();
        assert!(matches!(err, LinkageError::Config(_)));
    }
}
