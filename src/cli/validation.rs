// validation.rs - Input validation utilities

use crate::cli::args::Args;
use crate::data::regions::{HhsRegionTable, HHS_REGION_COUNT};
use crate::error::{LinkageError, Result};
use crate::output::OutputFormat;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct ValidationResult {
    pub comparisons: PathBuf,
    pub meta: PathBuf,
    pub meta2: Option<PathBuf>,
    /// None in dry-run mode
    pub output: Option<String>,
    pub format: OutputFormat,
    pub regions: HhsRegionTable,
}

fn existing_file(value: Option<&String>, flag: &str) -> Result<PathBuf> {
    let path = value.ok_or_else(|| LinkageError::validation(format!("--{} is required", flag)))?;
    let path = Path::new(path);
    if !path.is_file() {
        return Err(LinkageError::validation(format!(
            "--{}: file not found: {}",
            flag,
            path.display()
        )));
    }
    Ok(path.to_path_buf())
}

/// Validate all command line arguments
pub fn validate_args(args: &Args, region_overrides: Option<&HashMap<String, u8>>) -> Result<ValidationResult> {
    let comparisons = existing_file(args.comparisons.as_ref(), "comparisons")?;
    let meta = existing_file(args.meta.as_ref(), "meta")?;
    let meta2 = match &args.meta2 {
        Some(_) => Some(existing_file(args.meta2.as_ref(), "meta2")?),
        None => None,
    };

    let output = if args.dry_run {
        None
    } else {
        Some(
            args.output
                .clone()
                .ok_or_else(|| LinkageError::validation("--output is required"))?,
        )
    };

    let format: OutputFormat = args.format.parse()?;

    if args.threads == Some(0) {
        return Err(LinkageError::validation("Thread count must be at least 1"));
    }

    let mut regions = HhsRegionTable::new();
    if let Some(overrides) = region_overrides {
        if let Some((state, region)) = overrides
            .iter()
            .find(|(_, region)| !(1..=HHS_REGION_COUNT).contains(*region))
        {
            return Err(LinkageError::validation(format!(
                "Region override {} = {} is outside 1-{}",
                state, region, HHS_REGION_COUNT
            )));
        }
        regions = regions.with_overrides(overrides);
        println!("🗺️  Applied {} region override(s)", overrides.len());
    }

    Ok(ValidationResult {
        comparisons,
        meta,
        meta2,
        output,
        format,
        regions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(comparisons: &str, meta: &str) -> Args {
        Args {
            comparisons: Some(comparisons.to_string()),
            meta: Some(meta.to_string()),
            meta2: None,
            output: Some("out.csv".to_string()),
            format: "csv".to_string(),
            threads: None,
            dry_run: false,
            config: None,
            generate_config: false,
        }
    }

    #[test]
    fn test_missing_required() {
        let mut args = args_for("x", "y");
        args.comparisons = None;
        let err = validate_args(&args, None).err().unwrap();
        assert!(err.to_string().contains("--comparisons is required"));
    }

    #[test]
    fn test_nonexistent_file() {
        let args = args_for("/nonexistent/comparisons.csv", "/nonexistent/meta.csv");
        let err = validate_args(&args, None).err().unwrap();
        assert!(matches!(err, LinkageError::Validation(_)));
    }

    #[test]
    fn test_format_and_regions() {
        // Cargo.toml is always present at the crate root during tests
        let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        let mut args = args_for(manifest, manifest);
        args.format = "tsv".to_string();
        let result = validate_args(&args, None).unwrap();
        assert_eq!(result.format, OutputFormat::Tsv);

        args.format = "xlsx".to_string();
        assert!(validate_args(&args, None).is_err());

        args.format = "csv".to_string();
        let bad: HashMap<String, u8> = [("PR".to_string(), 11)].into_iter().collect();
        assert!(validate_args(&args, Some(&bad)).is_err());

        args.threads = Some(0);
        assert!(validate_args(&args, None).is_err());
    }
}
