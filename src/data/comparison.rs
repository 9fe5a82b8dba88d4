// comparison.rs - Genome pair comparison records

use crate::error::{LinkageError, Result};
use serde::Deserialize;

/// A comparison-table row exactly as read, before numeric validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawComparison {
    #[serde(rename = "Genome1")]
    pub genome1: String,
    #[serde(rename = "Genome2")]
    pub genome2: String,
    #[serde(rename = "ANI")]
    pub ani: String,
    #[serde(rename = "Gene Jaccard")]
    pub gene_jaccard: String,
    #[serde(rename = "Allele Jaccard")]
    pub allele_jaccard: String,
    #[serde(rename = "Gene Difference")]
    pub gene_difference: String,
}

/// One genome pair with its externally computed ANI and similarity scores.
///
/// (genome1, genome2) is ordered: genome1 is joined to the `_1` metadata
/// columns and genome2 to the `_2` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    pub genome1: String,
    pub genome2: String,
    /// Average nucleotide identity, percent
    pub ani: f64,
    pub gene_jaccard: f64,
    pub allele_jaccard: f64,
    pub gene_difference: usize,
}

impl ComparisonRecord {
    /// Validate a raw row; `line` is used for error context only
    pub fn from_raw(raw: &RawComparison, line: usize) -> Result<Self> {
        let genome1 = raw.genome1.trim().to_string();
        let genome2 = raw.genome2.trim().to_string();
        if genome1.is_empty() || genome2.is_empty() {
            return Err(LinkageError::malformed(format!(
                "comparison line {}: empty genome identifier",
                line
            )));
        }

        Ok(Self {
            genome1,
            genome2,
            ani: parse_score(&raw.ani, "ANI", line)?,
            gene_jaccard: parse_score(&raw.gene_jaccard, "Gene Jaccard", line)?,
            allele_jaccard: parse_score(&raw.allele_jaccard, "Allele Jaccard", line)?,
            gene_difference: parse_count(&raw.gene_difference, "Gene Difference", line)?,
        })
    }
}

fn parse_score(value: &str, column: &str, line: usize) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        LinkageError::malformed(format!(
            "comparison line {}: {} '{}' is not a number",
            line, column, value
        ))
    })
}

fn parse_count(value: &str, column: &str, line: usize) -> Result<usize> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<usize>() {
        return Ok(count);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 => Ok(v as usize),
        _ => Err(LinkageError::malformed(format!(
            "comparison line {}: {} '{}' is not a count",
            line, column, value
        ))),
    }
}
