// csv.rs - Comparison and metadata table loaders

use crate::data::comparison::{ComparisonRecord, RawComparison};
use crate::data::metadata::RawMetadata;
use crate::error::{LinkageError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COMPARISON_COLUMNS: [&str; 6] = [
    "Genome1",
    "Genome2",
    "ANI",
    "Gene Jaccard",
    "Allele Jaccard",
    "Gene Difference",
];

const METADATA_COLUMNS: [&str; 3] = ["sample", "year", "month"];

/// Which metadata table is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataRole {
    Primary,
    /// Supplementary table; must carry a `fasta` column, which is discarded
    Secondary,
}

fn table_reader<R: Read>(reader: R, delimiter: u8) -> ::csv::Reader<R> {
    ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(::csv::Trim::Headers)
        .flexible(false)
        .from_reader(reader)
}

fn check_columns(headers: &::csv::StringRecord, required: &[&str], table: &str) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(LinkageError::malformed(format!(
            "{} table is missing column(s): {}",
            table,
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Read a comparison table from any reader
pub fn read_comparisons<R: Read>(reader: R, delimiter: u8) -> Result<Vec<ComparisonRecord>> {
    let mut rdr = table_reader(reader, delimiter);
    check_columns(rdr.headers()?, &COMPARISON_COLUMNS, "comparison")?;

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<RawComparison>().enumerate() {
        let line = i + 2;
        let raw = row.map_err(|e| {
            LinkageError::malformed(format!("comparison line {}: {}", line, e))
        })?;
        records.push(ComparisonRecord::from_raw(&raw, line)?);
    }
    Ok(records)
}

/// Read a metadata table from any reader
pub fn read_metadata<R: Read>(reader: R, delimiter: u8, role: MetadataRole) -> Result<Vec<RawMetadata>> {
    let mut rdr = table_reader(reader, delimiter);
    let headers = rdr.headers()?.clone();
    check_columns(&headers, &METADATA_COLUMNS, "metadata")?;

    if !headers.iter().any(|h| h == "state" || h == "country") {
        return Err(LinkageError::malformed(
            "metadata table needs a 'state' or 'country' column",
        ));
    }
    if role == MetadataRole::Secondary {
        check_columns(&headers, &["fasta"], "secondary metadata")?;
    }

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<RawMetadata>().enumerate() {
        let raw = row.map_err(|e| {
            LinkageError::malformed(format!("metadata line {}: {}", i + 2, e))
        })?;
        records.push(raw);
    }
    Ok(records)
}

/// Load a comparison table from a .csv or .tsv file
pub fn load_comparisons(path: &Path) -> Result<Vec<ComparisonRecord>> {
    let file = File::open(path)?;
    let records = read_comparisons(file, super::delimiter_for(path))?;
    log::info!("{}: {} comparison rows", path.display(), records.len());
    Ok(records)
}

/// Load a metadata table from a .csv or .tsv file
pub fn load_metadata(path: &Path, role: MetadataRole) -> Result<Vec<RawMetadata>> {
    let file = File::open(path)?;
    let records = read_metadata(file, super::delimiter_for(path), role)?;
    log::info!("{}: {} metadata rows", path.display(), records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPARISONS: &str = "\
Genome1,Genome2,ANI,Gene Jaccard,Allele Jaccard,Gene Difference,Extra
g1,g2,99.9,0.99,0.95,10,x
g1,g3,97.5,0.80,0.70,200,y
";

    const METADATA: &str = "\
sample,pathogen,species,subtype,state,country,year,month,host,source,casetype,fastq_1,fastq_2
g1,Salmonella,enterica,Enteritidis,GA,USA,2023,4,human,stool,clinical,a.fq,b.fq
g2,Salmonella,enterica,Enteritidis,,Mexico,,,human,,clinical,c.fq,d.fq
";

    #[test]
    fn test_read_comparisons() {
        let records = read_comparisons(COMPARISONS.as_bytes(), b',').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].genome2, "g3");
        assert_eq!(records[1].gene_difference, 200);
    }

    #[test]
    fn test_comparisons_missing_column() {
        let data = "Genome1,Genome2,ANI\ng1,g2,99.0\n";
        let err = read_comparisons(data.as_bytes(), b',').unwrap_err();
        assert!(err.to_string().contains("Gene Jaccard"));
    }

    #[test]
    fn test_read_metadata() {
        let records = read_metadata(METADATA.as_bytes(), b',', MetadataRole::Primary).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state.as_deref(), Some("GA"));
        assert_eq!(records[1].state, None);
        assert_eq!(records[1].country.as_deref(), Some("Mexico"));
        assert_eq!(records[1].year, None);
    }

    #[test]
    fn test_secondary_requires_fasta_column() {
        let err = read_metadata(METADATA.as_bytes(), b',', MetadataRole::Secondary).unwrap_err();
        assert!(matches!(err, LinkageError::MalformedInput(_)));

        let data = "sample,state,year,month,fasta\ng9,TX,2022,1,g9.fasta\n";
        let records = read_metadata(data.as_bytes(), b',', MetadataRole::Secondary).unwrap();
        assert_eq!(records[0].sample.as_deref(), Some("g9"));
    }

    #[test]
    fn test_tab_delimited() {
        let data = "sample\tstate\tyear\tmonth\ng1\tWA\t2020\t2\n";
        let records = read_metadata(data.as_bytes(), b'\t', MetadataRole::Primary).unwrap();
        assert_eq!(records[0].state.as_deref(), Some("WA"));
    }
}
