// alleles.rs - Allele database reformatting and assembly listing

use crate::error::{LinkageError, Result};
use crate::hashers::strip_gaps;
use bio::io::fasta;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Rewrite an allele id: keep the part before the first '>' and drop the first '_'
pub fn reformat_allele_id(id: &str) -> String {
    let name = id.split('>').next().unwrap_or(id);
    name.replacen('_', "", 1)
}

/// Copy an allele FASTA database with gaps stripped and ids rewritten.
///
/// Records sharing an id collapse to the last sequence seen, written at the
/// position of the first occurrence. Returns the number of records written.
pub fn reformat_alleles<R: Read, W: Write>(reader: R, mut writer: W) -> Result<usize> {
    let mut order: Vec<String> = Vec::new();
    let mut sequences: HashMap<String, String> = HashMap::new();

    for record in fasta::Reader::new(reader).records() {
        let record = record?;
        let sequence = std::str::from_utf8(record.seq()).map_err(|_| {
            LinkageError::malformed(format!("allele '{}' has a non UTF-8 sequence", record.id()))
        })?;
        let id = record.id().to_string();
        if !sequences.contains_key(&id) {
            order.push(id.clone());
        }
        sequences.insert(id, strip_gaps(sequence));
    }

    for id in &order {
        writeln!(writer, ">{}\n{}", reformat_allele_id(id), sequences[id])?;
    }
    writer.flush()?;
    Ok(order.len())
}

/// Assembly files (`*.fasta`) in a directory, as absolute paths in name order
pub fn list_assemblies(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("fasta") {
            paths.push(std::fs::canonicalize(&path)?);
        }
    }
    paths.sort();
    Ok(paths)
}
