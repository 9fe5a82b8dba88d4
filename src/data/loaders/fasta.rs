// fasta.rs - Locus map loading from allele FASTA files

use crate::data::locus_map::{HeaderExtractor, LocusMap};
use crate::error::{LinkageError, Result};
use bio::io::fasta;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Genome name used in reports: the file name of the FASTA path
pub fn genome_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Read (header, sequence) records from a FASTA stream and extract the locus map
pub fn read_locus_map<R: Read>(genome: &str, reader: R, extractor: &HeaderExtractor) -> Result<LocusMap> {
    let reader = fasta::Reader::new(reader);
    let mut records = Vec::new();

    for record in reader.records() {
        let record = record?;
        let header = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };
        let sequence = std::str::from_utf8(record.seq())
            .map_err(|_| {
                LinkageError::malformed(format!(
                    "{}: record '{}' has a non UTF-8 sequence",
                    genome,
                    record.id()
                ))
            })?
            .to_string();
        records.push((header, sequence));
    }

    extractor.extract(genome, records)
}

/// Load the locus map of one genome from its FASTA file
pub fn load_locus_map(path: &Path, extractor: &HeaderExtractor) -> Result<LocusMap> {
    let file = File::open(path)?;
    let map = read_locus_map(&genome_name(path), file, extractor)?;
    log::debug!("{}: {} loci", map.genome, map.len());
    Ok(map)
}

/// FASTA paths listed one per line; blank lines and `#` comments are skipped
pub fn read_path_list<R: BufRead>(reader: R) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}

/// Read a list file of FASTA paths
pub fn load_path_list(path: &Path) -> Result<Vec<PathBuf>> {
    let file = File::open(path)?;
    read_path_list(BufReader::new(file))
}
