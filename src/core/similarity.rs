// similarity.rs - Gene-presence and allele-identity Jaccard between two genomes

use crate::data::LocusMap;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::fmt;

/// Whether scores are reported as similarity or as 1 - similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JaccardMode {
    #[default]
    Similarity,
    Distance,
}

impl JaccardMode {
    pub fn from_distance_flag(distance: bool) -> Self {
        if distance {
            JaccardMode::Distance
        } else {
            JaccardMode::Similarity
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            JaccardMode::Similarity => "Jaccard similarity (intersection / union)",
            JaccardMode::Distance => "Jaccard distance (1 - similarity)",
        }
    }

    fn apply(&self, similarity: f64) -> f64 {
        match self {
            JaccardMode::Similarity => similarity,
            JaccardMode::Distance => 1.0 - similarity,
        }
    }
}

/// `part / whole`, or 0 when `whole` is empty
pub fn jaccard_index(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Set comparison of two locus maps
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityReport {
    pub genome1: String,
    pub genome2: String,
    /// Loci present in either genome
    pub union: usize,
    /// Loci present in both genomes
    pub intersection: usize,
    /// Loci present in exactly one genome
    pub gene_difference: usize,
    pub gene_jaccard: f64,
    /// Shared loci carrying the same allele digest
    pub allele_matches: usize,
    pub allele_jaccard: f64,
    pub mode: JaccardMode,
}

impl SimilarityReport {
    pub const TSV_HEADER: &'static str = "Genome1\tGenome2\tUnion\tIntersection\tGene Difference\tGene Jaccard\tAllele Matches\tAllele Jaccard";
}

impl fmt::Display for SimilarityReport {
    /// Tab-separated report row with 4-decimal scores
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{:.4}\t{}\t{:.4}",
            self.genome1,
            self.genome2,
            self.union,
            self.intersection,
            self.gene_difference,
            self.gene_jaccard,
            self.allele_matches,
            self.allele_jaccard
        )
    }
}

/// Compare the locus repertoires of two genomes.
///
/// Allele identity is only assessed on loci shared by both genomes; with no
/// shared loci the allele score is 0.
pub fn compare_loci(a: &LocusMap, b: &LocusMap, mode: JaccardMode) -> SimilarityReport {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut intersection = 0usize;
    let mut allele_matches = 0usize;
    for locus in small.loci() {
        if let Some(other) = large.digest(locus) {
            intersection += 1;
            if small.digest(locus) == Some(other) {
                allele_matches += 1;
            }
        }
    }

    let union = a.len() + b.len() - intersection;

    SimilarityReport {
        genome1: a.genome.clone(),
        genome2: b.genome.clone(),
        union,
        intersection,
        gene_difference: union - intersection,
        gene_jaccard: mode.apply(jaccard_index(intersection, union)),
        allele_matches,
        allele_jaccard: mode.apply(jaccard_index(allele_matches, intersection)),
        mode,
    }
}

/// All unordered index pairs (i < j) of `n` genomes, in row-major order
pub fn pair_indices(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect()
}

/// Compare every unordered pair of genomes in parallel.
///
/// Reports follow [`pair_indices`] order regardless of scheduling. The
/// progress bar, if any, advances once per finished pair.
pub fn compare_all(
    maps: &[LocusMap],
    mode: JaccardMode,
    progress: Option<&ProgressBar>,
) -> Vec<SimilarityReport> {
    pair_indices(maps.len())
        .par_iter()
        .map(|&(i, j)| {
            let report = compare_loci(&maps[i], &maps[j], mode);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            report
        })
        .collect()
}
