// join.rs - Metadata join and per-pair classification

use crate::core::classify::{
    ani_category, case_comparison, geo_comparison, time_comparison, AniCategory, CaseComparison,
    GeoComparison, TimeComparison,
};
use crate::data::{ComparisonRecord, MetadataTable, SampleMetadata};
use rayon::prelude::*;
use std::collections::HashMap;

/// A comparison row matched with one metadata record for each genome
#[derive(Debug, Clone, Copy)]
pub struct JoinedPair<'a> {
    pub comparison: &'a ComparisonRecord,
    pub meta1: &'a SampleMetadata,
    pub meta2: &'a SampleMetadata,
}

/// A comparison row excluded from the output for lack of metadata
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedComparison {
    /// Position of the row in the comparison table (0-based)
    pub row: usize,
    pub genome1: String,
    pub genome2: String,
    /// Genome ids of the pair with no metadata record
    pub missing: Vec<String>,
}

/// Result of joining comparisons against metadata
#[derive(Debug, Default)]
pub struct JoinOutcome<'a> {
    pub pairs: Vec<JoinedPair<'a>>,
    pub dropped: Vec<DroppedComparison>,
}

/// Inner-join comparisons on sample id, once for Genome1 and once for Genome2.
///
/// Comparison order is kept. When a genome id has several metadata records,
/// every combination is emitted (Genome1 records outer, Genome2 records
/// inner). Rows with a genome lacking metadata are not emitted and are
/// reported in [`JoinOutcome::dropped`].
pub fn join_metadata<'a>(
    comparisons: &'a [ComparisonRecord],
    metadata: &'a MetadataTable,
) -> JoinOutcome<'a> {
    let index = metadata.index();
    let mut outcome = JoinOutcome::default();

    for (row, comparison) in comparisons.iter().enumerate() {
        let matches1 = index.get(comparison.genome1.as_str());
        let matches2 = index.get(comparison.genome2.as_str());

        match (matches1, matches2) {
            (Some(records1), Some(records2)) => {
                for &meta1 in records1 {
                    for &meta2 in records2 {
                        outcome.pairs.push(JoinedPair { comparison, meta1, meta2 });
                    }
                }
            }
            _ => {
                let missing: Vec<String> = [
                    (matches1.is_none(), &comparison.genome1),
                    (matches2.is_none(), &comparison.genome2),
                ]
                .iter()
                .filter(|(absent, _)| *absent)
                .map(|(_, genome)| genome.to_string())
                .collect();

                log::debug!(
                    "dropping comparison {} vs {}: no metadata for {}",
                    comparison.genome1,
                    comparison.genome2,
                    missing.join(", ")
                );
                outcome.dropped.push(DroppedComparison {
                    row,
                    genome1: comparison.genome1.clone(),
                    genome2: comparison.genome2.clone(),
                    missing,
                });
            }
        }
    }

    if !outcome.dropped.is_empty() {
        log::warn!(
            "{} of {} comparisons dropped for missing metadata",
            outcome.dropped.len(),
            comparisons.len()
        );
    }
    outcome
}

/// A fully labeled genome pair
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPair {
    pub comparison: ComparisonRecord,
    pub meta1: SampleMetadata,
    pub meta2: SampleMetadata,
    pub time: TimeComparison,
    pub geo: GeoComparison,
    pub ani_category: AniCategory,
    pub case: CaseComparison,
}

/// Derive the four labels of a joined pair
pub fn classify_pair(pair: &JoinedPair) -> ClassifiedPair {
    let JoinedPair { comparison, meta1, meta2 } = *pair;

    ClassifiedPair {
        time: time_comparison(meta1.date.days_between(&meta2.date)),
        geo: geo_comparison(
            meta1.location.as_deref(),
            meta2.location.as_deref(),
            meta1.region,
            meta2.region,
        ),
        ani_category: ani_category(comparison.ani),
        case: case_comparison(comparison.ani, comparison.gene_jaccard, comparison.allele_jaccard),
        comparison: comparison.clone(),
        meta1: meta1.clone(),
        meta2: meta2.clone(),
    }
}

/// Labeled rows plus the comparisons excluded by the join
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub rows: Vec<ClassifiedPair>,
    pub dropped: Vec<DroppedComparison>,
}

impl Classification {
    /// Row count per linkage verdict
    pub fn verdict_counts(&self) -> HashMap<CaseComparison, usize> {
        let mut counts = HashMap::new();
        for row in &self.rows {
            *counts.entry(row.case).or_insert(0) += 1;
        }
        counts
    }
}

/// Join and classify every comparison. Rows are labeled in parallel and
/// returned in join order.
pub fn classify_comparisons(comparisons: &[ComparisonRecord], metadata: &MetadataTable) -> Classification {
    let JoinOutcome { pairs, dropped } = join_metadata(comparisons, metadata);
    let rows = pairs.par_iter().map(classify_pair).collect();
    Classification { rows, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{HhsRegionTable, MetadataNormalizer, RawMetadata};

    fn raw(sample: &str, state: &str, year: &str, month: &str) -> RawMetadata {
        RawMetadata {
            sample: Some(sample.to_string()),
            state: Some(state.to_string()),
            year: Some(year.to_string()),
            month: Some(month.to_string()),
            ..Default::default()
        }
    }

    fn comparison(g1: &str, g2: &str, ani: f64, gene: f64, allele: f64) -> ComparisonRecord {
        ComparisonRecord {
            genome1: g1.to_string(),
            genome2: g2.to_string(),
            ani,
            gene_jaccard: gene,
            allele_jaccard: allele,
            gene_difference: 3,
        }
    }

    fn metadata(rows: &[RawMetadata]) -> MetadataTable {
        let table = HhsRegionTable::new();
        MetadataNormalizer::new(&table).normalize_all(rows, None).unwrap()
    }

    #[test]
    fn test_missing_metadata_is_dropped() {
        let meta = metadata(&[raw("g1", "GA", "2023", "1"), raw("g2", "FL", "2023", "2")]);
        let comps = vec![
            comparison("g1", "g2", 99.9, 0.99, 0.95),
            comparison("g1", "g9", 99.9, 0.99, 0.95),
        ];
        let outcome = join_metadata(&comps, &meta);

        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.dropped.len(), 1);
        assert_eq!(outcome.dropped[0].row, 1);
        assert_eq!(outcome.dropped[0].missing, vec!["g9".to_string()]);
    }

    #[test]
    fn test_duplicate_metadata_fans_out() {
        let meta = metadata(&[
            raw("g1", "GA", "2023", "1"),
            raw("g2", "FL", "2023", "2"),
            raw("g2", "CA", "2023", "3"),
        ]);
        let comps = vec![comparison("g1", "g2", 99.9, 0.99, 0.95)];
        let outcome = join_metadata(&comps, &meta);

        assert_eq!(outcome.pairs.len(), 2);
        assert_eq!(outcome.pairs[0].meta2.location.as_deref(), Some("FL"));
        assert_eq!(outcome.pairs[1].meta2.location.as_deref(), Some("CA"));
    }

    #[test]
    fn test_classify_pair_labels() {
        let meta = metadata(&[raw("g1", "GA", "2023", "1"), raw("g2", "FL", "2023", "3")]);
        let comps = vec![comparison("g1", "g2", 99.9, 0.99, 0.95)];
        let result = classify_comparisons(&comps, &meta);

        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];
        assert_eq!(row.time, TimeComparison::Within120Days);
        assert_eq!(row.geo, GeoComparison::SameRegion);
        assert_eq!(row.ani_category, AniCategory::SameStrain);
        assert_eq!(row.case, CaseComparison::StronglyLinked);
        assert_eq!(result.verdict_counts()[&CaseComparison::StronglyLinked], 1);
    }

    #[test]
    fn test_order_is_preserved() {
        let meta = metadata(&[
            raw("a", "GA", "2023", "1"),
            raw("b", "WA", "2020", "1"),
            raw("c", "GA", "2023", "1"),
        ]);
        let comps: Vec<ComparisonRecord> = (0..50)
            .map(|i| {
                let other = if i % 2 == 0 { "b" } else { "c" };
                comparison("a", other, 90.0 + i as f64 * 0.2, 0.9, 0.9)
            })
            .collect();
        let result = classify_comparisons(&comps, &meta);

        assert_eq!(result.rows.len(), 50);
        for (row, comp) in result.rows.iter().zip(&comps) {
            assert_eq!(&row.comparison, comp);
        }
        assert_eq!(result.rows[0].geo, GeoComparison::Widespread);
        assert_eq!(result.rows[0].time, TimeComparison::Longer);
        assert_eq!(result.rows[1].geo, GeoComparison::SameState);
    }
}
