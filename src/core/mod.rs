// mod.rs - Core logic module

pub mod classify;
pub mod join;
pub mod similarity;

// Re-export main types for convenience
pub use classify::{
    ani_category, case_comparison, geo_comparison, time_comparison, AniCategory, CaseComparison,
    GeoComparison, LinkageThresholds, TimeComparison,
};
pub use join::{
    classify_comparisons, classify_pair, join_metadata, Classification, ClassifiedPair,
    DroppedComparison, JoinOutcome, JoinedPair,
};
pub use similarity::{compare_all, compare_loci, jaccard_index, pair_indices, JaccardMode, SimilarityReport};
