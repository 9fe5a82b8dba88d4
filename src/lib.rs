// lib.rs - pairlink library root

//! # pairlink - Pairwise genome linkage classification for outbreak surveillance
//!
//! This library labels genome pairs for outbreak-cluster triage. Each pair
//! carries an externally computed ANI value plus gene-content and
//! allele-content Jaccard scores; joined with per-sample metadata, it is
//! classified along temporal, geographic and genomic proximity into a single
//! linkage verdict.
//!
//! ## Features
//!
//! - **Locus maps**: `locus value_md5=<digest>` FASTA headers → locus/allele maps
//! - **Set similarity**: gene-presence and allele-identity Jaccard (similarity or distance)
//! - **Metadata normalization**: date sentinels, state backfill, HHS region lookup
//! - **Classification**: time, geography, ANI category and linkage verdict per pair
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use pairlink::prelude::*;
//! use std::path::Path;
//!
//! let comparisons = load_comparisons(Path::new("comparisons.csv"))?;
//! let raw = load_metadata(Path::new("metadata.csv"), MetadataRole::Primary)?;
//!
//! let regions = HhsRegionTable::new();
//! let metadata = MetadataNormalizer::new(&regions).normalize_all(&raw, None)?;
//!
//! let labeled = classify_comparisons(&comparisons, &metadata);
//! write_labeled_table("labeled.csv", OutputFormat::Csv, &labeled.rows)?;
//! # Ok::<(), pairlink::LinkageError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod hashers;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config, ValidationResult};
    pub use crate::core::{classify_comparisons, compare_loci, join_metadata};
    pub use crate::core::{
        AniCategory, CaseComparison, Classification, ClassifiedPair, GeoComparison, JaccardMode,
        SimilarityReport, TimeComparison,
    };
    pub use crate::data::loaders::{load_comparisons, load_locus_map, load_metadata, MetadataRole};
    pub use crate::data::{ComparisonRecord, HeaderExtractor, LocusMap, MetadataTable};
    pub use crate::data::{HhsRegionTable, MetadataNormalizer, RegionCode, RegionLookup};
    pub use crate::error::LinkageError;
    pub use crate::hashers::{AlleleHasher, Md5Hasher};
    pub use crate::output::{write_labeled_table, write_similarity_reports, OutputFormat};
}

// Re-export main types at the root level for convenience
pub use crate::cli::{Args, ValidationResult};
pub use crate::core::{CaseComparison, JaccardMode, SimilarityReport};
pub use crate::data::{ComparisonRecord, LocusMap, MetadataTable, SampleMetadata};
pub use crate::error::{LinkageError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "pairlink v{} - Pairwise genome linkage classification",
        VERSION
    )
}
