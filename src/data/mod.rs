// mod.rs - Data structures module

pub mod alleles;
pub mod comparison;
pub mod loaders;
pub mod locus_map;
pub mod metadata;
pub mod regions;

// Re-export main types for convenience
pub use comparison::{ComparisonRecord, RawComparison};
pub use locus_map::{HeaderExtractor, LocusMap, DIGEST_PREFIX};
pub use metadata::{MetadataNormalizer, MetadataTable, RawMetadata, SampleMetadata, YearMonth};
pub use regions::{HhsRegionTable, RegionCode, RegionLookup};
