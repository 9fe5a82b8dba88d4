// traits.rs - Allele digest trait

use std::fmt::Debug;

/// Gap character stripped from aligned allele sequences before hashing
pub const GAP_CHAR: char = '-';

/// Strategy for turning an allele sequence into a digest string
pub trait AlleleHasher: Send + Sync + Debug {
    /// Compute the digest for an (already gap-stripped) nucleotide sequence
    fn digest(&self, sequence: &str) -> String;

    /// Get a human-readable name for this hasher
    fn name(&self) -> &'static str;

    /// Get a description of this hasher
    fn description(&self) -> &'static str;

    /// Strip alignment gaps and compute the digest
    fn digest_allele(&self, sequence: &str) -> String {
        self.digest(&strip_gaps(sequence))
    }
}

/// Remove alignment gap characters from a sequence
pub fn strip_gaps(sequence: &str) -> String {
    sequence.chars().filter(|&c| c != GAP_CHAR).collect()
}
