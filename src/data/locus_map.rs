// locus_map.rs - Per-genome locus → allele digest mapping and header extraction

use crate::error::{LinkageError, Result};
use crate::hashers::AlleleHasher;
use std::collections::HashMap;

/// Annotation carrying the allele digest in the second header token
pub const DIGEST_PREFIX: &str = "value_md5=";

/// Mapping from locus name to allele digest for a single genome.
///
/// Built once by [`HeaderExtractor::extract`] (or [`LocusMap::from_entries`])
/// and read-only afterwards. Locus names are unique within a genome.
#[derive(Debug, Clone, Default)]
pub struct LocusMap {
    pub genome: String,
    loci: HashMap<String, String>,
}

impl LocusMap {
    fn empty(genome: &str) -> Self {
        Self {
            genome: genome.to_string(),
            loci: HashMap::new(),
        }
    }

    /// Build a map from (locus, digest) pairs, rejecting duplicate loci
    pub fn from_entries<I, L, D>(genome: &str, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, D)>,
        L: Into<String>,
        D: Into<String>,
    {
        let mut map = Self::empty(genome);
        for (locus, digest) in entries {
            map.insert(locus.into(), digest.into())?;
        }
        Ok(map)
    }

    fn insert(&mut self, locus: String, digest: String) -> Result<()> {
        if self.loci.contains_key(&locus) {
            return Err(LinkageError::malformed(format!(
                "duplicate locus '{}' in genome '{}'",
                locus, self.genome
            )));
        }
        self.loci.insert(locus, digest);
        Ok(())
    }

    pub fn digest(&self, locus: &str) -> Option<&str> {
        self.loci.get(locus).map(|d| d.as_str())
    }

    pub fn contains(&self, locus: &str) -> bool {
        self.loci.contains_key(locus)
    }

    pub fn loci(&self) -> impl Iterator<Item = &str> {
        self.loci.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }
}

/// Parses `locus value_md5=<digest> ...` headers into a [`LocusMap`].
///
/// Headers whose second token is not a digest annotation are skipped. In
/// strict mode (the default) a header with fewer than two tokens is an error.
/// With a fallback hasher, unannotated records get a digest computed from
/// their sequence instead of being skipped.
#[derive(Debug)]
pub struct HeaderExtractor {
    strict: bool,
    fallback: Option<Box<dyn AlleleHasher>>,
}

impl Default for HeaderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderExtractor {
    pub fn new() -> Self {
        Self {
            strict: true,
            fallback: None,
        }
    }

    /// Skip short headers instead of failing on them
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Hash the sequence of records that carry no digest annotation
    pub fn with_fallback_hasher(mut self, hasher: Box<dyn AlleleHasher>) -> Self {
        self.fallback = Some(hasher);
        self
    }

    /// Extract the (locus, digest) entry of a single record, if any
    pub fn parse_record(&self, header: &str, sequence: &str) -> Result<Option<(String, String)>> {
        let mut tokens = header.split_whitespace();

        let locus = match tokens.next() {
            Some(locus) => locus,
            None if self.strict && self.fallback.is_none() => {
                return Err(LinkageError::malformed("empty sequence header"));
            }
            None => return Ok(None),
        };

        match tokens.next() {
            Some(token) if token.starts_with(DIGEST_PREFIX) => {
                let digest = &token[DIGEST_PREFIX.len()..];
                Ok(Some((locus.to_string(), digest.to_string())))
            }
            second => {
                if let Some(hasher) = &self.fallback {
                    return Ok(Some((locus.to_string(), hasher.digest_allele(sequence))));
                }
                if second.is_none() && self.strict {
                    return Err(LinkageError::malformed(format!(
                        "header '{}' has no {} annotation token",
                        header, DIGEST_PREFIX
                    )));
                }
                Ok(None)
            }
        }
    }

    /// Build the locus map of `genome` from a stream of (header, sequence) records
    pub fn extract<I, H, S>(&self, genome: &str, records: I) -> Result<LocusMap>
    where
        I: IntoIterator<Item = (H, S)>,
        H: AsRef<str>,
        S: AsRef<str>,
    {
        let mut map = LocusMap::empty(genome);
        let mut skipped = 0usize;

        for (header, sequence) in records {
            match self.parse_record(header.as_ref(), sequence.as_ref())? {
                Some((locus, digest)) => map.insert(locus, digest)?,
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::debug!(
                "{}: skipped {} headers without {} annotation",
                genome,
                skipped,
                DIGEST_PREFIX
            );
        }
        Ok(map)
    }
}
