// regions.rs - State → HHS region lookup

use std::collections::HashMap;
use std::fmt;

/// U.S. HHS region of a sample, or the sentinel for anything unmapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionCode {
    Hhs(u8),
    International,
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionCode::Hhs(region) => write!(f, "{}", region),
            RegionCode::International => write!(f, "International"),
        }
    }
}

/// Maps a state code to its region code.
///
/// Shared read-only by every classification, so implementations must be
/// safe for concurrent reads.
pub trait RegionLookup: Send + Sync {
    fn region(&self, state: &str) -> RegionCode;
}

/// The 50 states plus DC, with their HHS region numbers
pub const HHS_REGIONS: [(&str, u8); 51] = [
    ("AL", 4), ("AK", 10), ("AZ", 9), ("AR", 6), ("CA", 9), ("CO", 8), ("CT", 1), ("DE", 3),
    ("FL", 4), ("GA", 4), ("HI", 9), ("ID", 10), ("IL", 5), ("IN", 5), ("IA", 7), ("KS", 7),
    ("KY", 4), ("LA", 6), ("ME", 1), ("MD", 3), ("MA", 1), ("MI", 5), ("MN", 5), ("MS", 4),
    ("MO", 7), ("MT", 8), ("NE", 7), ("NV", 9), ("NH", 1), ("NJ", 2), ("NM", 6), ("NY", 2),
    ("NC", 4), ("ND", 8), ("OH", 5), ("OK", 6), ("OR", 10), ("PA", 3), ("RI", 1), ("SC", 4),
    ("SD", 8), ("TN", 4), ("TX", 6), ("UT", 8), ("VT", 1), ("VA", 3), ("WA", 10), ("WV", 3),
    ("WI", 5), ("WY", 8), ("DC", 3),
];

/// Number of HHS regions
pub const HHS_REGION_COUNT: u8 = 10;

/// Table-backed lookup, seeded with [`HHS_REGIONS`]
#[derive(Debug, Clone)]
pub struct HhsRegionTable {
    regions: HashMap<String, u8>,
}

impl Default for HhsRegionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HhsRegionTable {
    pub fn new() -> Self {
        let regions = HHS_REGIONS
            .iter()
            .map(|(state, region)| (state.to_string(), *region))
            .collect();
        Self { regions }
    }

    /// Add or replace state entries (e.g. territories from a config file)
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a u8)>,
    {
        for (state, region) in overrides {
            self.regions.insert(state.clone(), *region);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl RegionLookup for HhsRegionTable {
    fn region(&self, state: &str) -> RegionCode {
        self.regions
            .get(state.trim())
            .map(|&region| RegionCode::Hhs(region))
            .unwrap_or(RegionCode::International)
    }
}
