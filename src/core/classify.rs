// classify.rs - Ordered bucket ladders for pairwise labels
//
// Every ladder is scanned top to bottom and the first matching rung wins.
// Rungs overlap (40 days is also within 120 days), so table order is
// significant.

use crate::data::RegionCode;
use std::fmt;

/// Temporal proximity of two samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeComparison {
    SameMonth,
    Within120Days,
    Within12Months,
    Longer,
}

impl TimeComparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeComparison::SameMonth => "Approx. 30-45 days (same month)",
            TimeComparison::Within120Days => "Less than 120 days",
            TimeComparison::Within12Months => "Within 12 months",
            TimeComparison::Longer => "Longer than 12 months apart",
        }
    }
}

/// Geographic proximity of two samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeoComparison {
    SameState,
    SameRegion,
    Widespread,
}

impl GeoComparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoComparison::SameState => "Same state",
            GeoComparison::SameRegion => "Multistate - same HHS Region",
            GeoComparison::Widespread => "Multistate - Widespread",
        }
    }
}

/// Taxonomic relatedness implied by ANI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AniCategory {
    SameStrain,
    SameSubtypeFamily,
    SameSpecies,
    CloselyRelatedSpecies,
    SemiRelatedSpecies,
    DifferentSpecies,
}

impl AniCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AniCategory::SameStrain => "Same strain",
            AniCategory::SameSubtypeFamily => "Same subtype family",
            AniCategory::SameSpecies => "Same species",
            AniCategory::CloselyRelatedSpecies => "Closely related species",
            AniCategory::SemiRelatedSpecies => "Semi-related/recombinant species",
            AniCategory::DifferentSpecies => "Different species",
        }
    }
}

/// Linkage verdict for a pair of cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseComparison {
    StronglyLinked,
    PossiblyLinked,
    Unlikely,
}

impl CaseComparison {
    pub const ALL: [CaseComparison; 3] = [
        CaseComparison::StronglyLinked,
        CaseComparison::PossiblyLinked,
        CaseComparison::Unlikely,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseComparison::StronglyLinked => "Strongly linked",
            CaseComparison::PossiblyLinked => "Possibly linked (relaxed linkage)",
            CaseComparison::Unlikely => "Unlikely to be linked",
        }
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(TimeComparison, GeoComparison, AniCategory, CaseComparison);

/// (maximum day delta, label); above the last rung the samples are "longer" apart
pub const TIME_WINDOWS: [(i64, TimeComparison); 3] = [
    (45, TimeComparison::SameMonth),
    (120, TimeComparison::Within120Days),
    (365, TimeComparison::Within12Months),
];

/// (minimum ANI, label), highest first
pub const ANI_BINS: [(f64, AniCategory); 5] = [
    (99.885, AniCategory::SameStrain),
    (99.675, AniCategory::SameSubtypeFamily),
    (98.0, AniCategory::SameSpecies),
    (95.0, AniCategory::CloselyRelatedSpecies),
    (85.0, AniCategory::SemiRelatedSpecies),
];

/// Minimum scores for a linkage tier; all three must be met
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkageThresholds {
    pub ani: f64,
    pub gene_jaccard: f64,
    pub allele_jaccard: f64,
}

impl LinkageThresholds {
    pub fn admits(&self, ani: f64, gene_jaccard: f64, allele_jaccard: f64) -> bool {
        ani >= self.ani && gene_jaccard >= self.gene_jaccard && allele_jaccard >= self.allele_jaccard
    }
}

/// Linkage tiers, strictest first. Slightly below round values to absorb
/// rounding in the upstream scores.
pub const LINKAGE_TIERS: [(LinkageThresholds, CaseComparison); 2] = [
    (
        LinkageThresholds { ani: 99.850, gene_jaccard: 0.9850, allele_jaccard: 0.9450 },
        CaseComparison::StronglyLinked,
    ),
    (
        LinkageThresholds { ani: 99.6850, gene_jaccard: 0.9450, allele_jaccard: 0.8950 },
        CaseComparison::PossiblyLinked,
    ),
];

/// Bucket an absolute day delta
pub fn time_comparison(delta_days: i64) -> TimeComparison {
    let delta = delta_days.abs();
    TIME_WINDOWS
        .iter()
        .find(|(max_days, _)| delta <= *max_days)
        .map(|(_, label)| *label)
        .unwrap_or(TimeComparison::Longer)
}

/// Compare two locations and their regions.
///
/// Locations only match when both are known; otherwise the regions decide.
pub fn geo_comparison(
    location1: Option<&str>,
    location2: Option<&str>,
    region1: RegionCode,
    region2: RegionCode,
) -> GeoComparison {
    let same_location = matches!((location1, location2), (Some(l1), Some(l2)) if l1 == l2);
    if same_location {
        GeoComparison::SameState
    } else if region1 == region2 {
        GeoComparison::SameRegion
    } else {
        GeoComparison::Widespread
    }
}

/// Bucket an ANI percentage; NaN falls through to "Different species"
pub fn ani_category(ani: f64) -> AniCategory {
    ANI_BINS
        .iter()
        .find(|(min_ani, _)| ani >= *min_ani)
        .map(|(_, label)| *label)
        .unwrap_or(AniCategory::DifferentSpecies)
}

/// Linkage verdict from ANI, gene Jaccard and allele Jaccard
pub fn case_comparison(ani: f64, gene_jaccard: f64, allele_jaccard: f64) -> CaseComparison {
    LINKAGE_TIERS
        .iter()
        .find(|(tier, _)| tier.admits(ani, gene_jaccard, allele_jaccard))
        .map(|(_, label)| *label)
        .unwrap_or(CaseComparison::Unlikely)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_boundaries() {
        assert_eq!(time_comparison(0), TimeComparison::SameMonth);
        assert_eq!(time_comparison(45), TimeComparison::SameMonth);
        assert_eq!(time_comparison(46), TimeComparison::Within120Days);
        assert_eq!(time_comparison(120), TimeComparison::Within120Days);
        assert_eq!(time_comparison(365), TimeComparison::Within12Months);
        assert_eq!(time_comparison(366), TimeComparison::Longer);
        assert_eq!(time_comparison(-40), TimeComparison::SameMonth);
    }

    #[test]
    fn test_ani_boundaries() {
        assert_eq!(ani_category(99.885), AniCategory::SameStrain);
        assert_eq!(ani_category(99.884999), AniCategory::SameSubtypeFamily);
        assert_eq!(ani_category(99.675), AniCategory::SameSubtypeFamily);
        assert_eq!(ani_category(99.0), AniCategory::SameSpecies);
        assert_eq!(ani_category(98.0), AniCategory::SameSpecies);
        assert_eq!(ani_category(96.0), AniCategory::CloselyRelatedSpecies);
        assert_eq!(ani_category(85.0), AniCategory::SemiRelatedSpecies);
        assert_eq!(ani_category(84.999), AniCategory::DifferentSpecies);
        assert_eq!(ani_category(f64::NAN), AniCategory::DifferentSpecies);
    }

    #[test]
    fn test_case_comparison() {
        assert_eq!(case_comparison(99.9, 0.99, 0.95), CaseComparison::StronglyLinked);
        assert_eq!(case_comparison(99.7, 0.95, 0.90), CaseComparison::PossiblyLinked);
        assert_eq!(case_comparison(99.0, 0.80, 0.80), CaseComparison::Unlikely);
        // One failing criterion drops the whole tier
        assert_eq!(case_comparison(99.9, 0.99, 0.90), CaseComparison::PossiblyLinked);
        assert_eq!(case_comparison(99.9, 0.90, 0.99), CaseComparison::Unlikely);
    }

    #[test]
    fn test_case_comparison_inclusive_edges() {
        assert_eq!(case_comparison(99.850, 0.9850, 0.9450), CaseComparison::StronglyLinked);
        assert_eq!(case_comparison(99.849, 0.9850, 0.9450), CaseComparison::PossiblyLinked);
        assert_eq!(case_comparison(99.850, 0.9849, 0.9450), CaseComparison::PossiblyLinked);
        assert_eq!(case_comparison(99.850, 0.9850, 0.9449), CaseComparison::PossiblyLinked);

        assert_eq!(case_comparison(99.6850, 0.9450, 0.8950), CaseComparison::PossiblyLinked);
        assert_eq!(case_comparison(99.6849, 0.9450, 0.8950), CaseComparison::Unlikely);
        assert_eq!(case_comparison(99.6850, 0.9449, 0.8950), CaseComparison::Unlikely);
        assert_eq!(case_comparison(99.6850, 0.9450, 0.8949), CaseComparison::Unlikely);
    }

    #[test]
    fn test_geo_comparison() {
        let ga = RegionCode::Hhs(4);
        let fl = RegionCode::Hhs(4);
        let ca = RegionCode::Hhs(9);
        assert_eq!(geo_comparison(Some("GA"), Some("GA"), ga, ga), GeoComparison::SameState);
        assert_eq!(geo_comparison(Some("GA"), Some("FL"), ga, fl), GeoComparison::SameRegion);
        assert_eq!(geo_comparison(Some("GA"), Some("CA"), ga, ca), GeoComparison::Widespread);
        assert_eq!(
            geo_comparison(None, None, RegionCode::International, RegionCode::International),
            GeoComparison::SameRegion
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(CaseComparison::PossiblyLinked.to_string(), "Possibly linked (relaxed linkage)");
        assert_eq!(GeoComparison::Widespread.to_string(), "Multistate - Widespread");
    }
}
