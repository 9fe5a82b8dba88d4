// metadata.rs - Sample metadata records and normalization

use crate::data::regions::{RegionCode, RegionLookup};
use crate::error::{LinkageError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Year used when a sample has no collection year
pub const DEFAULT_YEAR: &str = "1900";
/// Month used when a sample has no collection month ("unknown")
pub const DEFAULT_MONTH: &str = "0";

/// Tokens treated as an absent value in metadata tables
const MISSING_TOKENS: [&str; 6] = ["", "NA", "N/A", "NaN", "nan", "null"];

/// One metadata row as read from a table. Unknown columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMetadata {
    pub sample: Option<String>,
    pub pathogen: Option<String>,
    pub species: Option<String>,
    pub subtype: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub host: Option<String>,
    pub source: Option<String>,
    pub casetype: Option<String>,
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !MISSING_TOKENS.contains(v))
        .map(str::to_string)
}

/// Calendar year-month at month granularity. Month 0 means "unknown month".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
    date: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if month > 12 {
            return Err(LinkageError::validation(format!(
                "month {} is not a calendar month",
                month
            )));
        }
        // Unknown month is anchored to January
        let date = NaiveDate::from_ymd_opt(year, month.max(1), 1).ok_or_else(|| {
            LinkageError::validation(format!("{}-{} is not a calendar year-month", year, month))
        })?;
        Ok(Self { year, month, date })
    }

    /// Parse year and month strings as they appear in metadata tables
    pub fn parse(year: &str, month: &str) -> Result<Self> {
        let y = parse_calendar_field(year, "year")?;
        let m = parse_calendar_field(month, "month")?;
        if y == 0 || y > 9999 {
            return Err(LinkageError::validation(format!("year '{}' out of range", year)));
        }
        Self::new(y as i32, m)
    }

    /// First day of the month this value stands for
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Absolute distance in days between the first days of both months
    pub fn days_between(&self, other: &YearMonth) -> i64 {
        (other.date - self.date).num_days().abs()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Accept integer fields, including float renderings such as "2021.0"
fn parse_calendar_field(value: &str, field: &str) -> Result<u32> {
    let trimmed = value.trim();
    if let Ok(v) = trimmed.parse::<u32>() {
        return Ok(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
        _ => Err(LinkageError::validation(format!(
            "{} '{}' is not a whole number",
            field, value
        ))),
    }
}

/// Normalized metadata of one sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMetadata {
    pub sample: String,
    pub pathogen: Option<String>,
    pub species: Option<String>,
    pub subtype: Option<String>,
    /// State, or the country when no state is recorded. Region lookup uses this value.
    pub location: Option<String>,
    /// Year as recorded, or [`DEFAULT_YEAR`]
    pub year: String,
    /// Month as recorded, or [`DEFAULT_MONTH`]
    pub month: String,
    pub host: Option<String>,
    pub source: Option<String>,
    pub casetype: Option<String>,
    pub date: YearMonth,
    pub region: RegionCode,
}

/// Normalizes raw rows: date defaults, region derivation and location backfill
pub struct MetadataNormalizer<'a> {
    regions: &'a dyn RegionLookup,
}

impl<'a> MetadataNormalizer<'a> {
    pub fn new(regions: &'a dyn RegionLookup) -> Self {
        Self { regions }
    }

    pub fn normalize(&self, raw: &RawMetadata) -> Result<SampleMetadata> {
        let sample = clean(&raw.sample)
            .ok_or_else(|| LinkageError::malformed("metadata row without a sample id"))?;

        let year = clean(&raw.year).unwrap_or_else(|| DEFAULT_YEAR.to_string());
        let month = clean(&raw.month).unwrap_or_else(|| DEFAULT_MONTH.to_string());
        let date = YearMonth::parse(&year, &month).map_err(|e| match e {
            LinkageError::Validation(msg) => {
                LinkageError::validation(format!("sample '{}': {}", sample, msg))
            }
            other => other,
        })?;

        let location = clean(&raw.state).or_else(|| clean(&raw.country));
        let region = location
            .as_deref()
            .map(|l| self.regions.region(l))
            .unwrap_or(RegionCode::International);

        Ok(SampleMetadata {
            sample,
            pathogen: clean(&raw.pathogen),
            species: clean(&raw.species),
            subtype: clean(&raw.subtype),
            location,
            year,
            month,
            host: clean(&raw.host),
            source: clean(&raw.source),
            casetype: clean(&raw.casetype),
            date,
            region,
        })
    }

    /// Concatenate primary and secondary rows and normalize each of them.
    ///
    /// Rows sharing a sample id are all kept; the join emits one output row
    /// per matching combination. Rows without a sample id can never join and
    /// are skipped.
    pub fn normalize_all(
        &self,
        primary: &[RawMetadata],
        secondary: Option<&[RawMetadata]>,
    ) -> Result<MetadataTable> {
        let (rows, unnamed): (Vec<&RawMetadata>, Vec<&RawMetadata>) = primary
            .iter()
            .chain(secondary.unwrap_or_default())
            .partition(|raw| clean(&raw.sample).is_some());

        if !unnamed.is_empty() {
            log::warn!("skipped {} metadata rows without a sample id", unnamed.len());
        }

        let records = rows
            .into_iter()
            .map(|raw| self.normalize(raw))
            .collect::<Result<Vec<_>>>()?;

        log::info!("normalized {} metadata records", records.len());
        Ok(MetadataTable { records })
    }
}

/// Normalized metadata, in input order
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    pub records: Vec<SampleMetadata>,
}

impl MetadataTable {
    pub fn new(records: Vec<SampleMetadata>) -> Self {
        Self { records }
    }

    /// Records per sample id, each list in table order
    pub fn index(&self) -> HashMap<&str, Vec<&SampleMetadata>> {
        let mut index: HashMap<&str, Vec<&SampleMetadata>> = HashMap::new();
        for record in &self.records {
            index.entry(record.sample.as_str()).or_default().push(record);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
