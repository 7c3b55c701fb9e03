//! Launch record loading.
//!
//! The dataset is read once at start-up into an immutable [`LaunchTable`].
//! Every chart computation borrows the same table; nothing ever mutates it.

pub mod schema;

use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::ALL_SITES;
use crate::error::{Error, Result};

/// Outcome class of a launch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// Class `0`.
    Failure,
    /// Class `1`.
    Success,
}

impl Outcome {
    /// Numeric class value as stored in the dataset.
    #[must_use]
    pub fn class(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    /// Parse a class value. Accepts `0`/`1` in integer or float spelling.
    ///
    /// # Errors
    ///
    /// Returns an error for any other value.
    pub fn from_class(value: f64) -> std::result::Result<Self, String> {
        if value.abs() < f64::EPSILON {
            Ok(Self::Failure)
        } else if (value - 1.0).abs() < f64::EPSILON {
            Ok(Self::Success)
        } else {
            Err(format!("class must be 0 or 1, got {value}"))
        }
    }

    /// Check if this outcome is a success.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

/// One launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site label.
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Mission outcome.
    pub outcome: Outcome,
    /// Booster version category label.
    pub booster_category: String,
}

impl LaunchRecord {
    /// Create a new launch record.
    #[must_use]
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_category: booster_category.into(),
        }
    }
}

/// Row shape as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

impl RawRecord {
    fn into_record(self, line: u64) -> Result<LaunchRecord> {
        if self.site == ALL_SITES {
            return Err(Error::schema(format!(
                "line {line}: site label '{ALL_SITES}' is reserved"
            )));
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(Error::row(
                line,
                format!("payload mass must be non-negative, got {}", self.payload_mass_kg),
            ));
        }
        let outcome = Outcome::from_class(self.class).map_err(|msg| Error::row(line, msg))?;
        Ok(LaunchRecord {
            site: self.site,
            payload_mass_kg: self.payload_mass_kg,
            outcome,
            booster_category: self.booster_category,
        })
    }
}

/// A closed interval of payload masses, always with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Create a new range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `low > high` or either bound is not finite.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(Error::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Check whether `value` lies in `[low, high]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Check whether `other` lies entirely inside this range.
    #[must_use]
    pub fn encloses(&self, other: &PayloadRange) -> bool {
        self.low <= other.low && other.high <= self.high
    }
}

/// The immutable, in-memory launch table.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    bounds: PayloadRange,
}

impl LaunchTable {
    /// Load the table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, the header lacks a
    /// required column, any row is malformed, or the file has no rows.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening dataset at {}", path.display());
        let reader = csv_builder()
            .from_path(path)
            .map_err(|source| Error::DatasetOpen {
                path: path.to_path_buf(),
                source,
            })?;
        let table = Self::parse(reader)?;
        info!(
            records = table.len(),
            sites = table.site_count(),
            "Dataset loaded from {}",
            path.display()
        );
        Ok(table)
    }

    /// Parse the table from any reader holding CSV text.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LaunchTable::load`], minus the open failure.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::parse(csv_builder().from_reader(reader))
    }

    /// Build a table from records already in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetEmpty`] if `records` is empty.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        let bounds = payload_bounds(&records)?;
        Ok(Self { records, bounds })
    }

    fn parse<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let missing = schema::missing_columns(headers.iter());
        if !missing.is_empty() {
            return Err(Error::schema(format!(
                "missing column(s): {}",
                missing.join(", ")
            )));
        }
        debug!(columns = headers.len(), "Dataset header accepted");

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let line = row.position().map_or(0, csv::Position::line);
            let raw: RawRecord = row
                .deserialize(Some(&headers))
                .map_err(|err| Error::row(line, err.to_string()))?;
            records.push(raw.into_record(line)?);
        }
        Self::from_records(records)
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed table; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct launch sites.
    #[must_use]
    pub fn site_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.site.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Smallest and largest payload mass in the table.
    #[must_use]
    pub fn payload_bounds(&self) -> PayloadRange {
        self.bounds
    }
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

fn payload_bounds(records: &[LaunchRecord]) -> Result<PayloadRange> {
    let first = records.first().ok_or(Error::DatasetEmpty)?;
    let (low, high) = records.iter().fold(
        (first.payload_mass_kg, first.payload_mass_kg),
        |(low, high), r| (low.min(r.payload_mass_kg), high.max(r.payload_mass_kg)),
    );
    PayloadRange::new(low, high)
}
