//! Launch site catalog and site selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::LaunchTable;

/// Wire value of the "every site" dropdown entry.
pub const ALL_SITES: &str = "ALL";

/// Display label of the "every site" dropdown entry.
pub const ALL_SITES_LABEL: &str = "All Sites";

/// The site-selector value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    /// Aggregate across every site.
    #[default]
    All,
    /// A single concrete site label.
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value. `"ALL"` selects every site; anything else
    /// is taken as a site label, known or not.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }

    /// Check whether a record at `site` passes this selection.
    #[must_use]
    pub fn matches(&self, site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(selected) => selected == site,
        }
    }

    /// Check if this is the "every site" selection.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SITES),
            Self::Site(site) => f.write_str(site),
        }
    }
}

impl Serialize for SiteSelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SiteSelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    /// Text shown to the viewer.
    pub label: String,
    /// Value sent back when the entry is chosen.
    pub value: String,
}

/// Distinct launch sites, in the order they first appear in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCatalog {
    sites: Vec<String>,
}

impl SiteCatalog {
    /// Collect the distinct sites of `table`.
    #[must_use]
    pub fn from_table(table: &LaunchTable) -> Self {
        let mut sites: Vec<String> = Vec::new();
        for record in table.records() {
            if !sites.contains(&record.site) {
                sites.push(record.site.clone());
            }
        }
        Self { sites }
    }

    /// Site labels.
    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Number of distinct sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Check if the catalog has no sites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Check whether `site` is a known label.
    #[must_use]
    pub fn contains(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Dropdown options: the "All Sites" entry followed by one per site.
    #[must_use]
    pub fn options(&self) -> Vec<SiteOption> {
        std::iter::once(SiteOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(self.sites.iter().map(|site| SiteOption {
            label: site.clone(),
            value: site.clone(),
        }))
        .collect()
    }
}
