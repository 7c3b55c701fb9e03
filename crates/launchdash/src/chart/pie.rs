//! Outcome pie chart.
//!
//! With every site selected, one slice per site sized by its launch count.
//! With a single site selected, one slice per outcome class at that site.

use std::collections::BTreeMap;

use tracing::trace;

use super::{Figure, FigureLayout, Palette, PieMarker, PieTrace, Trace};
use crate::catalog::SiteSelection;
use crate::dataset::{LaunchTable, Outcome};

/// Title of the every-site pie.
pub const ALL_SITES_TITLE: &str = "Total Success Launches by Site";

/// Presentation settings for the pie chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieStyle {
    /// Radial offset applied to every slice of the every-site pie.
    pub pull: f64,
    /// How many palette colours the every-site pie cycles through.
    pub all_sites_colors: usize,
}

impl Default for PieStyle {
    fn default() -> Self {
        Self {
            pull: 0.2,
            all_sites_colors: 2,
        }
    }
}

/// Slice labels and sizes before any styling.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PieSlices {
    /// Slice labels.
    pub labels: Vec<String>,
    /// Slice sizes.
    pub values: Vec<u64>,
}

impl PieSlices {
    /// Aggregate `table` for `selection`.
    #[must_use]
    pub fn aggregate(table: &LaunchTable, selection: &SiteSelection) -> Self {
        match selection {
            SiteSelection::All => Self::per_site(table),
            SiteSelection::Site(site) => Self::per_outcome(table, site),
        }
    }

    /// Group by (site, outcome) and total each site across outcomes.
    fn per_site(table: &LaunchTable) -> Self {
        let mut grouped: BTreeMap<&str, BTreeMap<Outcome, u64>> = BTreeMap::new();
        for record in table.records() {
            *grouped
                .entry(record.site.as_str())
                .or_default()
                .entry(record.outcome)
                .or_default() += 1;
        }

        let mut slices = Self::default();
        for (site, by_outcome) in grouped {
            slices.labels.push(site.to_string());
            slices.values.push(by_outcome.values().sum());
        }
        slices
    }

    /// Count outcomes at one site, in order of first appearance.
    fn per_outcome(table: &LaunchTable, site: &str) -> Self {
        let mut counts: Vec<(Outcome, u64)> = Vec::with_capacity(2);
        for record in table.records().iter().filter(|r| r.site == site) {
            match counts.iter_mut().find(|(o, _)| *o == record.outcome) {
                Some((_, n)) => *n += 1,
                None => counts.push((record.outcome, 1)),
            }
        }

        Self {
            labels: counts.iter().map(|(o, _)| o.to_string()).collect(),
            values: counts.iter().map(|(_, n)| *n).collect(),
        }
    }

    /// Sum of all slice sizes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Number of slices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the outcome pie for `selection`.
///
/// A site with no records produces a pie with no slices.
#[must_use]
pub fn pie_chart(table: &LaunchTable, selection: &SiteSelection, style: &PieStyle) -> Figure {
    let slices = PieSlices::aggregate(table, selection);
    trace!(site = %selection, slices = slices.len(), "Aggregated pie");

    let n = slices.len();
    let (title, pull, colors) = match selection {
        SiteSelection::All => (
            ALL_SITES_TITLE.to_string(),
            Some(vec![style.pull; n]),
            Palette::take(style.all_sites_colors).cycle(n),
        ),
        SiteSelection::Site(site) => (
            format!("Success Launches - {site}"),
            None,
            Palette::qualitative().cycle(n),
        ),
    };

    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: slices.labels,
            values: slices.values,
            textinfo: "percent+label",
            pull,
            marker: PieMarker { colors },
        })],
        layout: FigureLayout::titled(title),
    }
}
