//! Payload versus outcome scatter chart.

use tracing::trace;

use super::{Axis, Figure, FigureLayout, Legend, Palette, ScatterMarker, ScatterTrace, Title, Trace};
use crate::catalog::SiteSelection;
use crate::dataset::{schema, LaunchRecord, LaunchTable, PayloadRange};

/// Title of the scatter chart.
pub const SCATTER_TITLE: &str = "Payload vs. Launch Outcome";

/// Records passing both the site selection and the closed payload range,
/// in table order.
#[must_use]
pub fn filter_records<'a>(
    table: &'a LaunchTable,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    table
        .records()
        .iter()
        .filter(|r| selection.matches(&r.site))
        .filter(|r| range.contains(r.payload_mass_kg))
        .collect()
}

/// Build the scatter chart for `selection` and `range`.
///
/// Points are grouped into one trace per booster category, ordered by first
/// appearance in the filtered view. An empty view produces a figure with no
/// traces.
#[must_use]
pub fn scatter_chart(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> Figure {
    let view = filter_records(table, selection, range);
    trace!(
        site = %selection,
        low = range.low(),
        high = range.high(),
        points = view.len(),
        "Filtered scatter view"
    );

    let palette = Palette::qualitative();
    let mut traces: Vec<ScatterTrace> = Vec::new();
    for record in view {
        let idx = match traces
            .iter()
            .position(|t| t.name == record.booster_category)
        {
            Some(idx) => idx,
            None => {
                traces.push(ScatterTrace {
                    name: record.booster_category.clone(),
                    legendgroup: record.booster_category.clone(),
                    x: Vec::new(),
                    y: Vec::new(),
                    mode: "markers",
                    marker: ScatterMarker {
                        color: palette.color(traces.len()).to_string(),
                    },
                });
                traces.len() - 1
            }
        };
        traces[idx].x.push(record.payload_mass_kg);
        traces[idx].y.push(record.outcome.class());
    }

    Figure {
        data: traces.into_iter().map(Trace::Scatter).collect(),
        layout: FigureLayout {
            title: Title::new(SCATTER_TITLE),
            xaxis: Some(Axis {
                title: Title::new(schema::PAYLOAD_MASS),
            }),
            yaxis: Some(Axis {
                title: Title::new(schema::CLASS),
            }),
            legend: Some(Legend {
                title: Title::new(schema::BOOSTER_CATEGORY),
            }),
        },
    }
}
