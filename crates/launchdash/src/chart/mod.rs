//! Chart specifications.
//!
//! Charts are produced as plotly-compatible figure descriptions. A figure is
//! a plain value: it is computed from the launch table for one control state,
//! serialized to JSON and handed to the browser, then dropped.
//!
//! - [`pie`] aggregates outcomes per site or per outcome class.
//! - [`scatter`] plots payload mass against outcome for a filtered view.

pub mod pie;
pub mod scatter;

use serde::Serialize;

pub use pie::{pie_chart, PieSlices, PieStyle};
pub use scatter::{filter_records, scatter_chart};

/// The plotly qualitative colour sequence.
pub const PLOTLY_QUALITATIVE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// A colour sequence that repeats once exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [&'static str],
}

impl Palette {
    /// The full qualitative palette.
    #[must_use]
    pub fn qualitative() -> Self {
        Self {
            colors: &PLOTLY_QUALITATIVE,
        }
    }

    /// The first `n` colours of the qualitative palette (at least one).
    #[must_use]
    pub fn take(n: usize) -> Self {
        let n = n.clamp(1, PLOTLY_QUALITATIVE.len());
        Self {
            colors: &PLOTLY_QUALITATIVE[..n],
        }
    }

    /// Colour for the `index`-th category.
    #[must_use]
    pub fn color(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }

    /// Colours for `n` consecutive categories.
    #[must_use]
    pub fn cycle(&self, n: usize) -> Vec<String> {
        (0..n).map(|i| self.color(i).to_string()).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::qualitative()
    }
}

/// A text element with the `{ "text": ... }` shape plotly expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    /// The text.
    pub text: String,
}

impl Title {
    /// Create a new title.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Axis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    /// Axis title.
    pub title: Title,
}

/// Legend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    /// Legend title.
    pub title: Title,
}

/// Figure-wide layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FigureLayout {
    /// Chart title.
    pub title: Title,
    /// Horizontal axis, when the chart has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    /// Vertical axis, when the chart has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    /// Legend, when it carries a title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl FigureLayout {
    /// Layout with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Title::new(title),
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}

/// Pie slice colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieMarker {
    /// One colour per slice.
    pub colors: Vec<String>,
}

/// One pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    /// Slice labels.
    pub labels: Vec<String>,
    /// Slice sizes, aligned with `labels`.
    pub values: Vec<u64>,
    /// Slice annotation mode.
    pub textinfo: &'static str,
    /// Per-slice radial offset, as a fraction of the radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<Vec<f64>>,
    /// Slice colours.
    pub marker: PieMarker,
}

/// Scatter point colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScatterMarker {
    /// Colour shared by every point of the trace.
    pub color: String,
}

/// One group of scatter points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    /// Legend entry.
    pub name: String,
    /// Legend group, equal to `name`.
    pub legendgroup: String,
    /// Horizontal coordinates.
    pub x: Vec<f64>,
    /// Vertical coordinates.
    pub y: Vec<u8>,
    /// Draw mode.
    pub mode: &'static str,
    /// Point colour.
    pub marker: ScatterMarker,
}

/// A single plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// A pie.
    Pie(PieTrace),
    /// A scatter series.
    Scatter(ScatterTrace),
}

/// A complete chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Plotted series.
    pub data: Vec<Trace>,
    /// Figure-wide layout.
    pub layout: FigureLayout,
}

impl Figure {
    /// Number of plotted points (scatter) or slices (pie) across all traces.
    #[must_use]
    pub fn mark_count(&self) -> usize {
        self.data
            .iter()
            .map(|trace| match trace {
                Trace::Pie(pie) => pie.values.len(),
                Trace::Scatter(scatter) => scatter.x.len(),
            })
            .sum()
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
