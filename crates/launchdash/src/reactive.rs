//! Control-to-chart dependency graph.
//!
//! Each chart output is a [`Node`] that names the controls it reads and a
//! pure function computing its figure. When controls change, the
//! [`Dashboard`] re-runs exactly the nodes that read one of them and returns
//! the fresh figures. Nothing is cached between calls: every evaluation reads
//! the shared, immutable [`LaunchTable`] and the control state it is given.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::SiteSelection;
use crate::chart::{pie_chart, scatter_chart, Figure, PieStyle};
use crate::dataset::{LaunchTable, PayloadRange};
use crate::error::{Error, Result};

/// A declared control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputId {
    /// The launch site dropdown.
    SiteDropdown,
    /// The payload range slider.
    PayloadSlider,
}

impl InputId {
    /// Every declared control.
    pub const ALL: [InputId; 2] = [Self::SiteDropdown, Self::PayloadSlider];

    /// Element id used by the page.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::SiteDropdown => "site-dropdown",
            Self::PayloadSlider => "payload-slider",
        }
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for InputId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|input| input.id() == s)
            .ok_or_else(|| Error::UnknownControl(s.to_string()))
    }
}

/// A chart display region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OutputId {
    /// The outcome pie.
    #[serde(rename = "success-pie-chart")]
    PieChart,
    /// The payload scatter plot.
    #[serde(rename = "success-payload-scatter-chart")]
    ScatterChart,
}

impl OutputId {
    /// Element id used by the page.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::PieChart => "success-pie-chart",
            Self::ScatterChart => "success-payload-scatter-chart",
        }
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Current value of every control.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    /// Site dropdown value.
    pub site: SiteSelection,
    /// Payload slider value.
    pub payload: PayloadRange,
}

impl ControlState {
    /// State shown before any interaction: every site, full payload range.
    #[must_use]
    pub fn initial(table: &LaunchTable) -> Self {
        Self {
            site: SiteSelection::All,
            payload: table.payload_bounds(),
        }
    }
}

/// Read-only inputs shared by every node.
#[derive(Debug, Clone)]
pub struct Context {
    /// The launch table.
    pub table: Arc<LaunchTable>,
    /// Pie presentation.
    pub pie_style: PieStyle,
}

type ComputeFn = fn(&Context, &ControlState) -> Result<Figure>;

/// One output and the controls it depends on.
#[derive(Clone, Copy)]
pub struct Node {
    /// The output this node produces.
    pub output: OutputId,
    /// Controls whose change re-runs this node.
    pub inputs: &'static [InputId],
    compute: ComputeFn,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("output", &self.output)
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// Check whether this node reads `input`.
    #[must_use]
    pub fn depends_on(&self, input: InputId) -> bool {
        self.inputs.contains(&input)
    }
}

fn compute_pie(ctx: &Context, state: &ControlState) -> Result<Figure> {
    Ok(pie_chart(&ctx.table, &state.site, &ctx.pie_style))
}

fn compute_scatter(ctx: &Context, state: &ControlState) -> Result<Figure> {
    Ok(scatter_chart(&ctx.table, &state.site, &state.payload))
}

/// The static set of nodes.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<Node>,
}

impl DependencyGraph {
    /// The dashboard wiring: pie reads the site; scatter reads site and payload.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            nodes: vec![
                Node {
                    output: OutputId::PieChart,
                    inputs: &[InputId::SiteDropdown],
                    compute: compute_pie,
                },
                Node {
                    output: OutputId::ScatterChart,
                    inputs: &[InputId::SiteDropdown, InputId::PayloadSlider],
                    compute: compute_scatter,
                },
            ],
        }
    }

    /// All nodes, in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes reading at least one of `changed`, in declaration order.
    pub fn dependents<'a>(&'a self, changed: &'a [InputId]) -> impl Iterator<Item = &'a Node> {
        self.nodes
            .iter()
            .filter(move |node| changed.iter().any(|input| node.depends_on(*input)))
    }

    /// The node producing `output`.
    #[must_use]
    pub fn node(&self, output: OutputId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.output == output)
    }
}

/// The result of re-running one node.
#[derive(Debug)]
pub struct OutputUpdate {
    /// Output that was recomputed.
    pub output: OutputId,
    /// The new figure, or why it could not be produced.
    pub result: Result<Figure>,
}

/// Drives the dependency graph against the shared launch table.
#[derive(Debug, Clone)]
pub struct Dashboard {
    context: Context,
    graph: DependencyGraph,
}

impl Dashboard {
    /// Create a dashboard over `table` with the standard wiring.
    #[must_use]
    pub fn new(table: Arc<LaunchTable>, pie_style: PieStyle) -> Self {
        Self::with_graph(table, pie_style, DependencyGraph::standard())
    }

    /// Create a dashboard with custom wiring.
    #[must_use]
    pub(crate) fn with_graph(table: Arc<LaunchTable>, pie_style: PieStyle, graph: DependencyGraph) -> Self {
        Self {
            context: Context { table, pie_style },
            graph,
        }
    }

    /// The launch table.
    #[must_use]
    pub fn table(&self) -> &LaunchTable {
        &self.context.table
    }

    /// The wiring.
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Control state before any interaction.
    #[must_use]
    pub fn initial_state(&self) -> ControlState {
        ControlState::initial(self.table())
    }

    /// Evaluate every node once against the initial state.
    #[must_use]
    pub fn initial_render(&self) -> Vec<OutputUpdate> {
        let state = self.initial_state();
        self.graph
            .nodes()
            .iter()
            .map(|node| self.run(node, &state))
            .collect()
    }

    /// Re-run every node that reads one of `changed`.
    #[must_use]
    pub fn on_change(&self, changed: &[InputId], state: &ControlState) -> Vec<OutputUpdate> {
        debug!(?changed, site = %state.site, "Controls changed");
        self.graph
            .dependents(changed)
            .map(|node| self.run(node, state))
            .collect()
    }

    /// Evaluate a single output.
    ///
    /// # Errors
    ///
    /// Returns an error if the output is not wired or its computation fails.
    pub fn evaluate(&self, output: OutputId, state: &ControlState) -> Result<Figure> {
        let node = self
            .graph
            .node(output)
            .ok_or_else(|| Error::internal(format!("no node produces {output}")))?;
        self.run(node, state).result
    }

    /// Run one node, turning a panic into a render error for that output.
    fn run(&self, node: &Node, state: &ControlState) -> OutputUpdate {
        let result = panic::catch_unwind(AssertUnwindSafe(|| (node.compute)(&self.context, state)))
            .unwrap_or_else(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(ToString::to_string)
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "computation panicked".to_string());
                Err(Error::render(node.output.id(), message))
            });
        if let Err(err) = &result {
            warn!(output = %node.output, "Render failed: {err}");
        }
        OutputUpdate {
            output: node.output,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Trace;
    use crate::dataset::tests::sample_table;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(sample_table()), PieStyle::default())
    }

    fn outputs(updates: &[OutputUpdate]) -> Vec<OutputId> {
        updates.iter().map(|u| u.output).collect()
    }

    #[test]
    fn test_input_id_round_trip() {
        for input in InputId::ALL {
            assert_eq!(input.id().parse::<InputId>().unwrap(), input);
        }
    }

    #[test]
    fn test_unknown_input_id() {
        let err = "volume-knob".parse::<InputId>().unwrap_err();
        assert!(matches!(err, Error::UnknownControl(_)));
    }

    #[test]
    fn test_output_ids() {
        assert_eq!(OutputId::PieChart.to_string(), "success-pie-chart");
        assert_eq!(
            serde_json::to_string(&OutputId::ScatterChart).unwrap(),
            "\"success-payload-scatter-chart\""
        );
    }

    #[test]
    fn test_standard_graph_edges() {
        let graph = DependencyGraph::standard();
        let pie = graph.node(OutputId::PieChart).unwrap();
        let scatter = graph.node(OutputId::ScatterChart).unwrap();

        assert!(pie.depends_on(InputId::SiteDropdown));
        assert!(!pie.depends_on(InputId::PayloadSlider));
        assert!(scatter.depends_on(InputId::SiteDropdown));
        assert!(scatter.depends_on(InputId::PayloadSlider));
    }

    #[test]
    fn test_each_output_produced_once() {
        let graph = DependencyGraph::standard();
        for output in [OutputId::PieChart, OutputId::ScatterChart] {
            let count = graph.nodes().iter().filter(|n| n.output == output).count();
            assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_initial_state() {
        let dash = dashboard();
        let state = dash.initial_state();
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload, dash.table().payload_bounds());
    }

    #[test]
    fn test_initial_render_runs_every_output() {
        let dash = dashboard();
        let updates = dash.initial_render();
        assert_eq!(
            outputs(&updates),
            vec![OutputId::PieChart, OutputId::ScatterChart]
        );
        assert!(updates.iter().all(|u| u.result.is_ok()));

        let scatter = updates[1].result.as_ref().unwrap();
        assert_eq!(scatter.mark_count(), dash.table().len());
    }

    #[test]
    fn test_slider_change_reruns_scatter_only() {
        let dash = dashboard();
        let state = ControlState {
            site: SiteSelection::All,
            payload: PayloadRange::new(0.0, 1000.0).unwrap(),
        };
        let updates = dash.on_change(&[InputId::PayloadSlider], &state);
        assert_eq!(outputs(&updates), vec![OutputId::ScatterChart]);
        assert_eq!(updates[0].result.as_ref().unwrap().mark_count(), 3);
    }

    #[test]
    fn test_site_change_reruns_both() {
        let dash = dashboard();
        let state = ControlState {
            site: SiteSelection::parse("KSC LC-39A"),
            payload: dash.table().payload_bounds(),
        };
        let updates = dash.on_change(&[InputId::SiteDropdown], &state);
        assert_eq!(
            outputs(&updates),
            vec![OutputId::PieChart, OutputId::ScatterChart]
        );
        let pie = updates[0].result.as_ref().unwrap();
        assert_eq!(pie.layout.title.text, "Success Launches - KSC LC-39A");
    }

    #[test]
    fn test_no_change_reruns_nothing() {
        let dash = dashboard();
        let updates = dash.on_change(&[], &dash.initial_state());
        assert!(updates.is_empty());
    }

    #[test]
    fn test_evaluate_matches_on_change() {
        let dash = dashboard();
        let state = dash.initial_state();
        let direct = dash.evaluate(OutputId::PieChart, &state).unwrap();
        let via_change = dash
            .on_change(&[InputId::SiteDropdown], &state)
            .remove(0)
            .result
            .unwrap();
        assert_eq!(direct, via_change);
        assert!(matches!(direct.data[0], Trace::Pie(_)));
    }

    fn explode(_: &Context, _: &ControlState) -> Result<Figure> {
        panic!("unexpected category");
    }

    #[test]
    fn test_panicking_node_fails_only_its_output() {
        let graph = DependencyGraph {
            nodes: vec![
                Node {
                    output: OutputId::PieChart,
                    inputs: &[InputId::SiteDropdown],
                    compute: explode,
                },
                Node {
                    output: OutputId::ScatterChart,
                    inputs: &[InputId::SiteDropdown],
                    compute: compute_scatter,
                },
            ],
        };
        let dash = Dashboard::with_graph(Arc::new(sample_table()), PieStyle::default(), graph);
        let updates = dash.on_change(&[InputId::SiteDropdown], &dash.initial_state());

        let err = updates[0].result.as_ref().unwrap_err();
        assert!(err.to_string().contains("unexpected category"));
        assert!(updates[1].result.is_ok());
    }
}
