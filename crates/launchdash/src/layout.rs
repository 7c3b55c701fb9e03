//! Page layout.
//!
//! The layout is a serializable description of the page: heading, the site
//! dropdown, the payload slider and the two graph regions. The browser page
//! fetches it from `/api/layout` and builds its controls from it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::{SiteCatalog, SiteOption, ALL_SITES};
use crate::config::UiConfig;
use crate::dataset::LaunchTable;
use crate::reactive::{InputId, OutputId};

/// The site dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownSpec {
    /// Element id.
    pub id: &'static str,
    /// Entries, "All Sites" first.
    pub options: Vec<SiteOption>,
    /// Initially selected value.
    pub value: String,
    /// Text shown with nothing selected.
    pub placeholder: &'static str,
    /// Whether typing filters the entries.
    pub searchable: bool,
}

/// The payload range slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSliderSpec {
    /// Element id.
    pub id: &'static str,
    /// Smallest selectable payload.
    pub min: f64,
    /// Largest selectable payload.
    pub max: f64,
    /// Handle step.
    pub step: f64,
    /// Tick labels keyed by their position.
    pub marks: BTreeMap<String, String>,
    /// Initial `[low, high]`.
    pub value: [f64; 2],
}

/// Everything the page needs to build itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    /// Page heading.
    pub title: String,
    /// Site selector.
    pub dropdown: DropdownSpec,
    /// Pie graph element id.
    pub pie_graph_id: &'static str,
    /// Payload selector.
    pub slider: RangeSliderSpec,
    /// Scatter graph element id.
    pub scatter_graph_id: &'static str,
}

impl DashboardLayout {
    /// Assemble the layout for `table`.
    #[must_use]
    pub fn build(table: &LaunchTable, catalog: &SiteCatalog, ui: &UiConfig) -> Self {
        let bounds = table.payload_bounds();
        let (min, max) = (bounds.low(), bounds.high());
        let marks = [min, max]
            .into_iter()
            .map(|v| (v.to_string(), v.to_string()))
            .collect();

        Self {
            title: ui.title.clone(),
            dropdown: DropdownSpec {
                id: InputId::SiteDropdown.id(),
                options: catalog.options(),
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site",
                searchable: true,
            },
            pie_graph_id: OutputId::PieChart.id(),
            slider: RangeSliderSpec {
                id: InputId::PayloadSlider.id(),
                min,
                max,
                step: ui.slider_step,
                marks,
                value: [min, max],
            },
            scatter_graph_id: OutputId::ScatterChart.id(),
        }
    }
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
<style>
  body { font-family: sans-serif; margin: 2rem; }
  h1 { text-align: center; }
  .slider { display: flex; gap: 1rem; align-items: center; margin: 1rem 0; }
  .slider input[type=range] { flex: 1; }
  .marks { display: flex; justify-content: space-between; font-size: 0.85rem; }
  .graph-error { color: #b00020; padding: 1rem; border: 1px solid #b00020; }
</style>
</head>
<body>
<h1>{{TITLE}}</h1>
<input type="search" id="site-search" hidden>
<select id="site-dropdown"></select>
<div id="success-pie-chart"></div>
<div class="slider">
  <input type="range" id="payload-low">
  <input type="range" id="payload-high">
</div>
<div class="marks"><span id="mark-min"></span><span id="mark-max"></span></div>
<div id="success-payload-scatter-chart"></div>
<script>
(async function () {
  const layout = await (await fetch("/api/layout")).json();
  const dropdown = document.getElementById(layout.dropdown.id);
  for (const opt of layout.dropdown.options) {
    const el = document.createElement("option");
    el.value = opt.value;
    el.textContent = opt.label;
    dropdown.appendChild(el);
  }
  const blank = document.createElement("option");
  blank.value = "";
  blank.textContent = layout.dropdown.placeholder;
  blank.disabled = true;
  blank.hidden = true;
  dropdown.prepend(blank);
  dropdown.value = layout.dropdown.value;

  if (layout.dropdown.searchable) {
    const search = document.getElementById("site-search");
    search.hidden = false;
    search.placeholder = layout.dropdown.placeholder;
    search.addEventListener("input", () => {
      const query = search.value.toLowerCase();
      for (const el of dropdown.options) {
        if (el === blank) continue;
        el.hidden = !el.textContent.toLowerCase().includes(query);
      }
    });
  }

  // Handles move freely; values snap to the step grid or to either end.
  const s = layout.slider;
  const low = document.getElementById("payload-low");
  const high = document.getElementById("payload-high");
  function snap(v) {
    v = Math.min(Math.max(Number(v), s.min), s.max);
    const stepped = Math.min(s.min + Math.round((v - s.min) / s.step) * s.step, s.max);
    return [stepped, s.min, s.max].reduce((a, b) => Math.abs(b - v) < Math.abs(a - v) ? b : a);
  }
  for (const h of [low, high]) { h.min = s.min; h.max = s.max; h.step = "any"; }
  low.value = s.value[0];
  high.value = s.value[1];
  document.getElementById("mark-min").textContent = s.min;
  document.getElementById("mark-max").textContent = s.max;

  function show(outputs) {
    for (const [id, out] of Object.entries(outputs)) {
      const el = document.getElementById(id);
      if (out.figure) {
        Plotly.react(el, out.figure.data, out.figure.layout);
      } else {
        Plotly.purge(el);
        el.innerHTML = '<div class="graph-error"></div>';
        el.firstChild.textContent = out.error;
      }
    }
  }

  async function update(changed) {
    const resp = await fetch("/api/update", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({
        changed: changed,
        site: dropdown.value,
        payload: [Number(low.value), Number(high.value)],
      }),
    });
    show((await resp.json()).outputs);
  }

  dropdown.addEventListener("change", () => update([layout.dropdown.id]));
  low.addEventListener("input", () => {
    low.value = snap(low.value);
    if (Number(low.value) > Number(high.value)) low.value = high.value;
  });
  high.addEventListener("input", () => {
    high.value = snap(high.value);
    if (Number(high.value) < Number(low.value)) high.value = low.value;
  });
  for (const h of [low, high]) {
    h.addEventListener("change", () => update([s.id]));
  }

  show((await (await fetch("/api/initial")).json()).outputs);
})();
</script>
</body>
</html>
"#;

/// Render the HTML shell for `layout`.
#[must_use]
pub fn render_page(layout: &DashboardLayout) -> String {
    PAGE_TEMPLATE.replace("{{TITLE}}", &escape_html(&layout.title))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
