//! Chart adapter: summary/filtered tables → Plotly figure descriptions.
//!
//! The browser hands each [`Figure`] straight to `Plotly.react`, so the
//! serialized shape follows Plotly's `{data: [...], layout: {...}}` schema.

use serde::Serialize;

use crate::color::ColorMap;
use crate::data::aggregate::ProportionSummary;
use crate::data::filter::ScatterView;
use crate::data::model::{CLASS_COLUMN, LaunchTable, PAYLOAD_COLUMN, SITE_COLUMN};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Keep slices in summary order instead of Plotly's size ordering.
    pub sort: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub legendgroup: String,
    pub mode: &'static str,
    pub x: Vec<f64>,
    pub y: Vec<u8>,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

fn title(text: impl Into<String>) -> Title {
    Title { text: text.into() }
}

impl Layout {
    fn titled(text: impl Into<String>) -> Self {
        Self {
            title: title(text),
            xaxis: None,
            yaxis: None,
            legend: None,
        }
    }
}

/// A figure with no traces, shown before a site has been picked.
pub fn empty_figure(text: &str) -> Figure {
    Figure {
        data: Vec::new(),
        layout: Layout::titled(text),
    }
}

/// Pie chart of a proportion summary.
///
/// Site slices take their colours from `site_colors`; per-class slices keep
/// Plotly's defaults.
pub fn pie_figure(summary: &ProportionSummary, site_colors: &ColorMap) -> Figure {
    let marker = (summary.names_column == SITE_COLUMN).then(|| Marker {
        colors: Some(
            summary
                .slices
                .iter()
                .map(|s| site_colors.color_for(&s.name).to_string())
                .collect(),
        ),
        ..Marker::default()
    });

    let trace = PieTrace {
        labels: summary.slices.iter().map(|s| s.name.clone()).collect(),
        values: summary.slices.iter().map(|s| s.value).collect(),
        sort: false,
        marker,
    };

    let mut layout = Layout::titled(summary.title.clone());
    layout.legend = Some(Legend {
        title: title(summary.names_column),
    });

    Figure {
        data: vec![Trace::Pie(trace)],
        layout,
    }
}

/// Scatter of payload (x) against outcome class (y), one trace per booster
/// category present in the view, in colour-map order.
pub fn scatter_figure(table: &LaunchTable, view: &ScatterView, categories: &ColorMap) -> Figure {
    let data = categories
        .categories()
        .iter()
        .filter_map(|category| {
            let (x, y): (Vec<f64>, Vec<u8>) = view
                .indices
                .iter()
                .map(|&i| &table.records[i])
                .filter(|r| r.booster_version_category == *category)
                .map(|r| (r.payload_mass_kg, r.class))
                .unzip();
            if x.is_empty() {
                return None;
            }
            Some(Trace::Scatter(ScatterTrace {
                name: category.clone(),
                legendgroup: category.clone(),
                mode: "markers",
                x,
                y,
                marker: Marker {
                    color: Some(categories.color_for(category).to_string()),
                    ..Marker::default()
                },
            }))
        })
        .collect();

    Figure {
        data,
        layout: Layout {
            title: title(view.title.clone()),
            xaxis: Some(Axis {
                title: title(PAYLOAD_COLUMN),
            }),
            yaxis: Some(Axis {
                title: title(CLASS_COLUMN),
            }),
            legend: Some(Legend {
                title: title(categories.column.clone()),
            }),
        },
    }
}
