use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chart::{Figure, empty_figure, pie_figure, scatter_figure};
use crate::data::aggregate::proportion_summary;
use crate::data::filter::scatter_view;
use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::{AppContext, DerivedConstants};
use crate::ui::layout::SITE_PLACEHOLDER;

// ---------------------------------------------------------------------------
// Component ids
// ---------------------------------------------------------------------------

/// Controls whose value changes trigger callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InputId {
    #[serde(rename = "site-dropdown")]
    SiteDropdown,
    #[serde(rename = "payload-slider")]
    PayloadSlider,
}

/// Graphs that callbacks write figures into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OutputId {
    #[serde(rename = "success-pie-chart")]
    SuccessPieChart,
    #[serde(rename = "success-payload-scatter-chart")]
    SuccessPayloadScatterChart,
}

// ---------------------------------------------------------------------------
// Input values
// ---------------------------------------------------------------------------

/// Current value of every control.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    /// `None` while the dropdown still shows its placeholder.
    pub site: Option<SiteSelection>,
    pub payload: PayloadRange,
}

/// Body of `POST /api/update`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRequest {
    /// Controls that changed; empty means "render everything".
    pub changed: Vec<InputId>,
    pub site: Option<String>,
    pub payload: Option<[f64; 2]>,
}

impl UpdateRequest {
    /// Resolve wire values, falling back to the full payload range.
    pub fn inputs(&self, constants: &DerivedConstants) -> Inputs {
        Inputs {
            site: self.site.as_deref().map(SiteSelection::parse),
            payload: self
                .payload
                .map(PayloadRange::from)
                .unwrap_or_else(|| constants.full_range()),
        }
    }
}

// ---------------------------------------------------------------------------
// Callback registry
// ---------------------------------------------------------------------------

pub type Handler = fn(&AppContext, &Inputs) -> Figure;

/// One output bound to the inputs that recompute it.
pub struct Callback {
    pub output: OutputId,
    pub inputs: Vec<InputId>,
    handler: Handler,
}

impl Callback {
    fn triggered_by(&self, changed: &[InputId]) -> bool {
        changed.is_empty() || self.inputs.iter().any(|i| changed.contains(i))
    }
}

/// Dispatch table from input changes to output figures.
#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's wiring: the pie follows the site, the scatter follows
    /// the site and the payload range.
    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry
            .register(
                OutputId::SuccessPieChart,
                &[InputId::SiteDropdown],
                success_pie_chart,
            )
            .register(
                OutputId::SuccessPayloadScatterChart,
                &[InputId::SiteDropdown, InputId::PayloadSlider],
                success_payload_scatter_chart,
            );
        registry
    }

    pub fn register(&mut self, output: OutputId, inputs: &[InputId], handler: Handler) -> &mut Self {
        self.callbacks.push(Callback {
            output,
            inputs: inputs.to_vec(),
            handler,
        });
        self
    }

    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// Run every callback with an input in `changed` (all of them when
    /// `changed` is empty) and collect the resulting figures.
    pub fn dispatch(
        &self,
        ctx: &AppContext,
        changed: &[InputId],
        inputs: &Inputs,
    ) -> BTreeMap<OutputId, Figure> {
        self.callbacks
            .iter()
            .filter(|cb| cb.triggered_by(changed))
            .map(|cb| {
                log::debug!("{:?} <- {:?} with {:?}", cb.output, changed, inputs);
                (cb.output, (cb.handler)(ctx, inputs))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Pie: success weight per site, or outcome split for one site.
pub fn success_pie_chart(ctx: &AppContext, inputs: &Inputs) -> Figure {
    match &inputs.site {
        Some(selection) => pie_figure(
            &proportion_summary(&ctx.table, selection),
            &ctx.site_colors,
        ),
        None => empty_figure(SITE_PLACEHOLDER),
    }
}

/// Scatter: payload vs. outcome inside the slider range.
pub fn success_payload_scatter_chart(ctx: &AppContext, inputs: &Inputs) -> Figure {
    match &inputs.site {
        Some(selection) => scatter_figure(
            &ctx.table,
            &scatter_view(&ctx.table, selection, inputs.payload),
            &ctx.category_colors,
        ),
        None => empty_figure(SITE_PLACEHOLDER),
    }
}
