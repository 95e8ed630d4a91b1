use serde::Serialize;

use crate::state::{AppContext, SiteOption};
use crate::ui::callbacks::{CallbackRegistry, InputId, OutputId};

pub const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

// ---------------------------------------------------------------------------
// Page description served at /api/layout
// ---------------------------------------------------------------------------

/// Everything the page needs to build its controls and graphs.
#[derive(Debug, Clone, Serialize)]
pub struct PageLayout {
    pub heading: String,
    pub site_dropdown: Dropdown,
    pub payload_slider: RangeSlider,
    pub graphs: Vec<OutputId>,
    pub callbacks: Vec<CallbackWiring>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dropdown {
    pub id: InputId,
    pub options: Vec<SiteOption>,
    pub placeholder: &'static str,
    pub searchable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeSlider {
    pub id: InputId,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct CallbackWiring {
    pub output: OutputId,
    pub inputs: Vec<InputId>,
}

impl PageLayout {
    pub fn build(ctx: &AppContext, registry: &CallbackRegistry) -> Self {
        let constants = &ctx.constants;
        Self {
            heading: ctx.config.heading.clone(),
            site_dropdown: Dropdown {
                id: InputId::SiteDropdown,
                options: constants.site_options.clone(),
                placeholder: SITE_PLACEHOLDER,
                searchable: true,
            },
            payload_slider: RangeSlider {
                id: InputId::PayloadSlider,
                label: "Payload range (Kg):",
                min: constants.min_payload,
                max: constants.max_payload,
                step: ctx.config.payload_step,
                value: [constants.min_payload, constants.max_payload],
            },
            graphs: registry.callbacks().iter().map(|cb| cb.output).collect(),
            callbacks: registry
                .callbacks()
                .iter()
                .map(|cb| CallbackWiring {
                    output: cb.output,
                    inputs: cb.inputs.clone(),
                })
                .collect(),
        }
    }
}
