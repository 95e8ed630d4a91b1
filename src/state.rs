use serde::Serialize;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::model::{
    ALL_SITES, BOOSTER_CATEGORY_COLUMN, LaunchTable, PayloadRange, SITE_COLUMN,
};

// ---------------------------------------------------------------------------
// Derived constants
// ---------------------------------------------------------------------------

/// One entry of the site dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// Values computed once from the table that feed the controls.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedConstants {
    /// "All" first, then each distinct site in order of first appearance.
    pub site_options: Vec<SiteOption>,
    pub min_payload: f64,
    pub max_payload: f64,
}

impl DerivedConstants {
    pub fn from_table(table: &LaunchTable) -> Self {
        let site_options = std::iter::once(ALL_SITES)
            .chain(table.distinct_sites())
            .map(|site| SiteOption {
                label: site.to_string(),
                value: site.to_string(),
            })
            .collect();
        // The loader never hands out an empty table.
        let (min_payload, max_payload) = table.payload_bounds().unwrap_or((0.0, 0.0));

        Self {
            site_options,
            min_payload,
            max_payload,
        }
    }

    /// Default slider position: the whole dataset.
    pub fn full_range(&self) -> PayloadRange {
        PayloadRange::new(self.min_payload, self.max_payload)
    }
}

// ---------------------------------------------------------------------------
// Application context
// ---------------------------------------------------------------------------

/// Everything a request handler needs, built once at startup and only ever
/// borrowed immutably afterwards.
pub struct AppContext {
    pub config: DashboardConfig,
    pub table: LaunchTable,
    pub constants: DerivedConstants,
    /// Colours for pie slices in every-site mode.
    pub site_colors: ColorMap,
    /// Colours for scatter traces.
    pub category_colors: ColorMap,
}

impl AppContext {
    pub fn new(config: DashboardConfig, table: LaunchTable) -> Self {
        let constants = DerivedConstants::from_table(&table);
        let site_colors = ColorMap::new(SITE_COLUMN, table.distinct_sites());

        // Sorted so the legend order is stable regardless of file order.
        let mut categories = table.distinct_booster_categories();
        categories.sort_unstable();
        let category_colors = ColorMap::new(BOOSTER_CATEGORY_COLUMN, categories);

        log::info!(
            "{} launches, {} sites, payload {}..={} kg",
            table.len(),
            constants.site_options.len() - 1,
            constants.min_payload,
            constants.max_payload
        );

        Self {
            config,
            table,
            constants,
            site_colors,
            category_colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    #[test]
    fn site_options_start_with_all() {
        let table = LaunchTable::from_records(vec![
            record("KSC LC-39A", 2490.0, 1, "FT"),
            record("CCAFS LC-40", 0.0, 0, "v1.0"),
            record("KSC LC-39A", 5300.0, 1, "FT"),
        ]);
        let constants = DerivedConstants::from_table(&table);
        let values: Vec<&str> = constants
            .site_options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["All", "KSC LC-39A", "CCAFS LC-40"]);
        assert_eq!(constants.min_payload, 0.0);
        assert_eq!(constants.max_payload, 5300.0);
        assert_eq!(constants.full_range(), PayloadRange::new(0.0, 5300.0));
    }

    #[test]
    fn context_sorts_booster_categories() {
        let table = LaunchTable::from_records(vec![
            record("A", 1.0, 1, "v1.1"),
            record("A", 2.0, 1, "B4"),
            record("A", 3.0, 1, "FT"),
        ]);
        let ctx = AppContext::new(DashboardConfig::default(), table);
        assert_eq!(ctx.category_colors.categories(), ["B4", "FT", "v1.1"]);
        assert_eq!(ctx.site_colors.categories(), ["A"]);
    }
}
