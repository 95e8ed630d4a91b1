use super::model::{LaunchTable, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Scatter filter: payload window, then site
// ---------------------------------------------------------------------------

/// Records behind the scatter chart, plus the chart title.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub title: String,
    /// Indices into the table, in table order.
    pub indices: Vec<usize>,
}

/// Return indices of records that pass the scatter filters.
///
/// A record passes when:
/// * its payload lies inside `range` (both ends inclusive), and
/// * the selection is every site, or the record's site equals the selected one.
///
/// Inverted bounds or an unknown site simply yield no indices.
pub fn scatter_filter(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Filter for the scatter chart and attach the title for the selection.
pub fn scatter_view(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: PayloadRange,
) -> ScatterView {
    let title = match selection {
        SiteSelection::AllSites => {
            "Correlation between Payload and Success for all Sites".to_string()
        }
        SiteSelection::Site(site) => format!("Payload vs. Outcome for {site}"),
    };
    ScatterView {
        title,
        indices: scatter_filter(table, selection, range),
    }
}
