use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{CLASS_COLUMN, LaunchTable, SITE_COLUMN, SiteSelection};

/// One slice of the proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub name: String,
    pub value: u64,
}

/// Summary table behind the pie chart.
///
/// Every-site mode sums the raw `class` values per site, so a site's weight
/// is its number of successful landings. Single-site mode counts records per
/// outcome class instead. Both shapes are kept on purpose: the first compares
/// sites, the second breaks one site down by outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionSummary {
    pub title: String,
    /// Column whose values label the slices.
    pub names_column: &'static str,
    /// Column whose values size the slices.
    pub values_column: &'static str,
    pub slices: Vec<Slice>,
}

/// Build the pie-chart summary for the current site selection.
pub fn proportion_summary(table: &LaunchTable, selection: &SiteSelection) -> ProportionSummary {
    match selection {
        SiteSelection::AllSites => success_weight_by_site(table),
        SiteSelection::Site(site) => outcome_counts_for_site(table, site),
    }
}

/// One slice per site (first-appearance order), sized by the sum of `class`.
fn success_weight_by_site(table: &LaunchTable) -> ProportionSummary {
    let slices = table
        .distinct_sites()
        .into_iter()
        .map(|site| Slice {
            name: site.to_string(),
            value: table
                .records
                .iter()
                .filter(|r| r.site == site)
                .map(|r| u64::from(r.class))
                .sum(),
        })
        .collect();

    ProportionSummary {
        title: "Total Success Launches By Site".to_string(),
        names_column: SITE_COLUMN,
        values_column: CLASS_COLUMN,
        slices,
    }
}

/// One slice per outcome class present at `site`, ascending, sized by count.
fn outcome_counts_for_site(table: &LaunchTable, site: &str) -> ProportionSummary {
    let mut counts: BTreeMap<u8, u64> = BTreeMap::new();
    for rec in table.records.iter().filter(|r| r.site == site) {
        *counts.entry(rec.class).or_default() += 1;
    }

    ProportionSummary {
        title: format!("Total Success Launches for site {site}"),
        names_column: CLASS_COLUMN,
        values_column: "count",
        slices: counts
            .into_iter()
            .map(|(class, count)| Slice {
                name: class.to_string(),
                value: count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::record;

    fn total(summary: &ProportionSummary) -> u64 {
        summary.slices.iter().map(|s| s.value).sum()
    }

    fn two_site_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            record("A", 100.0, 1, "FT"),
            record("A", 200.0, 0, "FT"),
            record("A", 300.0, 1, "B4"),
            record("B", 400.0, 1, "B5"),
        ])
    }

    fn slice(name: &str, value: u64) -> Slice {
        Slice {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn all_sites_sums_class_per_site() {
        let summary = proportion_summary(&two_site_table(), &SiteSelection::AllSites);
        assert_eq!(summary.slices, vec![slice("A", 2), slice("B", 1)]);
        assert_eq!(summary.names_column, "Launch Site");
        assert_eq!(summary.values_column, "class");
        assert_eq!(summary.title, "Total Success Launches By Site");
    }

    #[test]
    fn all_sites_keeps_sites_without_successes() {
        let table = LaunchTable::from_records(vec![
            record("A", 100.0, 0, "FT"),
            record("B", 400.0, 1, "B5"),
        ]);
        let summary = proportion_summary(&table, &SiteSelection::AllSites);
        assert_eq!(summary.slices, vec![slice("A", 0), slice("B", 1)]);
    }

    #[test]
    fn single_site_counts_per_class() {
        let summary =
            proportion_summary(&two_site_table(), &SiteSelection::Site("A".to_string()));
        assert_eq!(summary.slices, vec![slice("0", 1), slice("1", 2)]);
        assert_eq!(summary.names_column, "class");
        assert_eq!(summary.values_column, "count");
        assert_eq!(summary.title, "Total Success Launches for site A");
    }

    #[test]
    fn single_site_omits_absent_classes() {
        let summary =
            proportion_summary(&two_site_table(), &SiteSelection::Site("B".to_string()));
        assert_eq!(summary.slices, vec![slice("1", 1)]);
    }

    #[test]
    fn unknown_site_gives_empty_summary() {
        let summary =
            proportion_summary(&two_site_table(), &SiteSelection::Site("Z".to_string()));
        assert!(summary.slices.is_empty());
        assert_eq!(summary.title, "Total Success Launches for site Z");
    }

    fn arb_table() -> impl Strategy<Value = LaunchTable> {
        prop::collection::vec((0usize..3, 0u8..=1), 0..40).prop_map(|rows| {
            LaunchTable::from_records(
                rows.into_iter()
                    .map(|(site, class)| record(["A", "B", "C"][site], 0.0, class, "FT"))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn all_sites_weights_match_class_sums(table in arb_table()) {
            let summary = proportion_summary(&table, &SiteSelection::AllSites);
            prop_assert_eq!(summary.slices.len(), table.distinct_sites().len());
            for s in &summary.slices {
                let expected: u64 = table
                    .records
                    .iter()
                    .filter(|r| r.site == s.name)
                    .map(|r| r.class as u64)
                    .sum();
                prop_assert_eq!(s.value, expected);
            }
            let successes = table.records.iter().filter(|r| r.class == 1).count() as u64;
            prop_assert_eq!(total(&summary), successes);
        }

        #[test]
        fn single_site_counts_cover_that_site_only(
            table in arb_table(),
            site in "[A-D]",
        ) {
            let summary = proportion_summary(&table, &SiteSelection::Site(site.clone()));
            let at_site = table.records.iter().filter(|r| r.site == site).count() as u64;
            prop_assert_eq!(total(&summary), at_site);
            for s in &summary.slices {
                prop_assert!(s.name == "0" || s.name == "1");
                prop_assert!(s.value > 0);
            }
        }

        #[test]
        fn summary_is_idempotent(table in arb_table(), site in "[A-C]|All") {
            let selection = SiteSelection::parse(&site);
            prop_assert_eq!(
                proportion_summary(&table, &selection),
                proportion_summary(&table, &selection)
            );
        }
    }
}
