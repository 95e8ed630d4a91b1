// ---------------------------------------------------------------------------
// Column names as they appear in the source file
// ---------------------------------------------------------------------------

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";

/// Wire value of the synthetic "every site" option.
pub const ALL_SITES: &str = "All";

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site identifier.
    pub site: String,
    /// Payload mass in kilograms, always finite and non-negative.
    pub payload_mass_kg: f64,
    /// Outcome class: 1 = successful landing, 0 = not.
    pub class: u8,
    /// Booster variant label, used as the scatter colour dimension.
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All launch records in file order. Never mutated after load.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    pub records: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct site identifiers in order of first appearance.
    pub fn distinct_sites(&self) -> Vec<&str> {
        distinct_in_order(self.records.iter().map(|r| r.site.as_str()))
    }

    /// Distinct booster categories in order of first appearance.
    pub fn distinct_booster_categories(&self) -> Vec<&str> {
        distinct_in_order(
            self.records
                .iter()
                .map(|r| r.booster_version_category.as_str()),
        )
    }

    /// `(min, max)` payload mass, or `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let min = self
            .records
            .iter()
            .map(|r| r.payload_mass_kg)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .records
            .iter()
            .map(|r| r.payload_mass_kg)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

// ---------------------------------------------------------------------------
// SiteSelection – value of the site dropdown
// ---------------------------------------------------------------------------

/// What the site selector currently points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    AllSites,
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value. Only the exact sentinel means "every site";
    /// anything else is taken as a site identifier, known or not.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::AllSites
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Whether a record belongs to this selection.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::AllSites => true,
            SiteSelection::Site(site) => record.site == *site,
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – value of the range slider
// ---------------------------------------------------------------------------

/// Inclusive payload bounds. Inverted bounds are allowed and match nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub lower: f64,
    pub upper: f64,
}

impl PayloadRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.lower <= payload_mass_kg && payload_mass_kg <= self.upper
    }
}

impl From<[f64; 2]> for PayloadRange {
    fn from([lower, upper]: [f64; 2]) -> Self {
        Self { lower, upper }
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload_mass_kg: f64, class: u8, category: &str) -> LaunchRecord {
    LaunchRecord {
        site: site.to_string(),
        payload_mass_kg,
        class,
        booster_version_category: category.to_string(),
    }
}
