/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  Vec<LaunchRecord>, read-only
///   └─────────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │      │ aggregate  │
///   └──────────┘      └───────────┘
///   payload + site     per-site / per-class
///   → record indices   → pie summary
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
