/// Data layer: loading, filtering, and chart aggregation.
///
/// Architecture:
/// ```text
///   ufo2.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse, drop Index, parse Date, sort → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Sighting>, option lists, date bounds (Arc, read-only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  colour / shape / date range → FilteredView
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌──────────┐
///   │ aggregate  │  │  export   │
///   └───────────┘  └──────────┘
///    ChartSet       filtered CSV
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
