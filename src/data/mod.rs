/// Data layer: core types, loading, column resolution and cleaning.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  columns │  header → ResolvedColumns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean   │  strip currency, drop unusable rows → PricedListing
///   └──────────┘
/// ```

pub mod clean;
pub mod columns;
pub mod loader;
pub mod model;
