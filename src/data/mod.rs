/// Data layer: core types, loading, and column resolution.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table → SpectrumSeries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  columns  │  header match → ColumnRoles → numeric (x, y)
///   └──────────┘
/// ```

pub mod columns;
pub mod loader;
pub mod model;
