/// Data layer: table model, loading, and label/window resolution.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table   │  numeric columns + label column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  window  │  label subset → extent → [start, start + length) → rows
///   └──────────┘
/// ```

pub mod channel;
pub mod loader;
pub mod model;
pub mod window;
