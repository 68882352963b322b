/// Data layer: FSC extraction, table building and crossing interpolation.
///
/// Architecture:
/// ```text
///  postprocess.star
///        │
///        ▼
///   ┌──────────┐
///   │  block    │  data_fsc … data_guinier → block lines
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  _rln declarations → ColumnSchema, data rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  all-or-nothing numeric rows → FscTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ interpolate  │  first 0.143 / 0.5 crossings → CrossingResult
///   └─────────────┘
/// ```
/// `loader` chains the stages; `curves` picks what the viewer draws.

pub mod block;
pub mod curves;
pub mod error;
pub mod interpolate;
pub mod loader;
pub mod model;
pub mod schema;
