/// Data layer: core types, loading, caching, filtering, and export.
///
/// Architecture:
/// ```text
///  BOL02 CSV (URL or local file)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + normalize → TrackingTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  TTL snapshot, replaced wholesale on refresh
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  case-insensitive substring AND → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  format   │  DD/MM/YYYY + "Pendiente" → DisplayTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  CSV (UTF-8 BOM) / XLSX, gated by size policy
///   └──────────┘
/// ```

pub mod cache;
pub mod export;
pub mod filter;
pub mod format;
pub mod loader;
pub mod model;
