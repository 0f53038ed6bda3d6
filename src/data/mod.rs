/// Data layer: core types, loading, and channel classification.
///
/// Architecture:
/// ```text
///     recording.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse, drop bad-time rows, sort, ignore rules → SignalTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  name → role, ECG mV/μV derivation → ClassifiedChannels
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
