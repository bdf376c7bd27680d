//! Data layer: core types, discovery, loading, and profiling.
//!
//! Architecture:
//! ```text
//!  statistics/flow_profile_it*.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ discover  │  directory + pattern → sorted paths
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → FlowProfile
//!   └──────────┘
//!
//!   ┌───────────┐
//!   │ profiling │  particles → FlowProfile → flow_profile_it<N>.csv
//!   └───────────┘
//! ```

pub mod discover;
pub mod loader;
pub mod model;
pub mod profiling;
