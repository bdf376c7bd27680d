//! Flow profile plotting: find `flow_profile_it*.csv` statistics files,
//! load them, and draw velocity and density along the channel width on two
//! y-axes, one figure per file.

pub mod app;
pub mod batch;
pub mod chart;
pub mod cli;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
