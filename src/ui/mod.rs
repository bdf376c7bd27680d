//! Viewer widgets: menu bar, profile list, and the dual-axis plot.

pub mod panels;
pub mod plot;
