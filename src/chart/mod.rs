//! Chart module - figure model and static rendering

pub mod figure;
pub mod render;

pub use figure::{Axis, AxisRange, Marker, ProfileFigure, Series, TwinAxis};
pub use render::{output_path, render_figure, OutputFormat, DEFAULT_SIZE};
