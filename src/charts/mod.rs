//! Charts module - Interactive and static chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartPlotter;
pub use renderer::{ChartKind, RenderError, StaticChartRenderer};
