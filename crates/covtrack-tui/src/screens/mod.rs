pub mod chart;

pub use chart::ChartScreen;
