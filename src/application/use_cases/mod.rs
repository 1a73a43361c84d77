pub mod build_daily_series;
pub mod render_dashboard;

pub use build_daily_series::*;
pub use render_dashboard::*;
