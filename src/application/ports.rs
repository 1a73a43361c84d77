use crate::domain::chart::EquityChart;
use crate::domain::errors::AppResult;

/// Anything the equity chart can be mounted on
pub trait ChartSurface {
    fn mount(&mut self, chart: &EquityChart) -> AppResult<()>;
}

/// Text sink whose previous content is replaced on every write
pub trait TextTarget {
    fn write_text(&mut self, text: &str) -> AppResult<()>;
}

/// Provider of the serialized equity records
pub trait EquitySource {
    fn read_series_json(&self) -> AppResult<String>;
}

impl<T: ChartSurface + ?Sized> ChartSurface for &mut T {
    fn mount(&mut self, chart: &EquityChart) -> AppResult<()> {
        (**self).mount(chart)
    }
}

impl<T: TextTarget + ?Sized> TextTarget for &mut T {
    fn write_text(&mut self, text: &str) -> AppResult<()> {
        (**self).write_text(text)
    }
}
