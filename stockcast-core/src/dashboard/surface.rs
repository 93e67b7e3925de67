//! The drawing seam. `present` walks a `DisplayModel` in page order.

use super::display::{
    DisplayModel, ForecastChart, RawChart, StatusMessage, COMPONENTS_CAPTION,
    FORECAST_DATA_HEADER, RAW_CHART_HEADER, RAW_DATA_HEADER,
};
use crate::forecast::ForecastComponents;
use crate::frame::TablePreview;

/// Anything that can draw a dashboard page: the TUI page builder, the CLI's
/// text printer, a test recorder.
pub trait DashboardSurface {
    fn title(&mut self, text: &str);
    fn subheader(&mut self, text: &str);
    fn caption(&mut self, text: &str);
    fn text(&mut self, text: &str);
    fn table(&mut self, table: &TablePreview);
    fn raw_chart(&mut self, chart: &RawChart);
    fn status(&mut self, status: &StatusMessage);
    fn forecast_chart(&mut self, chart: &ForecastChart);
    fn components_chart(&mut self, components: &ForecastComponents);
}

/// Issue drawing calls for `model`. The raw chart is drawn exactly once in
/// every state.
pub fn present(model: &DisplayModel, surface: &mut dyn DashboardSurface) {
    surface.title(&model.title);

    surface.subheader(RAW_DATA_HEADER);
    surface.table(&model.raw_preview);

    surface.subheader(RAW_CHART_HEADER);
    surface.raw_chart(&model.raw_chart);

    surface.status(&model.status);

    if let Some(section) = &model.forecast {
        surface.subheader(FORECAST_DATA_HEADER);
        surface.table(&section.preview);

        surface.caption(&section.plot_caption);
        surface.forecast_chart(&section.chart);

        surface.caption(COMPONENTS_CAPTION);
        surface.components_chart(&section.components);

        surface.text(&section.end_date_line());
    }
}
