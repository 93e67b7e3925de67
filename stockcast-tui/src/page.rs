//! Page builder: a `DashboardSurface` that records the page as a list of
//! blocks the UI lays out top to bottom.

use stockcast_core::dashboard::{ForecastChart, RawChart, StatusMessage};
use stockcast_core::forecast::ForecastComponents;
use stockcast_core::frame::TablePreview;
use stockcast_core::{present, DashboardSurface, DisplayModel};

#[derive(Debug, Clone, PartialEq)]
pub enum PageBlock {
    Title(String),
    Subheader(String),
    Caption(String),
    Text(String),
    Table(TablePreview),
    RawChart(RawChart),
    Status(StatusMessage),
    ForecastChart(ForecastChart),
    Components(ForecastComponents),
}

impl PageBlock {
    /// Rows this block wants on screen.
    pub fn height(&self) -> u16 {
        match self {
            PageBlock::Title(_) => 2,
            PageBlock::Subheader(_) | PageBlock::Caption(_) | PageBlock::Text(_) => 1,
            PageBlock::Status(_) => 3,
            PageBlock::Table(t) => t.rows.len().max(1) as u16 + 3,
            PageBlock::RawChart(_) => 18,
            PageBlock::ForecastChart(_) => 16,
            PageBlock::Components(c) => 10 * c.panel_count() as u16,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub blocks: Vec<PageBlock>,
}

impl Page {
    pub fn from_model(model: &DisplayModel) -> Self {
        let mut page = Page::default();
        present(model, &mut page);
        page
    }

    pub fn raw_chart(&self) -> Option<&RawChart> {
        self.blocks.iter().find_map(|b| match b {
            PageBlock::RawChart(c) => Some(c),
            _ => None,
        })
    }

    pub fn total_height(&self) -> u16 {
        self.blocks.iter().map(PageBlock::height).sum()
    }
}

impl DashboardSurface for Page {
    fn title(&mut self, text: &str) {
        self.blocks.push(PageBlock::Title(text.to_string()));
    }

    fn subheader(&mut self, text: &str) {
        self.blocks.push(PageBlock::Subheader(text.to_string()));
    }

    fn caption(&mut self, text: &str) {
        self.blocks.push(PageBlock::Caption(text.to_string()));
    }

    fn text(&mut self, text: &str) {
        self.blocks.push(PageBlock::Text(text.to_string()));
    }

    fn table(&mut self, table: &TablePreview) {
        self.blocks.push(PageBlock::Table(table.clone()));
    }

    fn raw_chart(&mut self, chart: &RawChart) {
        self.blocks.push(PageBlock::RawChart(chart.clone()));
    }

    fn status(&mut self, status: &StatusMessage) {
        self.blocks.push(PageBlock::Status(status.clone()));
    }

    fn forecast_chart(&mut self, chart: &ForecastChart) {
        self.blocks.push(PageBlock::ForecastChart(chart.clone()));
    }

    fn components_chart(&mut self, components: &ForecastComponents) {
        self.blocks.push(PageBlock::Components(components.clone()));
    }
}
