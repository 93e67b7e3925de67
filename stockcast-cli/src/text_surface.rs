//! Plain-text rendering of a dashboard page for the terminal.

use std::fmt::Write;

use stockcast_core::dashboard::display::{CLOSE_TRACE, OPEN_TRACE};
use stockcast_core::dashboard::{ForecastChart, RawChart, StatusKind, StatusMessage};
use stockcast_core::forecast::ForecastComponents;
use stockcast_core::frame::TablePreview;
use stockcast_core::DashboardSurface;

/// Sparkline width in characters.
const SPARK_WIDTH: usize = 60;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Accumulates the page as text; print `into_string()` when done.
#[derive(Debug, Default)]
pub struct TextSurface {
    out: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }
}

impl DashboardSurface for TextSurface {
    fn title(&mut self, text: &str) {
        self.line(text);
        self.line(&"=".repeat(text.chars().count()));
    }

    fn subheader(&mut self, text: &str) {
        self.line("");
        self.line(&format!("## {text}"));
    }

    fn caption(&mut self, text: &str) {
        self.line("");
        self.line(text);
    }

    fn text(&mut self, text: &str) {
        self.line(text);
    }

    fn table(&mut self, table: &TablePreview) {
        self.out.push_str(&format_table(table));
    }

    fn raw_chart(&mut self, chart: &RawChart) {
        self.line(&format!("[{}]", chart.title));
        match chart.date_range() {
            None => self.line("  (no price data)"),
            Some((first, last)) => {
                let opens: Vec<f64> = chart.points.iter().map(|p| p.open).collect();
                let closes: Vec<f64> = chart.points.iter().map(|p| p.close).collect();
                self.line(&format!("  {} points, {first} .. {last}", chart.points.len()));
                self.line(&format!("  {OPEN_TRACE:<14} {}", sparkline(&opens, SPARK_WIDTH)));
                self.line(&format!("  {CLOSE_TRACE:<14} {}", sparkline(&closes, SPARK_WIDTH)));
            }
        }
    }

    fn status(&mut self, status: &StatusMessage) {
        let tag = match status.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
        };
        self.line("");
        self.line(&format!("[{tag}] {}", status.text));
    }

    fn forecast_chart(&mut self, chart: &ForecastChart) {
        let yhat: Vec<f64> = chart.band.iter().map(|p| p.yhat).collect();
        self.line(&format!("  yhat           {}", sparkline(&yhat, SPARK_WIDTH)));
        if let Some(last) = chart.band.last() {
            self.line(&format!(
                "  history ends {}; {} -> {:.2} [{:.2}, {:.2}]",
                chart.history_end, last.ds, last.yhat, last.yhat_lower, last.yhat_upper
            ));
        }
    }

    fn components_chart(&mut self, components: &ForecastComponents) {
        let trend: Vec<f64> = components.trend.iter().map(|(_, v)| *v).collect();
        self.line(&format!("  trend          {}", sparkline(&trend, SPARK_WIDTH)));
        if let Some(weekly) = &components.weekly {
            let mut row = String::from("  weekly        ");
            for w in weekly {
                let _ = write!(row, " {} {:+.2}", w.weekday, w.value);
            }
            self.line(&row);
        }
        if let Some(yearly) = &components.yearly {
            let values: Vec<f64> = yearly.iter().map(|y| y.value).collect();
            self.line(&format!("  yearly         {}", sparkline(&values, SPARK_WIDTH)));
        }
    }
}

/// Left-aligned columns separated by two spaces.
pub fn format_table(table: &TablePreview) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let render = |out: &mut String, cells: &[String]| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:>w$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };
    render(&mut out, &table.columns);
    for row in &table.rows {
        render(&mut out, row);
    }
    if table.rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

/// Bucket-averaged sparkline of at most `width` characters.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || width == 0 {
        return String::new();
    }
    let buckets = width.min(finite.len());
    let means: Vec<f64> = (0..buckets)
        .map(|b| {
            let lo = b * finite.len() / buckets;
            let hi = ((b + 1) * finite.len() / buckets).max(lo + 1);
            finite[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
        })
        .collect();
    let min = means.iter().copied().fold(f64::INFINITY, f64::min);
    let max = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    means
        .iter()
        .map(|v| {
            if span <= 0.0 {
                SPARK_LEVELS[0]
            } else {
                let level = ((v - min) / span * 7.0).round() as usize;
                SPARK_LEVELS[level.min(7)]
            }
        })
        .collect()
}
