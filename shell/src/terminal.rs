//! Text chart renderer
//!
//! Draws bar charts as lines of text so dashboards can be previewed from the
//! shell.

use vista_core::{ChartError, ChartHandle, ChartRenderer, DataPoint};

const BAR_WIDTH: f64 = 40.0;

pub struct TextChart {
    pub lines: Vec<String>,
}

impl ChartHandle for TextChart {
    fn destroy(&mut self) {
        self.lines.clear();
    }
}

pub struct TextRenderer;

impl ChartRenderer for TextRenderer {
    type Handle = TextChart;

    fn create(
        &self,
        container: &str,
        kind: &str,
        data: &[DataPoint],
    ) -> Result<TextChart, ChartError> {
        if kind != "bar" {
            return Err(ChartError::Render(format!(
                "{} charts are not supported in text mode",
                kind
            )));
        }

        let max = data.iter().map(|p| p.value).fold(0.0_f64, f64::max);
        let name_width = data.iter().map(|p| p.name.len()).max().unwrap_or(0);

        let mut lines = vec![format!("# {}", container)];
        for point in data {
            let filled = if max > 0.0 {
                ((point.value.max(0.0) / max) * BAR_WIDTH).round() as usize
            } else {
                0
            };
            lines.push(format!(
                "{:<width$} | {} {}",
                point.name,
                "#".repeat(filled),
                point.value,
                width = name_width
            ));
        }

        Ok(TextChart { lines })
    }
}
