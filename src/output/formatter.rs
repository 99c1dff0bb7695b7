//! Output formatters for command-line estimates

use crate::error::Result;
use crate::model::pipeline::Estimate;
use colored::{Color, Colorize};
use serde::Serialize;

/// One classified input with its estimate
#[derive(Debug, Clone, Serialize)]
pub struct EstimateRecord {
    pub text: String,
    pub label: String,
    pub probability: f32,
    pub probability_formatted: String,
}

impl EstimateRecord {
    pub fn new(text: &str, estimate: &Estimate) -> Self {
        Self {
            text: text.to_string(),
            label: estimate.label.clone(),
            probability: estimate.probability,
            probability_formatted: estimate.formatted_probability(),
        }
    }
}

pub trait OutputFormatter {
    fn format_estimates(&self, records: &[EstimateRecord]) -> Result<String>;
}

/// Human-readable output, optionally colored
pub struct ConsoleFormatter {
    use_colors: bool,
    preview_chars: usize,
}

/// JSON output for scripting
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            preview_chars: 60,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn label_color(label: &str) -> Color {
        match label {
            "Business" => Color::Blue,
            "Entertainment" => Color::Magenta,
            "Politics" => Color::Red,
            "Sport" => Color::Green,
            "Tech" => Color::Cyan,
            _ => Color::White,
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_estimates(&self, records: &[EstimateRecord]) -> Result<String> {
        let mut out = String::new();
        for record in records {
            let label = self.colorize(&record.label, Self::label_color(&record.label));
            out.push_str(&format!(
                "{:<15} {:>8}  {}\n",
                label,
                record.probability_formatted,
                truncate_text(&record.text, self.preview_chars)
            ));
        }
        Ok(out)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_estimates(&self, records: &[EstimateRecord]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        Ok(json)
    }
}

/// First `max_chars` characters on one line, with an ellipsis if cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        single_line
    } else {
        let cut: String = single_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
