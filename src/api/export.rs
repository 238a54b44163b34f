use std::fmt;

use clap::ValueEnum;

use crate::api::builder::QueryParams;
use crate::error::{missing_parameter, FigmaError};

/// Image formats the export endpoint can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of an image export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Layer (node) ids to render, e.g. `1:2`
    pub ids: Vec<String>,
    pub format: ImageFormat,
    pub scale: f64,
}

impl ExportOptions {
    pub fn new(ids: Vec<String>, format: ImageFormat, scale: f64) -> Self {
        Self { ids, format, scale }
    }

    /// Query parameters in the order the endpoint documents them
    ///
    /// # Errors
    /// [`FigmaError::MissingParameter`] when no non-blank layer id is given or
    /// the scale is not a positive finite number.
    pub fn query_params(&self) -> Result<QueryParams, FigmaError> {
        let ids = self
            .ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Err(missing_parameter("ids"));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(missing_parameter("scale (must be a positive number)"));
        }
        Ok(vec![
            ("ids".to_string(), ids.join(",")),
            ("format".to_string(), self.format.to_string()),
            ("scale".to_string(), format_scale(self.scale)),
        ])
    }
}

/// Renders a scale factor, always with a fractional part (`2` -> `2.0`)
///
/// Very small or very large factors switch to exponent form (`1e-7`,
/// `1e16`), the same shortest round-trip rendering other float formatters
/// use; such values are outside the range the service accepts anyway.
pub fn format_scale(scale: f64) -> String {
    format!("{scale:?}")
}

/// Splits a comma-separated `--ids` argument into layer ids
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
