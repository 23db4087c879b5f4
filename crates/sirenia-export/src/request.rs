use sirenia_core::Theme;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Jpg,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }

    pub fn is_raster(self) -> bool {
        !matches!(self, ExportFormat::Svg)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpg),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// One user export action. Owns its copy of the source so concurrent exports never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub source_markup: String,
    pub theme: Theme,
}

impl ExportRequest {
    pub fn new(format: ExportFormat, source_markup: impl Into<String>, theme: Theme) -> Self {
        Self {
            format,
            source_markup: source_markup.into(),
            theme,
        }
    }

    pub fn has_content(&self) -> bool {
        !self.source_markup.trim().is_empty()
    }
}
