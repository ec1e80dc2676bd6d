// src/config/options.rs
use std::path::PathBuf;

use crate::extract::ExtractorKind;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub source: SourceOptions,
    pub export: ExportOptions,
    pub verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub html: Input,
    /// Rows persisted by the previous run (missing file = first run).
    pub previous: Option<PathBuf>,
    /// JSON alias overlay on top of the built-in table.
    pub aliases: Option<PathBuf>,
    pub extractor: ExtractorKind,
    pub variant: Variant,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            html: Input::Stdin,
            previous: None,
            aliases: None,
            extractor: ExtractorKind::Auto,
            variant: Variant::Raw,
        }
    }
}

/// Deployment variant: keep cell text as-is, or run field coercion first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Raw,
    Coerced,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Where to write this run's offer rows.
    pub out: Option<PathBuf>,
    pub include_headers: bool,
    /// Print offers as JSON instead of the diff report.
    pub json: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out: None,
            include_headers: false,
            json: false,
        }
    }
}
