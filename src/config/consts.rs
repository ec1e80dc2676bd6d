// src/config/consts.rs

// Report
pub const NO_CHANGES: &str = "Изменений нет.";
pub const ADDED_HEADING: &str = "Новые пары (domain + sale):";
pub const REMOVED_HEADING: &str = "Удаленные пары (domain + sale):";
pub const ADDED_MARK: &str = "+";
pub const REMOVED_MARK: &str = "-";
pub const PAIR_SEP: &str = " | ";

// Diagnostics
pub const SAMPLE_TABLES: usize = 3; // first rows quoted in HeaderResolutionFailed
pub const SAMPLE_CELLS: usize = 12;

// Environment
pub const LOG_ENV: &str = "OFFER_WATCH_LOG";

// CLI defaults
pub const STDIN_MARK: &str = "-";
