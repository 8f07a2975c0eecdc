//! Fixed pipeline configuration.
//!
//! The pipeline intentionally has no config files or environment
//! variables; everything that shapes a run lives here as a constant,
//! with `PipelineConfig` collecting the tunables the CLI may override.

/// Spreadsheet holding the monthly training records.
pub const TRAIN_SHEET_ID: &str = "1OdjccfGlv3lsuiWgIAHbE8id91FpVaU2EsaZo5kknaA";

/// Spreadsheet holding the held-out test employee IDs.
pub const TEST_SHEET_ID: &str = "1RzcxaIM2nVAsmKydLR1NnjqdJlUC86SAUOeW_L0mJgk";

/// CSV export URL template; `{}` is replaced with the sheet ID.
pub const SHEET_EXPORT_URL: &str = "https://docs.google.com/spreadsheets/d/{}/export?format=csv";

/// Random seed for the stratified train/holdout split.
pub const SPLIT_SEED: u64 = 1234;

/// Fraction of each snapshot held out for evaluation.
pub const HOLDOUT_FRACTION: f64 = 0.2;

/// Ensemble size before the first cutoff iteration.
pub const INITIAL_ESTIMATORS: usize = 90;

/// Trees added to the ensemble after every cutoff iteration.
pub const ESTIMATOR_GROWTH: usize = 20;

/// Cutoff months skipped at the start of the loop so that every
/// snapshot carries enough history for meaningful features.
pub const WARMUP_MONTHS: usize = 9;

/// Mean Gregorian month length in days (365.2425 / 12), used to turn
/// date spans into whole months of work experience.
pub const AVG_MONTH_DAYS: f64 = 30.436875;

/// Default path of the prediction output file.
pub const OUTPUT_PATH: &str = "output.csv";

/// Run-level parameters of the training pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Seed for the stratified split.
    pub split_seed: u64,
    /// Holdout fraction per snapshot.
    pub holdout_fraction: f64,
    /// Ensemble size at the first cutoff.
    pub initial_estimators: usize,
    /// Trees added per cutoff.
    pub estimator_growth: usize,
    /// Cutoff months skipped before training starts.
    pub warmup_months: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            split_seed: SPLIT_SEED,
            holdout_fraction: HOLDOUT_FRACTION,
            initial_estimators: INITIAL_ESTIMATORS,
            estimator_growth: ESTIMATOR_GROWTH,
            warmup_months: WARMUP_MONTHS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.split_seed, SPLIT_SEED);
        assert_eq!(cfg.initial_estimators, INITIAL_ESTIMATORS);
        assert_eq!(cfg.estimator_growth, ESTIMATOR_GROWTH);
        assert_eq!(cfg.warmup_months, WARMUP_MONTHS);
    }

    #[test]
    fn test_export_url_has_placeholder() {
        assert!(SHEET_EXPORT_URL.contains("{}"));
    }
}
