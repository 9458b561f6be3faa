//! CSV export of a solved trajectory
//!
//! One row per recorded sample, five columns:
//!
//! ```csv
//! tau,Cf_lower,Nu_lower,KE,TE
//! 0.020000,1.103516,0.611204,0.221771,0.879903
//! 0.200000,0.949337,0.582017,0.190480,0.880712
//! ...
//! ```
//!
//! `KE` and `TE` are the kinetic and thermal energy integrals of the sample
//! (see [`EnergySample`]). The file is readable by pandas, spreadsheets and
//! [`parse_trajectory_csv`].
//!
//! ## With Metadata
//!
//! ```csv
//! # MHD Nanofluid Couette Flow
//! # Generated: 2026-10-19T09:12:44+00:00
//! # Model: MHD nanofluid Couette flow
//! # Solver: Backward Euler / Picard
//! # Final Time: 2
//! # Time Steps: 100
//! #
//! tau,Cf_lower,Nu_lower,KE,TE
//! ...
//! ```
//!
//! Comment lines start with `#` and are skipped when parsing.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};

use thiserror::Error;

use crate::analysis::EnergySample;
use crate::output::export::Exporter;
use crate::physics::{Parameter, ParameterSet};
use crate::solver::SimulationResult;

/// Column names, in order
pub const HEADER: [&str; 5] = ["tau", "Cf_lower", "Nu_lower", "KE", "TE"];

// =============================================================================
// Errors
// =============================================================================

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected header: '{0}'")]
    Header(String),

    #[error("No trajectory rows")]
    Empty,

    #[error("Length mismatch: {samples} samples versus {energy} energy records")]
    LengthMismatch { samples: usize, energy: usize },
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use nanocouette::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter, comma decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set appear in the header.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub model_name: Option<String>,
    pub solver_name: Option<String>,
    pub final_time: Option<f64>,
    pub time_steps: Option<usize>,
    /// Dimensionless groups and property ratios of the run
    pub parameters: Option<ParameterSet>,
}

impl CsvMetadata {
    /// Pick up what the solver recorded in [`SimulationResult::metadata`]
    pub fn from_result(result: &SimulationResult) -> Self {
        let text = |key: &str| result.metadata.get(key).cloned();
        Self {
            model_name: text("model"),
            solver_name: text("solver"),
            final_time: text("final time").and_then(|v| v.parse().ok()),
            time_steps: text("time steps").and_then(|v| v.parse().ok()),
            ..Default::default()
        }
    }

    pub fn with_parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

// =============================================================================
// Rows
// =============================================================================

/// One line of the trajectory table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub tau: f64,
    pub cf_lower: f64,
    pub nu_lower: f64,
    pub kinetic: f64,
    pub thermal: f64,
}

impl TrajectoryRow {
    fn values(&self) -> [f64; 5] {
        [self.tau, self.cf_lower, self.nu_lower, self.kinetic, self.thermal]
    }
}

/// Join samples with their energy integrals
///
/// # Errors
///
/// [`CsvError::Empty`] for an empty trajectory and
/// [`CsvError::LengthMismatch`] when `energy` does not match the samples.
pub fn trajectory_rows(result: &SimulationResult, energy: &[EnergySample]) -> Result<Vec<TrajectoryRow>, CsvError> {
    if result.is_empty() {
        return Err(CsvError::Empty);
    }
    if result.len() != energy.len() {
        return Err(CsvError::LengthMismatch { samples: result.len(), energy: energy.len() });
    }

    Ok(result
        .samples
        .iter()
        .zip(energy)
        .map(|(sample, e)| TrajectoryRow {
            tau: sample.tau,
            cf_lower: sample.fluxes.skin_friction_lower,
            nu_lower: sample.fluxes.nusselt_lower,
            kinetic: e.kinetic,
            thermal: e.thermal,
        })
        .collect())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> Result<(), CsvError> {
    writeln!(writer, "# MHD Nanofluid Couette Flow")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(writer, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(writer, "# Solver: {}", solver)?;
    }
    if let Some(final_time) = metadata.final_time {
        writeln!(writer, "# Final Time: {}", final_time)?;
    }
    if let Some(time_steps) = metadata.time_steps {
        writeln!(writer, "# Time Steps: {}", time_steps)?;
    }

    if let Some(params) = &metadata.parameters {
        for (parameter, value) in params.scalars() {
            writeln!(writer, "# {}: {}", parameter, value)?;
        }
        writeln!(writer, "# N: {}", params.grid_resolution)?;
    }

    writeln!(writer, "#")?;
    Ok(())
}

fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);
    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn parse_number(field: &str, config: &CsvConfig) -> Option<f64> {
    let field = field.trim();
    if config.decimal_separator != '.' {
        field.replace(config.decimal_separator, ".").parse().ok()
    } else {
        field.parse().ok()
    }
}

fn header_line(config: &CsvConfig) -> String {
    HEADER.join(&config.delimiter.to_string())
}

// =============================================================================
// Write / Parse
// =============================================================================

/// Write rows, preceded by the optional metadata block and the header
pub fn write_trajectory_csv<W: Write>(
    writer: &mut W,
    rows: &[TrajectoryRow],
    config: &CsvConfig,
) -> Result<(), CsvError> {
    if rows.is_empty() {
        return Err(CsvError::Empty);
    }

    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(writer, metadata)?;
        }
    }

    writeln!(writer, "{}", header_line(config))?;

    let delimiter = config.delimiter.to_string();
    for row in rows {
        let fields: Vec<String> = row.values().iter().map(|v| format_number(*v, config)).collect();
        writeln!(writer, "{}", fields.join(&delimiter))?;
    }

    writer.flush()?;
    Ok(())
}

/// Read back a table written by [`write_trajectory_csv`] with the same
/// delimiter and decimal separator
///
/// Blank lines and `#` comments are skipped. Line numbers in
/// [`CsvError::Parse`] are one-based.
pub fn parse_trajectory_csv<R: BufRead>(reader: R, config: &CsvConfig) -> Result<Vec<TrajectoryRow>, CsvError> {
    let mut header_seen = false;
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !header_seen {
            if trimmed != header_line(config) {
                return Err(CsvError::Header(trimmed.to_string()));
            }
            header_seen = true;
            continue;
        }

        let fields: Vec<&str> = trimmed.split(config.delimiter).collect();
        if fields.len() != HEADER.len() {
            return Err(CsvError::Parse {
                line: index + 1,
                message: format!("expected {} fields, found {}", HEADER.len(), fields.len()),
            });
        }

        let mut values = [0.0; 5];
        for (slot, (field, name)) in values.iter_mut().zip(fields.iter().zip(HEADER)) {
            *slot = parse_number(field, config).ok_or_else(|| CsvError::Parse {
                line: index + 1,
                message: format!("invalid {} value '{}'", name, field.trim()),
            })?;
        }

        rows.push(TrajectoryRow {
            tau: values[0],
            cf_lower: values[1],
            nu_lower: values[2],
            kinetic: values[3],
            thermal: values[4],
        });
    }

    if rows.is_empty() {
        return Err(CsvError::Empty);
    }
    Ok(rows)
}

// =============================================================================
// Exporter
// =============================================================================

/// File exporter for the trajectory table
///
/// # Example
///
/// ```rust,no_run
/// use nanocouette::analysis::solve;
/// use nanocouette::output::export::{CsvExporter, Exporter};
/// use nanocouette::physics::ParameterSet;
/// use nanocouette::solver::SolverConfiguration;
///
/// let solution = solve(&ParameterSet::baseline(), &SolverConfiguration::quick())?;
/// CsvExporter::default().export(&solution.result, &solution.energy, "couette.csv")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(&self, result: &SimulationResult, energy: &[EnergySample], path: &str) -> Result<(), CsvError> {
        let rows = trajectory_rows(result, energy)?;
        let mut writer = BufWriter::new(File::create(path)?);
        write_trajectory_csv(&mut writer, &rows, &self.config)
    }
}

/// Parameter scalars formatted as `symbol=value` pairs
pub fn parameter_summary(params: &ParameterSet) -> String {
    let pairs: Vec<String> = params
        .scalars()
        .iter()
        .filter(|(p, _)| Parameter::SENSITIVITY.contains(p))
        .map(|(p, v)| format!("{}={}", p, v))
        .collect();
    pairs.join(" ")
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::solve;
    use crate::solver::SolverConfiguration;
    use approx::assert_relative_eq;
    use std::fs;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    fn small_solution() -> crate::analysis::Solution {
        let params = ParameterSet::baseline().with_grid_resolution(10);
        solve(&params, &SolverConfiguration::time_evolution(0.2, 0.02, 2)).unwrap()
    }

    fn sample_rows() -> Vec<TrajectoryRow> {
        vec![
            TrajectoryRow { tau: 0.02, cf_lower: 1.25, nu_lower: 0.5, kinetic: 0.2, thermal: 0.9 },
            TrajectoryRow { tau: 0.04, cf_lower: 1.125, nu_lower: 0.625, kinetic: 0.19, thermal: 0.875 },
        ]
    }

    #[test]
    fn test_export_writes_header_and_one_row_per_sample() {
        let solution = small_solution();
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        CsvExporter::default().export(&solution.result, &solution.energy, path).unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "tau,Cf_lower,Nu_lower,KE,TE");
        assert_eq!(lines.len(), solution.result.len() + 1);
    }

    #[test]
    fn test_exported_file_parses_back() {
        let solution = small_solution();
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let exporter = CsvExporter::new(CsvConfig::high_precision());
        exporter.export(&solution.result, &solution.energy, path).unwrap();

        let reader = std::io::BufReader::new(File::open(path).unwrap());
        let parsed = parse_trajectory_csv(reader, &exporter.config).unwrap();
        let expected = trajectory_rows(&solution.result, &solution.energy).unwrap();

        assert_eq!(parsed.len(), expected.len());
        for (p, e) in parsed.iter().zip(&expected) {
            assert_relative_eq!(p.tau, e.tau, epsilon = 1e-11);
            assert_relative_eq!(p.cf_lower, e.cf_lower, epsilon = 1e-11);
            assert_relative_eq!(p.nu_lower, e.nu_lower, epsilon = 1e-11);
            assert_relative_eq!(p.kinetic, e.kinetic, epsilon = 1e-11);
            assert_relative_eq!(p.thermal, e.thermal, epsilon = 1e-11);
        }
    }

    #[test]
    fn test_metadata_header_is_skipped_by_parser() {
        let solution = small_solution();
        let metadata = CsvMetadata::from_result(&solution.result).with_parameters(ParameterSet::baseline());
        let config = CsvConfig::default().with_metadata(metadata);

        let mut buffer = Vec::new();
        write_trajectory_csv(&mut buffer, &sample_rows(), &config).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();

        assert!(text.starts_with("# MHD Nanofluid Couette Flow"));
        assert!(text.contains("# Generated: "));
        assert!(text.contains("# Solver: Backward Euler / Picard"));
        assert!(text.contains("# Ha: 2"));

        let parsed = parse_trajectory_csv(Cursor::new(buffer), &config).unwrap();
        assert_eq!(parsed, sample_rows());
    }

    #[test]
    fn test_european_format() {
        let config = CsvConfig::european();
        let mut buffer = Vec::new();
        write_trajectory_csv(&mut buffer, &sample_rows(), &config).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("tau;Cf_lower;Nu_lower;KE;TE\n"));
        assert!(text.contains("0,020000;1,250000;0,500000;0,200000;0,900000"));

        let parsed = parse_trajectory_csv(Cursor::new(buffer), &config).unwrap();
        assert_eq!(parsed, sample_rows());
    }

    #[test]
    fn test_precision_setting() {
        let config = CsvConfig::default().precision(2);
        let mut buffer = Vec::new();
        write_trajectory_csv(&mut buffer, &sample_rows()[..1], &config).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1), Some("0.02,1.25,0.50,0.20,0.90"));
    }

    #[test]
    fn test_wrong_header_rejected() {
        let input = "time,Cf,Nu\n0.1,1.0,0.5\n";
        let err = parse_trajectory_csv(Cursor::new(input), &CsvConfig::default()).unwrap_err();
        assert!(matches!(err, CsvError::Header(h) if h == "time,Cf,Nu"));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let input = "# comment\ntau,Cf_lower,Nu_lower,KE,TE\n0.1,1.0,0.5,0.2,0.9\n0.2,abc,0.5,0.2,0.9\n";
        let err = parse_trajectory_csv(Cursor::new(input), &CsvConfig::default()).unwrap_err();
        match err {
            CsvError::Parse { line, message } => {
                assert_eq!(line, 4);
                assert!(message.contains("Cf_lower"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_row_rejected() {
        let input = "tau,Cf_lower,Nu_lower,KE,TE\n0.1,1.0\n";
        let err = parse_trajectory_csv(Cursor::new(input), &CsvConfig::default()).unwrap_err();
        assert!(matches!(err, CsvError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_inputs() {
        let mut buffer = Vec::new();
        assert!(matches!(
            write_trajectory_csv(&mut buffer, &[], &CsvConfig::default()),
            Err(CsvError::Empty)
        ));

        let input = "tau,Cf_lower,Nu_lower,KE,TE\n";
        assert!(matches!(
            parse_trajectory_csv(Cursor::new(input), &CsvConfig::default()),
            Err(CsvError::Empty)
        ));
    }

    #[test]
    fn test_energy_length_must_match() {
        let solution = small_solution();
        let err = trajectory_rows(&solution.result, &solution.energy[1..]).unwrap_err();
        assert!(matches!(err, CsvError::LengthMismatch { .. }));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let solution = small_solution();
        let err = CsvExporter::default()
            .export(&solution.result, &solution.energy, "/nonexistent/dir/out.csv")
            .unwrap_err();
        assert!(matches!(err, CsvError::Io(_)));
    }

    #[test]
    fn test_parameter_summary_lists_groups() {
        let summary = parameter_summary(&ParameterSet::baseline());
        assert_eq!(summary, "Ha=2 Re=1 Pr=6.2 Ec=0.1 Bi=0.5 lambda=0.1");
    }
}
