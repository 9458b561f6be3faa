//! Export of simulation results.
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the export format. Each format is an
//! independent implementation in its own sub-module, so adding a format
//! means adding a file.
//!
//! # Available formats
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,no_run
//! use nanocouette::analysis::solve;
//! use nanocouette::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
//! use nanocouette::physics::ParameterSet;
//! use nanocouette::solver::SolverConfiguration;
//!
//! let params = ParameterSet::baseline();
//! let solution = solve(&params, &SolverConfiguration::time_evolution(5.0, 0.02, 10))?;
//!
//! let metadata = CsvMetadata::from_result(&solution.result).with_parameters(params);
//! let exporter = CsvExporter::new(CsvConfig::default().with_metadata(metadata));
//! exporter.export(&solution.result, &solution.energy, "couette.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;

pub use csv::{
    CsvConfig, CsvError, CsvExporter, CsvMetadata, TrajectoryRow, parse_trajectory_csv, trajectory_rows,
    write_trajectory_csv,
};

use crate::analysis::EnergySample;
use crate::solver::SimulationResult;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can react to the precise failure without boxing.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports one row per recorded sample.
    ///
    /// `energy` holds the energy integrals of the same samples, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the path is invalid or the directory does not exist
    /// - `result` contains no sample
    /// - `energy` does not match the samples
    fn export(&self, result: &SimulationResult, energy: &[EnergySample], path: &str) -> Result<(), Self::Error>;
}
