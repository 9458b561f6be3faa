//! Output of simulation results
//!
//! ```text
//! output/
//! ├── mod.rs
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait
//!     └── csv.rs          ← tau,Cf_lower,Nu_lower,KE,TE table
//! ```
//!
//! Exporters take the [`SimulationResult`](crate::solver::SimulationResult)
//! together with the energy integrals computed by
//! [`analysis::solve`](crate::analysis::solve).

pub mod export;

pub use export::{CsvConfig, CsvError, CsvExporter, CsvMetadata, Exporter};
