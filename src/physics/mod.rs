//! Physical models
//!
//! This module provides the traits and data types that describe the flow
//! physics, independently of how the equations are solved.
//!
//! # Core Concepts
//!
//! - **Parameter Set**: the dimensionless inputs of one flow case
//! - **Grid**: uniform nodes across the gap with the shared difference stencils
//! - **Physical Model**: one relaxation sweep of the discretized equations
//! - **Physical State**: container for the nodal fields (velocity, temperature)
//! - **Physical Quantity**: type-safe identifier for physical variables
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! Nanofluid properties and parameter checks sit next to the model because
//! they only transform or inspect a [`ParameterSet`]:
//!
//! ```text
//! Particle + φ ──► MixtureProperties ──► ParameterSet ──► validate() (advisory)
//!                                             │
//!                                             ▼
//!                                       MhdCouetteFlow
//! ```
//!
//! # Example
//!
//! ```rust
//! use nanocouette::physics::{validate, MixtureProperties, ParameterSet, Particle};
//!
//! let mixture = MixtureProperties::compute(Particle::Alumina, 0.03).unwrap();
//! let params = ParameterSet::baseline().with_nanofluid(&mixture);
//!
//! assert!(validate(&params).is_valid());
//! ```

// module declaration
pub mod grid;
pub mod nanofluid;
pub mod parameters;
pub mod traits;
pub mod validation;

// re-export commonly used types for convenience
pub use grid::Grid;
pub use nanofluid::{MixtureProperties, NanofluidError, Particle, ParticleProperties};
pub use parameters::{Parameter, ParameterSet};
pub use traits::{PhysicalModel, PhysicalQuantity, PhysicalState, WallFluxes};
pub use validation::{validate, ValidationReport};
