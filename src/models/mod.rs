//! Physical models for nanofluid Couette flow
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The solver calls `relax` once per field and fixed-point iteration; models
//! are responsible for the discretized physics, the solver for the wall
//! conditions, the iteration and the time marching.
//!
//! # Available Models
//!
//! ## [`MhdCouetteFlow`]
//!
//! Coupled momentum and energy balance of a nanofluid between a fixed and an
//! impulsively moved plate under a transverse magnetic field. The initial
//! velocity is chosen with [`InitialProfile`].

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod couette;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use couette::{InitialProfile, MhdCouetteFlow};
