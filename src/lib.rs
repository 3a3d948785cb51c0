mod advect;
mod boundary;
mod error;
mod field;
mod fluid;
mod grid;
mod params;
mod project;
mod relax;

pub use advect::advect;
pub use boundary::{Boundary, BoundaryKind};
pub use error::{FluidError, Result};
pub use field::{Field, Field2, Field3};
pub use fluid::{Diagnostics, Fluid, Fluid2, Fluid3};
pub use grid::{InteriorCells, Lattice, Lattice2, Lattice3};
pub use params::{FluidParams, SolverConfig, DEFAULT_ITERATIONS, DEFAULT_PAR_THRESHOLD};
pub use project::{divergence_into, mean_abs_divergence, project};
pub use relax::{diffuse, lin_solve};
