use crate::error::{FluidError, Result};

pub const DEFAULT_ITERATIONS: usize = 4;
pub const DEFAULT_PAR_THRESHOLD: usize = 262_144;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    pub iterations: usize,
    pub parallel_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            parallel_threshold: DEFAULT_PAR_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidParams {
    pub dt: f32,
    pub diffusion: f32,
    pub viscosity: f32,
    pub solver: SolverConfig,
}

impl Default for FluidParams {
    fn default() -> Self {
        Self {
            dt: 0.1,
            diffusion: 0.0,
            viscosity: 0.0,
            solver: SolverConfig::default(),
        }
    }
}

impl FluidParams {
    pub fn new(diffusion: f32, viscosity: f32, dt: f32) -> Self {
        Self {
            dt,
            diffusion,
            viscosity,
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.solver.iterations = iterations;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.solver.parallel_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("dt", self.dt),
            ("diffusion", self.diffusion),
            ("viscosity", self.viscosity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FluidError::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        if self.solver.iterations == 0 {
            return Err(FluidError::InvalidConfig(
                "solver iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
