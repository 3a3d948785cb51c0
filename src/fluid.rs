use crate::advect::advect;
use crate::boundary::{Boundary, BoundaryKind};
use crate::error::{FluidError, Result};
use crate::field::Field;
use crate::grid::Lattice;
use crate::params::FluidParams;
use crate::project::{mean_abs_divergence, project};
use crate::relax::diffuse;
use log::Level;

#[derive(Clone, Debug)]
pub struct Fluid<const D: usize> {
    params: FluidParams,
    boundary: Boundary<D>,
    density: Field<D>,
    density_prev: Field<D>,
    velocity: [Field<D>; D],
    velocity_prev: [Field<D>; D],
    pressure: Field<D>,
    divergence: Field<D>,
}

pub type Fluid2 = Fluid<2>;
pub type Fluid3 = Fluid<3>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Diagnostics {
    pub total_density: f32,
    pub kinetic_energy: f32,
    pub max_speed: f32,
    pub mean_abs_divergence: f32,
}

impl<const D: usize> Fluid<D> {
    pub fn new(resolution: usize, params: FluidParams) -> Result<Self> {
        if !(2..=3).contains(&D) {
            return Err(FluidError::InvalidConfig(format!(
                "only 2D and 3D grids are supported, got {}D",
                D
            )));
        }
        if resolution < 3 {
            return Err(FluidError::InvalidConfig(format!(
                "resolution must be >= 3, got {resolution}"
            )));
        }
        if resolution.checked_pow(D as u32).is_none() {
            return Err(FluidError::InvalidConfig(format!(
                "resolution {resolution} overflows a {}D cell count",
                D
            )));
        }
        params.validate()?;

        let lattice = Lattice::new(resolution);
        let zero = || Field::new(lattice, 0.0);
        log::debug!(
            "creating {}D fluid: resolution {resolution}, {} cells, dt {}, diffusion {}, viscosity {}, {} sweeps",
            D,
            lattice.size(),
            params.dt,
            params.diffusion,
            params.viscosity,
            params.solver.iterations
        );
        Ok(Self {
            params,
            boundary: Boundary::new(lattice),
            density: zero(),
            density_prev: zero(),
            velocity: std::array::from_fn(|_| zero()),
            velocity_prev: std::array::from_fn(|_| zero()),
            pressure: zero(),
            divergence: zero(),
        })
    }

    pub fn create(resolution: usize, diffusion: f32, viscosity: f32, dt: f32) -> Result<Self> {
        Self::new(resolution, FluidParams::new(diffusion, viscosity, dt))
    }

    pub fn lattice(&self) -> Lattice<D> {
        self.boundary.lattice()
    }

    pub fn resolution(&self) -> usize {
        self.lattice().resolution()
    }

    pub fn params(&self) -> FluidParams {
        self.params
    }

    fn cell(&self, coords: [usize; D]) -> Result<usize> {
        let lattice = self.lattice();
        if !lattice.contains(coords) {
            return Err(FluidError::OutOfBounds {
                coords: coords.to_vec(),
                resolution: lattice.resolution(),
            });
        }
        Ok(lattice.idx(coords))
    }

    pub fn add_density(&mut self, coords: [usize; D], amount: f32) -> Result<()> {
        let i = self.cell(coords)?;
        self.density.as_mut_slice()[i] += amount;
        Ok(())
    }

    pub fn add_velocity(&mut self, coords: [usize; D], delta: [f32; D]) -> Result<()> {
        let i = self.cell(coords)?;
        for (component, amount) in self.velocity.iter_mut().zip(delta) {
            component.as_mut_slice()[i] += amount;
        }
        Ok(())
    }

    pub fn density_at(&self, coords: [usize; D]) -> Result<f32> {
        let i = self.cell(coords)?;
        Ok(self.density.as_slice()[i])
    }

    pub fn velocity_at(&self, coords: [usize; D]) -> Result<[f32; D]> {
        let i = self.cell(coords)?;
        Ok(std::array::from_fn(|axis| self.velocity[axis].as_slice()[i]))
    }

    pub fn density(&self) -> &Field<D> {
        &self.density
    }

    pub fn velocity(&self, axis: usize) -> Option<&Field<D>> {
        self.velocity.get(axis)
    }

    pub fn velocity_fields(&self) -> &[Field<D>; D] {
        &self.velocity
    }

    pub fn step(&mut self) {
        let FluidParams {
            dt,
            diffusion,
            viscosity,
            solver,
        } = self.params;
        let boundary = &self.boundary;

        for axis in 0..D {
            diffuse(
                boundary,
                solver,
                BoundaryKind::reflect(axis),
                &mut self.velocity_prev[axis],
                &self.velocity[axis],
                viscosity,
                dt,
            );
        }
        project(
            boundary,
            solver,
            &mut self.velocity_prev,
            &mut self.pressure,
            &mut self.divergence,
        );

        for axis in 0..D {
            advect(
                boundary,
                solver,
                BoundaryKind::reflect(axis),
                &mut self.velocity[axis],
                &self.velocity_prev[axis],
                &self.velocity_prev,
                dt,
            );
        }
        project(
            boundary,
            solver,
            &mut self.velocity,
            &mut self.pressure,
            &mut self.divergence,
        );

        diffuse(
            boundary,
            solver,
            BoundaryKind::None,
            &mut self.density_prev,
            &self.density,
            diffusion,
            dt,
        );
        advect(
            boundary,
            solver,
            BoundaryKind::None,
            &mut self.density,
            &self.density_prev,
            &self.velocity,
            dt,
        );

        if log::log_enabled!(Level::Trace) {
            let d = self.diagnostics();
            log::trace!(
                "step: mass {:.4}, energy {:.4}, max speed {:.4}, divergence {:.3e}",
                d.total_density,
                d.kinetic_energy,
                d.max_speed,
                d.mean_abs_divergence
            );
        }
    }

    pub fn reset(&mut self) {
        self.density.fill(0.0);
        self.density_prev.fill(0.0);
        for component in self.velocity.iter_mut().chain(self.velocity_prev.iter_mut()) {
            component.fill(0.0);
        }
        self.pressure.fill(0.0);
        self.divergence.fill(0.0);
    }

    // Shell cells only mirror their neighbours.
    pub fn total_density(&self) -> f32 {
        self.density.interior_sum_with(|value| value)
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self
            .velocity
            .iter()
            .map(|component| component.interior_sum_with(|value| value * value))
            .sum::<f32>()
    }

    pub fn max_speed(&self) -> f32 {
        self.lattice()
            .interior()
            .map(|(i, _)| {
                self.velocity
                    .iter()
                    .map(|component| component.as_slice()[i].powi(2))
                    .sum::<f32>()
                    .sqrt()
            })
            .fold(0.0_f32, f32::max)
    }

    pub fn mean_abs_divergence(&self) -> f32 {
        mean_abs_divergence(&self.velocity)
    }

    pub fn is_finite(&self) -> bool {
        self.density.is_finite() && self.velocity.iter().all(|component| component.is_finite())
    }

    pub fn diagnostics(&self) -> Diagnostics {
        if !self.is_finite() {
            log::warn!("fluid state contains non-finite values");
        }
        Diagnostics {
            total_density: self.total_density(),
            kinetic_energy: self.kinetic_energy(),
            max_speed: self.max_speed(),
            mean_abs_divergence: self.mean_abs_divergence(),
        }
    }
}
