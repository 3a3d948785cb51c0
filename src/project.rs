use crate::boundary::{Boundary, BoundaryKind};
use crate::field::Field;
use crate::params::SolverConfig;
use crate::relax::lin_solve;

// Scaled by -0.5 / N for the pressure solve.
pub fn divergence_into<const D: usize>(
    out: &mut Field<D>,
    velocity: &[Field<D>; D],
    parallel_threshold: usize,
) {
    let lattice = out.lattice();
    let strides = lattice.strides();
    let n = lattice.resolution() as f32;
    out.update_interior(parallel_threshold, |i, _, _| {
        let mut sum = 0.0;
        for (component, stride) in velocity.iter().zip(strides) {
            let v = component.as_slice();
            sum += v[i + stride] - v[i - stride];
        }
        -0.5 * sum / n
    });
}

pub fn mean_abs_divergence<const D: usize>(velocity: &[Field<D>; D]) -> f32 {
    let lattice = velocity[0].lattice();
    let mut div = Field::new(lattice, 0.0);
    divergence_into(&mut div, velocity, usize::MAX);
    div.interior_sum_with(f32::abs) / lattice.interior_size() as f32
}

pub fn project<const D: usize>(
    boundary: &Boundary<D>,
    config: SolverConfig,
    velocity: &mut [Field<D>; D],
    pressure: &mut Field<D>,
    divergence: &mut Field<D>,
) {
    let lattice = boundary.lattice();
    let strides = lattice.strides();
    let n = lattice.resolution() as f32;

    divergence_into(divergence, velocity, config.parallel_threshold);
    pressure.update_interior(config.parallel_threshold, |_, _, _| 0.0);
    boundary.apply(BoundaryKind::None, divergence);
    boundary.apply(BoundaryKind::None, pressure);

    lin_solve(
        boundary,
        config,
        BoundaryKind::None,
        pressure,
        divergence,
        1.0,
        (2 * D) as f32,
    );

    let p = pressure.as_slice();
    for (axis, component) in velocity.iter_mut().enumerate() {
        let stride = strides[axis];
        component.update_interior(config.parallel_threshold, |i, _, value| {
            value - 0.5 * (p[i + stride] - p[i - stride]) * n
        });
        boundary.apply(BoundaryKind::reflect(axis), component);
    }
}
