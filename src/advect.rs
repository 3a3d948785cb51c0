use crate::boundary::{Boundary, BoundaryKind};
use crate::field::Field;
use crate::params::SolverConfig;

pub fn advect<const D: usize>(
    boundary: &Boundary<D>,
    config: SolverConfig,
    kind: BoundaryKind,
    d: &mut Field<D>,
    d0: &Field<D>,
    velocity: &[Field<D>; D],
    dt: f32,
) {
    let lattice = boundary.lattice();
    debug_assert_eq!(d.lattice(), lattice, "advect lattice mismatch");
    debug_assert_eq!(d0.lattice(), lattice, "advect lattice mismatch");
    let strides = lattice.strides();
    let span = (lattice.resolution() - 2) as f32;
    let dt0 = dt * span;
    // Foot stays in [0.5, N - 1.5] so the upper corner is still on the lattice.
    let upper_limit = span + 0.5;
    let source = d0.as_slice();

    d.update_interior(config.parallel_threshold, |i, coords, _| {
        let mut base = [0usize; D];
        let mut frac = [0.0f32; D];
        for axis in 0..D {
            let pos = coords[axis] as f32 - dt0 * velocity[axis].as_slice()[i];
            let pos = pos.clamp(0.5, upper_limit);
            let floor = pos.floor();
            base[axis] = floor as usize;
            frac[axis] = pos - floor;
        }
        let mut value = 0.0;
        for corner in 0..(1usize << D) {
            let mut weight = 1.0;
            let mut idx = 0;
            for axis in 0..D {
                let upper = (corner >> axis) & 1;
                weight *= if upper == 1 {
                    frac[axis]
                } else {
                    1.0 - frac[axis]
                };
                idx += (base[axis] + upper) * strides[axis];
            }
            value += weight * source[idx];
        }
        value
    });
    boundary.apply(kind, d);
}
