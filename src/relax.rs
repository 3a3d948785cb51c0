use crate::boundary::{Boundary, BoundaryKind};
use crate::field::Field;
use crate::params::SolverConfig;

pub fn lin_solve<const D: usize>(
    boundary: &Boundary<D>,
    config: SolverConfig,
    kind: BoundaryKind,
    x: &mut Field<D>,
    x0: &Field<D>,
    a: f32,
    c: f32,
) {
    let lattice = boundary.lattice();
    debug_assert_eq!(x.lattice(), lattice, "lin_solve lattice mismatch");
    debug_assert_eq!(x0.lattice(), lattice, "lin_solve lattice mismatch");
    let strides = lattice.strides();
    let c_recip = 1.0 / c;
    let source = x0.as_slice();
    // In place and in memory order: lower neighbours are already updated.
    for _ in 0..config.iterations {
        let data = x.as_mut_slice();
        for (i, _) in lattice.interior() {
            let mut sum = 0.0;
            for stride in strides {
                sum += data[i + stride] + data[i - stride];
            }
            data[i] = (source[i] + a * sum) * c_recip;
        }
        boundary.apply(kind, x);
    }
}

pub fn diffuse<const D: usize>(
    boundary: &Boundary<D>,
    config: SolverConfig,
    kind: BoundaryKind,
    x: &mut Field<D>,
    x0: &Field<D>,
    rate: f32,
    dt: f32,
) {
    let interior = (boundary.lattice().resolution() - 2) as f32;
    let a = dt * rate * interior * interior;
    let c = 1.0 + (2 * D) as f32 * a;
    lin_solve(boundary, config, kind, x, x0, a, c);
}
