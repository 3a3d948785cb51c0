use crate::field::Field;
use crate::grid::Lattice;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    None,
    ReflectX,
    ReflectY,
    ReflectZ,
}

impl BoundaryKind {
    pub fn reflect(axis: usize) -> Self {
        match axis {
            0 => BoundaryKind::ReflectX,
            1 => BoundaryKind::ReflectY,
            2 => BoundaryKind::ReflectZ,
            _ => panic!("no reflective boundary for axis {axis}"),
        }
    }

    pub fn reflected_axis(self) -> Option<usize> {
        match self {
            BoundaryKind::None => None,
            BoundaryKind::ReflectX => Some(0),
            BoundaryKind::ReflectY => Some(1),
            BoundaryKind::ReflectZ => Some(2),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct WallCell {
    cell: usize,
    inner: usize,
    axis: usize,
}

#[derive(Clone, Copy, Debug)]
struct JunctionCell<const D: usize> {
    cell: usize,
    neighbors: [usize; D],
    count: usize,
}

// Junction cells average the shell neighbours one step inward along each of
// their wall axes. They are stored by ascending wall count so those
// neighbours are already settled when a junction is written.
#[derive(Clone, Debug)]
pub struct Boundary<const D: usize> {
    lattice: Lattice<D>,
    walls: Vec<WallCell>,
    junctions: Vec<JunctionCell<D>>,
}

impl<const D: usize> Boundary<D> {
    pub fn new(lattice: Lattice<D>) -> Self {
        let last = lattice.resolution() - 1;
        let strides = lattice.strides();
        let mut walls = Vec::new();
        let mut junctions = Vec::new();
        for cell in 0..lattice.size() {
            let coords = lattice.coords(cell);
            let mut neighbors = [0; D];
            let mut wall_axis = 0;
            let mut count = 0;
            for axis in 0..D {
                let inward = match coords[axis] {
                    0 => cell + strides[axis],
                    c if c == last => cell - strides[axis],
                    _ => continue,
                };
                neighbors[count] = inward;
                wall_axis = axis;
                count += 1;
            }
            match count {
                0 => {}
                1 => walls.push(WallCell {
                    cell,
                    inner: neighbors[0],
                    axis: wall_axis,
                }),
                _ => junctions.push(JunctionCell {
                    cell,
                    neighbors,
                    count,
                }),
            }
        }
        junctions.sort_by_key(|junction| junction.count);
        Self {
            lattice,
            walls,
            junctions,
        }
    }

    pub fn lattice(&self) -> Lattice<D> {
        self.lattice
    }

    pub fn apply(&self, kind: BoundaryKind, field: &mut Field<D>) {
        debug_assert_eq!(field.lattice(), self.lattice, "boundary lattice mismatch");
        let negated = kind.reflected_axis();
        debug_assert!(
            negated.map_or(true, |axis| axis < D),
            "{kind:?} has no wall on a {}D lattice",
            D
        );
        let data = field.as_mut_slice();
        for wall in &self.walls {
            let value = data[wall.inner];
            data[wall.cell] = if negated == Some(wall.axis) {
                -value
            } else {
                value
            };
        }
        for junction in &self.junctions {
            let sum: f32 = junction.neighbors[..junction.count]
                .iter()
                .map(|neighbor| data[*neighbor])
                .sum();
            data[junction.cell] = sum / junction.count as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field2, Field3};
    use crate::grid::{Lattice2, Lattice3};

    fn assert_close(a: f32, b: f32, tol: f32) {
        assert!(
            (a - b).abs() <= tol,
            "expected {a} to be within {tol} of {b}"
        );
    }

    fn ramp2(lattice: Lattice2) -> Field2 {
        Field2::from_fn(lattice, |[x, y]| (1 + x + 7 * y) as f32)
    }

    #[test]
    fn none_mirrors_interior_neighbour() {
        let lattice = Lattice2::new(5);
        let boundary = Boundary::new(lattice);
        let mut field = ramp2(lattice);
        boundary.apply(BoundaryKind::None, &mut field);
        for i in 1..4 {
            assert_eq!(field.get([0, i]), field.get([1, i]));
            assert_eq!(field.get([4, i]), field.get([3, i]));
            assert_eq!(field.get([i, 0]), field.get([i, 1]));
            assert_eq!(field.get([i, 4]), field.get([i, 3]));
        }
    }

    #[test]
    fn reflect_negates_only_perpendicular_walls() {
        let lattice = Lattice2::new(5);
        let boundary = Boundary::new(lattice);
        let mut field = ramp2(lattice);
        boundary.apply(BoundaryKind::ReflectX, &mut field);
        for i in 1..4 {
            assert_eq!(field.get([0, i]), -field.get([1, i]));
            assert_eq!(field.get([4, i]), -field.get([3, i]));
            assert_eq!(field.get([i, 0]), field.get([i, 1]));
            assert_eq!(field.get([i, 4]), field.get([i, 3]));
        }

        let mut field = ramp2(lattice);
        boundary.apply(BoundaryKind::ReflectY, &mut field);
        for i in 1..4 {
            assert_eq!(field.get([0, i]), field.get([1, i]));
            assert_eq!(field.get([i, 0]), -field.get([i, 1]));
            assert_eq!(field.get([i, 4]), -field.get([i, 3]));
        }
    }

    #[test]
    fn corners_average_adjacent_wall_cells() {
        let lattice = Lattice2::new(4);
        let boundary = Boundary::new(lattice);
        let mut field = ramp2(lattice);
        boundary.apply(BoundaryKind::ReflectX, &mut field);
        let expected = 0.5 * (field.get([1, 0]) + field.get([0, 1]));
        assert_eq!(field.get([0, 0]), expected);
        let expected = 0.5 * (field.get([2, 3]) + field.get([3, 2]));
        assert_eq!(field.get([3, 3]), expected);
    }

    #[test]
    fn interior_is_untouched() {
        let lattice = Lattice3::new(5);
        let boundary = Boundary::new(lattice);
        let original = Field3::from_fn(lattice, |[x, y, z]| (x * y + z) as f32);
        let mut field = original.clone();
        boundary.apply(BoundaryKind::ReflectZ, &mut field);
        for (i, _) in lattice.interior() {
            assert_eq!(field.as_slice()[i], original.as_slice()[i]);
        }
    }

    #[test]
    fn three_d_shell_is_fully_resolved() {
        let lattice = Lattice3::new(4);
        let boundary = Boundary::new(lattice);
        let mut field = Field3::new(lattice, f32::NAN);
        for (i, _) in lattice.interior() {
            field.as_mut_slice()[i] = 2.0;
        }
        boundary.apply(BoundaryKind::None, &mut field);
        assert!(field.is_finite());
        assert_close(field.get([0, 0, 0]), 2.0, 1e-6);
        assert_close(field.get([0, 0, 2]), 2.0, 1e-6);
        assert_close(field.sum(), 2.0 * 64.0, 1e-4);
    }

    #[test]
    fn three_d_corner_averages_edges() {
        let lattice = Lattice3::new(4);
        let boundary = Boundary::new(lattice);
        let mut field = Field3::from_fn(lattice, |[x, y, z]| (x + 4 * y + 16 * z) as f32);
        boundary.apply(BoundaryKind::ReflectZ, &mut field);
        assert_eq!(field.get([1, 1, 0]), -field.get([1, 1, 1]));
        let edge = 0.5 * (field.get([1, 0, 1]) + field.get([0, 1, 1]));
        assert_eq!(field.get([0, 0, 1]), edge);
        let corner =
            (field.get([1, 0, 0]) + field.get([0, 1, 0]) + field.get([0, 0, 1])) / 3.0;
        assert_close(field.get([0, 0, 0]), corner, 1e-5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no wall")]
    fn reflect_z_on_plane_lattice_is_rejected() {
        let lattice = Lattice2::new(5);
        let boundary = Boundary::new(lattice);
        let mut field = ramp2(lattice);
        boundary.apply(BoundaryKind::ReflectZ, &mut field);
    }
}
