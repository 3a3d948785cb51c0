// Cell (x, y[, z]) lives at x + y*N [+ z*N^2]. Any coordinate at 0 or N - 1
// puts the cell on the boundary shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice<const D: usize> {
    resolution: usize,
    strides: [usize; D],
}

pub type Lattice2 = Lattice<2>;
pub type Lattice3 = Lattice<3>;

impl<const D: usize> Lattice<D> {
    pub fn new(resolution: usize) -> Self {
        assert!(resolution >= 3, "resolution must be >= 3");
        let mut strides = [1; D];
        for axis in 1..D {
            strides[axis] = strides[axis - 1] * resolution;
        }
        Self {
            resolution,
            strides,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn strides(&self) -> [usize; D] {
        self.strides
    }

    pub fn size(&self) -> usize {
        self.resolution.pow(D as u32)
    }

    pub fn contains(&self, coords: [usize; D]) -> bool {
        coords.iter().all(|c| *c < self.resolution)
    }

    pub fn idx(&self, coords: [usize; D]) -> usize {
        debug_assert!(self.contains(coords));
        coords
            .iter()
            .zip(self.strides.iter())
            .map(|(c, stride)| c * stride)
            .sum()
    }

    pub fn coords(&self, idx: usize) -> [usize; D] {
        debug_assert!(idx < self.size());
        let mut coords = [0; D];
        for axis in 0..D {
            coords[axis] = (idx / self.strides[axis]) % self.resolution;
        }
        coords
    }

    pub fn is_interior(&self, coords: [usize; D]) -> bool {
        coords.iter().all(|c| *c >= 1 && *c + 1 < self.resolution)
    }

    pub fn interior_size(&self) -> usize {
        (self.resolution - 2).pow(D as u32)
    }

    // x fastest, the order every relaxation sweep visits them.
    pub fn interior(&self) -> InteriorCells<D> {
        InteriorCells {
            lattice: *self,
            next: Some([1; D]),
        }
    }
}

pub struct InteriorCells<const D: usize> {
    lattice: Lattice<D>,
    next: Option<[usize; D]>,
}

impl<const D: usize> Iterator for InteriorCells<D> {
    type Item = (usize, [usize; D]);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let last = self.lattice.resolution - 2;
        let mut following = current;
        let mut carried = true;
        for c in following.iter_mut() {
            if *c < last {
                *c += 1;
                carried = false;
                break;
            }
            *c = 1;
        }
        self.next = if carried { None } else { Some(following) };
        Some((self.lattice.idx(current), current))
    }
}
