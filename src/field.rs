use crate::grid::Lattice;
use rayon::prelude::*;

const PAR_MIN_WORK_PER_THREAD: usize = 4096;

pub(crate) fn should_parallel(len: usize, threshold: usize) -> bool {
    if len < threshold {
        return false;
    }
    let threads = rayon::current_num_threads().max(1);
    len / threads >= PAR_MIN_WORK_PER_THREAD
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field<const D: usize> {
    lattice: Lattice<D>,
    data: Vec<f32>,
}

pub type Field2 = Field<2>;
pub type Field3 = Field<3>;

impl<const D: usize> Field<D> {
    pub fn new(lattice: Lattice<D>, fill: f32) -> Self {
        let data = vec![fill; lattice.size()];
        Self { lattice, data }
    }

    pub fn from_fn(lattice: Lattice<D>, f: impl Fn([usize; D]) -> f32) -> Self {
        let data = (0..lattice.size()).map(|i| f(lattice.coords(i))).collect();
        Self { lattice, data }
    }

    pub fn lattice(&self) -> Lattice<D> {
        self.lattice
    }

    pub fn get(&self, coords: [usize; D]) -> f32 {
        self.data[self.lattice.idx(coords)]
    }

    pub fn set(&mut self, coords: [usize; D], value: f32) {
        let i = self.lattice.idx(coords);
        self.data[i] = value;
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    // Boundary shell is left untouched.
    pub fn update_interior(
        &mut self,
        parallel_threshold: usize,
        f: impl Fn(usize, [usize; D], f32) -> f32 + Sync,
    ) {
        let lattice = self.lattice;
        let apply = |(i, value): (usize, &mut f32)| {
            let coords = lattice.coords(i);
            if lattice.is_interior(coords) {
                *value = f(i, coords, *value);
            }
        };
        if should_parallel(self.data.len(), parallel_threshold) {
            self.data.par_iter_mut().enumerate().for_each(apply);
        } else {
            self.data.iter_mut().enumerate().for_each(apply);
        }
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    pub fn abs_sum(&self) -> f32 {
        self.data.iter().map(|value| value.abs()).sum()
    }

    pub fn max_abs(&self) -> f32 {
        self.data
            .iter()
            .map(|value| value.abs())
            .fold(0.0_f32, f32::max)
    }

    pub fn interior_sum_with(&self, f: impl Fn(f32) -> f32) -> f32 {
        self.lattice
            .interior()
            .map(|(i, _)| f(self.data[i]))
            .sum()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|value| value.is_finite())
    }

    pub fn min_max(&self) -> (f32, f32) {
        let mut iter = self.data.iter().filter(|value| value.is_finite());
        let Some(first) = iter.next() else {
            return (0.0, 0.0);
        };
        let mut min_value = *first;
        let mut max_value = *first;
        for value in iter {
            if *value < min_value {
                min_value = *value;
            }
            if *value > max_value {
                max_value = *value;
            }
        }
        (min_value, max_value)
    }
}
