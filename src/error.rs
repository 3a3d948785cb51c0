use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FluidError {
    #[error("invalid fluid configuration: {0}")]
    InvalidConfig(String),
    #[error("cell {coords:?} is outside a grid of resolution {resolution}")]
    OutOfBounds {
        coords: Vec<usize>,
        resolution: usize,
    },
}

pub type Result<T> = std::result::Result<T, FluidError>;
