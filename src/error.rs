#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::num::TryFromIntError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    TryFromInt(#[from] TryFromIntError),
}

/// Invalid coordinates, axes or ranges passed to an accessor or a view constructor.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum IndexError {
    #[error("axis {axis} is out of bounds for array of rank {rank}")]
    AxisOutOfBounds { axis: isize, rank: usize },
    #[error("range selects no elements along axis {axis}")]
    EmptyRange { axis: usize },
    #[error("index {index} is out of bounds for axis {axis} with size {dim}")]
    OutOfBounds { index: isize, axis: usize, dim: usize },
}

/// A backing buffer that cannot hold the addresses a view would reach.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("index tables reach addresses {min}..={max} of a buffer of length {len}")]
    IndirectionOutOfBounds { min: isize, max: isize, len: usize },
    #[error("strides reach addresses {min}..={max} of a buffer of length {len}")]
    InvalidStrides { min: isize, max: isize, len: usize },
    #[error("wrapped buffer of length {len} is too small for {required} elements")]
    NonConformable { required: usize, len: usize },
    #[error("shapes {expected:?} and {found:?} do not match")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
}
