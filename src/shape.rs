use core::ops::Index;

use crate::{Order, MAX_RANK};

struct RankCheck<const N: usize>;

impl<const N: usize> RankCheck<N> {
    const VALID: () = assert!(N <= MAX_RANK, "arrays have at most 9 dimensions");
}

/// Dimensions of an array together with their cached product.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Shape<const N: usize> {
    dims: [usize; N],
    len: usize,
}

impl<const N: usize> Shape<N> {
    pub fn new(dims: [usize; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = RankCheck::<N>::VALID;

        Self {
            dims,
            len: dims.iter().product(),
        }
    }

    /// Number of elements.
    #[inline]
    pub fn array_len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn dims(&self) -> &[usize; N] {
        &self.dims
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn ndims(&self) -> usize {
        N
    }

    pub fn to_default_strides(&self, order: Order) -> [isize; N] {
        let mut strides = [0; N];
        order.convert_shape_to_default_strides(&self.dims, &mut strides);
        strides
    }

    pub(crate) fn contains(&self, index: &[usize; N]) -> bool {
        index.iter().zip(&self.dims).all(|(&i, &dim)| i < dim)
    }
}

impl<const N: usize> AsRef<[usize]> for Shape<N> {
    fn as_ref(&self) -> &[usize] {
        &self.dims
    }
}

impl<const N: usize> From<[usize; N]> for Shape<N> {
    fn from(dims: [usize; N]) -> Self {
        Self::new(dims)
    }
}

impl<const N: usize> Index<usize> for Shape<N> {
    type Output = usize;

    fn index(&self, axis: usize) -> &usize {
        &self.dims[axis]
    }
}
