use super::{strided::StridedLayout, Layout};
use crate::{helper, Order, Result, Shape, ShapeError};

/// Contiguous column-major addressing with offset zero.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct FlatLayout<const N: usize> {
    /// `products[k]` is the number of elements spanned by one step along axis `k`.
    products: [usize; N],
}

impl<const N: usize> FlatLayout<N> {
    pub(crate) fn new(shape: &Shape<N>) -> Self {
        let mut products = [0; N];
        products
            .iter_mut()
            .zip(shape.dims())
            .fold(1_usize, |acc, (product, &dim)| {
                *product = acc;
                acc * dim
            });
        Self { products }
    }

    #[inline]
    pub(crate) fn address(&self, index: &[usize; N]) -> usize {
        index
            .iter()
            .zip(&self.products)
            .map(|(&i, &product)| i * product)
            .sum()
    }

    pub(crate) fn check(shape: &Shape<N>, len: usize) -> Result<()> {
        if len < shape.array_len() {
            return Err(ShapeError::NonConformable {
                required: shape.array_len(),
                len,
            }
            .into());
        }
        Ok(())
    }

    pub(crate) fn strides(&self) -> [isize; N] {
        self.products.map(|product| product as isize)
    }

    pub(crate) fn to_strided(&self) -> StridedLayout<N> {
        StridedLayout::from_parts(0, self.strides(), Order::ColumnMajor)
    }

    /// Drops `axis` at `index`.
    ///
    /// Only the first index of the slowest axis leaves a contiguous prefix of the buffer behind;
    /// every other slice becomes strided.
    pub(crate) fn slice<const M: usize>(
        &self,
        shape: &Shape<M>,
        index: usize,
        axis: usize,
    ) -> Layout<M> {
        if axis + 1 == N && index == 0 {
            Layout::Flat(FlatLayout {
                products: helper::remove_axis(&self.products, axis),
            })
        } else {
            Layout::Strided(StridedLayout::new(
                shape.dims(),
                self.products[axis] * index,
                helper::remove_axis(&self.strides(), axis),
            ))
        }
    }
}
