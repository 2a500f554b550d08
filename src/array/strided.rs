#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use super::{selected::SelectedLayout, Layout};
use crate::{helper, CompiledRange, IndexError, Order, Range, Result, Shape, ShapeError};

/// Affine addressing, `offset + Σ strides[k] * index[k]`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct StridedLayout<const N: usize> {
    offset: usize,
    strides: [isize; N],
    order: Order,
}

impl<const N: usize> StridedLayout<N> {
    pub(crate) fn new(dims: &[usize; N], offset: usize, strides: [isize; N]) -> Self {
        Self {
            offset,
            strides,
            order: Order::of(dims, &strides),
        }
    }

    pub(crate) fn from_parts(offset: usize, strides: [isize; N], order: Order) -> Self {
        Self {
            offset,
            strides,
            order,
        }
    }

    #[inline]
    pub(crate) fn address(&self, index: &[usize; N]) -> usize {
        let address = index
            .iter()
            .zip(&self.strides)
            .fold(self.offset as isize, |acc, (&i, &stride)| {
                acc + i as isize * stride
            });
        address as usize
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub(crate) fn strides(&self) -> &[isize; N] {
        &self.strides
    }

    #[inline]
    pub(crate) fn order(&self) -> Order {
        self.order
    }

    pub(crate) fn is_flat(&self) -> bool {
        self.order == Order::ColumnMajor && self.offset == 0
    }

    /// Every reachable address must lie inside the buffer; an empty view reaches none.
    pub(crate) fn check(&self, shape: &Shape<N>, len: usize) -> Result<()> {
        if shape.is_empty() {
            return Ok(());
        }
        let (min, max) = helper::stride_extrema(shape.dims(), &self.strides, self.offset as isize);
        if min < 0 || max >= len as isize {
            return Err(ShapeError::InvalidStrides { min, max, len }.into());
        }
        Ok(())
    }

    pub(crate) fn slice<const M: usize>(
        &self,
        shape: &Shape<M>,
        index: usize,
        axis: usize,
    ) -> StridedLayout<M> {
        let offset = self.offset as isize + self.strides[axis] * index as isize;
        StridedLayout::new(
            shape.dims(),
            offset as usize,
            helper::remove_axis(&self.strides, axis),
        )
    }

    /// Restricts every axis to a range.
    ///
    /// Returns `None` when every range covers its whole axis in order.
    pub(crate) fn view(
        &self,
        shape: &Shape<N>,
        ranges: &[Range; N],
    ) -> Result<Option<(Shape<N>, Self)>> {
        let compiled = ranges
            .iter()
            .enumerate()
            .map(|(axis, range)| {
                let c = CompiledRange::new(range, shape[axis], axis, 0, self.strides[axis])?;
                if c.number() == 0 && !c.does_nothing() {
                    return Err(IndexError::EmptyRange { axis }.into());
                }
                Ok(c)
            })
            .collect::<Result<Vec<_>>>()?;
        if compiled.iter().all(CompiledRange::does_nothing) {
            return Ok(None);
        }

        let offset = compiled
            .iter()
            .fold(self.offset as isize, |acc, c| acc + c.offset());
        let dims: [usize; N] = core::array::from_fn(|k| compiled[k].number());
        let strides: [isize; N] = core::array::from_fn(|k| compiled[k].stride());

        Ok(Some((
            Shape::new(dims),
            Self::new(&dims, offset as usize, strides),
        )))
    }

    /// Gathers explicit indices along every axis; the offset is folded into the first table.
    pub(crate) fn select(&self, shape: &Shape<N>, indices: [&[isize]; N]) -> Result<Layout<N>> {
        let tables = helper::try_from_fn(|axis| {
            let offset = if axis == 0 { self.offset as isize } else { 0 };
            helper::affine_table(
                indices[axis],
                shape[axis],
                axis,
                offset,
                self.strides[axis],
            )
        })?;
        Ok(Layout::Selected(SelectedLayout::new(tables)))
    }
}
