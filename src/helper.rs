//! Index fixing and index-table composition shared by every view constructor.

#[cfg(not(feature = "std"))]
use alloc::{rc::Rc, vec::Vec};
#[cfg(feature = "std")]
use std::rc::Rc;

use crate::{CompiledRange, IndexError, Result};

/// Per-axis address contributions of a gathered view.
pub type IndexTable = Rc<[isize]>;

/// Wraps a negative index once and checks it against `dim`.
pub fn fix_index(index: isize, dim: usize, axis: usize) -> Result<usize> {
    let fixed = if index < 0 {
        index + dim as isize
    } else {
        index
    };
    if 0 <= fixed && (fixed as usize) < dim {
        Ok(fixed as usize)
    } else {
        Err(IndexError::OutOfBounds { index, axis, dim }.into())
    }
}

/// Wraps a negative axis once and checks it against `rank`.
pub fn fix_axis(axis: isize, rank: usize) -> Result<usize> {
    let fixed = if axis < 0 { axis + rank as isize } else { axis };
    if 0 <= fixed && (fixed as usize) < rank {
        Ok(fixed as usize)
    } else {
        Err(IndexError::AxisOutOfBounds { axis, rank }.into())
    }
}

/// Copies `src` without the element at `axis`.
pub(crate) fn remove_axis<U, const N: usize, const M: usize>(src: &[U; N], axis: usize) -> [U; M]
where
    U: Clone,
{
    debug_assert_eq!(M + 1, N);
    debug_assert!(axis < N);

    core::array::from_fn(|k| if k < axis { src[k].clone() } else { src[k + 1].clone() })
}

/// Builds a per-axis array, stopping at the first axis that fails.
pub(crate) fn try_from_fn<U, F, const N: usize>(f: F) -> Result<[U; N]>
where
    U: Clone,
    F: FnMut(usize) -> Result<U>,
{
    let items = (0..N).map(f).collect::<Result<Vec<_>>>()?;
    Ok(core::array::from_fn(|k| items[k].clone()))
}

/// Builds the table of an affine axis, `offset + stride * i` for every `i` in `indices`.
pub fn affine_table(
    indices: &[isize],
    dim: usize,
    axis: usize,
    offset: isize,
    stride: isize,
) -> Result<IndexTable> {
    if indices.is_empty() {
        return Err(IndexError::EmptyRange { axis }.into());
    }
    indices
        .iter()
        .map(|&index| Ok(offset + stride * fix_index(index, dim, axis)? as isize))
        .collect()
}

/// Applies a range compiled with base offset `0` and base stride `1` to an existing table.
///
/// A range that does nothing hands back the same allocation.
pub fn select_range(table: &IndexTable, range: &CompiledRange) -> IndexTable {
    if range.does_nothing() {
        return Rc::clone(table);
    }
    (0..range.number())
        .map(|j| table[(range.offset() + range.stride() * j as isize) as usize])
        .collect()
}

/// Applies an explicit index list to an existing table.
///
/// A list equal to `0..table.len()` hands back the same allocation.
pub fn select_list(table: &IndexTable, indices: &[isize], axis: usize) -> Result<IndexTable> {
    if indices.is_empty() {
        return Err(IndexError::EmptyRange { axis }.into());
    }
    let fixed = indices
        .iter()
        .map(|&index| fix_index(index, table.len(), axis))
        .collect::<Result<Vec<_>>>()?;
    if fixed.len() == table.len() && fixed.iter().enumerate().all(|(j, &i)| i == j) {
        return Ok(Rc::clone(table));
    }

    Ok(fixed.into_iter().map(|i| table[i]).collect())
}

/// Smallest and largest address reachable through `tables`.
///
/// Every axis varies independently, so the sums of the per-axis extrema are reached exactly.
pub(crate) fn table_extrema(tables: &[IndexTable]) -> (isize, isize) {
    tables.iter().fold((0, 0), |(min, max), table| {
        let lo = table.iter().copied().min().unwrap_or(0);
        let hi = table.iter().copied().max().unwrap_or(0);
        (min + lo, max + hi)
    })
}

/// Smallest and largest address reachable from `offset` through `strides`.
pub(crate) fn stride_extrema(shape: &[usize], strides: &[isize], offset: isize) -> (isize, isize) {
    shape
        .iter()
        .zip(strides)
        .fold((offset, offset), |(min, max), (&dim, &stride)| {
            let end = stride * (dim as isize - 1);
            if end >= 0 {
                (min, max + end)
            } else {
                (min + end, max)
            }
        })
}
