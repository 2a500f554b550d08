#[cfg(not(feature = "std"))]
use alloc::{rc::Rc, vec::Vec};
#[cfg(feature = "std")]
use std::rc::Rc;

use super::{strided::StridedLayout, traverse, Layout};
use crate::{
    helper::{self, IndexTable},
    CompiledRange, IndexError, Range, Result, ShapeError,
};

/// Gathered addressing, `Σ tables[k][index[k]]`.
///
/// The view offset lives in the entries of the first table.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SelectedLayout<const N: usize> {
    tables: [IndexTable; N],
}

impl<const N: usize> SelectedLayout<N> {
    pub(crate) fn new(tables: [IndexTable; N]) -> Self {
        Self { tables }
    }

    #[inline]
    pub(crate) fn address(&self, index: &[usize; N]) -> usize {
        let address: isize = index
            .iter()
            .zip(&self.tables)
            .map(|(&i, table)| table[i])
            .sum();
        address as usize
    }

    pub(crate) fn dims(&self) -> [usize; N] {
        core::array::from_fn(|k| self.tables[k].len())
    }

    #[inline]
    pub(crate) fn tables(&self) -> &[IndexTable; N] {
        &self.tables
    }

    pub(crate) fn check(&self, len: usize) -> Result<()> {
        if self.tables.iter().any(|table| table.is_empty()) {
            return Ok(());
        }
        let (min, max) = helper::table_extrema(&self.tables);
        if min < 0 || max >= len as isize {
            return Err(ShapeError::IndirectionOutOfBounds { min, max, len }.into());
        }
        Ok(())
    }

    /// Drops `axis` at `index`, adding its contribution to the first remaining table.
    pub(crate) fn slice<const M: usize>(&self, index: usize, axis: usize) -> Layout<M> {
        let contribution = self.tables[axis][index];
        if M == 0 {
            return Layout::Strided(StridedLayout::new(
                &[0; M],
                contribution as usize,
                [0; M],
            ));
        }

        let mut tables: [IndexTable; M] = helper::remove_axis(&self.tables, axis);
        if contribution != 0 {
            tables[0] = tables[0].iter().map(|&entry| entry + contribution).collect();
        }
        Layout::Selected(SelectedLayout { tables })
    }

    /// Restricts every table to a range.
    ///
    /// Returns `None` when every table is kept as is.
    pub(crate) fn view(&self, ranges: &[Range; N]) -> Result<Option<Self>> {
        let tables = helper::try_from_fn(|axis| {
            let table = &self.tables[axis];
            let c = CompiledRange::new(&ranges[axis], table.len(), axis, 0, 1)?;
            if c.number() == 0 && !c.does_nothing() {
                return Err(IndexError::EmptyRange { axis }.into());
            }
            Ok(helper::select_range(table, &c))
        })?;
        Ok(self.replaced_by(tables))
    }

    /// Applies an index list to every table.
    ///
    /// Returns `None` when every list is the identity.
    pub(crate) fn select(&self, indices: [&[isize]; N]) -> Result<Option<Self>> {
        let tables = helper::try_from_fn(|axis| {
            helper::select_list(&self.tables[axis], indices[axis], axis)
        })?;
        Ok(self.replaced_by(tables))
    }

    /// A single table listing every address in logical order.
    pub(crate) fn to_flat_table(&self) -> IndexTable {
        let mut entries = Vec::with_capacity(self.dims().iter().product());
        traverse::visit_gathered(&self.tables, |address| entries.push(address as isize));
        entries.into()
    }

    fn replaced_by(&self, tables: [IndexTable; N]) -> Option<Self> {
        let unchanged = tables
            .iter()
            .zip(&self.tables)
            .all(|(new, old)| Rc::ptr_eq(new, old));
        if unchanged {
            None
        } else {
            Some(Self { tables })
        }
    }
}
