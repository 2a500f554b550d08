//! Reference-counted element buffers shared by any number of views.

mod routine;

#[cfg(not(feature = "std"))]
use alloc::{rc::Rc, vec::Vec};
use core::{cell::Cell, fmt, iter::FromIterator};
#[cfg(feature = "std")]
use std::rc::Rc;

use num_traits::{One, Zero};

/// One-dimensional backing store of an array.
///
/// Cloning a `Buffer` shares the elements; writes through one clone are seen by every other.
/// Elements live in [`Cell`]s, so a buffer is mutated through shared references and is neither
/// `Send` nor `Sync`.
pub struct Buffer<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T> Buffer<T>
where
    T: Copy,
{
    pub fn from_elem(len: usize, value: T) -> Self {
        Self {
            cells: routine::create_buf(len, value),
        }
    }

    pub fn zeros(len: usize) -> Self
    where
        T: Zero,
    {
        Self::from_elem(len, T::zero())
    }

    pub fn ones(len: usize) -> Self
    where
        T: One,
    {
        Self::from_elem(len, T::one())
    }

    #[inline]
    pub fn get(&self, address: usize) -> T {
        self.cells[address].get()
    }

    #[inline]
    pub fn set(&self, address: usize, value: T) {
        self.cells[address].set(value)
    }

    #[inline]
    pub fn update<F>(&self, address: usize, f: F)
    where
        F: FnOnce(T) -> T,
    {
        let cell = &self.cells[address];
        cell.set(f(cell.get()));
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = T> + '_ {
        self.cells.iter().map(Cell::get)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// A buffer holding a copy of the first `len` elements.
    pub fn copy_prefix(&self, len: usize) -> Self {
        self.cells[..len].iter().map(Cell::get).collect()
    }
}

impl<T> Buffer<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Whether both buffers share the same elements.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.cells, &other.cells)
    }

    /// Number of handles, views included, sharing these elements.
    pub fn share_count(this: &Self) -> usize {
        Rc::strong_count(&this.cells)
    }
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T> fmt::Debug for Buffer<T>
where
    T: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(data: Vec<T>) -> Self {
        Self {
            cells: routine::collect_buf(data),
        }
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            cells: routine::collect_buf(iter),
        }
    }
}
