#[cfg(not(feature = "std"))]
use alloc::rc::Rc;
use core::{cell::Cell, iter};
#[cfg(feature = "std")]
use std::rc::Rc;

pub fn create_buf<T>(len: usize, value: T) -> Rc<[Cell<T>]>
where
    T: Copy,
{
    iter::repeat(value).take(len).map(Cell::new).collect()
}

pub fn collect_buf<T, I>(iter: I) -> Rc<[Cell<T>]>
where
    I: IntoIterator<Item = T>,
{
    iter.into_iter().map(Cell::new).collect()
}
