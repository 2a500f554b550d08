use super::Array;
use crate::{Element, Result};

/// A zero-dimensional array holding exactly one element.
pub type Scalar<T> = Array<T, 0>;

impl<T> Array<T, 0>
where
    T: Element,
{
    #[inline]
    pub fn value(&self) -> T {
        self.get([])
    }

    #[inline]
    pub fn set_value(&self, value: T) {
        self.set([], value)
    }
}

macro_rules! impl_slice {
    ($( $n:literal => $m:literal ),+ $(,)?) => {
        $(
            impl<T> Array<T, $n>
            where
                T: Element,
            {
                /// Fixes `axis` at `index`, sharing the buffer.
                ///
                /// Negative values of either count from the end.
                pub fn slice(&self, index: isize, axis: isize) -> Result<Array<T, $m>> {
                    self.slice_axis::<$m>(index, axis)
                }

                /// Fixes the last axis at `index`.
                pub fn slice_last(&self, index: isize) -> Result<Array<T, $m>> {
                    self.slice_axis::<$m>(index, -1)
                }
            }
        )+
    };
}

impl_slice!(
    1 => 0,
    2 => 1,
    3 => 2,
    4 => 3,
    5 => 4,
    6 => 5,
    7 => 6,
    8 => 7,
    9 => 8,
);
