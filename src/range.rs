use core::{
    num::NonZeroIsize,
    ops::{self, Bound, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
};

use crate::{helper, IndexError, Result};

/// A selection of indices along one axis.
///
/// Built from any of the standard range expressions; the step defaults to `1` and can be changed
/// with [`Range::step_by`]. Negative bounds count from the end of the axis.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Range {
    pub(crate) start: Bound<isize>,
    pub(crate) end: Bound<isize>,
    pub(crate) step: isize,
}

impl Range {
    /// The whole axis.
    pub const ALL: Self = Self {
        start: Bound::Unbounded,
        end: Bound::Unbounded,
        step: 1,
    };

    /// A single index.
    pub const fn at(index: isize) -> Self {
        Self {
            start: Bound::Included(index),
            end: Bound::Included(index),
            step: 1,
        }
    }

    pub const fn step_by(self, step: NonZeroIsize) -> Self {
        Self {
            step: step.get(),
            ..self
        }
    }

    pub const fn step(&self) -> isize {
        self.step
    }

    fn first_with_dim(&self, dim: usize, axis: usize) -> Result<isize> {
        match self.start {
            Bound::Included(x) => Ok(helper::fix_index(x, dim, axis)? as isize),
            Bound::Excluded(x) => Ok(helper::fix_index(x, dim, axis)? as isize + self.step.signum()),
            Bound::Unbounded => Ok(if self.step > 0 { 0 } else { dim as isize - 1 }),
        }
    }

    fn last_with_dim(&self, dim: usize, axis: usize) -> Result<isize> {
        match self.end {
            Bound::Included(x) => Ok(helper::fix_index(x, dim, axis)? as isize),
            Bound::Excluded(x) => {
                let fixed = if x < 0 { x + dim as isize } else { x };
                let valid = if self.step > 0 {
                    0 <= fixed && fixed <= dim as isize
                } else {
                    0 <= fixed && fixed < dim as isize
                };
                if !valid {
                    return Err(IndexError::OutOfBounds { index: x, axis, dim }.into());
                }
                Ok(fixed - self.step.signum())
            }
            Bound::Unbounded => Ok(if self.step > 0 { dim as isize - 1 } else { 0 }),
        }
    }

    fn is_full(&self) -> bool {
        self.start == Bound::Unbounded && self.end == Bound::Unbounded
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<ops::Range<isize>> for Range {
    fn from(v: ops::Range<isize>) -> Self {
        Self {
            start: Bound::Included(v.start),
            end: Bound::Excluded(v.end),
            step: 1,
        }
    }
}

impl From<RangeFrom<isize>> for Range {
    fn from(v: RangeFrom<isize>) -> Self {
        Self {
            start: Bound::Included(v.start),
            end: Bound::Unbounded,
            step: 1,
        }
    }
}

impl From<RangeFull> for Range {
    fn from(_: RangeFull) -> Self {
        Self::ALL
    }
}

impl From<RangeInclusive<isize>> for Range {
    fn from(v: RangeInclusive<isize>) -> Self {
        Self {
            start: Bound::Included(*v.start()),
            end: Bound::Included(*v.end()),
            step: 1,
        }
    }
}

impl From<RangeToInclusive<isize>> for Range {
    fn from(v: RangeToInclusive<isize>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Included(v.end),
            step: 1,
        }
    }
}

impl From<RangeTo<isize>> for Range {
    fn from(v: RangeTo<isize>) -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Excluded(v.end),
            step: 1,
        }
    }
}

impl From<isize> for Range {
    fn from(index: isize) -> Self {
        Self::at(index)
    }
}

/// A [`Range`] resolved against one axis of a concrete view.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CompiledRange {
    first: usize,
    offset: isize,
    stride: isize,
    number: usize,
    no_op: bool,
}

impl CompiledRange {
    /// Resolves `range` along an axis of length `dim` whose elements sit at
    /// `offset + stride * i`.
    pub fn new(range: &Range, dim: usize, axis: usize, offset: isize, stride: isize) -> Result<Self> {
        if dim == 0 && range.is_full() {
            return Ok(Self {
                first: 0,
                offset,
                stride: stride * range.step,
                number: 0,
                no_op: range.step == 1,
            });
        }

        let first = range.first_with_dim(dim, axis)?;
        let last = range.last_with_dim(dim, axis)?;
        let step = range.step;
        let number = if step > 0 && last >= first {
            ((last - first) / step + 1) as usize
        } else if step < 0 && first >= last {
            ((first - last) / -step + 1) as usize
        } else {
            0
        };
        if number > 0 && !(0..dim as isize).contains(&first) {
            return Err(IndexError::OutOfBounds {
                index: first,
                axis,
                dim,
            }
            .into());
        }

        Ok(Self {
            first: first.max(0) as usize,
            offset: offset + first * stride,
            stride: step * stride,
            number,
            no_op: first == 0 && step == 1 && number == dim,
        })
    }

    /// Whether the range selects the whole axis in its original order.
    #[inline]
    pub fn does_nothing(&self) -> bool {
        self.no_op
    }

    /// First selected index, relative to the axis.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }
}

/// Builds one [`Range`] per axis for [`Array::view`](crate::Array::view).
///
/// Each entry is a range expression or an index, optionally followed by `;step`.
///
/// ```
/// use ndview::{ranges, Range};
///
/// let r: [Range; 3] = ranges![.., 1..3, ..;-1];
/// assert_eq!(r[0], Range::ALL);
/// assert_eq!(r[2].step(), -1);
/// ```
#[macro_export]
macro_rules! ranges {
    (@fold [$( $r:tt )*] $e:expr;$s:expr) => {
        [$( $r )* $crate::Range::from($e).step_by(
            core::num::NonZeroIsize::new($s).expect("range step cannot be zero")
        )]
    };
    (@fold [$( $r:tt )*] $e:expr) => {
        [$( $r )* $crate::Range::from($e)]
    };
    (@fold [$( $r:tt )*] $e:expr;$s:expr, $( $t:tt )*) => {
        $crate::ranges!(@fold
            [$( $r )* $crate::Range::from($e).step_by(
                core::num::NonZeroIsize::new($s).expect("range step cannot be zero")
            ),]
            $( $t )*
        )
    };
    (@fold [$( $r:tt )*] $e:expr, $( $t:tt )*) => {
        $crate::ranges!(@fold [$( $r )* $crate::Range::from($e),] $( $t )*)
    };
    () => {
        [$crate::Range::ALL; 0]
    };
    ($( $t:tt )*) => {
        $crate::ranges!(@fold [] $( $t )*)
    };
}
