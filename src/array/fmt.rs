use core::fmt;

use super::Array;
use crate::Element;

const NUM_EDGE_ELEMENTS: usize = 3;
const TRUNCATION_THRESHOLD: usize = 1_000;

struct FormatOption {
    num_edge_elements: usize,
}

impl Default for FormatOption {
    fn default() -> Self {
        Self {
            num_edge_elements: NUM_EDGE_ELEMENTS,
        }
    }
}

impl FormatOption {
    fn new(array_len: usize, alternate: bool) -> Self {
        Self::default().without_truncation(alternate || array_len < TRUNCATION_THRESHOLD)
    }

    fn without_truncation(mut self, valid: bool) -> Self {
        if valid {
            self.num_edge_elements = usize::MAX / 2;
        }
        self
    }
}

fn format_array<T, F, const N: usize>(
    array: &Array<T, N>,
    index: &mut [usize; N],
    axis: usize,
    option: &FormatOption,
    f: &mut fmt::Formatter<'_>,
    fmt: &mut F,
) -> fmt::Result
where
    T: Element,
    F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    if axis == N {
        return fmt(&array.get(*index), f);
    }

    let n_dims = N - axis;
    let indent = axis + 1;
    let len = array.dims()[axis];
    f.write_str("[")?;
    if len > option.num_edge_elements * 2 {
        for i in 0..option.num_edge_elements {
            fmt_indent(i, n_dims, indent, f)?;
            index[axis] = i;
            format_array(array, index, axis + 1, option, f, fmt)?;
        }
        fmt_indent(1, n_dims, indent, f)?;
        f.write_str("...")?;
        fmt_indent(1, n_dims, indent, f)?;
        for i in 0..option.num_edge_elements {
            fmt_indent(i, n_dims, indent, f)?;
            index[axis] = len - option.num_edge_elements + i;
            format_array(array, index, axis + 1, option, f, fmt)?;
        }
    } else {
        for i in 0..len {
            fmt_indent(i, n_dims, indent, f)?;
            index[axis] = i;
            format_array(array, index, axis + 1, option, f, fmt)?;
        }
    }
    f.write_str("]")
}

fn fmt_indent(i: usize, n_dims: usize, indent: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if i != 0 {
        f.write_str(",")?;
        if n_dims > 1 {
            for _ in 1..n_dims {
                f.write_str("\n")?;
            }
            for _ in 0..indent {
                f.write_str(" ")?;
            }
        } else {
            f.write_str(" ")?;
        }
    }
    Ok(())
}

fn format_elements<T, F, const N: usize>(
    array: &Array<T, N>,
    f: &mut fmt::Formatter<'_>,
    mut fmt: F,
) -> fmt::Result
where
    T: Element,
    F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    if array.is_empty() {
        for _ in 0..N {
            f.write_str("[")?;
        }
        for _ in 0..N {
            f.write_str("]")?;
        }
        return Ok(());
    }

    let option = FormatOption::new(array.len(), f.alternate());
    format_array(array, &mut [0; N], 0, &option, f, &mut fmt)
}

impl<T, const N: usize> fmt::Debug for Array<T, N>
where
    T: Element,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(self, f, <T as fmt::Debug>::fmt)?;
        write!(
            f,
            ", shape={:?}, storage={:?}, order={}",
            self.dims(),
            self.storage(),
            self.order().name(),
        )
    }
}

impl<T, const N: usize> fmt::Display for Array<T, N>
where
    T: Element + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(self, f, <T as fmt::Display>::fmt)
    }
}

impl<T, const N: usize> fmt::LowerExp for Array<T, N>
where
    T: Element + fmt::LowerExp,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_elements(self, f, <T as fmt::LowerExp>::fmt)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "std"))]
    use alloc::{format, vec, vec::Vec};

    use crate::{ranges, Array, Result};

    #[test]
    fn format_empty_arrays() {
        let a1 = Array::<i32, 1>::zeros([0]);
        let a2 = Array::<i32, 2>::zeros([0, 0]);
        let a3 = Array::<i32, 3>::zeros([2, 0, 4]);

        assert_eq!(format!("{}", a1), "[]");
        assert_eq!(format!("{}", a2), "[[]]");
        assert_eq!(format!("{}", a3), "[[[]]]");
    }

    #[test]
    fn format_0d_array() -> Result<()> {
        let a1 = Array::from_vec([1], vec![1_i32])?;
        let a0 = a1.slice(0, 0)?;

        assert_eq!(format!("{}", a0), "1");

        Ok(())
    }

    #[test]
    fn format_1d_array() -> Result<()> {
        const N: usize = super::TRUNCATION_THRESHOLD + 10;
        let a1 = Array::from_vec([N], vec![1_i32; N])?;

        assert_eq!(format!("{}", a1), "[1, 1, 1, ..., 1, 1, 1]");
        assert_eq!(format!("{:#}", a1), format!("[{}]", ["1"; N].join(", ")));

        Ok(())
    }

    #[test]
    fn format_2d_array_first_axis_outermost() -> Result<()> {
        let a = Array::from_vec([2, 3], vec![1_i64, 4, 2, 5, 3, 6])?;

        assert_eq!(format!("{}", a), "[[1, 2, 3],\n [4, 5, 6]]");
        assert_eq!(
            format!("{:?}", a),
            "[[1, 2, 3],\n [4, 5, 6]], shape=[2, 3], storage=Flat, order=column major"
        );

        Ok(())
    }

    #[test]
    fn format_view() -> Result<()> {
        let a = Array::from_vec([2, 3], vec![1.5_f64, 4.0, 2.0, 5.0, 3.0, 6.0])?;
        let v = a.view(ranges![..;-1, 1..])?;

        assert_eq!(format!("{}", v), "[[5, 6],\n [2, 3]]");
        assert_eq!(format!("{:e}", a.slice(0, 0)?), "[1.5e0, 2e0, 3e0]");

        Ok(())
    }

    #[test]
    fn format_3d_array() -> Result<()> {
        let a3 = Array::from_vec([50, 50, 50], vec![1_i8; 50 * 50 * 50])?;
        let expected = "\
[[[1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  ...,
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1]],

 [[1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  ...,
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1]],

 [[1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  ...,
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1]],

 ...,

 [[1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  ...,
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1]],

 [[1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  ...,
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1]],

 [[1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  ...,
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1],
  [1, 1, 1, ..., 1, 1, 1]]]";

        assert_eq!(format!("{}", a3), expected);

        Ok(())
    }
}
