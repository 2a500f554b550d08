mod flat;
mod fmt;
mod rank;
mod selected;
mod strided;
mod traverse;

pub use rank::Scalar;

#[cfg(not(feature = "std"))]
use alloc::{borrow::Cow, vec::Vec};
#[cfg(feature = "std")]
use std::borrow::Cow;

use log::{debug, trace};

use self::{flat::FlatLayout, selected::SelectedLayout, strided::StridedLayout, traverse::Traversal};
use crate::{
    helper::{self, IndexTable},
    Buffer, Element, ElementKind, IndexError, Order, Range, Result, Shape, ShapeError,
};

/// How an array maps its indices onto its buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StorageKind {
    /// Contiguous, column-major, starting at the first buffer element.
    Flat,
    /// An offset plus one signed stride per axis.
    Strided,
    /// One table of address contributions per axis.
    Selected,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Layout<const N: usize> {
    Flat(FlatLayout<N>),
    Strided(StridedLayout<N>),
    Selected(SelectedLayout<N>),
}

impl<const N: usize> Layout<N> {
    #[inline]
    fn address(&self, index: &[usize; N]) -> usize {
        match self {
            Self::Flat(flat) => flat.address(index),
            Self::Strided(strided) => strided.address(index),
            Self::Selected(selected) => selected.address(index),
        }
    }
}

/// An `N`-dimensional view of a shared [`Buffer`].
///
/// Views, slices and selections share the buffer of the array they come from, so a write through
/// any of them is visible through all others. Cloning an array clones the view, not the elements;
/// use [`Array::copy`] for an independent array.
#[derive(Clone)]
pub struct Array<T, const N: usize> {
    shape: Shape<N>,
    buffer: Buffer<T>,
    layout: Layout<N>,
}

impl<T, const N: usize> Array<T, N>
where
    T: Element,
{
    pub fn zeros(shape: impl Into<Shape<N>>) -> Self {
        Self::from_elem(shape, T::zero())
    }

    pub fn ones(shape: impl Into<Shape<N>>) -> Self {
        Self::from_elem(shape, T::one())
    }

    pub fn from_elem(shape: impl Into<Shape<N>>, value: T) -> Self {
        let shape = shape.into();
        let buffer = Buffer::from_elem(shape.array_len(), value);
        Self::flat(shape, buffer)
    }

    /// Takes ownership of `data`, read in column-major order.
    pub fn from_vec(shape: impl Into<Shape<N>>, data: Vec<T>) -> Result<Self> {
        Self::wrap(shape, Buffer::from(data))
    }

    /// A flat view of `buffer`.
    ///
    /// The buffer may be longer than the array; only its prefix is addressed.
    pub fn wrap(shape: impl Into<Shape<N>>, buffer: Buffer<T>) -> Result<Self> {
        let shape = shape.into();
        FlatLayout::check(&shape, buffer.len())?;
        Ok(Self::flat(shape, buffer))
    }

    /// An affine view of `buffer`, element `i` at `offset + Σ strides[k] * i[k]`.
    pub fn wrap_strided(
        shape: impl Into<Shape<N>>,
        buffer: Buffer<T>,
        offset: usize,
        strides: [isize; N],
    ) -> Result<Self> {
        let shape = shape.into();
        let layout = StridedLayout::new(shape.dims(), offset, strides);
        let array = Self::from_parts(shape, buffer, Layout::Strided(layout));
        array.check_sanity()?;
        Ok(array)
    }

    /// A gathered view of `buffer`, element `i` at `Σ tables[k][i[k]]`.
    ///
    /// The length of each table is the dimension of its axis.
    pub fn wrap_selected<V>(buffer: Buffer<T>, tables: [V; N]) -> Result<Self>
    where
        V: Into<IndexTable>,
    {
        let layout = SelectedLayout::new(tables.map(Into::into));
        let shape = Shape::new(layout.dims());
        let array = Self::from_parts(shape, buffer, Layout::Selected(layout));
        array.check_sanity()?;
        Ok(array)
    }

    fn flat(shape: Shape<N>, buffer: Buffer<T>) -> Self {
        let layout = FlatLayout::new(&shape);
        Self::from_parts(shape, buffer, Layout::Flat(layout))
    }

    fn from_parts(shape: Shape<N>, buffer: Buffer<T>, layout: Layout<N>) -> Self {
        Self {
            shape,
            buffer,
            layout,
        }
    }

    #[inline]
    pub fn shape(&self) -> &Shape<N> {
        &self.shape
    }

    #[inline]
    pub fn dims(&self) -> &[usize; N] {
        self.shape.dims()
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        N
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.array_len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    #[inline]
    pub fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }

    pub fn kind(&self) -> ElementKind {
        T::KIND
    }

    pub fn storage(&self) -> StorageKind {
        match self.layout {
            Layout::Flat(_) => StorageKind::Flat,
            Layout::Strided(_) => StorageKind::Strided,
            Layout::Selected(_) => StorageKind::Selected,
        }
    }

    pub fn order(&self) -> Order {
        match &self.layout {
            Layout::Flat(_) => Order::ColumnMajor,
            Layout::Strided(strided) => strided.order(),
            Layout::Selected(_) => Order::NonSpecific,
        }
    }

    /// Whether the elements occupy the start of the buffer in column-major order.
    pub fn is_flat(&self) -> bool {
        match &self.layout {
            Layout::Flat(_) => true,
            Layout::Strided(strided) => strided.is_flat(),
            Layout::Selected(_) => false,
        }
    }

    /// Buffer offset of the first element; `None` for gathered views.
    pub fn offset(&self) -> Option<usize> {
        match &self.layout {
            Layout::Flat(_) => Some(0),
            Layout::Strided(strided) => Some(strided.offset()),
            Layout::Selected(_) => None,
        }
    }

    /// Per-axis strides; `None` for gathered views.
    pub fn strides(&self) -> Option<[isize; N]> {
        match &self.layout {
            Layout::Flat(flat) => Some(flat.strides()),
            Layout::Strided(strided) => Some(*strided.strides()),
            Layout::Selected(_) => None,
        }
    }

    /// Verifies that every element maps inside the buffer.
    pub fn check_sanity(&self) -> Result<()> {
        let len = self.buffer.len();
        let checked = match &self.layout {
            Layout::Flat(_) => FlatLayout::check(&self.shape, len),
            Layout::Strided(strided) => strided.check(&self.shape, len),
            Layout::Selected(selected) => selected.check(len),
        };
        if let Err(e) = &checked {
            debug!("rejecting {:?} view of shape {:?}: {}", self.storage(), self.dims(), e);
        }
        checked
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn get(&self, index: [usize; N]) -> T {
        self.assert_contains(&index);
        self.buffer.get(self.layout.address(&index))
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn set(&self, index: [usize; N], value: T) {
        self.assert_contains(&index);
        self.buffer.set(self.layout.address(&index), value)
    }

    pub fn try_get(&self, index: [usize; N]) -> Result<T> {
        for (axis, (&i, &dim)) in index.iter().zip(self.dims()).enumerate() {
            if i >= dim {
                return Err(IndexError::OutOfBounds {
                    index: i as isize,
                    axis,
                    dim,
                }
                .into());
            }
        }
        Ok(self.buffer.get(self.layout.address(&index)))
    }

    fn assert_contains(&self, index: &[usize; N]) {
        assert!(
            self.shape.contains(index),
            "index {:?} is out of bounds for shape {:?}",
            index,
            self.dims(),
        );
    }

    /// Fixes `axis` at `index`, dropping one dimension.
    pub(crate) fn slice_axis<const M: usize>(&self, index: isize, axis: isize) -> Result<Array<T, M>> {
        debug_assert_eq!(M + 1, N);

        let axis = helper::fix_axis(axis, N)?;
        let index = helper::fix_index(index, self.shape[axis], axis)?;
        let shape = Shape::new(helper::remove_axis(self.dims(), axis));
        let layout = match &self.layout {
            Layout::Flat(flat) => flat.slice(&shape, index, axis),
            Layout::Strided(strided) => Layout::Strided(strided.slice(&shape, index, axis)),
            Layout::Selected(selected) => selected.slice(index, axis),
        };
        Ok(Array::from_parts(shape, self.buffer.clone(), layout))
    }

    /// Restricts every axis to a range.
    ///
    /// Bounds are never clamped; an index outside its axis is an error, and so is a range that
    /// selects nothing. When every range covers its whole axis in order, `self` is returned
    /// borrowed.
    pub fn view(&self, ranges: [Range; N]) -> Result<Cow<'_, Self>> {
        let viewed = match &self.layout {
            Layout::Flat(flat) => flat
                .to_strided()
                .view(&self.shape, &ranges)?
                .map(|(shape, strided)| (shape, Layout::Strided(strided))),
            Layout::Strided(strided) => strided
                .view(&self.shape, &ranges)?
                .map(|(shape, strided)| (shape, Layout::Strided(strided))),
            Layout::Selected(selected) => selected
                .view(&ranges)?
                .map(|selected| (Shape::new(selected.dims()), Layout::Selected(selected))),
        };
        Ok(match viewed {
            Some((shape, layout)) => Cow::Owned(Self::from_parts(shape, self.buffer.clone(), layout)),
            None => Cow::Borrowed(self),
        })
    }

    /// Picks explicit indices along every axis.
    ///
    /// The result is always a gathered view. Indices may repeat or come in any order; negative
    /// ones count from the end. When `self` is already gathered and every list is the identity,
    /// `self` is returned borrowed.
    pub fn select(&self, indices: [&[isize]; N]) -> Result<Cow<'_, Self>> {
        if N == 0 {
            return Ok(Cow::Borrowed(self));
        }
        let layout = match &self.layout {
            Layout::Flat(flat) => flat.to_strided().select(&self.shape, indices)?,
            Layout::Strided(strided) => strided.select(&self.shape, indices)?,
            Layout::Selected(selected) => match selected.select(indices)? {
                Some(selected) => Layout::Selected(selected),
                None => return Ok(Cow::Borrowed(self)),
            },
        };
        let shape = Shape::new(core::array::from_fn(|k| indices[k].len()));
        Ok(Cow::Owned(Self::from_parts(shape, self.buffer.clone(), layout)))
    }

    /// A rank-1 view of every element in column-major order.
    ///
    /// Shares the buffer whenever the elements can be reached with a single stride or table;
    /// otherwise the elements are copied.
    pub fn as_1d(&self) -> Array<T, 1> {
        let shape = Shape::new([self.len()]);
        let layout = match &self.layout {
            Layout::Flat(_) => Layout::Flat(FlatLayout::new(&shape)),
            Layout::Strided(strided) if N == 1 => Layout::Strided(StridedLayout::new(
                shape.dims(),
                strided.offset(),
                [strided.strides()[0]],
            )),
            Layout::Strided(strided) if strided.order() == Order::ColumnMajor => {
                if strided.offset() == 0 {
                    Layout::Flat(FlatLayout::new(&shape))
                } else {
                    Layout::Strided(StridedLayout::new(shape.dims(), strided.offset(), [1]))
                }
            }
            Layout::Strided(_) => {
                trace!("copying {} elements of a strided view into a flat one", self.len());
                return Array::flat(shape, Buffer::from(self.to_vec()));
            }
            Layout::Selected(selected) if N == 1 => {
                Layout::Selected(SelectedLayout::new([selected.tables()[0].clone()]))
            }
            Layout::Selected(selected) => {
                Layout::Selected(SelectedLayout::new([selected.to_flat_table()]))
            }
        };
        Array::from_parts(shape, self.buffer.clone(), layout)
    }

    /// The elements as a column-major buffer.
    ///
    /// Without `force_copy`, a flat array whose buffer holds exactly its elements hands that
    /// buffer back; every other case returns a fresh copy.
    pub fn flatten(&self, force_copy: bool) -> Buffer<T> {
        if self.is_flat() {
            if !force_copy && self.buffer.len() == self.len() {
                return self.buffer.clone();
            }
            trace!("copying the first {} elements of a flat buffer", self.len());
            return self.buffer.copy_prefix(self.len());
        }
        trace!("copying {} elements of a {:?} view", self.len(), self.storage());
        Buffer::from(self.to_vec())
    }

    /// The elements in column-major order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        self.visit(Traversal::Logical, |address| out.push(self.buffer.get(address)));
        out
    }

    /// A flat array with its own buffer.
    pub fn copy(&self) -> Self {
        Self::flat(self.shape, Buffer::from(self.to_vec()))
    }

    /// Overwrites the elements of `self` with those of `source`.
    ///
    /// `source` is read completely before the first write, so the two may share a buffer.
    pub fn assign(&self, source: &Self) -> Result<()> {
        if self.dims() != source.dims() {
            return Err(ShapeError::ShapeMismatch {
                expected: self.dims().to_vec(),
                found: source.dims().to_vec(),
            }
            .into());
        }
        let mut values = source.to_vec().into_iter();
        self.visit(Traversal::Logical, |address| {
            if let Some(value) = values.next() {
                self.buffer.set(address, value);
            }
        });
        Ok(())
    }
}

impl<T, const N: usize> PartialEq for Array<T, N>
where
    T: Element,
{
    /// Compares shapes and elements, regardless of storage.
    fn eq(&self, other: &Self) -> bool {
        if self.dims() != other.dims() {
            return false;
        }
        let mut equal = true;
        let mut values = other.to_vec().into_iter();
        self.visit(Traversal::Logical, |address| {
            equal &= values.next() == Some(self.buffer.get(address));
        });
        equal
    }
}

#[cfg(test)]
mod tests {
    #[cfg(not(feature = "std"))]
    use alloc::{borrow::Cow, vec, vec::Vec};
    #[cfg(feature = "std")]
    use std::borrow::Cow;

    use num_complex::Complex;

    use crate::{
        ranges, Array, Buffer, ElementKind, Error, IndexError, Order, Result, Scalar, ShapeError,
        StorageKind,
    };

    fn iota(dims: [usize; 2]) -> Result<Array<i32, 2>> {
        let len = dims.iter().product::<usize>() as i32;
        Array::from_vec(dims, (0..len).collect())
    }

    #[test]
    fn new_arrays() {
        let z = Array::<f32, 3>::zeros([2, 3, 4]);
        let o = Array::<i16, 2>::ones([2, 2]);

        assert_eq!(z.len(), 24);
        assert_eq!(z.rank(), 3);
        assert_eq!(z.kind(), ElementKind::Float);
        assert_eq!(z.storage(), StorageKind::Flat);
        assert_eq!(z.order(), Order::ColumnMajor);
        assert!(z.is_flat());
        assert_eq!(o.sum(), 4);
    }

    #[test]
    fn complex_elements() -> Result<()> {
        let a = Array::from_vec(
            [2],
            vec![Complex::new(1.0_f64, 2.0), Complex::new(-1.0, 0.5)],
        )?;
        a.scale(Complex::new(0.0, 1.0));

        assert_eq!(a.kind(), ElementKind::ComplexDouble);
        assert_eq!(a.sum(), Complex::new(-2.5, 0.0));

        Ok(())
    }

    #[test]
    fn column_major_addressing() -> Result<()> {
        let a = iota([3, 4])?;

        assert_eq!(a.get([0, 0]), 0);
        assert_eq!(a.get([1, 0]), 1);
        assert_eq!(a.get([0, 1]), 3);
        assert_eq!(a.get([2, 3]), 11);
        assert_eq!(a.strides(), Some([1, 3]));

        Ok(())
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds() {
        let a = Array::<i32, 2>::zeros([3, 4]);
        a.get([3, 0]);
    }

    #[test]
    #[should_panic]
    fn set_out_of_bounds() {
        let a = Array::<i32, 2>::zeros([3, 4]);
        a.set([0, 4], 1);
    }

    #[test]
    fn try_get_out_of_bounds() {
        let a = Array::<i32, 2>::zeros([3, 4]);

        assert_eq!(
            a.try_get([1, 4]),
            Err(Error::Index(IndexError::OutOfBounds {
                index: 4,
                axis: 1,
                dim: 4
            }))
        );
        assert_eq!(a.try_get([2, 3]), Ok(0));
    }

    #[test]
    fn slice_then_write() -> Result<()> {
        let a = iota([3, 4])?;
        let column = a.slice(2, 1)?;

        assert_eq!(column.dims(), &[3]);
        assert_eq!(column.to_vec(), vec![6, 7, 8]);

        column.set([1], 100);

        assert_eq!(a.get([1, 2]), 100);

        let row = a.slice(-2, 0)?;

        assert_eq!(row.to_vec(), vec![1, 4, 100, 10]);
        assert_eq!(row.strides(), Some([3]));

        Ok(())
    }

    #[test]
    fn slice_errors() {
        let a = Array::<i32, 2>::zeros([3, 4]);

        assert_eq!(
            a.slice(0, 2).unwrap_err(),
            Error::Index(IndexError::AxisOutOfBounds { axis: 2, rank: 2 })
        );
        assert_eq!(
            a.slice(-5, 1).unwrap_err(),
            Error::Index(IndexError::OutOfBounds {
                index: -5,
                axis: 1,
                dim: 4
            })
        );
    }

    #[test]
    fn slice_down_to_scalar() -> Result<()> {
        let a = Array::from_vec([2, 2, 2], (0..8).collect::<Vec<i64>>())?;
        let s: Scalar<i64> = a.slice(1, 0)?.slice(0, 0)?.slice(1, 0)?;

        assert_eq!(s.rank(), 0);
        assert_eq!(s.len(), 1);
        assert_eq!(s.value(), 5);

        s.set_value(-5);

        assert_eq!(a.get([1, 0, 1]), -5);

        Ok(())
    }

    #[test]
    fn full_view_is_borrowed() -> Result<()> {
        let a = iota([3, 4])?;

        assert!(matches!(a.view(ranges![.., ..])?, Cow::Borrowed(_)));
        assert!(matches!(a.view(ranges![0..3, 0..=-1])?, Cow::Borrowed(_)));
        assert!(matches!(a.view(ranges![.., 1..])?, Cow::Owned(_)));

        Ok(())
    }

    #[test]
    fn view_shares_buffer() -> Result<()> {
        let a = iota([3, 4])?;
        let v = a.view(ranges![1..3, ..;-1])?;

        assert!(Buffer::ptr_eq(v.buffer(), a.buffer()));
        assert_eq!(v.storage(), StorageKind::Strided);
        assert_eq!(v.get([0, 0]), a.get([1, 3]));

        Ok(())
    }

    #[test]
    fn view_out_of_bounds_is_not_clamped() {
        let a = Array::<i32, 2>::zeros([3, 4]);

        assert_eq!(
            a.view(ranges![0..4, ..]).unwrap_err(),
            Error::Index(IndexError::OutOfBounds {
                index: 4,
                axis: 0,
                dim: 3
            })
        );
    }

    #[test]
    fn empty_array_views() -> Result<()> {
        let a = Array::<i32, 2>::zeros([3, 0]);

        assert!(matches!(a.view(ranges![.., ..])?, Cow::Borrowed(_)));
        assert_eq!(a.view(ranges![1.., ..])?.dims(), &[2, 0]);
        assert_eq!(a.to_vec(), Vec::<i32>::new());
        assert_eq!(a.flatten(false).len(), 0);

        Ok(())
    }

    #[test]
    fn select_demotes_to_gathered() -> Result<()> {
        let a = iota([3, 4])?;
        let s = a.select([&[0, 1, 2], &[0, 1, 2, 3]])?;

        assert!(matches!(s, Cow::Owned(_)));
        assert_eq!(s.storage(), StorageKind::Selected);
        assert_eq!(s.offset(), None);
        assert_eq!(s.strides(), None);
        assert_eq!(*s, a);

        Ok(())
    }

    #[test]
    fn select_on_rank_0_is_borrowed() -> Result<()> {
        let s = Scalar::<f64>::from_elem([], 2.5);

        assert!(matches!(s.select([])?, Cow::Borrowed(_)));
        assert!(matches!(s.view([])?, Cow::Borrowed(_)));

        Ok(())
    }

    #[test]
    fn copy_is_independent() -> Result<()> {
        let a = iota([3, 4])?;
        let v = a.view(ranges![..;2, 1..3])?;
        let c = v.copy();

        assert_eq!(c.storage(), StorageKind::Flat);
        assert_eq!(c, *v);

        c.fill(0);

        assert_eq!(v.to_vec(), vec![3, 5, 6, 8]);

        Ok(())
    }

    #[test]
    fn assign_between_views() -> Result<()> {
        let a = iota([3, 4])?;
        let left = a.view(ranges![.., ..2])?;
        let right = a.view(ranges![.., 2..])?;
        left.assign(&right)?;

        assert_eq!(a.to_vec(), vec![6, 7, 8, 9, 10, 11, 6, 7, 8, 9, 10, 11]);

        Ok(())
    }

    #[test]
    fn assign_from_overlapping_view() -> Result<()> {
        let a = Array::from_vec([5], vec![1_i32, 2, 3, 4, 5])?;
        let reversed = a.view(ranges![..;-1])?.into_owned();
        a.assign(&reversed)?;

        assert_eq!(a.to_vec(), vec![5, 4, 3, 2, 1]);

        Ok(())
    }

    #[test]
    fn assign_shape_mismatch() {
        let a = Array::<i32, 2>::zeros([3, 4]);
        let b = Array::<i32, 2>::zeros([4, 3]);

        assert_eq!(
            a.assign(&b),
            Err(Error::Shape(ShapeError::ShapeMismatch {
                expected: vec![3, 4],
                found: vec![4, 3]
            }))
        );
    }

    #[test]
    fn as_1d_of_rank_1_view_keeps_stride() -> Result<()> {
        let a = Array::from_vec([6], (0..6).collect::<Vec<i32>>())?;
        let v = a.view(ranges![..;-2])?;
        let a1 = v.as_1d();

        assert_eq!(a1.storage(), StorageKind::Strided);
        assert!(Buffer::ptr_eq(a1.buffer(), a.buffer()));
        assert_eq!(a1.to_vec(), vec![5, 3, 1]);

        Ok(())
    }

    #[test]
    fn as_1d_of_scalar() -> Result<()> {
        let a = iota([2, 2])?;
        let s = a.slice(1, 0)?.slice(1, 0)?;
        let a1 = s.as_1d();

        assert_eq!(a1.dims(), &[1]);
        assert_eq!(a1.to_vec(), vec![3]);

        Ok(())
    }

    #[test]
    fn slice_reduces_rank() -> Result<()> {
        let a = Array::from_vec([2, 3, 4], (0..24).collect::<Vec<i32>>())?;
        let s = a.slice(1, 0)?;

        assert_eq!(s.dims(), &[3, 4]);
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(s.get([i, j]), a.get([1, i, j]));
            }
        }

        Ok(())
    }

    #[test]
    fn fancy_index_gather() -> Result<()> {
        let a = Array::from_vec([5], vec![10_i32, 20, 30, 40, 50])?;
        let g = a.select([&[4, 1, 1]])?;

        assert_eq!(g.dims(), &[3]);
        assert_eq!(g.to_vec(), vec![50, 20, 20]);

        g.set([0], 0);

        assert_eq!(a.get([4]), 0);

        Ok(())
    }

    #[test]
    fn strided_order_detection() -> Result<()> {
        macro_rules! test {
            ($strides:expr, $order:expr) => {
                let buffer = Buffer::<f64>::zeros(12);
                let a = Array::wrap_strided([3, 4], buffer, 0, $strides)?;

                assert_eq!(a.order(), $order, "strides: {:?}", $strides);
            };
        }

        test!([1, 3], Order::ColumnMajor);
        test!([4, 1], Order::RowMajor);
        test!([1, 2], Order::NonSpecific);
        test!([2, 0], Order::NonSpecific);
        test!([0, 0], Order::NonSpecific);

        Ok(())
    }
}
