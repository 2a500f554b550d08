use super::{Array, Layout};
use crate::{
    helper::IndexTable,
    scanner::{Max, Min, MinMax, Sum},
    Element, Scanner,
};

/// Order in which [`Array::visit`] reaches the elements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Traversal {
    /// First index fastest, regardless of storage.
    Logical,
    /// Whatever order walks memory with the smallest steps.
    Fast,
}

/// Walks an affine view with an odometer over `axes`, innermost first.
pub(crate) fn visit_affine<F, const N: usize>(
    dims: &[usize; N],
    strides: &[isize; N],
    offset: usize,
    axes: &[usize; N],
    mut f: F,
) where
    F: FnMut(usize),
{
    if N == 0 {
        f(offset);
        return;
    }
    if dims.iter().any(|&dim| dim == 0) {
        return;
    }

    let inner = axes[0];
    let (inner_dim, inner_stride) = (dims[inner], strides[inner]);
    let mut counter = [0_usize; N];
    let mut base = offset as isize;
    loop {
        let mut address = base;
        for _ in 0..inner_dim {
            f(address as usize);
            address += inner_stride;
        }

        let mut k = 1;
        loop {
            if k == N {
                return;
            }
            let axis = axes[k];
            counter[axis] += 1;
            base += strides[axis];
            if counter[axis] < dims[axis] {
                break;
            }
            base -= strides[axis] * dims[axis] as isize;
            counter[axis] = 0;
            k += 1;
        }
    }
}

/// Walks a gathered view, first index fastest.
pub(crate) fn visit_gathered<F, const N: usize>(tables: &[IndexTable; N], mut f: F)
where
    F: FnMut(usize),
{
    if N == 0 {
        f(0);
        return;
    }
    if tables.iter().any(|table| table.is_empty()) {
        return;
    }

    let mut counter = [0_usize; N];
    loop {
        let base: isize = (1..N).map(|k| tables[k][counter[k]]).sum();
        for &entry in tables[0].iter() {
            f((base + entry) as usize);
        }

        let mut k = 1;
        loop {
            if k == N {
                return;
            }
            counter[k] += 1;
            if counter[k] < tables[k].len() {
                break;
            }
            counter[k] = 0;
            k += 1;
        }
    }
}

/// Axes sorted from the smallest to the largest stride magnitude.
///
/// Ties keep the lower axis inside.
pub(crate) fn fast_axes<const N: usize>(strides: &[isize; N]) -> [usize; N] {
    let mut axes: [usize; N] = core::array::from_fn(|k| k);
    axes.sort_unstable_by_key(|&k| (strides[k].unsigned_abs(), k));
    axes
}

impl<T, const N: usize> Array<T, N>
where
    T: Element,
{
    /// Calls `f` with the buffer address of every element.
    pub(crate) fn visit<F>(&self, traversal: Traversal, mut f: F)
    where
        F: FnMut(usize),
    {
        match &self.layout {
            Layout::Flat(_) => (0..self.len()).for_each(f),
            Layout::Strided(strided) => {
                let axes = match traversal {
                    Traversal::Logical => core::array::from_fn(|k| k),
                    Traversal::Fast => fast_axes(strided.strides()),
                };
                visit_affine(
                    self.dims(),
                    strided.strides(),
                    strided.offset(),
                    &axes,
                    &mut f,
                )
            }
            Layout::Selected(selected) => visit_gathered(selected.tables(), &mut f),
        }
    }

    pub fn fill(&self, value: T) {
        self.visit(Traversal::Fast, |address| self.buffer.set(address, value));
    }

    /// Overwrites every element with successive results of `f`, first index fastest.
    pub fn fill_with<F>(&self, mut f: F)
    where
        F: FnMut() -> T,
    {
        self.visit(Traversal::Logical, |address| self.buffer.set(address, f()));
    }

    pub fn increment(&self, value: T) {
        self.map(|x| x + value);
    }

    pub fn decrement(&self, value: T) {
        self.map(|x| x - value);
    }

    pub fn scale(&self, factor: T) {
        self.map(|x| x * factor);
    }

    /// Replaces every element by `f` applied to it.
    ///
    /// An element reachable through several indices is updated once per index.
    pub fn map<F>(&self, mut f: F)
    where
        F: FnMut(T) -> T,
    {
        self.visit(Traversal::Fast, |address| {
            self.buffer.update(address, &mut f)
        });
    }

    /// Calls `f` with every element, in storage order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(T),
    {
        self.visit(Traversal::Fast, |address| f(self.buffer.get(address)));
    }

    /// Feeds every element to `scanner`, in storage order.
    pub fn scan<S>(&self, scanner: &mut S)
    where
        S: Scanner<T> + ?Sized,
    {
        let mut started = false;
        self.for_each(|value| {
            if started {
                scanner.update(value);
            } else {
                scanner.initialize(value);
                started = true;
            }
        });
    }

    /// Sum of all elements; zero for an empty array.
    pub fn sum(&self) -> T {
        let mut sum = Sum::new();
        self.scan(&mut sum);
        sum.result().unwrap_or_else(T::zero)
    }

    pub fn min(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        let mut min = Min::new();
        self.scan(&mut min);
        min.result()
    }

    pub fn max(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        let mut max = Max::new();
        self.scan(&mut max);
        max.result()
    }

    pub fn min_max(&self) -> Option<(T, T)>
    where
        T: PartialOrd,
    {
        let mut min_max = MinMax::new();
        self.scan(&mut min_max);
        min_max.result()
    }
}
