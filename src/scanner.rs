//! Reductions driven by [`Array::scan`](crate::Array::scan).

use core::ops::Add;

/// Receives every element of an array exactly once, in an unspecified order.
///
/// The first visited element goes to `initialize`, all later ones to `update`. An empty array
/// calls neither.
pub trait Scanner<T> {
    fn initialize(&mut self, value: T);
    fn update(&mut self, value: T);
}

impl<T, S> Scanner<T> for &mut S
where
    S: Scanner<T> + ?Sized,
{
    fn initialize(&mut self, value: T) {
        (**self).initialize(value)
    }

    fn update(&mut self, value: T) {
        (**self).update(value)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sum<T> {
    total: Option<T>,
}

impl<T> Sum<T> {
    pub fn new() -> Self {
        Self { total: None }
    }
}

impl<T> Sum<T>
where
    T: Copy,
{
    pub fn result(&self) -> Option<T> {
        self.total
    }
}

impl<T> Scanner<T> for Sum<T>
where
    T: Copy + Add<Output = T>,
{
    fn initialize(&mut self, value: T) {
        self.total = Some(value);
    }

    fn update(&mut self, value: T) {
        self.total = self.total.map(|total| total + value);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Min<T> {
    min: Option<T>,
}

impl<T> Min<T> {
    pub fn new() -> Self {
        Self { min: None }
    }
}

impl<T> Min<T>
where
    T: Copy,
{
    pub fn result(&self) -> Option<T> {
        self.min
    }
}

impl<T> Scanner<T> for Min<T>
where
    T: Copy + PartialOrd,
{
    fn initialize(&mut self, value: T) {
        self.min = Some(value);
    }

    fn update(&mut self, value: T) {
        if matches!(self.min, Some(min) if value < min) {
            self.min = Some(value);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Max<T> {
    max: Option<T>,
}

impl<T> Max<T> {
    pub fn new() -> Self {
        Self { max: None }
    }
}

impl<T> Max<T>
where
    T: Copy,
{
    pub fn result(&self) -> Option<T> {
        self.max
    }
}

impl<T> Scanner<T> for Max<T>
where
    T: Copy + PartialOrd,
{
    fn initialize(&mut self, value: T) {
        self.max = Some(value);
    }

    fn update(&mut self, value: T) {
        if matches!(self.max, Some(max) if value > max) {
            self.max = Some(value);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MinMax<T> {
    bounds: Option<(T, T)>,
}

impl<T> MinMax<T> {
    pub fn new() -> Self {
        Self { bounds: None }
    }
}

impl<T> MinMax<T>
where
    T: Copy,
{
    pub fn result(&self) -> Option<(T, T)> {
        self.bounds
    }
}

impl<T> Scanner<T> for MinMax<T>
where
    T: Copy + PartialOrd,
{
    fn initialize(&mut self, value: T) {
        self.bounds = Some((value, value));
    }

    fn update(&mut self, value: T) {
        if let Some((min, max)) = &mut self.bounds {
            if value < *min {
                *min = value;
            }
            if value > *max {
                *max = value;
            }
        }
    }
}
