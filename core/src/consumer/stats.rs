use core::cmp::Ordering;

use super::Aggregator;
use crate::element::Numeric;

#[derive(Debug, Clone, Copy, Default)]
pub struct Count {
    count: usize,
}

impl Count {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Aggregator<T> for Count {
    type Output = usize;

    #[inline]
    fn accept(&mut self, _: &T) {
        self.count += 1;
    }

    fn finish(self) -> usize {
        self.count
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sum<T> {
    sum: T,
}

impl<T: Numeric> Sum<T> {
    pub fn new() -> Self {
        Self { sum: T::zero() }
    }
}

impl<T: Numeric> Default for Sum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Aggregator<T> for Sum<T> {
    type Output = T;

    #[inline]
    fn accept(&mut self, item: &T) {
        self.sum = self.sum.accumulate(*item);
    }

    fn finish(self) -> T {
        self.sum
    }
}

/// Arithmetic mean as `f64`; `None` when nothing was seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct Average {
    count: usize,
    total: f64,
}

impl Average {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Numeric> Aggregator<T> for Average {
    type Output = Option<f64>;

    #[inline]
    fn accept(&mut self, item: &T) {
        self.count += 1;
        self.total += item.to_f64().unwrap_or(f64::NAN);
    }

    fn finish(self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Min<T> {
    min: Option<T>,
}

impl<T> Min<T> {
    pub fn new() -> Self {
        Self { min: None }
    }
}

impl<T> Default for Min<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Aggregator<T> for Min<T> {
    type Output = Option<T>;

    #[inline]
    fn accept(&mut self, item: &T) {
        match self.min {
            Some(min) if min.compare(item) != Ordering::Greater => {}
            _ => self.min = Some(*item),
        }
    }

    fn finish(self) -> Option<T> {
        self.min
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Max<T> {
    max: Option<T>,
}

impl<T> Max<T> {
    pub fn new() -> Self {
        Self { max: None }
    }
}

impl<T> Default for Max<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Aggregator<T> for Max<T> {
    type Output = Option<T>;

    #[inline]
    fn accept(&mut self, item: &T) {
        match self.max {
            Some(max) if max.compare(item) == Ordering::Greater => {}
            _ => self.max = Some(*item),
        }
    }

    fn finish(self) -> Option<T> {
        self.max
    }
}

/// The first element with the smallest key.
pub struct MinByKey<T, K, F> {
    key: F,
    best: Option<(K, T)>,
}

impl<T, K, F> MinByKey<T, K, F>
where
    F: FnMut(&T) -> K,
{
    pub fn new(key: F) -> Self {
        Self { key, best: None }
    }
}

impl<T, K, F> Aggregator<T> for MinByKey<T, K, F>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    type Output = Option<T>;

    fn accept(&mut self, item: &T) {
        let key = (self.key)(item);
        match &self.best {
            Some((best, _)) if *best <= key => {}
            _ => self.best = Some((key, item.clone())),
        }
    }

    fn finish(self) -> Option<T> {
        self.best.map(|(_, item)| item)
    }
}

/// The last element with the largest key.
pub struct MaxByKey<T, K, F> {
    key: F,
    best: Option<(K, T)>,
}

impl<T, K, F> MaxByKey<T, K, F>
where
    F: FnMut(&T) -> K,
{
    pub fn new(key: F) -> Self {
        Self { key, best: None }
    }
}

impl<T, K, F> Aggregator<T> for MaxByKey<T, K, F>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    type Output = Option<T>;

    fn accept(&mut self, item: &T) {
        let key = (self.key)(item);
        match &self.best {
            Some((best, _)) if *best > key => {}
            _ => self.best = Some((key, item.clone())),
        }
    }

    fn finish(self) -> Option<T> {
        self.best.map(|(_, item)| item)
    }
}

/// Count, sum, extremes and mean of a numeric sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics<T> {
    pub count: usize,
    pub sum: T,
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: Numeric> Statistics<T> {
    pub fn average(&self) -> Option<f64> {
        let sum = self.sum.to_f64()?;
        (self.count > 0).then(|| sum / self.count as f64)
    }
}

/// Collects [`Statistics`] in one pass.
pub struct Summary<T> {
    inner: (Count, Sum<T>, Min<T>, Max<T>),
}

impl<T: Numeric> Summary<T> {
    pub fn new() -> Self {
        Self {
            inner: (Count::new(), Sum::new(), Min::new(), Max::new()),
        }
    }
}

impl<T: Numeric> Default for Summary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Aggregator<T> for Summary<T> {
    type Output = Statistics<T>;

    #[inline]
    fn accept(&mut self, item: &T) {
        self.inner.accept(item);
    }

    fn finish(self) -> Statistics<T> {
        let (count, sum, min, max) = self.inner.finish();
        Statistics {
            count,
            sum,
            min,
            max,
        }
    }
}
