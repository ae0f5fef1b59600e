use core::{
    cmp::Ordering,
    fmt::{Debug, Display},
};

use num_traits::{ToPrimitive, Zero};

/// Anything a sequence can hold and share between threads.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Element for T {}

/// The inline numeric representations: `i32`, `i64` and `f64`.
///
/// Numeric-only operations (sums, statistics, percentiles) are gated on this
/// trait rather than duplicated per width.
pub trait Numeric: Element + Copy + Default + PartialOrd + Zero + ToPrimitive + Display + Debug {
    /// A total order. For floats this is IEEE 754 `totalOrder`.
    fn compare(&self, other: &Self) -> Ordering;

    /// Addition used by sums. Integers wrap on overflow in every build profile.
    fn accumulate(self, other: Self) -> Self;
}

impl Numeric for i32 {
    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[inline]
    fn accumulate(self, other: Self) -> Self {
        self.wrapping_add(other)
    }
}

impl Numeric for i64 {
    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    #[inline]
    fn accumulate(self, other: Self) -> Self {
        self.wrapping_add(other)
    }
}

impl Numeric for f64 {
    #[inline]
    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    #[inline]
    fn accumulate(self, other: Self) -> Self {
        self + other
    }
}
