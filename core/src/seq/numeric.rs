use core::iter;

use num_traits::PrimInt;

use super::Seq;
use crate::{
    adapter::percentile::interpolate,
    consumer::{Average, Max, Min, Statistics, Sum, Summary},
    element::Numeric,
    error::Result,
};

impl<T: Numeric> Seq<T> {
    pub fn sum(&self) -> Result<T> {
        self.calculate(Sum::new())
    }

    pub fn average(&self) -> Result<Option<f64>> {
        self.calculate(Average::new())
    }

    pub fn min(&self) -> Result<Option<T>> {
        self.calculate(Min::new())
    }

    pub fn max(&self) -> Result<Option<T>> {
        self.calculate(Max::new())
    }

    /// Count, sum and extremes in a single traversal.
    pub fn statistics(&self) -> Result<Statistics<T>> {
        self.calculate(Summary::new())
    }

    /// The interpolated value at `pct` percent, `None` for an empty sequence.
    pub fn percentile(&self, pct: f64) -> Result<Option<f64>> {
        let mut sample = self.fold(Vec::new(), |mut sample, item| {
            sample.push(item.to_f64().unwrap_or(f64::NAN));
            sample
        })?;
        sample.sort_by(f64::total_cmp);
        Ok(interpolate(&sample, pct))
    }

    /// [`segment_by_percentiles_by`](Self::segment_by_percentiles_by) keyed on the
    /// elements themselves.
    pub fn segment_by_percentiles(&self, low: f64, high: f64) -> Seq<Seq<T>> {
        self.segment_by_percentiles_by(low, high, |item| item.to_f64().unwrap_or(f64::NAN))
    }
}

impl<T: Numeric + PrimInt> Seq<T> {
    /// `start, start + 1, ..., end - 1`, lazily.
    pub fn range(start: T, end: T) -> Self {
        let steps = iter::successors(Some(start), |i| i.checked_add(&T::one()));
        Seq::from_iterator(steps.take_while(move |i| *i < end))
    }
}
