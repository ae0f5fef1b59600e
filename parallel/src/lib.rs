//! Data-parallel consumers for [`Seq`] on the rayon thread pool.
//!
//! A sequence is split into contiguous `skip`/`limit` views that all read the
//! same cache, so splitting never re-runs the producer.

use funclist_core::{element::Element, error::Result, seq::Seq};
use rayon::prelude::*;
use tracing::trace;

pub trait ParallelSeq {
    type Item: Element;

    /// Splits a finite sequence into at most `n` contiguous views, the last one
    /// absorbing the remainder. Forces the whole sequence to learn its length.
    fn par_split(&self, n: usize) -> Result<Split<Self::Item>>;

    /// Folds every view on a rayon worker and combines the partial results in
    /// index order.
    fn par_fold<A, ID, F, C>(&self, n: usize, identity: ID, fold: F, combine: C) -> Result<A>
    where
        A: Send,
        ID: Fn() -> A + Sync + Send,
        F: Fn(A, Self::Item) -> A + Sync + Send,
        C: Fn(A, A) -> A;

    fn par_for_each<F>(&self, n: usize, f: F) -> Result<()>
    where
        F: Fn(Self::Item) + Sync + Send;
}

/// Contiguous views over one sequence, yielded front to back.
#[derive(Debug)]
pub struct Split<T> {
    seq: Seq<T>,
    len: usize,
    step: usize,
    n: usize,
}

impl<T: Element> Iterator for Split<T> {
    type Item = Seq<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.n >= self.len {
            return None;
        }
        let mut end = self.n + self.step;
        if self.len - end < self.step {
            end = self.len;
        }
        trace!(start = self.n, end, "split view");
        let view = self.seq.skip(self.n).limit(end - self.n);
        self.n = end;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = (self.len - self.n) / self.step;
        (size, Some(size))
    }
}

impl<T: Element> ExactSizeIterator for Split<T> {}

impl<T: Element> ParallelSeq for Seq<T> {
    type Item = T;

    fn par_split(&self, n: usize) -> Result<Split<T>> {
        let len = self.count()?;
        let step = (len / n.max(1)).max(1);
        Ok(Split {
            seq: self.clone(),
            len,
            step,
            n: 0,
        })
    }

    fn par_fold<A, ID, F, C>(&self, n: usize, identity: ID, fold: F, combine: C) -> Result<A>
    where
        A: Send,
        ID: Fn() -> A + Sync + Send,
        F: Fn(A, T) -> A + Sync + Send,
        C: Fn(A, A) -> A,
    {
        let views: Vec<Seq<T>> = self.par_split(n)?.collect();
        let partials = views
            .into_par_iter()
            .map(|view| view.fold(identity(), &fold))
            .collect::<Result<Vec<A>>>()?;
        Ok(partials.into_iter().fold(identity(), combine))
    }

    fn par_for_each<F>(&self, n: usize, f: F) -> Result<()>
    where
        F: Fn(T) + Sync + Send,
    {
        self.par_fold(n, || (), |(), item| f(item), |(), ()| ())
    }
}
