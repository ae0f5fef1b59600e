use core::cmp::Ordering;

use super::{Aggregator, MaxByKey, MinByKey};
use crate::{element::Element, error::Result, seq::Seq};

impl<T: Element> Seq<T> {
    pub fn fold<A, F>(&self, init: A, mut f: F) -> Result<A>
    where
        F: FnMut(A, T) -> A,
    {
        let mut cursor = self.cursor();
        let mut acc = init;
        while let Some(item) = cursor.try_next()? {
            acc = f(acc, item);
        }
        Ok(acc)
    }

    pub fn reduce<F>(&self, identity: T, f: F) -> Result<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.fold(identity, f)
    }

    /// Like [`reduce`](Self::reduce), seeded with the first element. `None` when empty.
    pub fn reduce_with<F>(&self, mut f: F) -> Result<Option<T>>
    where
        F: FnMut(T, T) -> T,
    {
        self.fold(None, |acc, item| match acc {
            Some(acc) => Some(f(acc, item)),
            None => Some(item),
        })
    }

    pub fn for_each<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(T),
    {
        self.fold((), |(), item| f(item))
    }

    pub fn count(&self) -> Result<usize> {
        match self.node().as_slice() {
            Some(items) => Ok(items.len()),
            None => self.fold(0, |count, _| count + 1),
        }
    }

    pub fn find<P>(&self, mut predicate: P) -> Result<Option<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor();
        while let Some(item) = cursor.try_next()? {
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    pub fn any<P>(&self, predicate: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(self.find(predicate)?.is_some())
    }

    pub fn all<P>(&self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(self.find(|item| !predicate(item))?.is_none())
    }

    pub fn partition<P>(&self, mut predicate: P) -> Result<(Vec<T>, Vec<T>)>
    where
        P: FnMut(&T) -> bool,
    {
        self.fold((Vec::new(), Vec::new()), |mut res, item| {
            if predicate(&item) {
                res.0.push(item);
            } else {
                res.1.push(item);
            }
            res
        })
    }

    pub fn min_by<F>(&self, mut compare: F) -> Result<Option<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.reduce_with(|min, item| match compare(&min, &item) {
            Ordering::Greater => item,
            _ => min,
        })
    }

    pub fn max_by<F>(&self, mut compare: F) -> Result<Option<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.reduce_with(|max, item| match compare(&max, &item) {
            Ordering::Greater => max,
            _ => item,
        })
    }

    pub fn min_by_key<K, F>(&self, key: F) -> Result<Option<T>>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.calculate(MinByKey::new(key))
    }

    pub fn max_by_key<K, F>(&self, key: F) -> Result<Option<T>>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.calculate(MaxByKey::new(key))
    }

    /// Feeds every element, exactly once, to `aggregator` in a single traversal.
    /// Pass a tuple to compute several results in the same pass.
    pub fn calculate<A>(&self, mut aggregator: A) -> Result<A::Output>
    where
        A: Aggregator<T>,
    {
        let mut cursor = self.cursor();
        while let Some(item) = cursor.try_next()? {
            aggregator.accept(&item);
        }
        Ok(aggregator.finish())
    }
}
