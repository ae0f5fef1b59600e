use core::{cmp::Ordering, hash::Hash};
use std::collections::HashSet;

use super::{Mode, Seq};
use crate::{
    adapter::{
        chain::Chain,
        distinct::Distinct,
        filter::Filter,
        flat_map::FlatMap,
        map::Map,
        peek::Peek,
        percentile::Percentiles,
        segment::SegmentBetween,
        skip::Skip,
        skip_while::SkipWhile,
        sorted::Sorted,
        take::Limit,
        take_while::TakeWhile,
        zip::{ZipWith, ZipWithOption, ZipWithOptional},
    },
    element::Element,
    producer::Producer,
};

impl<T: Element> Seq<T> {
    /// Applies `f` once per index; re-reads come from the cache.
    pub fn map<U, F>(&self, f: F) -> Seq<U>
    where
        U: Element,
        F: FnMut(T) -> U + Send + 'static,
    {
        Seq::memoized(Map {
            cursor: self.cursor(),
            f,
        })
    }

    /// Runs `f` once per produced element, never on cached re-reads.
    pub fn peek<F>(&self, f: F) -> Seq<T>
    where
        F: FnMut(&T) + Send + 'static,
    {
        Seq::memoized(Peek {
            cursor: self.cursor(),
            f,
        })
    }

    /// Keeps the elements matching `predicate`.
    ///
    /// The result has no cache of its own: every traversal re-runs `predicate`
    /// over the parent's cached elements. Call [`lazy`](Self::lazy) on it to
    /// memoize the filtered elements.
    pub fn filter<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Seq::from_node(Filter {
            parent: self.node().clone(),
            predicate,
        })
    }

    /// Concatenates `f(e0), f(e1), ...`, draining each before the next begins.
    pub fn flat_map<U, F>(&self, f: F) -> Seq<U>
    where
        U: Element,
        F: Fn(T) -> Seq<U> + Send + Sync + 'static,
    {
        Seq::from_node(FlatMap {
            parent: self.node().clone(),
            f,
        })
    }

    /// The first `n` elements. Never pulls the parent at or past index `n`.
    pub fn limit(&self, n: usize) -> Seq<T> {
        Seq::from_node(Limit {
            parent: self.node().clone(),
            n,
        })
    }

    pub fn skip(&self, n: usize) -> Seq<T> {
        Seq::from_node(Skip {
            parent: self.node().clone(),
            n,
        })
    }

    pub fn take_while<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Seq::from_node(TakeWhile {
            parent: self.node().clone(),
            predicate,
        })
    }

    pub fn skip_while<P>(&self, predicate: P) -> Seq<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Seq::from_node(SkipWhile {
            parent: self.node().clone(),
            predicate,
        })
    }

    /// This sequence followed by `other`.
    pub fn chain(&self, other: &Seq<T>) -> Seq<T> {
        Seq::from_node(Chain {
            first: self.node().clone(),
            second: other.node().clone(),
        })
    }

    /// Eager sequences copy into a new array; lazy ones chain.
    pub fn append(&self, value: T) -> Seq<T> {
        match (self.mode(), self.node().as_slice()) {
            (Mode::Eager, Some(items)) => {
                let mut items = items.to_vec();
                items.push(value);
                Seq::array(items, Mode::Eager)
            }
            _ => self.chain(&Seq::of([value])),
        }
    }

    pub fn prepend(&self, value: T) -> Seq<T> {
        match (self.mode(), self.node().as_slice()) {
            (Mode::Eager, Some(items)) => {
                let mut copy = Vec::with_capacity(items.len() + 1);
                copy.push(value);
                copy.extend_from_slice(items);
                Seq::array(copy, Mode::Eager)
            }
            _ => Seq::of([value]).lazy().chain(self),
        }
    }

    /// Drops repeated elements; the first occurrence wins.
    pub fn distinct(&self) -> Seq<T>
    where
        T: Hash + Eq,
    {
        Seq::memoized(Distinct {
            cursor: self.cursor(),
            seen: HashSet::new(),
        })
    }

    /// Drains the parent on the first pull. Never returns for an infinite parent.
    pub fn sorted(&self) -> Seq<T>
    where
        T: Ord,
    {
        self.sorted_by(T::cmp)
    }

    pub fn sorted_by<F>(&self, compare: F) -> Seq<T>
    where
        F: FnMut(&T, &T) -> Ordering + Send + 'static,
    {
        Seq::memoized(Sorted::new(self.cursor(), compare))
    }

    pub fn sorted_by_key<K, F>(&self, mut key: F) -> Seq<T>
    where
        K: Ord,
        F: FnMut(&T) -> K + Send + 'static,
    {
        self.sorted_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Splits into runs, starting a new one between `current` and `next`
    /// whenever `boundary(current, next)` holds.
    ///
    /// Segments are arrays in this sequence's mode.
    pub fn segment_between<F>(&self, boundary: F) -> Seq<Seq<T>>
    where
        F: FnMut(&T, &T) -> bool + Send + 'static,
    {
        Seq::memoized(SegmentBetween {
            cursor: self.cursor(),
            boundary,
            pending: None,
            mode: self.mode(),
        })
    }

    /// Groups elements into the bands below `low`, between the two, and above
    /// `high` percent of `key`'s distribution. Empty bands are omitted.
    pub fn segment_by_percentiles_by<K>(&self, low: f64, high: f64, key: K) -> Seq<Seq<T>>
    where
        K: FnMut(&T) -> f64 + Send + 'static,
    {
        Seq::memoized(Percentiles::new(
            self.cursor(),
            key,
            low,
            high,
            self.mode(),
        ))
    }

    /// Combines index-aligned pairs, stopping at the shorter side.
    pub fn zip_with<U, R, F>(&self, other: &Seq<U>, f: F) -> Seq<R>
    where
        U: Element,
        R: Element,
        F: FnMut(T, U) -> R + Send + 'static,
    {
        Seq::memoized(ZipWith {
            left: self.cursor(),
            right: other.cursor(),
            f,
        })
    }

    pub fn zip_with_option<U, R, F>(&self, other: &Seq<U>, option: ZipWithOption, f: F) -> Seq<R>
    where
        U: Element,
        R: Element,
        F: FnMut(Option<T>, Option<U>) -> R + Send + 'static,
    {
        Seq::memoized(ZipWithOptional {
            left: self.cursor(),
            right: other.cursor(),
            option,
            f,
        })
    }

    pub fn zip<U: Element>(&self, other: &Seq<U>) -> Seq<(T, U)> {
        self.zip_with(other, |a, b| (a, b))
    }

    /// Zero for every equal pair, one at the first difference or unpaired element.
    pub(crate) fn differences(&self, other: &Seq<T>) -> impl Producer<Item = u8>
    where
        T: PartialEq,
    {
        ZipWithOptional {
            left: self.cursor(),
            right: other.cursor(),
            option: ZipWithOption::AllowUnpaired,
            f: |a: Option<T>, b: Option<T>| u8::from(a != b),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use parking_lot::Mutex;

    use crate::seq::Seq;

    fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (count.clone(), count)
    }

    #[test]
    fn map_runs_once_per_index() {
        let (calls, counter) = counter();
        let squares = Seq::from_iterator(0..10).map(move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            i * i
        });
        assert_eq!(squares.get(3).unwrap(), Some(9));
        assert_eq!(squares.to_vec().unwrap().len(), 10);
        assert_eq!(squares.to_vec().unwrap()[9], 81);
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn chained_maps_do_not_rerun_earlier_mappers() {
        let (first, first_counter) = counter();
        let (second, second_counter) = counter();
        let base = Seq::from_iterator(0..5).map(move |i| {
            first_counter.fetch_add(1, Ordering::SeqCst);
            i + 1
        });
        let doubled = base.map(move |i| {
            second_counter.fetch_add(1, Ordering::SeqCst);
            i * 2
        });
        let tripled = base.map(|i| i * 3);

        assert_eq!(doubled.to_vec().unwrap(), vec![2, 4, 6, 8, 10]);
        assert_eq!(tripled.to_vec().unwrap(), vec![3, 6, 9, 12, 15]);
        assert_eq!(doubled.to_vec().unwrap(), vec![2, 4, 6, 8, 10]);
        assert_eq!(first.load(Ordering::SeqCst), 5);
        assert_eq!(second.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn filter_reruns_until_memoized() {
        let (calls, counter) = counter();
        let evens = Seq::from_iterator(0..10).filter(move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            i % 2 == 0
        });
        assert_eq!(evens.to_vec().unwrap(), vec![0, 2, 4, 6, 8]);
        assert_eq!(evens.count().unwrap(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 20);

        let memoized = evens.lazy();
        assert_eq!(memoized.count().unwrap(), 5);
        assert_eq!(memoized.get(4).unwrap(), Some(8));
        assert_eq!(calls.load(Ordering::SeqCst), 30);
    }

    #[test]
    fn limit_and_skip_are_index_views() {
        let (pulls, counter) = counter();
        let seq = Seq::from_iterator(0..).peek(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let window = seq.skip(10).limit(3);
        assert_eq!(window.to_vec().unwrap(), vec![10, 11, 12]);
        assert_eq!(pulls.load(Ordering::SeqCst), 13);
        assert_eq!(window.get(1).unwrap(), Some(11));
        assert_eq!(window.get(3).unwrap(), None);
        assert_eq!(pulls.load(Ordering::SeqCst), 13);
        assert!(window.is_lazy());
    }

    #[test]
    fn limit_over_a_filter_walks_the_view() {
        let odd = Seq::from_iterator(0..).filter(|i| i % 2 == 1);
        assert_eq!(odd.limit(4).to_vec().unwrap(), vec![1, 3, 5, 7]);
        assert_eq!(odd.skip(2).limit(2).to_vec().unwrap(), vec![5, 7]);
        assert_eq!(odd.limit(4).get(2).unwrap(), Some(5));
    }

    #[test]
    fn flat_map_concatenates_in_order() {
        let seq = Seq::of([1, 2, 3]).flat_map(|n| Seq::repeat(n).limit(n as usize));
        assert_eq!(seq.to_string(), "[1, 2, 2, 3, 3, 3]");
        let infinite = Seq::from_iterator(1..).flat_map(|n| Seq::of([n, -n]));
        assert_eq!(infinite.limit(4).to_vec().unwrap(), vec![1, -1, 2, -2]);
    }

    #[test]
    fn take_and_skip_while() {
        let seq = Seq::of([1, 2, 5, 1, 7]);
        assert_eq!(seq.take_while(|i| *i < 3).to_vec().unwrap(), vec![1, 2]);
        assert_eq!(seq.skip_while(|i| *i < 3).to_vec().unwrap(), vec![5, 1, 7]);
        let naturals = Seq::from_iterator(0..);
        assert_eq!(naturals.take_while(|i| *i < 4).count().unwrap(), 4);
    }

    #[test]
    fn append_copies_eager_and_chains_lazy() {
        let base = Seq::of([1, 2]);
        let x = base.append(3);
        let y = base.append(4);
        assert_eq!(x, Seq::of([1, 2, 3]));
        assert_eq!(y, Seq::of([1, 2, 4]));
        assert_eq!(base, Seq::of([1, 2]));
        assert!(x.is_eager());
        assert_eq!(base.prepend(0).to_string(), "[0, 1, 2]");

        let lazy = Seq::from_iterator(vec![1, 2]);
        let appended = lazy.append(3).prepend(0);
        assert!(appended.is_lazy());
        assert_eq!(appended.to_string(), "[0, 1, 2, 3]");
        assert_eq!(lazy.chain(&base).to_vec().unwrap(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn distinct_and_sorted() {
        let seq = Seq::from_iterator(vec![3, 1, 3, 2, 1]);
        assert_eq!(seq.distinct().to_string(), "[3, 1, 2]");
        assert_eq!(seq.sorted().to_string(), "[1, 1, 2, 3, 3]");
        assert_eq!(seq.sorted_by(|a, b| b.cmp(a)).to_string(), "[3, 3, 2, 1, 1]");

        let words = Seq::of(["ccc", "a", "bb"]);
        assert_eq!(words.sorted_by_key(|w| w.len()).to_string(), "[a, bb, ccc]");
        let infinite_distinct = Seq::from_iterator((0..).map(|i| i % 3)).distinct();
        assert_eq!(infinite_distinct.limit(3).to_vec().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn peek_sees_each_element_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let seq = Seq::from_iterator(0..).peek(move |i| sink.lock().push(*i));
        for n in [3, 5, 7] {
            seq.limit(n).to_vec().unwrap();
        }
        seq.limit(2).to_vec().unwrap();
        assert_eq!(*log.lock(), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn percentile_bands_keep_original_order() {
        let seq = Seq::of(["e", "a", "k", "c", "h"]);
        let bands = seq
            .segment_by_percentiles_by(75.0, 25.0, |w| f64::from(w.as_bytes()[0]))
            .to_vec()
            .unwrap();
        assert_eq!(bands.len(), 3);
        assert_eq!(bands[0], Seq::of(["a"]));
        assert_eq!(bands[1], Seq::of(["e", "c", "h"]));
        assert_eq!(bands[2], Seq::of(["k"]));
        assert!(bands.iter().all(Seq::is_eager));
    }
}
