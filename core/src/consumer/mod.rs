//! Terminal operations. Everything here drives a cursor to the end (or to the
//! first answer) and returns a plain value.

pub mod fold;
pub mod stats;

pub use self::stats::{
    Average, Count, Max, MaxByKey, Min, MinByKey, Statistics, Sum, Summary,
};

/// Folds elements one at a time into a summary value.
///
/// Tuples of aggregators are aggregators too, so several statistics can be
/// computed in one traversal with [`Seq::calculate`](crate::seq::Seq::calculate).
pub trait Aggregator<T> {
    type Output;

    fn accept(&mut self, item: &T);

    fn finish(self) -> Self::Output;
}

pub struct FoldWith<A, F> {
    acc: A,
    f: F,
}

/// An aggregator that updates `init` in place with `f`.
pub fn fold<T, A, F>(init: A, f: F) -> FoldWith<A, F>
where
    F: FnMut(&mut A, &T),
{
    FoldWith { acc: init, f }
}

impl<T, A, F> Aggregator<T> for FoldWith<A, F>
where
    F: FnMut(&mut A, &T),
{
    type Output = A;

    #[inline]
    fn accept(&mut self, item: &T) {
        (self.f)(&mut self.acc, item)
    }

    fn finish(self) -> A {
        self.acc
    }
}

macro_rules! tuple_aggregator {
    ($($name:ident . $index:tt),+) => {
        impl<T, $($name: Aggregator<T>),+> Aggregator<T> for ($($name,)+) {
            type Output = ($($name::Output,)+);

            #[inline]
            fn accept(&mut self, item: &T) {
                $(self.$index.accept(item);)+
            }

            fn finish(self) -> Self::Output {
                ($(self.$index.finish(),)+)
            }
        }
    };
}

tuple_aggregator!(A.0);
tuple_aggregator!(A.0, B.1);
tuple_aggregator!(A.0, B.1, C.2);
tuple_aggregator!(A.0, B.1, C.2, D.3);
tuple_aggregator!(A.0, B.1, C.2, D.3, E.4);
tuple_aggregator!(A.0, B.1, C.2, D.3, E.4, F.5);
