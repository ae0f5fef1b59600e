use std::vec;

use crate::{
    cursor::Cursor,
    element::Element,
    error::Result,
    producer::Producer,
    seq::{Mode, Seq},
};

/// The value at `pct` percent of an ascending sample, interpolating linearly
/// between the two nearest ranks at `pct / 100 * (n - 1)`.
pub(crate) fn interpolate(sorted: &[f64], pct: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (pct / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Groups the parent into the bands below, within and above two percentile
/// boundaries. Each band keeps the parent's order; empty bands are dropped.
pub(crate) enum Percentiles<T, K> {
    Pending {
        cursor: Cursor<T>,
        key: K,
        low: f64,
        high: f64,
        mode: Mode,
    },
    Ready(vec::IntoIter<Seq<T>>),
}

impl<T, K> Percentiles<T, K> {
    pub(crate) fn new(cursor: Cursor<T>, key: K, low: f64, high: f64, mode: Mode) -> Self {
        let (low, high) = (low.clamp(0.0, 100.0), high.clamp(0.0, 100.0));
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Percentiles::Pending {
            cursor,
            key,
            low,
            high,
            mode,
        }
    }
}

impl<T, K> Producer for Percentiles<T, K>
where
    T: Element,
    K: FnMut(&T) -> f64 + Send,
{
    type Item = Seq<T>;

    fn produce(&mut self) -> Result<Option<Seq<T>>> {
        if let Percentiles::Pending {
            cursor,
            key,
            low,
            high,
            mode,
        } = self
        {
            let items = cursor.by_ref().collect::<Result<Vec<T>>>()?;
            let keys: Vec<f64> = items.iter().map(&mut *key).collect();
            let mut sorted = keys.clone();
            sorted.sort_by(f64::total_cmp);

            let mut bands: [Vec<T>; 3] = Default::default();
            let bounds = (interpolate(&sorted, *low), interpolate(&sorted, *high));
            if let (Some(low), Some(high)) = bounds {
                for (item, key) in items.into_iter().zip(keys) {
                    let band = if key < low {
                        0
                    } else if key > high {
                        2
                    } else {
                        1
                    };
                    bands[band].push(item);
                }
            }

            let mode = *mode;
            let segments: Vec<Seq<T>> = bands
                .into_iter()
                .filter(|band| !band.is_empty())
                .map(|band| Seq::array(band, mode))
                .collect();
            *self = Percentiles::Ready(segments.into_iter());
        }
        Ok(match self {
            Percentiles::Ready(segments) => segments.next(),
            Percentiles::Pending { .. } => None,
        })
    }
}
