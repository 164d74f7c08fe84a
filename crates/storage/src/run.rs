//! Read-only views over a time-sorted event sequence

use evtc_core::{TimedEvent, Time};
use std::fmt;

/// A time-ordered selection of events from one table
///
/// Either a contiguous slice of the table or a slice of positions into it.
/// Narrowing (`between`, `around`, `from`, `until`) re-slices the view, so
/// every positional query is a binary search.
pub struct EventRun<'a, E> {
    events: &'a [E],
    positions: Option<&'a [u32]>,
}

impl<'a, E> Clone for EventRun<'a, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E> Copy for EventRun<'a, E> {}

impl<'a, E> fmt::Debug for EventRun<'a, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRun").field("len", &self.len()).finish()
    }
}

impl<'a, E> EventRun<'a, E> {
    /// A run over a whole time-sorted slice
    pub fn contiguous(events: &'a [E]) -> Self {
        Self {
            events,
            positions: None,
        }
    }

    /// A run over `positions` of `events`; positions must be ascending
    pub(crate) fn indexed(events: &'a [E], positions: &'a [u32]) -> Self {
        Self {
            events,
            positions: Some(positions),
        }
    }

    pub fn empty() -> Self {
        Self {
            events: &[],
            positions: None,
        }
    }

    pub fn len(&self) -> usize {
        match self.positions {
            Some(p) => p.len(),
            None => self.events.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn at(&self, i: usize) -> &'a E {
        match self.positions {
            Some(p) => &self.events[p[i] as usize],
            None => &self.events[i],
        }
    }

    /// The `i`-th event of the run
    pub fn get(&self, i: usize) -> Option<&'a E> {
        (i < self.len()).then(|| self.at(i))
    }

    pub fn first(&self) -> Option<&'a E> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&'a E> {
        self.len().checked_sub(1).map(|i| self.at(i))
    }

    /// Events in time order
    pub fn iter(&self) -> RunIter<'a, E> {
        (*self).into_iter()
    }

    pub fn to_vec(&self) -> Vec<&'a E> {
        self.iter().collect()
    }

    fn slice(&self, lo: usize, hi: usize) -> Self {
        match self.positions {
            Some(p) => Self::indexed(self.events, &p[lo..hi]),
            None => Self::contiguous(&self.events[lo..hi]),
        }
    }
}

impl<'a, E: TimedEvent> EventRun<'a, E> {
    /// Number of leading events whose time satisfies `pred`
    ///
    /// `pred` must be true on a prefix of the run and false afterwards.
    fn partition_point(&self, pred: impl Fn(Time) -> bool) -> usize {
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(self.at(mid).time()) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }

    /// Events with `start <= time <= end`
    pub fn between(&self, start: Time, end: Time) -> Self {
        if start > end {
            return Self::empty();
        }
        let lo = self.partition_point(|t| t < start);
        let hi = self.partition_point(|t| t <= end);
        self.slice(lo, hi.max(lo))
    }

    /// Events with `|event.time - time| < epsilon`
    pub fn around(&self, time: Time, epsilon: Time) -> Self {
        if epsilon <= 0 {
            return Self::empty();
        }
        let lo = self.partition_point(|t| t <= time.saturating_sub(epsilon));
        let hi = self.partition_point(|t| t < time.saturating_add(epsilon));
        self.slice(lo, hi.max(lo))
    }

    /// Events with `time >= start`
    pub fn from(&self, start: Time) -> Self {
        let lo = self.partition_point(|t| t < start);
        self.slice(lo, self.len())
    }

    /// Events with `time <= end`
    pub fn until(&self, end: Time) -> Self {
        let hi = self.partition_point(|t| t <= end);
        self.slice(0, hi)
    }

    /// Earliest event at or after `time`
    pub fn first_at_or_after(&self, time: Time) -> Option<&'a E> {
        let i = self.partition_point(|t| t < time);
        self.get(i)
    }

    /// Latest event at or before `time`
    pub fn last_at_or_before(&self, time: Time) -> Option<&'a E> {
        let i = self.partition_point(|t| t <= time);
        i.checked_sub(1).map(|i| self.at(i))
    }

    /// Latest event strictly before `time`
    pub fn last_before(&self, time: Time) -> Option<&'a E> {
        let i = self.partition_point(|t| t < time);
        i.checked_sub(1).map(|i| self.at(i))
    }
}

impl<'a, E> IntoIterator for EventRun<'a, E> {
    type Item = &'a E;
    type IntoIter = RunIter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        RunIter {
            run: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// Owning iterator over an [`EventRun`]
pub struct RunIter<'a, E> {
    run: EventRun<'a, E>,
    front: usize,
    back: usize,
}

impl<'a, E> Iterator for RunIter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = self.run.at(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<'a, E> DoubleEndedIterator for RunIter<'a, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.run.at(self.back))
    }
}

impl<'a, E> ExactSizeIterator for RunIter<'a, E> {}
