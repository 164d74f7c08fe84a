//! The one primitive every correlation helper is built on

use evtc_core::{Time, TimedEvent};
use evtc_storage::EventRun;

/// Events of `run` with `|event.time - time| < epsilon`
///
/// A non-positive epsilon matches nothing.
pub fn find_related<E: TimedEvent>(
    run: EventRun<'_, E>,
    time: Time,
    epsilon: Time,
) -> EventRun<'_, E> {
    run.around(time, epsilon)
}

/// [`find_related`] over a time-sorted slice
pub fn find_related_in<E: TimedEvent>(
    events: &[E],
    time: Time,
    epsilon: Time,
) -> EventRun<'_, E> {
    find_related(EventRun::contiguous(events), time, epsilon)
}
