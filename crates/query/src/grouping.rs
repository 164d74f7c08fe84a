//! Epsilon windows over time-ordered events

use evtc_core::{Time, TimedEvent};

/// Split time-ordered events into consecutive windows
///
/// A window opens at its first event and holds every following event
/// strictly less than `epsilon` after that opening event; the next event
/// opens a new window.
pub fn epsilon_windows<'a, E, I>(events: I, epsilon: Time) -> Vec<Vec<&'a E>>
where
    E: TimedEvent + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut windows = Vec::new();
    let mut current: Vec<&'a E> = Vec::new();
    let mut window_end = Time::MIN;
    for event in events {
        if !current.is_empty() && event.time() >= window_end {
            windows.push(std::mem::take(&mut current));
        }
        if current.is_empty() {
            window_end = event.time().saturating_add(epsilon);
        }
        current.push(event);
    }
    if !current.is_empty() {
        windows.push(current);
    }
    windows
}
