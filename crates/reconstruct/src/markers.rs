//! Agent marker reconstruction
//!
//! Marker records carry the marker id in `value`; id 0 ends markers. How an
//! end and a same-id restart are interpreted depends on the marker protocol
//! of the log (see [`MarkerProtocol`]).

use crate::context::ResolutionContext;
use crate::group::{group_by, map_groups};
use evtc_core::events::MarkerEvent;
use evtc_core::{AgentId, CombatItem, ContentCategory, MarkerProtocol, Time};
use tracing::debug;

/// A marker whose end is not known yet
struct OpenMarker {
    time: Time,
    marker_id: u32,
    commander_tag: bool,
    end: Option<Time>,
}

/// Rebuild every agent marker from the marker records
pub fn reconstruct_markers(
    ctx: &ResolutionContext<'_>,
    records: &[&CombatItem],
) -> Vec<MarkerEvent> {
    let groups = group_by(records, |r| ctx.src(r));
    let markers = map_groups(groups, ctx.parallel, |group| {
        let owner = group.first().map_or(AgentId::UNKNOWN, |r| ctx.src(r));
        let scanned = match ctx.marker_protocol {
            MarkerProtocol::Modern => scan_modern(&group),
            MarkerProtocol::Legacy => scan_legacy(&group),
        };
        scanned
            .into_iter()
            .map(|m| MarkerEvent {
                time: m.time,
                owner,
                marker_id: m.marker_id,
                guid: ctx.guid(ContentCategory::Marker, m.marker_id),
                end_time: m.end.unwrap_or(ctx.bounds.end).max(m.time),
                commander_tag: m.commander_tag,
            })
            .collect()
    });
    debug!(
        target: "evtc::reconstruct",
        protocol = ?ctx.marker_protocol,
        markers = markers.len(),
        "Markers reconstructed"
    );
    markers
}

fn marker_id(record: &CombatItem) -> u32 {
    record.value as u32
}

fn opened(record: &CombatItem) -> OpenMarker {
    OpenMarker {
        time: record.time,
        marker_id: marker_id(record),
        commander_tag: record.buff != 0,
        end: None,
    }
}

/// An end closes every open marker; a start closes an open marker with the
/// same id before opening the new one
fn scan_modern(records: &[&CombatItem]) -> Vec<OpenMarker> {
    let mut markers: Vec<OpenMarker> = Vec::new();
    for record in records {
        let id = marker_id(record);
        if id == 0 {
            for marker in markers.iter_mut().rev() {
                if marker.end.is_some() {
                    break;
                }
                marker.end = Some(record.time);
            }
            continue;
        }
        if let Some(previous) = markers.iter_mut().rev().find(|m| m.marker_id == id) {
            if previous.end.is_none() {
                previous.end = Some(record.time);
            }
        }
        markers.push(opened(record));
    }
    markers
}

/// An end closes the most recent marker; a start with the same id as the
/// open most recent marker extends it, any other start replaces it
fn scan_legacy(records: &[&CombatItem]) -> Vec<OpenMarker> {
    let mut markers: Vec<OpenMarker> = Vec::new();
    for record in records {
        let id = marker_id(record);
        let last = markers.last_mut().filter(|m| m.end.is_none());
        if id == 0 {
            if let Some(last) = last {
                last.end = Some(record.time);
            }
            continue;
        }
        match last {
            Some(last) if last.marker_id == id => continue,
            Some(last) => last.end = Some(record.time),
            None => {}
        }
        markers.push(opened(record));
    }
    markers
}
