//! Log header and build thresholds
//!
//! The instrumentation addon changed the meaning of some records over time.
//! Each behavior switch is a discrete threshold on the evtc build date
//! (`YYYYMMDD`) carried by the log header.

use serde::{Deserialize, Serialize};

/// IDToGUID records carry usable ids from this build on
pub const FUNCTIONAL_ID_TO_GUID: u64 = 20240612;

/// Marker end records close every open marker of the owner from this build on
pub const NEW_MARKER_EVENT_BEHAVIOR: u64 = 20240627;

/// Buff extension records are unreliable up to this build
pub const BUFF_EXTENSION_BROKEN: u64 = 20210923;

/// Header decoded from the log container, before the first record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogHeader {
    /// Addon build date, `YYYYMMDD`
    pub evtc_build: u64,
    /// Header revision
    pub revision: u8,
    /// Species id of the encounter's main target
    pub encounter_id: u32,
}

impl LogHeader {
    /// Create a header for the given build
    pub fn new(evtc_build: u64) -> Self {
        Self {
            evtc_build,
            revision: 1,
            encounter_id: 0,
        }
    }

    /// Marker closing behavior of this build
    pub fn marker_protocol(&self) -> MarkerProtocol {
        if self.evtc_build >= NEW_MARKER_EVENT_BEHAVIOR {
            MarkerProtocol::Modern
        } else {
            MarkerProtocol::Legacy
        }
    }

    /// True when IDToGUID records should be honoured
    pub fn has_functional_guids(&self) -> bool {
        self.evtc_build >= FUNCTIONAL_ID_TO_GUID
    }

    /// True when buff extension records of this build are unreliable
    pub fn has_broken_buff_extensions(&self) -> bool {
        self.evtc_build <= BUFF_EXTENSION_BROKEN
    }
}

/// How marker end records are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerProtocol {
    /// An end closes only the most recent marker; a same-id restart extends
    Legacy,
    /// An end closes every open marker; a same-id restart reopens
    Modern,
}
