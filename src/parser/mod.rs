// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Scan parser - raw scan text to [`Snapshot`]
//!
//! The parser is a line-oriented state machine. The state is an explicit
//! value handed from line to line; nothing about the observation being
//! built lives outside it.
//!
//! ```text
//! SSID 1 : Cafe-WiFi
//!     Network type            : Infrastructure
//!     Authentication          : WPA2-Personal
//!     Encryption              : CCMP
//!     BSSID 1                 : aa:bb:cc:dd:ee:01
//!          Signal             : 84%
//!          Radio type         : 802.11ax
//!          Band               : 5 GHz
//!          Channel            : 48
//!          Basic rates (Mbps) : 6 12 24
//!          Other rates (Mbps) : 9 18 36 48 54
//! ```

mod lines;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::{AccessPointObservation, Band, Bssid, Snapshot};
use lines::{classify, non_empty, parse_channel, parse_signal, Attribute, Line};

/// Counters describing how a raw scan was consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub lines: usize,
    pub observations: usize,
    /// Lines matching no known pattern, or attributes with no open block
    pub skipped_lines: usize,
    pub malformed_bssid_headers: usize,
    /// BSSIDs seen more than once; the later block wins
    pub duplicate_bssids: usize,
}

impl ParseStats {
    /// Non-blank input that produced nothing recognisable.
    pub fn is_garbled(&self) -> bool {
        self.observations == 0 && self.skipped_lines > 0 && self.malformed_bssid_headers == 0
    }
}

/// Parse one raw scan into a snapshot stamped with `timestamp`.
///
/// Never fails: empty or garbled text yields an empty snapshot.
pub fn parse_scan(raw: &str, timestamp: DateTime<Utc>) -> Snapshot {
    parse_scan_with_stats(raw, timestamp).0
}

/// As [`parse_scan`], also returning how the input was consumed.
pub fn parse_scan_with_stats(raw: &str, timestamp: DateTime<Utc>) -> (Snapshot, ParseStats) {
    let mut sink = Collector::new(timestamp);

    let last = raw
        .lines()
        .fold(ParseState::AwaitingSsid, |state, line| state.step(line, &mut sink));
    last.close(&mut sink);

    sink.finish()
}

/// SSID-level context shared by every BSSID block beneath one header
#[derive(Debug, Clone, Default)]
struct SsidContext {
    ssid: String,
    authentication: Option<String>,
    encryption: Option<String>,
}

impl SsidContext {
    fn named(ssid: &str) -> Self {
        Self {
            ssid: ssid.trim().to_owned(),
            ..Default::default()
        }
    }

    /// `auth/enc`, or whichever half was reported.
    fn security(&self) -> Option<String> {
        match (&self.authentication, &self.encryption) {
            (Some(auth), Some(enc)) => Some(format!("{auth}/{enc}")),
            (Some(one), None) | (None, Some(one)) => Some(one.clone()),
            (None, None) => None,
        }
    }
}

/// Fields accumulated for the BSSID block currently open
#[derive(Debug, Clone)]
struct PendingObservation {
    bssid: Bssid,
    signal_percent: Option<u8>,
    radio_type: Option<String>,
    band_line: Option<Band>,
    channel: Option<u32>,
    details: Option<String>,
    basic_rates: Option<String>,
    other_rates: Option<String>,
}

impl PendingObservation {
    fn new(bssid: Bssid) -> Self {
        Self {
            bssid,
            signal_percent: None,
            radio_type: None,
            band_line: None,
            channel: None,
            details: None,
            basic_rates: None,
            other_rates: None,
        }
    }

    fn apply(&mut self, attr: Attribute, value: &str) -> bool {
        match attr {
            Attribute::Signal => self.signal_percent = parse_signal(value),
            Attribute::RadioType => self.radio_type = non_empty(value),
            Attribute::Band => self.band_line = Some(Band::classify(value)),
            Attribute::Channel => self.channel = parse_channel(value),
            Attribute::Details => self.details = non_empty(value),
            Attribute::BasicRates => self.basic_rates = non_empty(value),
            Attribute::OtherRates => self.other_rates = non_empty(value),
            Attribute::Authentication | Attribute::Encryption => return false,
        }
        true
    }

    /// Band precedence: explicit band line, radio type table, channel number.
    fn band(&self) -> Band {
        let from_line = self.band_line.filter(Band::is_known);
        let from_radio = self
            .radio_type
            .as_deref()
            .map(Band::classify)
            .filter(Band::is_known);
        let from_channel = self.channel.map(Band::from_channel).filter(Band::is_known);

        from_line
            .or(from_radio)
            .or(from_channel)
            .unwrap_or(Band::Unknown)
    }

    fn finalize(self, ctx: &SsidContext, timestamp: DateTime<Utc>) -> AccessPointObservation {
        let band = self.band();
        let mut obs = AccessPointObservation::new(timestamp, ctx.ssid.clone(), self.bssid);
        obs.band = band;
        obs.channel = self.channel;
        obs.signal_percent = self.signal_percent;
        obs.details = self.details.or_else(|| ctx.security());
        obs.radio_type = self.radio_type;
        obs.basic_rates = self.basic_rates;
        obs.other_rates = self.other_rates;
        obs
    }
}

/// Parser state, threaded through every line
#[derive(Debug)]
enum ParseState {
    AwaitingSsid,
    AwaitingBssid {
        ctx: SsidContext,
    },
    /// `pending` is `None` after a BSSID header with an unreadable address;
    /// its attribute lines are swallowed instead of landing on a neighbour.
    AwaitingAttribute {
        ctx: SsidContext,
        pending: Option<PendingObservation>,
    },
}

impl ParseState {
    fn step(self, line: &str, sink: &mut Collector) -> Self {
        sink.stats.lines += 1;

        match classify(line) {
            Line::Blank | Line::Preamble => self,
            Line::Unrecognized => {
                sink.stats.skipped_lines += 1;
                self
            }
            Line::Ssid(name) => {
                self.close(sink);
                ParseState::AwaitingBssid {
                    ctx: SsidContext::named(name),
                }
            }
            Line::Bssid(address) => {
                let ctx = self.close(sink);
                let pending = match address {
                    Ok(bssid) => Some(PendingObservation::new(bssid)),
                    Err(e) => {
                        debug!("Skipping BSSID block: {}", e);
                        sink.stats.malformed_bssid_headers += 1;
                        None
                    }
                };
                ParseState::AwaitingAttribute { ctx, pending }
            }
            Line::Attribute(attr, value) => self.apply(attr, value, sink),
        }
    }

    fn apply(mut self, attr: Attribute, value: &str, sink: &mut Collector) -> Self {
        let applied = match (&mut self, attr) {
            (
                ParseState::AwaitingBssid { ctx } | ParseState::AwaitingAttribute { ctx, .. },
                Attribute::Authentication,
            ) => {
                ctx.authentication = non_empty(value);
                true
            }
            (
                ParseState::AwaitingBssid { ctx } | ParseState::AwaitingAttribute { ctx, .. },
                Attribute::Encryption,
            ) => {
                ctx.encryption = non_empty(value);
                true
            }
            (ParseState::AwaitingAttribute { pending: Some(pending), .. }, attr) => {
                pending.apply(attr, value)
            }
            _ => false,
        };

        if !applied {
            trace!("Attribute {:?} outside a BSSID block", attr);
            sink.stats.skipped_lines += 1;
        }
        self
    }

    /// Finalize any open block and hand back the SSID context.
    fn close(self, sink: &mut Collector) -> SsidContext {
        match self {
            ParseState::AwaitingSsid => SsidContext::default(),
            ParseState::AwaitingBssid { ctx } => ctx,
            ParseState::AwaitingAttribute { ctx, pending } => {
                if let Some(pending) = pending {
                    let obs = pending.finalize(&ctx, sink.timestamp);
                    sink.insert(obs);
                }
                ctx
            }
        }
    }
}

/// Output side of the parse
struct Collector {
    timestamp: DateTime<Utc>,
    observations: BTreeMap<Bssid, AccessPointObservation>,
    stats: ParseStats,
}

impl Collector {
    fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            observations: BTreeMap::new(),
            stats: ParseStats::default(),
        }
    }

    fn insert(&mut self, obs: AccessPointObservation) {
        let bssid = obs.bssid;
        if self.observations.insert(bssid, obs).is_some() {
            debug!("Duplicate BSSID {} in scan, keeping latest block", bssid);
            self.stats.duplicate_bssids += 1;
        }
    }

    fn finish(mut self) -> (Snapshot, ParseStats) {
        self.stats.observations = self.observations.len();
        (Snapshot::new(self.timestamp, self.observations), self.stats)
    }
}
