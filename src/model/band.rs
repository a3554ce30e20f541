// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Frequency band classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BandError;

/// Radio band an access point transmits on
///
/// Serialized with its display form (`"5 GHz"`) everywhere: config,
/// timeline, CSV and JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    TwoPointFourGhz,
    FiveGhz,
    SixGhz,
    #[default]
    Unknown,
}

/// Substrings that name a band outright. Checked in order.
const BAND_MARKERS: &[(&str, Band)] = &[
    ("6e", Band::SixGhz),
    ("6 ghz", Band::SixGhz),
    ("6ghz", Band::SixGhz),
    ("2.4", Band::TwoPointFourGhz),
    ("5 ghz", Band::FiveGhz),
    ("5ghz", Band::FiveGhz),
];

/// Single-band 802.11 standards, matched as whole tokens.
const SINGLE_BAND_STANDARDS: &[(&str, Band)] = &[
    ("802.11b", Band::TwoPointFourGhz),
    ("802.11g", Band::TwoPointFourGhz),
    ("802.11a", Band::FiveGhz),
    ("802.11ac", Band::FiveGhz),
];

impl Band {
    /// Classify a reported radio-type or band string.
    ///
    /// Multi-band standards such as `802.11n` and `802.11ax` say nothing
    /// about the band and classify as [`Band::Unknown`].
    pub fn classify(radio_type: &str) -> Self {
        let lower = radio_type.trim().to_ascii_lowercase();

        if let Some((_, band)) = BAND_MARKERS.iter().find(|(marker, _)| lower.contains(marker)) {
            return *band;
        }

        lower
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .find_map(|token| {
                SINGLE_BAND_STANDARDS
                    .iter()
                    .find(|(standard, _)| *standard == token)
                    .map(|(_, band)| *band)
            })
            .unwrap_or(Band::Unknown)
    }

    /// Infer the band from a channel number.
    ///
    /// 6 GHz channel numbers overlap the 5 GHz plan, so they are never inferred.
    pub fn from_channel(channel: u32) -> Self {
        match channel {
            1..=14 => Band::TwoPointFourGhz,
            32..=177 => Band::FiveGhz,
            _ => Band::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Band::Unknown)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Band::TwoPointFourGhz => write!(f, "2.4 GHz"),
            Band::FiveGhz => write!(f, "5 GHz"),
            Band::SixGhz => write!(f, "6 GHz"),
            Band::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for Band {
    type Err = BandError;

    /// Accepts the display form and anything [`Band::classify`] knows.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("unknown") {
            return Ok(Band::Unknown);
        }
        match Band::classify(s) {
            Band::Unknown => Err(BandError(s.to_owned())),
            band => Ok(band),
        }
    }
}

impl Serialize for Band {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Band {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
