// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Line grammar for `netsh wlan show networks mode=bssid` output

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AddressError;
use crate::model::Bssid;

/// `key : value`. Keys never contain a colon, so addresses and SSIDs with
/// colons stay intact in the value.
static KEY_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<key>[A-Za-z][A-Za-z0-9 ()/._-]*?)\s*:\s*(?P<value>.*?)\s*$")
        .expect("static key/value pattern")
});

static SSID_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^ssid\s+\d+$").expect("static ssid pattern"));

static BSSID_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^bssid\s+\d+$").expect("static bssid pattern"));

/// `There are 3 networks currently visible.`
static NETWORK_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^there\s+(are|is)\s+\d+\s+networks?\b").expect("static count pattern")
});

static UNIT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("static unit pattern"));

/// Attribute lines the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Attribute {
    Signal,
    RadioType,
    Band,
    Channel,
    Details,
    BasicRates,
    OtherRates,
    Authentication,
    Encryption,
}

impl Attribute {
    fn from_key(key: &str) -> Option<Self> {
        let key = UNIT_SUFFIX.replace(key, "").to_ascii_lowercase();
        let attr = match key.as_str() {
            "signal" => Attribute::Signal,
            "radio type" => Attribute::RadioType,
            "band" => Attribute::Band,
            "channel" => Attribute::Channel,
            "details" | "capabilities" => Attribute::Details,
            "basic rates" => Attribute::BasicRates,
            "other rates" => Attribute::OtherRates,
            "authentication" => Attribute::Authentication,
            "encryption" => Attribute::Encryption,
            _ => return None,
        };
        Some(attr)
    }
}

/// One classified input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    Ssid(&'a str),
    Bssid(Result<Bssid, AddressError>),
    Attribute(Attribute, &'a str),
    /// Interface banner and network count printed ahead of the first SSID
    Preamble,
    Unrecognized,
}

pub(crate) fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if NETWORK_COUNT.is_match(line) {
        return Line::Preamble;
    }

    let Some(caps) = KEY_VALUE.captures(line) else {
        return Line::Unrecognized;
    };
    let (Some(key), Some(value)) = (caps.name("key"), caps.name("value")) else {
        return Line::Unrecognized;
    };
    let key = key.as_str().trim();
    let value = value.as_str();

    if SSID_KEY.is_match(key) {
        Line::Ssid(value)
    } else if BSSID_KEY.is_match(key) {
        Line::Bssid(Bssid::parse(value))
    } else if let Some(attr) = Attribute::from_key(key) {
        Line::Attribute(attr, value)
    } else if key.eq_ignore_ascii_case("interface name") {
        Line::Preamble
    } else {
        Line::Unrecognized
    }
}

/// `"84%"` or `"84"`. Values above 100 clamp.
pub(crate) fn parse_signal(value: &str) -> Option<u8> {
    let digits = value.trim().trim_end_matches('%').trim();
    let pct: u32 = digits.parse().ok()?;
    Some(pct.min(100) as u8)
}

pub(crate) fn parse_channel(value: &str) -> Option<u32> {
    value.split_whitespace().next()?.parse().ok()
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_headers() {
        assert_eq!(classify("SSID 1 : Cafe-WiFi"), Line::Ssid("Cafe-WiFi"));
        assert_eq!(classify("SSID 4 :"), Line::Ssid(""));
        assert_eq!(classify("ssid 2 : has : colons"), Line::Ssid("has : colons"));

        match classify("    BSSID 1                 : D8:32:14:B0:A0:3E") {
            Line::Bssid(Ok(b)) => assert_eq!(b.to_string(), "d8:32:14:b0:a0:3e"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(classify("BSSID 2 : not-a-mac"), Line::Bssid(Err(_))));
    }

    #[test]
    fn test_classify_attributes() {
        assert_eq!(
            classify("         Signal             : 84%"),
            Line::Attribute(Attribute::Signal, "84%")
        );
        assert_eq!(
            classify("Basic rates (Mbps) : 1 2 5.5 11"),
            Line::Attribute(Attribute::BasicRates, "1 2 5.5 11")
        );
        assert_eq!(
            classify("Radio type : 802.11ax"),
            Line::Attribute(Attribute::RadioType, "802.11ax")
        );
        assert_eq!(
            classify("Authentication : WPA2-Personal"),
            Line::Attribute(Attribute::Authentication, "WPA2-Personal")
        );
    }

    #[test]
    fn test_classify_noise() {
        assert_eq!(classify("   "), Line::Blank);
        assert_eq!(classify("Network type : Infrastructure"), Line::Unrecognized);
        assert_eq!(classify(": orphan value"), Line::Unrecognized);
    }

    #[test]
    fn test_classify_preamble() {
        assert_eq!(classify("Interface name : Wi-Fi"), Line::Preamble);
        assert_eq!(classify("There are 3 networks currently visible."), Line::Preamble);
        assert_eq!(classify("There are 0 networks currently visible.\r"), Line::Preamble);
        assert_eq!(classify("There is 1 network currently visible."), Line::Preamble);
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_signal("73%"), Some(73));
        assert_eq!(parse_signal(" 100 "), Some(100));
        assert_eq!(parse_signal("140%"), Some(100));
        assert_eq!(parse_signal("strong"), None);

        assert_eq!(parse_channel("48"), Some(48));
        assert_eq!(parse_channel("36 (80 MHz)"), Some(36));
        assert_eq!(parse_channel(""), None);

        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" WPA3 "), Some("WPA3".to_string()));
    }
}
