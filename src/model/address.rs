// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Hardware addresses and vendor prefixes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AddressError;

/// A 6-byte transceiver address. Displays as lower-case `aa:bb:cc:dd:ee:ff`.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Bssid([u8; 6]);

impl Bssid {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Parse `aa:bb:cc:dd:ee:ff` or `AA-BB-CC-DD-EE-FF`, any case.
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        let bytes = parse_octets::<6>(s)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Vendor prefix, the first three octets.
    pub fn oui(&self) -> Oui {
        Oui([self.0[0], self.0[1], self.0[2]])
    }

    /// Locally administered bit set (randomised or software AP addresses).
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl fmt::Debug for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bssid({self})")
    }
}

impl FromStr for Bssid {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Organisationally unique identifier. Used for grouping only.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Oui([u8; 3]);

impl Oui {
    pub fn parse(s: &str) -> Result<Self, AddressError> {
        Ok(Self(parse_octets::<3>(s)?))
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }
}

impl fmt::Display for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}")
    }
}

impl fmt::Debug for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oui({self})")
    }
}

impl FromStr for Oui {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_octets<const N: usize>(s: &str) -> Result<[u8; N], AddressError> {
    let input = s.trim();
    let parts: Vec<&str> = input.split([':', '-']).collect();
    if parts.len() != N {
        return Err(AddressError::OctetCount {
            input: input.to_owned(),
            expected: N,
            found: parts.len(),
        });
    }

    let mut bytes = [0u8; N];
    for (slot, part) in bytes.iter_mut().zip(&parts) {
        let byte = (part.len() == 2 && part.bytes().all(|b| b.is_ascii_hexdigit()))
            .then(|| u8::from_str_radix(part, 16).ok())
            .flatten();
        *slot = byte.ok_or_else(|| AddressError::InvalidOctet {
            input: input.to_owned(),
            octet: (*part).to_owned(),
        })?;
    }
    Ok(bytes)
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

string_serde!(Bssid);
string_serde!(Oui);
