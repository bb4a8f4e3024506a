//! Lenient boolean flags.
//!
//! Clients send booleans as `true`, `"true"`, `"True"`, `1` or `"1"` (and the
//! matching falsy forms). These helpers collapse every accepted spelling into
//! a plain `bool` while deserializing, so nothing past the API boundary ever
//! sees the raw value. Anything else is a deserialization error.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Parse a textual flag. Returns `None` for unrecognized spellings.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = bool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, \"true\"/\"false\", or 1/0")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
        match v {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
        match v {
            1 => Ok(true),
            0 => Ok(false),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
        parse_flag(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// `#[serde(deserialize_with = "pokedex_domain::flag::deserialize_flag")]`
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FlagVisitor)
}

struct OptionalFlagVisitor;

impl<'de> Visitor<'de> for OptionalFlagVisitor {
    type Value = Option<bool>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an optional boolean flag")
    }

    fn visit_none<E: de::Error>(self) -> Result<Option<bool>, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Option<bool>, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_flag(deserializer).map(Some)
    }
}

/// Optional variant; pair with `#[serde(default)]` so an absent field is `None`.
pub fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalFlagVisitor)
}
