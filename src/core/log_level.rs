//! Log level definitions

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Position in the severity sequence, `debug` being 0.
    #[inline]
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Parse a level name, falling back to `Info` for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => BrightBlack,
            LogLevel::Info => Blue,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

// Configuration never fails on a bad level; anything unrecognized degrades to `info`.
impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientLevelVisitor)
    }
}

struct LenientLevelVisitor;

impl<'de> Visitor<'de> for LenientLevelVisitor {
    type Value = LogLevel;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a log level name")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<LogLevel, E> {
        Ok(LogLevel::parse_lenient(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<LogLevel, E> {
        Ok(LogLevel::Info)
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<LogLevel, E> {
        Ok(LogLevel::Info)
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<LogLevel, E> {
        Ok(LogLevel::Info)
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<LogLevel, E> {
        Ok(LogLevel::Info)
    }

    fn visit_unit<E: de::Error>(self) -> Result<LogLevel, E> {
        Ok(LogLevel::Info)
    }

    fn visit_none<E: de::Error>(self) -> Result<LogLevel, E> {
        Ok(LogLevel::Info)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<LogLevel, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LogLevel, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(LogLevel::Info)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LogLevel, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(LogLevel::Info)
    }
}
