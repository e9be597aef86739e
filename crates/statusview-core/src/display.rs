//! Display options: locale, fixed display offset, and error visibility.

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

use crate::error::{Result, StatusError};
use crate::snapshot::StatusSnapshot;

/// Locale used for labels and date layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "iso")]
    Iso,
}

impl Locale {
    /// BCP 47 tag, used for `<html lang>`.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::EnUs => "en-US",
            Locale::Iso => "en",
        }
    }

    /// `toLocaleString` equivalent layout.
    pub fn datetime_layout(self) -> &'static str {
        match self {
            Locale::PtBr => "%d/%m/%Y, %H:%M:%S",
            Locale::EnUs => "%-m/%-d/%Y, %-I:%M:%S %p",
            Locale::Iso => "%Y-%m-%d %H:%M:%S %:z",
        }
    }

    pub fn loading(self) -> &'static str {
        match self {
            Locale::PtBr => "Carregando...",
            Locale::EnUs | Locale::Iso => "Loading...",
        }
    }

    pub fn updated_at_label(self) -> &'static str {
        match self {
            Locale::PtBr => "Última atualização",
            Locale::EnUs | Locale::Iso => "Last updated",
        }
    }

    pub fn stale_notice(self) -> &'static str {
        match self {
            Locale::PtBr => "Dados desatualizados",
            Locale::EnUs | Locale::Iso => "Data is stale",
        }
    }

    pub fn failed_notice(self) -> &'static str {
        match self {
            Locale::PtBr => "Falha ao carregar",
            Locale::EnUs | Locale::Iso => "Failed to load",
        }
    }
}

/// Whether failed polls are surfaced to the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorVisibility {
    /// Keep showing the last good values (or the loading placeholder) silently.
    #[default]
    Hidden,
    /// Add a notice naming the failure kind.
    Indicator,
}

/// Everything the renderers need besides the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub locale: Locale,
    pub offset: FixedOffset,
    pub error_visibility: ErrorVisibility,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            offset: utc(),
            error_visibility: ErrorVisibility::default(),
        }
    }
}

impl DisplayOptions {
    /// Localized absolute time for `updated_at`, or the raw text when it
    /// cannot be parsed.
    pub fn format_updated_at(&self, snapshot: &StatusSnapshot) -> String {
        match snapshot.updated_at_in(self.offset) {
            Some(dt) => dt.format(self.locale.datetime_layout()).to_string(),
            None => {
                tracing::debug!(raw = %snapshot.updated_at, "updated_at not parseable, shown raw");
                snapshot.updated_at.clone()
            }
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }

    let bad = || StatusError::Config(format!("invalid utc offset: {s:?}"));

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(bad()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) || !(digits.len() == 2 || digits.len() == 4) {
        return Err(bad());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| bad())?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| bad())?
    } else {
        0
    };
    if hours > 23 || minutes > 59 {
        return Err(bad());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(bad)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn offsets_parse() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("utc").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("-03:00").unwrap().local_minus_utc(), -3 * 3600);
        assert_eq!(parse_utc_offset("+0530").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_utc_offset("+09").unwrap().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn bad_offsets_are_config_errors() {
        for s in ["", "03:00", "+3", "+24:00", "+01:60", "-ab:cd", "+01:00:00"] {
            let err = parse_utc_offset(s).unwrap_err();
            assert!(matches!(err, StatusError::Config(_)), "input={s:?}");
        }
    }
}
