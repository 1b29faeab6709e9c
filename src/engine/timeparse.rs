use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Date key format shared verbatim with everything that produces or consumes
/// `Prediction.match_date` strings.
pub const DATE_KEY_FORMAT: &str = "%d-%m-%Y";

/// Upstream pages print kickoff times one hour behind the zone the rest of
/// the system runs in; every parsed timestamp gets this correction.
const OFFSET_HOURS: i64 = 1;

const DATETIME_FORMATS: [&str; 6] = [
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 4] = ["%d.%m.%Y", "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Canonical (date, time) pair for a kickoff, already offset-corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedKickoff {
    /// `dd-MM-yyyy`
    pub date: String,
    /// `HH:mm`
    pub time: String,
}

/// Parse a heterogeneous kickoff string into the canonical pair. Applies the
/// one-hour offset correction, which can roll the date across midnight.
/// Returns `None` for unparseable input (per-record skip, never an error).
pub fn normalize_kickoff(raw: &str) -> Option<NormalizedKickoff> {
    let corrected = parse_kickoff(raw)? + Duration::hours(OFFSET_HOURS);
    Some(NormalizedKickoff {
        date: corrected.format(DATE_KEY_FORMAT).to_string(),
        time: corrected.format("%H:%M").to_string(),
    })
}

/// Parse without the offset correction. Used when persisting historical
/// results, where the full timestamp is kept.
pub fn parse_kickoff(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    // Date-only input: midnight.
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Format a date in the shared reconciliation key format.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dotted_format() {
        let k = normalize_kickoff("21.03.2026 18:30").unwrap();
        assert_eq!(k.date, "21-03-2026");
        assert_eq!(k.time, "19:30");
    }

    #[test]
    fn test_normalize_iso_format() {
        let k = normalize_kickoff("2026-03-21 18:30").unwrap();
        assert_eq!(k.date, "21-03-2026");
        assert_eq!(k.time, "19:30");
    }

    #[test]
    fn test_offset_rolls_past_midnight() {
        let k = normalize_kickoff("31.12.2025 23:30").unwrap();
        assert_eq!(k.date, "01-01-2026");
        assert_eq!(k.time, "00:30");
    }

    #[test]
    fn test_date_only_defaults_to_midnight() {
        let k = normalize_kickoff("21.03.2026").unwrap();
        assert_eq!(k.date, "21-03-2026");
        assert_eq!(k.time, "01:00");
    }

    #[test]
    fn test_unparseable_is_skipped() {
        assert!(normalize_kickoff("tomorrow evening").is_none());
        assert!(normalize_kickoff("").is_none());
    }

    #[test]
    fn test_date_key_format() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(date_key(d), "05-03-2026");
    }
}
