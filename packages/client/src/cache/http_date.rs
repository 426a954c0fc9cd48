//! HTTP date parsing and formatting utilities
//!
//! Only the IMF-fixdate form (`Mon, 02 Jan 2006 15:04:05 GMT`) is accepted,
//! for `Expires` and `Last-Modified` alike.

/// HTTP date parsing error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpDateParseError {
    /// Date did not match the IMF-fixdate layout
    #[error("unrecognized HTTP date format: {0}")]
    UnrecognizedFormat(String),
    /// Date was parsed but represents a time before Unix epoch
    #[error("invalid timestamp in HTTP date: {0}")]
    InvalidTimestamp(String),
}

/// HTTP date parsing utilities
pub mod httpdate {
    use std::time::{Duration, SystemTime};

    use chrono::{DateTime, NaiveDateTime, Utc};

    use super::HttpDateParseError;

    const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

    /// Parse an IMF-fixdate string into `SystemTime`
    pub fn parse_http_date(date_str: &str) -> Result<SystemTime, HttpDateParseError> {
        let parsed = NaiveDateTime::parse_from_str(date_str.trim(), IMF_FIXDATE)
            .map_err(|_| HttpDateParseError::UnrecognizedFormat(date_str.to_string()))?;

        let timestamp = u64::try_from(parsed.and_utc().timestamp())
            .map_err(|_| HttpDateParseError::InvalidTimestamp(date_str.to_string()))?;

        Ok(SystemTime::UNIX_EPOCH + Duration::from_secs(timestamp))
    }

    /// Format `SystemTime` as an IMF-fixdate string
    pub fn fmt_http_date(time: SystemTime) -> String {
        let secs = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());

        let dt = i64::try_from(secs)
            .ok()
            .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
            .unwrap_or_default();

        dt.format(IMF_FIXDATE).to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use super::httpdate::{fmt_http_date, parse_http_date};
    use super::*;

    #[test]
    fn parses_imf_fixdate() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").expect("valid date");
        assert_eq!(parsed, SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777));
    }

    #[test]
    fn formats_what_it_parses() {
        let raw = "Tue, 15 Nov 1994 12:45:26 GMT";
        let parsed = parse_http_date(raw).expect("valid date");
        assert_eq!(fmt_http_date(parsed), raw);
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(matches!(
            parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT"),
            Err(HttpDateParseError::UnrecognizedFormat(_))
        ));
        assert!(parse_http_date("Sun Nov  6 08:49:37 1994").is_err());
        assert!(parse_http_date("").is_err());
    }

    #[test]
    fn rejects_dates_before_epoch() {
        assert!(matches!(
            parse_http_date("Wed, 31 Dec 1969 23:59:59 GMT"),
            Err(HttpDateParseError::InvalidTimestamp(_))
        ));
    }
}
