//! Recovers a plausible year/month/day triple from noisy recognized text.
//!
//! A clean stamp reads like "89 07 15", but misread characters routinely
//! break the digits up or inject garbage between them. The text is reduced
//! to short digit tokens and every run of three consecutive tokens is tried
//! as a (year, month, day) candidate; the first one inside the plausible
//! ranges wins. Scanning overlapping windows recovers dates that a strict
//! "six digits in a row" match would miss.

use regex::Regex;
use std::sync::OnceLock;

/// Two-digit year range of the stamping era. The century is assumed.
const YEAR_MIN: u32 = 70;
const YEAR_MAX: u32 = 99;

static DIGIT_RUNS: OnceLock<Regex> = OnceLock::new();

fn digit_runs() -> &'static Regex {
    DIGIT_RUNS.get_or_init(|| Regex::new(r"\d{1,2}").unwrap())
}

/// Splits text into integer tokens of at most two digits.
/// Non-digit characters separate tokens; longer digit runs are chunked
/// greedily, so "123" becomes [12, 3].
fn digit_tokens(text: &str) -> Vec<u32> {
    digit_runs()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Scans recognized text for the first plausible date and formats it as
/// "19YY-MM-DD". Returns None when no three consecutive tokens form a
/// valid (year, month, day) triple.
///
/// When several windows validate, the earliest one is taken. That keeps the
/// output deterministic; it is not necessarily the most likely reading.
pub fn first_date_candidate(text: &str) -> Option<String> {
    let tokens = digit_tokens(text);

    for window in tokens.windows(3) {
        let (y, m, d) = (window[0], window[1], window[2]);
        if (YEAR_MIN..=YEAR_MAX).contains(&y) && (1..=12).contains(&m) && (1..=31).contains(&d) {
            return Some(format!("19{}-{:02}-{:02}", y, m, d));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_stamp() {
        assert_eq!(first_date_candidate("89 07 15"), Some("1989-07-15".to_string()));
    }

    #[test]
    fn test_noise_between_fields() {
        // Garbage characters act as separators and are discarded
        assert_eq!(
            first_date_candidate("abc89xx07yy15zz"),
            Some("1989-07-15".to_string())
        );
    }

    #[test]
    fn test_zero_padding() {
        assert_eq!(first_date_candidate("92 1 1"), Some("1992-01-01".to_string()));
    }

    #[test]
    fn test_no_candidate() {
        assert_eq!(first_date_candidate("5 13 40"), None);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(first_date_candidate(""), None);
    }

    #[test]
    fn test_fewer_than_three_tokens() {
        assert_eq!(first_date_candidate("89 07"), None);
    }

    #[test]
    fn test_first_valid_window_wins() {
        // Both (88, 01, 02) and (99, 12, 31) validate; the earlier one is kept
        assert_eq!(
            first_date_candidate("88 01 02 99 12 31"),
            Some("1988-01-02".to_string())
        );
    }

    #[test]
    fn test_leading_invalid_window_skipped() {
        // (12, 88, 03) fails on the year; the scan moves on to (88, 03, 04)
        assert_eq!(
            first_date_candidate("12 88 03 04"),
            Some("1988-03-04".to_string())
        );
    }

    #[test]
    fn test_year_boundaries() {
        assert_eq!(first_date_candidate("69 06 15"), None);
        assert_eq!(first_date_candidate("70 06 15"), Some("1970-06-15".to_string()));
        assert_eq!(first_date_candidate("99 06 15"), Some("1999-06-15".to_string()));
        // A three-digit run is chunked into [10, 0], so no window holds 100
        assert_eq!(first_date_candidate("100 06 15"), None);
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(first_date_candidate("89 0 15"), None);
        assert_eq!(first_date_candidate("89 1 15"), Some("1989-01-15".to_string()));
        assert_eq!(first_date_candidate("89 12 15"), Some("1989-12-15".to_string()));
        assert_eq!(first_date_candidate("89 13 15"), None);
    }

    #[test]
    fn test_day_boundaries() {
        assert_eq!(first_date_candidate("89 07 0"), None);
        assert_eq!(first_date_candidate("89 07 1"), Some("1989-07-01".to_string()));
        assert_eq!(first_date_candidate("89 07 31"), Some("1989-07-31".to_string()));
        assert_eq!(first_date_candidate("89 07 32"), None);
    }

    #[test]
    fn test_day_31_accepted_in_any_month() {
        // Calendar validity is deliberately not checked beyond the ranges
        assert_eq!(first_date_candidate("89 04 31"), Some("1989-04-31".to_string()));
    }

    #[test]
    fn test_long_digit_run_chunked() {
        // "890715" -> [89, 07, 15]
        assert_eq!(first_date_candidate("890715"), Some("1989-07-15".to_string()));
    }
}
