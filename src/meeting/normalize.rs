use crate::config::model::ScrapeContext;
use crate::error::DateParseError;
use crate::meeting::model::{Classification, Status};
use chrono::{Datelike, Duration, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

const CANCELLED_MARKERS: [&str; 3] = ["cancel", "postpon", "reschedul"];

/// Timestamp formats seen across the agency sites, tried in order.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%B %d, %Y %I:%M %p",
];

/// Lowercase, non-alphanumeric runs collapsed to a single underscore.
pub fn slugify(text: &str) -> String {
    NON_ALNUM
        .replace_all(&text.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}

/// Stable dedup key: `{spider}/{start:%Y%m%d%H%M}/x/{slug(title)}`.
pub fn build_id(spider_name: &str, start: NaiveDateTime, title: &str) -> String {
    format!(
        "{}/{}/x/{}",
        spider_name,
        start.format("%Y%m%d%H%M"),
        slugify(title)
    )
}

/// Case-insensitive keyword match on the source's category/title field.
/// Each spider brings its own marker set; anything unmatched is a committee.
pub fn classify(category: &str, board_markers: &[&str]) -> Classification {
    let category = category.to_lowercase();

    if board_markers.iter().any(|marker| category.contains(marker)) {
        Classification::Board
    } else {
        Classification::Committee
    }
}

/// Explicit status text wins; without it only TENTATIVE/PASSED can be
/// inferred from the clock.
pub fn derive_status(status_text: &str, start: NaiveDateTime, now: NaiveDateTime) -> Status {
    let text = status_text.to_lowercase();

    if CANCELLED_MARKERS.iter().any(|marker| text.contains(marker)) {
        Status::Cancelled
    } else if text.contains("confirm") {
        Status::Confirmed
    } else if start > now {
        Status::Tentative
    } else {
        Status::Passed
    }
}

/// Collapse any whitespace run to a single space and trim the ends.
pub fn squeeze(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Join address fragments with single spaces, collapsing any whitespace run.
/// Empty fragments drop out with the collapse.
pub fn join_address(fragments: &[&str]) -> String {
    squeeze(&fragments.join(" "))
}

pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, DateParseError> {
    let cleaned = WHITESPACE.replace_all(text.trim(), " ");

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&cleaned, format).ok())
        .ok_or_else(|| DateParseError {
            text: text.to_string(),
        })
}

/// Entries older than this are skipped in default runs. Calendar year
/// decrement, matching "this day last year" rather than a 365-day offset.
pub fn archive_cutoff(now: NaiveDateTime) -> NaiveDateTime {
    now.with_year(now.year() - 1)
        .unwrap_or_else(|| now - Duration::days(365))
}

/// Whether an entry starting at `start` should be emitted under `ctx`.
pub fn within_lookback(start: NaiveDateTime, ctx: &ScrapeContext) -> bool {
    ctx.archive_mode || start >= archive_cutoff(ctx.now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test_log::test]
    fn should_build_the_same_id_for_the_same_inputs() {
        let start = at(2018, 8, 14, 14, 0);

        let first = build_id("det_land_bank", start, "Board of Directors");
        let second = build_id("det_land_bank", start, "Board of Directors");

        assert_eq!(first, "det_land_bank/201808141400/x/board_of_directors");
        assert_eq!(first, second);
    }

    #[test_log::test]
    fn should_slugify_punctuation_runs_to_single_underscores() {
        assert_eq!(slugify("Finance & Audit -- Committee"), "finance_audit_committee");
        assert_eq!(slugify("  Board of Directors  "), "board_of_directors");
    }

    #[test_log::test]
    fn should_classify_board_keyword_case_insensitively() {
        let markers = ["board of director"];

        assert_eq!(classify("BOARD OF DIRECTORS", &markers), Classification::Board);
        assert_eq!(classify("Citizens Advisory Committee", &markers), Classification::Committee);
        assert_eq!(classify("", &markers), Classification::Committee);
    }

    #[test_log::test]
    fn should_infer_tentative_for_future_and_passed_for_past() {
        let now = at(2018, 1, 21, 0, 0);

        assert_eq!(derive_status("", at(2018, 8, 14, 14, 0), now), Status::Tentative);
        assert_eq!(derive_status("", at(2017, 6, 13, 14, 0), now), Status::Passed);
    }

    #[test_log::test]
    fn should_only_take_confirmed_and_cancelled_from_explicit_text() {
        let now = at(2018, 1, 21, 0, 0);
        let future = at(2018, 8, 14, 14, 0);

        assert_eq!(derive_status("Cancelled due to weather", future, now), Status::Cancelled);
        assert_eq!(derive_status("Postponed", future, now), Status::Cancelled);
        assert_eq!(derive_status("Confirmed", future, now), Status::Confirmed);
    }

    #[test_log::test]
    fn should_collapse_whitespace_when_joining_address_fragments() {
        let address = join_address(&["500  Griswold St", "Detroit", "MI", "48226"]);

        assert_eq!(address, "500 Griswold St Detroit MI 48226");
    }

    #[test_log::test]
    fn should_drop_empty_address_fragments() {
        assert_eq!(join_address(&["", "Detroit", "", "MI"]), "Detroit MI");
    }

    #[test_log::test]
    fn should_keep_entries_up_to_one_year_back_without_archive_mode() {
        let ctx = ScrapeContext::frozen(false, at(2018, 1, 21, 0, 0));

        assert!(within_lookback(at(2017, 1, 22, 0, 0), &ctx));
        assert!(within_lookback(at(2017, 1, 21, 0, 0), &ctx));
        assert!(!within_lookback(at(2017, 1, 20, 0, 0), &ctx));
    }

    #[test_log::test]
    fn should_keep_everything_in_archive_mode() {
        let ctx = ScrapeContext::frozen(true, at(2018, 1, 21, 0, 0));

        assert!(within_lookback(at(2017, 1, 20, 0, 0), &ctx));
        assert!(within_lookback(at(2010, 6, 1, 0, 0), &ctx));
    }

    #[test_log::test]
    fn should_parse_iso_and_human_datetime_formats() {
        assert_eq!(parse_datetime("2018-08-14T14:00:00").unwrap(), at(2018, 8, 14, 14, 0));
        assert_eq!(parse_datetime("June 13, 2017 2:00 PM").unwrap(), at(2017, 6, 13, 14, 0));
    }

    #[test_log::test]
    fn should_fail_on_unrecognized_date_text() {
        let result = parse_datetime("TBD");

        assert!(result.is_err(), "{:?}", result);
    }
}
