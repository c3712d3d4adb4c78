use crate::meeting::normalize::{build_id, derive_status};
use chrono::NaiveDateTime;
use serde::Serialize;

/// BOARD is a full governing body, COMMITTEE any subunit. Derived from
/// keyword matching, never taken verbatim from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::IntoStaticStr)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Classification {
    Board,
    Committee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::IntoStaticStr)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    Tentative,
    Confirmed,
    Passed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub title: String,
}

/// One normalized public meeting, constructed fresh on every scrape run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub classification: Classification,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub time_notes: String,
    pub all_day: bool,
    pub location: Location,
    pub links: Vec<Link>,
    pub source: String,
    pub status: Status,
}

impl Meeting {
    /// Status and id are derived here so they can never drift from the
    /// fields they are computed from. Same (spider, start, title) always
    /// yields the same id.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spider_name: &str,
        title: String,
        description: String,
        classification: Classification,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        location: Location,
        links: Vec<Link>,
        source: String,
        status_text: &str,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: build_id(spider_name, start, &title),
            status: derive_status(status_text, start, now),
            title,
            description,
            classification,
            start,
            end,
            time_notes: String::new(),
            all_day: false,
            location,
            links,
            source,
        }
    }
}
