use crate::config::model::ScrapeContext;
use crate::error::SpiderError;
use crate::meeting::model::{Link, Location, Meeting};
use crate::meeting::normalize::{classify, join_address, parse_datetime, within_lookback};
use crate::page::Page;
use crate::spiders::Spider;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

const NAME: &str = "det_land_bank";
const AGENCY: &str = "Detroit Land Bank Authority";
const START_URL: &str = "https://buildingdetroit.org/events/meetings";

/// The listing page embeds its data as `var meeting = [...];` inside a
/// script tag, one JSON array on a single line.
const SCRIPT_MARKER: &str = "var meeting =";
const BOARD_MARKERS: [&str; 1] = ["board of director"];
const DEFAULT_LINK_TITLE: &str = "Minutes";

pub struct DetLandBankSpider;

impl Spider for DetLandBankSpider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn agency(&self) -> &'static str {
        AGENCY
    }

    fn start_urls(&self) -> Vec<String> {
        vec![START_URL.to_string()]
    }

    fn parse(&self, page: &Page, ctx: &ScrapeContext) -> Result<Vec<Meeting>, SpiderError> {
        let mut meetings = Vec::new();

        for entry in embedded_entries(page)? {
            let start = match parse_datetime(&entry.start) {
                Ok(start) => start,
                Err(err) => {
                    warn!("Skipping entry {:?}: {}", entry.title_tmp, err);
                    continue;
                }
            };

            if !within_lookback(start, ctx) {
                continue;
            }

            meetings.push(entry.to_meeting(start, &page.url, ctx));
        }

        Ok(meetings)
    }
}

fn embedded_entries(page: &Page) -> Result<Vec<RawMeeting>, SpiderError> {
    let script = page.script_containing(SCRIPT_MARKER)?;
    let (_, after_marker) = script
        .split_once(SCRIPT_MARKER)
        .ok_or_else(|| SpiderError::Parse(format!("marker {SCRIPT_MARKER:?} vanished")))?;

    let line = after_marker.lines().next().unwrap_or_default().trim();
    let json = line.strip_suffix(';').unwrap_or(line);

    serde_json::from_str(json)
        .map_err(|e| SpiderError::Parse(format!("embedded meeting JSON malformed: {e}")))
}

// Note: several String fields need the tolerant deserializer because the
// source serves them as null or as bare numbers.
#[derive(Debug, Deserialize)]
struct RawMeeting {
    title_tmp: String,
    #[serde(deserialize_with = "deserialize_str")]
    content: String,
    start: String,
    #[serde(deserialize_with = "deserialize_str")]
    status: String,
    #[serde(deserialize_with = "deserialize_str")]
    category_type: String,
    #[serde(deserialize_with = "deserialize_str")]
    address: String,
    #[serde(deserialize_with = "deserialize_str")]
    city: String,
    #[serde(deserialize_with = "deserialize_str")]
    state: String,
    #[serde(deserialize_with = "deserialize_str")]
    zipcode: String,
    #[serde(deserialize_with = "deserialize_str")]
    file_path: String,
}

impl RawMeeting {
    fn to_meeting(&self, start: chrono::NaiveDateTime, source: &str, ctx: &ScrapeContext) -> Meeting {
        Meeting::new(
            NAME,
            self.title_tmp.clone(),
            self.content.clone(),
            classify(&self.category_type, &BOARD_MARKERS),
            start,
            None,
            Location {
                name: String::new(),
                address: join_address(&[&self.address, &self.city, &self.state, &self.zipcode]),
            },
            self.links(),
            source.to_string(),
            &self.status,
            ctx.now,
        )
    }

    fn links(&self) -> Vec<Link> {
        if self.file_path.is_empty() {
            return Vec::new();
        }

        vec![Link {
            href: self.file_path.clone(),
            title: DEFAULT_LINK_TITLE.to_string(),
        }]
    }
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s.parse().map_err(de::Error::custom)?,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
