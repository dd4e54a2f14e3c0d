use std::env;

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, Utc};
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3/calendars";

/// Marker the calendar search matches against event summaries.
pub const OFFICE_HOURS_QUERY: &str = "Office Hours";

/// The queue schedule covers one week, so that is how far ahead we search.
const SEARCH_WINDOW_DAYS: i64 = 6;

#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub items: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}

/// Start or end of an event. All-day events carry a plain date instead of
/// `dateTime`, which the schedule cannot place, so the field stays optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: Option<DateTime<FixedOffset>>,
}

/// Client for the Google Calendar REST API, authenticated by an API key
/// passed as a query parameter.
pub struct CalendarClient {
    client: Client,
    base_url: String,
    key: String,
}

impl CalendarClient {
    /// Client for the production API, honoring a `GCAL_BASE_URL` override.
    pub fn new(key: String) -> Result<Self> {
        let base_url = env::var("GCAL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(key, base_url)
    }

    pub fn with_base_url(key: String, base_url: String) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
        })
    }

    /// Fetch the office hours events of `calendar_id` for the coming week,
    /// expanded to single events and ordered by start time.
    pub fn events(&self, calendar_id: &str) -> Result<EventsResponse> {
        let url = format!("{}/{}/events", self.base_url, calendar_id);
        let now = Utc::now();
        let time_min = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let time_max =
            (now + Duration::days(SEARCH_WINDOW_DAYS)).to_rfc3339_opts(SecondsFormat::Secs, true);

        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.key.as_str()),
                ("singleEvents", "true"),
                ("q", OFFICE_HOURS_QUERY),
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("orderBy", "startTime"),
            ])
            .send()
            .map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::CalendarFetch {
                reason: format!("calendar API returned {status}: {body}"),
            });
        }
        response.json().map_err(fetch_error)
    }
}

fn fetch_error(err: reqwest::Error) -> Error {
    Error::CalendarFetch {
        reason: err.to_string(),
    }
}
