use std::env;

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::header;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::groups::Group;

pub const DEFAULT_BASE_URL: &str = "https://eecsoh.eecs.umich.edu/api/queues";

/// Client for the Queue REST API. Every request is authenticated by the
/// browser session cookie; any non-2xx response is surfaced as
/// [`Error::Upstream`] without retrying.
pub struct QueueClient {
    client: Client,
    base_url: String,
    session: String,
}

impl QueueClient {
    /// Client for the production API, honoring an `OH_BASE_URL` override.
    pub fn new(session: String) -> Result<Self> {
        let base_url = env::var("OH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(session, base_url)
    }

    pub fn with_base_url(session: String, base_url: String) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn get_groups(&self, queue_id: &str) -> Result<Value> {
        self.get(&format!("{queue_id}/groups"))
    }

    pub fn put_groups(&self, queue_id: &str, groups: &[Group]) -> Result<()> {
        self.put(&format!("{queue_id}/groups"), groups)
    }

    pub fn get_schedule(&self, queue_id: &str) -> Result<Value> {
        self.get(&format!("{queue_id}/schedule"))
    }

    pub fn put_schedule(&self, queue_id: &str, schedule: &[String]) -> Result<()> {
        self.put(&format!("{queue_id}/schedule"), schedule)
    }

    fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, self.cookie())
            .send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }

    fn put<T>(&self, path: &str, body: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .header(header::COOKIE, self.cookie())
            .json(body)
            .send()?;
        check_status(response)?;
        Ok(())
    }

    fn cookie(&self) -> String {
        format!("session={}", self.session)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(Error::Upstream { status, body })
}
