//! YouTube Data API v3 integration: keyword search and per-video statistics.

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::MAX_BATCH;
use crate::error::AppError;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The two read-only queries the pipeline needs from the platform.
///
/// Both return the raw `items` array of the response; shaping them into
/// records is the normalizer's job.
pub trait VideoSource {
    /// Videos matching `keyword`, ranked by view count.
    fn search(&self, keyword: &str, max_results: u32) -> Result<Vec<Value>, AppError>;

    /// Statistics for the given video ids. Unknown/private ids are simply absent.
    fn statistics(&self, ids: &[String], max_results: u32) -> Result<Vec<Value>, AppError>;
}

pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a client from an arbitrary variable lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::config(format!("Missing {API_KEY_VAR} in environment (.env).")))?;

        let base_url = lookup(BASE_URL_VAR)
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_items(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<Value>, AppError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!("GET {url} {params:?}");

        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .map_err(|e| AppError::remote(format!("YouTube {endpoint} request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(AppError::remote(match api_error_message(&body) {
                Some(msg) => format!("YouTube {endpoint} request failed with status {status}: {msg}"),
                None => format!("YouTube {endpoint} request failed with status {status}."),
            }));
        }

        let body: Value = resp
            .json()
            .map_err(|e| AppError::remote(format!("Failed to parse YouTube {endpoint} response: {e}")))?;

        extract_items(body, endpoint)
    }
}

impl VideoSource for YoutubeClient {
    fn search(&self, keyword: &str, max_results: u32) -> Result<Vec<Value>, AppError> {
        check_batch(max_results as usize, "maxResults")?;
        let max = max_results.to_string();
        self.get_items(
            "search",
            &[
                ("q", keyword),
                ("part", "snippet"),
                ("order", "viewCount"),
                ("type", "video"),
                ("maxResults", max.as_str()),
            ],
        )
    }

    fn statistics(&self, ids: &[String], max_results: u32) -> Result<Vec<Value>, AppError> {
        check_batch(max_results as usize, "maxResults")?;
        check_batch(ids.len(), "video id list length")?;
        let max = max_results.to_string();
        let joined = ids.join(",");
        self.get_items(
            "videos",
            &[("part", "id,statistics"), ("id", joined.as_str()), ("maxResults", max.as_str())],
        )
    }
}

/// Reject batch sizes the platform would refuse or silently clip.
pub fn check_batch(n: usize, what: &str) -> Result<(), AppError> {
    if n == 0 || n > MAX_BATCH as usize {
        return Err(AppError::config(format!(
            "{what} must be between 1 and {MAX_BATCH} (got {n})."
        )));
    }
    Ok(())
}

fn extract_items(body: Value, endpoint: &str) -> Result<Vec<Value>, AppError> {
    match body {
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(AppError::missing_field(format!(
                "YouTube {endpoint} response has no `items` array."
            ))),
        },
        _ => Err(AppError::missing_field(format!(
            "YouTube {endpoint} response is not a JSON object."
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|env| env.error.message)
        .filter(|m| !m.trim().is_empty())
}
