//! Remote page retrieval for version checks

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Download failed: {0}")]
    Failed(String),

    #[error("Invalid version pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("No version matching '{pattern}' found at {url}")]
    NoMatch { url: String, pattern: String },
}

/// Anything able to return the content of a version-check page
pub trait VersionSource {
    fn fetch(&self, url: &str, api_key: Option<&str>) -> Result<String, DownloadError>;
}

/// Plain HTTP(S) retrieval
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSource;

impl VersionSource for HttpSource {
    fn fetch(&self, url: &str, api_key: Option<&str>) -> Result<String, DownloadError> {
        download_string(url, api_key)
    }
}

/// Download content to string. The API key is only sent to GitHub, where it
/// lifts the anonymous rate limit.
pub fn download_string(url: &str, api_key: Option<&str>) -> Result<String, DownloadError> {
    let mut request = ureq::get(url)
        .header("User-Agent", crate::USER_AGENT)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        );

    if let Some(key) = api_key.filter(|key| !key.is_empty() && url.contains("github")) {
        request = request.header("Authorization", format!("Bearer {}", key));
    }

    let mut resp = request
        .call()
        .map_err(|e| DownloadError::HttpError(e.to_string()))?;

    let content = resp
        .body_mut()
        .read_to_string()
        .map_err(|e| DownloadError::Failed(e.to_string()))?;

    Ok(content)
}

/// First capture group of `pattern` in `content`
pub fn extract_first_match(content: &str, pattern: &str) -> Result<Option<String>, DownloadError> {
    let regex = Regex::new(pattern)?;
    Ok(regex
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string()))
}

/// Fetch a version-check page and pull the version string out of it
pub fn fetch_latest_version(
    source: &dyn VersionSource,
    url: &str,
    pattern: &str,
    api_key: Option<&str>,
) -> Result<String, DownloadError> {
    let content = source.fetch(url, api_key)?;
    extract_first_match(&content, pattern)?.ok_or_else(|| DownloadError::NoMatch {
        url: url.to_string(),
        pattern: pattern.to_string(),
    })
}
