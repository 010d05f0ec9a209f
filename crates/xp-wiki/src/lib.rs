//! Training-accounts wiki integration for the experience planner.
//!
//! Fetches the public training-accounts page, scrapes its trainer table,
//! and appends the hand-maintained special setups the page does not list.

mod parse;

use std::time::Duration;

use thiserror::Error;
use xp_core::{ExperienceSource, SourceTable};

pub use parse::parse_table;

/// Page listing the training accounts.
pub const DEFAULT_WIKI_URL: &str = "https://wiki.tppc.info/Training_Accounts";

/// Default request timeout for page fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("xp/", env!("CARGO_PKG_VERSION"));

/// Wiki client errors.
#[derive(Debug, Error)]
pub enum WikiError {
    /// The configured page URL was unusable.
    #[error("invalid wiki URL: {reason}")]
    InvalidUrl { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The page answered with a non-success status.
    #[error("wiki returned status {status} for {url}")]
    Status { status: u16, url: String },
    /// The page has no `wikitable`.
    #[error("no trainer table found on page")]
    TableNotFound,
}

/// Client for the training-accounts page.
///
/// Safe to clone and share across threads; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    url: String,
}

impl WikiClient {
    /// Creates a client for the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank or not HTTP(S), or if the HTTP
    /// client fails to build.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WikiError> {
        let url = url.into();
        let url = url.trim();
        if url.is_empty() {
            return Err(WikiError::InvalidUrl {
                reason: "URL cannot be empty",
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(WikiError::InvalidUrl {
                reason: "URL must start with http:// or https://",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(WikiError::ClientBuild)?;

        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the raw page HTML.
    pub async fn fetch_html(&self) -> Result<String, WikiError> {
        tracing::info!(url = %self.url, "fetching training accounts page");
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        Ok(response.text().await?)
    }

    /// Fetches the page and builds the full source table, extras included.
    pub async fn fetch_table(&self) -> Result<SourceTable, WikiError> {
        let html = self.fetch_html().await?;
        let mut table = parse_table(&html)?;
        table.data.extend(extra_sources());
        tracing::debug!(rows = table.len(), "loaded source table");
        Ok(table)
    }
}

/// Special battle setups that are not on the wiki page.
pub fn extra_sources() -> Vec<ExperienceSource> {
    vec![
        ExperienceSource::new("illuzion lv5 MILOTIC ONLY", 24659, 300, 300),
        ExperienceSource::new("shedinja SINGLE", 2_380_615, 3, 3),
        ExperienceSource::new("shedinja w/ EXP SHARE", 2_380_615, 1, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PAGE: &str = r#"<table class="wikitable">
<tr><th>Trainer</th><th>ID</th><th>a</th><th>b</th><th>c</th><th>Level</th><th>Day</th><th>Night</th></tr>
<tr><td>Gym Leader*</td><td>1234</td><td></td><td></td><td></td><td>2,500</td><td>1,250,000</td><td>2,500,000</td></tr>
</table>"#;

    /// Serves one canned HTTP response on a local port and returns its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/Training_Accounts")
    }

    #[tokio::test]
    async fn fetch_table_reports_error_status() {
        let url = serve_once("503 Service Unavailable", "down").await;
        let client = WikiClient::new(url.clone(), DEFAULT_TIMEOUT).unwrap();

        let err = client.fetch_table().await.unwrap_err();
        match err {
            WikiError::Status { status, url: failed } => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_table_appends_extras_after_scraped_rows() {
        let url = serve_once("200 OK", PAGE).await;
        let client = WikiClient::new(url, DEFAULT_TIMEOUT).unwrap();

        let table = client.fetch_table().await.unwrap();
        assert_eq!(table.len(), 1 + extra_sources().len());
        assert_eq!(table.data[0].name, "Gym Leader");
        assert_eq!(table.data[0].exp_night, 2_500_000);
        assert_eq!(&table.data[1..], extra_sources().as_slice());
    }

    #[tokio::test]
    async fn fetch_table_without_wikitable_fails() {
        let url = serve_once("200 OK", "<html><body>moved</body></html>").await;
        let client = WikiClient::new(url, DEFAULT_TIMEOUT).unwrap();

        let err = client.fetch_table().await.unwrap_err();
        assert!(matches!(err, WikiError::TableNotFound));
    }

    #[test]
    fn client_rejects_empty_url() {
        assert!(matches!(
            WikiClient::new("  ", DEFAULT_TIMEOUT),
            Err(WikiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn client_rejects_non_http_url() {
        assert!(matches!(
            WikiClient::new("ftp://wiki.example/page", DEFAULT_TIMEOUT),
            Err(WikiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn client_accepts_default_url() {
        let client = WikiClient::new(DEFAULT_WIKI_URL, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.url(), DEFAULT_WIKI_URL);
    }

    #[test]
    fn extras_share_an_id_but_not_a_name() {
        let extras = extra_sources();
        assert_eq!(extras.len(), 3);
        assert_eq!(extras[1].number, extras[2].number);
        assert_ne!(extras[1].name, extras[2].name);
    }

    #[test]
    fn status_error_message() {
        let err = WikiError::Status {
            status: 503,
            url: DEFAULT_WIKI_URL.to_string(),
        };
        assert_eq!(
            err.to_string(),
            "wiki returned status 503 for https://wiki.tppc.info/Training_Accounts"
        );
    }
}
