use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::FetchError;

pub const DASH_MIME_TYPE: &str = "application/dash+xml";
pub const APPLICATION_XML_MIME_TYPE: &str = "application/xml";
pub const TEXT_XML_MIME_TYPE: &str = "text/xml";
pub const ACCEPTED_CONTENT_TYPES: [&str; 3] =
    [DASH_MIME_TYPE, APPLICATION_XML_MIME_TYPE, TEXT_XML_MIME_TYPE];

pub const MAX_MANIFEST_SIZE_BYTES: u64 = 10 * 1024 * 1024; // 10 MiB
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = "ManifestAnalyzer/1.0 (Rust reqwest)";

/// Where a manifest is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An `http` or `https` URL.
    Remote(Url),
    /// A local file, given either as a `file://` URL or as a plain path.
    File(PathBuf),
}

impl Source {
    /// Validates user input. Only `http`, `https` and `file` URLs are accepted;
    /// input that is not a URL at all is accepted if it names an existing path.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let invalid = |reason: String| FetchError::InvalidUrl {
            input: input.to_string(),
            reason,
        };

        match Url::parse(input) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Source::Remote(url)),
                // `file://relative/path` parses with "relative" as the host.
                "file" => match url.to_file_path() {
                    Ok(path) => Ok(Source::File(path)),
                    Err(()) => match input.strip_prefix("file://") {
                        Some(rest) if !rest.is_empty() => Ok(Source::File(PathBuf::from(rest))),
                        _ => Err(invalid("not a local file path".to_string())),
                    },
                },
                other => Err(FetchError::InvalidScheme(other.to_string())),
            },
            Err(url::ParseError::RelativeUrlWithoutBase)
                if !input.is_empty() && Path::new(input).exists() =>
            {
                Ok(Source::File(PathBuf::from(input)))
            }
            Err(e) => Err(invalid(e.to_string())),
        }
    }
}

impl FromStr for Source {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::parse(s)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Applies to the whole request, body included.
    pub timeout: Duration,
    pub max_body_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: MAX_MANIFEST_SIZE_BYTES,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Retrieves the raw manifest text. No retries are attempted.
pub async fn fetch(source: &Source, options: &FetchOptions) -> Result<String, FetchError> {
    let bytes = match source {
        Source::Remote(url) => fetch_remote(url, options).await?,
        Source::File(path) => read_file(path, options).await?,
    };

    String::from_utf8(bytes).map_err(|_| FetchError::InvalidEncoding)
}

async fn fetch_remote(url: &Url, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(&options.user_agent)
        .build()?;

    debug!("Fetching manifest from {}", url);
    let mut response = client
        .get(url.clone())
        .header(ACCEPT, ACCEPTED_CONTENT_TYPES.join(", "))
        .send()
        .await?;

    if response.status() != StatusCode::OK {
        return Err(FetchError::NonSuccessStatus(response.status().as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !is_accepted_content_type(&content_type) {
        return Err(FetchError::UnacceptableContentType(content_type));
    }

    let limit = options.max_body_bytes;
    match response.content_length() {
        Some(0) => return Err(FetchError::EmptyBody),
        Some(size) if size > limit => return Err(FetchError::TooLarge { size, limit }),
        _ => {}
    }

    // The declared length may be missing or wrong, so the cap is enforced while reading too.
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let size = (body.len() + chunk.len()) as u64;
        if size > limit {
            return Err(FetchError::TooLarge { size, limit });
        }
        body.extend_from_slice(&chunk);
    }

    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    debug!("Fetched {} bytes ({})", body.len(), content_type);
    Ok(body)
}

async fn read_file(path: &Path, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    debug!("Reading manifest from {}", path.display());

    let size = tokio::fs::metadata(path).await?.len();
    if size == 0 {
        return Err(FetchError::EmptyBody);
    }
    if size > options.max_body_bytes {
        return Err(FetchError::TooLarge {
            size,
            limit: options.max_body_bytes,
        });
    }

    Ok(tokio::fs::read(path).await?)
}

/// Compares the media type only, so `application/xml; charset=utf-8` is accepted.
fn is_accepted_content_type(header: &str) -> bool {
    let media_type = header.split(';').next().unwrap_or_default().trim();
    ACCEPTED_CONTENT_TYPES
        .iter()
        .any(|accepted| media_type.eq_ignore_ascii_case(accepted))
}
