use tracker_core::RemoteReconciliation;
use tracker_logging::{tracker_debug, tracker_warn};
use url::Url;

use crate::decode::decode_html;
use crate::fetch::{Fetcher, ProgressSink};
use crate::listing::parse_listing_page;
use crate::{FailureKind, FetchError, FetchEvent, Side};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_WEB_BASE: &str = "https://github.com";
/// Upper bound on listing pages per side.
pub const DEFAULT_MAX_PAGES: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    /// Serves `/users/{handle}` for the existence check.
    pub api_base: String,
    /// Serves `/{handle}?tab=followers` style listing pages.
    pub web_base: String,
    pub max_pages: u32,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            web_base: DEFAULT_WEB_BASE.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The existence check answered 404; no listing was requested.
    HandleNotFound { handle: String },
    Found(RemoteReconciliation),
}

/// Fetches both listings of a handle page by page and reconciles them.
pub struct RemoteReconciler<F> {
    fetcher: F,
    settings: RemoteSettings,
}

impl<F: Fetcher> RemoteReconciler<F> {
    pub fn new(fetcher: F, settings: RemoteSettings) -> Self {
        Self { fetcher, settings }
    }

    pub async fn reconcile(
        &self,
        handle: &str,
        sink: &dyn ProgressSink,
    ) -> Result<RemoteOutcome, FetchError> {
        let handle = handle.trim();
        if handle.is_empty() {
            return Err(FetchError::new(FailureKind::InvalidUrl, "empty handle"));
        }

        let exists = self.handle_exists(handle).await?;
        sink.emit(FetchEvent::HandleChecked {
            handle: handle.to_string(),
            exists,
        });
        if !exists {
            return Ok(RemoteOutcome::HandleNotFound {
                handle: handle.to_string(),
            });
        }

        let followers = self.fetch_all(handle, Side::Followers, sink).await?;
        let following = self.fetch_all(handle, Side::Following, sink).await?;
        Ok(RemoteOutcome::Found(RemoteReconciliation::new(
            handle, followers, following,
        )))
    }

    /// Only a 404 counts as "does not exist". Other error statuses are
    /// tolerated and the listing is attempted anyway.
    async fn handle_exists(&self, handle: &str) -> Result<bool, FetchError> {
        let url = join_segments(&self.settings.api_base, &["users", handle])?;
        match self.fetcher.get(url.as_str()).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind == FailureKind::HttpStatus(404) => Ok(false),
            Err(FetchError {
                kind: FailureKind::HttpStatus(code),
                ..
            }) => {
                tracker_warn!("Existence check for {} answered {}; continuing", handle, code);
                Ok(true)
            }
            Err(err) => Err(err),
        }
    }

    async fn fetch_all(
        &self,
        handle: &str,
        side: Side,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<String>, FetchError> {
        let max_pages = self.settings.max_pages.max(1);
        let mut names = Vec::new();

        for page in 1..=max_pages {
            let url = self.listing_url(handle, side, page)?;
            let output = self.fetcher.get(url.as_str()).await?;
            let meta = &output.metadata;
            tracker_debug!(
                "{} answered {} with {} bytes (final url {})",
                meta.url,
                meta.status,
                meta.byte_len,
                meta.final_url
            );
            let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())
                .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

            let listing = parse_listing_page(&decoded.html);
            sink.emit(FetchEvent::PageFetched {
                side,
                page,
                names: listing.names.len(),
            });
            names.extend(listing.names);
            if !listing.has_next {
                return Ok(names);
            }
        }

        tracker_warn!(
            "{} listing for {} still had a next page after {} pages; stopping",
            side,
            handle,
            max_pages
        );
        sink.emit(FetchEvent::PageLimitReached { side, max_pages });
        Ok(names)
    }

    /// Page 1 has no explicit page parameter.
    fn listing_url(&self, handle: &str, side: Side, page: u32) -> Result<Url, FetchError> {
        let mut url = join_segments(&self.settings.web_base, &[handle])?;
        {
            let mut query = url.query_pairs_mut();
            if page > 1 {
                query.append_pair("page", &page.to_string());
            }
            query.append_pair("tab", side.as_str());
        }
        Ok(url)
    }
}

fn join_segments(base: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url =
        Url::parse(base).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::new(FailureKind::InvalidUrl, format!("{base} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
