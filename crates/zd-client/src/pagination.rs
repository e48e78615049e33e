//! Pagination walker: follows next-page cursors until a collection is exhausted.
//!
//! Zendesk endpoints paginate in three ways and the walker handles all of them
//! without the caller knowing which one is in use:
//!
//! | Family      | Continuation                                   |
//! |-------------|------------------------------------------------|
//! | Offset      | `next_page` (full URL or page number), `count` |
//! | Cursor      | `meta.has_more`, `links.next`, `meta.after_cursor` |
//! | Incremental | `next_page` / `after_url` until `end_of_stream` |

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::path::ResolvedPath;
use crate::request::{RequestDescriptor, RequestMethod, RequestOptions};
use crate::response::ResponseEnvelope;
use crate::transport::Transport;

/// Cooperative cancellation signal shared between a caller and a running fetch.
///
/// Checked before each page request and before each retry backoff, never
/// while a request is in flight.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Opaque continuation reference taken from a page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    /// Fully-qualified next page URL.
    Url(String),
    /// Page number for offset pagination.
    Offset(u64),
    /// `after_cursor` token for cursor pagination.
    Token(String),
}

impl Cursor {
    /// Read the continuation of a page. `None` means the collection is exhausted.
    pub fn from_page(body: &Value) -> Option<Cursor> {
        if body.pointer("/meta/has_more").and_then(Value::as_bool) == Some(false) {
            return None;
        }
        if body.get("end_of_stream").and_then(Value::as_bool) == Some(true) {
            return None;
        }

        if let Some(url) = body.pointer("/links/next").and_then(Value::as_str) {
            if !url.is_empty() {
                return Some(Cursor::Url(url.to_string()));
            }
        }
        match body.get("next_page") {
            Some(Value::String(url)) if !url.is_empty() => return Some(Cursor::Url(url.clone())),
            Some(Value::Number(n)) => {
                if let Some(page) = n.as_u64() {
                    return Some(Cursor::Offset(page));
                }
            }
            _ => {}
        }
        if let Some(url) = body.get("after_url").and_then(Value::as_str) {
            if !url.is_empty() {
                return Some(Cursor::Url(url.to_string()));
            }
        }
        if body.pointer("/meta/has_more").and_then(Value::as_bool) == Some(true) {
            if let Some(token) = body.pointer("/meta/after_cursor").and_then(Value::as_str) {
                return Some(Cursor::Token(token.to_string()));
            }
        }

        None
    }

    /// The request target for this cursor.
    ///
    /// Offsets and tokens are applied to the first page's path. URLs are
    /// resolved against `base` and must share its origin, since the request
    /// carries the account credentials.
    fn next_path(&self, first: &ResolvedPath, base: &Url) -> Result<ResolvedPath> {
        let url = match self {
            Cursor::Offset(page) => return Ok(first.clone().with_param("page", &page.to_string())),
            Cursor::Token(token) => return Ok(first.clone().with_param("page[after]", token)),
            Cursor::Url(url) => url,
        };

        let next = match Url::parse(url) {
            Ok(next) => next,
            Err(url::ParseError::RelativeUrlWithoutBase) => base.join(url).map_err(|e| {
                Error::pagination(format!("next-page cursor `{}` is not a valid URL: {}", url, e))
            })?,
            Err(e) => {
                return Err(Error::pagination(format!(
                    "next-page cursor `{}` is not a valid URL: {}",
                    url, e
                )))
            }
        };

        if next.origin() != base.origin() {
            return Err(Error::pagination(format!(
                "next-page cursor points to {}, outside {}",
                next.origin().ascii_serialization(),
                base.origin().ascii_serialization()
            )));
        }
        Ok(ResolvedPath::absolute(next.to_string()))
    }
}

/// Returns true if the page declares any continuation field, even a null one.
fn has_cursor_field(body: &Value) -> bool {
    ["next_page", "links", "meta", "after_url", "end_of_stream"]
        .iter()
        .any(|field| body.get(field).is_some())
}

/// Every page's primary array, concatenated in arrival order.
#[derive(Debug, Clone)]
pub struct AggregatedResult {
    /// Elements of every page, in page order. No de-duplication.
    pub items: Vec<Value>,
    /// Envelope of the last page fetched; `None` if cancelled before the first page.
    pub response: Option<ResponseEnvelope>,
    /// Total-count hint from the last page that carried one.
    pub count: Option<u64>,
    /// Pages fetched.
    pub pages: usize,
    /// True if the walk stopped on a cancellation signal.
    pub cancelled: bool,
}

impl AggregatedResult {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            response: None,
            count: None,
            pages: 0,
            cancelled: false,
        }
    }

    fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Drives a paginated GET through the transport.
pub(crate) struct PageWalker<'a> {
    pub(crate) transport: &'a Transport,
    pub(crate) config: &'a PaginationConfig,
    /// Name of the page's primary array field (e.g. `organizations`).
    pub(crate) key: &'a str,
}

impl PageWalker<'_> {
    pub(crate) async fn walk(
        &self,
        first: ResolvedPath,
        options: RequestOptions,
        cancel: Option<&CancelToken>,
    ) -> Result<AggregatedResult> {
        let first = self.with_page_size(first);
        let base = Url::parse(&format!("{}/", self.transport.base_url()))?;
        let is_cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

        let mut result = AggregatedResult::empty();
        let mut request =
            RequestDescriptor::new(RequestMethod::Get, first.clone()).with_options(options.clone());

        loop {
            if is_cancelled() {
                debug!(pages = result.pages, items = result.items.len(), "Pagination cancelled");
                return Ok(result.cancelled());
            }
            if result.pages >= self.config.max_pages {
                return Err(Error::pagination(format!(
                    "page ceiling of {} reached while fetching `{}`",
                    self.config.max_pages, self.key
                )));
            }

            let envelope = self.transport.execute(&request, cancel).await?;
            if !envelope.is_success() && is_cancelled() {
                return Ok(result.cancelled());
            }
            let envelope = envelope.classify()?;
            result.pages += 1;

            let items = envelope.body.get(self.key).and_then(Value::as_array);
            if items.is_none() && !has_cursor_field(&envelope.body) {
                return Err(Error::pagination(format!(
                    "page {} has neither a `{}` array nor a next-page cursor",
                    result.pages, self.key
                )));
            }
            if let Some(items) = items {
                result.items.extend(items.iter().cloned());
            }
            result.count = envelope.count().or(result.count);

            let next = Cursor::from_page(&envelope.body)
                .map(|cursor| cursor.next_path(&first, &base))
                .transpose()?
                .map(|path| -> Result<_> {
                    let same = self.transport.url_for(&path)? == self.transport.url_for(request.path())?;
                    Ok((path, same))
                })
                .transpose()?;
            result.response = Some(envelope);

            match next {
                None => break,
                Some((_, true)) => {
                    warn!(
                        page = result.pages,
                        "Next-page cursor repeats the current page, stopping"
                    );
                    break;
                }
                Some((path, false)) => {
                    request =
                        RequestDescriptor::new(RequestMethod::Get, path).with_options(options.clone());
                }
            }
        }

        debug!(pages = result.pages, items = result.items.len(), "Pagination complete");
        Ok(result)
    }

    fn with_page_size(&self, first: ResolvedPath) -> ResolvedPath {
        match self.config.page_size {
            Some(size)
                if !first.is_absolute()
                    && !first.has_param("per_page")
                    && !first.has_param("page[size]") =>
            {
                first.with_param("per_page", &size.to_string())
            }
            _ => first,
        }
    }
}
