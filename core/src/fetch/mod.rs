//! Remote document access.
//!
//! Every network read in the core goes through [`RemoteFetcher`]; the only
//! production implementation lives in `http.rs`.

pub mod http;

use crate::error::CoreResult;

pub use http::HttpFetcher;

pub trait RemoteFetcher: Sync {
    /// GETs `url` and returns the body as text.
    ///
    /// Transport errors, timeouts and non-2xx statuses are all reported as
    /// `CoreError::RemoteFetchFailed`.
    fn fetch_text(&self, url: &str) -> CoreResult<String>;
}

impl<T: RemoteFetcher + ?Sized> RemoteFetcher for &T {
    fn fetch_text(&self, url: &str) -> CoreResult<String> {
        (**self).fetch_text(url)
    }
}

impl<T: RemoteFetcher + Send + ?Sized> RemoteFetcher for std::sync::Arc<T> {
    fn fetch_text(&self, url: &str) -> CoreResult<String> {
        (**self).fetch_text(url)
    }
}

impl<T: RemoteFetcher + ?Sized> RemoteFetcher for Box<T> {
    fn fetch_text(&self, url: &str) -> CoreResult<String> {
        (**self).fetch_text(url)
    }
}
