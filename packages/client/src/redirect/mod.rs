//! Redirect handling
//!
//! Redirect-follow disabled means any redirect surfaces as a
//! `Kind::RedirectBlocked` error. Enabled follows at most
//! [`DEFAULT_MAX_REDIRECTS`](crate::config::DEFAULT_MAX_REDIRECTS) hops.

mod attempt;
mod headers;
mod policy;

pub(crate) use attempt::{Action, Attempt};
pub(crate) use headers::{redirect_method, remove_sensitive_headers};
pub use policy::{Policy, RedirectAvoided, TooManyRedirects};

use http::StatusCode;

/// Statuses that carry a `Location` to follow.
pub(crate) fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}
