use std::fmt;

use url::Url;

use super::{Action, Attempt};

/// A redirect was refused because redirect-follow is disabled.
#[derive(Debug, thiserror::Error)]
#[error("redirect to {location}")]
pub struct RedirectAvoided {
    location: Url,
}

/// The redirect chain exceeded the hop limit.
#[derive(Debug, thiserror::Error)]
#[error("too many redirects")]
pub struct TooManyRedirects;

/// Redirect policy of a builder.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    inner: PolicyKind,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PolicyKind {
    Limit(usize),
    None,
}

impl Policy {
    /// Follow up to `max` hops.
    #[must_use]
    pub fn limited(max: usize) -> Self {
        Self {
            inner: PolicyKind::Limit(max),
        }
    }

    /// Refuse every redirect.
    #[must_use]
    pub fn none() -> Self {
        Self {
            inner: PolicyKind::None,
        }
    }

    pub(crate) fn check(&self, attempt: Attempt<'_>) -> Action {
        tracing::trace!(
            target: "restful::transport",
            status = %attempt.status,
            next = %attempt.next,
            hops = attempt.previous.len(),
            "redirect"
        );
        match self.inner {
            PolicyKind::None => {
                let location = attempt.next.clone();
                attempt.error(RedirectAvoided { location })
            }
            PolicyKind::Limit(max) if attempt.previous.len() > max => {
                attempt.error(TooManyRedirects)
            }
            PolicyKind::Limit(_) => attempt.follow(),
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::limited(crate::config::DEFAULT_MAX_REDIRECTS)
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            PolicyKind::Limit(max) => f.debug_tuple("Limit").field(&max).finish(),
            PolicyKind::None => f.write_str("None"),
        }
    }
}
