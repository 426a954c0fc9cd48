//! Attempt and Action types for redirect handling

use http::StatusCode;
use url::Url;

use crate::error::BoxError;

/// Information on the next hop and the hops already taken.
#[derive(Debug)]
pub(crate) struct Attempt<'a> {
    pub(crate) status: StatusCode,
    pub(crate) next: &'a Url,
    pub(crate) previous: &'a [Url],
}

/// What to do with a redirect response.
#[derive(Debug)]
pub(crate) enum Action {
    Follow,
    Error(BoxError),
}

impl Attempt<'_> {
    pub(crate) fn follow(self) -> Action {
        Action::Follow
    }

    pub(crate) fn error<E: Into<BoxError>>(self, error: E) -> Action {
        Action::Error(error.into())
    }
}
