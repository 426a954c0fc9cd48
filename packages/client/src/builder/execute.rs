//! Cache-aware request pipeline
//!
//! One logical call moves through cache check, dispatch and post-processing.
//! Any failure settles the call with an error-carrying [`Response`] and leaves
//! the cache untouched.

use std::sync::Arc;

use bytes::Bytes;
use http::{Method, StatusCode};
use url::Url;

use super::core::RequestBuilder;
use super::headers;
use crate::cache::{CacheEntry, CacheKey, Freshness, is_read_method};
use crate::client::{Inbound, Outbound, SendOptions};
use crate::error::{self, Result};
use crate::http::Response;
use crate::mockup;
use crate::redirect::Policy;

/// Run one call of `builder` to completion.
pub(crate) async fn execute(builder: RequestBuilder, method: Method, url: String, body: Result<Bytes>) -> Response {
    let config = Arc::clone(&builder.config);
    let format = config.content_type;

    let raw = format!("{}{}", config.base_url, url);
    let target = match Url::parse(&raw) {
        Ok(target) => target,
        Err(e) => {
            return Response::from_error(error::configuration(e), format);
        }
    };

    let identity = CacheKey::from_url(&target);
    let cacheable = !config.disable_cache && is_read_method(&method);

    // Cache check
    let carried = if cacheable {
        builder.cache.get(&identity)
    } else {
        None
    };

    if let Some(entry) = carried.as_ref().filter(|e| !e.revalidate) {
        tracing::debug!(target: "restful::cache", key = %identity, "cache hit");
        return Response::from_cache(entry, format);
    }

    // Dispatch
    let body = match body {
        Ok(body) => body,
        Err(e) => return Response::from_error(e.with_url(target), format),
    };

    let mock = mockup::route(&target);
    let dispatch_url = mock.clone().unwrap_or_else(|| target.clone());
    let headers = headers::decorate(&config, &method, carried.as_deref(), mock.as_ref().map(|_| &target));

    if carried.is_some() {
        builder.cache.stats().record_validation();
        tracing::debug!(target: "restful::cache", key = %identity, "revalidating entry");
    }

    let options = SendOptions {
        response_timeout: config.timeouts.response_timeout(),
        redirect: if config.follow_redirect {
            Policy::default()
        } else {
            Policy::none()
        },
    };
    let outbound = Outbound {
        method,
        url: dispatch_url,
        headers,
        body,
    };

    tracing::debug!(target: "restful::builder", method = %outbound.method, url = %outbound.url, "dispatching");

    let inbound = match builder.http_client().send(outbound, options).await {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::debug!(target: "restful::builder", error = %e, "request failed");
            return Response::from_error(e, format);
        }
    };

    // Post-process
    if inbound.status == StatusCode::NOT_MODIFIED
        && let Some(entry) = carried.as_ref()
    {
        builder.cache.stats().record_hit();
        tracing::debug!(target: "restful::cache", key = %identity, "not modified, serving cached entry");
        return Response::from_cache(entry, format);
    }

    if cacheable {
        populate(&builder, identity, carried.as_ref(), &inbound);
    }

    Response::from_inbound(inbound, format)
}

/// Store a fresh response, replacing the carried entry after a changed
/// revalidation.
fn populate(builder: &RequestBuilder, identity: CacheKey, carried: Option<&Arc<CacheEntry>>, inbound: &Inbound) {
    let cache = &builder.cache;
    let freshness = Freshness::evaluate(&inbound.headers);

    if !freshness.is_cacheable() {
        if let Some(current) = carried
            && cache.remove_if_current(&identity, current)
        {
            tracing::debug!(target: "restful::cache", key = %identity, "dropped entry no longer cacheable");
        }
        return;
    }

    let entry = CacheEntry::new(
        inbound.status,
        inbound.version,
        inbound.headers.clone(),
        inbound.body.clone(),
        freshness,
    );

    let entry = match carried {
        Some(current) => match cache.replace(&identity, current, entry) {
            Ok(()) => return,
            Err(entry) => entry,
        },
        None => entry,
    };

    if !cache.set_nx(identity.clone(), entry) {
        tracing::debug!(target: "restful::cache", key = %identity, "entry already populated");
    }
}
