//! Proxy selection
//!
//! Decides, per destination, whether a connection is dialed directly or
//! through an HTTP forward proxy.

use std::net::IpAddr;

use http::Uri;

use crate::config::ConfigurationError;

/// Hosts, domains and addresses excluded from proxying.
#[derive(Clone, Debug, Default)]
pub struct ProxyBypass {
    no_proxy_hosts: Vec<String>,
    no_proxy_domains: Vec<String>,
    no_proxy_ips: Vec<IpAddr>,
    everything: bool,
}

impl ProxyBypass {
    /// Parse a comma separated `NO_PROXY` list.
    ///
    /// Entries starting with `.` match the domain and its subdomains, `*`
    /// disables proxying altogether.
    pub fn parse(list: &str) -> Self {
        let mut bypass = Self::default();

        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if entry == "*" {
                bypass.everything = true;
            } else if let Ok(ip) = entry.parse::<IpAddr>() {
                bypass.no_proxy_ips.push(ip);
            } else if let Some(domain) = entry.strip_prefix('.') {
                bypass.no_proxy_domains.push(domain.to_ascii_lowercase());
            } else {
                bypass.no_proxy_hosts.push(entry.to_ascii_lowercase());
            }
        }

        bypass
    }

    /// Check if URI should bypass proxy
    pub fn should_bypass(&self, uri: &Uri) -> bool {
        if self.everything {
            return true;
        }

        let Some(host) = uri.host() else {
            return false;
        };
        let host = host.trim_start_matches('[').trim_end_matches(']');

        if let Ok(ip) = host.parse::<IpAddr>() {
            return self.no_proxy_ips.contains(&ip);
        }

        let host = host.to_ascii_lowercase();
        if self.no_proxy_hosts.iter().any(|h| *h == host) {
            return true;
        }

        self.no_proxy_domains
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{d}")))
    }
}

#[derive(Clone, Debug)]
enum Intercept {
    Direct,
    /// Proxy from the environment, loopback and `NO_PROXY` excluded.
    System { proxy: Uri, bypass: ProxyBypass },
    /// Proxy configured on a custom pool, used for every destination.
    Fixed(Uri),
}

/// Proxy selection used by a connection pool.
#[derive(Clone, Debug)]
pub struct ProxyMatcher {
    intercept: Intercept,
}

impl ProxyMatcher {
    /// Never proxy.
    #[must_use]
    pub fn none() -> Self {
        Self {
            intercept: Intercept::Direct,
        }
    }

    /// Read `HTTP_PROXY` and `NO_PROXY` (either case) from the environment.
    #[must_use]
    pub fn from_system() -> Self {
        let proxy = env_var("HTTP_PROXY").and_then(|raw| match parse_proxy(&raw) {
            Ok(uri) => Some(uri),
            Err(e) => {
                tracing::warn!(target: "restful::transport", error = %e, "ignoring HTTP_PROXY");
                None
            }
        });

        match proxy {
            Some(proxy) => {
                let bypass = ProxyBypass::parse(&env_var("NO_PROXY").unwrap_or_default());
                Self {
                    intercept: Intercept::System { proxy, bypass },
                }
            }
            None => Self::none(),
        }
    }

    /// Send every connection through `proxy`.
    #[must_use]
    pub fn fixed(proxy: Uri) -> Self {
        Self {
            intercept: Intercept::Fixed(proxy),
        }
    }

    /// Proxy to dial for `dst`, `None` to connect directly.
    pub fn intercept(&self, dst: &Uri) -> Option<&Uri> {
        match &self.intercept {
            Intercept::Direct => None,
            Intercept::Fixed(proxy) => Some(proxy),
            Intercept::System { proxy, bypass } => {
                if is_loopback(dst) || bypass.should_bypass(dst) {
                    None
                } else {
                    Some(proxy)
                }
            }
        }
    }
}

/// Parse a proxy address, accepting a bare `host:port`.
pub fn parse_proxy(raw: &str) -> Result<Uri, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidProxy {
        proxy: raw.to_owned(),
        reason,
    };

    let with_scheme = if raw.contains("://") {
        raw.to_owned()
    } else {
        format!("http://{raw}")
    };

    let uri: Uri = with_scheme.parse().map_err(|e: http::uri::InvalidUri| invalid(e.to_string()))?;

    match uri.scheme_str() {
        Some("http") => {}
        Some(other) => return Err(invalid(format!("unsupported scheme {other}"))),
        None => return Err(invalid("missing scheme".into())),
    }
    if uri.host().is_none_or(str::is_empty) {
        return Err(invalid("missing host".into()));
    }

    Ok(uri)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .or_else(|_| std::env::var(name.to_ascii_lowercase()))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn is_loopback(uri: &Uri) -> bool {
    match uri.host() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}
