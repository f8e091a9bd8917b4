//! Client provenance from request headers.

use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;

use unhinged_core::{ClientMeta, UNKNOWN_CLIENT};

/// Header set by the edge proxy with the connecting client address.
pub const CONNECTING_IP: &str = "cf-connecting-ip";
/// Standard proxy chain header.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Headers consulted for the client IP, highest precedence first.
pub const IP_HEADERS: [&str; 2] = [CONNECTING_IP, FORWARDED_FOR];

/// Value of the first header in `names` that is present, valid text and
/// non-empty.
pub fn first_header<'a>(headers: &'a HeaderMap, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    })
}

/// Best-effort client metadata; missing values become `"unknown"`.
pub fn client_meta(headers: &HeaderMap) -> ClientMeta {
    let ip_address = first_header(headers, &IP_HEADERS).unwrap_or(UNKNOWN_CLIENT);
    let user_agent = first_header(headers, &[USER_AGENT.as_str()]).unwrap_or(UNKNOWN_CLIENT);
    ClientMeta {
        ip_address: ip_address.to_string(),
        user_agent: user_agent.to_string(),
    }
}
