//! Client address resolution from proxy headers

use crate::core::{error::report, LoggerError};
use http::header::{HeaderMap, HeaderName};
use std::net::IpAddr;

/// Turn configured header names into `HeaderName`s, preserving order.
///
/// Names are matched case-insensitively; invalid names are reported and skipped.
pub fn parse_ip_headers<S: AsRef<str>>(names: &[S]) -> Vec<HeaderName> {
    names
        .iter()
        .filter_map(|name| {
            let normalized = name.as_ref().trim().to_ascii_lowercase();
            match HeaderName::from_bytes(normalized.as_bytes()) {
                Ok(header) => Some(header),
                Err(_) => {
                    report(&LoggerError::config(
                        "ipHeaders",
                        format!("invalid header name '{}'", name.as_ref()),
                    ));
                    None
                }
            }
        })
        .collect()
}

/// Resolve the originating client address.
///
/// Headers are consulted in `ip_headers` order and the first one carrying a
/// value wins. For comma-separated chains (`x-forwarded-for`) only the
/// left-most entry is used. A header whose first entry is blank, or whose
/// value is not visible ASCII, is passed over. `peer` is the fallback when no
/// header yields an address.
pub fn resolve_client_ip(
    headers: &HeaderMap,
    ip_headers: &[HeaderName],
    peer: Option<IpAddr>,
) -> Option<String> {
    ip_headers
        .iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(',').next())
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_configured_priority_wins() {
        let map = headers(&[
            ("cf-connecting-ip", "203.0.113.50"),
            ("x-forwarded-for", "10.0.0.1"),
        ]);
        let order = parse_ip_headers(&["cf-connecting-ip", "x-forwarded-for"]);
        assert_eq!(
            resolve_client_ip(&map, &order, None).as_deref(),
            Some("203.0.113.50")
        );
    }

    #[test]
    fn test_forwarded_chain_takes_left_most() {
        let map = headers(&[("x-forwarded-for", "192.0.2.100, 10.0.0.1, 172.16.0.1")]);
        let order = parse_ip_headers(&["x-forwarded-for"]);
        assert_eq!(
            resolve_client_ip(&map, &order, None).as_deref(),
            Some("192.0.2.100")
        );
    }

    #[test]
    fn test_falls_through_missing_and_blank_headers() {
        let map = headers(&[("cf-connecting-ip", "  "), ("x-real-ip", "198.51.100.25")]);
        let order = parse_ip_headers(&["x-client-ip", "cf-connecting-ip", "x-real-ip"]);
        assert_eq!(
            resolve_client_ip(&map, &order, None).as_deref(),
            Some("198.51.100.25")
        );
    }

    #[test]
    fn test_peer_fallback() {
        let order = parse_ip_headers(&["x-forwarded-for"]);
        let peer: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(
            resolve_client_ip(&HeaderMap::new(), &order, Some(peer)).as_deref(),
            Some("127.0.0.1")
        );
        assert_eq!(resolve_client_ip(&HeaderMap::new(), &order, None), None);
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let order = parse_ip_headers(&["X-Real-IP", "bad header"]);
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].as_str(), "x-real-ip");
    }
}
