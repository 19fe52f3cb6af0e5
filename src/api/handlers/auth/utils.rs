//! Header helpers shared by the admin auth endpoints.

use axum::http::HeaderMap;

/// Identifier used to key login rate limiting: the first hop in
/// `x-forwarded-for`, else `x-real-ip`, else the literal `unknown`.
pub(crate) fn client_identifier(headers: &HeaderMap) -> String {
    extract_client_ip(headers).unwrap_or_else(|| "unknown".to_string())
}

fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            let first = value.split(',').next().map(str::trim).unwrap_or_default();

            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|real_ip| real_ip.to_str().ok())
        .map(str::trim)
        .filter(|real_ip| !real_ip.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_single_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));

        assert_eq!(client_identifier(&headers), "203.0.113.9");
    }

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 198.51.100.2, 10.0.0.1"),
        );

        assert_eq!(client_identifier(&headers), "203.0.113.9");
    }

    #[test]
    fn test_forwarded_for_trims_whitespace() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("  203.0.113.9 , 198.51.100.2"),
        );

        assert_eq!(client_identifier(&headers), "203.0.113.9");
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(client_identifier(&headers), "198.51.100.2");
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(client_identifier(&headers), "198.51.100.2");
    }

    #[test]
    fn test_no_proxy_headers() {
        assert_eq!(client_identifier(&HeaderMap::new()), "unknown");
    }
}
