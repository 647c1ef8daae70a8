//! URL parsing utilities for domain extraction
//!
//! These functions avoid allocations and work directly on string slices.
//! Case is preserved throughout.

// =============================================================================
// Scheme Handling
// =============================================================================

/// Get the position after `scheme://`, or after a bare `//`.
///
/// Returns None if the URL has no authority component.
#[inline]
pub fn get_authority_start(url: &str) -> Option<usize> {
    let bytes = url.as_bytes();

    // Network-path reference: "//host/path"
    if bytes.starts_with(b"//") {
        return Some(2);
    }

    // Scheme must start with a letter
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }

    let colon_pos = bytes
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'+' || b == b'-' || b == b'.'))?;
    if bytes[colon_pos] != b':' {
        return None;
    }

    if bytes[colon_pos + 1..].starts_with(b"//") {
        return Some(colon_pos + 3);
    }

    None
}

// =============================================================================
// Host Extraction
// =============================================================================

/// Get the start and end positions of the hostname in a URL.
#[inline]
pub fn get_host_position(url: &str) -> Option<(usize, usize)> {
    let authority_start = get_authority_start(url)?;
    let bytes = url.as_bytes();

    // Authority ends at the first '/', '?' or '#'
    let mut authority_end = bytes.len();
    for (i, &b) in bytes[authority_start..].iter().enumerate() {
        if b == b'/' || b == b'?' || b == b'#' {
            authority_end = authority_start + i;
            break;
        }
    }

    // Skip userinfo (up to the last '@')
    let host_start = match bytes[authority_start..authority_end].iter().rposition(|&b| b == b'@') {
        Some(at_pos) => authority_start + at_pos + 1,
        None => authority_start,
    };

    // Bracketed IPv6 literal
    if bytes.get(host_start) == Some(&b'[') {
        let close = bytes[host_start..authority_end].iter().position(|&b| b == b']');
        return Some(match close {
            Some(pos) => (host_start + 1, host_start + pos),
            None => (host_start, authority_end),
        });
    }

    // Strip port
    let host_end = bytes[host_start..authority_end]
        .iter()
        .position(|&b| b == b':')
        .map_or(authority_end, |pos| host_start + pos);

    Some((host_start, host_end))
}

/// Extract the host of a URL without allocating.
/// Returns a slice into the original URL.
#[inline]
pub fn extract_host(url: &str) -> Option<&str> {
    let (host_start, host_end) = get_host_position(url)?;
    Some(&url[host_start..host_end])
}

// =============================================================================
// Domain Extraction
// =============================================================================

/// Drop the final dot-separated segment of a host.
///
/// A host without a dot is returned unchanged.
#[inline]
pub fn strip_suffix(host: &str) -> &str {
    match host.rfind('.') {
        Some(idx) => &host[..idx],
        None => host,
    }
}

/// Extract the domain used for classification from a URL.
///
/// Takes the URL's host and drops its last segment, so
/// `http://www.google.com` yields `www.google`. URLs without an authority
/// yield an empty string.
pub fn extract_domain(url: &str) -> &str {
    extract_host(url).map_or("", strip_suffix)
}
