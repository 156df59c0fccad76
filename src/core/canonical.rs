//! Scheme-less URL canonicalization for feed entries.
//!
//! The steps follow the usual lookup-list conventions: strip control
//! whitespace and the fragment, unescape until stable, drop the scheme,
//! normalize the host (userinfo, port, dots, case, IDNA, numeric IPv4)
//! and the path (dot segments, repeated slashes), then re-escape the
//! bytes that cannot appear literally in a lookup key.
//!
//! Everything after unescaping works on raw bytes, so a decoded byte that
//! is not valid UTF-8 is escaped back to the same `%XX` it came from.

use crate::domain::ports::Canonicalizer;
use crate::utils::error::{EtlError, Result};
use regex::bytes::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use url::Url;

const DEFAULT_MAX_DECODE_ROUNDS: usize = 16;

static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("scheme prefix pattern is valid")
});

#[derive(Debug, Clone)]
pub struct UrlCanonicalizer {
    max_decode_rounds: usize,
}

impl Default for UrlCanonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlCanonicalizer {
    pub fn new() -> Self {
        Self {
            max_decode_rounds: DEFAULT_MAX_DECODE_ROUNDS,
        }
    }

    /// Limits how many nested percent-encoding layers are peeled off.
    pub fn with_max_decode_rounds(mut self, rounds: usize) -> Self {
        self.max_decode_rounds = rounds.max(1);
        self
    }

    fn unescape(&self, input: &str) -> Vec<u8> {
        let mut current = input.as_bytes().to_vec();
        for _ in 0..self.max_decode_rounds {
            let next = urlencoding::decode_binary(&current).into_owned();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn fail(raw: &str, reason: impl Into<String>) -> EtlError {
        EtlError::CanonicalizeError {
            input: raw.to_string(),
            reason: reason.into(),
        }
    }
}

impl Canonicalizer for UrlCanonicalizer {
    fn canonicalize(&self, raw: &str) -> Result<String> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();
        let cleaned = cleaned.trim();
        let without_fragment = cleaned.split('#').next().unwrap_or_default();

        let decoded = self.unescape(without_fragment);
        let rest = strip_scheme(&decoded);

        let (before_query, query) = match rest.iter().position(|&b| b == b'?') {
            Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
            None => (rest, None),
        };
        let (authority, path) = match before_query.iter().position(|&b| b == b'/') {
            Some(idx) => (&before_query[..idx], Some(&before_query[idx..])),
            None => (before_query, None),
        };

        let host = normalize_host(authority).map_err(|reason| Self::fail(raw, reason))?;

        let mut canonical = host;
        match (path, query) {
            (Some(path), _) => canonical.push_str(&escape(&normalize_path(path))),
            (None, Some(_)) => canonical.push('/'),
            (None, None) => {}
        }
        if let Some(query) = query {
            canonical.push('?');
            canonical.push_str(&escape(query));
        }

        tracing::trace!("canonicalized {:?} -> {:?}", raw, canonical);
        Ok(canonical)
    }
}

fn strip_scheme(input: &[u8]) -> &[u8] {
    match SCHEME_PREFIX.find(input) {
        Some(m) => &input[m.end()..],
        None => input,
    }
}

fn normalize_host(authority: &[u8]) -> std::result::Result<String, String> {
    let authority =
        std::str::from_utf8(authority).map_err(|_| "host is not valid UTF-8".to_string())?;

    let host = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority);

    let host = match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    };

    // The URL parser would read `\` as a path separator and `#` as a
    // fragment and quietly keep only the part before them.
    if let Some(c) = host.chars().find(|&c| is_forbidden_host_char(c, host.starts_with('['))) {
        return Err(format!("forbidden character {:?} in host", c));
    }

    let host = collapse_dots(host);
    let host = host.trim_matches('.');
    if host.is_empty() {
        return Err("empty host".to_string());
    }

    // The WHATWG host parser handles case folding, IDNA and numeric IPv4 forms.
    let parsed =
        Url::parse(&format!("http://{}/", host)).map_err(|e| format!("invalid host: {}", e))?;
    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(format!("host {:?} does not parse as a bare host", host));
    }
    parsed
        .host_str()
        .map(|h| h.trim_end_matches('.').to_string())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| "empty host".to_string())
}

fn is_forbidden_host_char(c: char, bracketed: bool) -> bool {
    match c {
        '#' | '%' | '/' | '?' | '@' | '\\' | '<' | '>' | '^' | '|' | ' ' => true,
        '[' | ']' => !bracketed,
        ':' => !bracketed,
        c => c.is_control(),
    }
}

fn collapse_dots(host: &str) -> Cow<'_, str> {
    if !host.contains("..") {
        return Cow::Borrowed(host);
    }
    let mut out = String::with_capacity(host.len());
    let mut prev_dot = false;
    for c in host.chars() {
        if c == '.' {
            if !prev_dot {
                out.push(c);
            }
            prev_dot = true;
        } else {
            out.push(c);
            prev_dot = false;
        }
    }
    Cow::Owned(out)
}

fn normalize_path(path: &[u8]) -> Vec<u8> {
    let mut segments: Vec<&[u8]> = Vec::new();
    for segment in path.split(|&b| b == b'/') {
        match segment {
            b"" | b"." => {}
            b".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let trailing_slash = path.ends_with(b"/") || path.ends_with(b"/.") || path.ends_with(b"/..");

    let mut out = Vec::with_capacity(path.len());
    out.push(b'/');
    out.extend_from_slice(&segments.join(&b'/'));
    if trailing_slash && !segments.is_empty() {
        out.push(b'/');
    }
    out
}

/// Escapes control bytes, space, non-ASCII bytes, `#` and `%`.
fn escape(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    for &b in input {
        if b <= 0x20 || b >= 0x7f || b == b'#' || b == b'%' {
            out.push_str(&format!("%{:02X}", b));
        } else {
            out.push(b as char);
        }
    }
    out
}
