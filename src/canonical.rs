//! Canonicalization functionality for UFile signature generation and validation.
//!
//! This builds the string that is HMAC-SHA1 signed to produce the `Authorization` header, plus the URI encoding
//! helpers used to construct request paths whose on-the-wire form is what gets signed.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The functions and types are subject to change in minor/patch versions. This is exposed for
//! testing purposes only.

use {
    crate::constants::*,
    http::{
        header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, DATE},
        request::Parts,
    },
    log::trace,
    qualifier_attr::qualifiers,
    std::{
        collections::BTreeMap,
        fmt::{Debug, Formatter, Result as FmtResult},
    },
};

/// Header field for the MD5 digest of the body. `http` has no constant for this.
const CONTENT_MD5: &str = "content-md5";

/// A canonicalized request for UFile signing.
///
/// The string to sign is:
/// ```text
/// METHOD\n
/// Content-MD5\n
/// Content-Type\n
/// Date\n
/// x-ucloud-header-a:value\n
/// x-ucloud-header-b:value\n
/// /bucket/path
/// ```
/// The three fixed header lines are always present; an absent header contributes an empty line.
#[derive(Clone)]
pub struct CanonicalRequest {
    /// The HTTP method for the request (e.g., "GET", "PUT", etc.)
    request_method: String,

    /// The first value of the `Content-MD5` header, or empty.
    content_md5: Vec<u8>,

    /// The first value of the `Content-Type` header, or empty.
    content_type: Vec<u8>,

    /// The first value of the `Date` header, or empty.
    date: Vec<u8>,

    /// `x-ucloud-*` headers keyed by lowercased name. Values are comma-joined in request order and trimmed.
    ucloud_headers: BTreeMap<String, Vec<u8>>,

    /// `/` + bucket + URI path, excluding the query string.
    resource_path: String,
}

impl CanonicalRequest {
    /// Create a CanonicalRequest from HTTP request [Parts] addressed to `bucket`.
    pub fn from_request_parts(parts: &Parts, bucket: &str) -> Self {
        let headers = &parts.headers;
        let mut resource_path = String::with_capacity(1 + bucket.len() + parts.uri.path().len());
        resource_path.push('/');
        resource_path.push_str(bucket);
        resource_path.push_str(parts.uri.path());

        Self {
            request_method: parts.method.as_str().to_uppercase(),
            content_md5: first_header_value(headers, CONTENT_MD5),
            content_type: first_header_value(headers, CONTENT_TYPE),
            date: first_header_value(headers, DATE),
            ucloud_headers: canonicalize_ucloud_headers(headers),
            resource_path,
        }
    }

    /// Retrieve the HTTP request method.
    #[inline(always)]
    pub fn request_method(&self) -> &str {
        &self.request_method
    }

    /// Retrieve the canonicalized `x-ucloud-*` headers.
    #[inline(always)]
    pub fn ucloud_headers(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.ucloud_headers
    }

    /// Retrieve the resource path, `/` + bucket + URI path.
    #[inline(always)]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Get the string to sign for the request.
    pub fn string_to_sign(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(256);
        result.extend(self.request_method.as_bytes());
        result.push(b'\n');
        result.extend(&self.content_md5);
        result.push(b'\n');
        result.extend(&self.content_type);
        result.push(b'\n');
        result.extend(&self.date);
        result.push(b'\n');

        for (name, value) in self.ucloud_headers.iter() {
            result.extend(name.as_bytes());
            result.push(b':');
            result.extend(value);
            result.push(b'\n');
        }

        result.extend(self.resource_path.as_bytes());

        trace!("String to sign:\n{}", latin1_to_string(&result));

        result
    }
}

impl Debug for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let ucloud_headers: Vec<String> = self
            .ucloud_headers
            .iter()
            .map(|(name, value)| format!("{}:{}", name, latin1_to_string(value)))
            .collect();

        f.debug_struct("CanonicalRequest")
            .field("request_method", &self.request_method)
            .field("content_md5", &latin1_to_string(&self.content_md5))
            .field("content_type", &latin1_to_string(&self.content_type))
            .field("date", &latin1_to_string(&self.date))
            .field("ucloud_headers", &ucloud_headers)
            .field("resource_path", &self.resource_path)
            .finish()
    }
}

/// Collect the `x-ucloud-*` headers, keyed by lowercased name.
///
/// Multiple values for one name are joined with `,` in the order they appear in the request, then trimmed of
/// surrounding spaces. The result is ordered by name.
pub fn canonicalize_ucloud_headers(headers: &HeaderMap<HeaderValue>) -> BTreeMap<String, Vec<u8>> {
    let mut result = BTreeMap::<String, Vec<u8>>::new();

    for name in headers.keys() {
        let lower = name.as_str().to_lowercase();
        if !lower.starts_with(X_UCLOUD_PREFIX) {
            continue;
        }

        let mut joined = Vec::new();
        for (i, value) in headers.get_all(name).iter().enumerate() {
            if i > 0 {
                joined.push(b',');
            }
            joined.extend(value.as_bytes());
        }

        result.insert(lower, trim_spaces(&joined).to_vec());
    }

    result
}

/// Returns the first value of the header, or an empty vector if it is absent.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn first_header_value<K>(headers: &HeaderMap<HeaderValue>, name: K) -> Vec<u8>
where
    K: http::header::AsHeaderName,
{
    headers.get(name).map(|value| value.as_bytes().to_vec()).unwrap_or_default()
}

/// Indicates whether the specified byte is RFC3986 unreserved -- i.e., can be represented without being
/// percent-encoded, e.g. '?' -> '%3F'.
#[inline(always)]
pub fn is_rfc3986_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'.' || c == b'_' || c == b'~'
}

/// Convert a Latin-1 slice of bytes to a UTF-8 string.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn latin1_to_string(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    for b in bytes {
        result.push(*b as char);
    }
    result
}

/// Decode a header value for display. Valid UTF-8 is kept as-is; anything else is treated as Latin-1.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn header_value_to_string(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(s) => s.to_string(),
        Err(_) => match std::str::from_utf8(value.as_bytes()) {
            Ok(s) => s.to_string(),
            Err(_) => latin1_to_string(value.as_bytes()),
        },
    }
}

/// Percent-encode an object key for use as a URI path. `/` separators are kept.
///
/// The result always starts with `/`. Keys for which [`has_dot_segment`] is true cannot be sent as-is: URL parsers
/// remove `.` and `..` segments (escaped or not) before the request is transmitted.
pub fn encode_object_key(key: &str) -> String {
    let key = key.strip_prefix('/').unwrap_or(key);
    let mut result = String::with_capacity(key.len() + 1);
    result.push('/');
    for b in key.bytes() {
        if b == b'/' {
            result.push('/');
        } else {
            push_encoded_byte(&mut result, b);
        }
    }
    result
}

/// Indicates whether any `/`-separated segment of `key` is `.` or `..`, which an HTTP client would normalize away.
pub fn has_dot_segment(key: &str) -> bool {
    key.split('/').any(|segment| segment == "." || segment == "..")
}

/// Percent-encode a query string key or value. Every byte outside the RFC 3986 unreserved set is escaped.
pub fn encode_query_component(component: &str) -> String {
    let mut result = String::with_capacity(component.len());
    for b in component.bytes() {
        push_encoded_byte(&mut result, b);
    }
    result
}

/// Build a query string from verbs (keys without values) followed by `key=value` pairs.
///
/// Pairs whose value is `None` are omitted. Returns an empty string if nothing remains.
pub fn build_query_string(verbs: &[&str], pairs: &[(&str, Option<&str>)]) -> String {
    let mut parts: Vec<String> = verbs.iter().map(|verb| encode_query_component(verb)).collect();
    for (key, value) in pairs {
        if let Some(value) = value {
            parts.push(format!("{}={}", encode_query_component(key), encode_query_component(value)));
        }
    }
    parts.join("&")
}

#[inline(always)]
fn push_encoded_byte(result: &mut String, b: u8) {
    if is_rfc3986_unreserved(b) {
        result.push(b as char);
    } else {
        let hex = u8_to_upper_hex(b);
        result.push('%');
        result.push(hex[0] as char);
        result.push(hex[1] as char);
    }
}

/// Returns `bytes` with leading and trailing spaces removed. Tabs and other whitespace are kept.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
const fn trim_spaces(bytes: &[u8]) -> &[u8] {
    let mut bytes = bytes;
    while let [b' ', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b' '] = bytes {
        bytes = rest;
    }
    bytes
}

/// Convert a byte to its uppercase hex representation.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
const fn u8_to_upper_hex(b: u8) -> [u8; 2] {
    let result: [u8; 2] = [HEX_DIGITS_UPPER[((b >> 4) & 0xf) as usize], HEX_DIGITS_UPPER[(b & 0xf) as usize]];
    result
}

/// Returns the header name for a vendor header, e.g. `ucloud_header_name("meta-owner")` is `x-ucloud-meta-owner`.
pub fn ucloud_header_name(suffix: &str) -> Result<HeaderName, http::header::InvalidHeaderName> {
    HeaderName::from_bytes(format!("{}{}", X_UCLOUD_PREFIX, suffix.to_lowercase()).as_bytes())
}
