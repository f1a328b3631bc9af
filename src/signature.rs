use {
    crate::{canonical::CanonicalRequest, constants::*, crypto::hmac_sha1_base64, SignatureError},
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_LENGTH},
        method::Method,
        request::Parts,
    },
    lazy_static::lazy_static,
    log::{debug, trace},
    regex::Regex,
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
    subtle::ConstantTimeEq,
};

lazy_static! {
    /// Pattern for a UFile Authorization header: `UCloud <public key>:<signature>`.
    static ref UCLOUD_AUTH_RE: Regex = Regex::new(r"^UCloud ([^:\s]+):(\S+)$").unwrap();
}

/// The credential used to sign requests for one bucket.
///
/// Credentials are immutable. The secret key is never included in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// The bucket name. This forms part of the signed resource path.
    bucket: String,

    /// The public (access) key, sent in the clear in the `Authorization` header.
    access_key: String,

    /// The secret key used as the HMAC key.
    secret_key: String,
}

impl Credential {
    /// Create a new credential for `bucket`.
    pub fn new<B, A, S>(bucket: B, access_key: A, secret_key: S) -> Self
    where
        B: Into<String>,
        A: Into<String>,
        S: Into<String>,
    {
        Self {
            bucket: bucket.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Retrieve the bucket name.
    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Retrieve the public (access) key.
    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Compute the `Authorization` header value for a canonical request.
    pub fn authorization(&self, canonical_request: &CanonicalRequest) -> String {
        let signature = sign_string(&canonical_request.string_to_sign(), &self.secret_key);
        format!("{}{}:{}", UCLOUD_AUTH_SCHEME, self.access_key, signature)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credential")
            .field("bucket", &self.bucket)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Display for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}@{}", self.access_key, self.bucket)
    }
}

/// Compute the UFile signature of a string to sign: `base64(HMAC-SHA1(string_to_sign, secret_key))`.
#[inline]
pub fn sign_string(string_to_sign: &[u8], secret_key: &str) -> String {
    hmac_sha1_base64(secret_key.as_bytes(), string_to_sign)
}

/// Sign a request in place.
///
/// This sets the `Authorization` header, replacing any value already present. For `POST` and `PUT` requests it also
/// sets `Content-Length` to `body_len`, the exact number of bytes that will be transmitted. The body itself is never
/// touched.
///
/// # Errors
/// Returns [`SignatureError::MalformedHeader`] if the resulting `Authorization` value is not a valid header value,
/// which happens when the access key contains control characters.
pub fn sign_request(parts: &mut Parts, body_len: usize, credential: &Credential) -> Result<(), SignatureError> {
    if parts.method == Method::POST || parts.method == Method::PUT {
        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(body_len));
    }

    let canonical_request = CanonicalRequest::from_request_parts(parts, credential.bucket());
    trace!("Created canonical request: {:?}", canonical_request);

    let authorization = credential.authorization(&canonical_request);
    let authorization = HeaderValue::from_str(&authorization).map_err(|e| {
        SignatureError::MalformedHeader(format!("Unable to encode Authorization header for {}: {}", credential, e))
    })?;

    debug!("Signed {} {} as {}", parts.method, parts.uri, credential);
    parts.headers.insert(AUTHORIZATION, authorization);
    Ok(())
}

/// Verify the `Authorization` header of a request against `credential`.
///
/// This recomputes the signature the way the UFile service does and compares it in constant time. It is intended
/// for mock services and tests; the client never verifies responses.
pub fn verify_request(parts: &Parts, credential: &Credential) -> Result<(), SignatureError> {
    let auth_header = match parts.headers.get(AUTHORIZATION) {
        Some(value) => value,
        None => return Err(SignatureError::MissingAuthenticationToken(ERR_MSG_MISSING_AUTH_HEADER.to_string())),
    };

    let auth_header = auth_header
        .to_str()
        .map_err(|_| SignatureError::MalformedHeader(ERR_MSG_AUTH_HEADER_NOT_UTF8.to_string()))?;

    let captures = match UCLOUD_AUTH_RE.captures(auth_header) {
        Some(captures) => captures,
        None => {
            trace!("verify_request: malformed Authorization header: {}", auth_header);
            return Err(SignatureError::IncompleteSignature(ERR_MSG_AUTH_HEADER_FORMAT.to_string()));
        }
    };

    let access_key = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let signature = captures.get(2).map(|m| m.as_str()).unwrap_or_default();

    if access_key != credential.access_key() {
        trace!("verify_request: access key {} does not match {}", access_key, credential.access_key());
        return Err(SignatureError::InvalidAccessKey(ERR_MSG_INVALID_ACCESS_KEY.to_string()));
    }

    let canonical_request = CanonicalRequest::from_request_parts(parts, credential.bucket());
    let expected = sign_string(&canonical_request.string_to_sign(), &credential.secret_key);

    if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        Ok(())
    } else {
        debug!("verify_request: signature mismatch for {:?}", canonical_request);
        Err(SignatureError::SignatureDoesNotMatch(ERR_MSG_SIGNATURE_MISMATCH.to_string()))
    }
}
