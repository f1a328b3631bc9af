use {
    crate::{constants::DEFAULT_SUFFIX, Credential, UfileError},
    derive_builder::Builder,
    serde::Deserialize,
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

/// Configuration for a [`UfileClient`][crate::UfileClient].
///
/// This is usually deserialized from the embedding application's configuration, e.g.
/// ```json
/// {"bucket": "photos", "public_key": "...", "secret_key": "...", "use_https": true}
/// ```
/// or built programmatically with [`UfileConfigBuilder`].
#[derive(Builder, Clone, Deserialize, PartialEq, Eq)]
#[builder(setter(into), build_fn(validate = "Self::validate"), derive(Debug))]
pub struct UfileConfig {
    /// The bucket name. The client talks to the virtual host `<bucket><suffix>`.
    pub bucket: String,

    /// The public (access) key.
    pub public_key: String,

    /// The secret key used to sign requests.
    pub secret_key: String,

    /// The host suffix appended to the bucket name.
    #[serde(default = "default_suffix")]
    #[builder(default = "default_suffix()")]
    pub suffix: String,

    /// Use `https://` instead of `http://`.
    #[serde(default)]
    #[builder(default)]
    pub use_https: bool,

    /// Log every request and response at `debug` level, and enable connection-level logging in the HTTP client.
    #[serde(default)]
    #[builder(default)]
    pub debug: bool,

    /// Add a `Date` header to requests that lack one. The header becomes part of the signature.
    #[serde(default)]
    #[builder(default)]
    pub date_header: bool,
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

impl UfileConfig {
    /// Create a [UfileConfigBuilder] to construct a [UfileConfig].
    #[inline]
    pub fn builder() -> UfileConfigBuilder {
        UfileConfigBuilder::default()
    }

    /// The base URL of the bucket, e.g. `http://photos.ufile.ucloud.cn`.
    pub fn endpoint(&self) -> String {
        let scheme = if self.use_https {
            "https"
        } else {
            "http"
        };
        format!("{}://{}{}", scheme, self.bucket, self.suffix)
    }

    /// The signing credential described by this configuration.
    pub fn credential(&self) -> Credential {
        Credential::new(self.bucket.as_str(), self.public_key.as_str(), self.secret_key.as_str())
    }

    /// Check that the required fields are present.
    pub fn validate(&self) -> Result<(), UfileError> {
        check_required(&self.bucket, &self.public_key, &self.secret_key).map_err(UfileError::InvalidConfig)
    }
}

impl UfileConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        check_required(
            self.bucket.as_deref().unwrap_or_default(),
            self.public_key.as_deref().unwrap_or_default(),
            self.secret_key.as_deref().unwrap_or_default(),
        )
    }
}

fn check_required(bucket: &str, public_key: &str, secret_key: &str) -> Result<(), String> {
    if bucket.is_empty() {
        return Err("bucket must not be empty".to_string());
    }
    if bucket.contains(|c: char| c == '/' || c.is_whitespace()) {
        return Err(format!("bucket name '{}' contains invalid characters", bucket));
    }
    if public_key.is_empty() {
        return Err("public_key must not be empty".to_string());
    }
    if secret_key.is_empty() {
        return Err("secret_key must not be empty".to_string());
    }
    Ok(())
}

impl Debug for UfileConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("UfileConfig")
            .field("bucket", &self.bucket)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("suffix", &self.suffix)
            .field("use_https", &self.use_https)
            .field("debug", &self.debug)
            .field("date_header", &self.date_header)
            .finish()
    }
}
