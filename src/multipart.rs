use {
    crate::{body::IntoRequestBytes, RawResponse, UfileClient, UfileError},
    bytes::Bytes,
    http::{header::HeaderMap, Request, Response},
    log::{debug, trace},
    serde::Deserialize,
    std::collections::BTreeMap,
    tower::{BoxError, Service},
};

/// The body returned by a successful `init_parts` call.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateResponse {
    /// The upload id to quote on every subsequent call.
    pub upload_id: String,

    /// The part size the service expects, in bytes.
    #[serde(rename = "BlkSize")]
    pub block_size: u64,

    /// The bucket the upload belongs to.
    #[serde(default)]
    pub bucket: String,

    /// The key the upload will be committed under.
    #[serde(default)]
    pub key: String,
}

/// Parse the body of an `init_parts` response.
pub fn parse_initiate_response(body: &[u8]) -> Result<InitiateResponse, UfileError> {
    serde_json::from_slice(body)
        .map_err(|e| UfileError::InvalidResponse(format!("Unable to parse multipart initiate response: {}", e)))
}

/// State of one multipart upload: the upload id and the ETags of the parts uploaded so far.
///
/// Parts may be uploaded in any order. The completion body lists the ETags by ascending part number.
#[derive(Clone, Debug)]
pub struct MultipartUpload {
    key: String,
    upload_id: String,
    block_size: u64,
    parts: BTreeMap<u32, String>,
}

impl MultipartUpload {
    /// Start a multipart upload for `key`.
    ///
    /// # Errors
    /// Returns [`UfileError::Remote`] if the service rejects the request and [`UfileError::InvalidResponse`] if the
    /// response body cannot be parsed.
    pub async fn initiate<S>(client: &UfileClient<S>, key: &str, headers: HeaderMap) -> Result<Self, UfileError>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone + Send + 'static,
        S::Future: Send,
    {
        let resp = client.init_parts(key, headers).await?;
        check_status(&resp, "init_parts", key)?;

        let initiated = parse_initiate_response(&resp.body)?;
        debug!("Initiated multipart upload {} for {} (block size {})", initiated.upload_id, key, initiated.block_size);
        Ok(Self::from_parts(key, initiated.upload_id, initiated.block_size))
    }

    /// Resume tracking an upload that was initiated elsewhere.
    pub fn from_parts<K, U>(key: K, upload_id: U, block_size: u64) -> Self
    where
        K: Into<String>,
        U: Into<String>,
    {
        Self {
            key: key.into(),
            upload_id: upload_id.into(),
            block_size,
            parts: BTreeMap::new(),
        }
    }

    /// The object key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The upload id assigned by the service.
    #[inline]
    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    /// The part size the service expects. Every part except the last should be exactly this long.
    #[inline]
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// The ETags recorded so far, by part number.
    #[inline]
    pub fn parts(&self) -> &BTreeMap<u32, String> {
        &self.parts
    }

    /// Upload part `part_number` and record its ETag.
    pub async fn upload_part<S, B>(
        &mut self,
        client: &UfileClient<S>,
        part_number: u32,
        content: B,
    ) -> Result<String, UfileError>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone + Send + 'static,
        S::Future: Send,
        B: IntoRequestBytes,
    {
        let resp = client.upload_part(&self.key, &self.upload_id, part_number, content, HeaderMap::new()).await?;
        check_status(&resp, "upload_part", &self.key)?;

        let etag = match resp.headers.get(http::header::ETAG).and_then(|v| v.to_str().ok()) {
            Some(etag) => etag.trim_matches('"').to_string(),
            None => {
                return Err(UfileError::InvalidResponse(format!(
                    "upload_part {} part {}: response has no ETag",
                    self.key, part_number
                )))
            }
        };

        self.record_part(part_number, etag.clone());
        Ok(etag)
    }

    /// Record the ETag of a part uploaded outside this tracker. A later record for the same part replaces the
    /// earlier one.
    pub fn record_part<E: Into<String>>(&mut self, part_number: u32, etag: E) {
        let etag = etag.into();
        trace!("{} part {} -> {}", self.upload_id, part_number, etag);
        self.parts.insert(part_number, etag);
    }

    /// The body for the completion call: the recorded ETags joined with `,` in part-number order.
    pub fn completion_body(&self) -> String {
        self.parts.values().map(String::as_str).collect::<Vec<_>>().join(",")
    }

    /// Commit the upload, optionally under `new_key`.
    pub async fn finish<S>(self, client: &UfileClient<S>, new_key: Option<&str>) -> Result<RawResponse, UfileError>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone + Send + 'static,
        S::Future: Send,
    {
        let body = self.completion_body();
        let resp = client.finish_parts(&self.key, &self.upload_id, new_key, body, HeaderMap::new()).await?;
        check_status(&resp, "finish_parts", &self.key)?;
        debug!("Finished multipart upload {} for {} with {} parts", self.upload_id, self.key, self.parts.len());
        Ok(resp)
    }

    /// Abort the upload, discarding every uploaded part.
    pub async fn abort<S>(self, client: &UfileClient<S>) -> Result<RawResponse, UfileError>
    where
        S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone + Send + 'static,
        S::Future: Send,
    {
        let resp = client.delete_parts(&self.key, &self.upload_id).await?;
        check_status(&resp, "delete_parts", &self.key)?;
        debug!("Aborted multipart upload {} for {}", self.upload_id, self.key);
        Ok(resp)
    }
}

fn check_status(resp: &RawResponse, operation: &'static str, key: &str) -> Result<(), UfileError> {
    if resp.status.is_success() {
        Ok(())
    } else {
        debug!("{} {} failed with {}: {}", operation, key, resp.status, resp.text());
        Err(UfileError::Remote {
            operation,
            key: key.to_string(),
            status: resp.status,
        })
    }
}
