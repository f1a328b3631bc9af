use {
    crate::{
        body::{IntoRequestBytes, LocalFile},
        canonical::{build_query_string, encode_object_key, has_dot_segment, header_value_to_string},
        constants::*,
        HttpTransport, SigningLayer, SigningService, UfileConfig, UfileError,
    },
    bytes::Bytes,
    http::{
        header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE},
        Method, Request, Response, StatusCode,
    },
    log::debug,
    std::{
        any::type_name,
        borrow::Cow,
        collections::HashMap,
        fmt::{Debug, Formatter, Result as FmtResult},
        path::Path,
    },
    tower::{BoxError, Layer, Service, ServiceExt},
};

/// An uninterpreted response from the UFile service.
///
/// Operations that the service documents as returning a vendor-specific body (listings, multipart calls, uploads)
/// return this and leave status checking to the caller.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// The response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Indicates whether the status is in the 2xx range.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// A client for one UFile bucket.
///
/// Every request goes through a [`SigningService`] before it reaches the transport. The client is cheap to clone;
/// clones share the credential and the transport's connection pool.
#[derive(Clone)]
pub struct UfileClient<S = SigningService<HttpTransport>> {
    endpoint: String,
    bucket: String,
    service: S,
}

impl UfileClient {
    /// Create a client for the bucket described by `config`, using [`HttpTransport`].
    pub fn new(config: &UfileConfig) -> Result<Self, UfileError> {
        config.validate()?;
        let transport = HttpTransport::new(config.debug)?;
        Self::with_transport(config, transport)
    }
}

impl<T> UfileClient<SigningService<T>> {
    /// Create a client that signs requests for `config` and sends them through `transport`.
    pub fn with_transport(config: &UfileConfig, transport: T) -> Result<Self, UfileError> {
        config.validate()?;
        let service = SigningLayer::new(config.credential()).with_date_header(config.date_header).layer(transport);

        Ok(Self {
            endpoint: config.endpoint(),
            bucket: config.bucket.clone(),
            service,
        })
    }
}

impl<S> Debug for UfileClient<S> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("UfileClient")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("service", &type_name::<S>())
            .finish()
    }
}

impl<S> UfileClient<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone + Send + 'static,
    S::Future: Send,
{
    /// Retrieve the base URL requests are sent to.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Retrieve the bucket name.
    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload `content` to `key`. The status is not checked.
    pub async fn put<B>(&self, key: &str, content: B, headers: HeaderMap) -> Result<RawResponse, UfileError>
    where
        B: IntoRequestBytes,
    {
        let body = content.into_request_bytes().await?;
        self.send(Method::PUT, object_path(key, "")?, headers, body).await
    }

    /// Upload the contents of the file at `path` to `key`. The status is not checked.
    pub async fn put_file<P>(&self, key: &str, path: P, headers: HeaderMap) -> Result<RawResponse, UfileError>
    where
        P: AsRef<Path>,
    {
        self.put(key, LocalFile(path.as_ref().to_path_buf()), headers).await
    }

    /// Download the object at `key`.
    ///
    /// # Errors
    /// Returns [`UfileError::Remote`] if the status is not `200 OK`.
    pub async fn get(&self, key: &str) -> Result<Bytes, UfileError> {
        let resp = self.send(Method::GET, object_path(key, "")?, HeaderMap::new(), Bytes::new()).await?;
        let resp = expect_ok(resp, "get", key)?;
        Ok(resp.body)
    }

    /// Indicates whether an object exists at `key`.
    ///
    /// Any status other than `200 OK` is reported as `false`, including server errors. Only failures that produce no
    /// response at all are returned as errors.
    pub async fn exists(&self, key: &str) -> Result<bool, UfileError> {
        let resp = self.head(key).await?;
        if resp.status != StatusCode::OK {
            debug!("exists: {} answered {}; reporting as absent", key, resp.status);
        }
        Ok(resp.status == StatusCode::OK)
    }

    /// The size of the object at `key`, from its `Content-Length`.
    pub async fn size(&self, key: &str) -> Result<u64, UfileError> {
        let resp = expect_ok(self.head(key).await?, "size", key)?;
        let value = resp
            .headers
            .get(CONTENT_LENGTH)
            .ok_or_else(|| UfileError::InvalidResponse(format!("size {}: response has no Content-Length", key)))?;

        value
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .ok_or_else(|| UfileError::InvalidResponse(format!("size {}: invalid Content-Length {:?}", key, value)))
    }

    /// The MIME type of the object at `key`, from its `Content-Type`.
    pub async fn mime(&self, key: &str) -> Result<String, UfileError> {
        let resp = expect_ok(self.head(key).await?, "mime", key)?;
        match resp.headers.get(CONTENT_TYPE) {
            Some(value) => Ok(header_value_to_string(value)),
            None => Err(UfileError::InvalidResponse(format!("mime {}: response has no Content-Type", key))),
        }
    }

    /// All response headers for the object at `key`. Only the first value of each header is kept.
    pub async fn meta(&self, key: &str) -> Result<HashMap<String, String>, UfileError> {
        let resp = expect_ok(self.head(key).await?, "meta", key)?;
        let mut meta = HashMap::with_capacity(resp.headers.keys_len());
        for name in resp.headers.keys() {
            if let Some(value) = resp.headers.get(name) {
                meta.insert(name.as_str().to_string(), header_value_to_string(value));
            }
        }
        Ok(meta)
    }

    /// Delete the object at `key`.
    ///
    /// # Errors
    /// Returns [`UfileError::Remote`] unless the status is in the 2xx range.
    pub async fn delete(&self, key: &str) -> Result<bool, UfileError> {
        let resp = self.send(Method::DELETE, object_path(key, "")?, HeaderMap::new(), Bytes::new()).await?;
        if !resp.status.is_success() {
            return Err(remote_error("delete", key, resp.status));
        }
        Ok(true)
    }

    /// List objects in the bucket. The body is returned uninterpreted. Empty `prefix`/`marker` values and a zero
    /// `limit` are omitted from the query.
    pub async fn list(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: Option<u32>,
    ) -> Result<RawResponse, UfileError> {
        let limit = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let query = build_query_string(
            &[QUERY_LIST],
            &[("prefix", non_empty(prefix)), ("marker", non_empty(marker)), ("limit", limit.as_deref())],
        );
        self.send(Method::GET, format!("/?{}", query), HeaderMap::new(), Bytes::new()).await
    }

    /// Initiate a multipart upload for `key`. The body carries the upload id assigned by the service.
    pub async fn init_parts(&self, key: &str, headers: HeaderMap) -> Result<RawResponse, UfileError> {
        let query = build_query_string(&[QUERY_UPLOADS], &[]);
        self.send(Method::POST, object_path(key, &query)?, headers, Bytes::new()).await
    }

    /// Upload one part of a multipart upload.
    ///
    /// `Content-Type` is always `application/octet-stream`. Parts are independent, so several may be in flight at
    /// once; ordering is enforced by the service, not the client.
    pub async fn upload_part<B>(
        &self,
        key: &str,
        upload_id: &str,
        part_number: u32,
        content: B,
        mut headers: HeaderMap,
    ) -> Result<RawResponse, UfileError>
    where
        B: IntoRequestBytes,
    {
        let body = content.into_request_bytes().await?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_OCTET_STREAM));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

        let part_number = part_number.to_string();
        let query = build_query_string(&[], &[("uploadId", Some(upload_id)), ("partNumber", Some(&part_number))]);
        self.send(Method::POST, object_path(key, &query)?, headers, body).await
    }

    /// Complete a multipart upload. `content` is the comma-separated list of part ETags in part order. If `new_key` is
    /// given the object is committed under that key instead of `key`.
    pub async fn finish_parts<B>(
        &self,
        key: &str,
        upload_id: &str,
        new_key: Option<&str>,
        content: B,
        mut headers: HeaderMap,
    ) -> Result<RawResponse, UfileError>
    where
        B: IntoRequestBytes,
    {
        let body = content.into_request_bytes().await?;
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

        let query = build_query_string(&[], &[("uploadId", Some(upload_id)), ("newKey", non_empty(new_key))]);
        self.send(Method::POST, object_path(key, &query)?, headers, body).await
    }

    /// Abort a multipart upload.
    pub async fn delete_parts(&self, key: &str, upload_id: &str) -> Result<RawResponse, UfileError> {
        let query = build_query_string(&[], &[("uploadId", Some(upload_id))]);
        self.send(Method::DELETE, object_path(key, &query)?, HeaderMap::new(), Bytes::new()).await
    }

    /// List the parts uploaded so far for a multipart upload.
    pub async fn get_parts(&self, upload_id: &str) -> Result<RawResponse, UfileError> {
        let query = build_query_string(&[QUERY_MUPLOADPART], &[("uploadId", Some(upload_id))]);
        self.send(Method::GET, format!("/?{}", query), HeaderMap::new(), Bytes::new()).await
    }

    /// List the multipart uploads in progress in the bucket. Empty or zero arguments are omitted, as for
    /// [`list`][Self::list].
    pub async fn get_all_parts(
        &self,
        prefix: Option<&str>,
        marker: Option<&str>,
        limit: Option<u32>,
    ) -> Result<RawResponse, UfileError> {
        let limit = limit.filter(|l| *l > 0).map(|l| l.to_string());
        let query = build_query_string(
            &[QUERY_MUPLOADID],
            &[("prefix", non_empty(prefix)), ("marker", non_empty(marker)), ("limit", limit.as_deref())],
        );
        self.send(Method::GET, format!("/?{}", query), HeaderMap::new(), Bytes::new()).await
    }

    async fn head(&self, key: &str) -> Result<RawResponse, UfileError> {
        self.send(Method::HEAD, object_path(key, "")?, HeaderMap::new(), Bytes::new()).await
    }

    async fn send(
        &self,
        method: Method,
        path_and_query: String,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<RawResponse, UfileError> {
        let uri = format!("{}{}", self.endpoint, path_and_query);
        let mut req = Request::builder().method(method.clone()).uri(uri).body(body)?;
        req.headers_mut().extend(headers);

        let resp = self.service.clone().oneshot(req).await?;
        let (parts, body) = resp.into_parts();
        debug!("{} {} -> {}", method, path_and_query, parts.status);

        Ok(RawResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

/// Path (and optional query) for an object key.
fn object_path(key: &str, query: &str) -> Result<String, UfileError> {
    if has_dot_segment(key) {
        return Err(UfileError::InvalidRequest(format!(
            "Object key '{}' contains a '.' or '..' path segment and cannot be addressed",
            key
        )));
    }

    let mut path = encode_object_key(key);
    if !query.is_empty() {
        path.push('?');
        path.push_str(query);
    }
    Ok(path)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn expect_ok(resp: RawResponse, operation: &'static str, key: &str) -> Result<RawResponse, UfileError> {
    if resp.status == StatusCode::OK {
        Ok(resp)
    } else {
        Err(remote_error(operation, key, resp.status))
    }
}

fn remote_error(operation: &'static str, key: &str, status: StatusCode) -> UfileError {
    debug!("{} {} failed with {}", operation, key, status);
    UfileError::Remote {
        operation,
        key: key.to_string(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{SigningService, UfileClient, UfileConfig, UfileError},
        bytes::Bytes,
        http::{
            header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
            Method, Request, Response, StatusCode,
        },
        std::{
            future::Future,
            pin::Pin,
            sync::{Arc, Mutex},
            task::{Context, Poll},
        },
        tower::{service_fn, BoxError, Service},
    };

    type Seen = Arc<Mutex<Vec<Request<Bytes>>>>;

    /// Records every request and answers each with the same canned response.
    #[derive(Clone)]
    struct MockTransport {
        status: StatusCode,
        headers: &'static [(&'static str, &'static str)],
        body: &'static str,
        seen: Seen,
    }

    impl Service<Request<Bytes>> for MockTransport {
        type Response = Response<Bytes>;
        type Error = BoxError;
        type Future = Pin<Box<dyn Future<Output = Result<Response<Bytes>, BoxError>> + Send>>;

        fn poll_ready(&mut self, _c: &mut Context) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Bytes>) -> Self::Future {
            self.seen.lock().unwrap().push(req);
            let mut builder = Response::builder().status(self.status);
            for (name, value) in self.headers {
                builder = builder.header(*name, *value);
            }
            let resp = builder.body(Bytes::from_static(self.body.as_bytes()));
            Box::pin(async move { resp.map_err(|e| Box::new(e) as BoxError) })
        }
    }

    fn config() -> UfileConfig {
        UfileConfig::builder().bucket("mybucket").public_key("pubkey").secret_key("s3cr3t").build().unwrap()
    }

    fn mock_client(
        status: StatusCode,
        headers: &'static [(&'static str, &'static str)],
        body: &'static str,
    ) -> (UfileClient<SigningService<MockTransport>>, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let transport = MockTransport {
            status,
            headers,
            body,
            seen: seen.clone(),
        };
        (UfileClient::with_transport(&config(), transport).unwrap(), seen)
    }

    fn only_request(seen: &Seen) -> Request<Bytes> {
        let mut seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        seen.pop().unwrap()
    }

    #[test_log::test(tokio::test)]
    async fn test_put() {
        let (client, seen) = mock_client(StatusCode::OK, &[("ETag", "\"abc\"")], "");
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let resp = client.put("docs/readme.txt", "ünïcode", headers).await.unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.headers.get("etag").unwrap(), "\"abc\"");

        let req = only_request(&seen);
        assert_eq!(req.method(), Method::PUT);
        assert_eq!(req.uri(), "http://mybucket.ufile.ucloud.cn/docs/readme.txt");
        assert_eq!(req.headers().get(CONTENT_LENGTH).unwrap(), "9");
        assert_eq!(req.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
        assert!(req.headers().get(AUTHORIZATION).unwrap().to_str().unwrap().starts_with("UCloud pubkey:"));
        assert_eq!(req.body(), &Bytes::from("ünïcode"));
    }

    #[test_log::test(tokio::test)]
    async fn test_put_does_not_check_status() {
        let (client, _seen) = mock_client(StatusCode::FORBIDDEN, &[], "{\"RetCode\":-148653}");
        let resp = client.put("k", "v", HeaderMap::new()).await.unwrap();
        assert_eq!(resp.status, StatusCode::FORBIDDEN);
        assert_eq!(resp.text(), "{\"RetCode\":-148653}");
    }

    #[test_log::test(tokio::test)]
    async fn test_get() {
        let (client, seen) = mock_client(StatusCode::OK, &[], "hello");
        assert_eq!(client.get("hello.txt").await.unwrap(), Bytes::from_static(b"hello"));
        let req = only_request(&seen);
        assert_eq!(req.method(), Method::GET);
        assert!(req.headers().get(CONTENT_LENGTH).is_none());

        let (client, _seen) = mock_client(StatusCode::NOT_FOUND, &[], "");
        let e = client.get("missing.txt").await.unwrap_err();
        assert!(e.is_not_found());
        assert!(e.to_string().contains("missing.txt"));
        match e {
            UfileError::Remote {
                operation,
                key,
                status,
            } => {
                assert_eq!(operation, "get");
                assert_eq!(key, "missing.txt");
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
            other => panic!("Expected Remote; got {:?}", other),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_exists() {
        let (client, seen) = mock_client(StatusCode::OK, &[], "");
        assert!(client.exists("a").await.unwrap());
        assert_eq!(only_request(&seen).method(), Method::HEAD);

        let (client, _seen) = mock_client(StatusCode::NOT_FOUND, &[], "");
        assert!(!client.exists("a").await.unwrap());

        // Server errors are indistinguishable from absence.
        let (client, _seen) = mock_client(StatusCode::SERVICE_UNAVAILABLE, &[], "");
        assert!(!client.exists("a").await.unwrap());
    }

    #[test_log::test(tokio::test)]
    async fn test_head_operations() {
        let (client, _seen) = mock_client(
            StatusCode::OK,
            &[("Content-Length", "1024"), ("Content-Type", "image/png"), ("ETag", "\"e1\"")],
            "",
        );
        assert_eq!(client.size("a.png").await.unwrap(), 1024);
        assert_eq!(client.mime("a.png").await.unwrap(), "image/png");

        let meta = client.meta("a.png").await.unwrap();
        assert_eq!(meta.get("content-type").map(String::as_str), Some("image/png"));
        assert_eq!(meta.get("etag").map(String::as_str), Some("\"e1\""));

        let (client, _seen) = mock_client(StatusCode::NOT_FOUND, &[], "");
        assert_eq!(client.size("a.png").await.unwrap_err().status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(client.mime("a.png").await.unwrap_err().status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(client.meta("a.png").await.unwrap_err().status(), Some(StatusCode::NOT_FOUND));

        let (client, _seen) = mock_client(StatusCode::OK, &[], "");
        assert!(matches!(client.mime("a.png").await.unwrap_err(), UfileError::InvalidResponse(_)));
    }

    #[test_log::test(tokio::test)]
    async fn test_delete() {
        let (client, seen) = mock_client(StatusCode::NO_CONTENT, &[], "");
        assert!(client.delete("a.txt").await.unwrap());
        assert_eq!(only_request(&seen).method(), Method::DELETE);

        let (client, _seen) = mock_client(StatusCode::NOT_FOUND, &[], "");
        let e = client.delete("a.txt").await.unwrap_err();
        assert_eq!(e.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(e.to_string(), "delete a.txt error: 404");
    }

    #[test_log::test(tokio::test)]
    async fn test_list_queries() {
        let (client, seen) = mock_client(StatusCode::OK, &[], "{\"DataSet\":[]}");
        let resp = client.list(Some("photos/"), None, Some(20)).await.unwrap();
        assert_eq!(resp.text(), "{\"DataSet\":[]}");
        assert_eq!(only_request(&seen).uri(), "http://mybucket.ufile.ucloud.cn/?list&prefix=photos%2F&limit=20");

        client.list(None, Some(""), None).await.unwrap();
        assert_eq!(only_request(&seen).uri(), "http://mybucket.ufile.ucloud.cn/?list");

        client.get_all_parts(Some("big"), Some("m1"), Some(5)).await.unwrap();
        assert_eq!(
            only_request(&seen).uri(),
            "http://mybucket.ufile.ucloud.cn/?muploadid&prefix=big&marker=m1&limit=5"
        );

        client.list(Some(""), None, Some(0)).await.unwrap();
        assert_eq!(only_request(&seen).uri(), "http://mybucket.ufile.ucloud.cn/?list");

        client.get_all_parts(None, None, Some(0)).await.unwrap();
        assert_eq!(only_request(&seen).uri(), "http://mybucket.ufile.ucloud.cn/?muploadid");

        client.get_parts("up-1").await.unwrap();
        assert_eq!(only_request(&seen).uri(), "http://mybucket.ufile.ucloud.cn/?muploadpart&uploadId=up-1");
    }

    #[test_log::test(tokio::test)]
    async fn test_multipart_requests() {
        let (client, seen) = mock_client(StatusCode::OK, &[], "");

        client.init_parts("big.bin", HeaderMap::new()).await.unwrap();
        let req = only_request(&seen);
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.uri(), "http://mybucket.ufile.ucloud.cn/big.bin?uploads");
        assert_eq!(req.headers().get(CONTENT_LENGTH).unwrap(), "0");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        client.upload_part("big.bin", "up-1", 3, vec![0u8; 7], headers).await.unwrap();
        let req = only_request(&seen);
        assert_eq!(req.uri(), "http://mybucket.ufile.ucloud.cn/big.bin?uploadId=up-1&partNumber=3");
        assert_eq!(req.headers().get(CONTENT_TYPE).unwrap(), "application/octet-stream");
        assert_eq!(req.headers().get(CONTENT_LENGTH).unwrap(), "7");

        client.finish_parts("big.bin", "up-1", Some("final.bin"), "e0,e1", HeaderMap::new()).await.unwrap();
        let req = only_request(&seen);
        assert_eq!(req.uri(), "http://mybucket.ufile.ucloud.cn/big.bin?uploadId=up-1&newKey=final.bin");
        assert_eq!(req.headers().get(CONTENT_LENGTH).unwrap(), "5");

        client.finish_parts("big.bin", "up-1", None, (), HeaderMap::new()).await.unwrap();
        assert_eq!(only_request(&seen).uri(), "http://mybucket.ufile.ucloud.cn/big.bin?uploadId=up-1");

        client.delete_parts("big.bin", "up-1").await.unwrap();
        let req = only_request(&seen);
        assert_eq!(req.method(), Method::DELETE);
        assert_eq!(req.uri(), "http://mybucket.ufile.ucloud.cn/big.bin?uploadId=up-1");
    }

    #[test_log::test(tokio::test)]
    async fn test_dot_segment_keys_rejected() {
        let (client, seen) = mock_client(StatusCode::OK, &[], "");
        for key in ["a/../b.txt", "dir/./file.txt", "..", "/./x"] {
            let e = client.get(key).await.unwrap_err();
            assert!(matches!(e, UfileError::InvalidRequest(_)), "{}: {:?}", key, e);
            assert!(e.to_string().contains(key));
            assert!(matches!(client.put(key, "v", HeaderMap::new()).await, Err(UfileError::InvalidRequest(_))));
            assert!(matches!(client.exists(key).await, Err(UfileError::InvalidRequest(_))));
            assert!(matches!(client.delete_parts(key, "up-1").await, Err(UfileError::InvalidRequest(_))));
        }
        assert!(seen.lock().unwrap().is_empty());

        client.get(".hidden/a..b").await.unwrap();
        assert_eq!(only_request(&seen).uri(), "http://mybucket.ufile.ucloud.cn/.hidden/a..b");
    }

    #[test_log::test(tokio::test)]
    async fn test_transport_error() {
        let transport = service_fn(|_req: Request<Bytes>| async move {
            Err::<Response<Bytes>, BoxError>("connection refused".into())
        });
        let client = UfileClient::with_transport(&config(), transport).unwrap();
        let e = client.exists("a").await.unwrap_err();
        assert!(matches!(e, UfileError::Transport(_)));
        assert_eq!(e.to_string(), "connection refused");
    }

    #[test_log::test]
    fn test_invalid_config() {
        let mut config = config();
        config.secret_key = String::new();
        let transport = service_fn(|_req: Request<Bytes>| async move { Ok::<_, BoxError>(Response::new(Bytes::new())) });
        assert!(matches!(UfileClient::with_transport(&config, transport), Err(UfileError::InvalidConfig(_))));
    }

    #[test_log::test]
    fn test_debug() {
        let transport = service_fn(|_req: Request<Bytes>| async move { Ok::<_, BoxError>(Response::new(Bytes::new())) });
        let client = UfileClient::with_transport(&config(), transport).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("http://mybucket.ufile.ucloud.cn"));
        assert!(!debug.contains("s3cr3t"));
    }
}
