use {
    crate::UfileError,
    bytes::Bytes,
    http::{Request, Response},
    log::debug,
    std::{
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    },
    tower::{BoxError, Service},
};

/// HttpTransport sends `http` requests with [`reqwest`] and buffers the whole response body.
///
/// Every response is returned as-is; status codes are interpreted by the caller. A request whose path the HTTP
/// client would rewrite before sending (e.g. by removing `..` segments) is refused, since its signature covers the
/// original path.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    debug: bool,
}

impl HttpTransport {
    /// Create a new transport. If `debug` is set, requests and responses are logged at `debug` level and the
    /// underlying connections log their traffic.
    pub fn new(debug: bool) -> Result<Self, UfileError> {
        let client = reqwest::Client::builder()
            .connection_verbose(debug)
            .build()
            .map_err(|e| UfileError::InvalidConfig(format!("Unable to create HTTP client: {}", e)))?;

        Ok(Self::from_client(client, debug))
    }

    /// Wrap an existing [`reqwest::Client`], e.g. one configured with a proxy or custom timeouts.
    pub fn from_client(client: reqwest::Client, debug: bool) -> Self {
        Self {
            client,
            debug,
        }
    }
}

impl Service<Request<Bytes>> for HttpTransport {
    type Response = Response<Bytes>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Bytes>, BoxError>> + Send>>;

    fn poll_ready(&mut self, _c: &mut Context) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Bytes>) -> Self::Future {
        let client = self.client.clone();
        let debug = self.debug;
        Box::pin(send(client, debug, req))
    }
}

async fn send(client: reqwest::Client, debug: bool, req: Request<Bytes>) -> Result<Response<Bytes>, BoxError> {
    if debug {
        debug!("> {} {} ({} body bytes)", req.method(), req.uri(), req.body().len());
        for (name, value) in req.headers() {
            if name != http::header::AUTHORIZATION {
                debug!("> {}: {:?}", name, value);
            }
        }
    }

    let signed_path = req.uri().path().to_string();
    let req = reqwest::Request::try_from(req)?;
    if req.url().path() != signed_path {
        return Err(UfileError::InvalidRequest(format!(
            "Request path {} would be sent as {}, which does not match the signed path",
            signed_path,
            req.url().path()
        ))
        .into());
    }

    let resp = client.execute(req).await?;

    let mut builder = Response::builder().status(resp.status()).version(resp.version());
    if let Some(headers) = builder.headers_mut() {
        headers.extend(resp.headers().iter().map(|(name, value)| (name.clone(), value.clone())));
    }

    let body = resp.bytes().await?;
    let resp = builder.body(body)?;

    if debug {
        debug!("< {} ({} body bytes)", resp.status(), resp.body().len());
        for (name, value) in resp.headers() {
            debug!("< {}: {:?}", name, value);
        }
    }

    Ok(resp)
}
