use {
    crate::{sign_request, Credential},
    bytes::Bytes,
    chrono::{DateTime, Utc},
    http::{
        header::{HeaderValue, DATE},
        Request, Response,
    },
    std::{
        any::type_name,
        fmt::{Debug, Formatter, Result as FmtResult},
        future::Future,
        pin::Pin,
        task::{Context, Poll},
    },
    tower::{BoxError, Layer, Service, ServiceExt},
};

/// Format of the `Date` header (IMF-fixdate).
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SigningLayer wraps a service with a [`SigningService`] for a credential.
#[derive(Clone, Debug)]
pub struct SigningLayer {
    credential: Credential,
    date_header: bool,
}

impl SigningLayer {
    /// Create a layer that signs every request with `credential`.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            date_header: false,
        }
    }

    /// If set, requests without a `Date` header get one before they are signed.
    pub fn with_date_header(mut self, date_header: bool) -> Self {
        self.date_header = date_header;
        self
    }
}

impl<S> Layer<S> for SigningLayer {
    type Service = SigningService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SigningService {
            credential: self.credential.clone(),
            date_header: self.date_header,
            inner,
        }
    }
}

/// SigningService attaches a UFile `Authorization` header to every request before passing it to the inner service.
///
/// The body is never modified. For `POST` and `PUT` requests `Content-Length` is set to the exact body length.
#[derive(Clone)]
pub struct SigningService<S> {
    credential: Credential,
    date_header: bool,
    inner: S,
}

impl<S> SigningService<S> {
    /// Wrap `inner` so every request is signed with `credential`.
    pub fn new(credential: Credential, inner: S) -> Self {
        SigningLayer::new(credential).layer(inner)
    }

    /// Retrieve the credential requests are signed with.
    #[inline]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Retrieve the wrapped service.
    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S> Debug for SigningService<S> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("SigningService")
            .field("credential", &self.credential)
            .field("date_header", &self.date_header)
            .field("inner", &type_name::<S>())
            .finish()
    }
}

impl<S> Service<Request<Bytes>> for SigningService<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<Response<Bytes>, BoxError>> + Send>>;

    fn poll_ready(&mut self, c: &mut Context) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(c)
    }

    fn call(&mut self, req: Request<Bytes>) -> Self::Future {
        let credential = self.credential.clone();
        let date_header = self.date_header;
        let inner = self.inner.clone();

        Box::pin(handle_call(req, credential, date_header, inner))
    }
}

async fn handle_call<S>(
    req: Request<Bytes>,
    credential: Credential,
    date_header: bool,
    inner: S,
) -> Result<Response<Bytes>, BoxError>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = BoxError> + Clone + Send + 'static,
    S::Future: Send,
{
    let (mut parts, body) = req.into_parts();

    if date_header && !parts.headers.contains_key(DATE) {
        parts.headers.insert(DATE, http_date(Utc::now()));
    }

    sign_request(&mut parts, body.len(), &credential)?;
    inner.oneshot(Request::from_parts(parts, body)).await
}

/// Format a timestamp as an HTTP `Date` header value.
fn http_date(timestamp: DateTime<Utc>) -> HeaderValue {
    let formatted = timestamp.format(HTTP_DATE_FORMAT).to_string();
    HeaderValue::from_str(&formatted).expect("formatted dates are always valid header values")
}
