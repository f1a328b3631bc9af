use {
    http::status::StatusCode,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
        io::Error as IOError,
    },
    tower::BoxError,
};

/// Error returned when a request cannot be signed, or when a UFile signature fails verification.
#[derive(Debug)]
#[non_exhaustive]
pub enum SignatureError {
    /// The `Authorization` header does not have the form `UCloud <public key>:<signature>`.
    IncompleteSignature(/* message */ String),

    /// The public key in the `Authorization` header does not belong to the verifying credential.
    InvalidAccessKey(/* message */ String),

    /// A header value could not be constructed or decoded, e.g. an access key containing control characters.
    MalformedHeader(/* message */ String),

    /// The request carries no `Authorization` header.
    MissingAuthenticationToken(/* message */ String),

    /// The signature did not match the calculated signature value.
    SignatureDoesNotMatch(/* message */ String),
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::IncompleteSignature(msg) => f.write_str(msg),
            Self::InvalidAccessKey(msg) => f.write_str(msg),
            Self::MalformedHeader(msg) => f.write_str(msg),
            Self::MissingAuthenticationToken(msg) => f.write_str(msg),
            Self::SignatureDoesNotMatch(msg) => f.write_str(msg),
        }
    }
}

impl Error for SignatureError {}

/// Error returned by [`UfileClient`][crate::UfileClient] operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum UfileError {
    /// The remote service answered with a status the operation does not accept.
    Remote {
        /// The client operation, e.g. `"get"`.
        operation: &'static str,
        /// The object key (or upload id) the operation was addressing.
        key: String,
        /// The status code returned by the service.
        status: StatusCode,
    },

    /// The request could not be signed.
    Signature(SignatureError),

    /// The request never produced a response (connection, TLS, or protocol failure).
    Transport(BoxError),

    /// Reading local content, e.g. the file given to `put_file`, failed.
    IO(IOError),

    /// The request could not be built: invalid URI, header name, or header value.
    InvalidRequest(/* message */ String),

    /// The service answered with a success status but the response is missing data or is unparseable.
    InvalidResponse(/* message */ String),

    /// The client configuration is incomplete or inconsistent.
    InvalidConfig(/* message */ String),

    /// No driver with the given name is registered.
    UnknownDriver(/* driver name */ String),
}

impl UfileError {
    /// The HTTP status returned by the service, if this error came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote {
                status,
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// Indicates whether the service reported that the object does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl Display for UfileError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Remote {
                operation,
                key,
                status,
            } => write!(f, "{} {} error: {}", operation, key, status.as_u16()),
            Self::Signature(ref e) => Display::fmt(e, f),
            Self::Transport(ref e) => Display::fmt(e, f),
            Self::IO(ref e) => Display::fmt(e, f),
            Self::InvalidRequest(msg) => f.write_str(msg),
            Self::InvalidResponse(msg) => f.write_str(msg),
            Self::InvalidConfig(msg) => f.write_str(msg),
            Self::UnknownDriver(name) => write!(f, "No driver registered under the name '{}'", name),
        }
    }
}

impl Error for UfileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Signature(ref e) => Some(e),
            Self::Transport(ref e) => Some(e.as_ref()),
            Self::IO(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<SignatureError> for UfileError {
    fn from(e: SignatureError) -> UfileError {
        UfileError::Signature(e)
    }
}

impl From<IOError> for UfileError {
    fn from(e: IOError) -> UfileError {
        UfileError::IO(e)
    }
}

impl From<http::Error> for UfileError {
    fn from(e: http::Error) -> UfileError {
        UfileError::InvalidRequest(e.to_string())
    }
}

impl From<Box<dyn Error + Send + Sync>> for UfileError {
    fn from(e: Box<dyn Error + Send + Sync>) -> UfileError {
        let e = match e.downcast::<UfileError>() {
            Ok(ufile_err) => return *ufile_err,
            Err(e) => e,
        };

        let e = match e.downcast::<SignatureError>() {
            Ok(sig_err) => return UfileError::Signature(*sig_err),
            Err(e) => e,
        };

        match e.downcast::<IOError>() {
            Ok(io_err) => UfileError::IO(*io_err),
            Err(e) => UfileError::Transport(e),
        }
    }
}
