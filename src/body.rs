//! Request body handling utilities.
//!
//! Signed `PUT` and `POST` requests must carry an exact `Content-Length`, so every body is read fully into memory
//! before it is signed.
use {
    bytes::Bytes,
    std::{future::Future, path::PathBuf},
    tower::BoxError,
};

/// A trait for converting various body types into a [`Bytes`] object.
///
/// This requires reading the entire body into memory.
pub trait IntoRequestBytes {
    /// Convert this object into a [`Bytes`] object.
    fn into_request_bytes(self) -> impl Future<Output = Result<Bytes, BoxError>> + Send;
}

/// Convert the unit type `()` into an empty [`Bytes`] object.
impl IntoRequestBytes for () {
    /// This is infalliable.
    async fn into_request_bytes(self) -> Result<Bytes, BoxError> {
        Ok(Bytes::new())
    }
}

/// Convert a `Vec<u8>` into a [`Bytes`] object.
impl IntoRequestBytes for Vec<u8> {
    /// This is infalliable.
    async fn into_request_bytes(self) -> Result<Bytes, BoxError> {
        Ok(Bytes::from(self))
    }
}

/// Convert a `String` into a [`Bytes`] object containing its UTF-8 encoding.
impl IntoRequestBytes for String {
    /// This is infalliable.
    async fn into_request_bytes(self) -> Result<Bytes, BoxError> {
        Ok(Bytes::from(self))
    }
}

/// Copy a string slice into a [`Bytes`] object containing its UTF-8 encoding.
impl IntoRequestBytes for &str {
    /// This is infalliable.
    fn into_request_bytes(self) -> impl Future<Output = Result<Bytes, BoxError>> + Send {
        let bytes = Bytes::copy_from_slice(self.as_bytes());
        async move { Ok(bytes) }
    }
}

/// Copy a byte slice into a [`Bytes`] object.
impl IntoRequestBytes for &[u8] {
    /// This is infalliable.
    fn into_request_bytes(self) -> impl Future<Output = Result<Bytes, BoxError>> + Send {
        let bytes = Bytes::copy_from_slice(self);
        async move { Ok(bytes) }
    }
}

/// The contents of a file on the local filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile(pub PathBuf);

/// Read the whole file into a [`Bytes`] object.
impl IntoRequestBytes for LocalFile {
    /// Fails with the underlying [`std::io::Error`] if the file cannot be read.
    async fn into_request_bytes(self) -> Result<Bytes, BoxError> {
        let contents = tokio::fs::read(&self.0).await?;
        Ok(Bytes::from(contents))
    }
}
