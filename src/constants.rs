//! Common constants used throughout the crate.
//!
//! Tests that are testing the content of an error message or a wire value should not use these constants; they should
//! use hard-coded strings so the tests also catch misspellings.
//!
//! Please keep this file organized alphabetically.

/// Content-Type sent with every multipart part upload.
pub(crate) const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Default host suffix appended to the bucket name to form the virtual host.
pub(crate) const DEFAULT_SUFFIX: &str = ".ufile.ucloud.cn";

/// Name under which the UFile driver is registered.
pub const DRIVER_NAME: &str = "ucloud-ufile";

/// Error message: `"Authorization header is not valid UTF-8"`
pub(crate) const ERR_MSG_AUTH_HEADER_NOT_UTF8: &str = "Authorization header is not valid UTF-8";

/// Error message: `"Authorization header must have the form 'UCloud <public key>:<signature>'"`
pub(crate) const ERR_MSG_AUTH_HEADER_FORMAT: &str =
    "Authorization header must have the form 'UCloud <public key>:<signature>'";

/// Error message: `"The public key provided does not match the signing credential"`
pub(crate) const ERR_MSG_INVALID_ACCESS_KEY: &str = "The public key provided does not match the signing credential";

/// Error message: `"Request is missing Authorization header"`
pub(crate) const ERR_MSG_MISSING_AUTH_HEADER: &str = "Request is missing Authorization header";

/// Error message: `"The request signature we calculated does not match the signature you provided"`
pub(crate) const ERR_MSG_SIGNATURE_MISMATCH: &str =
    "The request signature we calculated does not match the signature you provided";

/// Uppercase hex digits.
pub(crate) const HEX_DIGITS_UPPER: [u8; 16] =
    [b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F'];

/// Query verb: list objects in the bucket.
pub(crate) const QUERY_LIST: &str = "list";

/// Query verb: list in-progress multipart uploads.
pub(crate) const QUERY_MUPLOADID: &str = "muploadid";

/// Query verb: list the parts of one multipart upload.
pub(crate) const QUERY_MUPLOADPART: &str = "muploadpart";

/// Query verb: initiate a multipart upload.
pub(crate) const QUERY_UPLOADS: &str = "uploads";

/// Authorization scheme prefix, including the trailing space.
pub(crate) const UCLOUD_AUTH_SCHEME: &str = "UCloud ";

/// Prefix of the vendor headers included in the signature.
pub(crate) const X_UCLOUD_PREFIX: &str = "x-ucloud-";
