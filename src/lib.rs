//! The `ucloud_ufile` crate signs requests for, and talks to, [UCloud UFile](https://docs.ucloud.cn/ufile/README)
//! object storage.
//!
//! UFile authenticates every request with an `Authorization: UCloud <public key>:<signature>` header, where the
//! signature is the base64-encoded HMAC-SHA1 of a canonical string built from the method, three content headers, the
//! `x-ucloud-*` headers and the bucket-qualified path. This crate provides:
//! * [`sign_request`] and [`verify_request`] for signing and checking `http` request parts directly.
//! * [`SigningLayer`] / [`SigningService`], a `tower` middleware that signs every request passing through it.
//! * [`UfileClient`], an object client (put, get, head, delete, list and the multipart calls) built on that
//!   middleware and [`HttpTransport`].
//! * [`MultipartUpload`], which tracks a multipart upload's id and part ETags.
//!
//! # Signing a request
//! ```rust
//! use http::Request;
//! use ucloud_ufile::{sign_request, verify_request, Credential};
//!
//! let credential = Credential::new("mybucket", "pubkey", "s3cr3t");
//! let req = Request::put("http://mybucket.ufile.ucloud.cn/foo.txt").body(()).unwrap();
//! let (mut parts, _body) = req.into_parts();
//!
//! // The canonical string is "PUT\n\n\n\n/mybucket/foo.txt".
//! sign_request(&mut parts, 0, &credential).unwrap();
//! assert_eq!(parts.headers["authorization"], "UCloud pubkey:52l0+9DcZ65XMv2EhOeFnx6ahe8=");
//! assert_eq!(parts.headers["content-length"], "0");
//!
//! // The same credential accepts the signed request.
//! verify_request(&parts, &credential).unwrap();
//! ```
//!
//! # Using the client
//! ```rust,no_run
//! use http::HeaderMap;
//! use ucloud_ufile::{UfileClient, UfileConfig};
//!
//! # async fn example() -> Result<(), ucloud_ufile::UfileError> {
//! let config = UfileConfig::builder()
//!     .bucket("photos")
//!     .public_key("my-public-key")
//!     .secret_key("my-secret-key")
//!     .use_https(true)
//!     .build()
//!     .unwrap();
//! let client = UfileClient::new(&config)?;
//!
//! client.put("cats/tabby.txt", "meow", HeaderMap::new()).await?;
//! assert!(client.exists("cats/tabby.txt").await?);
//! let body = client.get("cats/tabby.txt").await?;
//! assert_eq!(&body[..], b"meow");
//! client.delete("cats/tabby.txt").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

mod body;
pub mod canonical;
mod client;
mod config;
mod constants;
mod crypto;
mod error;
mod multipart;
mod registry;
mod service;
mod signature;
mod transport;

pub use crate::{
    body::{IntoRequestBytes, LocalFile},
    canonical::CanonicalRequest,
    client::{RawResponse, UfileClient},
    config::{UfileConfig, UfileConfigBuilder, UfileConfigBuilderError},
    constants::DRIVER_NAME,
    error::{SignatureError, UfileError},
    multipart::{parse_initiate_response, InitiateResponse, MultipartUpload},
    registry::{create_driver, register_default_drivers, register_driver, registered_drivers, DriverFactory},
    service::{SigningLayer, SigningService},
    signature::{sign_request, sign_string, verify_request, Credential},
    transport::HttpTransport,
};
