use {
    base64::{engine::general_purpose::STANDARD as BASE64, Engine as _},
    hmac::{Hmac, Mac},
    sha1::Sha1,
};

type HmacSha1 = Hmac<Sha1>;

/// Length of a SHA-1 digest, in bytes.
pub(crate) const SHA1_OUTPUT_LEN: usize = 20;

/// Wrapper function to form a HMAC-SHA1 operation.
#[inline(always)]
pub(crate) fn hmac_sha1(key: &[u8], value: &[u8]) -> [u8; SHA1_OUTPUT_LEN] {
    let mut hmac = HmacSha1::new_from_slice(key).expect("HMAC-SHA1 accepts keys of any length");
    hmac.update(value);
    hmac.finalize().into_bytes().into()
}

/// HMAC-SHA1 of `value` under `key`, encoded as standard (padded) base64.
#[inline(always)]
pub(crate) fn hmac_sha1_base64(key: &[u8], value: &[u8]) -> String {
    BASE64.encode(hmac_sha1(key, value))
}
