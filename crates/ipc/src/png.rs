//! Base64 transport for PNG payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::IpcError;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode PNG bytes for a message payload
pub fn encode_png(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a PNG payload. Accepts bare base64 or a `data:image/png;base64,` URL.
pub fn decode_png(payload: &str) -> Result<Vec<u8>, IpcError> {
    let payload = payload.trim();
    let data = match payload.strip_prefix("data:") {
        Some(_) => payload.strip_prefix(DATA_URL_PREFIX).ok_or_else(|| {
            IpcError::InvalidFormat("only base64 PNG data URLs are supported".to_string())
        })?,
        None => payload,
    };
    Ok(STANDARD.decode(data)?)
}

/// Wrap PNG bytes as a data URL
pub fn png_data_url(bytes: &[u8]) -> String {
    format!("{}{}", DATA_URL_PREFIX, encode_png(bytes))
}
