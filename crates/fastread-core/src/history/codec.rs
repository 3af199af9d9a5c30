//! Wire format of the persisted history slot: base64url (no padding) over a
//! JSON array of entries.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

use super::HistoryEntry;

#[derive(Debug)]
pub enum DecodeError {
    Encoding(base64::DecodeError),
    Utf8(std::string::FromUtf8Error),
    Json(serde_json::Error),
}

pub fn encode(entries: &[HistoryEntry]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(entries)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode(raw: &str) -> Result<Vec<HistoryEntry>, DecodeError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(raw.trim())
        .map_err(DecodeError::Encoding)?;
    let json = String::from_utf8(bytes).map_err(DecodeError::Utf8)?;
    serde_json::from_str(&json).map_err(DecodeError::Json)
}

/// Encoded size of `entries` without allocating the base64 text.
pub fn encoded_len(entries: &[HistoryEntry]) -> Result<usize, serde_json::Error> {
    let json_len = serde_json::to_vec(entries)?.len();
    Ok(base64::encoded_len(json_len, false).unwrap_or(usize::MAX))
}
