//! Hex helpers for core primitive types.

/// Encode bytes as `0x`-prefixed lowercase hex.
#[must_use]
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode exactly `N` bytes from hex, with or without a `0x`/`0X` prefix.
///
/// # Errors
/// Returns an error if the input is not valid hex or does not decode to `N` bytes.
pub fn decode_prefixed<const N: usize>(text: &str) -> Result<[u8; N], hex::FromHexError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let mut bytes = [0_u8; N];
    hex::decode_to_slice(digits, &mut bytes)?;
    Ok(bytes)
}
