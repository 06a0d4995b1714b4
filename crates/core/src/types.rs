/// A single upstream row: field name to scalar value, in upstream order.
pub type UpstreamRecord = serde_json::Map<String, serde_json::Value>;

/// Normalize a PIN into its cache key form.
///
/// PINs are case-insensitive for caching only; upstream requests always
/// receive the PIN exactly as the caller supplied it.
pub fn pin_cache_key(pin: &str) -> String {
    pin.to_lowercase()
}
