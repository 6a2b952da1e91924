//! Signed search keys: HS256 tokens embedding enforced search options.
//!
//! A signed key lets a browser or mobile client search with options the
//! server will enforce (filters, field restrictions) without ever holding
//! the private API key. Freshness policy (expiry, nonces) belongs to the
//! API server, not to this builder.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

use crate::error::Error;
use crate::utils::{normalize_keys, Params};

/// Private API keys carry this prefix; search-scoped keys do not.
const PRIVATE_KEY_PREFIX: &str = "api";

/// Builds a signed search key.
///
/// The payload merges the key-normalized `options` with the mandatory
/// `api_key_name` field and is signed HMAC-SHA-256 with `api_key` as the
/// secret.
///
/// # Errors
///
/// Returns [`Error::Client`] when `api_key` is not a private API key
/// (it must start with `"api"`), or when signing itself fails.
pub fn create_signed_search_key(
    api_key: &str,
    api_key_name: &str,
    options: Params,
) -> Result<String, Error> {
    if !api_key.starts_with(PRIVATE_KEY_PREFIX) {
        return Err(Error::client(
            "Must create signed search key with an API Key, cannot use a Search Key",
        ));
    }
    let mut payload = normalize_keys(options);
    payload.insert(
        "api_key_name".to_string(),
        Value::String(api_key_name.to_string()),
    );
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(api_key.as_bytes()),
    )
    .map_err(|error| Error::client(format!("failed to sign search key: {error}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use serde_json::json;

    fn decode_payload(token: &str, secret: &str) -> Value {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        decode::<Value>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .expect("token must verify against the signing key")
            .claims
    }

    #[test]
    fn test_rejects_search_scoped_key() {
        let result = create_signed_search_key("search-abc123", "my-key", Params::new());
        match result {
            Err(Error::Client { errors }) => assert_eq!(
                errors,
                ["Must create signed search key with an API Key, cannot use a Search Key"]
            ),
            other => panic!("expected Client error, got: {other:?}"),
        }
    }

    #[test]
    fn test_payload_carries_api_key_name() {
        let token = create_signed_search_key("api-abc123", "main-key", Params::new()).unwrap();
        let payload = decode_payload(&token, "api-abc123");
        assert_eq!(payload["api_key_name"], json!("main-key"));
    }

    #[test]
    fn test_payload_merges_normalized_options() {
        let mut options = Params::new();
        options.insert(
            ":search_fields".to_string(),
            json!({"title": {"weight": 2}}),
        );
        let token = create_signed_search_key("api-abc123", "main-key", options).unwrap();
        let payload = decode_payload(&token, "api-abc123");
        assert_eq!(payload["search_fields"]["title"]["weight"], json!(2));
        assert_eq!(payload["api_key_name"], json!("main-key"));
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = create_signed_search_key("api-abc123", "main-key", Params::new()).unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        let result = decode::<Value>(
            &token,
            &DecodingKey::from_secret(b"api-wrong-key"),
            &validation,
        );
        assert!(result.is_err(), "token must not verify under another key");
    }
}
