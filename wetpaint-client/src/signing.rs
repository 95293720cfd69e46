//! Login credential signing

use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Compute the `cred.sig` value for a login
///
/// The service recomputes HMAC-SHA1 keyed by the shared secret over
/// `developer_key + user_id + timestamp` and compares lowercase hex digests,
/// so the concatenation order here is fixed.
pub fn login_signature(secret: &str, developer_key: &str, user_id: &str, timestamp: i64) -> String {
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC takes any key size");
    mac.update(developer_key.as_bytes());
    mac.update(user_id.as_bytes());
    mac.update(timestamp.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_signature() {
        assert_eq!(
            login_signature("s", "k", "u", 1000),
            "50bb63e6e5ca23ae351222d703bd03f13d2fd8d8"
        );
    }

    #[test]
    fn test_realistic_signature() {
        assert_eq!(
            login_signature("top-secret", "dev-key", "42", 1_700_000_000),
            "ebf1665143489ea3c1aaead41d3bef3a4bb5443d"
        );
    }

    #[test]
    fn test_empty_secret_is_accepted() {
        assert_eq!(login_signature("", "k", "u", 1).len(), 40);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_signature_is_deterministic_hex(
            secret in "[a-zA-Z0-9]{0,40}",
            key in "[a-zA-Z0-9]{1,20}",
            user_id in "[a-zA-Z0-9@.]{1,20}",
            ts in 0i64..4_000_000_000i64,
        ) {
            let first = login_signature(&secret, &key, &user_id, ts);
            let second = login_signature(&secret, &key, &user_id, ts);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 40);
            prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }

        #[test]
        fn prop_signature_depends_on_timestamp(
            ts in 0i64..4_000_000_000i64,
        ) {
            prop_assert_ne!(
                login_signature("s", "k", "u", ts),
                login_signature("s", "k", "u", ts + 1)
            );
        }
    }
}
