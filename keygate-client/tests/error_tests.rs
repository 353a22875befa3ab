use keygate_client::{ClientError, CODE_NETWORK, CODE_PROTOCOL};

#[test]
fn classification_follows_the_code_table() {
    assert!(matches!(
        ClientError::classify(400, "bad request"),
        ClientError::Protocol { code: 400, .. }
    ));
    assert!(matches!(
        ClientError::classify(401, "token expired"),
        ClientError::Authentication { .. }
    ));
    assert!(matches!(
        ClientError::classify(403, "unbind disabled"),
        ClientError::FeatureDisabled { .. }
    ));
    assert!(matches!(
        ClientError::classify(404, "not bound"),
        ClientError::NotFound { .. }
    ));
    assert!(matches!(
        ClientError::classify(429, "cooldown"),
        ClientError::CooldownActive { .. }
    ));
    for code in [500, 502, 503, 504] {
        assert!(
            ClientError::classify(code, "server error").is_transient(),
            "code {code}"
        );
    }
}

#[test]
fn gateway_sentinels_classify() {
    assert!(ClientError::classify(CODE_NETWORK, "unreachable").is_transient());
    assert!(matches!(
        ClientError::classify(CODE_PROTOCOL, "garbled"),
        ClientError::Protocol { .. }
    ));
}

#[test]
fn classification_is_total() {
    // Codes outside the table never panic; they land in Unknown.
    for code in [-1, 1, 42, 200, 302, 418, 499, 600, i32::MAX, i32::MIN] {
        let err = ClientError::classify(code, "mystery");
        assert!(matches!(err, ClientError::Unknown { .. }), "code {code}");
        assert_eq!(err.code(), code);
    }
}

#[test]
fn code_accessor_preserves_the_raw_outcome() {
    assert_eq!(ClientError::classify(401, "x").code(), 401);
    assert_eq!(ClientError::classify(429, "x").code(), 429);
    assert_eq!(ClientError::configuration("bad scheme").code(), 0);
}

#[test]
fn predicates_are_exclusive() {
    let auth = ClientError::classify(401, "x");
    assert!(auth.is_authentication());
    assert!(!auth.is_transient());

    let transient = ClientError::classify(503, "x");
    assert!(transient.is_transient());
    assert!(!transient.is_authentication());
}

#[test]
fn display_carries_message_and_code() {
    let err = ClientError::classify(401, "token expired");
    let text = err.to_string();
    assert!(text.contains("token expired"));
    assert!(text.contains("401"));
}
