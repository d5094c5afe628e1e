use super::*;

fn parse(json: &str) -> SessionResponse {
    serde_json::from_str(json).unwrap()
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn anonymous_has_no_fields() {
    let identity = Identity::anonymous();
    assert!(identity.email.is_none());
    assert!(identity.name.is_none());
    assert!(!identity.is_authenticated());
    assert_eq!(identity, Identity::default());
}

#[test]
fn anonymous_serializes_to_empty_object() {
    assert_eq!(serde_json::to_string(&Identity::anonymous()).unwrap(), "{}");
}

#[test]
fn authenticated_serializes_both_fields() {
    let json = serde_json::to_value(Identity::authenticated("a@b.com", "A")).unwrap();
    assert_eq!(json, serde_json::json!({ "email": "a@b.com", "name": "A" }));
}

// =============================================================================
// SessionResponse parsing
// =============================================================================

#[test]
fn response_accepts_missing_fields() {
    assert_eq!(parse("{}"), SessionResponse::default());
}

#[test]
fn response_ignores_unknown_fields() {
    let response = parse(r#"{"email":"a@b.com","name":"A","id":7}"#);
    assert_eq!(response.email.as_deref(), Some("a@b.com"));
}

#[test]
fn response_rejects_non_string_email() {
    assert!(serde_json::from_str::<SessionResponse>(r#"{"email":42}"#).is_err());
}

// =============================================================================
// identity_from_response
// =============================================================================

#[test]
fn null_email_is_anonymous_for_every_sentinel() {
    let response = parse(r#"{"email":null,"name":null}"#);
    for sentinel in [SessionSentinel::Null, SessionSentinel::Empty, SessionSentinel::NullOrEmpty] {
        assert_eq!(identity_from_response(&response, sentinel), Identity::anonymous(), "{sentinel:?}");
    }
}

#[test]
fn real_email_is_authenticated_for_every_sentinel() {
    let response = parse(r#"{"email":"a@b.com","name":"A"}"#);
    for sentinel in [SessionSentinel::Null, SessionSentinel::Empty, SessionSentinel::NullOrEmpty] {
        assert_eq!(identity_from_response(&response, sentinel), Identity::authenticated("a@b.com", "A"));
    }
}

#[test]
fn empty_email_depends_on_sentinel() {
    let response = parse(r#"{"email":"","name":""}"#);
    assert_eq!(identity_from_response(&response, SessionSentinel::Empty), Identity::anonymous());
    assert_eq!(identity_from_response(&response, SessionSentinel::NullOrEmpty), Identity::anonymous());
    assert_eq!(identity_from_response(&response, SessionSentinel::Null), Identity::authenticated("", ""));
}

#[test]
fn authenticated_flag_overrides_email() {
    let response = parse(r#"{"email":"a@b.com","name":"A","authenticated":false}"#);
    assert_eq!(identity_from_response(&response, SessionSentinel::Null), Identity::anonymous());

    let response = parse(r#"{"email":"","name":"","authenticated":true}"#);
    assert_eq!(identity_from_response(&response, SessionSentinel::NullOrEmpty), Identity::authenticated("", ""));
}

#[test]
fn authenticated_flag_without_email_is_anonymous() {
    let response = parse(r#"{"authenticated":true,"name":"A"}"#);
    for sentinel in [SessionSentinel::Null, SessionSentinel::Empty, SessionSentinel::NullOrEmpty] {
        let identity = identity_from_response(&response, sentinel);
        assert_eq!(identity, Identity::anonymous(), "{sentinel:?}");
        assert!(!identity.is_authenticated());
    }
}

#[test]
fn authenticated_flag_with_null_email_is_anonymous() {
    let response = parse(r#"{"authenticated":true,"email":null,"name":"A"}"#);
    assert_eq!(identity_from_response(&response, SessionSentinel::Null), Identity::anonymous());
}

// =============================================================================
// SessionSentinel parsing
// =============================================================================

#[test]
fn sentinel_parses_known_names() {
    assert_eq!("null".parse::<SessionSentinel>().unwrap(), SessionSentinel::Null);
    assert_eq!("Empty".parse::<SessionSentinel>().unwrap(), SessionSentinel::Empty);
    assert_eq!(" null-or-empty ".parse::<SessionSentinel>().unwrap(), SessionSentinel::NullOrEmpty);
    assert_eq!("null_or_empty".parse::<SessionSentinel>().unwrap(), SessionSentinel::NullOrEmpty);
}

#[test]
fn sentinel_rejects_unknown_name() {
    let err = "undefined".parse::<SessionSentinel>().unwrap_err();
    assert!(matches!(err, AuthError::Config(_)));
    assert!(err.to_string().contains("unknown session sentinel"));
}

#[test]
fn sentinel_defaults_to_null_or_empty() {
    assert_eq!(SessionSentinel::default(), SessionSentinel::NullOrEmpty);
}
