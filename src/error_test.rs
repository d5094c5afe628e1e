use super::*;

#[test]
fn error_codes_are_stable() {
    assert_eq!(AuthError::Transport("x".into()).error_code(), "E_TRANSPORT");
    assert_eq!(AuthError::Parse("x".into()).error_code(), "E_PARSE");
    assert_eq!(AuthError::Config("x".into()).error_code(), "E_CONFIG");
    assert_eq!(AuthError::HttpClientBuild("x".into()).error_code(), "E_HTTP_CLIENT_BUILD");
}

#[test]
fn display_includes_detail() {
    let err = AuthError::Parse("expected value at line 1".into());
    assert_eq!(err.to_string(), "response parse failed: expected value at line 1");
}
