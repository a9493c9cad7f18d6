//! Unit Tests for Provider Error Body Parsing
//!
//! UNIT UNDER TEST: parse_error_details
//!
//! BUSINESS RESPONSIBILITY:
//!   - Preserve the provider's native error code so failures can be classified
//!   - Tolerate the envelope variants different vendors use
//!
//! TEST COVERAGE:
//!   - String codes, numeric codes and `type` fallback
//!   - Array-wrapped envelopes
//!   - Non-JSON bodies

use crate::providers::http::parse_error_details;

#[test]
fn test_string_code_is_preserved() {
    // Arrange
    let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;

    // Act
    let details = parse_error_details(body);

    // Assert
    assert_eq!(details.code.as_deref(), Some("invalid_api_key"));
    assert_eq!(details.message.as_deref(), Some("Incorrect API key provided"));
}

#[test]
fn test_type_used_when_code_missing() {
    // Arrange
    let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;

    // Act
    let details = parse_error_details(body);

    // Assert
    assert_eq!(details.code.as_deref(), Some("overloaded_error"));
}

#[test]
fn test_numeric_code_in_array_envelope() {
    // Arrange
    let body = r#"[{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}]"#;

    // Act
    let details = parse_error_details(body);

    // Assert
    assert_eq!(details.code.as_deref(), Some("400"));
    assert_eq!(details.message.as_deref(), Some("API key not valid"));
}

#[test]
fn test_plain_text_body_has_no_details() {
    // Act
    let details = parse_error_details("Service Unavailable");

    // Assert
    assert!(details.code.is_none());
    assert!(details.message.is_none());
}

#[test]
fn test_array_envelope_is_unwrapped_before_typed_parsing() {
    // Test verifies a top-level array is not read as the envelope itself,
    // which would silently drop the inner error object

    // Arrange
    let body = r#"[{"error":{"code":"RESOURCE_EXHAUSTED","message":"Quota exceeded"}}]"#;

    // Act
    let details = parse_error_details(body);

    // Assert
    assert_eq!(details.code.as_deref(), Some("RESOURCE_EXHAUSTED"));
    assert_eq!(details.message.as_deref(), Some("Quota exceeded"));
}

#[test]
fn test_empty_array_body_has_no_details() {
    // Act
    let details = parse_error_details("[]");

    // Assert
    assert!(details.code.is_none());
    assert!(details.message.is_none());
}
