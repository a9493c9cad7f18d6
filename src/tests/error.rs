// Unit Tests for Poller Error Handling
//
// UNIT UNDER TEST: PollError
//
// BUSINESS RESPONSIBILITY:
//   - Categorizes failures for routing and alerting
//   - Maps every dispatch failure onto a recorded classification code
//   - Preserves provider-native error codes verbatim
//   - Automatically logs errors at creation with structured context
//
// TEST COVERAGE:
//   - Category and severity assignment per variant
//   - Classification fallback to API_ERROR
//   - Native code pass-through for request, auth and rate-limit errors
//   - Display messages carry the useful context

use crate::error::{codes, ErrorCategory, ErrorSeverity, PollError};
use std::path::PathBuf;

#[cfg(test)]
mod poll_error_categorization_tests {
    use super::*;

    #[test]
    fn test_unsupported_provider_error_categorization() {
        // Arrange & Act
        let error = PollError::unsupported_provider("mistral");

        // Assert
        assert_eq!(error.category(), ErrorCategory::Client);
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.to_string(), "Provider not supported: mistral");
    }

    #[test]
    fn test_configuration_error_categorization() {
        // Arrange & Act
        let error = PollError::configuration_error("POLLER_RECENCY_HOURS must be a number");

        // Assert
        assert_eq!(error.category(), ErrorCategory::Client);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_request_failed_error_categorization() {
        // Arrange & Act
        let error = PollError::request_failed("API error 500: boom", None, None);

        // Assert
        assert_eq!(error.category(), ErrorCategory::External);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_transient_errors_are_warnings() {
        // Test verifies rate limits and timeouts are logged below error level

        // Arrange & Act
        let rate_limited = PollError::rate_limit_exceeded(30, None);
        let timed_out = PollError::timeout(120);

        // Assert
        assert_eq!(rate_limited.category(), ErrorCategory::Transient);
        assert_eq!(rate_limited.severity(), ErrorSeverity::Warning);
        assert_eq!(timed_out.category(), ErrorCategory::Transient);
        assert_eq!(timed_out.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_storage_error_is_internal() {
        // Arrange
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");

        // Act
        let error = PollError::storage(PathBuf::from("/logs/xai"), io);

        // Assert
        assert_eq!(error.category(), ErrorCategory::Internal);
        assert!(error.to_string().contains("/logs/xai"));
        assert!(error.to_string().contains("denied"));
    }
}

#[cfg(test)]
mod poll_error_classification_tests {
    use super::*;

    #[test]
    fn test_errors_without_native_code_classify_as_api_error() {
        // Arrange
        let errors = [
            PollError::request_failed("connection refused", None, None),
            PollError::response_parsing_error("Invalid response: EOF"),
            PollError::timeout(5),
            PollError::unsupported_provider("mistral"),
        ];

        // Act & Assert
        for error in &errors {
            assert_eq!(error.code(), None);
            assert_eq!(error.classification(), codes::API_ERROR, "{error}");
        }
    }

    #[test]
    fn test_native_codes_pass_through() {
        // Test verifies provider codes are recorded verbatim, not remapped

        // Arrange
        let request = PollError::request_failed(
            "API error 400: context too long",
            Some("context_length_exceeded".to_string()),
            None,
        );
        let auth = PollError::authentication_failed(
            "API error 401: bad key",
            Some("invalid_api_key".to_string()),
        );
        let rate = PollError::rate_limit_exceeded(60, Some("rate_limit_exceeded".to_string()));

        // Act & Assert
        assert_eq!(request.classification(), "context_length_exceeded");
        assert_eq!(auth.classification(), "invalid_api_key");
        assert_eq!(rate.classification(), "rate_limit_exceeded");
    }

    #[test]
    fn test_request_failed_keeps_source() {
        // Arrange
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");

        // Act
        let error = PollError::request_failed("network down", None, Some(Box::new(source)));

        // Assert
        assert!(std::error::Error::source(&error).is_some());
    }
}
