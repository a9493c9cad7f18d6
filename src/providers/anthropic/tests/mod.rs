//! Tests for the Anthropic dispatcher
//!
//! Request construction and response normalization live here; HTTP behaviour
//! is covered by `tests/anthropic_dispatcher_integration_tests.rs`.
