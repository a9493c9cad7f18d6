// Test modules for llm-poller crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Shared fixtures
pub mod helpers;

pub mod error;

// NOTE: HTTP round trips against a mock server live in llm-poller/tests/
