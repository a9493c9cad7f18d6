//! End-to-End Tests for a Poll Run
//!
//! UNIT UNDER TEST: Orchestrator + DispatcherSet + FileStore
//!
//! BUSINESS RESPONSIBILITY:
//!   - One run polls every target and writes one record per target
//!   - A missing key or failing provider does not stop the other targets
//!   - A second run the same day skips successes and retries failures
//!
//! TEST COVERAGE:
//!   - Success, missing credential and 503 in the same run
//!   - Records on disk with the expected codes
//!   - Recency gate across consecutive runs

use llm_poller::{
    codes, DispatcherSet, FileStore, Orchestrator, PollerConfig, Provider, ProviderTarget,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::*;

fn config(logs_dir: &Path) -> PollerConfig {
    PollerConfig {
        logs_dir: logs_dir.to_path_buf(),
        request_timeout: Duration::from_secs(5),
        ..PollerConfig::default()
    }
}

fn targets(base: &str) -> Vec<ProviderTarget> {
    vec![
        create_target(Provider::Xai, "grok-2-1212", "xai-test-key-12345", &format!("{base}/xai")),
        create_target(Provider::OpenAI, "gpt-4o", "", &format!("{base}/openai")),
        create_target(
            Provider::Gemini,
            "gemini-2.0-flash",
            "gemini-test-key-67890",
            &format!("{base}/gemini"),
        ),
    ]
}

fn record_files(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files
}

async fn mount_providers(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/xai/chat/completions"))
        .respond_with(chat_completion_response("I am Grok."))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/openai/chat/completions"))
        .respond_with(chat_completion_response("should never be called"))
        .expect(0)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/gemini/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(2)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_mixed_run_writes_one_record_per_target() {
    // Arrange
    let server = MockServer::start().await;
    mount_providers(&server).await;
    let logs = tempfile::tempdir().unwrap();
    let config = config(logs.path());
    let orchestrator = Orchestrator::new(
        Arc::new(FileStore::from_config(&config)),
        DispatcherSet::from_config(&config).unwrap(),
    );
    let targets = targets(&server.uri());

    // Act
    let report = orchestrator.run_all(&targets).await;

    // Assert
    assert!(report.is_clean());
    assert_eq!(report.results.len(), 3);
    assert!(report.results[0].is_success());
    assert_eq!(report.results[0].outputs[0].content, "I am Grok.");
    assert_eq!(report.results[1].error_code(), Some(codes::NO_API_KEY));
    assert_eq!(report.results[2].error_code(), Some(codes::API_ERROR));

    let files = record_files(logs.path());
    assert_eq!(files.len(), 3);
    for file in &files {
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap();
        let raw = json.to_string();
        assert!(!raw.contains("xai-test-key-12345"), "full key leaked in {file:?}");
        assert!(!raw.contains("gemini-test-key-67890"), "full key leaked in {file:?}");
        assert_eq!(json["hash"].as_str().map(str::len), Some(64));
    }

    // Second run: only the failures are retried
    let second = orchestrator.run_all(&targets).await;
    assert_eq!(second.skipped, vec![(Provider::Xai, "grok-2-1212".to_string())]);
    assert_eq!(second.results.len(), 2);
    assert_eq!(record_files(logs.path()).len(), 3, "same-day records are overwritten");
}
