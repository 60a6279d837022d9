#![allow(dead_code)]

use std::sync::OnceLock;

use mixtape_common::observability::{LogConfig, LogFormat};
use wiremock::MockServer;

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "mixtape-tests",
            log_dir: Some(std::env::temp_dir().join("mixtape-tests")),
            emit_stderr: true,
            format: if std::env::var("MIXTAPE_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug",
        };

        mixtape_common::observability::init_logging(config).unwrap_or_default()
    });
}

pub async fn received(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|reqs| reqs.len())
        .unwrap_or_default()
}
