//! Shared helpers for integration tests.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

/// Write `contents` to a temporary `.toml` file. The file is removed on drop.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("coilmq-")
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Poll `condition` until it holds or `timeout` elapses.
#[allow(dead_code)]
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
