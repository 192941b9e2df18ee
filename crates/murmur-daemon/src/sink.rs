// crates/murmur-daemon/src/sink.rs
//
// Append-only trust log: one file per node, one timestamped dump of the
// full trust table per closed round. Human-readable; not a stable format.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

use murmur_core::{MurmurError, TrustSink, TrustSnapshot};

/// File-backed TrustSink implementation.
#[derive(Debug, Clone)]
pub struct FileTrustSink {
    path: PathBuf,
}

impl FileTrustSink {
    /// Create a sink appending to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TrustSink for FileTrustSink {
    async fn record(&self, snapshot: &TrustSnapshot) -> Result<(), MurmurError> {
        let entry = format_snapshot(Utc::now(), snapshot);
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        Ok(())
    }
}

/// Render one log entry: a timestamped header, one `host:port: score`
/// line per peer, and a trailing blank line.
pub fn format_snapshot(taken_at: DateTime<Utc>, snapshot: &TrustSnapshot) -> String {
    let mut out = format!("Trust Scores at {}:\n", taken_at.format("%Y-%m-%d %H:%M:%S"));
    for (peer, score) in &snapshot.scores {
        out.push_str(&format!("{}: {:.1}\n", peer, score));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use murmur_core::PeerAddr;
    use uuid::Uuid;

    fn snapshot() -> TrustSnapshot {
        TrustSnapshot {
            scores: vec![
                (PeerAddr::new("10.0.0.2", 8000), 1.0),
                (PeerAddr::new("10.0.0.3", 8000), 0.8),
            ],
        }
    }

    #[test]
    fn entry_format_is_stable() {
        let taken_at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let entry = format_snapshot(taken_at, &snapshot());
        assert_eq!(
            entry,
            "Trust Scores at 2026-08-06 12:00:00:\n\
             10.0.0.2:8000: 1.0\n\
             10.0.0.3:8000: 0.8\n\n"
        );
    }

    #[tokio::test]
    async fn record_appends_entries() {
        let path = std::env::temp_dir().join(format!("murmur_sink_{}.log", Uuid::new_v4()));
        let sink = FileTrustSink::new(&path);

        sink.record(&snapshot()).await.unwrap();
        sink.record(&snapshot()).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.matches("Trust Scores at").count(), 2);
        assert!(contents.contains("10.0.0.3:8000: 0.8"));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
