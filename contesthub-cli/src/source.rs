//! Where contest snapshots come from.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use contesthub_core::Snapshot;
use contesthub_core::config::ContestHubConfig;
use owo_colors::OwoColorize;

/// The snapshot file to use: `--file` if given, else the configured one.
pub fn snapshot_path(file: Option<&Path>, config: &ContestHubConfig) -> PathBuf {
    file.map(Path::to_path_buf)
        .unwrap_or_else(|| config.contests_path())
}

pub fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Read and decode a snapshot. Rejected records are reported on stderr.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let json = if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Could not read contests from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Could not read contests from {}", path.display()))?
    };

    let snapshot = Snapshot::decode(&json)
        .with_context(|| format!("Could not decode contests from {}", path.display()))?;

    for rejected in &snapshot.rejected {
        eprintln!("{} {}", "warning:".yellow(), rejected);
    }

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_snapshot_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contests.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "platform": "HackerEarth", "title": "Circuits",
                 "url": "https://www.hackerearth.com/challenges/",
                 "start_time": "2025-01-10T10:00:00Z", "duration": 864000}]"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.contests.len(), 1);
        assert!(snapshot.rejected.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Could not read contests"), "Got: {}", err);
    }

    #[test]
    fn test_explicit_file_wins_over_config() {
        let config = ContestHubConfig::default();
        assert_eq!(snapshot_path(Some(Path::new("-")), &config), PathBuf::from("-"));
        assert_eq!(snapshot_path(None, &config), config.contests_path());
    }
}
