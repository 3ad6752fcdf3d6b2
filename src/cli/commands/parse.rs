//! Parse a snapshot file from disk

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::shared::print_snapshot;
use crate::app::services::fetcher::Snapshot;
use crate::cli::args::ParseArgs;
use crate::{RecordParser, decompress};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read, optionally inflate, and parse a local snapshot
pub async fn run_parse(args: ParseArgs) -> Result<()> {
    let text = read_snapshot_text(&args.file).await?;

    let parser = RecordParser::new(args.parser.to_options());
    let result = parser
        .parse(&text)
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;

    info!(
        "Parsed {} observations from {}",
        result.observations.len(),
        args.file.display()
    );

    let snapshot = Snapshot {
        cycle: 0,
        fetched_at: None,
        observations: result.observations,
        stats: result.stats,
    };
    print_snapshot(&snapshot, &args.output)
}

/// File contents as text, inflating gzip input
async fn read_snapshot_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        tokio::task::spawn_blocking(move || decompress(&bytes))
            .await
            .context("Decompression task failed")?
            .with_context(|| format!("Failed to decompress {}", path.display()))?
    } else {
        bytes
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::TempDir;

    const TEXT: &str = "raw_text,station_id\nKSEA 121853Z,KSEA\n";

    #[tokio::test]
    async fn test_reads_plain_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metars.cache.csv");
        std::fs::write(&path, TEXT).unwrap();

        assert_eq!(read_snapshot_text(&path).await.unwrap(), TEXT);
    }

    #[tokio::test]
    async fn test_inflates_gzip_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metars.cache.csv.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(TEXT.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        assert_eq!(read_snapshot_text(&path).await.unwrap(), TEXT);
    }

    #[tokio::test]
    async fn test_truncated_gzip_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.csv.gz");
        std::fs::write(&path, [0x1f, 0x8b, 0x08]).unwrap();

        assert!(read_snapshot_text(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let error = read_snapshot_text(&temp_dir.path().join("absent.csv"))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("absent.csv"));
    }
}
