//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};

pub mod analyze;
pub mod compose;
pub mod info;
pub mod keywords;
pub mod readability;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read all of `reader`, refusing more than `max_bytes`.
pub fn read_input_stream(reader: impl Read, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            let read = reader
                .take(max as u64 + 1)
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            if read > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut reader = reader;
            reader
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

/// Read the command input: `path`, or stdin when it is absent or `-`.
///
/// Returns the text and a label naming where it came from.
pub fn read_input(
    path: Option<&Utf8PathBuf>,
    max_bytes: Option<usize>,
) -> anyhow::Result<(String, String)> {
    match path {
        Some(path) if path.as_str() != "-" => {
            Ok((read_input_file(path, max_bytes)?, path.to_string()))
        }
        _ => Ok((
            read_input_stream(std::io::stdin().lock(), max_bytes)?,
            "<stdin>".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_within_limit_is_read() {
        let text = read_input_stream("hello world".as_bytes(), Some(11)).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn stream_over_limit_is_rejected() {
        let err = read_input_stream("hello world".as_bytes(), Some(5)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn unlimited_stream_reads_everything() {
        let text = read_input_stream("a b c".as_bytes(), None).unwrap();
        assert_eq!(text, "a b c");
    }

    #[test]
    fn file_over_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().join("big.txt")).unwrap();
        std::fs::write(&path, "x".repeat(64)).unwrap();
        let err = read_input_file(&path, Some(10)).unwrap_err();
        assert!(err.to_string().contains("limit: 10 bytes"));
        assert_eq!(read_input_file(&path, None).unwrap().len(), 64);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_input_file(Utf8Path::new("/no/such/file.txt"), None).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.txt"));
    }
}
