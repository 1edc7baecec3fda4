use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

/// Reads up to `max_count` lines (all remaining lines when `max_count` is 0)
/// starting at 0-based line `start_offset`. Skipped lines are not decoded.
pub fn read_window<R: BufRead>(reader: R, max_count: usize, start_offset: usize) -> io::Result<Vec<String>> {
    let limit = if max_count == 0 { usize::MAX } else { max_count };
    reader.lines().skip(start_offset).take(limit).collect()
}

/// File-backed [`read_window`]. Any failure is logged and degrades to an
/// empty result, which callers treat as "no dataset available".
pub fn load_window<P: AsRef<Path>>(path: P, max_count: usize, start_offset: usize) -> Vec<String> {
    let path = path.as_ref();

    let lines = File::open(path).and_then(|file| read_window(BufReader::new(file), max_count, start_offset));

    match lines {
        Ok(lines) => {
            info!(path = %path.display(), lines = lines.len(), "read dataset window");
            lines
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "dataset file not found");
            Vec::new()
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!(path = %path.display(), "no permission to read dataset file");
            Vec::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read dataset file");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FIVE: &str = "l0\nl1\nl2\nl3\nl4\n";

    #[test]
    fn bounded_window_returns_exact_slice() {
        let lines = read_window(Cursor::new(FIVE), 3, 1).unwrap();
        assert_eq!(lines, vec!["l1", "l2", "l3"]);
    }

    #[test]
    fn zero_count_reads_to_end() {
        let lines = read_window(Cursor::new(FIVE), 0, 2).unwrap();
        assert_eq!(lines, vec!["l2", "l3", "l4"]);
    }

    #[test]
    fn offset_past_end_is_empty() {
        assert!(read_window(Cursor::new(FIVE), 0, 10).unwrap().is_empty());
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        assert!(load_window("/definitely/not/here.csv", 0, 0).is_empty());
    }
}
