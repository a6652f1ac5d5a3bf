//! JSONL file I/O for issues.
//!
//! Each line of the file is one complete `Issue`. Files stay
//! git-diffable and hand-inspectable; saves are atomic
//! (write-to-temp + rename).

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::model::Issue;

/// Load issues from a JSONL file. Blank lines are skipped.
///
/// # Errors
///
/// Returns `FileNotFound` or `Io` if the file cannot be read, or
/// `JsonlParse` (with a 1-based line number) if any line is invalid.
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EngineError::FileNotFound(path.to_path_buf())
        } else {
            EngineError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut issues = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let issue: Issue = serde_json::from_str(trimmed).map_err(|e| EngineError::JsonlParse {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        issues.push(issue);
    }

    Ok(issues)
}

/// Save issues to a JSONL file with atomic write.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written, or `Json` if an issue
/// fails to serialize.
pub fn save(path: &Path, issues: &[Issue]) -> Result<()> {
    let tmp_path = path.with_extension("jsonl.tmp");
    let mut file = fs::File::create(&tmp_path)?;

    for issue in issues {
        let json = serde_json::to_string(issue)?;
        writeln!(file, "{json}")?;
    }

    file.flush()?;
    drop(file);

    fs::rename(&tmp_path, path)?;

    Ok(())
}
