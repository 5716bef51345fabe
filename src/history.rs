use chrono::Local;
use directories::ProjectDirs;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// One row in the burst history log, appended when a countdown fires.
#[derive(Debug, Serialize)]
pub struct BurstRecord {
    pub date: String,
    pub duration_secs: u64,
    pub words: usize,
    pub wpm: usize,
}

impl BurstRecord {
    pub fn new(duration_secs: u64, words: usize, wpm: usize) -> Self {
        Self {
            date: Local::now().format("%c").to_string(),
            duration_secs,
            words,
            wpm,
        }
    }
}

/// `log.csv` under the burst config directory, when one can be resolved.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "burst").map(|proj_dirs| proj_dirs.config_dir().join("log.csv"))
}

/// Append one record, creating the file (and its header) on first use.
pub fn append(path: &Path, record: &BurstRecord) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let needs_header = !path.exists();

    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");

        append(&path, &BurstRecord::new(60, 3, 3)).unwrap();
        append(&path, &BurstRecord::new(30, 5, 10)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "date,duration_secs,words,wpm");
        assert!(lines[1].ends_with(",60,3,3"));
        assert!(lines[2].ends_with(",30,5,10"));
    }

    #[test]
    fn append_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("log.csv");

        append(&path, &BurstRecord::new(60, 0, 0)).unwrap();
        assert!(path.exists());
    }
}
