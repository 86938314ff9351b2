use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

const RECORD_DELIMITER: &str = "--------------------";

/// The outcome of one finished run.
#[derive(Clone, Debug)]
pub struct ScoreRecord {
    pub finished_at: DateTime<Local>,
    pub score: u32,
}

impl ScoreRecord {
    pub fn now(score: u32) -> Self {
        ScoreRecord { finished_at: Local::now(), score }
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Finished at: {}", self.finished_at.format("%Y-%m-%dT%H:%M:%S"))?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "{}", RECORD_DELIMITER)
    }
}

/// Append-only, human readable score file. The program never reads it back.
pub struct ScoreLog {
    path: PathBuf,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ScoreRecord) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(record.to_string().as_bytes())?;
        file.flush()
    }
}
