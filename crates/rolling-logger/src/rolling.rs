//! Size-capped log file set
//!
//! Writes go to `<name>.log`. When the next write would push it past
//! `max_bytes`, every file shifts down one slot (`<name>.log` becomes
//! `<name>.1.log`, and so on) and the oldest slot is dropped, so the
//! directory never holds more than `max_files` log files.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

/// The active log file plus its rotation bookkeeping
pub struct RollingFile {
    dir: PathBuf,
    name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    /// Open (or append to) `<dir>/<name>.log`, creating `dir` if needed
    pub fn open(dir: &Path, name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = slot_path(dir, name, 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir: dir.to_path_buf(),
            name: name.to_string(),
            max_bytes: max_bytes.max(1),
            max_files: max_files.max(1),
            file,
            written,
        })
    }

    /// Path of the file currently being written
    pub fn path(&self) -> PathBuf {
        slot_path(&self.dir, &self.name, 0)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = slot_path(&self.dir, &self.name, self.max_files - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for slot in (0..self.max_files - 1).rev() {
            let from = slot_path(&self.dir, &self.name, slot);
            if from.exists() {
                fs::rename(&from, slot_path(&self.dir, &self.name, slot + 1))?;
            }
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path())?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn slot_path(dir: &Path, name: &str, slot: usize) -> PathBuf {
    if slot == 0 {
        dir.join(format!("{}.log", name))
    } else {
        dir.join(format!("{}.{}.log", name, slot))
    }
}

/// Shareable `MakeWriter` over a [`RollingFile`]
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingWriter {
    pub fn new(file: RollingFile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(file)),
        }
    }
}

/// Per-event writer handed out by [`RollingWriter`]
pub struct RollingHandle {
    inner: Arc<Mutex<RollingFile>>,
}

impl Write for RollingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RollingHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_writes_to_base_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 1024, 3).unwrap();
        file.write_all(b"hello\n").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "hello\n");
    }

    #[test]
    fn test_rotates_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 10, 3).unwrap();
        file.write_all(b"aaaaaaaa\n").unwrap();
        file.write_all(b"bbbbbbbb\n").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "bbbbbbbb\n");
        assert_eq!(fs::read_to_string(dir.path().join("app.1.log")).unwrap(), "aaaaaaaa\n");
    }

    #[test]
    fn test_never_exceeds_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 4, 3).unwrap();
        for line in [b"one\n", b"two\n", b"thr\n", b"fou\n", b"fiv\n"] {
            file.write_all(line).unwrap();
        }
        file.flush().unwrap();

        assert_eq!(log_files(dir.path()), vec!["app.1.log", "app.2.log", "app.log"]);
        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "fiv\n");
        assert_eq!(fs::read_to_string(dir.path().join("app.2.log")).unwrap(), "thr\n");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut file = RollingFile::open(dir.path(), "app", 1024, 2).unwrap();
            file.write_all(b"first\n").unwrap();
        }
        let mut file = RollingFile::open(dir.path(), "app", 1024, 2).unwrap();
        file.write_all(b"second\n").unwrap();
        file.flush().unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("app.log")).unwrap(),
            "first\nsecond\n"
        );
    }
}
