//! Generic writer target

use crate::core::{BoxError, Rendered, Target};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes rendered values to any `io::Write`, one line each
///
/// Text and value-tuple renderings are written as lines; byte renderings
/// are written raw with a trailing newline. The writer sits behind a mutex
/// so a single target can be shared by loggers on multiple threads.
pub struct WriteTarget<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriteTarget<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl WriteTarget<BufWriter<File>> {
    /// Open (or create) a file in append mode
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> Target for WriteTarget<W> {
    fn write(&self, rendered: &Rendered) -> std::result::Result<(), BoxError> {
        let mut writer = self.writer.lock();
        match rendered {
            Rendered::Bytes(bytes) => {
                writer.write_all(bytes)?;
                writer.write_all(b"\n")?;
            }
            other => writeln!(writer, "{}", other)?,
        }
        Ok(())
    }

    fn flush(&self) -> std::result::Result<(), BoxError> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "write"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_lines() {
        let target = WriteTarget::new(Vec::new());
        target.write(&Rendered::Text("first".to_string())).unwrap();
        target.write(&Rendered::Bytes(b"second".to_vec())).unwrap();

        let written = String::from_utf8(target.writer.into_inner()).unwrap();
        assert_eq!(written, "first\nsecond\n");
    }
}
