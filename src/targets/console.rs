//! Console output target

use crate::core::{BoxError, Rendered, Target};
use std::io::Write;

/// Writes rendered values to stdout or stderr, one line each
pub struct ConsoleTarget {
    use_stderr: bool,
}

impl ConsoleTarget {
    /// Write to stdout
    pub fn new() -> Self {
        Self { use_stderr: false }
    }

    /// Write to stderr
    pub fn stderr() -> Self {
        Self { use_stderr: true }
    }
}

impl Default for ConsoleTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl Target for ConsoleTarget {
    fn write(&self, rendered: &Rendered) -> std::result::Result<(), BoxError> {
        if self.use_stderr {
            eprintln!("{}", rendered);
        } else {
            println!("{}", rendered);
        }
        Ok(())
    }

    fn flush(&self) -> std::result::Result<(), BoxError> {
        if self.use_stderr {
            std::io::stderr().flush()?;
        } else {
            std::io::stdout().flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        if self.use_stderr {
            "console-stderr"
        } else {
            "console"
        }
    }
}
