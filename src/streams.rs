/// Output sinks for the views
///
/// A view writes to two streams: the standard stream for results and the
/// diagnostic stream for errors and usage hints. Each sink sits behind its
/// own lock so lines written from concurrent hooks never interleave.
use log::debug;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex};

type Sink = Mutex<Box<dyn Write + Send>>;

pub struct Streams {
    stdout: Sink,
    stderr: Sink,
    stdout_is_terminal: bool,
}

impl Streams {
    /// Streams attached to the process stdout and stderr
    pub fn stdio() -> Self {
        Self {
            stdout: Mutex::new(Box::new(io::stdout())),
            stderr: Mutex::new(Box::new(io::stderr())),
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    /// Streams writing to arbitrary destinations (files, buffers)
    pub fn from_writers(stdout: Box<dyn Write + Send>, stderr: Box<dyn Write + Send>) -> Self {
        Self { stdout: Mutex::new(stdout), stderr: Mutex::new(stderr), stdout_is_terminal: false }
    }

    /// In-memory streams plus a handle to read back what was written
    pub fn for_testing() -> (Self, Captured) {
        let captured = Captured::default();
        let streams = Self::from_writers(
            Box::new(SharedBuffer(Arc::clone(&captured.stdout))),
            Box::new(SharedBuffer(Arc::clone(&captured.stderr))),
        );
        (streams, captured)
    }

    pub fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }

    pub fn write_stdout(&self, text: &str) {
        write_locked(&self.stdout, text, "stdout");
    }

    pub fn write_stderr(&self, text: &str) {
        write_locked(&self.stderr, text, "stderr");
    }
}

/// Write a whole chunk while holding the sink lock; failures are dropped
fn write_locked(sink: &Sink, text: &str, name: &str) {
    let mut guard = match sink.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Err(e) = guard.write_all(text.as_bytes()).and_then(|_| guard.flush()) {
        debug!("Dropping {} bytes written to {}: {}", text.len(), name, e);
    }
}

/// Read side of the in-memory streams returned by `Streams::for_testing`
#[derive(Clone, Default)]
pub struct Captured {
    stdout: Arc<Mutex<Vec<u8>>>,
    stderr: Arc<Mutex<Vec<u8>>>,
}

impl Captured {
    pub fn stdout(&self) -> String {
        read_buffer(&self.stdout)
    }

    pub fn stderr(&self) -> String {
        read_buffer(&self.stderr)
    }
}

fn read_buffer(buffer: &Mutex<Vec<u8>>) -> String {
    let guard = match buffer.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    String::from_utf8_lossy(&guard).into_owned()
}

struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.0.lock().map_err(|_| io::Error::other("capture buffer poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
