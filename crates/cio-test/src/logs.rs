//! Capture formatted log output in tests.

use std::io::Write;
use std::sync::{Arc, Mutex};

use cio_telemetry::{LogConfig, build_subscriber};
use tracing_subscriber::fmt::MakeWriter;

/// Shared in-memory sink for a formatting subscriber.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.buffer.lock().expect("lock poisoned").clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .expect("lock poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` under a subscriber built from `config` and return what it logged.
///
/// # Panics
///
/// Panics if `config` does not produce a valid filter.
pub fn capture_logs(config: &LogConfig, f: impl FnOnce()) -> String {
    let capture = LogCapture::new();
    let subscriber =
        build_subscriber(&config.clone().without_ansi(), capture.clone()).expect("valid log config");
    tracing::subscriber::with_default(subscriber, f);
    capture.contents()
}
