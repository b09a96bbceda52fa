//! Where rendered results go.

use std::sync::Mutex;

/// Accepts rendered text. May be called from any pool thread.
pub trait Sink: Send + Sync {
    fn display(&self, text: &str);
}

/// Prints to stdout, tagged with the id of the thread that printed.
pub struct Console;

impl Sink for Console {
    fn display(&self, text: &str) {
        println!("[{:?}] {}", std::thread::current().id(), text.trim_end());
    }
}

/// Keeps everything it is given. Useful for tests and for callers that want
/// to render results themselves.
#[derive(Default)]
pub struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Sink for Recorder {
    fn display(&self, text: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());
    }
}
