//! Shared helpers for `textops-infra` integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use textops_domain::Label;
use tracing_subscriber::fmt::MakeWriter;

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Twelve short reviews, six per class, with disjoint sentiment words.
pub fn sentiment_corpus() -> (Vec<String>, Vec<Label>) {
    let texts = strings(&[
        "I love this movie, it was wonderful and great",
        "What a great experience, truly excellent service",
        "Absolutely fantastic, I love it",
        "The food was delicious and the staff were wonderful",
        "Excellent quality, great value, very happy",
        "A wonderful and happy day, I love everything",
        "I hate this movie, it was terrible and awful",
        "What a bad experience, truly horrible service",
        "Absolutely awful, I hate it",
        "The food was disgusting and the staff were rude",
        "Poor quality, bad value, very unhappy",
        "A terrible and sad day, I hate everything",
    ]);
    let labels = [[Label::Positive; 6], [Label::Negative; 6]].concat();
    (texts, labels)
}

/// Unseen texts built from the corpus' sentiment words
pub fn held_out() -> (Vec<String>, Vec<Label>) {
    (
        strings(&["great and wonderful, I love it", "awful and terrible, I hate it"]),
        vec![Label::Positive, Label::Negative],
    )
}

/// A text far longer than anything in the corpus
pub fn essay() -> String {
    "word ".repeat(200)
}

/// In-memory sink for formatted `tracing` output.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.contents().lines().any(|line| line.contains(level) && line.contains(needle))
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber writing into the returned buffer.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogBuffer) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, buffer)
}
