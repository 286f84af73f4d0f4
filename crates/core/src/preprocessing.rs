//! Text preprocessing applied before training and inference

use std::fmt;
use std::sync::Arc;

use tracing::warn;

/// Normalizes raw text.
pub trait TextProcessor: Send + Sync {
    /// Cleaned form of `text`
    fn process(&self, text: &str) -> String;
}

/// Extra transformation applied after the built-in steps
pub type TextFilter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Configurable lowercase / punctuation / digit stripping.
///
/// Steps run in a fixed order: lowercase, drop ASCII punctuation, drop ASCII
/// digits, custom filters in insertion order, trim. Blank input short-circuits
/// to an empty string.
#[derive(Clone)]
pub struct StandardTextProcessor {
    /// Lowercase before any other step
    pub lowercase: bool,
    /// Drop ASCII punctuation
    pub remove_punctuation: bool,
    /// Drop ASCII digits
    pub remove_numbers: bool,
    custom_filters: Vec<TextFilter>,
}

impl StandardTextProcessor {
    /// Default settings: lowercase and strip punctuation
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle lowercasing
    #[must_use]
    pub fn lowercase(mut self, enabled: bool) -> Self {
        self.lowercase = enabled;
        self
    }

    /// Toggle punctuation removal
    #[must_use]
    pub fn remove_punctuation(mut self, enabled: bool) -> Self {
        self.remove_punctuation = enabled;
        self
    }

    /// Toggle digit removal
    #[must_use]
    pub fn remove_numbers(mut self, enabled: bool) -> Self {
        self.remove_numbers = enabled;
        self
    }

    /// Append a custom filter, run after the built-in steps
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.custom_filters.push(Arc::new(filter));
        self
    }
}

impl Default for StandardTextProcessor {
    fn default() -> Self {
        Self {
            lowercase: true,
            remove_punctuation: true,
            remove_numbers: false,
            custom_filters: Vec::new(),
        }
    }
}

impl fmt::Debug for StandardTextProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardTextProcessor")
            .field("lowercase", &self.lowercase)
            .field("remove_punctuation", &self.remove_punctuation)
            .field("remove_numbers", &self.remove_numbers)
            .field("custom_filters", &self.custom_filters.len())
            .finish()
    }
}

impl TextProcessor for StandardTextProcessor {
    fn process(&self, text: &str) -> String {
        if text.trim().is_empty() {
            warn!("Empty text passed to preprocessor");
            return String::new();
        }

        let mut out = if self.lowercase { text.to_lowercase() } else { text.to_string() };
        if self.remove_punctuation {
            out.retain(|c| !c.is_ascii_punctuation());
        }
        if self.remove_numbers {
            out.retain(|c| !c.is_ascii_digit());
        }
        for filter in &self.custom_filters {
            out = filter(&out);
        }
        out.trim().to_string()
    }
}

/// Applies one processor to every text of a batch.
#[derive(Clone)]
pub struct BatchTextProcessor {
    processor: Arc<dyn TextProcessor>,
}

impl BatchTextProcessor {
    /// Batch wrapper around `processor`
    pub fn new(processor: Arc<dyn TextProcessor>) -> Self {
        Self { processor }
    }

    /// Process every text, preserving order
    pub fn process_batch(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|text| self.processor.process(text)).collect()
    }
}

impl Default for BatchTextProcessor {
    fn default() -> Self {
        Self::new(Arc::new(StandardTextProcessor::default()))
    }
}

impl fmt::Debug for BatchTextProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchTextProcessor").finish_non_exhaustive()
    }
}
