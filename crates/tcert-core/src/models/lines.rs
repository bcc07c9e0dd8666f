//! Flattened document text in reading order.

use std::ops::Index;

/// Ordered, trimmed, non-empty lines of document text.
///
/// Pages are concatenated in order and lines within a page keep the order
/// reported by the text decoder. Once built the sequence is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Build a sequence from raw text, dropping blank lines.
    pub fn from_text(text: &str) -> Self {
        Self::from_pages([text])
    }

    /// Build a sequence from per-page texts, in page order.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = pages
            .into_iter()
            .flat_map(|page| {
                page.as_ref()
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { lines }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the sequence has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Iterate over `(index, line)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().map(String::as_str).enumerate()
    }

    /// Borrow all lines.
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    /// Collects already-split lines, applying the same trimming rules.
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let lines = iter
            .into_iter()
            .map(Into::into)
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        Self { lines }
    }
}

impl Index<usize> for LineSequence {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.lines[index]
    }
}
