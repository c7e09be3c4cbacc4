// src/reports/document.rs
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Text of one PDF page as produced by the external text extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page_number: u32,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub raw_text: String,
}

/// Extracted text of a whole report: the input boundary of the crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    #[serde(default)]
    pub full_text: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl ExtractedDocument {
    /// Builds a document from plain text, splitting pages on form feeds
    /// (the convention of command-line PDF text dumpers).
    pub fn from_text(text: &str) -> Self {
        let pages = text
            .split('\u{000C}')
            .enumerate()
            .map(|(idx, raw)| Page {
                page_number: idx as u32 + 1,
                lines: raw.lines().map(str::to_string).collect(),
                raw_text: raw.to_string(),
            })
            .collect();

        Self {
            full_text: text.to_string(),
            pages,
        }
    }

    /// Full document text, falling back to the joined page text when the
    /// extractor did not supply `fullText`.
    pub fn text(&self) -> Cow<'_, str> {
        if !self.full_text.is_empty() {
            return Cow::Borrowed(&self.full_text);
        }
        let joined = self
            .pages
            .iter()
            .map(|page| {
                if page.raw_text.is_empty() {
                    page.lines.join("\n")
                } else {
                    page.raw_text.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        Cow::Owned(joined)
    }

    /// All lines across all pages in reading order. Falls back to
    /// `full_text` when the pages carry no text.
    pub fn all_lines(&self) -> Vec<&str> {
        let mut lines = Vec::new();
        for page in &self.pages {
            if page.lines.is_empty() {
                lines.extend(page.raw_text.lines());
            } else {
                lines.extend(page.lines.iter().map(String::as_str));
            }
        }

        if lines.is_empty() {
            return self.full_text.lines().collect();
        }
        lines
    }
}
