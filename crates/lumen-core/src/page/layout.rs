//! Row-based layout of a page for a given content width.
//!
//! Positions are in terminal rows and columns; [`super::Document`] converts
//! them to layout units.

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

use super::models::{reveal_id, PageSpec};

pub const FORM_PROMPT: &str = "[ Send us a message ]  press s to submit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Title,
    Tagline,
    SectionHeading { section: String },
    Block { section: String, reveal: Option<String> },
    Form,
    Footer,
    /// Footer line holding the current year
    Year,
}

#[derive(Debug, Clone)]
pub struct LayoutItem {
    pub kind: ItemKind,
    /// First row occupied
    pub top: usize,
    pub lines: Vec<String>,
}

impl LayoutItem {
    pub fn rows(&self) -> usize {
        self.lines.len()
    }
}

/// Vertical extent of an addressable element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub top: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub width: usize,
    pub items: Vec<LayoutItem>,
    pub total_rows: usize,
    spans: HashMap<String, RowSpan>,
}

impl PageLayout {
    pub fn compute(page: &PageSpec, width: usize) -> Self {
        let width = width.max(8);
        let mut layout = Self {
            width,
            ..Default::default()
        };
        let mut row = 1;
        let mut reveal_index = 0;

        row = layout.push(ItemKind::Title, row, vec![page.title.clone()]);
        if let Some(tagline) = &page.tagline {
            row = layout.push(ItemKind::Tagline, row, wrap(tagline, width));
        }
        row += 2;

        for (index, section) in page.sections.iter().enumerate() {
            let start = row;
            row = layout.push(
                ItemKind::SectionHeading {
                    section: section.id.clone(),
                },
                row,
                vec![section.title.clone()],
            );
            row += 1;

            for block in &section.blocks {
                let reveal = block.reveal.then(|| {
                    let id = reveal_id(reveal_index);
                    reveal_index += 1;
                    id
                });
                let top = row;
                row = layout.push(
                    ItemKind::Block {
                        section: section.id.clone(),
                        reveal: reveal.clone(),
                    },
                    row,
                    wrap(&block.text, width),
                );
                if let Some(id) = reveal {
                    layout.spans.insert(id, RowSpan { top, rows: row - top });
                }
                row += 1;
            }

            if page.features.contact_form && index + 1 == page.sections.len() {
                row = layout.push(ItemKind::Form, row, vec![FORM_PROMPT.to_string()]);
                row += 1;
            }

            layout
                .spans
                .entry(section.id.clone())
                .or_insert(RowSpan {
                    top: start,
                    rows: row - start,
                });
            row += 2;
        }

        if let Some(footer) = &page.footer {
            row = layout.push(ItemKind::Footer, row, wrap(footer, width));
        }
        if page.features.footer_year {
            row = layout.push(ItemKind::Year, row, vec![String::new()]);
        }

        layout.total_rows = row + 1;
        layout
    }

    fn push(&mut self, kind: ItemKind, top: usize, lines: Vec<String>) -> usize {
        let rows = lines.len();
        self.items.push(LayoutItem { kind, top, lines });
        top + rows
    }

    /// Rows covered by a section or reveal block
    pub fn span(&self, id: &str) -> Option<RowSpan> {
        self.spans.get(id).copied()
    }

    /// Items overlapping rows `[first, first + count)`
    pub fn visible_items(&self, first: usize, count: usize) -> impl Iterator<Item = &LayoutItem> {
        let last = first + count;
        self.items
            .iter()
            .filter(move |item| item.top < last && item.top + item.rows() > first)
    }
}

/// Greedy word wrap by display width; words wider than a line are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width: usize = word.chars().map(|c| c.width().unwrap_or(0)).sum();

        if line_width > 0 && line_width + 1 + word_width <= width {
            line.push(' ');
            line.push_str(word);
            line_width += 1 + word_width;
            continue;
        }
        if line_width > 0 {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }
        for c in word.chars() {
            let w = c.width().unwrap_or(0);
            if line_width + w > width && line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(c);
            line_width += w;
        }
    }

    if line_width > 0 || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_wide_chars() {
        // Each CJK character is two columns wide
        assert_eq!(wrap("日本語です", 4), vec!["日本", "語で", "す"]);
    }

    #[test]
    fn test_sections_are_contiguous_and_ordered() {
        let page = PageSpec::sample().unwrap();
        let layout = PageLayout::compute(&page, 60);

        let mut previous_end = 0;
        for section in &page.sections {
            let span = layout.span(&section.id).unwrap();
            assert!(span.top >= previous_end);
            assert!(span.rows > 0);
            previous_end = span.top + span.rows;
        }
        assert!(layout.total_rows > previous_end);
    }

    #[test]
    fn test_reveal_blocks_have_spans_inside_their_section() {
        let page = PageSpec::sample().unwrap();
        let layout = PageLayout::compute(&page, 40);

        for item in &layout.items {
            if let ItemKind::Block {
                section,
                reveal: Some(id),
            } = &item.kind
            {
                let block = layout.span(id).unwrap();
                let parent = layout.span(section).unwrap();
                assert_eq!(block.top, item.top);
                assert!(block.top >= parent.top);
                assert!(block.top + block.rows <= parent.top + parent.rows);
            }
        }
        assert_eq!(
            page.reveal_ids().len(),
            layout
                .items
                .iter()
                .filter(|i| matches!(i.kind, ItemKind::Block { reveal: Some(_), .. }))
                .count()
        );
    }

    #[test]
    fn test_visible_items_window() {
        let page = PageSpec::sample().unwrap();
        let layout = PageLayout::compute(&page, 60);
        let first = layout.visible_items(0, 3).next().unwrap();
        assert_eq!(first.kind, ItemKind::Title);
        assert_eq!(layout.visible_items(layout.total_rows + 10, 5).count(), 0);
    }
}
