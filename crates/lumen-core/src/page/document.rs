use crate::geometry::{GeometryProbe, Rect, Viewport};

use super::layout::PageLayout;
use super::models::{PageManifest, PageSpec};

/// A laid-out page scrolled inside a fixed-size pane
///
/// Geometry is reported in layout units: one terminal cell is
/// `cell_width` x `cell_height` units.
#[derive(Debug, Clone)]
pub struct Document {
    spec: PageSpec,
    layout: PageLayout,
    cell_width: f64,
    cell_height: f64,
    left: u16,
    columns: u16,
    rows: u16,
    scroll_y: f64,
}

impl Document {
    const DEFAULT_COLUMNS: u16 = 80;
    const DEFAULT_ROWS: u16 = 24;

    pub fn new(spec: PageSpec, cell_width: f64, cell_height: f64) -> Self {
        let layout = PageLayout::compute(&spec, Self::DEFAULT_COLUMNS as usize);
        Self {
            spec,
            layout,
            cell_width,
            cell_height,
            left: 0,
            columns: Self::DEFAULT_COLUMNS,
            rows: Self::DEFAULT_ROWS,
            scroll_y: 0.0,
        }
    }

    /// Place the scrolling pane; re-lays out the page when the width changes
    pub fn resize(&mut self, left: u16, columns: u16, rows: u16) {
        if columns != self.columns {
            self.layout = PageLayout::compute(&self.spec, columns as usize);
        }
        self.left = left;
        self.columns = columns;
        self.rows = rows;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn manifest(&self) -> PageManifest {
        self.spec.manifest()
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn max_scroll(&self) -> f64 {
        let overflow = self.layout.total_rows.saturating_sub(self.rows as usize);
        overflow as f64 * self.cell_height
    }

    /// Set the scroll offset, clamped to the scrollable range
    pub fn set_scroll_y(&mut self, scroll_y: f64) -> f64 {
        self.scroll_y = scroll_y.clamp(0.0, self.max_scroll());
        self.scroll_y
    }

    /// First layout row shown at the top of the pane
    pub fn first_visible_row(&self) -> usize {
        (self.scroll_y / self.cell_height).floor() as usize
    }
}

impl GeometryProbe for Document {
    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        let span = self.layout.span(id)?;
        Some(Rect::new(
            self.left as f64 * self.cell_width,
            span.top as f64 * self.cell_height - self.scroll_y,
            self.columns as f64 * self.cell_width,
            span.rows as f64 * self.cell_height,
        ))
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(
            self.columns as f64 * self.cell_width,
            self.rows as f64 * self.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        let mut doc = Document::new(PageSpec::sample().unwrap(), 8.0, 16.0);
        doc.resize(24, 60, 30);
        doc
    }

    #[test]
    fn test_bounding_rect_tracks_scroll() {
        let mut doc = document();
        let span = doc.layout().span("services").unwrap();

        let rect = doc.bounding_rect("services").unwrap();
        assert_eq!(rect.top, span.top as f64 * 16.0);
        assert_eq!(rect.height, span.rows as f64 * 16.0);
        assert_eq!(rect.left, 24.0 * 8.0);

        doc.set_scroll_y(160.0);
        let rect = doc.bounding_rect("services").unwrap();
        assert_eq!(rect.top, span.top as f64 * 16.0 - 160.0);
        assert_eq!(doc.first_visible_row(), 10);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut doc = document();
        assert_eq!(doc.set_scroll_y(-50.0), 0.0);
        let max = doc.max_scroll();
        assert!(max > 0.0);
        assert_eq!(doc.set_scroll_y(max + 1000.0), max);
    }

    #[test]
    fn test_unknown_ids_are_absent() {
        let doc = document();
        assert!(doc.bounding_rect("nope").is_none());
        assert_eq!(doc.viewport(), Viewport::new(480.0, 480.0));
    }
}
