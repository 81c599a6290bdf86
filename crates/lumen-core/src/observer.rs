//! Intersection observation engine
//!
//! Watches a set of element ids against the viewport (optionally shrunk by a
//! root margin) and reports an entry for a target when it is first observed
//! and whenever its intersecting state flips. Entries are produced in
//! observation order; consumers must not rely on that order.

use crate::geometry::{GeometryProbe, Rect, Viewport};

/// Margins applied to the viewport, as fractions of its size.
/// Negative values shrink the root, positive values grow it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    pub const NONE: RootMargin = RootMargin {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Horizontal band starting `top` of the way down and ending `bottom`
    /// above the viewport's lower edge
    pub fn band(top: f64, bottom: f64) -> Self {
        Self {
            top: -top,
            right: 0.0,
            bottom: -bottom,
            left: 0.0,
        }
    }

    pub fn apply(&self, viewport: Viewport) -> Rect {
        let top = -self.top * viewport.height;
        let left = -self.left * viewport.width;
        let bottom = viewport.height + self.bottom * viewport.height;
        let right = viewport.width + self.right * viewport.width;
        Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Minimum fraction of the target's area inside the root
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: String,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
    /// Target box relative to the viewport at measurement time
    pub bounding_rect: Rect,
    pub root_bounds: Rect,
}

#[derive(Debug, Clone)]
struct Observation {
    id: String,
    /// Last reported state, `None` until the initial entry is delivered
    last: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Vec<Observation>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Start watching a target. Observing an id twice is a no-op.
    pub fn observe(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.is_observing(&id) {
            self.targets.push(Observation { id, last: None });
        }
    }

    /// Stop watching a target; returns whether it was observed
    pub fn unobserve(&mut self, id: &str) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        self.targets.len() != before
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.targets.iter().any(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Measure every target and return the entries whose state changed.
    /// Targets the probe cannot find are skipped silently.
    pub fn take_records<P>(&mut self, probe: &P) -> Vec<IntersectionEntry>
    where
        P: GeometryProbe + ?Sized,
    {
        let root = self.options.root_margin.apply(probe.viewport());
        let threshold = self.options.threshold;
        let mut entries = Vec::new();

        for target in &mut self.targets {
            let Some(rect) = probe.bounding_rect(&target.id) else {
                continue;
            };
            let (is_intersecting, ratio) = measure(&rect, &root, threshold);

            if target.last != Some(is_intersecting) {
                target.last = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    target: target.id.clone(),
                    is_intersecting,
                    intersection_ratio: ratio,
                    bounding_rect: rect,
                    root_bounds: root,
                });
            }
        }

        entries
    }
}

/// Intersecting state and visible ratio of `rect` inside `root`
fn measure(rect: &Rect, root: &Rect, threshold: f64) -> (bool, f64) {
    match rect.intersect(root) {
        Some(overlap) => {
            let area = rect.area();
            let ratio = if area > 0.0 {
                (overlap.area() / area).clamp(0.0, 1.0)
            } else {
                1.0
            };
            (ratio >= threshold, ratio)
        }
        None => (false, 0.0),
    }
}
