use tracing::debug;

use crate::anchor::Anchor;
use crate::config::ScrollConfig;
use crate::effect::{Effect, ScrollBehavior};
use crate::geometry::GeometryProbe;

/// Computes in-page scroll destinations for fragment links
///
/// The animated transition itself belongs to the host; this only decides
/// where to go.
#[derive(Debug, Clone)]
pub struct SmoothScroller {
    margin: f64,
    header_offset: f64,
}

impl SmoothScroller {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            margin: config.margin,
            header_offset: config.header_offset,
        }
    }

    /// Destination offset for `anchor`, `None` when no element carries the id
    pub fn destination<P>(&self, anchor: &Anchor, probe: &P) -> Option<f64>
    where
        P: GeometryProbe + ?Sized,
    {
        let rect = probe.bounding_rect(anchor.id())?;
        let offset = probe.scroll_y() + rect.top - (self.header_offset + self.margin);
        Some(offset.max(0.0))
    }

    /// Request an animated scroll to `anchor`. Broken links are a silent no-op.
    pub fn navigate_to<P>(&self, anchor: &Anchor, probe: &P) -> Option<Effect>
    where
        P: GeometryProbe + ?Sized,
    {
        let top = self.destination(anchor, probe)?;
        debug!("Navigating to {} at offset {}", anchor, top);
        Some(Effect::ScrollTo {
            top,
            behavior: ScrollBehavior::Smooth,
        })
    }
}
