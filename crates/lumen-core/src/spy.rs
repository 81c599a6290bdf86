//! Scroll-spy: marks the navigation link of the section being read as active

use tracing::debug;

use crate::anchor::Anchor;
use crate::config::{SpyConfig, TieBreak};
use crate::effect::{Class, Effect, Target};
use crate::geometry::{GeometryProbe, Viewport};
use crate::observer::{IntersectionEntry, IntersectionObserver, ObserverOptions, RootMargin};

/// Which navigation links carry `is-active`
///
/// Links are addressed by document order. A link is active exactly when its
/// href is the fragment of the active section, so at most one section is
/// active at a time.
#[derive(Debug, Clone)]
pub struct ActiveLinkState {
    hrefs: Vec<String>,
    active: Vec<bool>,
    active_section: Option<String>,
}

impl ActiveLinkState {
    pub fn new<I, S>(hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hrefs: Vec<String> = hrefs.into_iter().map(Into::into).collect();
        let active = vec![false; hrefs.len()];
        Self {
            hrefs,
            active,
            active_section: None,
        }
    }

    /// Re-derive the whole link set for `section_id`
    pub fn activate(&mut self, section_id: &str) {
        let fragment = Anchor::for_id(section_id);
        for (href, active) in self.hrefs.iter().zip(self.active.iter_mut()) {
            *active = href == fragment.as_str();
        }
        self.active_section = Some(section_id.to_string());
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active_section.as_deref()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    pub fn active_links(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
    }

    pub fn len(&self) -> usize {
        self.hrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hrefs.is_empty()
    }

    /// Class writes turning `before` into the current state
    fn changes_since(&self, before: &[bool]) -> Vec<Effect> {
        before
            .iter()
            .zip(&self.active)
            .enumerate()
            .filter(|(_, (was, now))| was != now)
            .map(|(i, (_, now))| Effect::set_class(Target::NavLink(i), Class::Active, *now))
            .collect()
    }
}

/// Watches sections through the decision zone and drives [`ActiveLinkState`]
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    observer: IntersectionObserver,
    links: ActiveLinkState,
    tie_break: TieBreak,
}

impl VisibilityTracker {
    pub fn new<I, S>(config: &SpyConfig, section_ids: I, links: ActiveLinkState) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut observer = IntersectionObserver::new(ObserverOptions {
            root_margin: RootMargin::band(config.zone_top, config.zone_bottom),
            threshold: config.threshold,
        });
        for id in section_ids {
            observer.observe(id);
        }

        Self {
            observer,
            links,
            tie_break: config.tie_break,
        }
    }

    pub fn links(&self) -> &ActiveLinkState {
        &self.links
    }

    pub fn watched(&self) -> usize {
        self.observer.len()
    }

    /// Run one observer pass and apply the resulting batch
    pub fn observe<P>(&mut self, probe: &P) -> Vec<Effect>
    where
        P: GeometryProbe + ?Sized,
    {
        let entries = self.observer.take_records(probe);
        if entries.is_empty() {
            return Vec::new();
        }
        self.handle_batch(&entries, probe.viewport())
    }

    /// Apply one callback batch. Only entries entering the zone matter.
    pub fn handle_batch(&mut self, entries: &[IntersectionEntry], viewport: Viewport) -> Vec<Effect> {
        let before = self.links.active.clone();

        match self.tie_break {
            TieBreak::LastEntry => {
                for entry in entries.iter().filter(|e| e.is_intersecting) {
                    self.links.activate(&entry.target);
                }
            }
            TieBreak::NearestCenter => {
                let center = viewport.height / 2.0;
                let winner = entries
                    .iter()
                    .filter(|e| e.is_intersecting)
                    .min_by(|a, b| {
                        let da = (a.bounding_rect.center_y() - center).abs();
                        let db = (b.bounding_rect.center_y() - center).abs();
                        da.total_cmp(&db)
                    });
                if let Some(entry) = winner {
                    self.links.activate(&entry.target);
                }
            }
        }

        let effects = self.links.changes_since(&before);
        if !effects.is_empty() {
            debug!(
                "Active section: {:?} ({} entries in batch)",
                self.links.active_section(),
                entries.len()
            );
        }
        effects
    }
}
