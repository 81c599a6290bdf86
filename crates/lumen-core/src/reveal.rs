//! One-shot reveal-on-scroll

use std::collections::HashMap;

use tracing::debug;

use crate::config::RevealConfig;
use crate::effect::{Class, Effect, Target};
use crate::geometry::GeometryProbe;
use crate::observer::{IntersectionEntry, IntersectionObserver, ObserverOptions, RootMargin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Not yet seen; hidden presentation
    Pending,
    /// Seen once; stays visible and is no longer observed
    Visible,
}

#[derive(Debug, Clone)]
pub struct RevealController {
    observer: IntersectionObserver,
    phases: HashMap<String, RevealPhase>,
}

impl RevealController {
    pub fn new<I, S>(config: &RevealConfig, element_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut observer = IntersectionObserver::new(ObserverOptions {
            root_margin: RootMargin::NONE,
            threshold: config.threshold,
        });
        let mut phases = HashMap::new();
        for id in element_ids {
            let id = id.into();
            observer.observe(id.clone());
            phases.insert(id, RevealPhase::Pending);
        }

        Self { observer, phases }
    }

    pub fn phase(&self, id: &str) -> Option<RevealPhase> {
        self.phases.get(id).copied()
    }

    pub fn is_observing(&self, id: &str) -> bool {
        self.observer.is_observing(id)
    }

    /// Elements still waiting to be revealed
    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    pub fn observe<P>(&mut self, probe: &P) -> Vec<Effect>
    where
        P: GeometryProbe + ?Sized,
    {
        if self.observer.is_empty() {
            return Vec::new();
        }
        let entries = self.observer.take_records(probe);
        self.handle_batch(&entries)
    }

    pub fn handle_batch(&mut self, entries: &[IntersectionEntry]) -> Vec<Effect> {
        let mut effects = Vec::new();

        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let Some(phase) = self.phases.get_mut(&entry.target) else {
                continue;
            };
            if *phase == RevealPhase::Visible {
                continue;
            }
            *phase = RevealPhase::Visible;
            self.observer.unobserve(&entry.target);
            debug!("Revealed {}", entry.target);
            effects.push(Effect::set_class(
                Target::Reveal(entry.target.clone()),
                Class::Visible,
                true,
            ));
        }

        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::tests::FakeProbe;

    fn controller() -> RevealController {
        RevealController::new(&RevealConfig::default(), ["r0", "r1"])
    }

    #[test]
    fn test_reveal_fires_once_and_unobserves() {
        let mut probe = FakeProbe::new(800.0, 600.0)
            .with_box("r0", 100.0, 200.0)
            .with_box("r1", 1200.0, 200.0);
        let mut reveal = controller();

        let effects = reveal.observe(&probe);
        assert_eq!(
            effects,
            vec![Effect::set_class(Target::Reveal("r0".into()), Class::Visible, true)]
        );
        assert_eq!(reveal.phase("r0"), Some(RevealPhase::Visible));
        assert_eq!(reveal.phase("r1"), Some(RevealPhase::Pending));
        assert!(!reveal.is_observing("r0"));
        assert_eq!(reveal.pending(), 1);

        // r0 leaves, r1 enters
        probe.scroll_y = 900.0;
        let effects = reveal.observe(&probe);
        assert_eq!(
            effects,
            vec![Effect::set_class(Target::Reveal("r1".into()), Class::Visible, true)]
        );

        // Scrolling back changes nothing
        probe.scroll_y = 0.0;
        assert!(reveal.observe(&probe).is_empty());
        assert_eq!(reveal.phase("r0"), Some(RevealPhase::Visible));
        assert_eq!(reveal.phase("r1"), Some(RevealPhase::Visible));
        assert_eq!(reveal.pending(), 0);
    }

    #[test]
    fn test_visible_is_absorbing_for_direct_batches() {
        let probe = FakeProbe::new(800.0, 600.0).with_box("r0", 100.0, 200.0);
        let mut reveal = controller();
        let entries = {
            let mut obs = IntersectionObserver::new(ObserverOptions {
                root_margin: RootMargin::NONE,
                threshold: 0.2,
            });
            obs.observe("r0");
            obs.take_records(&probe)
        };

        assert_eq!(reveal.handle_batch(&entries).len(), 1);
        // Replaying the same entering or a leaving report is ignored
        assert!(reveal.handle_batch(&entries).is_empty());
        let mut leaving = entries.clone();
        leaving[0].is_intersecting = false;
        assert!(reveal.handle_batch(&leaving).is_empty());
        assert_eq!(reveal.phase("r0"), Some(RevealPhase::Visible));
    }

    #[test]
    fn test_below_threshold_stays_pending() {
        // 20 of 200 units visible = 0.1 < 0.2
        let probe = FakeProbe::new(800.0, 600.0).with_box("r0", 580.0, 200.0);
        let mut reveal = controller();
        assert!(reveal.observe(&probe).is_empty());
        assert_eq!(reveal.phase("r0"), Some(RevealPhase::Pending));
    }
}
