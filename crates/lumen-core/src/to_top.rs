use crate::config::ToTopConfig;
use crate::effect::{Class, Effect, Target};

/// Visibility of the back-to-top control, derived from the scroll offset
#[derive(Debug, Clone)]
pub struct ScrollTopIndicator {
    threshold: f64,
    last: Option<bool>,
}

impl ScrollTopIndicator {
    pub fn new(config: &ToTopConfig) -> Self {
        Self {
            threshold: config.threshold,
            last: None,
        }
    }

    /// Strictly past the threshold
    #[inline]
    pub fn is_visible_at(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }

    pub fn visible(&self) -> Option<bool> {
        self.last
    }

    /// Recompute for a scroll event; only a change (or the first call) writes
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<Effect> {
        let visible = self.is_visible_at(scroll_y);
        if self.last == Some(visible) {
            return None;
        }
        self.last = Some(visible);
        Some(Effect::set_class(Target::ToTop, Class::Visible, visible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let indicator = ScrollTopIndicator::new(&ToTopConfig::default());
        assert!(!indicator.is_visible_at(0.0));
        assert!(!indicator.is_visible_at(300.0));
        assert!(indicator.is_visible_at(300.5));
    }

    #[test]
    fn test_writes_only_on_change() {
        let mut indicator = ScrollTopIndicator::new(&ToTopConfig::default());
        assert_eq!(
            indicator.on_scroll(0.0),
            Some(Effect::set_class(Target::ToTop, Class::Visible, false))
        );
        assert_eq!(indicator.on_scroll(120.0), None);
        assert_eq!(
            indicator.on_scroll(301.0),
            Some(Effect::set_class(Target::ToTop, Class::Visible, true))
        );
        assert_eq!(indicator.on_scroll(900.0), None);
        assert_eq!(indicator.visible(), Some(true));
        assert_eq!(
            indicator.on_scroll(300.0),
            Some(Effect::set_class(Target::ToTop, Class::Visible, false))
        );
    }
}
