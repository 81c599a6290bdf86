use crate::effect::{Class, Effect, Target};

/// Collapsible navigation menu
#[derive(Debug, Clone, Default)]
pub struct NavToggle {
    open: bool,
}

impl NavToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> Vec<Effect> {
        self.set_open(!self.open)
    }

    /// Collapse after a navigation link is followed
    pub fn close(&mut self) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        self.set_open(false)
    }

    fn set_open(&mut self, open: bool) -> Vec<Effect> {
        self.open = open;
        vec![
            Effect::set_class(Target::NavLinks, Class::Open, open),
            Effect::SetAttribute {
                target: Target::NavToggle,
                name: "aria-expanded".to_string(),
                value: open.to_string(),
            },
        ]
    }
}
