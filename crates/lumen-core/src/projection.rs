//! Folds effects into the presentational state a host renders from

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::trace;

use crate::anchor::Anchor;
use crate::effect::{Class, Effect, ScrollBehavior, Target, Transform};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    pub active_links: BTreeSet<usize>,
    pub revealed: BTreeSet<String>,
    pub to_top_visible: bool,
    pub menu_open: bool,
    pub aria_expanded: bool,
    pub light: Option<Transform>,
    pub light_opacity: Option<f64>,
    pub year: Option<String>,
    /// Fragment history, oldest first
    pub fragments: Vec<Anchor>,
    pub alerts: Vec<String>,
    pub form_resets: u32,
    pub last_scroll: Option<(f64, ScrollBehavior)>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SetClass { target, class, on } => self.set_class(target, *class, *on),
            Effect::SetAttribute { target: Target::NavToggle, name, value } if name == "aria-expanded" => {
                self.aria_expanded = value == "true";
            }
            Effect::SetTransform {
                target: Target::CursorLight,
                transform,
            } => self.light = Some(*transform),
            Effect::SetOpacity {
                target: Target::CursorLight,
                opacity,
            } => self.light_opacity = Some(*opacity),
            Effect::ScrollTo { top, behavior } => self.last_scroll = Some((*top, *behavior)),
            Effect::PushFragment { anchor } => self.fragments.push(anchor.clone()),
            Effect::SetText { target: Target::Year, text } => self.year = Some(text.clone()),
            Effect::Alert { message } => self.alerts.push(message.clone()),
            Effect::ResetForm => self.form_resets += 1,
            other => trace!("Effect has no projection: {:?}", other),
        }
    }

    pub fn apply_all<'a>(&mut self, effects: impl IntoIterator<Item = &'a Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }

    fn set_class(&mut self, target: &Target, class: Class, on: bool) {
        match (target, class) {
            (Target::NavLink(index), Class::Active) => {
                if on {
                    self.active_links.insert(*index);
                } else {
                    self.active_links.remove(index);
                }
            }
            // Reveals are one-way
            (Target::Reveal(id), Class::Visible) if on => {
                self.revealed.insert(id.clone());
            }
            (Target::ToTop, Class::Visible) => self.to_top_visible = on,
            (Target::NavLinks, Class::Open) => self.menu_open = on,
            _ => trace!("Ignoring class {} on {:?}", class, target),
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    pub fn current_fragment(&self) -> Option<&Anchor> {
        self.fragments.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_writes() {
        let mut projection = Projection::new();
        projection.apply_all(&[
            Effect::set_class(Target::NavLink(1), Class::Active, true),
            Effect::set_class(Target::Reveal("reveal-0".into()), Class::Visible, true),
            Effect::set_class(Target::ToTop, Class::Visible, true),
            Effect::set_class(Target::NavLinks, Class::Open, true),
        ]);
        assert_eq!(projection.active_links.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!(projection.is_revealed("reveal-0"));
        assert!(projection.to_top_visible);
        assert!(projection.menu_open);

        projection.apply(&Effect::set_class(Target::NavLink(1), Class::Active, false));
        projection.apply(&Effect::set_class(Target::Reveal("reveal-0".into()), Class::Visible, false));
        assert!(projection.active_links.is_empty());
        assert!(projection.is_revealed("reveal-0"));
    }

    #[test]
    fn test_light_fragments_and_form() {
        let mut projection = Projection::new();
        projection.apply_all(&[
            Effect::SetTransform {
                target: Target::CursorLight,
                transform: Transform { x: 1.0, y: 2.0 },
            },
            Effect::SetOpacity {
                target: Target::CursorLight,
                opacity: 0.0,
            },
            Effect::PushFragment {
                anchor: Anchor::for_id("a"),
            },
            Effect::PushFragment {
                anchor: Anchor::for_id("b"),
            },
            Effect::Alert {
                message: "hi".into(),
            },
            Effect::ResetForm,
        ]);

        assert_eq!(projection.light, Some(Transform { x: 1.0, y: 2.0 }));
        assert_eq!(projection.light_opacity, Some(0.0));
        assert_eq!(projection.current_fragment(), Some(&Anchor::for_id("b")));
        assert_eq!(projection.fragments.len(), 2);
        assert_eq!(projection.alerts, vec!["hi"]);
        assert_eq!(projection.form_resets, 1);
    }
}
