//! The page script: owns every reactive component for the page's lifetime
//! and turns host events into effects.

use chrono::Datelike;
use tracing::{debug, info};

use crate::anchor::{classify_href, LinkTarget};
use crate::config::AppConfig;
use crate::effect::{Effect, Target};
use crate::form::ContactForm;
use crate::geometry::{GeometryProbe, Point, Viewport};
use crate::menu::NavToggle;
use crate::page::PageManifest;
use crate::pointer::PointerFollower;
use crate::reveal::RevealController;
use crate::smooth_scroll::SmoothScroller;
use crate::spy::{ActiveLinkState, VisibilityTracker};
use crate::to_top::ScrollTopIndicator;

/// Host events the page reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The scroll offset changed
    Scroll,
    /// Pointer moved, in window coordinates
    PointerMove(Point),
    PointerLeave,
    PointerEnter,
    /// A link was clicked; `nav_link` is set for links inside the navigation menu
    LinkClick { href: String, nav_link: bool },
    ToggleMenu,
    SubmitForm,
    /// One display refresh
    Frame,
}

/// Whether the host should carry on with its default link behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Intercepted,
    Default,
}

pub struct PageController {
    scroller: SmoothScroller,
    spy: VisibilityTracker,
    reveal: RevealController,
    light: Option<PointerFollower>,
    to_top: Option<ScrollTopIndicator>,
    menu: Option<NavToggle>,
    form: Option<ContactForm>,
    footer_year: bool,
}

impl PageController {
    /// Build every component once. `window` is the pointer coordinate space;
    /// the light starts at its centre.
    pub fn new(config: &AppConfig, manifest: &PageManifest, window: Viewport) -> Self {
        let links = ActiveLinkState::new(manifest.nav_hrefs.iter().cloned());
        let spy = VisibilityTracker::new(&config.spy, manifest.section_ids.iter().cloned(), links);
        let reveal = RevealController::new(&config.reveal, manifest.reveal_ids.iter().cloned());

        info!(
            "Page controller ready: {} sections, {} nav links, {} reveal blocks",
            manifest.section_ids.len(),
            manifest.nav_hrefs.len(),
            manifest.reveal_ids.len()
        );

        Self {
            scroller: SmoothScroller::new(&config.scroll),
            spy,
            reveal,
            light: manifest
                .cursor_light
                .then(|| PointerFollower::new(&config.pointer, window.center())),
            to_top: manifest.to_top.then(|| ScrollTopIndicator::new(&config.to_top)),
            menu: manifest.nav_toggle.then(NavToggle::new),
            form: manifest.contact_form.then(ContactForm::new),
            footer_year: manifest.footer_year,
        }
    }

    /// Initial pass once the page is loaded, stamped with the current year
    pub fn start<P>(&mut self, probe: &P) -> Vec<Effect>
    where
        P: GeometryProbe + ?Sized,
    {
        self.start_at(probe, chrono::Local::now().year())
    }

    pub fn start_at<P>(&mut self, probe: &P, year: i32) -> Vec<Effect>
    where
        P: GeometryProbe + ?Sized,
    {
        let mut effects = Vec::new();
        if self.footer_year {
            effects.push(Effect::SetText {
                target: Target::Year,
                text: year.to_string(),
            });
        }
        effects.extend(self.handle(PageEvent::Scroll, probe));
        effects.extend(self.handle(PageEvent::Frame, probe));
        effects
    }

    pub fn handle<P>(&mut self, event: PageEvent, probe: &P) -> Vec<Effect>
    where
        P: GeometryProbe + ?Sized,
    {
        match event {
            PageEvent::Scroll => self
                .to_top
                .as_mut()
                .and_then(|indicator| indicator.on_scroll(probe.scroll_y()))
                .into_iter()
                .collect(),
            PageEvent::PointerMove(position) => {
                if let Some(light) = self.light.as_mut() {
                    light.on_pointer_move(position);
                }
                Vec::new()
            }
            PageEvent::PointerLeave => self.light.as_mut().map(|l| l.on_pointer_leave()).into_iter().collect(),
            PageEvent::PointerEnter => self.light.as_mut().map(|l| l.on_pointer_enter()).into_iter().collect(),
            PageEvent::LinkClick { href, nav_link } => self.click(&href, nav_link, probe).1,
            PageEvent::ToggleMenu => self.menu.as_mut().map(NavToggle::toggle).unwrap_or_default(),
            PageEvent::SubmitForm => self.form.as_mut().map(ContactForm::submit).unwrap_or_default(),
            PageEvent::Frame => self.frame(probe),
        }
    }

    /// Handle a link click. Same-page fragments are intercepted: the page
    /// scrolls (when the target exists) and the fragment is pushed once.
    pub fn click<P>(&mut self, href: &str, nav_link: bool, probe: &P) -> (LinkOutcome, Vec<Effect>)
    where
        P: GeometryProbe + ?Sized,
    {
        let mut effects = Vec::new();
        if nav_link {
            if let Some(menu) = self.menu.as_mut() {
                effects.extend(menu.close());
            }
        }

        match classify_href(href) {
            LinkTarget::Fragment(anchor) => {
                effects.extend(self.scroller.navigate_to(&anchor, probe));
                effects.push(Effect::PushFragment { anchor });
                (LinkOutcome::Intercepted, effects)
            }
            LinkTarget::Placeholder | LinkTarget::External(_) => {
                debug!("Leaving link {:?} to default navigation", href);
                (LinkOutcome::Default, effects)
            }
        }
    }

    /// One display frame: advance the light, then run the observers
    fn frame<P>(&mut self, probe: &P) -> Vec<Effect>
    where
        P: GeometryProbe + ?Sized,
    {
        let mut effects = Vec::new();
        if let Some(light) = self.light.as_mut() {
            effects.push(light.frame());
        }
        effects.extend(self.spy.observe(probe));
        effects.extend(self.reveal.observe(probe));
        effects
    }

    pub fn active_section(&self) -> Option<&str> {
        self.spy.links().active_section()
    }

    pub fn links(&self) -> &ActiveLinkState {
        self.spy.links()
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn light(&self) -> Option<&PointerFollower> {
        self.light.as_ref()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(NavToggle::is_open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Anchor;
    use crate::effect::{Class, ScrollBehavior, Transform};
    use crate::observer::tests::FakeProbe;

    fn manifest() -> PageManifest {
        PageManifest {
            section_ids: vec!["home".into(), "about".into()],
            nav_hrefs: vec!["#home".into(), "#about".into(), "https://blog.example".into()],
            reveal_ids: vec!["reveal-0".into()],
            cursor_light: true,
            to_top: true,
            nav_toggle: true,
            footer_year: true,
            contact_form: true,
        }
    }

    fn probe() -> FakeProbe {
        FakeProbe::new(1000.0, 1000.0)
            .with_box("home", 0.0, 900.0)
            .with_box("about", 900.0, 900.0)
            .with_box("reveal-0", 1100.0, 200.0)
    }

    fn controller() -> PageController {
        PageController::new(&AppConfig::default(), &manifest(), Viewport::new(1000.0, 1000.0))
    }

    #[test]
    fn test_start_writes_year_indicator_and_first_frame() {
        let probe = probe();
        let mut page = controller();
        let effects = page.start_at(&probe, 2026);

        assert_eq!(
            effects,
            vec![
                Effect::SetText {
                    target: Target::Year,
                    text: "2026".into()
                },
                Effect::set_class(Target::ToTop, Class::Visible, false),
                Effect::SetTransform {
                    target: Target::CursorLight,
                    transform: Transform { x: 500.0, y: 500.0 }
                },
                Effect::set_class(Target::NavLink(0), Class::Active, true),
            ]
        );
        assert_eq!(page.active_section(), Some("home"));
    }

    #[test]
    fn test_fragment_click_scrolls_and_pushes() {
        let probe = probe();
        let mut page = controller();
        page.handle(PageEvent::ToggleMenu, &probe);
        assert!(page.menu_open());

        let (outcome, effects) = page.click("#about", true, &probe);
        assert_eq!(outcome, LinkOutcome::Intercepted);
        assert!(!page.menu_open());
        assert_eq!(
            &effects[2..],
            &[
                Effect::ScrollTo {
                    top: 890.0,
                    behavior: ScrollBehavior::Smooth
                },
                Effect::PushFragment {
                    anchor: Anchor::for_id("about")
                },
            ]
        );
    }

    #[test]
    fn test_missing_anchor_pushes_without_scrolling() {
        let probe = probe();
        let mut page = controller();
        let (outcome, effects) = page.click("#nowhere", false, &probe);
        assert_eq!(outcome, LinkOutcome::Intercepted);
        assert_eq!(
            effects,
            vec![Effect::PushFragment {
                anchor: Anchor::for_id("nowhere")
            }]
        );
    }

    #[test]
    fn test_placeholder_and_external_links_proceed() {
        let probe = probe();
        let mut page = controller();
        for href in ["#", "#!", "https://blog.example", "/about"] {
            let (outcome, effects) = page.click(href, false, &probe);
            assert_eq!(outcome, LinkOutcome::Default, "{}", href);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_scroll_frame_reveals_and_moves_spy() {
        let mut probe = probe();
        let mut page = controller();
        page.start_at(&probe, 2026);

        probe.scroll_y = 800.0;
        let mut effects = page.handle(PageEvent::Scroll, &probe);
        effects.extend(page.handle(PageEvent::Frame, &probe));

        assert!(effects.contains(&Effect::set_class(Target::ToTop, Class::Visible, true)));
        assert!(effects.contains(&Effect::set_class(Target::NavLink(1), Class::Active, true)));
        assert!(effects.contains(&Effect::set_class(
            Target::Reveal("reveal-0".into()),
            Class::Visible,
            true
        )));
        assert_eq!(page.active_section(), Some("about"));
        assert_eq!(page.reveal().pending(), 0);
    }

    #[test]
    fn test_pointer_events() {
        let probe = probe();
        let mut page = controller();
        assert!(page.handle(PageEvent::PointerMove(Point::new(500.0, 300.0)), &probe).is_empty());
        assert_eq!(page.light().unwrap().current(), Point::new(500.0, 300.0));

        page.handle(PageEvent::PointerMove(Point::new(520.0, 300.0)), &probe);
        let effects = page.handle(PageEvent::Frame, &probe);
        match &effects[0] {
            Effect::SetTransform { transform, .. } => {
                assert!((transform.x - 508.0).abs() < 1e-9);
                assert_eq!(transform.y, 300.0);
            }
            other => panic!("unexpected effect {:?}", other),
        }

        assert_eq!(
            page.handle(PageEvent::PointerLeave, &probe),
            vec![Effect::SetOpacity {
                target: Target::CursorLight,
                opacity: 0.0
            }]
        );
    }

    #[test]
    fn test_absent_elements_disable_features() {
        let manifest = PageManifest {
            section_ids: vec!["home".into()],
            nav_hrefs: vec!["#home".into()],
            ..Default::default()
        };
        let probe = probe();
        let mut page = PageController::new(&AppConfig::default(), &manifest, Viewport::new(1000.0, 1000.0));

        assert!(page.light().is_none());
        assert!(page.handle(PageEvent::PointerLeave, &probe).is_empty());
        assert!(page.handle(PageEvent::ToggleMenu, &probe).is_empty());
        assert!(page.handle(PageEvent::SubmitForm, &probe).is_empty());
        assert!(page.handle(PageEvent::Scroll, &probe).is_empty());

        let effects = page.start_at(&probe, 2026);
        assert_eq!(
            effects,
            vec![Effect::set_class(Target::NavLink(0), Class::Active, true)]
        );
    }

    #[test]
    fn test_submit_form() {
        let probe = probe();
        let mut page = controller();
        let effects = page.handle(PageEvent::SubmitForm, &probe);
        assert!(matches!(effects[0], Effect::Alert { .. }));
        assert_eq!(effects[1], Effect::ResetForm);
    }
}
