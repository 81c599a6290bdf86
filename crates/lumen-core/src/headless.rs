//! Deterministic host without a terminal
//!
//! Scroll requests jump straight to their destination, so a replayed event
//! script always yields the same effect stream.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::controller::{LinkOutcome, PageController, PageEvent};
use crate::effect::Effect;
use crate::geometry::{GeometryProbe, Point};
use crate::page::{Document, PageSpec};
use crate::projection::Projection;

/// Pane size used when a script does not set one
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScriptViewport {
    #[serde(default = "default_columns")]
    pub columns: u16,
    #[serde(default = "default_rows")]
    pub rows: u16,
}

impl Default for ScriptViewport {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
        }
    }
}

fn default_columns() -> u16 {
    100
}

fn default_rows() -> u16 {
    30
}

fn default_frames() -> u32 {
    1
}

/// One scripted user action. Coordinates are layout units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    PointerEnter,
    Frames {
        #[serde(default = "default_frames")]
        count: u32,
    },
    ScrollTo { y: f64 },
    ScrollBy { dy: f64 },
    Click {
        href: String,
        #[serde(default)]
        nav: bool,
    },
    ToggleMenu,
    Submit,
    Resize { columns: u16, rows: u16 },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: ScriptViewport,
    /// Footer year; the current year when absent
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(content: &str) -> crate::Result<Self> {
        let script: Script = toml::from_str(content).map_err(|e| crate::Error::Script(e.to_string()))?;
        if script.viewport.columns == 0 || script.viewport.rows == 0 {
            return Err(crate::Error::Script("viewport must be at least 1x1".to_string()));
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

pub struct HeadlessPage {
    document: Document,
    controller: PageController,
    projection: Projection,
    log: Vec<Effect>,
}

impl HeadlessPage {
    /// Validate `spec` and lay it out at `columns` x `rows`. Page warnings
    /// are logged; invalid pages are rejected.
    pub fn new(config: &AppConfig, spec: PageSpec, columns: u16, rows: u16) -> crate::Result<Self> {
        for warning in spec.validate()? {
            warn!("{}", warning);
        }

        let mut document = Document::new(spec, config.ui.cell_width, config.ui.cell_height);
        document.resize(0, columns, rows);
        let controller = PageController::new(config, &document.manifest(), document.viewport());

        Ok(Self {
            document,
            controller,
            projection: Projection::new(),
            log: Vec::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Every effect applied so far
    pub fn log(&self) -> &[Effect] {
        &self.log
    }

    pub fn start(&mut self, year: Option<i32>) -> Vec<Effect> {
        let effects = match year {
            Some(year) => self.controller.start_at(&self.document, year),
            None => self.controller.start(&self.document),
        };
        self.apply(effects)
    }

    pub fn dispatch(&mut self, event: PageEvent) -> Vec<Effect> {
        let effects = self.controller.handle(event, &self.document);
        self.apply(effects)
    }

    pub fn click(&mut self, href: &str, nav_link: bool) -> (LinkOutcome, Vec<Effect>) {
        let (outcome, effects) = self.controller.click(href, nav_link, &self.document);
        (outcome, self.apply(effects))
    }

    /// Native scroll, as if the user dragged the scrollbar
    pub fn scroll_to(&mut self, y: f64) -> Vec<Effect> {
        self.document.set_scroll_y(y);
        self.dispatch(PageEvent::Scroll)
    }

    pub fn frames(&mut self, count: u32) -> Vec<Effect> {
        (0..count).flat_map(|_| self.dispatch(PageEvent::Frame)).collect()
    }

    pub fn step(&mut self, step: &Step) -> Vec<Effect> {
        debug!("Script step: {:?}", step);
        match step {
            Step::PointerMove { x, y } => self.dispatch(PageEvent::PointerMove(Point::new(*x, *y))),
            Step::PointerLeave => self.dispatch(PageEvent::PointerLeave),
            Step::PointerEnter => self.dispatch(PageEvent::PointerEnter),
            Step::Frames { count } => self.frames(*count),
            Step::ScrollTo { y } => self.scroll_to(*y),
            Step::ScrollBy { dy } => self.scroll_to(self.document.scroll_y() + dy),
            Step::Click { href, nav } => self.click(href, *nav).1,
            Step::ToggleMenu => self.dispatch(PageEvent::ToggleMenu),
            Step::Submit => self.dispatch(PageEvent::SubmitForm),
            Step::Resize { columns, rows } => {
                self.document.resize(0, *columns, *rows);
                self.dispatch(PageEvent::Scroll)
            }
        }
    }

    /// Start the page and run every step, returning each step's effects.
    /// Index 0 holds the startup effects.
    pub fn replay(&mut self, script: &Script) -> Vec<Vec<Effect>> {
        info!("Replaying {} script steps", script.steps.len());
        let mut batches = vec![self.start(script.year)];
        for step in &script.steps {
            batches.push(self.step(step));
        }
        batches
    }

    /// Project effects and perform scroll requests instantly
    fn apply(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut applied = Vec::with_capacity(effects.len());
        for effect in effects {
            self.projection.apply(&effect);
            let scroll = match &effect {
                Effect::ScrollTo { top, .. } => Some(*top),
                _ => None,
            };
            applied.push(effect);

            if let Some(top) = scroll {
                self.document.set_scroll_y(top);
                let followups = self.controller.handle(PageEvent::Scroll, &self.document);
                self.projection.apply_all(&followups);
                applied.extend(followups);
            }
        }
        self.log.extend(applied.iter().cloned());
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Anchor;
    use crate::effect::{Class, Target, Transform};

    /// Three 22-row sections; the last one's blocks reveal on scroll
    fn page() -> PageSpec {
        let mut content = String::from("title = \"Test\"\n");
        for (id, reveal) in [("a", false), ("b", false), ("c", true)] {
            content.push_str(&format!("[[sections]]\nid = \"{}\"\ntitle = \"{}\"\n", id, id));
            for _ in 0..10 {
                content.push_str(&format!("[[sections.blocks]]\ntext = \"x\"\nreveal = {}\n", reveal));
            }
        }
        PageSpec::parse(&content).unwrap()
    }

    fn headless() -> HeadlessPage {
        // 100x30 cells -> 800x480 units
        HeadlessPage::new(&AppConfig::default(), page(), 100, 30).unwrap()
    }

    #[test]
    fn test_rejects_duplicate_section_ids() {
        let mut spec = page();
        spec.sections[1].id = "a".to_string();
        assert!(matches!(
            HeadlessPage::new(&AppConfig::default(), spec, 100, 30),
            Err(crate::Error::InvalidPage(_))
        ));
    }

    #[test]
    fn test_start() {
        let mut page = headless();
        let effects = page.start(Some(2026));

        assert_eq!(
            effects[0],
            Effect::SetText {
                target: Target::Year,
                text: "2026".into()
            }
        );
        assert_eq!(page.controller().active_section(), Some("a"));
        assert_eq!(page.projection().year.as_deref(), Some("2026"));
        assert_eq!(page.projection().light, Some(Transform { x: 400.0, y: 240.0 }));
        assert!(!page.projection().to_top_visible);
        assert!(page.projection().revealed.is_empty());
    }

    #[test]
    fn test_click_jumps_and_next_frame_updates() {
        let mut page = headless();
        page.start(Some(2026));

        let (outcome, effects) = page.click("#b", false);
        assert_eq!(outcome, LinkOutcome::Intercepted);
        // Section b starts at row 28: 448 - 10
        assert_eq!(page.document().scroll_y(), 438.0);
        assert!(effects.contains(&Effect::set_class(Target::ToTop, Class::Visible, true)));
        assert_eq!(page.projection().current_fragment(), Some(&Anchor::for_id("b")));

        // Observers wait for the frame
        assert_eq!(page.controller().active_section(), Some("a"));
        page.frames(1);
        assert_eq!(page.controller().active_section(), Some("b"));
        assert_eq!(page.projection().active_links.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(page.projection().revealed.len(), 2);
    }

    #[test]
    fn test_reveals_survive_scrolling_back() {
        let mut page = headless();
        page.start(Some(2026));
        page.scroll_to(438.0);
        page.frames(1);
        let revealed = page.projection().revealed.clone();

        let effects = page.scroll_to(0.0);
        assert_eq!(effects, vec![Effect::set_class(Target::ToTop, Class::Visible, false)]);
        page.frames(1);
        assert_eq!(page.controller().active_section(), Some("a"));
        assert_eq!(page.projection().revealed, revealed);
        assert_eq!(page.controller().reveal().pending(), 8);
    }

    #[test]
    fn test_script_replay() {
        let script = Script::parse(
            r##"
            year = 2030

            [viewport]
            columns = 100
            rows = 30

            [[steps]]
            action = "pointer_move"
            x = 500
            y = 300

            [[steps]]
            action = "pointer_move"
            x = 520
            y = 300

            [[steps]]
            action = "frames"

            [[steps]]
            action = "toggle_menu"

            [[steps]]
            action = "click"
            href = "#c"
            nav = true

            [[steps]]
            action = "pointer_leave"

            [[steps]]
            action = "submit"
            "##,
        )
        .unwrap();
        assert_eq!(script.steps.len(), 7);

        let mut page = headless();
        let batches = page.replay(&script);
        assert_eq!(batches.len(), 8);
        assert!(batches[1].is_empty());
        assert_eq!(
            batches[3],
            vec![Effect::SetTransform {
                target: Target::CursorLight,
                transform: Transform { x: 508.0, y: 300.0 }
            }]
        );

        let projection = page.projection();
        assert_eq!(projection.year.as_deref(), Some("2030"));
        assert!(!projection.menu_open);
        assert!(!projection.aria_expanded);
        assert_eq!(projection.light_opacity, Some(0.0));
        assert_eq!(projection.alerts.len(), 1);
        assert_eq!(projection.form_resets, 1);
        assert_eq!(page.log().len(), batches.iter().map(Vec::len).sum::<usize>());
    }

    #[test]
    fn test_script_errors() {
        assert!(matches!(
            Script::parse("[[steps]]\naction = \"fly\""),
            Err(crate::Error::Script(_))
        ));
        assert!(matches!(
            Script::parse("[viewport]\ncolumns = 0"),
            Err(crate::Error::Script(_))
        ));
        let script = Script::parse("").unwrap();
        assert_eq!(script.viewport.columns, 100);
        assert!(script.steps.is_empty());
    }
}
