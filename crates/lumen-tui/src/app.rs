use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use tracing::{debug, info};

use lumen_core::effect::ScrollBehavior;
use lumen_core::page::{ItemKind, NavLinkSpec};
use lumen_core::{
    AppConfig, Document, Effect, GeometryProbe, LinkOutcome, PageController, PageEvent, PageSpec,
    Point, Projection, Viewport,
};

use crate::event::AppEvent;
use crate::input::{handle_key_event, Action};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Below this width the nav collapses behind the menu toggle
pub const COMPACT_WIDTH: u16 = 72;

const TO_TOP_LABEL_WIDTH: u16 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Modal message; any dismiss key returns to Normal
    Alert(String),
}

/// Screen regions, recomputed on resize and when the menu opens or closes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    /// Navigation pane; hidden in compact mode while the menu is closed
    pub nav: Option<Rect>,
    pub page: Rect,
    pub status: Rect,
    /// Menu toggle bar, compact mode only
    pub toggle: Option<Rect>,
    pub to_top: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect, nav_width: u16, menu_open: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        let (body, status) = (rows[0], rows[1]);

        let (nav, page, toggle) = if body.width >= COMPACT_WIDTH {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(nav_width), Constraint::Min(1)])
                .split(body);
            (Some(columns[0]), columns[1], None)
        } else {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(body);
            let (bar, page) = (parts[0], parts[1]);
            let overlay = Rect::new(page.x, page.y, nav_width.min(page.width), page.height);
            (menu_open.then_some(overlay), page, Some(bar))
        };

        let to_top = Rect::new(
            page.right().saturating_sub(TO_TOP_LABEL_WIDTH + 1),
            page.bottom().saturating_sub(1),
            TO_TOP_LABEL_WIDTH.min(page.width),
            1.min(page.height),
        );

        Self {
            nav,
            page,
            status,
            toggle,
            to_top,
        }
    }

    /// Rows of the nav pane holding links (inside the border)
    pub fn nav_links_area(&self) -> Option<Rect> {
        self.nav.map(|nav| {
            Rect::new(
                nav.x + 1,
                nav.y + 1,
                nav.width.saturating_sub(2),
                nav.height.saturating_sub(2),
            )
        })
    }

    /// Nav link index under a screen position
    pub fn nav_link_at(&self, position: Position, count: usize) -> Option<usize> {
        let area = self.nav_links_area()?;
        if !area.contains(position) {
            return None;
        }
        let index = (position.y - area.y) as usize;
        (index < count).then_some(index)
    }
}

/// Main application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub document: Document,
    pub controller: PageController,
    pub projection: Projection,
    pub animator: ScrollAnimator,
    pub layout: AppLayout,
    pub nav_links: Vec<NavLinkSpec>,
    pub mode: Mode,
    /// Nav link selected with Tab
    pub focused_link: Option<usize>,
    /// Pending key for multi-key sequences like "gg"
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    to_top_href: Option<String>,
    size: (u16, u16),
}

impl App {
    pub fn new(config: Arc<AppConfig>, spec: PageSpec, theme: Theme, width: u16, height: u16) -> Self {
        let nav_links = spec.nav_links();
        let manifest = spec.manifest();
        let to_top_href = manifest.section_ids.first().map(|id| format!("#{}", id));
        let document = Document::new(spec, config.ui.cell_width, config.ui.cell_height);

        let window = Viewport::new(
            width as f64 * config.ui.cell_width,
            height as f64 * config.ui.cell_height,
        );
        let controller = PageController::new(&config, &manifest, window);
        let animator = ScrollAnimator::new(config.scroll.clone());

        let mut app = Self {
            config,
            theme,
            document,
            controller,
            projection: Projection::new(),
            animator,
            layout: AppLayout::default(),
            nav_links,
            mode: Mode::Normal,
            focused_link: None,
            pending_key: None,
            status_message: None,
            should_quit: false,
            to_top_href,
            size: (width, height),
        };
        app.relayout();
        app
    }

    /// Page loaded: initial effects and first frame
    pub fn start(&mut self) {
        let effects = self.controller.start(&self.document);
        info!("Page started with {} initial effects", effects.len());
        self.apply(effects);
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                let action = handle_key_event(key, self);
                self.handle_action(action);
            }
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::Resize(width, height) => self.resize(width, height),
            AppEvent::FocusLost => self.dispatch(PageEvent::PointerLeave),
            AppEvent::FocusGained => self.dispatch(PageEvent::PointerEnter),
            AppEvent::Frame(_) => self.on_frame(),
        }
    }

    /// Advance the scroll animation, then run the page's frame work
    pub fn on_frame(&mut self) {
        if self.animator.needs_update() {
            let y = self.animator.update(self.document.max_scroll());
            self.set_scroll(y);
        }
        self.dispatch(PageEvent::Frame);
    }

    pub fn handle_action(&mut self, action: Action) {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let rows = self.document.rows() as f64;
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_lines(self.config.scroll.scroll_lines as f64),
            Action::ScrollUp => self.scroll_lines(-(self.config.scroll.scroll_lines as f64)),
            Action::ScrollHalfPageDown => self.scroll_lines((rows / 2.0).max(1.0).floor()),
            Action::ScrollHalfPageUp => self.scroll_lines(-(rows / 2.0).max(1.0).floor()),
            Action::ScrollPageDown => self.scroll_lines(rows),
            Action::ScrollPageUp => self.scroll_lines(-rows),
            Action::JumpToTop => self.animator.scroll_to(0.0, self.document.max_scroll()),
            Action::JumpToBottom => {
                let max = self.document.max_scroll();
                self.animator.scroll_to(max, max);
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextLink => self.cycle_link(1),
            Action::PrevLink => self.cycle_link(-1),
            Action::FollowLink => {
                if let Some(link) = self.focused_link.and_then(|i| self.nav_links.get(i)) {
                    let href = link.href.clone();
                    self.click(&href, true);
                }
            }
            Action::ToggleMenu => self.dispatch(PageEvent::ToggleMenu),
            Action::SubmitForm => self.dispatch(PageEvent::SubmitForm),
            Action::BackToTop => {
                if self.projection.to_top_visible {
                    if let Some(href) = self.to_top_href.clone() {
                        self.click(&href, false);
                    }
                }
            }
            Action::DismissPopup => self.mode = Mode::Normal,
            Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let lines = self.config.scroll.scroll_lines as f64;
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let point = self.window_point(mouse.column, mouse.row);
                self.dispatch(PageEvent::PointerMove(point));
            }
            MouseEventKind::ScrollDown => self.scroll_lines(lines),
            MouseEventKind::ScrollUp => self.scroll_lines(-lines),
            MouseEventKind::Down(MouseButton::Left) => {
                self.click_at(Position::new(mouse.column, mouse.row))
            }
            _ => {}
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.relayout();
        self.animator.set_scroll(self.document.scroll_y());
        self.dispatch(PageEvent::Scroll);
    }

    /// Click a link; same-page fragments are handled by the page
    pub fn click(&mut self, href: &str, nav_link: bool) {
        let (outcome, effects) = self.controller.click(href, nav_link, &self.document);
        self.apply(effects);
        if outcome == LinkOutcome::Default {
            self.status_message = Some(format!("{} opens outside the page", href));
        }
    }

    /// Center of a terminal cell in window layout units
    pub fn window_point(&self, column: u16, row: u16) -> Point {
        let (cw, ch) = (self.config.ui.cell_width, self.config.ui.cell_height);
        Point::new((column as f64 + 0.5) * cw, (row as f64 + 0.5) * ch)
    }

    /// Percentage of the page scrolled
    pub fn scroll_percent(&self) -> u16 {
        let max = self.document.max_scroll();
        if max <= 0.0 {
            return 100;
        }
        ((self.document.scroll_y() / max) * 100.0).round() as u16
    }

    fn dispatch(&mut self, event: PageEvent) {
        let effects = self.controller.handle(event, &self.document);
        self.apply(effects);
    }

    /// Project effects onto the screen state and perform host requests
    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.projection.apply(&effect);
            match effect {
                Effect::ScrollTo { top, behavior } => match behavior {
                    ScrollBehavior::Smooth => self.animator.scroll_to(top, self.document.max_scroll()),
                    ScrollBehavior::Instant => {
                        self.animator.set_scroll(top);
                        self.set_scroll(top);
                    }
                },
                Effect::Alert { message } => self.mode = Mode::Alert(message),
                Effect::PushFragment { anchor } => {
                    self.status_message = Some(anchor.to_string());
                }
                Effect::SetClass {
                    target: lumen_core::Target::NavLinks,
                    ..
                } => self.relayout(),
                _ => {}
            }
        }
    }

    fn set_scroll(&mut self, y: f64) {
        if y != self.document.scroll_y() {
            self.document.set_scroll_y(y);
            self.dispatch(PageEvent::Scroll);
        }
    }

    fn scroll_lines(&mut self, lines: f64) {
        let delta = lines * self.document.cell_height();
        self.animator.scroll_by(delta, self.document.max_scroll());
    }

    fn cycle_link(&mut self, step: isize) {
        let count = self.nav_links.len() as isize;
        if count == 0 {
            return;
        }
        let next = match self.focused_link {
            Some(i) => (i as isize + step).rem_euclid(count),
            None if step > 0 => 0,
            None => count - 1,
        };
        self.focused_link = Some(next as usize);
    }

    fn click_at(&mut self, position: Position) {
        if let Mode::Alert(_) = self.mode {
            self.mode = Mode::Normal;
            return;
        }

        if self.layout.toggle.is_some_and(|bar| bar.contains(position)) {
            self.dispatch(PageEvent::ToggleMenu);
            return;
        }

        if let Some(index) = self.layout.nav_link_at(position, self.nav_links.len()) {
            self.focused_link = Some(index);
            let href = self.nav_links[index].href.clone();
            self.click(&href, true);
            return;
        }

        if self.projection.to_top_visible && self.layout.to_top.contains(position) {
            self.handle_action(Action::BackToTop);
            return;
        }

        if self.layout.page.contains(position) {
            let row = self.document.first_visible_row() + (position.y - self.layout.page.y) as usize;
            let on_form = self
                .document
                .layout()
                .visible_items(row, 1)
                .any(|item| item.kind == ItemKind::Form);
            if on_form {
                self.dispatch(PageEvent::SubmitForm);
            }
        }
    }

    fn relayout(&mut self) {
        let (width, height) = self.size;
        let area = Rect::new(0, 0, width, height);
        self.layout = AppLayout::compute(area, self.config.ui.nav_width, self.projection.menu_open);

        let page = self.layout.page;
        self.document
            .resize(page.x + 1, page.width.saturating_sub(2).max(1), page.height.max(1));
        debug!("Layout: page {:?}, nav {:?}", page, self.layout.nav);
    }
}
