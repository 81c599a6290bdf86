use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use lumen_core::page::{ItemKind, LayoutItem};

use crate::app::App;

/// The scrolled page: visible layout rows plus the back-to-top button
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let document = &app.document;
        let first = document.first_visible_row();
        let rows = area.height as usize;
        let text_area_x = area.x + 1;
        let text_width = area.width.saturating_sub(2);

        for item in document.layout().visible_items(first, rows) {
            let style = Self::item_style(item, app);
            for (offset, text) in item.lines.iter().enumerate() {
                let row = item.top + offset;
                if row < first || row >= first + rows {
                    continue;
                }
                let text = match item.kind {
                    ItemKind::Year => Self::year_line(app),
                    _ => text.clone(),
                };
                let y = area.y + (row - first) as u16;
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(text, style))),
                    Rect::new(text_area_x, y, text_width, 1),
                );
            }
        }

        if app.projection.to_top_visible {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " ↑ Top ",
                    Style::default()
                        .fg(theme.bg0)
                        .bg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                app.layout.to_top,
            );
        }
    }

    fn item_style(item: &LayoutItem, app: &App) -> Style {
        let theme = &app.theme;
        match &item.kind {
            ItemKind::Title => Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ItemKind::Tagline => Style::default().fg(theme.grey2).add_modifier(Modifier::ITALIC),
            ItemKind::SectionHeading { section } => {
                let style = Style::default().add_modifier(Modifier::BOLD);
                if app.controller.active_section() == Some(section.as_str()) {
                    style.fg(theme.active)
                } else {
                    style.fg(theme.yellow)
                }
            }
            ItemKind::Block { reveal: Some(id), .. } => {
                if app.projection.is_revealed(id) {
                    Style::default().fg(theme.fg0)
                } else {
                    Style::default().fg(theme.hidden)
                }
            }
            ItemKind::Block { reveal: None, .. } => Style::default().fg(theme.fg1),
            ItemKind::Form => Style::default()
                .fg(theme.bg0)
                .bg(theme.green)
                .add_modifier(Modifier::BOLD),
            ItemKind::Footer | ItemKind::Year => Style::default().fg(theme.grey1),
        }
    }

    fn year_line(app: &App) -> String {
        match &app.projection.year {
            Some(year) => format!("© {} {}", year, app.document.spec().title),
            None => String::new(),
        }
    }
}
