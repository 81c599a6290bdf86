use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use lumen_core::anchor::{classify_href, LinkTarget};

use crate::app::App;

pub struct NavWidget;

impl NavWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        // In compact mode the pane floats over the page
        if app.layout.toggle.is_some() {
            frame.render_widget(Clear, area);
        }

        let block = Block::default()
            .title(" Menu ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));

        let items: Vec<ListItem> = app
            .nav_links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let is_active = app.projection.active_links.contains(&i);
                let marker = if is_active { "▸ " } else { "  " };
                let external = match classify_href(&link.href) {
                    LinkTarget::External(_) => " ↗",
                    _ => "",
                };

                let style = if is_active {
                    Style::default().fg(theme.active).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg1)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.active)),
                    Span::styled(link.label.clone(), style),
                    Span::styled(external, Style::default().fg(theme.grey1)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        state.select(app.focused_link);

        frame.render_stateful_widget(list, area, &mut state);
    }

    /// Compact-mode toggle bar
    pub fn render_toggle(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let state = if app.projection.aria_expanded { "▾" } else { "▸" };

        let line = Line::from(vec![
            Span::styled(
                format!(" ≡ Menu {} ", state),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", app.document.spec().title),
                Style::default().fg(theme.fg0),
            ),
        ]);

        frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg1)), area);
    }
}
