use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::App;

/// Soft glow drawn under the eased pointer position
pub struct CursorLightWidget;

impl CursorLightWidget {
    /// Glow half-extent in cells
    const RADIUS_X: u16 = 2;
    const RADIUS_Y: u16 = 1;

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let Some(transform) = app.projection.light else {
            return;
        };
        let opacity = app
            .projection
            .light_opacity
            .unwrap_or(app.config.pointer.visible_opacity);
        if opacity <= 0.0 {
            return;
        }

        let column = (transform.x / app.config.ui.cell_width).floor();
        let row = (transform.y / app.config.ui.cell_height).floor();
        if column < 0.0 || row < 0.0 || column > u16::MAX as f64 || row > u16::MAX as f64 {
            return;
        }
        let (column, row) = (column as u16, row as u16);

        // Background-only styles keep the page text readable through the glow
        if opacity >= 0.5 {
            let rim = glow_rect(column, row, Self::RADIUS_X, Self::RADIUS_Y).intersection(area);
            if !rim.is_empty() {
                frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg3)), rim);
            }
        }
        let core = glow_rect(column, row, Self::RADIUS_X - 1, 0).intersection(area);
        if !core.is_empty() {
            frame.render_widget(Block::default().style(Style::default().bg(app.theme.light)), core);
        }
    }
}

/// Cells within `rx` columns and `ry` rows of the centre cell
fn glow_rect(column: u16, row: u16, rx: u16, ry: u16) -> Rect {
    let x = column.saturating_sub(rx);
    let y = row.saturating_sub(ry);
    Rect::new(x, y, column.saturating_add(rx + 1) - x, row.saturating_add(ry + 1) - y)
}

#[cfg(test)]
mod tests {
    use lumen_core::effect::Transform;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::app::tests::test_app;

    fn draw(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| CursorLightWidget::render(frame, frame.area(), app))
            .unwrap();
        terminal
    }

    #[test]
    fn test_glow_under_light() {
        let mut app = test_app();
        app.projection.light = Some(Transform { x: 84.0, y: 88.0 });
        app.projection.light_opacity = Some(0.7);

        let terminal = draw(&app);
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((10, 5)).unwrap().bg, app.theme.light);
        assert_eq!(buffer.cell((12, 5)).unwrap().bg, app.theme.bg3);
        assert_ne!(buffer.cell((20, 5)).unwrap().bg, app.theme.light);
    }

    #[test]
    fn test_hidden_light_draws_nothing() {
        let mut app = test_app();
        app.projection.light = Some(Transform { x: 84.0, y: 88.0 });
        app.projection.light_opacity = Some(0.0);

        let terminal = draw(&app);
        assert_ne!(terminal.backend().buffer().cell((10, 5)).unwrap().bg, app.theme.light);
    }
}
