//! Info/error popup drawn over the generator screen.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::tui::state::{App, ModalKind, ModalState};
use crate::tui::theme::Theme;

const MODAL_WIDTH_PERCENT: u16 = 60;

pub(crate) fn draw_modal(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let Some(modal) = &app.modal else {
        return;
    };

    let color = match modal.kind {
        ModalKind::Error => theme.critical,
        ModalKind::Info => theme.oracle,
    };

    let lines = modal_lines(modal, &theme);
    // Borders plus one line per row; wrapped messages may need more.
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = fitted_rect(MODAL_WIDTH_PERCENT, height, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", modal.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

fn modal_lines<'a>(modal: &'a ModalState, theme: &Theme) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = modal
        .message
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.text))))
        .collect();
    let hint = match modal.kind {
        ModalKind::Error => "Enter/Esc to dismiss",
        ModalKind::Info => "Enter to continue",
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint, Style::default().fg(theme.muted))));
    lines
}

/// Horizontally `percent_x` wide, exactly `height` rows tall (clamped to `r`), centered.
pub(crate) fn fitted_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(r.height))])
        .flex(Flex::Center)
        .areas(r);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
