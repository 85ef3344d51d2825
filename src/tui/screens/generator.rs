//! Main screen: text input, style selector, result region.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::art::EXPORT_FILE_NAME;
use crate::tui::state::{App, Focus};
use crate::tui::theme::Theme;
use crate::tui::widgets::card::CardWidget;
use crate::tui::widgets::footer::draw_footer;

pub(crate) fn draw_generator(area: Rect, f: &mut ratatui::Frame, app: &App, theme: Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // text input
            Constraint::Length(3), // style selector
            Constraint::Min(3),    // result
            Constraint::Length(1), // footer
        ])
        .split(area);

    draw_text_input(layout[0], f, app, &theme);
    draw_style_select(layout[1], f, app, &theme);
    draw_result(layout[2], f, app, &theme);

    let download = format!("Save {EXPORT_FILE_NAME}");
    let hints = [
        ("Enter", "Generate", true),
        ("Tab", "Field", true),
        ("◄/►", "Style", app.focus == Focus::Style),
        ("Ctrl+S", download.as_str(), app.result.download_enabled()),
        ("PgUp/PgDn", "Scroll", !app.result.text().is_empty()),
        ("Ctrl+T", "Title", true),
        ("Esc", "Quit", true),
    ];
    draw_footer(layout[3], f, &theme, &hints);
}

fn draw_text_input(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Text;
    let mut spans = vec![Span::styled(
        app.text_input.as_str(),
        Style::default().fg(theme.text),
    )];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(theme.oracle)));
    } else if app.text_input.is_empty() {
        spans.push(Span::styled(
            "Type some text...",
            Style::default().fg(theme.muted),
        ));
    }

    let line = Line::from(spans);
    let width = line.width();
    CardWidget::new("Text")
        .border_color(theme.focus_color(focused))
        .line(line)
        .tail(width, area)
        .render(area, f, theme);
}

fn draw_style_select(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let focused = app.focus == Focus::Style;
    let arrow_style = Style::default().fg(theme.focus_color(focused));
    let total = app.config.styles.available.len();

    let line = Line::from(vec![
        Span::styled("◄ ", arrow_style),
        Span::styled(
            app.style(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ►", arrow_style),
        Span::styled(
            format!("   {}/{}", app.style_index + 1, total),
            Style::default().fg(theme.muted),
        ),
    ]);

    CardWidget::new("Style")
        .border_color(theme.focus_color(focused))
        .line(line)
        .render(area, f, theme);
}

fn draw_result(area: Rect, f: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let text = app.result.text();
    let enabled = app.result.download_enabled();
    let color = theme.result_color(enabled, text.is_empty());

    let lines = text
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(color))));

    let mut card = CardWidget::new("Result").lines(lines).no_wrap(app.result_scroll);

    card = if app.is_generating() {
        card.badge(
            format!("{} Generating...", app.animation.spinner_char()),
            theme.oracle,
        )
    } else if enabled {
        card.badge("download ready", theme.optimal)
    } else {
        card.badge("download disabled", theme.muted)
    };

    card.render(area, f, theme);
}
