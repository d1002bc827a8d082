use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use ringpager_core::SlotPosition;

use crate::app::{App, SlotKind};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let pager = &app.pager;
        let bar = Style::default().bg(theme.bg2);

        let position = if pager.is_empty() {
            " no pages ".to_string()
        } else {
            format!(" {}/{} ", pager.current_position() + 1, pager.len())
        };

        let mut spans = vec![
            Span::styled(
                position,
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} | {} ", pager.direction(), pager.scroll_state()),
                bar.fg(theme.fg0),
            ),
        ];

        for position in SlotPosition::ALL {
            let (text, color) = match app.slot_kind(position) {
                SlotKind::Real(page) => (format!("{}:{}", position, page + 1), theme.real),
                SlotKind::Dummy(page) => (format!("{}:{}*", position, page + 1), theme.dummy),
                SlotKind::Empty => (format!("{}:-", position), theme.empty),
            };
            spans.push(Span::styled(format!(" {} ", text), bar.fg(color)));
        }

        if let Some(msg) = &app.status_message {
            spans.push(Span::styled(msg.clone(), bar.fg(theme.orange)));
        } else {
            let recent = app
                .recent_changes()
                .iter()
                .map(|p| (p + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ");
            if !recent.is_empty() {
                spans.push(Span::styled(format!(" seen: {} ", recent), bar.fg(theme.grey2)));
            }
        }

        let help_hint = " h/l:swipe 1-9:go q:quit ";
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(used + help_hint.len());
        spans.push(Span::styled(" ".repeat(padding), bar));
        spans.push(Span::styled(help_hint, bar.fg(theme.aqua)));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(bar), area);
    }
}
