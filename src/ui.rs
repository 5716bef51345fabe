use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::editor::Editor;
use crate::prompt::FilenamePrompt;
use crate::session::{Phase, Session};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &Session {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim_italic = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(2),
            ])
            .split(area);

        let (header, footer) = match self.phase {
            Phase::Composing => (
                Line::from(format!(
                    "You have {} remaining to write your burst.",
                    self.countdown.format_remaining()
                )),
                Line::from(Span::styled("(ctrl+c to quit)", dim_italic)),
            ),
            Phase::TimedOut => (
                Line::from(Span::styled(
                    format!("Time is up! Your wpm was {}", self.wpm),
                    bold,
                )),
                filename_line(&self.filename),
            ),
        };

        Paragraph::new(header).render(chunks[0], buf);
        Paragraph::new(editor_text(&self.editor))
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);
        Paragraph::new(footer).render(chunks[2], buf);
    }
}

/// Splits `line` into before/at/after spans around a character offset, with
/// the cursor cell rendered reversed. A cursor past the end shows as a
/// reversed space.
fn spans_with_cursor(line: &str, col: usize) -> Vec<Span<'static>> {
    let cursor_style = Style::default().add_modifier(Modifier::REVERSED);

    match line.char_indices().nth(col) {
        Some((idx, ch)) => {
            let after_idx = idx + ch.len_utf8();
            vec![
                Span::raw(line[..idx].to_string()),
                Span::styled(ch.to_string(), cursor_style),
                Span::raw(line[after_idx..].to_string()),
            ]
        }
        None => vec![
            Span::raw(line.to_string()),
            Span::styled(" ".to_string(), cursor_style),
        ],
    }
}

fn editor_text(editor: &Editor) -> Text<'static> {
    if editor.is_empty() && !editor.placeholder().is_empty() {
        let placeholder_style = Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC);
        return Text::from(Line::from(Span::styled(
            editor.placeholder().to_string(),
            placeholder_style,
        )));
    }

    let (row, col) = editor.cursor();
    let lines = editor
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if editor.is_focused() && i == row {
                Line::from(spans_with_cursor(line, col))
            } else {
                Line::from(line.clone())
            }
        })
        .collect::<Vec<Line>>();

    Text::from(lines)
}

fn filename_line(prompt: &FilenamePrompt) -> Line<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled("Enter filename: ".to_string(), bold)];
    if prompt.is_focused() {
        spans.extend(spans_with_cursor(prompt.value(), prompt.cursor()));
    } else {
        spans.push(Span::raw(prompt.value().to_string()));
    }
    Line::from(spans)
}
