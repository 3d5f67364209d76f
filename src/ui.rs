pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use typerace::tracker::CharacterStatus;
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.race.has_finished() {
            render_results(self, area, buf);
        } else {
            render_typing(self, area, buf);
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let race = &app.race;
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);

    let prompt: String = race.reference().iter().collect();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_occupied_lines = if prompt.width() <= max_chars_per_line as usize {
        1
    } else {
        ((prompt.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };
    let padding = area.height.saturating_sub(prompt_occupied_lines) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding.saturating_sub(2)),
            Constraint::Length(2), // clock + live metrics
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(padding),
        ])
        .split(area);

    // Caret sits on the first pending character.
    let caret = race.input().len();
    let spans = race
        .character_statuses()
        .into_iter()
        .enumerate()
        .map(|(idx, cell)| match cell.status {
            CharacterStatus::Correct => Span::styled(cell.ch.to_string(), green_bold_style),
            CharacterStatus::Error => Span::styled(
                match cell.ch {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            CharacterStatus::Pending if idx == caret => {
                Span::styled(cell.ch.to_string(), underlined_dim_bold_style)
            }
            CharacterStatus::Pending => Span::styled(cell.ch.to_string(), dim_bold_style),
        })
        .collect::<Vec<Span>>();

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let clock = match race.seconds_remaining() {
        Some(remaining) => format!("{remaining}s left"),
        None => format!("{}s", race.elapsed()),
    };
    let live = race
        .live()
        .map(|m| format!("   {} wpm   {:.0}% acc   {:.0}%", m.wpm, m.accuracy, m.progress))
        .unwrap_or_default();

    Paragraph::new(Span::styled(format!("{clock}{live}"), dim_bold_style))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(result) = app.race.result() else {
        return;
    };
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let coords = result.history.coords();
    let bounds = charting::compute_chart_params(&coords, result.elapsed);

    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&coords)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([bounds.min_secs, bounds.max_secs])
                .labels(vec![
                    Span::styled(charting::format_label(bounds.min_secs), bold_style),
                    Span::styled(charting::format_label(bounds.max_secs), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, bounds.max_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(bounds.max_wpm), bold_style),
                ]),
        )
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {:.0}% acc   {}s   {} {}",
            result.wpm, result.accuracy, result.elapsed, result.mode, result.mode_option
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled("(r)etry / (esc)ape", italic_style)).render(chunks[3], buf);
}
