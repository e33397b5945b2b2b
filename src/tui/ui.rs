use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{
    app::{App, Focus, Level, Modal},
    form::{EntryForm, Field},
};
use crate::{
    catalog::Subject,
    store::{format_rating, MAX_RATING, MIN_RATING},
};

const RATING_COL: usize = 6;

pub fn ui(f: &mut Frame, app: &mut App) {
    // header + body + footer
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let h = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(app.left_width),
            Constraint::Percentage(100 - app.left_width),
        ])
        .split(v[1]);

    draw_header(f, v[0], app);
    draw_tree(f, h[0], app);
    draw_right(f, h[1], app);
    draw_footer(f, v[2], app);

    match app.modal.as_ref() {
        Some(Modal::Form(form)) => draw_form(f, form, app),
        Some(Modal::ConfirmExit) => draw_confirm(
            f,
            app,
            " Confirm Exit ",
            "Are you sure you want to exit?",
            "[y] exit   [n] stay",
        ),
        Some(Modal::ConfirmReload) => draw_confirm(
            f,
            app,
            " Confirm Reload ",
            "Topics added since the last save will be lost.",
            "[y] reload   [n] keep",
        ),
        None => {}
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1]);
    horiz[1]
}

/// Truncates or pads `s` to exactly `width` terminal columns.
pub(crate) fn fit_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut w = 0;
    if UnicodeWidthStr::width(s) > width {
        let limit = width.saturating_sub(1);
        for ch in s.chars() {
            let cw = ch.width().unwrap_or(0);
            if w + cw > limit {
                break;
            }
            out.push(ch);
            w += cw;
        }
        if width > 0 {
            out.push('…');
            w += 1;
        }
    } else {
        out.push_str(s);
        w = UnicodeWidthStr::width(s);
    }
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(w)));
    out
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let bg = Block::default()
        .borders(Borders::NONE)
        .style(Style::default().bg(th.bar_bg));
    f.render_widget(bg, area);

    let mut segs = vec![Span::styled(
        " SAT Study Planner ",
        Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
    )];
    for subject in Subject::ALL {
        let style = if subject == app.tab {
            Style::default()
                .bg(th.accent)
                .fg(th.bar_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.muted)
        };
        segs.push(Span::raw(" "));
        segs.push(Span::styled(format!(" {} ", subject.tab_title()), style));
    }
    segs.push(Span::styled(" | rated:", Style::default().fg(th.muted)));
    segs.push(Span::styled(
        format!(" {}/{}", app.rated_count(), app.rows.len()),
        Style::default().fg(th.fg),
    ));
    segs.push(Span::styled(" | file:", Style::default().fg(th.muted)));
    segs.push(Span::styled(
        format!(" {}", app.session.path().display()),
        Style::default().fg(th.fg),
    ));
    let para = Paragraph::new(Line::from(segs)).style(Style::default().bg(th.bar_bg).fg(th.fg));
    f.render_widget(para, area);
}

fn draw_tree(f: &mut Frame, area: Rect, app: &mut App) {
    let th = app.theme;
    // borders + highlight symbol + separating space
    let label_w = (area.width as usize).saturating_sub(2 + 2 + 1 + RATING_COL);
    let store = app.session.store();
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| {
            let rating = store.rating(&row.path(app.tab));
            let depth = row.depth();
            let marker = match depth {
                0 => "▾ ",
                1 => "• ",
                _ => "· ",
            };
            let label = format!("{}{}{}", "  ".repeat(depth), marker, row.label());
            let label_style = match depth {
                0 => Style::default().fg(th.fg).add_modifier(Modifier::BOLD),
                1 => Style::default().fg(th.fg),
                _ => Style::default().fg(th.muted),
            };
            ListItem::new(Line::from(vec![
                Span::styled(fit_width(&label, label_w), label_style),
                Span::raw(" "),
                Span::styled(
                    format!("{:>width$}", format_rating(rating), width = RATING_COL),
                    Style::default().fg(th.rating_color(rating)),
                ),
            ]))
        })
        .collect();

    let border = if app.focus == Focus::Tree {
        th.accent
    } else {
        th.muted
    };
    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", app.tab.tab_title()),
                    Style::default().fg(th.accent),
                ))
                .title_bottom(Span::styled(" Rating ", Style::default().fg(th.muted)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(
            Style::default()
                .bg(th.selection_bg)
                .fg(th.fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_right(f: &mut Frame, area: Rect, app: &mut App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Min(5),
        ])
        .split(area);
    draw_rating(f, parts[0], app);
    draw_details(f, parts[1], app);
    draw_notes(f, parts[2], app);
}

fn draw_rating(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let block = Block::default()
        .title(Span::styled(" Topic Rating ", Style::default().fg(th.accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.muted));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    let ratio = ((app.slider - MIN_RATING) / (MAX_RATING - MIN_RATING)).clamp(0.0, 1.0);
    let gauge = LineGauge::default()
        .filled_style(Style::default().fg(th.rating_color(Some(app.slider))))
        .unfilled_style(Style::default().fg(th.muted))
        .label(format!("{:>4.1} ", app.slider))
        .ratio(ratio);
    f.render_widget(gauge, rows[0]);
    let path = app.selected_path().unwrap_or_default();
    let label = Line::from(vec![
        Span::styled(
            format!("Current Rating: {:.1}", app.slider),
            Style::default().fg(th.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   {}", path), Style::default().fg(th.muted)),
    ]);
    f.render_widget(Paragraph::new(label), rows[1]);
}

fn draw_details(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let mut lines: Vec<Line> = vec![];
    match app.selected_details() {
        Some(d) => {
            lines.push(Line::from(vec![
                Span::styled("Importance: ", Style::default().fg(th.muted)),
                Span::styled(d.importance.clone(), Style::default().fg(th.warn)),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Subtopics: ", Style::default().fg(th.muted)),
                Span::raw(d.subtopics.join(", ")),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Key concepts: ", Style::default().fg(th.muted)),
                Span::raw(d.key_concepts.join(", ")),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "Select a subtopic to see its key concepts.",
            Style::default().fg(th.muted),
        ))),
    }
    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(" Details ", Style::default().fg(th.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(th.muted)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn draw_notes(f: &mut Frame, area: Rect, app: &mut App) {
    let th = app.theme;
    let editing = app.focus == Focus::Notes;
    let hint = if editing {
        " Topic Notes  [Ctrl+S save | Esc back] "
    } else {
        " Topic Notes  [Enter edit] "
    };
    app.notes.set_block(
        Block::default()
            .title(Span::styled(hint, Style::default().fg(th.accent)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if editing { th.accent } else { th.muted })),
    );
    app.notes
        .set_style(Style::default().fg(th.fg).add_modifier(Modifier::BOLD));
    app.notes.set_cursor_line_style(Style::default());
    app.notes.set_cursor_style(if editing {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    });
    f.render_widget(&app.notes, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let th = app.theme;
    let bg = Block::default()
        .borders(Borders::NONE)
        .style(Style::default().bg(th.bar_bg));
    f.render_widget(bg, area);
    let line = match app.status.as_ref() {
        Some(st) => {
            let color = match st.level {
                Level::Info => th.good,
                Level::Error => th.error,
            };
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", st.at.format("%H:%M:%S")),
                    Style::default().fg(th.muted),
                ),
                Span::styled(st.text.clone(), Style::default().fg(color)),
            ])
        }
        None => Line::from(Span::styled(
            " [q]quit  [j/k]move  [Tab]subject  [←/→ +/-]rating  [1-9,0]set  [Enter]notes  [t]new topic  [s]new subtopic  [R]reload ",
            Style::default().fg(th.muted),
        )),
    };
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(th.bar_bg)),
        area,
    );
}

fn draw_form(f: &mut Frame, form: &EntryForm, app: &App) {
    let th = app.theme;
    let area = centered_rect(50, 40, f.area());
    f.render_widget(Clear, area);
    let field_style = |field: Field| {
        if form.field == field {
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(th.muted)
        }
    };
    let mut lines = vec![Line::from(vec![
        Span::styled("Select Subject: ", field_style(Field::Subject)),
        Span::styled(format!("‹ {} ›", form.subject.label()), Style::default().fg(th.fg)),
    ])];
    if form.fields().contains(&Field::Topic) {
        let topic = form.selected_topic().unwrap_or("(no topics)");
        lines.push(Line::from(vec![
            Span::styled("Select Topic:   ", field_style(Field::Topic)),
            Span::styled(format!("‹ {} ›", topic), Style::default().fg(th.fg)),
        ]));
    }
    let name_label = if form.fields().contains(&Field::Topic) {
        "Subtopic Name:  "
    } else {
        "Topic Name:     "
    };
    let mut name_spans = vec![
        Span::styled(name_label, field_style(Field::Name)),
        Span::styled(form.name.clone(), Style::default().fg(th.fg)),
    ];
    if form.field == Field::Name {
        name_spans.push(Span::styled("▏", Style::default().fg(th.accent)));
    }
    lines.push(Line::from(name_spans));
    lines.push(Line::from(" "));
    if let Some(err) = form.error {
        lines.push(Line::from(Span::styled(err, Style::default().fg(th.error))));
    }
    lines.push(Line::from(Span::styled(
        "[Tab/↑↓] field  [←/→] choose  [Enter] save  [Esc] cancel",
        Style::default().fg(th.muted),
    )));
    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(form.title(), Style::default().fg(th.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(th.muted)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn draw_confirm(f: &mut Frame, app: &App, title: &str, question: &str, hint: &str) {
    let th = app.theme;
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);
    let para = Paragraph::new(vec![
        Line::from(question.to_string()),
        Line::from(" "),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(th.muted))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(Span::styled(title.to_string(), Style::default().fg(th.accent)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(th.warn)),
    );
    f.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_width_pads_short_labels() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("", 2), "  ");
    }

    #[test]
    fn fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("abcdef", 4), "abc…");
        // wide characters count double
        assert_eq!(fit_width("数学数学", 5), "数学…");
        assert_eq!(fit_width("数学数", 4), "数… ");
        assert_eq!(fit_width("abc", 0), "");
    }
}
