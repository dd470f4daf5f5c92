//! The commit step: draws a built UI tree into the terminal frame.
//!
//! This is the second half of the render loop. The first half builds a
//! fresh tree from state ([`super::views::build_tree`]); this half owns the
//! whole frame and overwrites it from the tree on every call. No node or
//! widget survives between draws.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::screen::{Chrome, Focus};
use super::tree::{Element, Node};

const FORM_HEIGHT: u16 = 10;

/// Draws the whole frame from the tree.
pub fn commit(frame: &mut Frame, tree: &Node, chrome: &Chrome) {
    let Some(root) = tree.as_element() else {
        return;
    };
    let status = root.find_by_class("status");

    let [header_area, status_area, main_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(u16::from(status.is_some())),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    if let Some(header) = root.elements_by_tag("header").first() {
        frame.render_widget(
            Paragraph::new(header.text_content())
                .style(Style::default().add_modifier(Modifier::BOLD)),
            header_area,
        );
    }

    if let Some(status) = status {
        frame.render_widget(
            Paragraph::new(status.text_content()).style(style_of(status, chrome.accent)),
            status_area,
        );
    }

    if let Some(footer) = root.find_by_class("hints") {
        frame.render_widget(
            Paragraph::new(footer.text_content()).style(Style::default().fg(Color::DarkGray)),
            footer_area,
        );
    }

    let [form_area, panes_area] =
        Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Fill(1)]).areas(main_area);

    if let Some(form) = root.find_by_class("party-form") {
        render_form(frame, form, chrome, form_area);
    }

    let [list_area, details_area] =
        Layout::horizontal([Constraint::Fill(2), Constraint::Fill(3)]).areas(panes_area);

    if let Some(list) = root.find_by_class("party-list") {
        render_list(frame, list, chrome, list_area);
    }
    if let Some(details) = root.find_by_class("party-details") {
        render_details(frame, details, chrome, details_area);
    }

    if chrome.confirm_delete {
        render_confirm(frame, chrome.accent);
    }
}

fn pane_block(title: String, focused: bool, accent: Color) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {title} "))
}

fn pane_title(element: &Element) -> String {
    element
        .elements_by_tag("h2")
        .first()
        .map(|h| h.text_content())
        .unwrap_or_default()
}

fn render_form(frame: &mut Frame, form: &Element, chrome: &Chrome, area: Rect) {
    let block = pane_block(pane_title(form), chrome.focus == Focus::Form, chrome.accent);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [row_one, row_two, hint_area, button_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let [cell_one, cell_two] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(row_one);
    let [cell_three, cell_four] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(row_two);
    let cells = [cell_one, cell_two, cell_three, cell_four];

    for (field, cell) in chrome.form.fields().iter().zip(cells) {
        frame.render_widget(field, cell);
    }

    if let Some(hint) = &chrome.form_hint {
        frame.render_widget(
            Paragraph::new(hint.as_str()).style(Style::default().fg(Color::Red)),
            hint_area,
        );
    }

    if let Some(button) = form.elements_by_tag("button").first() {
        let mut style = Style::default().fg(chrome.accent);
        if chrome.focus == Focus::Form && chrome.form.on_submit_button() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(
            Paragraph::new(format!("[ {} ]", button.text_content())).style(style),
            button_area,
        );
    }
}

fn render_list(frame: &mut Frame, list: &Element, chrome: &Chrome, area: Rect) {
    let block = pane_block(pane_title(list), chrome.focus == Focus::List, chrome.accent);

    let items: Vec<ListItem> = list
        .elements_by_tag("li")
        .into_iter()
        .map(|li| ListItem::new(Line::from(spans_of(li, chrome.accent))))
        .collect();

    let widget = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut cursor = ListState::default();
    if chrome.focus == Focus::List {
        cursor.select(Some(chrome.list_cursor));
    }
    frame.render_stateful_widget(widget, area, &mut cursor);
}

fn render_details(frame: &mut Frame, details: &Element, chrome: &Chrome, area: Rect) {
    let block = pane_block(pane_title(details), chrome.focus == Focus::Details, chrome.accent);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for child in details.child_elements() {
        match child.tag() {
            // Already shown as the pane title.
            "h2" => {}
            "h4" => {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    child.text_content(),
                    style_of(child, chrome.accent),
                )));
            }
            "ul" => {
                for li in child.elements_by_tag("li") {
                    lines.push(Line::from(format!("  - {}", li.text_content())));
                }
            }
            "button" => {
                lines.push(Line::default());
                let mut style = style_of(child, chrome.accent);
                if chrome.focus == Focus::Details {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                lines.push(Line::from(Span::styled(
                    format!("[ {} ]", child.text_content()),
                    style,
                )));
            }
            _ => lines.push(Line::from(spans_of(child, chrome.accent))),
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_confirm(frame: &mut Frame, accent: Color) {
    let popup = centered(frame.area(), 36, 5);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Confirm ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines = vec![
        Line::from("Delete this party?"),
        Line::from(vec![
            Span::styled(
                "[y]",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" delete   "),
            Span::styled("[n]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, popup, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(vertical);
    popup
}

/// Spans for one element's children, styled from the tree.
fn spans_of<'a>(element: &'a Element, accent: Color) -> Vec<Span<'a>> {
    let base = style_of(element, accent);
    let mut spans = Vec::new();
    for child in element.children() {
        match child {
            Node::Text(value) => spans.push(Span::styled(value.as_str(), base)),
            Node::Element(e) => spans.push(Span::styled(
                e.text_content(),
                base.patch(style_of(e, accent)),
            )),
        }
    }
    spans
}

/// Terminal style for one element: tag defaults, then classes, then the
/// inline style map.
fn style_of(element: &Element, accent: Color) -> Style {
    let mut style = Style::default();

    if matches!(element.tag(), "strong" | "h1" | "h2" | "h3" | "h4") {
        style = style.add_modifier(Modifier::BOLD);
    }

    for class in element.classes() {
        style = match class.as_str() {
            "error" => style.fg(Color::Red).add_modifier(Modifier::BOLD),
            "loading" | "meta" | "placeholder" | "empty" | "hints" => style.fg(Color::DarkGray),
            "selected" => style.fg(accent).add_modifier(Modifier::BOLD),
            "danger" => style.fg(Color::Red),
            _ => style,
        };
    }

    if let Some(Ok(color)) = element.style("fg").map(str::parse) {
        style = style.fg(color);
    }
    if let Some(Ok(color)) = element.style("bg").map(str::parse) {
        style = style.bg(color);
    }
    if element.style("bold") == Some("true") {
        style = style.add_modifier(Modifier::BOLD);
    }
    if element.style("dim") == Some("true") {
        style = style.add_modifier(Modifier::DIM);
    }
    if element.style("italic") == Some("true") {
        style = style.add_modifier(Modifier::ITALIC);
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::state::AppState;
    use crate::domain::entities::{EventDetail, EventId, EventSummary};
    use crate::presentation::tree::{el, prop, style as style_map, text};
    use crate::presentation::views::{FormValues, build_tree};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_text(buffer: &Buffer) -> String {
        let mut out = String::new();
        for y in buffer.area.top()..buffer.area.bottom() {
            for x in buffer.area.left()..buffer.area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn demo_state() -> AppState {
        let mut state = AppState::new();
        state.events = vec![
            EventSummary::new(1, "Gala", "2025-12-31T18:30:00.000Z", "Hall A"),
            EventSummary::new(2, "Brunch", "2026-01-01T10:00:00.000Z", "Patio"),
        ];
        state.selected_id = Some(EventId(1));
        state.selected_detail = Some(EventDetail::new(
            1,
            "Gala",
            "2025-12-31T18:30:00.000Z",
            "Hall A",
            "Fun",
        ));
        state
    }

    #[test]
    fn test_commit_draws_every_section() {
        let tree = build_tree(&demo_state(), &FormValues::default());
        let chrome = Chrome::new(Color::Cyan);
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();

        terminal
            .draw(|frame| commit(frame, &tree, &chrome))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Party Planner Admin"));
        assert!(text.contains("Add a New Party"));
        assert!(text.contains("Upcoming Parties"));
        assert!(text.contains("Gala"));
        assert!(text.contains("Details"));
        assert!(text.contains("Delete Party"));
    }

    #[test]
    fn test_commit_draws_error_banner() {
        let mut state = demo_state();
        state.error = Some("Failed to load events: HTTP 500".to_string());
        let tree = build_tree(&state, &FormValues::default());
        let chrome = Chrome::new(Color::Cyan);
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();

        terminal
            .draw(|frame| commit(frame, &tree, &chrome))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Error: Failed to load events: HTTP 500"));
    }

    #[test]
    fn test_commit_draws_confirm_overlay() {
        let tree = build_tree(&demo_state(), &FormValues::default());
        let mut chrome = Chrome::new(Color::Cyan);
        chrome.confirm_delete = true;
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();

        terminal
            .draw(|frame| commit(frame, &tree, &chrome))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Delete this party?"));
        assert!(text.contains("cancel"));
    }

    #[test]
    fn test_style_of_maps_classes_and_inline_styles() {
        let node = el(
            "div",
            [
                prop("class", "error"),
                prop("style", style_map([("italic", "true")])),
            ],
            [text("boom")],
        );
        let element = node.as_element().unwrap();

        let style = style_of(element, Color::Cyan);

        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert!(style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_inline_style_overrides_class_color() {
        let node = el(
            "span",
            [
                prop("class", "meta"),
                prop("style", style_map([("fg", "yellow")])),
            ],
            [],
        );

        let style = style_of(node.as_element().unwrap(), Color::Cyan);

        assert_eq!(style.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_selected_row_uses_accent() {
        let node = el("li", [prop("class", "party-item selected")], []);

        let style = style_of(node.as_element().unwrap(), Color::Magenta);

        assert_eq!(style.fg, Some(Color::Magenta));
    }
}
