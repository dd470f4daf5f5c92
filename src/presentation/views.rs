//! View functions: pure builders from application state to UI sub-trees.

use chrono::{DateTime, Local};

use crate::application::state::AppState;
use crate::domain::entities::{EventId, EventSummary, Guest};

use super::events::Intent;
use super::tree::{Kid, Node, el, prop, text};

/// Static description of one creation-form field.
#[derive(Debug, Clone, Copy)]
pub struct FormField {
    /// Human-facing label.
    pub label: &'static str,
    /// Submission name of the field.
    pub name: &'static str,
    /// Placeholder shown while empty.
    pub placeholder: &'static str,
    /// Element tag used for the field.
    pub tag: &'static str,
}

/// The creation-form fields, in display order. Shared by the form view and
/// the editor buffers so both sides agree on names and labels.
pub const FORM_FIELDS: [FormField; 4] = [
    FormField {
        label: "Name",
        name: "name",
        placeholder: "Gala Night",
        tag: "input",
    },
    FormField {
        label: "Description",
        name: "description",
        placeholder: "Theme, attire, and more...",
        tag: "textarea",
    },
    FormField {
        label: "Date",
        name: "date",
        placeholder: "2025-12-31",
        tag: "input",
    },
    FormField {
        label: "Location",
        name: "location",
        placeholder: "Main Hall A",
        tag: "input",
    },
];

/// Live values of the creation form, injected into the built tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Event name.
    pub name: String,
    /// Event description.
    pub description: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Event location.
    pub location: String,
}

impl FormValues {
    /// Returns the value for a submission field name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> &str {
        match name {
            "name" => &self.name,
            "description" => &self.description,
            "date" => &self.date,
            "location" => &self.location,
            _ => "",
        }
    }
}

/// Builds the whole view: header, optional status line, and the main
/// layout with the form above the list and details panes.
#[must_use]
pub fn build_tree(state: &AppState, form: &FormValues) -> Node {
    let status: Kid = if let Some(error) = &state.error {
        el(
            "div",
            [prop("class", "status error")],
            [text(format!("Error: {error}"))],
        )
        .into()
    } else if state.loading {
        el("div", [prop("class", "status loading")], [text("Loading...")]).into()
    } else {
        Kid::None
    };

    el(
        "div",
        [prop("class", "app")],
        [
            el("header", [], [el("h1", [], [text("Party Planner Admin")]).into()]).into(),
            status,
            el(
                "main",
                [prop("class", "layout")],
                [
                    form_view(form).into(),
                    el(
                        "div",
                        [prop("class", "panes")],
                        [list_view(state).into(), details_view(state).into()],
                    )
                    .into(),
                ],
            )
            .into(),
            el(
                "footer",
                [prop("class", "hints")],
                [text(
                    "Tab focus | Up/Down move | Enter select/submit | d delete | r refresh | q quit",
                )],
            )
            .into(),
        ],
    )
}

/// Builds the creation form with the current field values injected.
#[must_use]
pub fn form_view(values: &FormValues) -> Node {
    let fields: Vec<Kid> = FORM_FIELDS
        .iter()
        .map(|field| {
            let mut props = vec![
                prop("name", field.name),
                prop("required", true),
                prop("value", values.by_name(field.name)),
                prop("placeholder", field.placeholder),
            ];
            if field.name == "date" {
                props.push(prop("type", "date"));
            }
            el(
                "label",
                [],
                [text(field.label), el(field.tag, props, []).into()],
            )
            .into()
        })
        .collect();

    el(
        "form",
        [prop("class", "party-form"), prop("onSubmit", Intent::SubmitForm)],
        [
            el("h2", [], [text("Add a New Party")]).into(),
            Kid::from(fields),
            el("button", [prop("type", "submit")], [text("Create Party")]).into(),
        ],
    )
}

/// Builds the selectable event list. Shows a single placeholder row when
/// there are no events.
#[must_use]
pub fn list_view(state: &AppState) -> Node {
    let rows: Vec<Kid> = if state.events.is_empty() {
        vec![el("li", [prop("class", "empty")], [text("No events yet.")]).into()]
    } else {
        state
            .events
            .iter()
            .map(|event| list_item(event, state.selected_id).into())
            .collect()
    };

    el(
        "section",
        [prop("class", "party-list")],
        [
            el("h2", [], [text("Upcoming Parties")]).into(),
            el("ul", [], [Kid::from(rows)]).into(),
        ],
    )
}

fn list_item(event: &EventSummary, selected: Option<EventId>) -> Node {
    let class = if selected == Some(event.id()) {
        "party-item selected"
    } else {
        "party-item"
    };

    el(
        "li",
        [
            prop("class", class),
            prop("title", format_date_time(event.date())),
            prop("onClick", Intent::Select(event.id())),
        ],
        [
            el("strong", [], [text(event.name())]).into(),
            text(" "),
            el(
                "span",
                [prop("class", "meta")],
                [text(format!(
                    "{} | {}",
                    format_date_short(event.date()),
                    event.location()
                ))],
            )
            .into(),
        ],
    )
}

/// Builds the details pane for the selected event, or its placeholder.
#[must_use]
pub fn details_view(state: &AppState) -> Node {
    let heading = el("h2", [], [text("Details")]);

    let Some(detail) = state.selected_detail.as_ref() else {
        return el(
            "section",
            [prop("class", "party-details")],
            [
                heading.into(),
                el(
                    "p",
                    [prop("class", "placeholder")],
                    [text("Select a party to see details.")],
                )
                .into(),
            ],
        );
    };

    let description = if detail.description().is_empty() {
        "No description."
    } else {
        detail.description()
    };

    let guests: Kid = if detail.guests().is_empty() {
        Kid::None
    } else {
        Kid::Many(vec![
            el("h4", [], [text("Guest List")]).into(),
            el(
                "ul",
                [],
                [Kid::from(
                    detail
                        .guests()
                        .iter()
                        .map(|guest| guest_item(guest).into())
                        .collect::<Vec<Kid>>(),
                )],
            )
            .into(),
        ])
    };

    el(
        "section",
        [prop("class", "party-details")],
        [
            heading.into(),
            el("h3", [], [text(detail.name())]).into(),
            el(
                "div",
                [],
                [
                    el("strong", [], [text("When: ")]).into(),
                    text(format_date_time(detail.date())),
                ],
            )
            .into(),
            el(
                "div",
                [],
                [
                    el("strong", [], [text("Where: ")]).into(),
                    text(detail.location()),
                ],
            )
            .into(),
            el("p", [], [text(description)]).into(),
            guests,
            el(
                "button",
                [prop("class", "danger"), prop("onClick", Intent::RequestDelete)],
                [text("Delete Party")],
            )
            .into(),
        ],
    )
}

fn guest_item(guest: &Guest) -> Node {
    let line = match guest.email() {
        Some(email) => format!("{} <{}>", guest.name(), email),
        None => guest.name().to_string(),
    };
    el("li", [], [text(line)])
}

/// Formats an ISO timestamp as a local date and time; a string that fails
/// to parse is shown unchanged.
#[must_use]
pub fn format_date_time(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format("%b %-d, %Y %-I:%M %p")
            .to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Formats an ISO timestamp as a local calendar date; a string that fails
/// to parse is shown unchanged.
#[must_use]
pub fn format_date_short(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(parsed) => parsed.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        Err(_) => iso.to_string(),
    }
}
