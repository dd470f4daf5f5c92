//! Screen chrome: focus, cursors, form buffers, and overlay state.
//!
//! None of this belongs to the application state record; it is
//! presentation-local and drawn over the committed tree.

use ratatui::style::Color;

use super::views::{FORM_FIELDS, FormValues};
use super::widgets::TextInput;

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The creation form.
    Form,
    /// The event list.
    List,
    /// The details pane.
    Details,
}

/// Editor buffers behind the creation form: one input per field plus a
/// virtual slot for the submit control.
pub struct FormChrome {
    fields: Vec<TextInput>,
    focused: usize,
    active: bool,
}

impl FormChrome {
    fn new(accent: Color) -> Self {
        let fields = FORM_FIELDS
            .iter()
            .map(|field| {
                TextInput::new(field.label)
                    .placeholder(field.placeholder)
                    .accent(accent)
            })
            .collect();
        Self {
            fields,
            focused: 0,
            active: false,
        }
    }

    /// Snapshot of the current field values for the view functions.
    #[must_use]
    pub fn values(&self) -> FormValues {
        let mut values = FormValues::default();
        for (field, input) in FORM_FIELDS.iter().zip(&self.fields) {
            let value = input.value().to_string();
            match field.name {
                "name" => values.name = value,
                "description" => values.description = value,
                "date" => values.date = value,
                "location" => values.location = value,
                _ => {}
            }
        }
        values
    }

    /// Clears every field and moves focus back to the first one.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focused = 0;
        self.sync_focus();
    }

    /// True when the focus slot is the submit control.
    #[must_use]
    pub fn on_submit_button(&self) -> bool {
        self.focused == self.fields.len()
    }

    /// Moves field focus down, ending on the submit control.
    pub fn focus_next_field(&mut self) {
        if self.focused < self.fields.len() {
            self.focused += 1;
        }
        self.sync_focus();
    }

    /// Moves field focus up.
    pub fn focus_prev_field(&mut self) {
        self.focused = self.focused.saturating_sub(1);
        self.sync_focus();
    }

    /// The input under the focus slot; absent on the submit control.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        self.fields.get_mut(self.focused)
    }

    /// Marks the whole form pane active or inactive.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.sync_focus();
    }

    /// True while the form pane holds keyboard focus.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The field widgets, in display order.
    #[must_use]
    pub fn fields(&self) -> &[TextInput] {
        &self.fields
    }

    fn sync_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focused(self.active && i == self.focused);
        }
    }
}

/// Presentation-local state drawn around the committed tree.
pub struct Chrome {
    /// Pane focus.
    pub focus: Focus,
    /// Cursor row in the list pane.
    pub list_cursor: usize,
    /// Creation-form buffers.
    pub form: FormChrome,
    /// True while the delete-confirmation overlay is open.
    pub confirm_delete: bool,
    /// Form-local hint, e.g. the required-field message.
    pub form_hint: Option<String>,
    /// Accent color for focus and selection highlights.
    pub accent: Color,
}

impl Chrome {
    /// Creates chrome with list focus and empty form buffers.
    #[must_use]
    pub fn new(accent: Color) -> Self {
        Self {
            focus: Focus::List,
            list_cursor: 0,
            form: FormChrome::new(accent),
            confirm_delete: false,
            form_hint: None,
            accent,
        }
    }

    /// Moves pane focus to `focus` and updates the form's active flag.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.form.set_active(focus == Focus::Form);
    }

    /// Cycles pane focus forward.
    pub fn focus_next(&mut self) {
        self.set_focus(match self.focus {
            Focus::Form => Focus::List,
            Focus::List => Focus::Details,
            Focus::Details => Focus::Form,
        });
    }

    /// Cycles pane focus backward.
    pub fn focus_prev(&mut self) {
        self.set_focus(match self.focus {
            Focus::Form => Focus::Details,
            Focus::List => Focus::Form,
            Focus::Details => Focus::List,
        });
    }

    /// Keeps the list cursor inside the current row count.
    pub fn clamp_list_cursor(&mut self, rows: usize) {
        self.list_cursor = self.list_cursor.min(rows.saturating_sub(1));
    }
}
