//! Dropdown select for the profile step.
//!
//! A select has a closed field (shows the chosen value, a placeholder,
//! or a loading notice while its options are being fetched) and an open
//! popup listing the options. Option lists arrive asynchronously from
//! the location service, so a select can be empty, loading, or filled.

use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::{
    center_popup, disabled_border_style, disabled_text_style, focused_border_style,
    input_placeholder_style, input_text_style, unfocused_border_style,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};

/// State of one dropdown.
#[derive(Debug, Default)]
pub struct SelectState {
    options: Vec<String>,
    selected: Option<String>,
    list: ListState,
    open: bool,
    loading: bool,
}

impl SelectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select with a fixed option list (gender).
    pub fn with_options(options: Vec<String>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A select is usable once it has options and is not mid-fetch.
    pub fn is_ready(&self) -> bool {
        !self.loading && !self.options.is_empty()
    }

    /// Mark the option list as being fetched. Clears stale options.
    pub fn set_loading(&mut self) {
        self.loading = true;
        self.open = false;
        self.options.clear();
        self.list.select(None);
    }

    /// Install a freshly fetched option list.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.loading = false;
        self.list.select(None);
    }

    /// Drop the chosen value, leaving the options alone.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop everything: selection, options, loading flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn open(&mut self) {
        if !self.is_ready() {
            return;
        }
        // Start the highlight on the current selection.
        let index = self
            .selected
            .as_ref()
            .and_then(|s| self.options.iter().position(|o| o == s))
            .unwrap_or(0);
        self.list.select(Some(index));
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn move_up(&mut self) {
        if let Some(i) = self.list.selected() {
            self.list.select(Some(i.saturating_sub(1)));
        }
    }

    pub fn move_down(&mut self) {
        if let Some(i) = self.list.selected() {
            if i + 1 < self.options.len() {
                self.list.select(Some(i + 1));
            }
        }
    }

    /// Commit the highlighted option, close the popup, and return the
    /// chosen value when it differs from the previous selection.
    pub fn choose(&mut self) -> Option<String> {
        let index = self.list.selected()?;
        let value = self.options.get(index)?.clone();
        self.open = false;
        if self.selected.as_deref() == Some(value.as_str()) {
            return None;
        }
        self.selected = Some(value.clone());
        Some(value)
    }
}

/// The closed select box.
pub struct SelectField<'a> {
    state: &'a SelectState,
    title: &'a str,
    placeholder: &'a str,
    loading_text: &'a str,
    focused: bool,
    disabled: bool,
}

impl<'a> SelectField<'a> {
    pub fn new(state: &'a SelectState, title: &'a str) -> Self {
        Self {
            state,
            title,
            placeholder: "Select...",
            loading_text: "Loading...",
            focused: false,
            disabled: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn loading_text(mut self, loading_text: &'a str) -> Self {
        self.loading_text = loading_text;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Widget for SelectField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.disabled {
            disabled_border_style()
        } else if self.focused {
            focused_border_style()
        } else {
            unfocused_border_style()
        };

        let (text, style) = if self.state.is_loading() {
            (self.loading_text.to_string(), input_placeholder_style())
        } else if let Some(value) = self.state.selected() {
            let style = if self.disabled {
                disabled_text_style()
            } else {
                input_text_style()
            };
            (value.to_string(), style)
        } else {
            (self.placeholder.to_string(), input_placeholder_style())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(format!(" {} ", self.title));

        Paragraph::new(format!("{text} ▾"))
            .block(block)
            .style(style)
            .render(area, buf);
    }
}

/// The open option list, drawn as a centered popup over the screen.
pub struct SelectPopup<'a> {
    state: &'a mut SelectState,
    title: &'a str,
}

impl<'a> SelectPopup<'a> {
    pub fn new(state: &'a mut SelectState, title: &'a str) -> Self {
        Self { state, title }
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let popup = center_popup(area, 40, 60);
        frame.render_widget(Clear, popup);

        let t = theme();
        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .map(|o| ListItem::new(o.as_str()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(focused_border_style())
                    .title(format!(" {} ", self.title)),
            )
            .highlight_style(
                Style::default()
                    .fg(t.background)
                    .bg(t.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);

        frame.render_stateful_widget(list, popup, &mut self.state.list);
    }
}
