//! Welcome screen: entry menu with signup, login and quit.

use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::screens::ScreenId;
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::utils::create_standard_layout;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

const MENU: [(&str, &str); 3] = [
    ("Sign Up", "Create a new account"),
    ("Log In", "Sign in to an existing account"),
    ("Quit", "Leave Trendwave"),
];

pub struct WelcomeScreen {
    list: ListState,
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WelcomeScreen {
    pub fn new() -> Self {
        let mut list = ListState::default();
        list.select(Some(0));
        Self { list }
    }

    fn activate(&self) -> ScreenAction {
        match self.list.selected() {
            Some(0) => ScreenAction::Navigate(ScreenId::Signup),
            Some(1) => ScreenAction::Navigate(ScreenId::Login),
            _ => ScreenAction::Quit,
        }
    }
}

impl Screen for WelcomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        let [header, body, footer] = create_standard_layout(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("Trendwave", t.title_style()),
            Span::styled("  earn from your socials", t.muted_style()),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, header);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(MENU.len() as u16 + 2)])
            .split(body);

        let blurb = Paragraph::new(
            "Complete follow, like and join tasks for pay,\nor buy engagement for your own pages.",
        )
        .style(t.text_style())
        .alignment(Alignment::Center);
        frame.render_widget(blurb, chunks[0]);

        let items: Vec<ListItem> = MENU
            .iter()
            .map(|(name, hint)| {
                ListItem::new(Line::from(vec![
                    Span::styled(*name, t.text_style().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {hint}"), t.muted_style()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(t.primary)),
            )
            .highlight_style(Style::default().fg(t.primary).add_modifier(Modifier::BOLD))
            .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(list, chunks[1], &mut self.list);

        let help = Paragraph::new("↑/↓ select · Enter confirm · q quit")
            .style(t.muted_style())
            .alignment(Alignment::Center);
        frame.render_widget(help, footer);

        Ok(())
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        Ok(match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.list.selected().unwrap_or(0);
                self.list.select(Some(i.saturating_sub(1)));
                ScreenAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.list.selected().unwrap_or(0);
                self.list.select(Some((i + 1).min(MENU.len() - 1)));
                ScreenAction::None
            }
            KeyCode::Enter => self.activate(),
            KeyCode::Char('s') => ScreenAction::Navigate(ScreenId::Signup),
            KeyCode::Char('l') => ScreenAction::Navigate(ScreenId::Login),
            KeyCode::Char('q') | KeyCode::Esc => ScreenAction::Quit,
            _ => ScreenAction::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_clamped() {
        let mut screen = WelcomeScreen::new();
        assert_eq!(screen.list.selected(), Some(0));
        screen.list.select(Some(2));
        assert!(matches!(screen.activate(), ScreenAction::Quit));
    }

    #[test]
    fn first_item_opens_signup() {
        let screen = WelcomeScreen::new();
        assert!(matches!(
            screen.activate(),
            ScreenAction::Navigate(ScreenId::Signup)
        ));
    }
}
