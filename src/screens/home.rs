//! Home screen shown after login.
//!
//! Task listings and packages live server-side and are out of scope
//! here; this screen confirms the session and offers logout.

use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::utils::create_standard_layout;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Default)]
pub struct HomeScreen;

impl HomeScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for HomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        let [header, body, footer] = create_standard_layout(area);

        frame.render_widget(
            Paragraph::new(Line::styled("Trendwave", t.title_style()))
                .alignment(Alignment::Center),
            header,
        );

        let who = ctx.session.user().unwrap_or("there");
        let lines = vec![
            Line::styled(format!("Welcome back, {who}!"), t.success_style()),
            Line::raw(""),
            Line::styled("You are signed in.", t.text_style()),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            body,
        );

        frame.render_widget(
            Paragraph::new("l log out · q quit")
                .style(t.muted_style())
                .alignment(Alignment::Center),
            footer,
        );
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
            KeyCode::Char('l') | KeyCode::Char('L') => ScreenAction::Logout,
            KeyCode::Char('q') | KeyCode::Esc => ScreenAction::Quit,
            _ => ScreenAction::None,
        })
    }
}
