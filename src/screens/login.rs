//! Login screen.

use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::screens::ScreenId;
use crate::services::{AccountService, CallHandle};
use crate::styles::theme;
use crate::utils::{create_standard_layout, TextInput};
use crate::widgets::{TextInputWidget, TextInputWidgetExt, Toast};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginFocus {
    #[default]
    Identity,
    Password,
}

pub struct LoginScreen {
    identity: TextInput,
    password: TextInput,
    focus: LoginFocus,
    login_call: Option<CallHandle<Option<String>>>,
    /// Kept until the call resolves so the session can record who
    /// logged in.
    pending_identity: Option<String>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            identity: TextInput::new(),
            password: TextInput::new(),
            focus: LoginFocus::default(),
            login_call: None,
            pending_identity: None,
        }
    }

    fn in_flight(&self) -> bool {
        self.login_call.is_some()
    }

    fn submit(&mut self, ctx: &ScreenContext) -> ScreenAction {
        if self.in_flight() {
            return ScreenAction::None;
        }
        let identity = self.identity.text_trimmed().to_string();
        let password = self.password.text().to_string();
        if identity.is_empty() || password.is_empty() {
            return ScreenAction::Toast(Toast::error("Please fill all fields"));
        }
        self.pending_identity = Some(identity.clone());
        self.login_call = Some(AccountService::login(
            ctx.runtime,
            ctx.account.clone(),
            identity,
            password,
        ));
        ScreenAction::None
    }
}

impl Screen for LoginScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        let [header, body, footer] = create_standard_layout(area);

        frame.render_widget(
            Paragraph::new(Line::styled("Log in to Trendwave", t.title_style()))
                .alignment(Alignment::Center),
            header,
        );

        let width = 54u16.min(body.width.saturating_sub(4));
        let x = body.x + (body.width.saturating_sub(width)) / 2;
        let y = body.y + (body.height.saturating_sub(7)) / 2;
        let form = Rect::new(x, y, width, 7.min(body.height));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(form);

        frame.render_text_input_widget(
            TextInputWidget::new(&self.identity)
                .title("Email or Username")
                .placeholder("you@example.com")
                .focused(self.focus == LoginFocus::Identity),
            rows[0],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.password)
                .title("Password")
                .masked(true)
                .focused(self.focus == LoginFocus::Password),
            rows[1],
        );

        if self.in_flight() {
            frame.render_widget(
                Paragraph::new("Signing in...")
                    .style(t.muted_style())
                    .alignment(Alignment::Center),
                rows[2],
            );
        }

        frame.render_widget(
            Paragraph::new("Tab switch field · Enter log in · Esc back")
                .style(t.muted_style())
                .alignment(Alignment::Center),
            footer,
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }

        Ok(match key.code {
            KeyCode::Enter => self.submit(ctx),
            KeyCode::Esc => ScreenAction::Navigate(ScreenId::Welcome),
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.focus = match self.focus {
                    LoginFocus::Identity => LoginFocus::Password,
                    LoginFocus::Password => LoginFocus::Identity,
                };
                ScreenAction::None
            }
            code => {
                let input = match self.focus {
                    LoginFocus::Identity => &mut self.identity,
                    LoginFocus::Password => &mut self.password,
                };
                input.handle_key(code);
                ScreenAction::None
            }
        })
    }

    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        let Some(result) = self.login_call.as_mut().and_then(CallHandle::try_recv) else {
            return Ok(ScreenAction::None);
        };
        self.login_call = None;

        match result {
            Ok(_message) => {
                let display_name = self.pending_identity.take().unwrap_or_default();
                self.password.clear();
                Ok(ScreenAction::LoggedIn { display_name })
            }
            Err(msg) => {
                self.pending_identity = None;
                Ok(ScreenAction::Toast(Toast::error(msg)))
            }
        }
    }

    fn is_input_focused(&self) -> bool {
        true
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        self.password.clear();
        self.login_call = None;
        self.pending_identity = None;
        Ok(())
    }
}
