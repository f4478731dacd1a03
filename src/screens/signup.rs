//! Signup screen: the four-step account creation flow.
//!
//! Step 1 collects credentials, step 2 gender and location, step 3 the
//! emailed 6-digit code, step 4 confirms. All sequencing rules live in
//! [`Wizard`]; this screen maps key events onto wizard calls, fires the
//! remote requests, and polls their handles from `tick`.

use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::screens::ScreenId;
use crate::services::{AccountService, CallHandle, LocationService, RegisterOutcome};
use crate::styles::theme;
use crate::utils::{create_standard_layout, TextInput};
use crate::widgets::{
    PinInputWidget, SelectField, SelectPopup, SelectState, TextInputWidget, TextInputWidgetExt,
    Toast,
};
use crate::wizard::{CredentialsInput, ProfileInput, Step, Wizard};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Instant;

const GENDERS: [&str; 2] = ["Male", "Female"];
const FORM_WIDTH: u16 = 54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CredentialsFocus {
    #[default]
    Username,
    Email,
    Password,
    Confirm,
}

impl CredentialsFocus {
    fn next(self) -> Self {
        match self {
            Self::Username => Self::Email,
            Self::Email => Self::Password,
            Self::Password => Self::Confirm,
            Self::Confirm => Self::Username,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Username => Self::Confirm,
            Self::Email => Self::Username,
            Self::Password => Self::Email,
            Self::Confirm => Self::Password,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ProfileFocus {
    #[default]
    Gender,
    Country,
    State,
    City,
    Submit,
}

impl ProfileFocus {
    fn next(self) -> Self {
        match self {
            Self::Gender => Self::Country,
            Self::Country => Self::State,
            Self::State => Self::City,
            Self::City => Self::Submit,
            Self::Submit => Self::Gender,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Gender => Self::Submit,
            Self::Country => Self::Gender,
            Self::State => Self::Country,
            Self::City => Self::State,
            Self::Submit => Self::City,
        }
    }
}

/// A country change invalidates the dependent selects before the new
/// states list is requested.
fn on_country_changed(state_sel: &mut SelectState, city_sel: &mut SelectState) {
    state_sel.clear_selection();
    state_sel.set_loading();
    city_sel.reset();
}

/// A state change invalidates the city select before its fetch.
fn on_state_changed(city_sel: &mut SelectState) {
    city_sel.clear_selection();
    city_sel.set_loading();
}

pub struct SignupScreen {
    wizard: Wizard,

    // Step 1 inputs
    username: TextInput,
    email: TextInput,
    password: TextInput,
    confirm: TextInput,
    credentials_focus: CredentialsFocus,

    // Step 2 selects
    gender: SelectState,
    country: SelectState,
    state: SelectState,
    city: SelectState,
    profile_focus: ProfileFocus,

    // In-flight remote calls
    countries_call: Option<CallHandle<Vec<String>>>,
    states_call: Option<CallHandle<Vec<String>>>,
    locals_call: Option<CallHandle<Vec<String>>>,
    register_call: Option<CallHandle<RegisterOutcome>>,
    verify_call: Option<CallHandle<()>>,
    resend_call: Option<CallHandle<Option<String>>>,
}

impl Default for SignupScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignupScreen {
    pub fn new() -> Self {
        Self {
            wizard: Wizard::new(),
            username: TextInput::new(),
            email: TextInput::new(),
            password: TextInput::new(),
            confirm: TextInput::new(),
            credentials_focus: CredentialsFocus::default(),
            gender: SelectState::with_options(GENDERS.iter().map(ToString::to_string).collect()),
            country: SelectState::new(),
            state: SelectState::new(),
            city: SelectState::new(),
            profile_focus: ProfileFocus::default(),
            countries_call: None,
            states_call: None,
            locals_call: None,
            register_call: None,
            verify_call: None,
            resend_call: None,
        }
    }

    /// Start over: a fresh wizard, blank forms, no pending calls.
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn fetch_countries(&mut self, ctx: &ScreenContext) {
        self.country.set_loading();
        self.countries_call = Some(LocationService::countries(ctx.runtime, ctx.location.clone()));
    }

    fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.credentials_focus {
            CredentialsFocus::Username => &mut self.username,
            CredentialsFocus::Email => &mut self.email,
            CredentialsFocus::Password => &mut self.password,
            CredentialsFocus::Confirm => &mut self.confirm,
        }
    }

    fn open_select(&self) -> Option<ProfileFocus> {
        if self.gender.is_open() {
            Some(ProfileFocus::Gender)
        } else if self.country.is_open() {
            Some(ProfileFocus::Country)
        } else if self.state.is_open() {
            Some(ProfileFocus::State)
        } else if self.city.is_open() {
            Some(ProfileFocus::City)
        } else {
            None
        }
    }

    fn select_mut(&mut self, which: ProfileFocus) -> Option<&mut SelectState> {
        match which {
            ProfileFocus::Gender => Some(&mut self.gender),
            ProfileFocus::Country => Some(&mut self.country),
            ProfileFocus::State => Some(&mut self.state),
            ProfileFocus::City => Some(&mut self.city),
            ProfileFocus::Submit => None,
        }
    }

    fn submit_credentials(&mut self) -> ScreenAction {
        let input = CredentialsInput {
            username: self.username.text().to_string(),
            email: self.email.text().to_string(),
            password: self.password.text().to_string(),
            password_confirm: self.confirm.text().to_string(),
        };
        match self.wizard.submit_credentials(&input) {
            Ok(()) => {
                self.profile_focus = ProfileFocus::default();
                ScreenAction::None
            }
            Err(e) => ScreenAction::Toast(Toast::error(e.to_string())),
        }
    }

    fn submit_profile(&mut self, ctx: &ScreenContext) -> ScreenAction {
        if self.wizard.advance_pending() {
            return ScreenAction::None;
        }
        let input = ProfileInput {
            gender: self.gender.selected().map(str::to_string),
            country: self.country.selected().map(str::to_string),
            state: self.state.selected().map(str::to_string),
            city: self.city.selected().map(str::to_string),
        };
        match self.wizard.begin_register(&input) {
            Ok(payload) => {
                self.register_call = Some(AccountService::register(
                    ctx.runtime,
                    ctx.account.clone(),
                    payload,
                ));
                ScreenAction::None
            }
            Err(e) => ScreenAction::Toast(Toast::error(e.to_string())),
        }
    }

    fn choose_in_open_select(&mut self, which: ProfileFocus, ctx: &ScreenContext) {
        let Some(select) = self.select_mut(which) else {
            return;
        };
        let Some(chosen) = select.choose() else {
            return;
        };
        match which {
            ProfileFocus::Country => {
                on_country_changed(&mut self.state, &mut self.city);
                self.states_call = Some(LocationService::states(
                    ctx.runtime,
                    ctx.location.clone(),
                    chosen,
                ));
            }
            ProfileFocus::State => {
                on_state_changed(&mut self.city);
                self.locals_call = Some(LocationService::locals(
                    ctx.runtime,
                    ctx.location.clone(),
                    chosen,
                ));
            }
            _ => {}
        }
    }

    fn handle_credentials_key(&mut self, key: KeyEvent) -> ScreenAction {
        match key.code {
            KeyCode::Enter => self.submit_credentials(),
            KeyCode::Esc => ScreenAction::Navigate(ScreenId::Welcome),
            KeyCode::Tab | KeyCode::Down => {
                self.credentials_focus = self.credentials_focus.next();
                ScreenAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.credentials_focus = self.credentials_focus.prev();
                ScreenAction::None
            }
            code => {
                self.focused_input_mut().handle_key(code);
                ScreenAction::None
            }
        }
    }

    fn handle_profile_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        // An open popup captures navigation until closed.
        if let Some(which) = self.open_select() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    if let Some(s) = self.select_mut(which) {
                        s.move_up();
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if let Some(s) = self.select_mut(which) {
                        s.move_down();
                    }
                }
                KeyCode::Enter => self.choose_in_open_select(which, ctx),
                KeyCode::Esc => {
                    if let Some(s) = self.select_mut(which) {
                        s.close();
                    }
                }
                _ => {}
            }
            return ScreenAction::None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.profile_focus = self.profile_focus.next();
                ScreenAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.profile_focus = self.profile_focus.prev();
                ScreenAction::None
            }
            KeyCode::Enter => match self.profile_focus {
                ProfileFocus::Submit => self.submit_profile(ctx),
                which => {
                    // A dependent select may still be waiting for its
                    // parent; retry a failed countries fetch here.
                    if which == ProfileFocus::Country
                        && !self.country.is_ready()
                        && !self.country.is_loading()
                    {
                        self.fetch_countries(ctx);
                        return ScreenAction::None;
                    }
                    if let Some(s) = self.select_mut(which) {
                        if s.is_loading() {
                            return ScreenAction::Toast(Toast::info("Still loading options..."));
                        }
                        if !s.is_ready() {
                            return ScreenAction::Toast(Toast::info(
                                "Pick the previous field first",
                            ));
                        }
                        s.open();
                    }
                    ScreenAction::None
                }
            },
            KeyCode::Esc => {
                self.wizard.go_back();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn handle_verification_key(&mut self, key: KeyEvent, ctx: &ScreenContext) -> ScreenAction {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.wizard.enter_pin_digit(c);
                ScreenAction::None
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.wizard.erase_pin_digit();
                ScreenAction::None
            }
            KeyCode::Left => {
                self.wizard.move_pin_focus_left();
                ScreenAction::None
            }
            KeyCode::Right => {
                self.wizard.move_pin_focus_right();
                ScreenAction::None
            }
            KeyCode::Enter => match self.wizard.begin_verify() {
                Ok(payload) => {
                    self.verify_call = Some(AccountService::verify_email(
                        ctx.runtime,
                        ctx.account.clone(),
                        payload,
                    ));
                    ScreenAction::None
                }
                Err(e) => ScreenAction::Toast(Toast::error(e.to_string())),
            },
            KeyCode::Char('r') | KeyCode::Char('R') => match self.wizard.begin_resend() {
                Ok(token) => {
                    self.resend_call = Some(AccountService::resend_code(
                        ctx.runtime,
                        ctx.account.clone(),
                        token,
                    ));
                    ScreenAction::None
                }
                Err(e) => ScreenAction::Toast(Toast::error(e.to_string())),
            },
            KeyCode::Esc => {
                self.wizard.go_back();
                ScreenAction::None
            }
            _ => ScreenAction::None,
        }
    }

    fn form_area(body: Rect, height: u16) -> Rect {
        let width = FORM_WIDTH.min(body.width.saturating_sub(4));
        let x = body.x + (body.width.saturating_sub(width)) / 2;
        let y = body.y + (body.height.saturating_sub(height)) / 2;
        Rect::new(x, y, width, height.min(body.height))
    }

    fn render_credentials(&mut self, frame: &mut Frame, body: Rect) {
        let form = Self::form_area(body, 12);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3); 4])
            .split(form);

        let focus = self.credentials_focus;
        frame.render_text_input_widget(
            TextInputWidget::new(&self.username)
                .title("Username")
                .placeholder("yourname")
                .focused(focus == CredentialsFocus::Username),
            rows[0],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.email)
                .title("Email")
                .placeholder("you@example.com")
                .focused(focus == CredentialsFocus::Email),
            rows[1],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.password)
                .title("Password")
                .placeholder("8+ chars, mixed case, a digit")
                .masked(true)
                .focused(focus == CredentialsFocus::Password),
            rows[2],
        );
        frame.render_text_input_widget(
            TextInputWidget::new(&self.confirm)
                .title("Confirm Password")
                .masked(true)
                .focused(focus == CredentialsFocus::Confirm),
            rows[3],
        );
    }

    fn render_profile(&mut self, frame: &mut Frame, body: Rect) {
        let t = theme();
        let form = Self::form_area(body, 17);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(form);

        let focus = self.profile_focus;
        frame.render_widget(
            SelectField::new(&self.gender, "Gender")
                .placeholder("Select a gender")
                .focused(focus == ProfileFocus::Gender),
            rows[0],
        );
        frame.render_widget(
            SelectField::new(&self.country, "Country")
                .placeholder("Select a country")
                .loading_text("Loading countries...")
                .focused(focus == ProfileFocus::Country),
            rows[1],
        );
        frame.render_widget(
            SelectField::new(&self.state, "State")
                .placeholder("Select a state")
                .loading_text("Loading states...")
                .focused(focus == ProfileFocus::State)
                .disabled(self.country.selected().is_none()),
            rows[2],
        );
        frame.render_widget(
            SelectField::new(&self.city, "City")
                .placeholder("Select a city")
                .loading_text("Loading cities...")
                .focused(focus == ProfileFocus::City)
                .disabled(self.state.selected().is_none()),
            rows[3],
        );

        let button_style = if focus == ProfileFocus::Submit {
            t.highlight_style().add_modifier(Modifier::BOLD)
        } else {
            t.text_style()
        };
        frame.render_widget(
            Paragraph::new("[ Create Account ]")
                .style(button_style)
                .alignment(Alignment::Center),
            rows[4],
        );

        let status = if self.wizard.register_in_flight() {
            Some(Line::styled("Creating your account...", t.muted_style()))
        } else if self.wizard.advance_pending() {
            Some(Line::styled(
                "Account created. Preparing verification...",
                t.success_style(),
            ))
        } else {
            None
        };
        if let Some(line) = status {
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rows[5]);
        }

        // Popup last so it overlays the form.
        match self.open_select() {
            Some(ProfileFocus::Gender) => SelectPopup::new(&mut self.gender, "Gender").render(frame, body),
            Some(ProfileFocus::Country) => {
                SelectPopup::new(&mut self.country, "Country").render(frame, body);
            }
            Some(ProfileFocus::State) => SelectPopup::new(&mut self.state, "State").render(frame, body),
            Some(ProfileFocus::City) => SelectPopup::new(&mut self.city, "City").render(frame, body),
            _ => {}
        }
    }

    fn render_verification(&mut self, frame: &mut Frame, body: Rect) {
        let t = theme();
        let form = Self::form_area(body, 8);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(form);

        frame.render_widget(
            Paragraph::new("Enter the 6-digit code sent to your email")
                .style(t.text_style())
                .alignment(Alignment::Center),
            rows[0],
        );

        if let Some(pin) = self.wizard.pin() {
            frame.render_widget(PinInputWidget::new(pin).focused(true), rows[1]);
        }

        if self.wizard.resend_notice() {
            frame.render_widget(
                Paragraph::new("A new code has been sent to your email.")
                    .style(t.success_style())
                    .alignment(Alignment::Center),
                rows[2],
            );
        }

        if self.wizard.verify_in_flight() {
            frame.render_widget(
                Paragraph::new("Verifying...")
                    .style(t.muted_style())
                    .alignment(Alignment::Center),
                rows[3],
            );
        } else if self.wizard.resend_in_flight() {
            frame.render_widget(
                Paragraph::new("Requesting a new code...")
                    .style(t.muted_style())
                    .alignment(Alignment::Center),
                rows[3],
            );
        }
    }

    fn render_verified(&mut self, frame: &mut Frame, body: Rect) {
        let t = theme();
        let form = Self::form_area(body, 4);
        let lines = vec![
            Line::styled("Email verified, your account is ready!", t.success_style()),
            Line::raw(""),
            Line::styled("Press Enter to log in.", t.text_style()),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            form,
        );
    }

    fn footer_hint(&self) -> &'static str {
        match self.wizard.step() {
            Step::Credentials => "Tab next field · Enter continue · Esc cancel",
            Step::Profile => "Tab next field · Enter open/confirm · Esc back",
            Step::Verification => "0-9 enter code · Enter verify · r resend · Esc back",
            Step::Verified => "Enter log in",
        }
    }
}

impl Screen for SignupScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        let [header, body, footer] = create_standard_layout(area);

        let step = self.wizard.step();
        let title = Paragraph::new(Line::from(vec![
            Span::styled("Create your account", t.title_style()),
            Span::styled(format!("  ·  Step {} of 4", step.number()), t.muted_style()),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, header);

        match step {
            Step::Credentials => self.render_credentials(frame, body),
            Step::Profile => self.render_profile(frame, body),
            Step::Verification => self.render_verification(frame, body),
            Step::Verified => self.render_verified(frame, body),
        }

        frame.render_widget(
            Paragraph::new(self.footer_hint())
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

        Ok(match self.wizard.step() {
            Step::Credentials => self.handle_credentials_key(key),
            Step::Profile => self.handle_profile_key(key, ctx),
            Step::Verification => self.handle_verification_key(key, ctx),
            Step::Verified => match key.code {
                KeyCode::Enter => ScreenAction::Navigate(ScreenId::Login),
                KeyCode::Esc | KeyCode::Char('q') => ScreenAction::Navigate(ScreenId::Welcome),
                _ => ScreenAction::None,
            },
        })
    }

    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Some(result) = self.countries_call.as_mut().and_then(CallHandle::try_recv) {
            self.countries_call = None;
            match result {
                Ok(options) => self.country.set_options(options),
                Err(msg) => {
                    self.country.set_options(Vec::new());
                    return Ok(ScreenAction::Toast(Toast::error(msg)));
                }
            }
        }

        if let Some(result) = self.states_call.as_mut().and_then(CallHandle::try_recv) {
            self.states_call = None;
            match result {
                Ok(options) => self.state.set_options(options),
                Err(msg) => {
                    self.state.set_options(Vec::new());
                    return Ok(ScreenAction::Toast(Toast::error(msg)));
                }
            }
        }

        if let Some(result) = self.locals_call.as_mut().and_then(CallHandle::try_recv) {
            self.locals_call = None;
            match result {
                Ok(options) => self.city.set_options(options),
                Err(msg) => {
                    self.city.set_options(Vec::new());
                    return Ok(ScreenAction::Toast(Toast::error(msg)));
                }
            }
        }

        if let Some(result) = self.register_call.as_mut().and_then(CallHandle::try_recv) {
            self.register_call = None;
            match result {
                Ok(outcome) => {
                    self.wizard
                        .register_succeeded(outcome.signup_token, Instant::now());
                    return Ok(ScreenAction::Toast(Toast::success(outcome.message)));
                }
                Err(msg) => {
                    self.wizard.register_failed();
                    return Ok(ScreenAction::Toast(Toast::error(msg)));
                }
            }
        }

        if let Some(result) = self.verify_call.as_mut().and_then(CallHandle::try_recv) {
            self.verify_call = None;
            match result {
                Ok(()) => self.wizard.verify_succeeded(),
                Err(msg) => {
                    self.wizard.verify_failed();
                    return Ok(ScreenAction::Toast(Toast::error(msg)));
                }
            }
        }

        if let Some(result) = self.resend_call.as_mut().and_then(CallHandle::try_recv) {
            self.resend_call = None;
            match result {
                Ok(new_token) => self.wizard.resend_succeeded(new_token),
                Err(msg) => {
                    self.wizard.resend_failed();
                    return Ok(ScreenAction::Toast(Toast::error(msg)));
                }
            }
        }

        self.wizard.tick(Instant::now());
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        self.wizard.step() != Step::Verified
    }

    fn on_enter(&mut self, ctx: &ScreenContext) -> Result<()> {
        self.reset();
        self.fetch_countries(ctx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_change_invalidates_state_and_city_first() {
        let mut state_sel = SelectState::with_options(vec!["Lagos".into()]);
        let mut city_sel = SelectState::with_options(vec!["Ikeja".into()]);
        state_sel.open();
        state_sel.choose();
        city_sel.open();
        city_sel.choose();

        on_country_changed(&mut state_sel, &mut city_sel);

        assert!(state_sel.selected().is_none());
        assert!(state_sel.is_loading());
        assert!(city_sel.selected().is_none());
        assert!(!city_sel.is_ready());
    }

    #[test]
    fn state_change_invalidates_city_first() {
        let mut city_sel = SelectState::with_options(vec!["Ikeja".into()]);
        city_sel.open();
        city_sel.choose();

        on_state_changed(&mut city_sel);

        assert!(city_sel.selected().is_none());
        assert!(city_sel.is_loading());
    }

    #[test]
    fn focus_cycles_through_all_profile_fields() {
        let mut focus = ProfileFocus::default();
        for _ in 0..5 {
            focus = focus.next();
        }
        assert_eq!(focus, ProfileFocus::Gender);
        assert_eq!(ProfileFocus::Gender.prev(), ProfileFocus::Submit);
    }
}
