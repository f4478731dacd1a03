//! Application loop and screen routing.
//!
//! The app owns the terminal, the tokio runtime, the API clients, the
//! session, and one instance of every screen. Events go to the current
//! screen; the returned [`ScreenAction`] is the only way screens reach
//! app-level state. The session is read and written here and nowhere
//! else.

use crate::api::{build_http_client, AccountClient, LocationClient};
use crate::config::Config;
use crate::screens::{
    HomeScreen, LoginScreen, Screen, ScreenAction, ScreenContext, ScreenId, SignupScreen,
    WelcomeScreen,
};
use crate::session::Session;
use crate::tui::Tui;
use crate::widgets::ToastManager;
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct App {
    config: Config,
    session: Session,
    session_path: PathBuf,
    tui: Tui,
    runtime: Runtime,
    account: AccountClient,
    location: LocationClient,
    toasts: ToastManager,
    current: ScreenId,
    welcome: WelcomeScreen,
    signup: SignupScreen,
    login: LoginScreen,
    home: HomeScreen,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let session_path = crate::utils::get_session_path();
        let session = Session::load(&session_path);

        let tui = Tui::new()?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        let (http, jar) = build_http_client()?;
        let account = AccountClient::new(http.clone(), config.api_url.clone());
        let location = LocationClient::new(http, config.api_url.clone(), jar);

        let toasts = ToastManager::with_duration(Duration::from_secs(config.toast_secs));

        // A stored session skips straight to the home screen.
        let current = if session.authenticated {
            ScreenId::Home
        } else {
            ScreenId::Welcome
        };

        Ok(Self {
            config,
            session,
            session_path,
            tui,
            runtime,
            account,
            location,
            toasts,
            current,
            welcome: WelcomeScreen::new(),
            signup: SignupScreen::new(),
            login: LoginScreen::new(),
            home: HomeScreen::new(),
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        let result = self.event_loop();
        self.tui.exit()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            if self.should_quit {
                break;
            }

            if let Some(event) = self.tui.poll_event(POLL_INTERVAL)? {
                let action = self.dispatch_event(event)?;
                self.apply_action(action)?;
            }

            let action = self.dispatch_tick()?;
            self.apply_action(action)?;
            self.toasts.tick();
        }
        Ok(())
    }

    fn current_screen_mut(&mut self) -> &mut dyn Screen {
        match self.current {
            ScreenId::Welcome => &mut self.welcome,
            ScreenId::Signup => &mut self.signup,
            ScreenId::Login => &mut self.login,
            ScreenId::Home => &mut self.home,
        }
    }

    fn dispatch_event(&mut self, event: Event) -> Result<ScreenAction> {
        // Global quit, unless a text field wants the keystroke.
        if let Event::Key(key) = &event {
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('q')
                && !self.current_screen_mut().is_input_focused()
            {
                return Ok(ScreenAction::Quit);
            }
        }

        let ctx = ScreenContext {
            config: &self.config,
            session: &self.session,
            runtime: &self.runtime,
            account: &self.account,
            location: &self.location,
        };
        match self.current {
            ScreenId::Welcome => self.welcome.handle_event(event, &ctx),
            ScreenId::Signup => self.signup.handle_event(event, &ctx),
            ScreenId::Login => self.login.handle_event(event, &ctx),
            ScreenId::Home => self.home.handle_event(event, &ctx),
        }
    }

    fn dispatch_tick(&mut self) -> Result<ScreenAction> {
        let ctx = ScreenContext {
            config: &self.config,
            session: &self.session,
            runtime: &self.runtime,
            account: &self.account,
            location: &self.location,
        };
        match self.current {
            ScreenId::Welcome => self.welcome.tick(&ctx),
            ScreenId::Signup => self.signup.tick(&ctx),
            ScreenId::Login => self.login.tick(&ctx),
            ScreenId::Home => self.home.tick(&ctx),
        }
    }

    fn apply_action(&mut self, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate(screen) => self.navigate(screen)?,
            ScreenAction::Toast(toast) => self.toasts.push(toast),
            ScreenAction::LoggedIn { display_name } => {
                info!("Login succeeded for {}", display_name);
                self.session = Session::logged_in(display_name);
                self.session.store(&self.session_path)?;
                self.toasts.success("Welcome back!");
                self.navigate(ScreenId::Home)?;
            }
            ScreenAction::Logout => {
                info!("Logging out");
                self.session = Session::logged_out();
                self.session.store(&self.session_path)?;
                self.navigate(ScreenId::Welcome)?;
            }
            ScreenAction::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn navigate(&mut self, screen: ScreenId) -> Result<()> {
        if self.current == screen {
            return Ok(());
        }
        info!("Navigating to {:?}", screen);
        self.current = screen;
        let ctx = ScreenContext {
            config: &self.config,
            session: &self.session,
            runtime: &self.runtime,
            account: &self.account,
            location: &self.location,
        };
        match self.current {
            ScreenId::Welcome => self.welcome.on_enter(&ctx),
            ScreenId::Signup => self.signup.on_enter(&ctx),
            ScreenId::Login => self.login.on_enter(&ctx),
            ScreenId::Home => self.home.on_enter(&ctx),
        }
    }

    fn draw(&mut self) -> Result<()> {
        // Split borrows: the terminal draw closure needs the screens and
        // toasts, but not the Tui itself.
        let Self {
            tui,
            config,
            session,
            runtime,
            account,
            location,
            toasts,
            current,
            welcome,
            signup,
            login,
            home,
            ..
        } = self;

        let ctx = ScreenContext {
            config,
            session,
            runtime,
            account,
            location,
        };

        let mut render_result = Ok(());
        tui.terminal_mut().draw(|frame| {
            let area = frame.area();
            render_result = match current {
                ScreenId::Welcome => welcome.render(frame, area, &ctx),
                ScreenId::Signup => signup.render(frame, area, &ctx),
                ScreenId::Login => login.render(frame, area, &ctx),
                ScreenId::Home => home.render(frame, area, &ctx),
            };
            toasts.render(frame, area);
        })?;
        render_result
    }
}
