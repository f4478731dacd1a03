//! Screen trait and associated types.
//!
//! Screens own their state, render themselves, and answer events with a
//! [`ScreenAction`] instead of mutating shared state. The context object
//! hands them read-only access to the config, the session, the tokio
//! runtime and the API clients.

use crate::api::{AccountClient, LocationClient};
use crate::config::Config;
use crate::screens::ScreenId;
use crate::session::Session;
use crate::widgets::Toast;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

pub struct ScreenContext<'a> {
    pub config: &'a Config,
    pub session: &'a Session,
    pub runtime: &'a tokio::runtime::Runtime,
    pub account: &'a AccountClient,
    pub location: &'a LocationClient,
}

/// What the app should do after a screen handled an event or tick.
#[derive(Debug)]
pub enum ScreenAction {
    None,
    Navigate(ScreenId),
    /// Show a toast over whatever screen is current.
    Toast(Toast),
    /// A login round-trip succeeded; the app records the session.
    LoggedIn { display_name: String },
    /// Drop the session and return to the welcome screen.
    Logout,
    Quit,
}

impl Default for ScreenAction {
    fn default() -> Self {
        Self::None
    }
}

pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &ScreenContext) -> Result<()>;

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Called every poll-loop iteration. Screens use this to poll
    /// in-flight calls and timed transitions.
    fn tick(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// When true, global navigation keys are disabled so typing works.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called when the screen is navigated to.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<()> {
        Ok(())
    }
}
