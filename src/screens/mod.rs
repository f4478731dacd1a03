//! Screen controllers.
//!
//! Each screen owns its state and implements the [`Screen`] trait. The
//! app routes events to the current screen and applies the returned
//! [`ScreenAction`]; screens never touch app-level state directly.

pub mod home;
pub mod login;
pub mod screen_trait;
pub mod signup;
pub mod welcome;

pub use home::HomeScreen;
pub use login::LoginScreen;
pub use screen_trait::{Screen, ScreenAction, ScreenContext};
pub use signup::SignupScreen;
pub use welcome::WelcomeScreen;

/// Identifies a screen for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Welcome,
    Signup,
    Login,
    Home,
}
