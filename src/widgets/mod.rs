// Reusable UI widgets

pub mod pin_input;
pub mod select;
pub mod text_input;
pub mod toast;

pub use pin_input::PinInputWidget;
pub use select::{SelectField, SelectPopup, SelectState};
pub use text_input::{TextInputWidget, TextInputWidgetExt};
pub use toast::{Toast, ToastManager, ToastVariant};
