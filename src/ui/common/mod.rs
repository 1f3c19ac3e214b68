//! Shared UI building blocks used by the auth pages

pub mod form;
pub mod spinner;

pub use form::InputField;
pub use spinner::{InlineSpinner, LoadingSpinner, Spinner, SpinnerSize};
