//! OptSync Forms
//!
//! A DOM-shaped view of an options form: fields addressed by `name`,
//! typed by their control `type`, and `input`/`change` event subscription.
//! `HeadlessForm` implements it in memory.

mod control;
mod error;
mod field;
mod headless;

pub use control::ControlType;
pub use error::FormError;
pub use field::{Form, FormEvent, FormEventKind, FormField, FormListener};
pub use headless::HeadlessForm;

pub type Result<T> = std::result::Result<T, FormError>;
