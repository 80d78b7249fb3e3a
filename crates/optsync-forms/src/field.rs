//! Form and field contracts

use futures_util::future::BoxFuture;
use std::sync::Arc;

use crate::control::ControlType;

/// A single form control
///
/// Setters take `&self`: like DOM elements, fields are shared handles onto
/// state owned by the form.
pub trait FormField: Send + Sync {
    /// The `name` attribute
    fn name(&self) -> String;

    fn control_type(&self) -> ControlType;

    /// The raw `value` property
    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    fn checked(&self) -> bool;

    fn set_checked(&self, checked: bool);

    /// Value of `options[selectedIndex]`, `None` when nothing is selected
    /// or the control has no options
    fn selected_option_value(&self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEventKind {
    Input,
    Change,
}

impl FormEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormEventKind::Input => "input",
            FormEventKind::Change => "change",
        }
    }
}

/// An event bubbled up to the form from one of its fields
#[derive(Clone)]
pub struct FormEvent {
    pub kind: FormEventKind,
    pub target: Arc<dyn FormField>,
}

pub type FormListener = Arc<dyn Fn(FormEvent) -> BoxFuture<'static, ()> + Send + Sync>;

/// A form whose fields can be looked up by name
pub trait Form: Send + Sync {
    /// Every field whose `name` attribute equals `name`, in document order
    fn fields_named(&self, name: &str) -> Vec<Arc<dyn FormField>>;

    fn add_event_listener(&self, kind: FormEventKind, listener: FormListener);
}
