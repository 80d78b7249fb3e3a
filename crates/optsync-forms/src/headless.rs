//! Headless form
//!
//! An in-memory form with DOM semantics for the controls an options page
//! uses: text-like inputs, checkboxes, radio groups and single selects.
//! User edits are simulated with `type_text`, `toggle` and `choose`, which
//! update the field and then dispatch the events a browser would fire.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::control::ControlType;
use crate::error::FormError;
use crate::field::{Form, FormEvent, FormEventKind, FormField, FormListener};
use crate::Result;

#[derive(Debug, Clone)]
struct FieldState {
    name: String,
    control: ControlType,
    value: String,
    checked: bool,
    options: Vec<String>,
    selected_index: Option<usize>,
}

impl FieldState {
    fn new(name: &str, control: ControlType) -> Self {
        Self {
            name: name.to_string(),
            control,
            value: String::new(),
            checked: false,
            options: Vec::new(),
            selected_index: None,
        }
    }
}

type Fields = Arc<RwLock<Vec<FieldState>>>;

/// Handle onto one field of a `HeadlessForm`
struct HeadlessField {
    fields: Fields,
    index: usize,
}

impl HeadlessField {
    fn read<T>(&self, f: impl FnOnce(&FieldState) -> T) -> T {
        f(&self.fields.read()[self.index])
    }
}

impl FormField for HeadlessField {
    fn name(&self) -> String {
        self.read(|field| field.name.clone())
    }

    fn control_type(&self) -> ControlType {
        self.read(|field| field.control.clone())
    }

    fn value(&self) -> String {
        self.read(|field| match field.control {
            ControlType::SelectOne => field
                .selected_index
                .and_then(|i| field.options.get(i).cloned())
                .unwrap_or_default(),
            _ => field.value.clone(),
        })
    }

    fn set_value(&self, value: &str) {
        let mut fields = self.fields.write();
        let field = &mut fields[self.index];
        match field.control {
            // Assigning a value that matches no option clears the selection
            ControlType::SelectOne => {
                field.selected_index = field.options.iter().position(|o| o == value);
            }
            _ => field.value = value.to_string(),
        }
    }

    fn checked(&self) -> bool {
        self.read(|field| field.checked)
    }

    fn set_checked(&self, checked: bool) {
        let mut fields = self.fields.write();
        if checked && fields[self.index].control == ControlType::Radio {
            let group = fields[self.index].name.clone();
            for other in fields
                .iter_mut()
                .filter(|f| f.control == ControlType::Radio && f.name == group)
            {
                other.checked = false;
            }
        }
        fields[self.index].checked = checked;
    }

    fn selected_option_value(&self) -> Option<String> {
        self.read(|field| {
            field
                .selected_index
                .and_then(|i| field.options.get(i).cloned())
        })
    }
}

#[derive(Clone, Default)]
pub struct HeadlessForm {
    fields: Fields,
    listeners: Arc<RwLock<Vec<(FormEventKind, FormListener)>>>,
}

impl HeadlessForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, field: FieldState) -> Self {
        self.fields.write().push(field);
        self
    }

    /// Add a control of arbitrary `type` whose state is its `value`
    pub fn with_input(self, name: &str, kind: &str, value: &str) -> Self {
        let mut field = FieldState::new(name, ControlType::from_type_str(kind));
        field.value = value.to_string();
        self.push(field)
    }

    pub fn with_text(self, name: &str, value: &str) -> Self {
        self.with_input(name, "text", value)
    }

    pub fn with_checkbox(self, name: &str, checked: bool) -> Self {
        let mut field = FieldState::new(name, ControlType::Checkbox);
        field.value = "on".to_string();
        field.checked = checked;
        self.push(field)
    }

    /// Add one radio button; buttons sharing `name` form a group
    pub fn with_radio(self, name: &str, value: &str, checked: bool) -> Self {
        let mut field = FieldState::new(name, ControlType::Radio);
        field.value = value.to_string();
        field.checked = checked;
        self.push(field)
    }

    /// Add a single select; the first option starts selected
    pub fn with_select(self, name: &str, options: &[&str]) -> Self {
        let mut field = FieldState::new(name, ControlType::SelectOne);
        field.options = options.iter().map(|o| o.to_string()).collect();
        field.selected_index = if field.options.is_empty() { None } else { Some(0) };
        self.push(field)
    }

    fn indices_named(&self, name: &str) -> Vec<usize> {
        self.fields
            .read()
            .iter()
            .enumerate()
            .filter(|(_, field)| field.name == name)
            .map(|(i, _)| i)
            .collect()
    }

    fn handle(&self, index: usize) -> Arc<dyn FormField> {
        Arc::new(HeadlessField {
            fields: Arc::clone(&self.fields),
            index,
        })
    }

    fn first_named(&self, name: &str) -> Result<Arc<dyn FormField>> {
        self.indices_named(name)
            .first()
            .map(|&i| self.handle(i))
            .ok_or_else(|| FormError::FieldNotFound(name.to_string()))
    }

    /// Current `value` of the first field named `name`
    pub fn value_of(&self, name: &str) -> Option<String> {
        self.first_named(name).ok().map(|field| field.value())
    }

    /// Checked state of the first field named `name`
    pub fn is_checked(&self, name: &str) -> Option<bool> {
        self.first_named(name).ok().map(|field| field.checked())
    }

    /// Value of the checked radio button in group `name`
    pub fn checked_radio(&self, name: &str) -> Option<String> {
        self.fields
            .read()
            .iter()
            .find(|f| f.name == name && f.control == ControlType::Radio && f.checked)
            .map(|f| f.value.clone())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver an event for `target` to every listener registered for `kind`
    pub async fn dispatch(&self, kind: FormEventKind, target: Arc<dyn FormField>) {
        // Listeners are cloned out so no lock is held across an await
        let listeners: Vec<FormListener> = self
            .listeners
            .read()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(FormEvent {
                kind,
                target: Arc::clone(&target),
            })
            .await;
        }
    }

    /// Type into a text-like field: fires `input`
    pub async fn type_text(&self, name: &str, value: &str) -> Result<()> {
        let field = self.first_named(name)?;
        field.set_value(value);
        self.dispatch(FormEventKind::Input, field).await;
        Ok(())
    }

    /// Click a checkbox into the given state: fires `input` then `change`
    pub async fn toggle(&self, name: &str, checked: bool) -> Result<()> {
        let field = self.first_named(name)?;
        let control = field.control_type();
        if control != ControlType::Checkbox {
            return Err(FormError::WrongControl {
                name: name.to_string(),
                control: control.to_string(),
                expected: "checkbox",
            });
        }
        field.set_checked(checked);
        self.dispatch(FormEventKind::Input, Arc::clone(&field)).await;
        self.dispatch(FormEventKind::Change, field).await;
        Ok(())
    }

    /// Pick `value` in a select or radio group: fires `input` then `change`
    pub async fn choose(&self, name: &str, value: &str) -> Result<()> {
        let no_option = || FormError::NoSuchOption {
            name: name.to_string(),
            value: value.to_string(),
        };

        let first = self.first_named(name)?;
        let target = match first.control_type() {
            ControlType::SelectOne => {
                let previous = first.value();
                first.set_value(value);
                if first.selected_option_value().is_none() {
                    first.set_value(&previous);
                    return Err(no_option());
                }
                first
            }
            ControlType::Radio => {
                let button = self
                    .indices_named(name)
                    .into_iter()
                    .map(|i| self.handle(i))
                    .find(|b| b.control_type() == ControlType::Radio && b.value() == value)
                    .ok_or_else(no_option)?;
                button.set_checked(true);
                button
            }
            other => {
                return Err(FormError::WrongControl {
                    name: name.to_string(),
                    control: other.to_string(),
                    expected: "select-one or radio",
                })
            }
        };

        self.dispatch(FormEventKind::Input, Arc::clone(&target)).await;
        self.dispatch(FormEventKind::Change, target).await;
        Ok(())
    }
}

impl Form for HeadlessForm {
    fn fields_named(&self, name: &str) -> Vec<Arc<dyn FormField>> {
        self.indices_named(name)
            .into_iter()
            .map(|i| self.handle(i))
            .collect()
    }

    fn add_event_listener(&self, kind: FormEventKind, listener: FormListener) {
        tracing::trace!(event = kind.as_str(), "Form listener added");
        self.listeners.write().push((kind, listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;

    fn recorder(form: &HeadlessForm, kind: FormEventKind) -> Arc<RwLock<Vec<(String, String)>>> {
        let seen = Arc::new(RwLock::new(Vec::new()));
        let sink = Arc::clone(&seen);
        form.add_event_listener(
            kind,
            Arc::new(move |event: FormEvent| {
                sink.write()
                    .push((event.target.name(), event.target.value()));
                async {}.boxed()
            }),
        );
        seen
    }

    #[test]
    fn test_select_value_follows_options() {
        let form = HeadlessForm::new().with_select("theme", &["light", "dark"]);
        assert_eq!(form.value_of("theme").as_deref(), Some("light"));

        let fields = form.fields_named("theme");
        let field = &fields[0];
        field.set_value("dark");
        assert_eq!(field.selected_option_value().as_deref(), Some("dark"));

        field.set_value("sepia");
        assert_eq!(field.selected_option_value(), None);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_radio_group_is_exclusive() {
        let form = HeadlessForm::new()
            .with_radio("size", "small", true)
            .with_radio("size", "large", false);

        let buttons = form.fields_named("size");
        assert_eq!(buttons.len(), 2);

        buttons[1].set_checked(true);
        assert!(!buttons[0].checked());
        assert_eq!(form.checked_radio("size").as_deref(), Some("large"));
    }

    #[tokio::test]
    async fn test_toggle_fires_input_and_change() {
        let form = HeadlessForm::new().with_checkbox("notify", false);
        let inputs = recorder(&form, FormEventKind::Input);
        let changes = recorder(&form, FormEventKind::Change);

        form.toggle("notify", true).await.unwrap();

        assert_eq!(form.is_checked("notify"), Some(true));
        assert_eq!(inputs.read().len(), 1);
        assert_eq!(changes.read().len(), 1);
    }

    #[tokio::test]
    async fn test_type_text_fires_input_only() {
        let form = HeadlessForm::new().with_text("name", "");
        let inputs = recorder(&form, FormEventKind::Input);
        let changes = recorder(&form, FormEventKind::Change);

        form.type_text("name", "Ada").await.unwrap();

        assert_eq!(
            inputs.read().as_slice(),
            &[("name".to_string(), "Ada".to_string())]
        );
        assert!(changes.read().is_empty());
    }

    #[tokio::test]
    async fn test_choose_rejects_unknown_values() {
        let form = HeadlessForm::new()
            .with_select("theme", &["light", "dark"])
            .with_radio("size", "small", false)
            .with_text("name", "");

        assert!(matches!(
            form.choose("theme", "sepia").await,
            Err(FormError::NoSuchOption { .. })
        ));
        assert_eq!(form.value_of("theme").as_deref(), Some("light"));
        assert!(matches!(
            form.choose("size", "huge").await,
            Err(FormError::NoSuchOption { .. })
        ));
        assert!(matches!(
            form.choose("name", "x").await,
            Err(FormError::WrongControl { .. })
        ));
        assert!(matches!(
            form.toggle("missing", true).await,
            Err(FormError::FieldNotFound(_))
        ));

        form.choose("size", "small").await.unwrap();
        assert_eq!(form.checked_radio("size").as_deref(), Some("small"));
    }
}
