//! Form binder
//!
//! Moves option values between the options record and form fields. The
//! control type of a field decides how a value is written and read back:
//!
//! | Control    | Write                           | Read                  |
//! |------------|---------------------------------|-----------------------|
//! | checkbox   | `checked` from truthiness       | `checked`             |
//! | radio      | check the button with the value | `value`               |
//! | select-one | `value`                         | selected option value |
//! | other      | `value`                         | `value`               |

use std::sync::Arc;

use optsync_forms::{ControlType, Form, FormField};

use crate::value::{OptionValue, Options};

/// Outcome of filling a form from the options record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSyncReport {
    /// Options written into at least one field
    pub applied: Vec<String>,
    /// Stored options with no field of the same name
    pub unmatched: Vec<String>,
}

/// Write every option into the fields of `form` that share its name.
///
/// Options without a matching field are logged and skipped.
pub fn apply_to_form<F: Form + ?Sized>(options: &Options, form: &F) -> FormSyncReport {
    let mut report = FormSyncReport::default();

    for (name, value) in options {
        let fields = form.fields_named(name);
        if fields.is_empty() {
            tracing::warn!(option = %name, value = %value, "Stored option was not found on the page");
            report.unmatched.push(name.clone());
            continue;
        }

        tracing::info!(option = %name, value = %value, "Set option");
        write_field(&fields, value);
        report.applied.push(name.clone());
    }

    report
}

/// Write `value` into a group of same-named fields.
///
/// The first field's control type decides the rule. A radio group with no
/// button whose value equals the stored text is left untouched.
pub fn write_field(fields: &[Arc<dyn FormField>], value: &OptionValue) {
    let Some(first) = fields.first() else {
        return;
    };

    match first.control_type() {
        ControlType::Checkbox => first.set_checked(value.is_truthy()),
        ControlType::Radio => {
            let selected = fields
                .iter()
                .find(|button| value.as_str() == Some(button.value().as_str()));
            if let Some(button) = selected {
                button.set_checked(true);
            }
        }
        ControlType::SelectOne | ControlType::Other(_) => first.set_value(&value.to_string()),
    }
}

/// The value a user edit should store, `None` when the field has nothing
/// to report (a select with no selected option)
pub fn read_field(field: &dyn FormField) -> Option<OptionValue> {
    match field.control_type() {
        ControlType::SelectOne => field.selected_option_value().map(OptionValue::Text),
        ControlType::Checkbox => Some(OptionValue::Bool(field.checked())),
        ControlType::Radio | ControlType::Other(_) => Some(OptionValue::Text(field.value())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options;
    use optsync_forms::HeadlessForm;

    #[test]
    fn test_apply_select_and_checkbox() {
        let form = HeadlessForm::new()
            .with_select("theme", &["light", "dark"])
            .with_checkbox("notify", false);

        let report = apply_to_form(
            &options! { "theme" => "dark", "notify" => true },
            &form,
        );

        assert_eq!(form.value_of("theme").as_deref(), Some("dark"));
        assert_eq!(form.is_checked("notify"), Some(true));
        assert_eq!(report.applied, vec!["notify", "theme"]);
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn test_apply_radio_group() {
        let form = HeadlessForm::new()
            .with_radio("size", "small", true)
            .with_radio("size", "medium", false)
            .with_radio("size", "large", false);

        apply_to_form(&options! { "size" => "large" }, &form);
        assert_eq!(form.checked_radio("size").as_deref(), Some("large"));

        // No matching button leaves the group alone
        apply_to_form(&options! { "size" => "huge" }, &form);
        assert_eq!(form.checked_radio("size").as_deref(), Some("large"));

        // Radio values only match text
        apply_to_form(&options! { "size" => true }, &form);
        assert_eq!(form.checked_radio("size").as_deref(), Some("large"));
    }

    #[test]
    fn test_apply_other_controls_use_string_form() {
        let form = HeadlessForm::new()
            .with_input("limit", "number", "")
            .with_text("name", "");

        apply_to_form(&options! { "limit" => 25, "name" => "Ada" }, &form);

        assert_eq!(form.value_of("limit").as_deref(), Some("25"));
        assert_eq!(form.value_of("name").as_deref(), Some("Ada"));
    }

    #[test]
    fn test_unmatched_options_are_reported() {
        let form = HeadlessForm::new().with_checkbox("notify", false);

        let report = apply_to_form(
            &options! { "legacyOption" => "x", "notify" => true },
            &form,
        );

        assert_eq!(report.unmatched, vec!["legacyOption"]);
        assert_eq!(report.applied, vec!["notify"]);
        assert_eq!(form.is_checked("notify"), Some(true));
    }

    #[test]
    fn test_read_field_by_control() {
        let form = HeadlessForm::new()
            .with_select("theme", &["light", "dark"])
            .with_select("empty", &[])
            .with_checkbox("notify", true)
            .with_radio("size", "small", true)
            .with_input("limit", "number", "7");

        let read = |name: &str| read_field(form.fields_named(name)[0].as_ref());

        assert_eq!(read("theme"), Some(OptionValue::from("light")));
        assert_eq!(read("empty"), None);
        assert_eq!(read("notify"), Some(OptionValue::from(true)));
        assert_eq!(read("size"), Some(OptionValue::from("small")));
        // Numbers come back as strings, like the DOM reports them
        assert_eq!(read("limit"), Some(OptionValue::from("7")));
    }
}
