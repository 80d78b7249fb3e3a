//! Control types
//!
//! The DOM reports a control's kind through its `type` string. Only three
//! kinds need special handling when moving values in and out of a form;
//! everything else is read and written through `value`.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// `<input type="checkbox">`, value lives in `checked`
    Checkbox,
    /// `<input type="radio">`, one checked button per group
    Radio,
    /// `<select>` without `multiple`
    SelectOne,
    /// Any other control (`text`, `number`, `email`, `textarea`, ...)
    Other(String),
}

impl ControlType {
    pub fn from_type_str(kind: &str) -> Self {
        match kind {
            "checkbox" => ControlType::Checkbox,
            "radio" => ControlType::Radio,
            "select-one" => ControlType::SelectOne,
            other => ControlType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ControlType::Checkbox => "checkbox",
            ControlType::Radio => "radio",
            ControlType::SelectOne => "select-one",
            ControlType::Other(kind) => kind,
        }
    }
}

impl std::fmt::Display for ControlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ControlType {
    fn from(kind: &str) -> Self {
        ControlType::from_type_str(kind)
    }
}
