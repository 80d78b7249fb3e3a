//! Form error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Field {name} has no option {value}")]
    NoSuchOption { name: String, value: String },

    #[error("Field {name} is a {control}, expected {expected}")]
    WrongControl {
        name: String,
        control: String,
        expected: &'static str,
    },
}
