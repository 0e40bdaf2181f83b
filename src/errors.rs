use std::io;

use kentry_config::ConfigError;
use thiserror::Error;

use crate::flow::Page;

/// Caller-contract violations reported by the form engine.
///
/// Validation failures are not errors; they travel as data inside
/// [`crate::form::FormField::error`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form `{0}` must declare at least one field")]
    EmptyForm(String),
    #[error("form `{form}` declares field `{field}` more than once")]
    DuplicateField { form: String, field: String },
    #[error("form `{form}` has no field named `{field}`")]
    UnknownField { form: String, field: String },
    #[error("replacement state for form `{form}` does not match its field set")]
    FieldSetMismatch { form: String },
}

/// Failures raised by the page flow coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("this action is only available on the {expected} page (currently on {actual})")]
    WrongPage { expected: Page, actual: Page },
    #[error("no address is registered for postal code `{0}`")]
    UnknownPostalCode(String),
}

/// Errors that abort the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line editor failure: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("prompt failure: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<FormError> for CliError {
    fn from(err: FormError) -> Self {
        CliError::Flow(FlowError::Form(err))
    }
}
