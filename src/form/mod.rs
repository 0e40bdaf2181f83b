//! Generic form engine: descriptors, per-field state, the reducer and the
//! whole-form validators.

mod engine;
mod field;
mod validation;

pub use engine::{apply_validation, reduce, FormAction, FormEngine};
pub use field::{
    FieldDescriptor, FieldKind, FieldStatus, FormDescriptor, FormField, FormState, Transform,
};
pub use validation::{ErrorMessage, FormValidator, KindValidator, ValidationResult, ValidationRule};
