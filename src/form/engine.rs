use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use super::field::{FieldDescriptor, FormDescriptor, FormState, Transform};
use super::validation::{FormValidator, KindValidator, ValidationResult};
use crate::errors::FormError;

/// State transitions understood by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Store `value` in `field`, leaving `touched` as it was.
    Change { field: String, value: String },
    /// Store `value` in `field` and mark it touched.
    Blur { field: String, value: String },
    /// Replace the whole state.
    Reset(FormState),
}

/// Pure transition function: `(state, action) -> state`.
///
/// Transforms and validation are the engine's concern; this only moves
/// values. Actions naming a field the state does not track leave the state
/// unchanged.
pub fn reduce(state: &FormState, action: &FormAction) -> FormState {
    match action {
        FormAction::Change { field, value } => {
            let mut next = state.clone();
            if let Some(entry) = next.fields.get_mut(field) {
                entry.value = value.clone();
            }
            next
        }
        FormAction::Blur { field, value } => {
            let mut next = state.clone();
            if let Some(entry) = next.fields.get_mut(field) {
                entry.value = value.clone();
                entry.touched = true;
            }
            next
        }
        FormAction::Reset(replacement) => replacement.clone(),
    }
}

/// Writes the validator's verdict into every field, clearing errors the
/// verdict no longer mentions.
pub fn apply_validation(state: &mut FormState, verdict: &ValidationResult) {
    for (key, field) in state.fields.iter_mut() {
        field.error = verdict.get(key).cloned();
    }
}

fn run_transform(transform: Option<&Transform>, raw: &str, field: &str) -> String {
    match transform {
        Some(transform) => transform(raw, field),
        None => raw.to_string(),
    }
}

/// Owns the state of one form instance.
///
/// Every change and blur builds the complete next state, validates it as a
/// whole and only then commits it, so readers never observe a half-applied
/// transition.
pub struct FormEngine {
    id: Uuid,
    descriptor: FormDescriptor,
    validator: Arc<dyn FormValidator>,
    initial: FormState,
    state: FormState,
}

impl FormEngine {
    pub fn new(
        descriptor: FormDescriptor,
        validator: impl FormValidator + 'static,
    ) -> Result<Self, FormError> {
        if descriptor.fields.is_empty() {
            return Err(FormError::EmptyForm(descriptor.name.to_string()));
        }
        let mut seen = HashSet::new();
        for key in descriptor.keys() {
            if !seen.insert(key) {
                return Err(FormError::DuplicateField {
                    form: descriptor.name.to_string(),
                    field: key.to_string(),
                });
            }
        }

        let initial = FormState::seeded(&descriptor);
        let id = Uuid::new_v4();
        debug!(form = descriptor.name, %id, fields = descriptor.fields.len(), "form created");

        Ok(Self {
            id,
            descriptor,
            validator: Arc::new(validator),
            state: initial.clone(),
            initial,
        })
    }

    /// Builds an engine validated by the kinds its descriptor declares.
    pub fn with_kind_validation(descriptor: FormDescriptor) -> Result<Self, FormError> {
        let validator = KindValidator::from_descriptor(&descriptor);
        Self::new(descriptor, validator)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// State captured at construction, used by argument-less [`FormEngine::reset`].
    pub fn initial_state(&self) -> &FormState {
        &self.initial
    }

    pub fn on_change(&mut self, field: &str, raw: &str) -> Result<&FormState, FormError> {
        self.dispatch(FormAction::Change {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }

    pub fn on_blur(&mut self, field: &str, raw: &str) -> Result<&FormState, FormError> {
        self.dispatch(FormAction::Blur {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }

    /// Installs `replacement` verbatim, or the construction-time state when
    /// `None`. No validation runs.
    pub fn reset(&mut self, replacement: Option<FormState>) -> Result<&FormState, FormError> {
        let state = replacement.unwrap_or_else(|| self.initial.clone());
        self.dispatch(FormAction::Reset(state))
    }

    /// Applies one action. Change and blur run the field's transform first
    /// and the form validator last.
    pub fn dispatch(&mut self, action: FormAction) -> Result<&FormState, FormError> {
        let (action, validate) = match action {
            FormAction::Change { field, value } => {
                let descriptor = self.lookup(&field)?;
                let value = run_transform(descriptor.on_change.as_ref(), &value, &field);
                debug!(form = self.descriptor.name, id = %self.id, field = %field, "field changed");
                (FormAction::Change { field, value }, true)
            }
            FormAction::Blur { field, value } => {
                let descriptor = self.lookup(&field)?;
                let value = run_transform(descriptor.on_blur.as_ref(), &value, &field);
                debug!(form = self.descriptor.name, id = %self.id, field = %field, "field blurred");
                (FormAction::Blur { field, value }, true)
            }
            FormAction::Reset(state) => {
                if !state.has_same_fields(&self.initial) {
                    warn!(form = self.descriptor.name, id = %self.id, "rejected reset with foreign field set");
                    return Err(FormError::FieldSetMismatch {
                        form: self.descriptor.name.to_string(),
                    });
                }
                debug!(form = self.descriptor.name, id = %self.id, "form reset");
                (FormAction::Reset(state), false)
            }
        };

        let mut next = reduce(&self.state, &action);
        if validate {
            let verdict = self.validator.validate(&next);
            apply_validation(&mut next, &verdict);
        }
        self.state = next;
        Ok(&self.state)
    }

    fn lookup(&self, field: &str) -> Result<&FieldDescriptor, FormError> {
        self.descriptor.field(field).ok_or_else(|| {
            warn!(form = self.descriptor.name, id = %self.id, field, "unknown field");
            FormError::UnknownField {
                form: self.descriptor.name.to_string(),
                field: field.to_string(),
            }
        })
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("id", &self.id)
            .field("name", &self.descriptor.name)
            .field("state", &self.state)
            .finish()
    }
}
