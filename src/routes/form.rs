//! Submission state shared by every form page.
//!
//! `Idle` -> `Submitting` -> `Succeeded` | `Failed`, and back to `Idle` on any
//! field edit or an explicit retry. A submit while `Submitting` is ignored.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl FormStatus {
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            FormStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn success(&self) -> Option<&str> {
        match self {
            FormStatus::Succeeded(message) => Some(message),
            _ => None,
        }
    }
}

/// Field values plus their submission status.
#[derive(Clone, Debug, Default)]
pub struct FormState<T> {
    fields: T,
    status: FormStatus,
}

impl<T> FormState<T> {
    pub fn new(fields: T) -> Self {
        Self {
            fields,
            status: FormStatus::Idle,
        }
    }

    pub fn fields(&self) -> &T {
        &self.fields
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Applies a field change. Clears messages unless a submit is in flight.
    pub fn edit(&mut self, change: impl FnOnce(&mut T)) {
        change(&mut self.fields);
        if !self.status.is_submitting() {
            self.status = FormStatus::Idle;
        }
    }

    pub fn retry(&mut self) {
        if !self.status.is_submitting() {
            self.status = FormStatus::Idle;
        }
    }

    /// Moves to `Submitting`. Returns false when a submit is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.status.is_submitting() {
            return false;
        }
        self.status = FormStatus::Submitting;
        true
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Succeeded(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FormStatus::Failed(message.into());
    }

    /// Swaps every field at once without touching the status.
    pub fn replace_fields(&mut self, fields: T) {
        self.fields = fields;
    }

    /// Field access for flows that clear values after a result.
    pub(crate) fn fields_mut(&mut self) -> &mut T {
        &mut self.fields
    }
}
