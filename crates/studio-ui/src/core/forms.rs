//! Form state, validation and dialog lifecycle.
//!
//! # Design
//! - Keep inputs as strings for lossless editing; convert on submit.
//! - Validation returns every failing field at once, keyed by field name,
//!   carrying a translation key for the inline message.
//! - A dialog always ends closed and reset after a submission settles.

/// Inline validation failures in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: Vec<(&'static str, &'static str)>,
}

impl FormErrors {
    /// Record a failure for `field` with a translation key.
    pub fn push(&mut self, field: &'static str, message_key: &'static str) {
        self.entries.push((field, message_key));
    }

    /// Record a failure when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str, message_key: &'static str) {
        if value.trim().is_empty() {
            self.push(field, message_key);
        }
    }

    /// Record a failure when `value` is absent.
    pub fn require_some<T>(
        &mut self,
        field: &'static str,
        value: Option<&T>,
        message_key: &'static str,
    ) {
        if value.is_none() {
            self.push(field, message_key);
        }
    }

    /// Message key for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, key)| *key)
    }

    /// Whether any field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Failing field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }

    /// `Ok(value)` when nothing failed.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// A form that converts its raw inputs into a request payload.
pub trait FormModel: Clone + Default + PartialEq {
    /// Validated payload.
    type Output;

    /// Check required fields and convert.
    ///
    /// # Errors
    /// Returns every failing field.
    fn validate(&self) -> Result<Self::Output, FormErrors>;
}

/// Form inputs plus validation and submission status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState<F> {
    /// Raw inputs.
    pub form: F,
    /// Failures from the last submit attempt.
    pub errors: FormErrors,
    /// A submission is in flight.
    pub submitting: bool,
}

impl<F: FormModel> FormState<F> {
    /// Validate and, on success, mark the form as submitting.
    ///
    /// Returns `None` when validation failed (errors are recorded) or a
    /// submission is already running.
    pub fn begin_submit(&mut self) -> Option<F::Output> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(output) => {
                self.errors = FormErrors::default();
                self.submitting = true;
                Some(output)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Clear inputs, errors and the submitting flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A modal form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogState<F> {
    /// Dialog visibility.
    pub open: bool,
    /// Form contents.
    pub state: FormState<F>,
}

impl<F: FormModel> DialogState<F> {
    /// Show the dialog with a fresh form.
    pub fn open(&mut self) {
        if !self.state.submitting {
            self.state.reset();
        }
        self.open = true;
    }

    /// Hide the dialog and discard its inputs, unless a submission is running.
    pub fn close(&mut self) {
        if !self.state.submitting {
            self.open = false;
            self.state.reset();
        }
    }

    /// Guaranteed cleanup after a submission, whatever its outcome.
    pub fn settle(&mut self) {
        self.open = false;
        self.state.reset();
    }
}

/// What happened to a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    /// A submission was already running; nothing was sent.
    Busy,
    /// The backend accepted the request.
    Saved,
    /// The backend or transport failed; the message was toasted.
    Failed(String),
}

impl SubmitOutcome {
    /// Outcome of a submit that `begin_submit` refused.
    #[must_use]
    pub const fn blocked(submitting: bool) -> Self {
        if submitting { Self::Busy } else { Self::Invalid }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct NameForm {
        name: String,
    }

    impl FormModel for NameForm {
        type Output = String;

        fn validate(&self) -> Result<String, FormErrors> {
            let mut errors = FormErrors::default();
            errors.require("name", &self.name, "validation.title_required");
            errors.into_result(|| self.name.trim().to_string())
        }
    }

    #[test]
    fn invalid_form_records_errors_and_stays_idle() {
        let mut state = FormState::<NameForm>::default();
        assert_eq!(state.begin_submit(), None);
        assert!(!state.submitting);
        assert_eq!(state.errors.get("name"), Some("validation.title_required"));
        assert_eq!(state.errors.fields().collect::<Vec<_>>(), ["name"]);
    }

    #[test]
    fn valid_form_blocks_reentry_until_settled() {
        let mut dialog = DialogState::<NameForm>::default();
        dialog.open();
        dialog.state.form.name = " Beach ".into();
        assert_eq!(dialog.state.begin_submit().as_deref(), Some("Beach"));
        assert_eq!(dialog.state.begin_submit(), None);

        dialog.close();
        assert!(dialog.open, "close is ignored while submitting");

        dialog.settle();
        assert_eq!(dialog, DialogState::default());
    }

    #[test]
    fn require_some_flags_missing_values() {
        let mut errors = FormErrors::default();
        errors.require_some::<u8>("file", None, "validation.file_required");
        errors.require_some("other", Some(&1), "unused");
        assert_eq!(errors.get("file"), Some("validation.file_required"));
        assert_eq!(errors.get("other"), None);
    }

    #[test]
    fn refused_submit_reports_busy_only_while_submitting() {
        assert_eq!(SubmitOutcome::blocked(true), SubmitOutcome::Busy);
        assert_eq!(SubmitOutcome::blocked(false), SubmitOutcome::Invalid);
    }
}
