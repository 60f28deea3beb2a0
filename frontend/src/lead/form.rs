use std::rc::Rc;

use log::debug;
use serde::Serialize;
use yew::functional::Reducible;

use crate::lead::submit::{deliver, Completion, LeadTransport};
use crate::lead::validation::{validate, Field};

/// Contact details typed into the join form. Serialized as the webhook body.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct ContactLead {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub linkedin: String,
}

impl ContactLead {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Mobile => &self.mobile,
            Field::Linkedin => &self.linkedin,
        }
    }

    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Mobile => self.mobile = value,
            Field::Linkedin => self.linkedin = value,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldState {
    pub touched: bool,
    pub error: Option<&'static str>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldStates {
    pub name: FieldState,
    pub email: FieldState,
    pub mobile: FieldState,
    pub linkedin: FieldState,
}

impl FieldStates {
    pub fn get(&self, field: Field) -> &FieldState {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Mobile => &self.mobile,
            Field::Linkedin => &self.linkedin,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Mobile => &mut self.mobile,
            Field::Linkedin => &mut self.linkedin,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Completed(Completion),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitAttempt {
    /// Validation failed; the browser's own validation UI should be shown.
    Rejected,
    /// A submission is already running or finished for this instance.
    Ignored,
    Started(ContactLead),
}

/// One join-form session: `Editing -> Submitting -> Completed`.
///
/// Completed is terminal. Closing the modal drops the instance and the next
/// open starts from [`LeadForm::default`].
#[derive(Clone, Debug, PartialEq)]
pub struct LeadForm {
    draft: ContactLead,
    fields: FieldStates,
    form_valid: bool,
    phase: FormPhase,
}

impl Default for LeadForm {
    fn default() -> Self {
        Self {
            draft: ContactLead::default(),
            fields: FieldStates::default(),
            form_valid: false,
            phase: FormPhase::Editing,
        }
    }
}

impl LeadForm {
    pub fn draft(&self) -> &ContactLead {
        &self.draft
    }

    pub fn field(&self, field: Field) -> &FieldState {
        self.fields.get(field)
    }

    pub fn form_valid(&self) -> bool {
        self.form_valid
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Stores the raw value. No validation while typing.
    pub fn update_field(&mut self, field: Field, value: String) {
        if self.phase != FormPhase::Editing {
            debug!("Ignoring edit to {} outside editing", field.input_name());
            return;
        }
        self.draft.set(field, value);
    }

    pub fn blur_field(&mut self, field: Field, value: String) {
        if self.phase != FormPhase::Editing {
            return;
        }
        let error = validate(field, &value);
        self.draft.set(field, value);
        let state = self.fields.get_mut(field);
        state.touched = true;
        state.error = error;
        self.recompute_validity();
    }

    fn recompute_validity(&mut self) {
        self.form_valid = Field::ALL.iter().all(|&field| {
            let state = self.fields.get(field);
            if field.is_required() {
                state.touched && state.error.is_none()
            } else {
                self.draft.get(field).is_empty() || validate(field, self.draft.get(field)).is_none()
            }
        });
    }

    fn touch_all(&mut self) {
        for field in Field::ALL {
            let value = self.draft.get(field).to_string();
            self.blur_field(field, value);
        }
    }

    /// Validates every field, then moves to `Submitting` when both the
    /// browser's constraint check and our own rules pass.
    pub fn begin_submit(&mut self, native_valid: bool) -> SubmitAttempt {
        if self.phase != FormPhase::Editing {
            return SubmitAttempt::Ignored;
        }
        self.touch_all();
        if !native_valid || !self.form_valid {
            return SubmitAttempt::Rejected;
        }
        self.phase = FormPhase::Submitting;
        SubmitAttempt::Started(self.draft.clone())
    }

    /// What [`LeadForm::begin_submit`] would hand out, without changing `self`.
    pub fn preview_submit(&self, native_valid: bool) -> SubmitAttempt {
        self.clone().begin_submit(native_valid)
    }

    pub fn complete(&mut self, completion: Completion) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Completed(completion);
        }
    }

    /// Full fire-once submission against `transport`. Returns whether a request was made.
    pub async fn submit<T>(&mut self, transport: &T, native_valid: bool) -> bool
    where
        T: LeadTransport + ?Sized,
    {
        let lead = match self.begin_submit(native_valid) {
            SubmitAttempt::Started(lead) => lead,
            _ => return false,
        };
        let completion = deliver(transport, &lead).await;
        self.complete(completion);
        true
    }
}

pub enum LeadFormAction {
    Update(Field, String),
    Blur(Field, String),
    Submit { native_valid: bool },
    Complete(Completion),
}

impl Reducible for LeadForm {
    type Action = LeadFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LeadFormAction::Update(field, value) => next.update_field(field, value),
            LeadFormAction::Blur(field, value) => next.blur_field(field, value),
            LeadFormAction::Submit { native_valid } => {
                next.begin_submit(native_valid);
            }
            LeadFormAction::Complete(completion) => next.complete(completion),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RemoteError, RemoteResult};
    use crate::lead::submit::{WebhookReply, FALLBACK_MESSAGE};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn filled() -> LeadForm {
        let mut form = LeadForm::default();
        form.blur_field(Field::Name, "Arun Kumar".into());
        form.blur_field(Field::Email, "arun@studio.design".into());
        form.blur_field(Field::Mobile, "9876543210".into());
        form
    }

    struct Recording {
        calls: Cell<usize>,
        result: RemoteResult<WebhookReply>,
    }

    impl Recording {
        fn new(result: RemoteResult<WebhookReply>) -> Self {
            Self { calls: Cell::new(0), result }
        }
    }

    #[async_trait(?Send)]
    impl LeadTransport for Recording {
        async fn post_lead(&self, _lead: &ContactLead) -> RemoteResult<WebhookReply> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[test]
    fn typing_does_not_validate() {
        let mut form = LeadForm::default();
        form.update_field(Field::Email, "nope".into());
        assert_eq!(form.draft().email, "nope");
        assert_eq!(form.field(Field::Email), &FieldState::default());
    }

    #[test]
    fn blur_marks_touched_and_stores_error() {
        let mut form = LeadForm::default();
        form.blur_field(Field::Mobile, "123".into());
        let state = form.field(Field::Mobile);
        assert!(state.touched);
        assert_eq!(state.error, Some("Mobile number must be exactly 10 digits"));
        assert!(!form.form_valid());
    }

    #[test]
    fn valid_when_required_fields_touched_and_clean() {
        let form = filled();
        assert!(form.form_valid());
    }

    #[test]
    fn untouched_required_field_keeps_form_invalid() {
        let mut form = LeadForm::default();
        form.blur_field(Field::Name, "Arun Kumar".into());
        form.blur_field(Field::Email, "arun@studio.design".into());
        form.update_field(Field::Mobile, "9876543210".into());
        assert!(!form.form_valid());
    }

    #[test]
    fn breaking_any_required_field_flips_validity() {
        for (field, bad) in [
            (Field::Name, "A1"),
            (Field::Email, "arun"),
            (Field::Mobile, "98765"),
        ] {
            let mut form = filled();
            form.blur_field(field, bad.into());
            assert!(!form.form_valid(), "{:?}", field);
        }
    }

    #[test]
    fn linkedin_only_counts_when_populated() {
        let mut form = filled();
        form.blur_field(Field::Linkedin, "not-a-url".into());
        assert!(!form.form_valid());
        form.blur_field(Field::Linkedin, String::new());
        assert!(form.form_valid());
        form.blur_field(Field::Linkedin, "https://linkedin.com/in/arun".into());
        assert!(form.form_valid());
    }

    #[test]
    fn rejected_attempt_shows_all_errors() {
        let mut form = LeadForm::default();
        form.update_field(Field::Name, "Arun".into());
        assert_eq!(form.begin_submit(true), SubmitAttempt::Rejected);
        assert_eq!(*form.phase(), FormPhase::Editing);
        assert!(form.field(Field::Name).touched);
        assert_eq!(form.field(Field::Email).error, Some("Email required"));
        assert_eq!(form.field(Field::Mobile).error, Some("Mobile number required"));
    }

    #[test]
    fn native_constraint_failure_blocks_submit() {
        let mut form = filled();
        assert_eq!(form.begin_submit(false), SubmitAttempt::Rejected);
        assert!(!form.is_submitting());
    }

    #[test]
    fn second_submit_is_ignored_while_in_flight() {
        let mut form = filled();
        assert!(matches!(form.begin_submit(true), SubmitAttempt::Started(_)));
        assert!(form.is_submitting());
        assert_eq!(form.begin_submit(true), SubmitAttempt::Ignored);
        form.update_field(Field::Name, "Changed".into());
        assert_eq!(form.draft().name, "Arun Kumar");
    }

    #[test]
    fn preview_does_not_mutate() {
        let form = filled();
        assert!(matches!(form.preview_submit(true), SubmitAttempt::Started(_)));
        assert_eq!(*form.phase(), FormPhase::Editing);
    }

    #[test]
    fn abandoned_preview_leaves_form_usable() {
        let mut form = filled();
        assert!(matches!(form.preview_submit(true), SubmitAttempt::Started(_)));
        form.update_field(Field::Linkedin, "https://linkedin.com/in/arun".into());
        assert_eq!(form.draft().get(Field::Linkedin), "https://linkedin.com/in/arun");
        assert!(matches!(form.begin_submit(true), SubmitAttempt::Started(_)));
        assert!(form.is_submitting());
    }

    #[test]
    fn submitting_always_resolves() {
        let outcomes: Vec<RemoteResult<WebhookReply>> = vec![
            Ok(WebhookReply::default()),
            Err(RemoteError::Status { status: 502, body: String::new() }),
            Err(RemoteError::Network("connection reset".into())),
        ];
        for outcome in outcomes {
            let transport = Recording::new(outcome);
            let mut form = filled();
            assert!(block_on(form.submit(&transport, true)));
            assert!(!form.is_submitting());
            assert_eq!(transport.calls.get(), 1);
            match form.phase() {
                FormPhase::Completed(done) => assert_eq!(done.message, FALLBACK_MESSAGE),
                other => panic!("unexpected phase {:?}", other),
            }
        }
    }

    #[test]
    fn completed_form_is_terminal() {
        let transport = Recording::new(Ok(WebhookReply::default()));
        let mut form = filled();
        block_on(form.submit(&transport, true));
        assert!(!block_on(form.submit(&transport, true)));
        assert_eq!(transport.calls.get(), 1);
        form.blur_field(Field::Name, "x".into());
        assert!(form.field(Field::Name).error.is_none());
    }

    #[test]
    fn invalid_form_never_hits_the_network() {
        let transport = Recording::new(Ok(WebhookReply::default()));
        let mut form = LeadForm::default();
        assert!(!block_on(form.submit(&transport, true)));
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn reducer_follows_the_same_transitions() {
        let form = Rc::new(filled());
        let form = form.reduce(LeadFormAction::Submit { native_valid: true });
        assert!(form.is_submitting());
        let form = form.reduce(LeadFormAction::Complete(Completion::fallback()));
        assert!(matches!(form.phase(), FormPhase::Completed(_)));
    }
}
