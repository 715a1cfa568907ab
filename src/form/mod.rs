//! Form state for composing a synthesis request.
//!
//! Holds the draft the user is editing, validates it, and tracks whether a
//! submission is in flight. Submission goes through the [`Synthesizer`] seam,
//! which never fails, so this layer has no retry or error-recovery logic.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::api::{SynthesisClient, SynthesisRequest, SynthesisResponse};
use crate::error::{FieldErrors, FormField};

/// Minimum length of the desired trait, in characters.
pub const MIN_TRAIT_LENGTH: usize = 3;

/// Maximum length of the desired trait, in characters.
pub const MAX_TRAIT_LENGTH: usize = 100;

/// Something that turns a request into a response without failing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Produce a response for `request`.
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResponse;
}

#[async_trait]
impl Synthesizer for SynthesisClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResponse {
        self.submit(request).await
    }
}

/// The request being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDraft {
    /// Host organism as typed.
    pub host_organism: String,
    /// Desired trait as typed.
    pub desired_trait: String,
    /// Simulated codon optimization toggle.
    pub optimize: bool,
    /// Safety screening toggle.
    pub safety_check: bool,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            host_organism: String::new(),
            desired_trait: String::new(),
            optimize: true,
            safety_check: true,
        }
    }
}

impl FormDraft {
    /// Request built from the trimmed draft.
    pub fn to_request(&self) -> SynthesisRequest {
        SynthesisRequest::new(self.host_organism.trim(), self.desired_trait.trim())
            .with_optimize(self.optimize)
            .with_safety_check(self.safety_check)
    }
}

/// Partial update merged into the draft; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct FormUpdate {
    /// New host organism.
    pub host_organism: Option<String>,
    /// New desired trait.
    pub desired_trait: Option<String>,
    /// New optimize flag.
    pub optimize: Option<bool>,
    /// New safety check flag.
    pub safety_check: Option<bool>,
}

impl FormUpdate {
    /// Empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host organism
    pub fn host_organism(mut self, value: impl Into<String>) -> Self {
        self.host_organism = Some(value.into());
        self
    }

    /// Set the desired trait
    pub fn desired_trait(mut self, value: impl Into<String>) -> Self {
        self.desired_trait = Some(value.into());
        self
    }

    /// Set the optimize flag
    pub fn optimize(mut self, value: bool) -> Self {
        self.optimize = Some(value);
        self
    }

    /// Set the safety check flag
    pub fn safety_check(mut self, value: bool) -> Self {
        self.safety_check = Some(value);
        self
    }
}

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight.
    Idle,
    /// Waiting for the synthesizer.
    Submitting,
    /// Last submission produced this request id.
    Submitted {
        /// Id of the returned response.
        request_id: String,
    },
}

/// Check a draft. Returns an empty map when it is valid.
///
/// Fields are trimmed first; lengths are counted in characters.
pub fn validate(draft: &FormDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.host_organism.trim().is_empty() {
        errors.insert(FormField::HostOrganism, "Host organism is required");
    }

    let desired_trait = draft.desired_trait.trim();
    let len = desired_trait.chars().count();
    if desired_trait.is_empty() {
        errors.insert(FormField::DesiredTrait, "Desired trait is required");
    } else if len < MIN_TRAIT_LENGTH {
        errors.insert(
            FormField::DesiredTrait,
            format!("Desired trait must be at least {} characters", MIN_TRAIT_LENGTH),
        );
    } else if len > MAX_TRAIT_LENGTH {
        errors.insert(
            FormField::DesiredTrait,
            format!("Desired trait must be at most {} characters", MAX_TRAIT_LENGTH),
        );
    }

    errors
}

/// Draft, field errors and submission state of the request form.
#[derive(Debug, Clone)]
pub struct FormState {
    draft: FormDraft,
    errors: FieldErrors,
    state: SubmissionState,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Empty form with both options enabled.
    pub fn new() -> Self {
        Self {
            draft: FormDraft::default(),
            errors: FieldErrors::new(),
            state: SubmissionState::Idle,
        }
    }

    /// Current draft.
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Field errors from the last submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Submission lifecycle state.
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// True while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Merge `update` into the draft and clear earlier errors.
    pub fn update_form_data(&mut self, update: FormUpdate) {
        if let Some(host) = update.host_organism {
            self.draft.host_organism = host;
        }
        if let Some(desired_trait) = update.desired_trait {
            self.draft.desired_trait = desired_trait;
        }
        if let Some(optimize) = update.optimize {
            self.draft.optimize = optimize;
        }
        if let Some(safety_check) = update.safety_check {
            self.draft.safety_check = safety_check;
        }
        self.errors = FieldErrors::new();
    }

    /// Validate and submit the draft.
    ///
    /// Returns `None` without calling `synthesizer` when validation fails;
    /// the messages are then available from [`errors`](Self::errors). The
    /// in-flight state is left whether the call completes or the future is
    /// dropped.
    pub async fn submit<S>(&mut self, synthesizer: &S) -> Option<SynthesisResponse>
    where
        S: Synthesizer + ?Sized,
    {
        let errors = validate(&self.draft);
        if !errors.is_empty() {
            debug!(errors = %errors, "Synthesis form invalid");
            self.errors = errors;
            return None;
        }

        let request = self.draft.to_request();
        let mut in_flight = InFlight::start(&mut self.state);
        let response = synthesizer.synthesize(&request).await;
        in_flight.finish(&response.request_id);

        info!(
            request_id = %response.request_id,
            demo = response.is_demo(),
            "Synthesis form submitted"
        );
        Some(response)
    }
}

/// Marks the form as submitting; falls back to idle if dropped unfinished.
struct InFlight<'a> {
    state: &'a mut SubmissionState,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a mut SubmissionState) -> Self {
        *state = SubmissionState::Submitting;
        Self { state }
    }

    fn finish(&mut self, request_id: &str) {
        *self.state = SubmissionState::Submitted {
            request_id: request_id.to_string(),
        };
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if *self.state == SubmissionState::Submitting {
            *self.state = SubmissionState::Idle;
        }
    }
}
