//! Mock submission pipeline
//!
//! Stands in for a backend call: serializes the payload, waits a fixed delay
//! on the injected clock and always succeeds.

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::submit::Feedback;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;
use tracing::info;

/// Submission state of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    /// Editable, nothing pending
    Idle,
    /// Mock request in flight
    Submitting,
    /// Request resolved
    Success,
}

impl SubmitState {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Submitting => 1,
            Self::Success => 2,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Submitting,
            2 => Self::Success,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
        };
        f.write_str(s)
    }
}

/// What the mock backend accepted
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Form that was submitted
    pub form: String,
    /// When the request resolved
    pub submitted_at: DateTime<Utc>,
    /// Payload as sent
    pub body: Value,
}

/// Per-form submission pipeline with an in-flight guard
pub struct SubmissionPipeline {
    form: &'static str,
    clock: Arc<dyn Clock>,
    delay: Duration,
    in_flight: AtomicBool,
    state: AtomicU8,
}

/// Releases the in-flight flag even when the pending future is dropped
struct InFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a AtomicU8,
    done: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.state
                .store(SubmitState::Idle.as_u8(), Ordering::SeqCst);
        }
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl SubmissionPipeline {
    /// Create a pipeline for `form` that resolves after `delay`
    pub fn new(form: &'static str, clock: Arc<dyn Clock>, delay: Duration) -> Self {
        Self {
            form,
            clock,
            delay,
            in_flight: AtomicBool::new(false),
            state: AtomicU8::new(SubmitState::Idle.as_u8()),
        }
    }

    /// Form name
    pub const fn form(&self) -> &'static str {
        self.form
    }

    /// Current state
    pub fn state(&self) -> SubmitState {
        SubmitState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Whether a submission is pending (submit control disabled)
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Clock used for delays and timestamps
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Return to `idle` so the form can be submitted again
    pub fn reset(&self) {
        if !self.is_in_flight() {
            self.state.store(SubmitState::Idle.as_u8(), Ordering::SeqCst);
        }
    }

    /// Send a validated payload
    ///
    /// Rejected while another submission is pending or after success until
    /// [`reset`](Self::reset) is called.
    pub async fn submit<P: Serialize + Sync>(
        &self,
        payload: &P,
        feedback: &dyn Feedback,
    ) -> Result<Receipt> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(Error::SubmissionInFlight);
        }
        let mut guard = InFlight {
            flag: &self.in_flight,
            state: &self.state,
            done: false,
        };

        if self.state() == SubmitState::Success {
            guard.done = true;
            return Err(Error::AlreadySubmitted);
        }

        let body = serde_json::to_value(payload)?;

        self.set_state(SubmitState::Submitting);
        feedback.on_state(self.form, SubmitState::Submitting).await;
        info!(form = self.form, payload = %body, "submitting");

        self.clock.sleep(self.delay).await;

        guard.done = true;
        self.set_state(SubmitState::Success);
        drop(guard);

        info!(form = self.form, "submission succeeded");
        feedback.on_state(self.form, SubmitState::Success).await;

        Ok(Receipt {
            form: self.form.to_string(),
            submitted_at: self.clock.now(),
            body,
        })
    }

    fn set_state(&self, state: SubmitState) {
        self.state.store(state.as_u8(), Ordering::SeqCst);
    }
}
