//! Mock collaborators for testing
//!
//! Recording feedback and navigation, and an upload service whose files can
//! be made to fail, lag behind or never settle.

#![allow(dead_code)]

use async_trait::async_trait;
use cart_royal::error::{Error, Result};
use cart_royal::submit::{Feedback, Navigator, SubmitState};
use cart_royal::types::{FileHandle, Route};
use cart_royal::upload::{RemoteRef, UploadItem, UploadKind, UploadService, UploadStatus};
use cart_royal::validate::ValidationErrors;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Everything a page reported, in order
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackEvent {
    State(String, SubmitState),
    Upload(UploadKind, String, UploadStatus),
    FieldErrors(String, ValidationErrors),
    Alert(String),
    Message(String),
}

/// Feedback sink that records every call
#[derive(Default)]
pub struct RecordingFeedback {
    events: Mutex<Vec<FeedbackEvent>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: FeedbackEvent) {
        self.events.lock().unwrap().push(event);
    }

    /// Every recorded event
    pub fn events(&self) -> Vec<FeedbackEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Alert messages in order
    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FeedbackEvent::Alert(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    /// General messages in order
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FeedbackEvent::Message(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    /// Submission states reported for `form`
    pub fn states(&self, form: &str) -> Vec<SubmitState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FeedbackEvent::State(f, state) if f == form => Some(state),
                _ => None,
            })
            .collect()
    }

    /// Upload statuses reported for one file
    pub fn upload_statuses(&self, file: &str) -> Vec<UploadStatus> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FeedbackEvent::Upload(_, name, status) if name == file => Some(status),
                _ => None,
            })
            .collect()
    }

    /// Last field errors reported for `form`
    pub fn field_errors(&self, form: &str) -> Option<ValidationErrors> {
        self.events().into_iter().rev().find_map(|e| match e {
            FeedbackEvent::FieldErrors(f, errors) if f == form => Some(errors),
            _ => None,
        })
    }

    /// Whether any submission started
    pub fn submitted(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, FeedbackEvent::State(_, SubmitState::Submitting)))
    }
}

#[async_trait]
impl Feedback for RecordingFeedback {
    async fn on_state(&self, form: &str, state: SubmitState) {
        self.record(FeedbackEvent::State(form.to_string(), state));
    }

    async fn on_upload(&self, kind: UploadKind, item: &UploadItem) {
        self.record(FeedbackEvent::Upload(
            kind,
            item.source.name.clone(),
            item.status,
        ));
    }

    async fn on_field_errors(&self, form: &str, errors: &ValidationErrors) {
        self.record(FeedbackEvent::FieldErrors(form.to_string(), errors.clone()));
    }

    async fn on_alert(&self, message: &str) {
        self.record(FeedbackEvent::Alert(message.to_string()));
    }

    async fn on_message(&self, message: &str) {
        self.record(FeedbackEvent::Message(message.to_string()));
    }
}

/// Navigator that records every route
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to, in order
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Scriptable upload service
///
/// Features:
/// - Sequential public ids
/// - Call tracking and completion order
/// - Per-file failure injection
/// - Per-file extra scheduler yields, to reorder completions
/// - A hold switch that leaves every upload pending forever
#[derive(Default)]
pub struct MockUploadService {
    next_id: AtomicU64,
    hold: AtomicBool,
    failing: Mutex<HashSet<String>>,
    yields: Mutex<HashMap<String, usize>>,
    // Call tracking
    upload_calls: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
}

impl MockUploadService {
    pub fn new() -> Self {
        Self::default()
    }

    // === Scripting methods ===

    /// Make uploads of `file` fail
    pub fn fail_file(&self, file: &str) {
        self.failing.lock().unwrap().insert(file.to_string());
    }

    /// Yield `n` extra times before resolving `file`
    pub fn delay_file(&self, file: &str, n: usize) {
        self.yields.lock().unwrap().insert(file.to_string(), n);
    }

    /// Leave every upload pending until the future is dropped
    pub fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    // === Call verification methods ===

    /// File names passed to `upload`, in call order
    pub fn get_upload_calls(&self) -> Vec<String> {
        self.upload_calls.lock().unwrap().clone()
    }

    /// File names that resolved successfully, in completion order
    pub fn get_completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadService for MockUploadService {
    async fn upload(&self, file: &FileHandle) -> Result<RemoteRef> {
        self.upload_calls.lock().unwrap().push(file.name.clone());

        if self.hold.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        let extra = self
            .yields
            .lock()
            .unwrap()
            .get(&file.name)
            .copied()
            .unwrap_or(0);
        for _ in 0..extra {
            tokio::task::yield_now().await;
        }

        if self.failing.lock().unwrap().contains(&file.name) {
            return Err(Error::UploadFailed(file.name.clone()));
        }

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.completed.lock().unwrap().push(file.name.clone());
        Ok(RemoteRef {
            url: format!("https://cdn.test/{n}/{}", file.name),
            public_id: format!("test_{n}"),
        })
    }
}
