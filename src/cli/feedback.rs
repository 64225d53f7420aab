//! Terminal feedback: styled output and a spinner while a submission runs

use crate::cli::style::{Stylize, arrow, bang, check, cross, spinner_style};
use anstream::{eprintln, println};
use async_trait::async_trait;
use cart_royal::submit::{Feedback, Navigator, SubmitState};
use cart_royal::types::Route;
use cart_royal::upload::{UploadItem, UploadKind, UploadStatus};
use cart_royal::validate::ValidationErrors;
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;

/// Feedback that prints to the terminal
#[derive(Default)]
pub struct CliFeedback {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliFeedback {
    /// Create terminal feedback
    pub fn new() -> Self {
        Self::default()
    }

    fn stop_spinner(&self) {
        if let Some(pb) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
            pb.finish_and_clear();
        }
    }
}

#[async_trait]
impl Feedback for CliFeedback {
    async fn on_state(&self, form: &str, state: SubmitState) {
        match state {
            SubmitState::Submitting => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(spinner_style());
                pb.set_message(format!("Submitting {form}..."));
                pb.enable_steady_tick(Duration::from_millis(80));
                if let Ok(mut spinner) = self.spinner.lock() {
                    *spinner = Some(pb);
                }
            }
            SubmitState::Success => {
                self.stop_spinner();
                println!("{} Submitted {}", check(), form.emphasis());
            }
            SubmitState::Idle => self.stop_spinner(),
        }
    }

    async fn on_upload(&self, kind: UploadKind, item: &UploadItem) {
        let name = &item.source.name;
        match item.status {
            UploadStatus::Staged => {}
            UploadStatus::Uploading => {
                println!("  Uploading {kind} {}...", name.accent());
            }
            UploadStatus::Complete => {
                let url = item.remote.as_ref().map_or("", |r| r.url.as_str());
                println!("  {} Uploaded {} {}", check(), name.emphasis(), url.muted());
            }
            UploadStatus::Failed => {
                eprintln!("  {} Failed to upload {}", cross(), name.accent().for_stderr());
            }
        }
    }

    async fn on_field_errors(&self, form: &str, errors: &ValidationErrors) {
        eprintln!(
            "{} {} form has {} error(s):",
            cross(),
            form.emphasis().for_stderr(),
            errors.len()
        );
        for e in errors {
            eprintln!("  {}: {}", e.field.accent().for_stderr(), e.message.error());
        }
    }

    async fn on_alert(&self, message: &str) {
        self.stop_spinner();
        println!("{} {}", bang(), message.emphasis());
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}

/// Navigator that reports where the dashboard would go next
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, route: Route) {
        println!("{} {}", arrow(), route.accent());
    }
}
