//! Store logo and background slots

use crate::config::UploadLimits;
use crate::error::Result;
use crate::submit::{Feedback, GuardViolation, check_uploads};
use crate::types::FileHandle;
use crate::upload::{UploadKind, UploadQueue, UploadReport, UploadService, upload_files};

/// The two single-file branding slots shared by register and settings
#[derive(Debug, Clone)]
pub struct StoreBranding {
    logo: UploadQueue,
    background: UploadQueue,
}

impl StoreBranding {
    /// Empty slots with the configured ceilings
    pub const fn new(limits: &UploadLimits) -> Self {
        Self {
            logo: UploadQueue::new(UploadKind::StoreLogo, limits),
            background: UploadQueue::new(UploadKind::StoreBackground, limits),
        }
    }

    /// Select and upload a logo, replacing the previous one
    pub async fn select_logo(
        &mut self,
        file: FileHandle,
        service: &dyn UploadService,
        feedback: &dyn Feedback,
    ) -> Result<UploadReport> {
        upload_files(&mut self.logo, vec![file], service, feedback).await
    }

    /// Select and upload a background image, replacing the previous one
    pub async fn select_background(
        &mut self,
        file: FileHandle,
        service: &dyn UploadService,
        feedback: &dyn Feedback,
    ) -> Result<UploadReport> {
        upload_files(&mut self.background, vec![file], service, feedback).await
    }

    /// Drop the logo
    pub fn remove_logo(&mut self) {
        self.logo.clear();
    }

    /// Drop the background image
    pub fn remove_background(&mut self) {
        self.background.clear();
    }

    /// Logo slot
    pub const fn logo(&self) -> &UploadQueue {
        &self.logo
    }

    /// Background slot
    pub const fn background(&self) -> &UploadQueue {
        &self.background
    }

    /// Remote URL of the uploaded logo
    pub fn logo_url(&self) -> Option<String> {
        first_url(&self.logo)
    }

    /// Remote URL of the uploaded background image
    pub fn background_url(&self) -> Option<String> {
        first_url(&self.background)
    }

    /// Both slots are optional but must not be mid-upload
    pub fn check(&self) -> Option<GuardViolation> {
        check_uploads(&self.logo, false).or_else(|| check_uploads(&self.background, false))
    }

    /// Empty both slots
    pub fn clear(&mut self) {
        self.logo.clear();
        self.background.clear();
    }
}

fn first_url(queue: &UploadQueue) -> Option<String> {
    queue.completed_refs().into_iter().next().map(|r| r.url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::InstantClock;
    use crate::submit::NoopFeedback;
    use crate::upload::SimulatedUploadService;
    use std::sync::Arc;
    use std::time::Duration;

    fn service() -> SimulatedUploadService {
        SimulatedUploadService::new(Arc::new(InstantClock::new()), Duration::from_millis(1000))
    }

    #[tokio::test]
    async fn test_logo_replaces_previous() {
        let mut branding = StoreBranding::new(&UploadLimits::default());
        let service = service();

        branding
            .select_logo(FileHandle::new("old.png", 100), &service, &NoopFeedback)
            .await
            .unwrap();
        branding
            .select_logo(FileHandle::new("new.png", 100), &service, &NoopFeedback)
            .await
            .unwrap();

        assert_eq!(branding.logo().len(), 1);
        assert!(branding.logo_url().unwrap().ends_with("/new.png"));
        assert_eq!(branding.background_url(), None);
        assert_eq!(branding.check(), None);
    }

    #[tokio::test]
    async fn test_oversize_background_is_refused() {
        let mut branding = StoreBranding::new(&UploadLimits::default());
        let report = branding
            .select_background(
                FileHandle::new("huge.jpg", 11 * 1024 * 1024),
                &service(),
                &NoopFeedback,
            )
            .await
            .unwrap();

        assert_eq!(report.rejected, vec!["huge.jpg".to_string()]);
        assert!(branding.background().is_empty());
    }

    #[test]
    fn test_pending_logo_blocks() {
        let mut branding = StoreBranding::new(&UploadLimits::default());
        let id = branding.logo.stage(FileHandle::new("a.png", 1)).unwrap();
        branding.logo.start(id).unwrap();

        assert_eq!(branding.check(), Some(GuardViolation::UploadsPending));
        branding.remove_logo();
        assert_eq!(branding.check(), None);
    }
}
