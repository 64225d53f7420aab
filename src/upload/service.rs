//! Upload service abstraction

use crate::clock::Clock;
use crate::error::Result;
use crate::types::FileHandle;
use crate::upload::RemoteRef;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Stores a file remotely and returns where it went
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Upload one file
    async fn upload(&self, file: &FileHandle) -> Result<RemoteRef>;
}

/// Image host stand-in
///
/// Waits a fixed delay on the injected clock, then always succeeds with a
/// `mock://` reference.
pub struct SimulatedUploadService {
    clock: Arc<dyn Clock>,
    delay: Duration,
}

impl SimulatedUploadService {
    /// Create a service that resolves after `delay`
    pub fn new(clock: Arc<dyn Clock>, delay: Duration) -> Self {
        Self { clock, delay }
    }
}

#[async_trait]
impl UploadService for SimulatedUploadService {
    async fn upload(&self, file: &FileHandle) -> Result<RemoteRef> {
        self.clock.sleep(self.delay).await;

        let suffix: String = {
            let mut rng = rand::thread_rng();
            (0..10)
                .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
                .collect()
        };
        let public_id = format!("mock_{}_{suffix}", self.clock.now().timestamp_millis());

        Ok(RemoteRef {
            url: format!("mock://uploads/{public_id}/{}", file.name),
            public_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::InstantClock;

    #[tokio::test]
    async fn test_simulated_upload_waits_then_resolves() {
        let clock = Arc::new(InstantClock::new());
        let service = SimulatedUploadService::new(clock.clone(), Duration::from_millis(1000));

        let remote = service
            .upload(&FileHandle::new("shoe.jpg", 2048))
            .await
            .unwrap();

        assert!(remote.public_id.starts_with("mock_"));
        assert!(remote.url.ends_with("/shoe.jpg"));
        assert_eq!(clock.slept(), vec![Duration::from_millis(1000)]);
    }

    #[tokio::test]
    async fn test_public_ids_differ() {
        let service = SimulatedUploadService::new(Arc::new(InstantClock::new()), Duration::ZERO);
        let file = FileHandle::new("a.jpg", 1);
        let a = service.upload(&file).await.unwrap();
        let b = service.upload(&file).await.unwrap();
        assert_ne!(a.public_id, b.public_id);
    }
}
