use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::{SessionRegistry, SubmissionService};
use crate::domain::GenerationParams;

pub struct AppState<L>
where
    L: LlmClient,
{
    pub submission_service: Arc<SubmissionService<L>>,
    pub sessions: Arc<SessionRegistry>,
    /// Used for any sampling knob the form leaves out.
    pub generation_defaults: GenerationParams,
    pub max_upload_bytes: usize,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            submission_service: Arc::clone(&self.submission_service),
            sessions: Arc::clone(&self.sessions),
            generation_defaults: self.generation_defaults,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
