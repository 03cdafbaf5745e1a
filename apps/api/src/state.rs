use std::sync::Arc;

use crate::advice::AdviceService;
use crate::quiz::QuestionBank;
use crate::reference::ReferenceStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<QuestionBank>,
    /// Catalogue or Postgres backend, chosen from config at startup.
    pub reference: Arc<dyn ReferenceStore>,
    pub advice: AdviceService,
}
