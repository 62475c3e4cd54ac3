use std::sync::Arc;
use tokio::sync::Mutex;
use crate::models::{AnalysisOption, AnalysisOptions, AnalysisResult};
use crate::errors::Result;
use crate::state::{
    Applied, HistoryEntry, HistoryId, PendingSubmission, SessionEvent, SessionSnapshot,
    SessionState, TextStats,
};

/// Общее состояние сессии; события применяются строго по одному
#[derive(Clone)]
pub struct SessionHolder {
    state: Arc<Mutex<SessionState>>,
}

impl SessionHolder {
    pub fn new(preview_chars: usize) -> Self {
        SessionHolder {
            state: Arc::new(Mutex::new(SessionState::new(preview_chars))),
        }
    }

    pub async fn dispatch(&self, event: SessionEvent) -> Result<Applied> {
        let mut state = self.state.lock().await;
        Ok(state.apply(event))
    }

    pub async fn set_text(&self, raw: String) -> Result<TextStats> {
        let mut state = self.state.lock().await;
        state.apply(SessionEvent::TextChanged(raw));
        Ok(state.stats())
    }

    pub async fn toggle(&self, option: AnalysisOption) -> Result<AnalysisOptions> {
        let mut state = self.state.lock().await;
        state.apply(SessionEvent::OptionToggled(option));
        Ok(state.options())
    }

    pub async fn begin_submission(&self) -> Result<PendingSubmission> {
        let mut state = self.state.lock().await;
        state.begin_submission()
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let state = self.state.lock().await;
        Ok(state.snapshot())
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let state = self.state.lock().await;
        Ok(state.history().entries().to_vec())
    }

    pub async fn history_entry(&self, id: HistoryId) -> Result<Option<HistoryEntry>> {
        let state = self.state.lock().await;
        Ok(state.history().get(id).cloned())
    }

    pub async fn current_result(&self) -> Result<Option<AnalysisResult>> {
        let state = self.state.lock().await;
        Ok(state.result().cloned())
    }

    pub async fn is_loading(&self) -> Result<bool> {
        let state = self.state.lock().await;
        Ok(state.is_loading())
    }
}
