use chrono::Local;

use crate::errors::{AnalysisError, Result};
use crate::holders::SessionHolder;
use crate::models::{AnalysisOption, AnalysisOptions, AnalysisResult};
use crate::services::report::{self, ResultView};
use crate::services::requester::AnalysisRequester;
use crate::state::{
    Applied, HistoryEntry, HistoryId, PendingSubmission, SessionEvent, SessionSnapshot, TextStats,
};

#[derive(Clone)]
pub struct AnalysisService {
    session: SessionHolder,
    requester: AnalysisRequester,
}

impl AnalysisService {
    pub fn new(session: SessionHolder, requester: AnalysisRequester) -> Self {
        AnalysisService { session, requester }
    }

    pub async fn set_text(&self, raw: String) -> Result<TextStats> {
        self.session.set_text(raw).await
    }

    pub async fn toggle_option(&self, option: AnalysisOption) -> Result<AnalysisOptions> {
        let options = self.session.toggle(option).await?;
        tracing::debug!("Опция {} = {}", option, options.get(option));
        Ok(options)
    }

    pub async fn clear_input(&self) -> Result<()> {
        self.session.dispatch(SessionEvent::InputCleared).await?;
        Ok(())
    }

    /// Полный цикл `Loading -> {Success, Failure} -> Idle` для текущего текста.
    ///
    /// Запрос и запись результата выполняются в отдельной задаче: если
    /// вызывающий отвалится (клиент закрыл соединение), цикл всё равно
    /// завершится и сессия вернётся в `Idle`.
    pub async fn submit(&self) -> Result<AnalysisResult> {
        let pending = self.session.begin_submission().await?;
        let service = self.clone();
        let task = tokio::spawn(async move { service.run_submission(pending).await });
        task.await?
    }

    async fn run_submission(&self, pending: PendingSubmission) -> Result<AnalysisResult> {
        let ticket = pending.ticket;

        match self.requester.analyze(&pending.request).await {
            Ok(result) => {
                let applied = self
                    .session
                    .dispatch(SessionEvent::SubmissionSucceeded {
                        ticket,
                        result: result.clone(),
                        recorded_at: Local::now(),
                    })
                    .await?;
                if applied == Applied::Discarded {
                    tracing::info!("Ответ на запрос #{} устарел, отбрасываем", ticket);
                    return Err(AnalysisError::Superseded);
                }
                tracing::info!(
                    "Анализ #{} завершен: {} ({:.1}%)",
                    ticket,
                    result.prediction(),
                    result.confidence()
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Ошибка анализа #{}: {}", ticket, e);
                let applied = self
                    .session
                    .dispatch(SessionEvent::SubmissionFailed {
                        ticket,
                        message: e.user_message(),
                    })
                    .await?;
                if applied == Applied::Discarded {
                    return Err(AnalysisError::Superseded);
                }
                Err(e)
            }
        }
    }

    pub async fn delete_entry(&self, id: HistoryId) -> Result<bool> {
        let applied = self
            .session
            .dispatch(SessionEvent::HistoryEntryDeleted(id))
            .await?;
        Ok(applied == Applied::Applied)
    }

    pub async fn clear_history(&self) -> Result<()> {
        self.session.dispatch(SessionEvent::HistoryCleared).await?;
        Ok(())
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.session.snapshot().await
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.session.history().await
    }

    pub async fn history_entry(&self, id: HistoryId) -> Result<Option<HistoryEntry>> {
        self.session.history_entry(id).await
    }

    async fn current_result(&self) -> Result<AnalysisResult> {
        self.session
            .current_result()
            .await?
            .ok_or(AnalysisError::NoResult)
    }

    pub async fn copy_result(&self) -> Result<String> {
        let result = self.current_result().await?;
        Ok(report::clipboard_text(&result))
    }

    pub async fn result_view(&self) -> Result<ResultView> {
        let result = self.current_result().await?;
        Ok(ResultView::from(&result))
    }
}
