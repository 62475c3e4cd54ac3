//! Состояние сессии анализа: единственный источник правды для страницы.
//!
//! Все изменения проходят через [`SessionState::apply`] (и
//! [`SessionState::begin_submission`] для старта запроса), поэтому переходы
//! можно проверять без HTTP и без отрисовки.

pub mod history;
pub mod input;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::DEFAULT_PREVIEW_CHARS;
use crate::errors::{AnalysisError, Result};
use crate::models::{AnalysisOption, AnalysisOptions, AnalysisRequest, AnalysisResult};

pub use history::{HistoryEntry, HistoryId, HistoryLedger};
pub use input::TextStats;

/// Номер поколения запроса
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading { ticket: Ticket, request: AnalysisRequest },
    Succeeded(AnalysisResult),
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    TextChanged(String),
    OptionToggled(AnalysisOption),
    InputCleared,
    SubmissionSucceeded {
        ticket: Ticket,
        result: AnalysisResult,
        recorded_at: DateTime<Local>,
    },
    SubmissionFailed {
        ticket: Ticket,
        message: String,
    },
    HistoryEntryDeleted(HistoryId),
    HistoryCleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    Discarded,
}

/// Запрос, ушедший в работу
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub ticket: Ticket,
    pub request: AnalysisRequest,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    text: String,
    stats: TextStats,
    options: AnalysisOptions,
    phase: Phase,
    history: HistoryLedger,
    generation: Ticket,
    preview_chars: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(DEFAULT_PREVIEW_CHARS)
    }
}

impl SessionState {
    pub fn new(preview_chars: usize) -> Self {
        SessionState {
            text: String::new(),
            stats: TextStats::default(),
            options: AnalysisOptions::default(),
            phase: Phase::Idle,
            history: HistoryLedger::new(),
            generation: 0,
            preview_chars,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn stats(&self) -> TextStats {
        self.stats
    }

    pub fn options(&self) -> AnalysisOptions {
        self.options
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Старт нового цикла `Idle -> Loading`.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission> {
        if self.is_loading() {
            return Err(AnalysisError::RequestInFlight);
        }
        let request = AnalysisRequest::new(self.text.clone(), self.options)?;

        self.generation += 1;
        let ticket = self.generation;
        self.phase = Phase::Loading {
            ticket,
            request: request.clone(),
        };
        Ok(PendingSubmission { ticket, request })
    }

    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        match event {
            SessionEvent::TextChanged(raw) => {
                self.stats = TextStats::from_text(&raw);
                self.text = raw;
                Applied::Applied
            }
            SessionEvent::OptionToggled(option) => {
                self.options.toggle(option);
                Applied::Applied
            }
            SessionEvent::InputCleared => {
                self.text.clear();
                self.stats = TextStats::default();
                // Ответ на уже отправленный запрос больше не актуален
                self.generation += 1;
                if !self.is_loading() {
                    self.phase = Phase::Idle;
                }
                Applied::Applied
            }
            SessionEvent::SubmissionSucceeded {
                ticket,
                result,
                recorded_at,
            } => {
                let Some(request) = self.finish(ticket) else {
                    return Applied::Discarded;
                };
                self.history
                    .record(request.text(), result.clone(), recorded_at, self.preview_chars);
                self.phase = Phase::Succeeded(result);
                Applied::Applied
            }
            SessionEvent::SubmissionFailed { ticket, message } => {
                if self.finish(ticket).is_none() {
                    return Applied::Discarded;
                }
                self.phase = Phase::Failed(message);
                Applied::Applied
            }
            SessionEvent::HistoryEntryDeleted(id) => {
                if self.history.delete(id) {
                    Applied::Applied
                } else {
                    Applied::Discarded
                }
            }
            SessionEvent::HistoryCleared => {
                self.history.clear();
                Applied::Applied
            }
        }
    }

    /// Завершает загрузку для `ticket`. Возвращает запрос, если ответ
    /// относится к самому свежему поколению; иначе сессия просто
    /// возвращается в `Idle`.
    fn finish(&mut self, ticket: Ticket) -> Option<AnalysisRequest> {
        let request = match &self.phase {
            Phase::Loading { ticket: loading, request } if *loading == ticket => request.clone(),
            _ => return None,
        };
        self.phase = Phase::Idle;
        (ticket == self.generation).then_some(request)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            text: self.text.clone(),
            char_count: self.stats.char_count,
            word_count: self.stats.word_count,
            options: self.options,
            loading: self.is_loading(),
            result: self.result().cloned(),
            error: self.error().map(str::to_string),
            history: self.history.entries().to_vec(),
        }
    }
}

/// Снимок состояния для страницы
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub text: String,
    pub char_count: usize,
    pub word_count: usize,
    pub options: AnalysisOptions,
    pub loading: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    pub history: Vec<HistoryEntry>,
}
