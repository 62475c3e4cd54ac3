// errors.rs
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

/// Сообщение, которое видит пользователь при любой неудаче запроса анализа
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze text";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Ошибка сети: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API вернул статус: {0}")]
    HttpStatus(StatusCode),

    #[error("Некорректный ответ API: {0}")]
    Decode(String),

    #[error("Текст для анализа пуст")]
    EmptyText,

    #[error("Предыдущий запрос анализа ещё выполняется")]
    RequestInFlight,

    #[error("Ответ устарел и был отброшен")]
    Superseded,

    #[error("Нет результата анализа")]
    NoResult,

    #[error("Ошибка выполнения задачи: {0}")]
    TaskError(#[from] JoinError),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Decode(err.to_string())
    }
}

/// Закрытый набор причин, по которым запрос к классификатору может провалиться
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    HttpStatus,
    Decode,
}

impl AnalysisError {
    /// Причина неудачи запроса; `None` для ошибок предусловий сессии.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            AnalysisError::Network(_) => Some(FailureKind::Network),
            AnalysisError::HttpStatus(_) => Some(FailureKind::HttpStatus),
            AnalysisError::Decode(_) => Some(FailureKind::Decode),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self.failure_kind() {
            Some(_) => ANALYSIS_FAILED_MESSAGE.to_string(),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
