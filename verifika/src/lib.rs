pub mod config;
pub mod errors;
pub mod holders;
pub mod models;
pub mod routers;
pub mod services;
pub mod state;

pub use config::AppConfig;
pub use errors::{AnalysisError, FailureKind, Result};
pub use holders::SessionHolder;
pub use models::{
    AdditionalAnalysis, AnalysisOption, AnalysisOptions, AnalysisRequest, AnalysisResult,
    ClickbaitAnalysis, PoliticalBiasAnalysis, Prediction, SentimentAnalysis, Verdict,
};
pub use services::{AnalysisRequester, AnalysisService, ResultView};
pub use state::{Applied, HistoryEntry, HistoryId, Phase, SessionEvent, SessionSnapshot, SessionState, TextStats};
pub use config::load_config;

#[derive(Clone)]
pub struct AppState {
    pub analysis: AnalysisService,
}
