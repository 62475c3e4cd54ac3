pub mod analysis;
pub mod report;
pub mod requester;

pub use analysis::AnalysisService;
pub use report::ResultView;
pub use requester::AnalysisRequester;
