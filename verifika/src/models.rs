use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{AnalysisError, Result};

/// Переключатели дополнительных анализов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOption {
    Sentiment,
    PoliticalBias,
    Clickbait,
}

impl AnalysisOption {
    pub const ALL: [AnalysisOption; 3] = [
        AnalysisOption::Sentiment,
        AnalysisOption::PoliticalBias,
        AnalysisOption::Clickbait,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisOption::Sentiment => "sentiment",
            AnalysisOption::PoliticalBias => "political_bias",
            AnalysisOption::Clickbait => "clickbait",
        }
    }
}

impl fmt::Display for AnalysisOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AnalysisOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| format!("Unknown analysis option: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub sentiment: bool,
    pub political_bias: bool,
    pub clickbait: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            sentiment: true,
            political_bias: true,
            clickbait: true,
        }
    }
}

impl AnalysisOptions {
    pub fn get(&self, option: AnalysisOption) -> bool {
        match option {
            AnalysisOption::Sentiment => self.sentiment,
            AnalysisOption::PoliticalBias => self.political_bias,
            AnalysisOption::Clickbait => self.clickbait,
        }
    }

    pub fn toggle(&mut self, option: AnalysisOption) {
        let flag = match option {
            AnalysisOption::Sentiment => &mut self.sentiment,
            AnalysisOption::PoliticalBias => &mut self.political_bias,
            AnalysisOption::Clickbait => &mut self.clickbait,
        };
        *flag = !*flag;
    }
}

/// Тело запроса к классификатору
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    text: String,
    analysis_options: AnalysisOptions,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, options: AnalysisOptions) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }
        Ok(AnalysisRequest {
            text,
            analysis_options: options,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> AnalysisOptions {
        self.analysis_options
    }
}

/// Ответ классификатора: `{ "data": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub data: Prediction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    pub confidence: f64, // 0.0 to 100.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_analysis: Option<AdditionalAnalysis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_bias: Option<PoliticalBiasAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickbait: Option<ClickbaitAnalysis>,
}

// Поля вложенных блоков могут отсутствовать: блок показывается частично,
// основной прогноз при этом сохраняется
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>, // "positive", "negative", "neutral"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoliticalBiasAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias: Option<String>, // "left-leaning", "right-leaning", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickbaitAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_clickbait: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clickbait_score: Option<f64>,
    #[serde(default)]
    pub clickbait_matches: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Fake,
    Real,
    Unknown,
}

impl AnalysisResult {
    pub fn prediction(&self) -> &str {
        &self.data.prediction
    }

    pub fn confidence(&self) -> f64 {
        self.data.confidence
    }

    pub fn verdict(&self) -> Verdict {
        match self.data.prediction.as_str() {
            "Fake News" => Verdict::Fake,
            "Real News" => Verdict::Real,
            _ => Verdict::Unknown,
        }
    }

    /// Проверка данных, пришедших от внешнего сервиса
    pub fn validate(&self) -> Result<()> {
        let confidence = self.data.confidence;
        if !confidence.is_finite() || !(0.0..=100.0).contains(&confidence) {
            return Err(AnalysisError::Decode(format!(
                "confidence out of range: {}",
                confidence
            )));
        }
        if self.data.prediction.trim().is_empty() {
            return Err(AnalysisError::Decode("empty prediction label".to_string()));
        }
        Ok(())
    }
}
