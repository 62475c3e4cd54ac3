use serde::Serialize;

use crate::models::{
    AnalysisResult, ClickbaitAnalysis, PoliticalBiasAnalysis, SentimentAnalysis, Verdict,
};

/// Текст для буфера обмена
pub fn clipboard_text(result: &AnalysisResult) -> String {
    format!(
        "Analysis Result:\n{}\nConfidence: {:.2}%",
        result.prediction(),
        result.confidence()
    )
}

fn percent(score: Option<f64>) -> Option<String> {
    score
        .filter(|s| s.is_finite())
        .map(|s| format!("{:.1}%", s * 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lean {
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentView {
    pub label: Option<String>,
    pub tone: Tone,
    pub score: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasView {
    pub label: Option<String>,
    pub lean: Lean,
    pub score: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickbaitView {
    pub detected: Option<bool>,
    pub headline: Option<&'static str>,
    pub score: Option<String>,
    pub patterns: Option<String>,
}

/// То, что страница показывает для результата анализа
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub verdict: Verdict,
    pub prediction: String,
    pub confidence: String,
    pub sentiment: Option<SentimentView>,
    pub political_bias: Option<BiasView>,
    pub clickbait: Option<ClickbaitView>,
}

impl From<&SentimentAnalysis> for SentimentView {
    fn from(sentiment: &SentimentAnalysis) -> Self {
        let tone = match sentiment.sentiment.as_deref() {
            Some("positive") => Tone::Positive,
            Some("negative") => Tone::Negative,
            _ => Tone::Neutral,
        };
        SentimentView {
            label: sentiment.sentiment.clone(),
            tone,
            score: percent(sentiment.compound_score),
        }
    }
}

impl From<&PoliticalBiasAnalysis> for BiasView {
    fn from(bias: &PoliticalBiasAnalysis) -> Self {
        let lean = match bias.bias.as_deref() {
            Some("left-leaning") => Lean::Left,
            Some("right-leaning") => Lean::Right,
            _ => Lean::Other,
        };
        BiasView {
            label: bias.bias.clone(),
            lean,
            score: percent(bias.bias_score),
        }
    }
}

impl From<&ClickbaitAnalysis> for ClickbaitView {
    fn from(clickbait: &ClickbaitAnalysis) -> Self {
        ClickbaitView {
            detected: clickbait.is_clickbait,
            headline: clickbait.is_clickbait.map(|detected| {
                if detected {
                    "Clickbait Detected"
                } else {
                    "No Clickbait Detected"
                }
            }),
            score: percent(clickbait.clickbait_score),
            patterns: (!clickbait.clickbait_matches.is_empty())
                .then(|| clickbait.clickbait_matches.join(", ")),
        }
    }
}

impl From<&AnalysisResult> for ResultView {
    fn from(result: &AnalysisResult) -> Self {
        let additional = result.data.additional_analysis.as_ref();
        ResultView {
            verdict: result.verdict(),
            prediction: result.prediction().to_string(),
            confidence: format!("{:.1}", result.confidence()),
            sentiment: additional
                .and_then(|a| a.sentiment.as_ref())
                .map(SentimentView::from),
            political_bias: additional
                .and_then(|a| a.political_bias.as_ref())
                .map(BiasView::from),
            clickbait: additional
                .and_then(|a| a.clickbait.as_ref())
                .map(ClickbaitView::from),
        }
    }
}
