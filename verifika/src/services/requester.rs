use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{AnalysisError, Result};
use crate::models::{AnalysisRequest, AnalysisResult};

/// Клиент внешнего классификатора. Одновременно выполняется не больше
/// одного запроса.
#[derive(Clone)]
pub struct AnalysisRequester {
    client: Client,
    endpoint: String,
    in_flight: Arc<AtomicBool>,
}

struct FlightGuard<'a>(&'a AtomicBool);

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AnalysisError::RequestInFlight)?;
        Ok(FlightGuard(flag))
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl AnalysisRequester {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout())
            .build()?;
        Ok(AnalysisRequester {
            client,
            endpoint: config.api_url.clone(),
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let _guard = FlightGuard::acquire(&self.in_flight)?;

        tracing::info!(
            chars = request.text().chars().count(),
            options = ?request.options(),
            "Отправляем текст на анализ"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Классификатор недоступен: {}", e);
                AnalysisError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Классификатор вернул ошибку: {}", status);
            return Err(AnalysisError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        let result: AnalysisResult = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Некорректный формат ответа классификатора: {}", e);
            AnalysisError::from(e)
        })?;
        result.validate()?;

        tracing::debug!(
            prediction = %result.prediction(),
            confidence = result.confidence(),
            "Классификатор вернул результат"
        );
        Ok(result)
    }
}
