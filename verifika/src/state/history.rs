use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::AnalysisResult;

pub const PREVIEW_ELLIPSIS: &str = "...";
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Идентификатор записи: время создания в миллисекундах, строго возрастает
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryId(pub i64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub preview: String,
    pub result: AnalysisResult,
    pub timestamp: String,
}

impl HistoryEntry {
    pub fn summary(&self) -> String {
        format!("{} ({:.1}%)", self.result.prediction(), self.result.confidence())
    }
}

pub fn make_preview(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str(PREVIEW_ELLIPSIS);
    preview
}

/// Журнал анализов текущей сессии, новые записи в начале
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    last_id: Option<HistoryId>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        text: &str,
        result: AnalysisResult,
        recorded_at: DateTime<Local>,
        preview_chars: usize,
    ) -> HistoryId {
        let id = self.next_id(recorded_at.timestamp_millis());
        self.entries.insert(
            0,
            HistoryEntry {
                id,
                preview: make_preview(text, preview_chars),
                result,
                timestamp: recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            },
        );
        id
    }

    fn next_id(&mut self, now_millis: i64) -> HistoryId {
        let id = match self.last_id {
            Some(HistoryId(last)) if last >= now_millis => HistoryId(last + 1),
            _ => HistoryId(now_millis),
        };
        self.last_id = Some(id);
        id
    }

    pub fn delete(&mut self, id: HistoryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: HistoryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
