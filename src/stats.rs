use serde::{Deserialize, Serialize};

/// Summary of one generation's fitness values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation, `sqrt(|mean(x^2) - mean(x)^2|)`.
    pub std: f64,
}

impl Statistics {
    /// Returns `None` for an empty sequence. A single NaN makes every field NaN.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let (min, max) = if values.iter().any(|v| v.is_nan()) {
            (f64::NAN, f64::NAN)
        } else {
            (
                values.iter().copied().fold(f64::INFINITY, f64::min),
                values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        };
        let mean = values.iter().sum::<f64>() / n;
        let sum2: f64 = values.iter().map(|x| x * x).sum();
        let std = (sum2 / n - mean * mean).abs().sqrt();

        Some(Self {
            min,
            max,
            mean,
            std,
        })
    }
}

/// One row of the logbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    /// Evaluator calls spent in this generation.
    pub evaluations: usize,
    pub stats: Option<Statistics>,
}

/// Per-generation history of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Logbook {
    records: Vec<GenerationRecord>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenerationRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn total_evaluations(&self) -> usize {
        self.records.iter().map(|r| r.evaluations).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
