use serde::Serialize;
use serde_json::Value;

/// Structured quiz returned by the model, passed through to the client as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuizData(Value);

impl QuizData {
    /// Parses model output as quiz JSON. Accepts a bare JSON object or array,
    /// optionally wrapped in a markdown code fence.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(strip_code_fence(raw))?;
        match value {
            Value::Object(_) | Value::Array(_) => Ok(QuizData(value)),
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON object or array, got {}",
                other
            ))),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Result of interpreting quiz-mode output: either structured data or the raw
/// text to be shown as formatted markup instead.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizOutcome {
    Parsed(QuizData),
    FallbackText(String),
}

impl QuizOutcome {
    pub fn from_model_output(raw: &str) -> Self {
        match QuizData::parse(raw) {
            Ok(data) => QuizOutcome::Parsed(data),
            Err(e) => {
                log::warn!("Quiz output is not valid JSON, falling back to text: {}", e);
                QuizOutcome::FallbackText(raw.to_string())
            }
        }
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string (e.g. "json") on the opening fence line
    match body.find('\n') {
        Some(idx) => body[idx + 1..].trim(),
        None => body.trim(),
    }
}
