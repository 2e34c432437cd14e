use std::fmt;

/// What kind of study material a request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessingMode {
    Quiz,
    Notes,
    Teach,
    Analyze,
}

impl ProcessingMode {
    /// Maps the client's `option` field onto a mode. Anything unrecognised is
    /// treated as `Analyze`.
    pub fn from_option(option: &str) -> Self {
        match option.trim().to_ascii_lowercase().as_str() {
            "quiz" => ProcessingMode::Quiz,
            "notes" => ProcessingMode::Notes,
            "teach" => ProcessingMode::Teach,
            _ => ProcessingMode::Analyze,
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingMode::Quiz => write!(f, "quiz"),
            ProcessingMode::Notes => write!(f, "notes"),
            ProcessingMode::Teach => write!(f, "teach"),
            ProcessingMode::Analyze => write!(f, "analyze"),
        }
    }
}
