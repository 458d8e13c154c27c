use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Passed => "Passed",
            Verdict::Failed => "Failed",
        }
    }
}

/// Whether the run executed at all. Per-node failures never make a run fail.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    #[serde(rename = "status")]
    pub severity: Severity,
}

impl LogEntry {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Per-node outcome. Wire keys match the web form (`asi`, `sid`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationRow {
    #[serde(rename = "asi")]
    pub domain: String,
    #[serde(rename = "sid")]
    pub seller_id: String,
    #[serde(rename = "name")]
    pub registry_name: String,
    #[serde(rename = "domain")]
    pub registry_domain: String,
    #[serde(rename = "ads_txt")]
    pub disclosure_verdict: Verdict,
    #[serde(rename = "sellers_json")]
    pub registry_verdict: Verdict,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub run_id: String,
    pub status: RunStatus,
    pub logs: Vec<LogEntry>,
    pub table: Vec<ValidationRow>,
}

impl ValidationReport {
    pub fn rejected(run_id: String, entry: LogEntry) -> Self {
        Self {
            run_id,
            status: RunStatus::Failed,
            logs: vec![entry],
            table: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.logs.iter().filter(|l| l.is_error()).count()
    }
}
