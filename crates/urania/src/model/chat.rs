use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Subject,
    Guide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Result<Self, InputError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InputError::EmptyMessage);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            role,
            text,
            timestamp: Utc::now(),
        })
    }
}

/// Optional facts about the asker, folded into the guide's system prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuidanceContext {
    pub subject_name: Option<String>,
    /// Free text such as "born 1990-04-12 06:30 in Mumbai, Leo lagna".
    pub birth_summary: Option<String>,
}

impl GuidanceContext {
    pub fn is_empty(&self) -> bool {
        self.subject_name.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.birth_summary.as_deref().map_or(true, |s| s.trim().is_empty())
    }
}
