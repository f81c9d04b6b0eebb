use serde::{Deserialize, Serialize};

use crate::aggregator::Aggregator;
use crate::error::InputError;
use crate::model::{ChatTurn, GuidanceContext, Role};

/// Caller-owned conversation log. Nothing here is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    context: Option<GuidanceContext>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: GuidanceContext) -> Self {
        Self {
            turns: Vec::new(),
            context: Some(context),
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn context(&self) -> Option<&GuidanceContext> {
        self.context.as_ref()
    }

    /// Record the subject's message and the guide's answer, returning the answer.
    /// A blank message records nothing.
    pub async fn send(&mut self, aggregator: &Aggregator, text: &str) -> Result<ChatTurn, InputError> {
        let asked = ChatTurn::new(Role::Subject, text.trim())?;
        let reply = aggregator
            .send_guidance_message(&asked.text, self.context.as_ref())
            .await?;
        let answered = ChatTurn::new(Role::Guide, reply)?;
        self.turns.push(asked);
        self.turns.push(answered.clone());
        Ok(answered)
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
