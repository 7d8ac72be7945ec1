//! Responder — classifies a message and renders the reply.
//! Stateless: the knowledge base and rule table are fixed at construction, so one
//! `Arc<Responder>` serves every request without locking.

use std::sync::Arc;

use crate::chat::{ChatOutcome, ChatRequest, ChatResponse};
use crate::error::{WenjianError, WenjianResult};
use crate::knowledge::KnowledgeBase;
use crate::rules::{Category, RuleTable};
use crate::templates::{
    AUTHENTICATION_GUIDE, FALLBACK_REPLY, GREETING_REPLY, THANKS_REPLY, TIP_PREFIX,
};

/// Characters of the reply kept in the log line.
pub const DEFAULT_REPLY_LOG_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct Responder {
    knowledge: Arc<KnowledgeBase>,
    rules: RuleTable,
    reply_log_chars: usize,
}

impl Responder {
    /// Fails when a rule targets a knowledge category the base does not hold.
    /// Knowledge no rule can reach is only logged.
    pub fn new(knowledge: Arc<KnowledgeBase>, rules: RuleTable) -> WenjianResult<Self> {
        let audit = rules.audit(&knowledge);
        if let Some(missing) = audit.missing.first() {
            return Err(WenjianError::CategoryNotFound(missing.clone()));
        }
        for name in &audit.unreachable {
            tracing::warn!(
                "[WENJIAN KNOWLEDGE] Category '{}' is not reachable by any rule.",
                name
            );
        }
        Ok(Self {
            knowledge,
            rules,
            reply_log_chars: DEFAULT_REPLY_LOG_CHARS,
        })
    }

    /// Skips the rule/knowledge cross-check. A missing rule target then fails
    /// per request, as an internal error outcome.
    pub fn unchecked(knowledge: Arc<KnowledgeBase>, rules: RuleTable) -> Self {
        Self {
            knowledge,
            rules,
            reply_log_chars: DEFAULT_REPLY_LOG_CHARS,
        }
    }

    /// Built-in knowledge and rules; these are consistent with each other.
    pub fn builtin() -> Self {
        Self::unchecked(Arc::new(KnowledgeBase::builtin()), RuleTable::builtin())
    }

    pub fn with_reply_log_chars(mut self, chars: usize) -> Self {
        self.reply_log_chars = chars;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Classify `message` and build the reply. Never fails: input and internal
    /// errors come back as `Status::Error` outcomes with a fixed reply.
    /// `user_id` is only logged.
    pub fn respond(&self, message: &str, user_id: &str) -> ChatOutcome {
        let message = message.trim();
        if message.is_empty() {
            tracing::warn!("[WENJIAN CHAT] Empty message from user {}", user_id);
            return ChatOutcome::failure(&WenjianError::EmptyMessage);
        }

        tracing::info!("[WENJIAN CHAT] User {} asked: {}", user_id, message);

        match self.render(message) {
            Ok((reply, category)) => {
                tracing::info!(
                    category = category.map(|c| c.as_str()).unwrap_or("fallback"),
                    "[WENJIAN CHAT] Reply to user {}: {}...",
                    user_id,
                    truncate(&reply, self.reply_log_chars)
                );
                ChatOutcome::success(reply, category)
            }
            Err(e) => {
                tracing::error!(
                    "[WENJIAN CHAT] Failed to answer user {} ({}): {}",
                    user_id,
                    truncate(message, self.reply_log_chars),
                    e
                );
                ChatOutcome::failure(&e)
            }
        }
    }

    /// `respond` plus the transport envelope for the request's user.
    pub fn handle(&self, request: &ChatRequest) -> (ChatOutcome, ChatResponse) {
        let outcome = self.respond(&request.message, &request.user_id);
        let response = ChatResponse::from_outcome(&outcome, &request.user_id);
        (outcome, response)
    }

    fn render(&self, message: &str) -> WenjianResult<(String, Option<Category>)> {
        let category = self.rules.classify(message);
        let reply = match category {
            Some(
                c @ (Category::Ceramics | Category::Bronze | Category::Painting | Category::Jade),
            ) => self.render_knowledge(c)?,
            Some(Category::Authentication) => AUTHENTICATION_GUIDE.to_string(),
            Some(Category::Greeting) => GREETING_REPLY.to_string(),
            Some(Category::Thanks) => THANKS_REPLY.to_string(),
            None => FALLBACK_REPLY.to_string(),
        };
        Ok((reply, category))
    }

    fn render_knowledge(&self, category: Category) -> WenjianResult<String> {
        let missing = || WenjianError::CategoryNotFound(category.as_str().to_string());
        let name = category.knowledge_name().ok_or_else(missing)?;
        let header = category.header().ok_or_else(missing)?;
        let tip = category.tip().ok_or_else(missing)?;
        let entries = self.knowledge.lookup(name)?;

        let mut reply = format!("{}\n\n", header);
        for entry in entries {
            reply.push_str(&format!("**{}**: {}\n", entry.label, entry.text));
        }
        reply.push('\n');
        reply.push_str(TIP_PREFIX);
        reply.push_str(tip);
        Ok(reply)
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::builtin()
    }
}

/// First `max` chars, on char boundaries.
fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
