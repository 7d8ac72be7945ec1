//! Wenjian (文鉴通) — Core library.
//! Antique authentication Q&A: keyword classification over a read-only
//! knowledge base, rendered into fixed-format replies.

pub mod chat;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod responder;
pub mod rules;
pub mod templates;

pub use chat::{ChatOutcome, ChatRequest, ChatResponse, Status, ANONYMOUS_USER};
pub use config::GatewayConfig;
pub use error::{ErrorKind, WenjianError, WenjianResult};
pub use knowledge::{KnowledgeBase, KnowledgeCategory, KnowledgeEntry};
pub use responder::Responder;
pub use rules::{normalize, Category, ClassificationRule, RuleAudit, RuleTable};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
