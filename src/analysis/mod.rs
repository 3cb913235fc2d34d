pub mod client;
pub mod gateway;
pub mod prompts;
pub mod service;

pub use client::{AnalysisError, ChatEndpoint, ChatRequest};
pub use gateway::MqttChatGateway;
pub use service::{resolve_display_text, spawn_worker, AnalysisKind, AnalysisOutcome, AnalysisTask};
