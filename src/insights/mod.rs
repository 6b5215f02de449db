//! Health-insight pipeline: aggregation, composition, and the external
//! assistant client.

pub mod aggregate;
pub mod assistant;
pub mod composer;

pub use aggregate::{analyze_sleep, analyze_trends, SleepSummary, TrendSummary};
pub use assistant::{AssistantClient, AssistantError, MockAssistant, OllamaAssistant};
pub use composer::{
    chat_reply, compose_trend_insights, symptom_advice, AdvicePayload, ChatMessage, ChatPayload,
    InsightPayload,
};
