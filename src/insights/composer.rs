//! Insight Composer - turns aggregator output into user-facing payloads.
//!
//! Two modes with very different contracts:
//! - Trend insights are derived purely from `TrendSummary` - deterministic
//!   and fully testable offline.
//! - Symptom advice and chat delegate a natural-language prompt to the
//!   external `AssistantClient` and return its response verbatim, wrapped
//!   with request metadata. Inputs pass through unmodified, output passes
//!   through unmodified.

use serde::{Deserialize, Serialize};

use crate::insights::aggregate::TrendSummary;
use crate::insights::assistant::{AssistantClient, AssistantError};
use crate::models::{SymptomSeverity, UserProfile};

/// Attached to every assistant-generated payload.
pub const HEALTH_DISCLAIMER: &str =
    "General wellness information, not a medical diagnosis. Always confirm with your healthcare team.";

const ADVICE_SYSTEM_PROMPT: &str =
    "You are a cautious health assistant. Give practical self-care advice for the reported \
     symptom and state clearly when professional care should be sought. Do not diagnose.";

const CHAT_SYSTEM_PROMPT: &str =
    "You are a personal health assistant answering questions about the user's own wellness. \
     Be concise, practical, and never diagnose.";

/// Composite insight payload for the insights endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InsightPayload {
    pub user_name: String,
    pub logs_analyzed: usize,
    pub analysis_period_days: u32,
    pub trends: TrendSummary,
    pub insights: String,
}

/// Advice payload for the symptom-advice endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AdvicePayload {
    pub symptom: String,
    pub severity: SymptomSeverity,
    pub advice: String,
    pub disclaimer: &'static str,
    pub generated_at: String,
}

/// One prior turn of an assistant conversation, passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat payload for the chat endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatPayload {
    pub reply: String,
    pub disclaimer: &'static str,
    pub generated_at: String,
}

/// Deterministic trend insights. No external calls.
pub fn compose_trend_insights(
    profile: &UserProfile,
    trends: TrendSummary,
    period_days: u32,
) -> InsightPayload {
    let insights = trend_narrative(&trends);
    InsightPayload {
        user_name: profile.full_name.clone(),
        logs_analyzed: trends.logs_analyzed,
        analysis_period_days: period_days,
        trends,
        insights,
    }
}

/// Free-form narrative built from the trend metrics alone.
fn trend_narrative(trends: &TrendSummary) -> String {
    let mut sentences = Vec::new();

    match &trends.sleep {
        Some(sleep) => {
            sentences.push(sleep.narrative());
            sentences.push(sleep.recommendation().to_string());
        }
        None => sentences.push("No sleep data was recorded in this period.".to_string()),
    }

    sentences.push(format!(
        "Average stress level was {:.1}/10 and anxiety {:.1}/10.",
        trends.average_stress, trends.average_anxiety
    ));

    if trends.symptom_days.is_empty() {
        sentences.push("No symptoms were reported.".to_string());
    } else {
        // HashMap iteration order is arbitrary; pick the max deterministically.
        if let Some((name, days)) = trends
            .symptom_days
            .iter()
            .max_by_key(|&(&name, &days)| (days, std::cmp::Reverse(name)))
        {
            sentences.push(format!(
                "Most frequent symptom: {} on {} of {} days.",
                name, days, trends.logs_analyzed
            ));
        }
        if trends.notable_symptom_days > 0 {
            sentences.push(format!(
                "{} day(s) had moderate or severe symptoms.",
                trends.notable_symptom_days
            ));
        }
    }

    sentences.push(format!(
        "Your most common mood was \"{}\" ({} day(s)).",
        trends.dominant_mood.as_str(),
        trends.dominant_mood_days
    ));

    sentences.join(" ")
}

/// Symptom advice - delegated verbatim to the assistant.
pub fn symptom_advice(
    assistant: &dyn AssistantClient,
    symptom: &str,
    severity: SymptomSeverity,
) -> Result<AdvicePayload, AssistantError> {
    let prompt = format!(
        "A user reports the following symptom: {} (severity: {}). \
         Provide practical self-care advice and say when to seek professional care.",
        symptom,
        severity.as_str()
    );
    let advice = assistant.generate(&prompt, ADVICE_SYSTEM_PROMPT)?;

    Ok(AdvicePayload {
        symptom: symptom.to_string(),
        severity,
        advice,
        disclaimer: HEALTH_DISCLAIMER,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Chat turn - prior history and the new message are embedded verbatim.
pub fn chat_reply(
    assistant: &dyn AssistantClient,
    profile: &UserProfile,
    message: &str,
    history: &[ChatMessage],
) -> Result<ChatPayload, AssistantError> {
    let mut prompt = format!("The user's name is {}.\n", profile.full_name);
    for turn in history {
        prompt.push_str(&format!("{}: {}\n", turn.role, turn.content));
    }
    prompt.push_str(&format!("user: {message}\nassistant:"));

    let reply = assistant.generate(&prompt, CHAT_SYSTEM_PROMPT)?;

    Ok(ChatPayload {
        reply,
        disclaimer: HEALTH_DISCLAIMER,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::aggregate::analyze_trends;
    use crate::insights::assistant::MockAssistant;
    use crate::models::HealthLog;
    use chrono::NaiveDate;

    fn profile() -> UserProfile {
        UserProfile {
            id: "user-1".into(),
            full_name: "Jordan Reyes".into(),
            email: "jordan@example.com".into(),
            phone: None,
            blood_group: None,
            date_of_birth: None,
            chronic_conditions: Vec::new(),
            allergies: Vec::new(),
            api_token_hash: None,
        }
    }

    fn log_on(day: u32) -> HealthLog {
        HealthLog::new("user-1", NaiveDate::from_ymd_opt(2026, 3, day).unwrap())
    }

    #[test]
    fn trend_insights_are_deterministic() {
        let mut a = log_on(1);
        a.sleep_hours = Some(6.0);
        a.has_headache = true;
        let mut b = log_on(2);
        b.sleep_hours = Some(6.5);

        let trends = analyze_trends(&[a.clone(), b.clone()]).unwrap();
        let first = compose_trend_insights(&profile(), trends, 30);
        let trends = analyze_trends(&[a, b]).unwrap();
        let second = compose_trend_insights(&profile(), trends, 30);

        assert_eq!(first.insights, second.insights);
        assert_eq!(first.user_name, "Jordan Reyes");
        assert_eq!(first.logs_analyzed, 2);
        assert_eq!(first.analysis_period_days, 30);
    }

    #[test]
    fn narrative_mentions_short_sleep_advice() {
        let mut a = log_on(1);
        a.sleep_hours = Some(5.0);
        let trends = analyze_trends(std::slice::from_ref(&a)).unwrap();
        let payload = compose_trend_insights(&profile(), trends, 7);
        assert!(payload.insights.contains("7-9 hours"));
    }

    #[test]
    fn narrative_reports_missing_sleep_data() {
        let trends = analyze_trends(&[log_on(1)]).unwrap();
        let payload = compose_trend_insights(&profile(), trends, 7);
        assert!(payload.insights.contains("No sleep data"));
        assert!(payload.insights.contains("No symptoms were reported."));
    }

    #[test]
    fn narrative_names_most_frequent_symptom() {
        let mut a = log_on(1);
        a.has_cough = true;
        let mut b = log_on(2);
        b.has_cough = true;
        b.has_fever = true;

        let trends = analyze_trends(&[a, b]).unwrap();
        let payload = compose_trend_insights(&profile(), trends, 30);
        assert!(payload.insights.contains("cough on 2 of 2 days"));
    }

    #[test]
    fn symptom_advice_passes_through_unmodified() {
        let mock = MockAssistant::new("Rest, fluids, and see a doctor if it persists.");
        let payload = symptom_advice(&mock, "headache", SymptomSeverity::Moderate).unwrap();

        // Output verbatim
        assert_eq!(payload.advice, "Rest, fluids, and see a doctor if it persists.");
        assert_eq!(payload.symptom, "headache");
        assert_eq!(payload.severity, SymptomSeverity::Moderate);
        assert_eq!(payload.disclaimer, HEALTH_DISCLAIMER);

        // Inputs reached the assistant unmodified
        let (prompt, _) = mock.last_prompt().unwrap();
        assert!(prompt.contains("headache"));
        assert!(prompt.contains("severity: moderate"));
    }

    #[test]
    fn chat_embeds_history_verbatim() {
        let mock = MockAssistant::new("You mentioned that yesterday.");
        let history = vec![
            ChatMessage { role: "user".into(), content: "I slept badly".into() },
            ChatMessage { role: "assistant".into(), content: "Try a regular bedtime".into() },
        ];
        let payload = chat_reply(&mock, &profile(), "Why am I tired?", &history).unwrap();
        assert_eq!(payload.reply, "You mentioned that yesterday.");

        let (prompt, _) = mock.last_prompt().unwrap();
        assert!(prompt.contains("Jordan Reyes"));
        assert!(prompt.contains("user: I slept badly"));
        assert!(prompt.contains("assistant: Try a regular bedtime"));
        assert!(prompt.contains("user: Why am I tired?"));
    }

    #[test]
    fn assistant_failure_propagates() {
        let mock = MockAssistant::unavailable();
        assert!(symptom_advice(&mock, "fever", SymptomSeverity::Mild).is_err());
        assert!(chat_reply(&mock, &profile(), "hello", &[]).is_err());
    }
}
