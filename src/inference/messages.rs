use crate::models::Condition;

/// System instruction for every completion call.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful medical assistant providing concise, \
    accurate information. Always clarify that you're not a doctor and serious symptoms \
    require medical attention.";

/// Message template builder for consistent, calm patient-facing framing.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Templated assessment for the top-ranked condition, with a
    /// severity-conditioned closing sentence.
    pub fn condition_summary(condition: &Condition) -> String {
        let mut body = format!(
            "Based on the symptoms you've described, you may have {}. {} Recommendations: {}. ",
            condition.name,
            condition.description,
            condition.recommendations.join(". "),
        );

        if condition.severity.needs_professional_urging() {
            body.push_str(&format!(
                "Please note that this condition is of {} severity. If symptoms worsen or \
                 persist, please consult a healthcare professional.",
                condition.severity.as_str(),
            ));
        } else {
            body.push_str(
                "This condition is generally of low severity, but if symptoms persist for \
                 more than a few days, consider seeking medical advice.",
            );
        }

        body
    }

    /// Symptoms were detected but nothing cleared the ranking threshold.
    pub fn symptoms_only(symptom_names: &[&str]) -> String {
        format!(
            "I've identified that you're experiencing the following symptoms: {}. Without \
             more information, I can't determine a specific condition. These symptoms could \
             be related to several different issues. I recommend monitoring your symptoms \
             and consulting with a healthcare professional if they worsen or persist. Would \
             you like to provide more details about how you're feeling?",
            symptom_names.join(", "),
        )
    }

    /// Completion prompt when a condition was matched locally.
    pub fn condition_prompt(condition_name: &str, user_text: &str) -> String {
        format!(
            "A user described their symptoms as: \"{user_text}\". An initial screening \
             suggests they may have {condition_name}. In two or three sentences, add brief \
             supplementary guidance for someone who may have {condition_name}.",
        )
    }

    /// Completion prompt when symptoms were detected but no condition
    /// cleared the threshold.
    pub fn symptoms_prompt(symptom_names: &[&str], user_text: &str) -> String {
        format!(
            "A user described their symptoms as: \"{user_text}\". The symptoms identified \
             so far are: {}. In two or three sentences, suggest what additional details \
             would help narrow this down.",
            symptom_names.join(", "),
        )
    }
}
