use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Sender;
use super::symptom::{Condition, Symptom};

/// One entry of the conversation log. Created once per turn and never
/// mutated afterwards — a translated response carries the pivot-language
/// text in `original_text` from the moment of creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub original_text: Option<String>,
    pub sender: Sender,
    pub timestamp: NaiveDateTime,
    pub detected_symptoms: Option<Vec<Symptom>>,
    pub matched_conditions: Option<Vec<Condition>>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            original_text: None,
            sender: Sender::User,
            timestamp: chrono::Local::now().naive_local(),
            detected_symptoms: None,
            matched_conditions: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            original_text: None,
            sender: Sender::Assistant,
            timestamp: chrono::Local::now().naive_local(),
            detected_symptoms: None,
            matched_conditions: None,
        }
    }

    /// Attach the pivot-language text the delivered text was translated from.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original_text = Some(original.into());
        self
    }

    pub fn with_analysis(
        mut self,
        symptoms: Vec<Symptom>,
        conditions: Vec<Condition>,
    ) -> Self {
        self.detected_symptoms = Some(symptoms);
        self.matched_conditions = Some(conditions);
        self
    }
}
