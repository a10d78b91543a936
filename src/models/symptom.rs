use serde::{Deserialize, Serialize};

use super::enums::Severity;

/// An atomic clinical sign with multilingual keyword variants.
/// Loaded once at startup from the bundled lexicon; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
    pub keywords: Vec<String>,
}

/// A named condition defined by a required subset of symptoms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    pub name: String,
    pub required_symptoms: Vec<String>,
    pub description: String,
    pub recommendations: Vec<String>,
    pub severity: Severity,
}
