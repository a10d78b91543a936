//! Symptom lexicon and condition catalog — the static reference data the
//! inference engine matches against.
//!
//! Both catalogs are immutable after load. `HealthCatalog::bundled()` parses
//! the JSON shipped with the crate; `HealthCatalog::load()` reads the same
//! two files from a resources directory so deployments can swap datasets
//! without rebuilding. Referential integrity (every condition requirement
//! names a known symptom) is enforced at load, never at match time.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::models::{Condition, Symptom};

const BUNDLED_SYMPTOMS: &str = include_str!("../../resources/symptoms.json");
const BUNDLED_CONDITIONS: &str = include_str!("../../resources/conditions.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read {0}: {1}")]
    Load(String, String),

    #[error("Failed to parse {0}: {1}")]
    Parse(String, String),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Symptom '{symptom}' has no keywords")]
    EmptyKeywords { symptom: String },

    #[error("Condition '{condition}' requires unknown symptom '{symptom}'")]
    UnknownSymptom { condition: String, symptom: String },
}

/// The loaded, validated symptom lexicon + condition catalog.
#[derive(Debug)]
pub struct HealthCatalog {
    symptoms: Vec<Symptom>,
    conditions: Vec<Condition>,
}

impl HealthCatalog {
    /// Build a catalog from already-parsed parts, validating invariants.
    pub fn from_parts(
        symptoms: Vec<Symptom>,
        conditions: Vec<Condition>,
    ) -> Result<Self, CatalogError> {
        let mut symptom_ids = HashSet::new();
        for symptom in &symptoms {
            if !symptom_ids.insert(symptom.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "symptom",
                    id: symptom.id.clone(),
                });
            }
            if symptom.keywords.is_empty() {
                return Err(CatalogError::EmptyKeywords {
                    symptom: symptom.id.clone(),
                });
            }
        }

        let mut condition_ids = HashSet::new();
        for condition in &conditions {
            if !condition_ids.insert(condition.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    kind: "condition",
                    id: condition.id.clone(),
                });
            }
            for required in &condition.required_symptoms {
                if !symptom_ids.contains(required.as_str()) {
                    return Err(CatalogError::UnknownSymptom {
                        condition: condition.id.clone(),
                        symptom: required.clone(),
                    });
                }
            }
        }

        Ok(Self {
            symptoms,
            conditions,
        })
    }

    /// Load catalog data from `symptoms.json` + `conditions.json` in a
    /// resources directory.
    pub fn load(resources_dir: &Path) -> Result<Self, CatalogError> {
        let symptoms_path = resources_dir.join("symptoms.json");
        let conditions_path = resources_dir.join("conditions.json");

        let symptoms_json = std::fs::read_to_string(&symptoms_path).map_err(|e| {
            CatalogError::Load(symptoms_path.display().to_string(), e.to_string())
        })?;
        let symptoms: Vec<Symptom> = serde_json::from_str(&symptoms_json)
            .map_err(|e| CatalogError::Parse("symptoms.json".into(), e.to_string()))?;

        let conditions_json = std::fs::read_to_string(&conditions_path).map_err(|e| {
            CatalogError::Load(conditions_path.display().to_string(), e.to_string())
        })?;
        let conditions: Vec<Condition> = serde_json::from_str(&conditions_json)
            .map_err(|e| CatalogError::Parse("conditions.json".into(), e.to_string()))?;

        Self::from_parts(symptoms, conditions)
    }

    /// The catalog shipped with the crate (10 symptoms, 5 conditions).
    pub fn bundled() -> Self {
        let symptoms: Vec<Symptom> =
            serde_json::from_str(BUNDLED_SYMPTOMS).expect("bundled symptoms.json is valid");
        let conditions: Vec<Condition> =
            serde_json::from_str(BUNDLED_CONDITIONS).expect("bundled conditions.json is valid");
        Self::from_parts(symptoms, conditions).expect("bundled catalog is consistent")
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn symptom_by_id(&self, id: &str) -> Option<&Symptom> {
        self.symptoms.iter().find(|s| s.id == id)
    }

    pub fn condition_by_id(&self, id: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id == id)
    }
}
