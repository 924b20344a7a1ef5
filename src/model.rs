use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe as returned by the model once it passed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub tips: Vec<String>,
}

/// One ingredient line.
///
/// Two shapes exist: a free-form line (`"2 cups flour"`) and a name with an
/// optional measurement. Which one a response may use is decided by
/// [`SchemaVersion`](crate::extractor::SchemaVersion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ingredient {
    PlainText(String),
    Measured {
        name: String,
        /// `None` when no standard unit applies ("salt to taste")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        measurement: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub heading: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
}

impl Ingredient {
    pub fn is_measured(&self) -> bool {
        matches!(self, Ingredient::Measured { .. })
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ingredient::PlainText(text) => write!(f, "{}", text),
            Ingredient::Measured {
                name,
                measurement: Some(measurement),
            } if !measurement.trim().is_empty() => write!(f, "{} {}", measurement.trim(), name),
            Ingredient::Measured { name, .. } => write!(f, "{}", name),
        }
    }
}
