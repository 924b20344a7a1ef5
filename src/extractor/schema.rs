use crate::error::SummarizeError;
use crate::model::{Ingredient, Recipe};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Which ingredient shape the model is asked for and held to.
///
/// A response using the other shape fails validation; the two are never
/// merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVersion {
    /// Ingredients are single lines such as `"2 cups flour"`
    #[default]
    PlainText,
    /// Ingredients are `{name, measurement?}` objects
    Measured,
}

fn ingredient_schema(version: SchemaVersion) -> Value {
    match version {
        SchemaVersion::PlainText => json!({ "type": "STRING" }),
        SchemaVersion::Measured => json!({
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "measurement": {
                    "type": "STRING",
                    "description": "Amount in US customary units; omit when no standard unit applies"
                }
            },
            "required": ["name"],
            "propertyOrdering": ["name", "measurement"]
        }),
    }
}

/// Response schema in the OpenAPI subset Gemini accepts as `responseSchema`
pub fn response_schema(version: SchemaVersion) -> Value {
    let ingredient = ingredient_schema(version);
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "ingredients": { "type": "ARRAY", "items": ingredient },
            "steps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "heading": { "type": "STRING" },
                        "ingredients": { "type": "ARRAY", "items": ingredient },
                        "instructions": { "type": "STRING" }
                    },
                    "required": ["heading", "instructions"],
                    "propertyOrdering": ["heading", "ingredients", "instructions"]
                }
            },
            "tips": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["title", "ingredients", "steps", "tips"],
        "propertyOrdering": ["title", "ingredients", "steps", "tips"]
    })
}

/// Parse a model payload and validate it against the recipe schema.
///
/// Values are returned exactly as parsed; nothing is trimmed or rewritten.
pub fn parse_recipe(payload: &str, version: SchemaVersion) -> Result<Recipe, SummarizeError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| SummarizeError::schema(format!("malformed JSON: {}", e)))?;

    let recipe: Recipe = serde_json::from_value(value)
        .map_err(|e| SummarizeError::schema(format!("unexpected shape: {}", e)))?;

    validate(&recipe, version)?;
    Ok(recipe)
}

/// Check the invariants serde cannot express
pub fn validate(recipe: &Recipe, version: SchemaVersion) -> Result<(), SummarizeError> {
    if recipe.title.trim().is_empty() {
        return Err(SummarizeError::schema("title is empty"));
    }

    check_ingredients(&recipe.ingredients, version, "ingredients")?;

    for (i, step) in recipe.steps.iter().enumerate() {
        if step.heading.trim().is_empty() {
            return Err(SummarizeError::schema(format!("steps[{}].heading is empty", i)));
        }
        if step.instructions.trim().is_empty() {
            return Err(SummarizeError::schema(format!(
                "steps[{}].instructions is empty",
                i
            )));
        }
        check_ingredients(&step.ingredients, version, &format!("steps[{}].ingredients", i))?;
    }

    Ok(())
}

fn check_ingredients(
    ingredients: &[Ingredient],
    version: SchemaVersion,
    path: &str,
) -> Result<(), SummarizeError> {
    let expect_measured = version == SchemaVersion::Measured;
    match ingredients
        .iter()
        .position(|ingredient| ingredient.is_measured() != expect_measured)
    {
        Some(i) => Err(SummarizeError::schema(format!(
            "{}[{}] does not use the {:?} ingredient shape",
            path, i, version
        ))),
        None => Ok(()),
    }
}
