use super::SchemaVersion;

/// Instructions for the schema-constrained profile.
///
/// Loaded from `structured_prompt.txt` at compile time; the ingredient
/// format line is appended per [`SchemaVersion`] by [`build_structured_prompt`].
pub const STRUCTURED_PROMPT: &str = include_str!("structured_prompt.txt");

/// Instructions for the free-form HTML profile
pub const PROSE_PROMPT: &str = include_str!("prose_prompt.txt");

/// Instructions for single-question calls
pub const ASSISTANT_PROMPT: &str = include_str!("assistant_prompt.txt");

/// Build the structured-profile instructions for a schema version.
pub fn build_structured_prompt(version: SchemaVersion) -> String {
    let ingredient_format = match version {
        SchemaVersion::PlainText => {
            "Write each ingredient as a single line that starts with its measurement, for example \"2 cups all-purpose flour\"."
        }
        SchemaVersion::Measured => {
            "Give each ingredient a name and, separately, its measurement, for example name \"all-purpose flour\" with measurement \"2 cups\". Leave the measurement out when no standard unit applies, such as salt to taste."
        }
    };
    format!("{}\n{}", STRUCTURED_PROMPT.trim_end(), ingredient_format)
}
