//! Presentation of a [`Recipe`] for terminals and web pages.

use crate::model::{Ingredient, Recipe};
use html_escape::encode_text;
use std::fmt::Write;

/// Render a recipe as plain text
pub fn to_text(recipe: &Recipe) -> String {
    let mut out = String::new();
    out.push_str(&recipe.title);
    out.push_str("\n\nIngredients:\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", ingredient);
    }

    for (i, step) in recipe.steps.iter().enumerate() {
        let _ = write!(out, "\n{}. {}\n", i + 1, step.heading);
        for ingredient in &step.ingredients {
            let _ = writeln!(out, "  - {}", ingredient);
        }
        let _ = writeln!(out, "{}", step.instructions);
    }

    if !recipe.tips.is_empty() {
        out.push_str("\nTips:\n");
        for tip in &recipe.tips {
            let _ = writeln!(out, "  - {}", tip);
        }
    }

    out
}

/// Render a recipe as an HTML fragment; all recipe text is escaped
pub fn to_html(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<h1>{}</h1>", encode_text(&recipe.title));

    out.push_str("<h2>Ingredients:</h2>\n");
    push_ingredient_list(&mut out, &recipe.ingredients);

    for (i, step) in recipe.steps.iter().enumerate() {
        let _ = writeln!(out, "<h2>{}. {}</h2>", i + 1, encode_text(&step.heading));
        if !step.ingredients.is_empty() {
            push_ingredient_list(&mut out, &step.ingredients);
        }
        let _ = writeln!(out, "<p>{}</p>", encode_text(&step.instructions));
    }

    if !recipe.tips.is_empty() {
        out.push_str("<hr>\n<h2>Tips</h2>\n<ul>\n");
        for tip in &recipe.tips {
            let _ = writeln!(out, "<li>{}</li>", encode_text(tip));
        }
        out.push_str("</ul>\n");
    }

    out
}

fn push_ingredient_list(out: &mut String, ingredients: &[Ingredient]) {
    out.push_str("<ul>\n");
    for ingredient in ingredients {
        let _ = writeln!(out, "<li>{}</li>", encode_text(&ingredient.to_string()));
    }
    out.push_str("</ul>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Step;

    fn recipe() -> Recipe {
        Recipe {
            title: "Mac & Cheese".to_string(),
            ingredients: vec![
                Ingredient::Measured {
                    name: "elbow macaroni".to_string(),
                    measurement: Some("8 oz".to_string()),
                },
                Ingredient::Measured {
                    name: "salt".to_string(),
                    measurement: None,
                },
            ],
            steps: vec![
                Step {
                    heading: "Boil".to_string(),
                    ingredients: vec![Ingredient::PlainText("8 oz elbow macaroni".to_string())],
                    instructions: "Cook pasta until al dente.".to_string(),
                },
                Step {
                    heading: "Sauce <cheese>".to_string(),
                    ingredients: vec![],
                    instructions: "Melt cheese into milk.".to_string(),
                },
            ],
            tips: vec![],
        }
    }

    #[test]
    fn test_to_text() {
        let text = to_text(&recipe());
        assert!(text.starts_with("Mac & Cheese\n"));
        assert!(text.contains("  - 8 oz elbow macaroni\n"));
        assert!(text.contains("  - salt\n"));
        assert!(text.contains("1. Boil\n"));
        assert!(text.contains("2. Sauce <cheese>\nMelt cheese into milk."));
        assert!(!text.contains("Tips:"));
    }

    #[test]
    fn test_to_html_escapes_and_skips_empty_sections() {
        let html = to_html(&recipe());
        assert!(html.contains("<h1>Mac &amp; Cheese</h1>"));
        assert!(html.contains("<h2>2. Sauce &lt;cheese&gt;</h2>\n<p>"));
        assert!(!html.contains("Tips"));
    }

    #[test]
    fn test_to_html_with_tips() {
        let mut recipe = recipe();
        recipe.tips = vec!["Salt the water.".to_string()];
        let html = to_html(&recipe);
        assert!(html.contains("<h2>Tips</h2>\n<ul>\n<li>Salt the water.</li>"));
    }
}
