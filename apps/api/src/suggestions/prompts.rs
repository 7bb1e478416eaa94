//! Prompt construction for content suggestions.

/// Builds the recommendation prompt from the user's goal lines and liked
/// quote categories. Empty inputs fall back to generic wording so a brand
/// new user still gets sensible suggestions.
pub fn build_suggestions_prompt(goals: &[&str], preferences: &[String]) -> String {
    let goals = if goals.is_empty() {
        "personal growth".to_string()
    } else {
        goals.join("; ")
    };
    let preferences = if preferences.is_empty() {
        "inspirational content".to_string()
    } else {
        preferences.join(", ")
    };

    format!(
        "Based on the following goals: {goals} and preferences: {preferences}, \
         recommend pertinent images, videos, and quotes. \
         Respond with a JSON array of objects, each with a \"type\" field \
         (one of \"quote\", \"image\", \"video\"), a \"content\" field, an \
         optional \"author\" field, and an optional \"url\" field."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_goals_and_preferences() {
        let prompt = build_suggestions_prompt(
            &["run a marathon", "sleep earlier"],
            &["Discipline".to_string(), "Calm".to_string()],
        );

        assert!(prompt.contains("goals: run a marathon; sleep earlier"));
        assert!(prompt.contains("preferences: Discipline, Calm"));
    }

    #[test]
    fn empty_inputs_fall_back_to_generic_wording() {
        let prompt = build_suggestions_prompt(&[], &[]);

        assert!(prompt.contains("goals: personal growth"));
        assert!(prompt.contains("preferences: inspirational content"));
    }

    #[test]
    fn prompt_demands_the_json_shape() {
        let prompt = build_suggestions_prompt(&["read more"], &[]);

        assert!(prompt.contains("JSON array"));
        assert!(prompt.contains("\"type\""));
    }
}
