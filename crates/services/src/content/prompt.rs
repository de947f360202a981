use quiz_core::model::{BATCH_SIZE, Difficulty};
use serde_json::{Value, json};

/// Prompt asking for one batch of multiple-choice calculus questions.
#[must_use]
pub fn batch_prompt(level: Difficulty, uniqueness_token: &str) -> String {
    format!(
        "Create a set of {BATCH_SIZE} multiple-choice questions on \"Antiderivatives & Integrals\".\n\
         Requirements:\n\
         1. {descriptor}\n\
         2. Use LaTeX for every mathematical expression.\n\
         3. The questions MUST be completely new and must not repeat any previous set (session code: {uniqueness_token}).\n\
         4. Keep the wording creative and concise.\n\
         5. Each question has options labelled A, B, C and D with exactly one correct option.\n\
         6. Return standard JSON only.",
        descriptor = level.descriptor(),
    )
}

/// JSON schema for the generator's structured output.
#[must_use]
pub fn batch_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "text": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "STRING" },
                            "text": { "type": "STRING" }
                        },
                        "required": ["id", "text"]
                    }
                },
                "correctOptionId": { "type": "STRING" },
                "explanation": { "type": "STRING" }
            },
            "required": ["id", "text", "options", "correctOptionId", "explanation"]
        }
    })
}
