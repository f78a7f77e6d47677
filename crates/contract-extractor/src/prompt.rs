//! LLM prompt construction for contract analysis

/// Builds the analysis prompt sent to the LLM
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for one contract text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            ANALYSIS_INSTRUCTIONS.len() + RESPONSE_SCHEMA.len() + self.text.len() + 64,
        );

        prompt.push_str(ANALYSIS_INSTRUCTIONS);
        prompt.push_str("\n\nSchema:\n");
        prompt.push_str(RESPONSE_SCHEMA);
        prompt.push_str("\n\nTEXT:\n");
        prompt.push_str(self.text);

        prompt
    }
}

const ANALYSIS_INSTRUCTIONS: &str = "You are a contract analyst. Extract structured metadata and list notable risks.
Return strictly valid JSON following this schema: metadata + risks. Do not include any prose.
- Dates use the format YYYY-MM-DD, or null when absent.
- Amounts are listed as they appear, including currency.
- Risk severity is one of: low, medium, high, critical.";

/// JSON schema of the expected LLM response
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "metadata": {
      "type": "object",
      "properties": {
        "title": {"type": ["string", "null"]},
        "parties": {"type": "array", "items": {"type": "object", "properties": {"name": {"type": "string"}, "role": {"type": "string"}}, "required": ["name"]}},
        "effective_date": {"type": ["string", "null"]},
        "execution_date": {"type": ["string", "null"]},
        "expiration_date": {"type": ["string", "null"]},
        "amounts": {"type": "array", "items": {"type": ["string", "number"]}},
        "obligations": {"type": "array", "items": {"type": "object", "properties": {"owner": {"type": ["string", "null"]}, "description": {"type": "string"}, "due_date": {"type": ["string", "null"]}}, "required": ["description"]}},
        "renewal_terms": {"type": ["string", "null"]},
        "governing_law": {"type": ["string", "null"]},
        "jurisdiction": {"type": ["string", "null"]},
        "term": {"type": ["string", "null"]},
        "auto_renew": {"type": ["boolean", "null"]}
      }
    },
    "risks": {"type": "array", "items": {"type": "object", "properties": {"id": {"type": "string"}, "severity": {"type": "string"}, "title": {"type": "string"}, "detail": {"type": "string"}, "clause_snippet": {"type": ["string", "null"]}}, "required": ["id", "severity", "title"]}}
  },
  "required": ["metadata", "risks"]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_ends_with_text() {
        let prompt = PromptBuilder::new("Agreement between A and B.").build();
        assert!(prompt.starts_with("You are a contract analyst."));
        assert!(prompt.ends_with("TEXT:\nAgreement between A and B."));
    }

    #[test]
    fn test_prompt_includes_schema() {
        let prompt = PromptBuilder::new("x").build();
        assert!(prompt.contains(RESPONSE_SCHEMA));
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        assert_eq!(schema["required"][0], "metadata");
    }
}
