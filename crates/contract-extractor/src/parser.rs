//! Parse LLM output into metadata and risk findings
//!
//! Models answer in slightly different shapes, so the response is coerced
//! rather than deserialized strictly:
//!
//! 1. JSON is located in the raw text, a markdown code fence, or the
//!    largest `{...}` block.
//! 2. Metadata fields are normalised (numeric amounts become strings, dates
//!    go through the rule date parser, unknown keys land in `custom`).
//! 3. Risks accept both `{title, detail}` and the legacy `{message}` shape.
//!
//! Anything that still does not fit is an error, which the extractor turns
//! into a fallback to the rule path.

use crate::dates::parse_date;
use crate::error::ExtractorError;
use chrono::NaiveDate;
use contract_domain::{ExtractedParty, Metadata, Obligation, RiskFinding, Severity};
use serde_json::{Map, Number, Value};

/// Metadata and risks proposed by the LLM
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmAnalysis {
    /// Proposed metadata
    pub metadata: Metadata,
    /// Proposed risk findings, in response order
    pub risks: Vec<RiskFinding>,
}

/// Parse an LLM response into an [`LlmAnalysis`]
pub fn parse_llm_response(response: &str) -> Result<LlmAnalysis, ExtractorError> {
    let root = extract_json(response)?;
    let root = root
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    let metadata = match root.get("metadata") {
        None | Some(Value::Null) => Metadata::default(),
        Some(Value::Object(fields)) => parse_metadata(fields)?,
        Some(_) => {
            return Err(ExtractorError::Validation(
                "metadata must be an object".to_string(),
            ))
        }
    };

    let risks = match root.get("risks") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                parse_risk(item).map_err(|e| {
                    ExtractorError::Validation(format!("risk {}: {}", idx, e))
                })
            })
            .collect::<Result<_, _>>()?,
        Some(_) => {
            return Err(ExtractorError::Validation(
                "risks must be an array".to_string(),
            ))
        }
    };

    Ok(LlmAnalysis { metadata, risks })
}

/// Locate a JSON object in the response text
fn extract_json(response: &str) -> Result<Value, ExtractorError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty response".to_string()));
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    if let Some(body) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return serde_json::from_str(&trimmed[start..=end]).map_err(ExtractorError::from);
        }
    }

    Err(ExtractorError::InvalidFormat(
        "No JSON object found in response".to_string(),
    ))
}

/// Body of the first markdown code fence, without its language tag
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

fn parse_metadata(fields: &Map<String, Value>) -> Result<Metadata, ExtractorError> {
    let mut metadata = Metadata::default();

    for (key, value) in fields {
        match key.as_str() {
            "title" => metadata.title = opt_string(key, value)?,
            "renewal_terms" => metadata.renewal_terms = opt_string(key, value)?,
            "governing_law" => metadata.governing_law = opt_string(key, value)?,
            "jurisdiction" => metadata.jurisdiction = opt_string(key, value)?,
            "effective_date" => metadata.effective_date = opt_date(key, value)?,
            "execution_date" => metadata.execution_date = opt_date(key, value)?,
            "expiration_date" => metadata.expiration_date = opt_date(key, value)?,
            "parties" => {
                metadata.parties = array(key, value)?
                    .iter()
                    .map(parse_party)
                    .collect::<Result<_, _>>()?
            }
            "obligations" => {
                metadata.obligations = array(key, value)?
                    .iter()
                    .map(parse_obligation)
                    .collect::<Result<_, _>>()?
            }
            "amounts" => {
                metadata.amounts = array(key, value)?
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(amount)
                    .collect::<Result<_, _>>()?
            }
            "custom" => match value {
                Value::Object(custom) => metadata
                    .custom
                    .extend(custom.iter().map(|(k, v)| (k.clone(), v.clone()))),
                Value::Null => {}
                _ => return Err(validation("custom must be an object")),
            },
            _ => {
                if !value.is_null() {
                    metadata.custom.insert(key.clone(), value.clone());
                }
            }
        }
    }

    Ok(metadata)
}

fn parse_party(value: &Value) -> Result<ExtractedParty, ExtractorError> {
    match value {
        Value::String(name) => Ok(ExtractedParty::new(name.trim(), "")),
        Value::Object(fields) => {
            let name = fields
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| validation("party requires a string name"))?;
            let role = opt_string("role", fields.get("role").unwrap_or(&Value::Null))?;
            Ok(ExtractedParty::new(name.trim(), role.unwrap_or_default()))
        }
        _ => Err(validation("party must be an object or string")),
    }
}

fn parse_obligation(value: &Value) -> Result<Obligation, ExtractorError> {
    match value {
        Value::String(description) => Ok(Obligation::new(description.trim())),
        Value::Object(fields) => {
            let description = fields
                .get("description")
                .and_then(Value::as_str)
                .ok_or_else(|| validation("obligation requires a string description"))?;
            let owner = match fields.get("owner").filter(|v| !v.is_null()) {
                Some(owner) => opt_string("owner", owner)?,
                None => opt_string("party", fields.get("party").unwrap_or(&Value::Null))?,
            };
            let due_date = opt_date("due_date", fields.get("due_date").unwrap_or(&Value::Null))?;
            Ok(Obligation {
                description: description.trim().to_string(),
                due_date,
                owner,
            })
        }
        _ => Err(validation("obligation must be an object or string")),
    }
}

fn parse_risk(value: &Value) -> Result<RiskFinding, String> {
    let fields = value.as_object().ok_or("not an object")?;

    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    let id = text("id").ok_or("missing id")?;
    let severity = match fields.get("severity") {
        None | Some(Value::Null) => Severity::Low,
        Some(Value::String(s)) => {
            Severity::parse(s).ok_or_else(|| format!("unknown severity '{}'", s))?
        }
        Some(_) => return Err("severity must be a string".to_string()),
    };

    let message = text("message");
    let title = text("title")
        .or_else(|| message.clone())
        .ok_or("missing title")?;
    let detail = text("detail").or(message).unwrap_or_else(|| title.clone());

    let references = match fields.get("references") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(RiskFinding {
        id,
        severity,
        title,
        detail,
        clause_snippet: text("clause_snippet"),
        references,
    })
}

fn validation(message: &str) -> ExtractorError {
    ExtractorError::Validation(message.to_string())
}

fn array<'v>(key: &str, value: &'v Value) -> Result<&'v [Value], ExtractorError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(&[]),
        _ => Err(ExtractorError::Validation(format!("{} must be an array", key))),
    }
}

fn opt_string(key: &str, value: &Value) -> Result<Option<String>, ExtractorError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        _ => Err(ExtractorError::Validation(format!("{} must be a string", key))),
    }
}

fn opt_date(key: &str, value: &Value) -> Result<Option<NaiveDate>, ExtractorError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| ExtractorError::Validation(format!("{}: unparseable date '{}'", key, s))),
        _ => Err(ExtractorError::Validation(format!("{} must be a date string", key))),
    }
}

fn amount(value: &Value) -> Result<String, ExtractorError> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(number_to_string(n)),
        _ => Err(validation("amounts must be strings or numbers")),
    }
}

/// Render a number without a trailing `.0`
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let response = r#"{
            "metadata": {
                "title": "Master Services Agreement",
                "parties": [{"name": "Acme Corp", "role": "Provider"}, {"name": "Beta LLC"}],
                "effective_date": "2025-01-01",
                "expiration_date": null,
                "amounts": [5000, 12.5, "USD 200"],
                "governing_law": "Indonesia"
            },
            "risks": [
                {"id": "risk.payment.late", "severity": "High", "title": "Late fees", "detail": "Uncapped late fees."}
            ]
        }"#;

        let analysis = parse_llm_response(response).unwrap();
        let md = &analysis.metadata;
        assert_eq!(md.title.as_deref(), Some("Master Services Agreement"));
        assert_eq!(md.parties[0], ExtractedParty::new("Acme Corp", "Provider"));
        assert_eq!(md.parties[1], ExtractedParty::new("Beta LLC", ""));
        assert_eq!(md.effective_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(md.expiration_date, None);
        assert_eq!(md.amounts, vec!["5000", "12.5", "USD 200"]);

        assert_eq!(analysis.risks.len(), 1);
        assert_eq!(analysis.risks[0].severity, Severity::High);
        assert_eq!(analysis.risks[0].detail, "Uncapped late fees.");
    }

    #[test]
    fn test_float_amount_without_trailing_zero() {
        let analysis = parse_llm_response(r#"{"metadata": {"amounts": [1500.0]}}"#).unwrap();
        assert_eq!(analysis.metadata.amounts, vec!["1500"]);
    }

    #[test]
    fn test_parse_markdown_fence() {
        let response = "Here you go:\n```json\n{\"metadata\": {\"title\": \"NDA\"}, \"risks\": []}\n```\nThanks";
        let analysis = parse_llm_response(response).unwrap();
        assert_eq!(analysis.metadata.title.as_deref(), Some("NDA"));
    }

    #[test]
    fn test_parse_embedded_object() {
        let response = "Result: {\"metadata\": {\"jurisdiction\": \"Jakarta\"}, \"risks\": []} -- end";
        let analysis = parse_llm_response(response).unwrap();
        assert_eq!(analysis.metadata.jurisdiction.as_deref(), Some("Jakarta"));
    }

    #[test]
    fn test_no_json_is_invalid_format() {
        assert!(matches!(
            parse_llm_response("I cannot help with that."),
            Err(ExtractorError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_llm_response("   "),
            Err(ExtractorError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_non_object_root_is_invalid_format() {
        assert!(matches!(
            parse_llm_response("[1, 2, 3]"),
            Err(ExtractorError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_legacy_risk_shape() {
        let response = r#"{"metadata": {}, "risks": [
            {"id": "risk.x", "severity": "MEDIUM", "message": "Termination for convenience", "context": {"clause": 4}},
            {"id": "risk.y", "message": "No severity given"}
        ]}"#;
        let risks = parse_llm_response(response).unwrap().risks;
        assert_eq!(risks[0].title, "Termination for convenience");
        assert_eq!(risks[0].detail, "Termination for convenience");
        assert_eq!(risks[0].severity, Severity::Medium);
        assert_eq!(risks[1].severity, Severity::Low);
    }

    #[test]
    fn test_unknown_severity_is_validation_error() {
        let response = r#"{"risks": [{"id": "r", "severity": "severe", "title": "t"}]}"#;
        assert!(matches!(
            parse_llm_response(response),
            Err(ExtractorError::Validation(_))
        ));
    }

    #[test]
    fn test_legacy_obligation_party_becomes_owner() {
        let response = r#"{"metadata": {"obligations": [
            {"party": "Supplier", "description": "Deliver goods", "due_date": "March 1, 2025"},
            {"owner": "Buyer", "party": "ignored", "description": "Pay"}
        ]}}"#;
        let obligations = parse_llm_response(response).unwrap().metadata.obligations;
        assert_eq!(obligations[0].owner.as_deref(), Some("Supplier"));
        assert_eq!(obligations[0].due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(obligations[1].owner.as_deref(), Some("Buyer"));
    }

    #[test]
    fn test_unparseable_date_is_validation_error() {
        let response = r#"{"metadata": {"effective_date": "upon signature"}}"#;
        assert!(matches!(
            parse_llm_response(response),
            Err(ExtractorError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_keys_kept_in_custom() {
        let response = r#"{"metadata": {"term": "24 months", "auto_renew": true, "notes": null}}"#;
        let custom = parse_llm_response(response).unwrap().metadata.custom;
        assert_eq!(custom.get("term"), Some(&Value::from("24 months")));
        assert_eq!(custom.get("auto_renew"), Some(&Value::Bool(true)));
        assert!(!custom.contains_key("notes"));
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let analysis = parse_llm_response("{}").unwrap();
        assert_eq!(analysis, LlmAnalysis::default());
    }
}
