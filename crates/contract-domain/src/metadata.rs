//! Contract metadata records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A party named in the contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedParty {
    /// Party name as written in the contract
    pub name: String,

    /// Role of the party (e.g., Customer, Vendor, Lessor, Lessee)
    #[serde(default)]
    pub role: String,
}

impl ExtractedParty {
    /// Create a new party
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Something a party is bound to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    /// Obligation text
    pub description: String,

    /// Optional due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Optional owning party
    #[serde(default)]
    pub owner: Option<String>,
}

impl Obligation {
    /// Create an obligation with only a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            due_date: None,
            owner: None,
        }
    }
}

/// Structured facts extracted from a contract
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Contract title
    #[serde(default)]
    pub title: Option<String>,

    /// Date the contract takes effect
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,

    /// Date the contract was signed
    #[serde(default)]
    pub execution_date: Option<NaiveDate>,

    /// Date the contract expires
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,

    /// Renewal terms
    #[serde(default)]
    pub renewal_terms: Option<String>,

    /// Governing law
    #[serde(default)]
    pub governing_law: Option<String>,

    /// Jurisdiction for disputes
    #[serde(default)]
    pub jurisdiction: Option<String>,

    /// Contracting parties
    #[serde(default)]
    pub parties: Vec<ExtractedParty>,

    /// Obligations found in the text
    #[serde(default)]
    pub obligations: Vec<Obligation>,

    /// Monetary amounts, as written
    #[serde(default)]
    pub amounts: Vec<String>,

    /// Open-ended extra fields
    #[serde(default)]
    pub custom: Map<String, Value>,
}

impl Metadata {
    /// Whether the named field carries a value.
    ///
    /// Optional scalars count when set and non-empty, collections when
    /// non-empty. Unknown field names are never present.
    pub fn field_is_present(&self, field: &str) -> bool {
        fn text(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|s| !s.trim().is_empty())
        }

        match field {
            "title" => text(&self.title),
            "effective_date" => self.effective_date.is_some(),
            "execution_date" => self.execution_date.is_some(),
            "expiration_date" => self.expiration_date.is_some(),
            "renewal_terms" => text(&self.renewal_terms),
            "governing_law" => text(&self.governing_law),
            "jurisdiction" => text(&self.jurisdiction),
            "parties" => !self.parties.is_empty(),
            "obligations" => !self.obligations.is_empty(),
            "amounts" => !self.amounts.is_empty(),
            "custom" => !self.custom.is_empty(),
            _ => false,
        }
    }
}
