//! Contract AI Drafting
//!
//! Renders contracts from templates and a clause library.
//!
//! - [`ClauseLibrary`]: ordered `key → text` clauses loaded from YAML or JSON,
//!   with a small built-in fallback
//! - [`Drafter`]: a minijinja environment over a templates directory, with a
//!   built-in copy of the base template
//!
//! # Examples
//!
//! ```
//! use contract_drafting::{ClauseLibrary, Drafter};
//! use contract_domain::DraftRequest;
//!
//! let drafter = Drafter::new("/nonexistent/templates", ClauseLibrary::builtin());
//! let request = DraftRequest {
//!     contract_type: "base".to_string(),
//!     variables: serde_json::json!({"party_a": "Acme", "party_b": "Beta"})
//!         .as_object()
//!         .cloned()
//!         .unwrap_or_default(),
//!     clauses: Some(vec!["governing_law".to_string()]),
//! };
//! let draft = drafter.render(&request).unwrap();
//! assert_eq!(draft.used_clauses, vec!["governing_law"]);
//! assert!(draft.content.contains("Acme"));
//! ```

#![warn(missing_docs)]

mod drafter;
mod error;
mod library;

pub use drafter::{template_for, Drafter, BASE_TEMPLATE};
pub use error::DraftingError;
pub use library::{Clause, ClauseLibrary};
