//! Template rendering

use crate::error::DraftingError;
use crate::library::ClauseLibrary;
use contract_domain::{DraftRequest, DraftResult};
use minijinja::{AutoEscape, Environment};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the base contract template
pub const BASE_TEMPLATE: &str = "base_contract.jinja";

/// Built-in copy of the base template, used when the file is absent
const BUILTIN_BASE_TEMPLATE: &str = include_str!("../../../resources/templates/base_contract.jinja");

/// Contract types with a dedicated template
const TEMPLATES: &[(&str, &str)] = &[("base", BASE_TEMPLATE)];

/// Template file for a contract type. Unknown types use the base template.
pub fn template_for(contract_type: &str) -> &'static str {
    TEMPLATES
        .iter()
        .find(|(kind, _)| *kind == contract_type)
        .map_or(BASE_TEMPLATE, |(_, template)| *template)
}

/// Renders contracts from templates and a clause library
pub struct Drafter {
    env: Environment<'static>,
    library: ClauseLibrary,
    templates_dir: PathBuf,
}

impl Drafter {
    /// Create a drafter over a templates directory
    pub fn new(templates_dir: impl AsRef<Path>, library: ClauseLibrary) -> Self {
        let templates_dir = templates_dir.as_ref().to_path_buf();

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".jinja") || name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        let files = minijinja::path_loader(&templates_dir);
        env.set_loader(move |name| match files(name)? {
            Some(source) => Ok(Some(source)),
            None if name == BASE_TEMPLATE => {
                debug!("Template {} not on disk, using built-in copy", name);
                Ok(Some(BUILTIN_BASE_TEMPLATE.to_string()))
            }
            None => Ok(None),
        });

        Self {
            env,
            library,
            templates_dir,
        }
    }

    /// Create a drafter from a resources directory holding `clauses.yaml`
    /// and `templates/`
    pub fn from_resources(resources_dir: impl AsRef<Path>) -> Result<Self, DraftingError> {
        let resources_dir = resources_dir.as_ref();
        let library = ClauseLibrary::load(resources_dir.join("clauses.yaml"))?;
        Ok(Self::new(resources_dir.join("templates"), library))
    }

    /// The clause library in use
    pub fn library(&self) -> &ClauseLibrary {
        &self.library
    }

    /// The templates directory
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Render a contract.
    ///
    /// The template sees the request variables plus `clauses` (key → text)
    /// and `clause_list` (ordered `{key, text}` entries).
    pub fn render(&self, request: &DraftRequest) -> Result<DraftResult, DraftingError> {
        let selected = self.library.select(request.clauses.as_deref());

        let mut context: Map<String, Value> = request.variables.clone();
        context.insert(
            "clauses".to_string(),
            Value::Object(
                selected
                    .iter()
                    .map(|c| (c.key.clone(), Value::String(c.text.clone())))
                    .collect(),
            ),
        );
        context.insert(
            "clause_list".to_string(),
            Value::Array(
                selected
                    .iter()
                    .map(|c| json!({"key": c.key, "text": c.text}))
                    .collect(),
            ),
        );

        let template_name = template_for(&request.contract_type);
        let content = self.env.get_template(template_name)?.render(&context)?;

        let used_clauses: Vec<String> = selected.into_iter().map(|c| c.key).collect();
        info!(
            "Drafted '{}' contract with {} clauses",
            request.contract_type,
            used_clauses.len()
        );

        Ok(DraftResult {
            content,
            used_clauses,
        })
    }
}
