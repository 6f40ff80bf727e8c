//! Registry of named action templates and combo composition.
//!
//! The catalog is an ordinary value: build it once (usually through
//! `arena-content`) and hand references to the components that need it.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::action::{Action, ActionSpec, ActionTemplate, BodyTargets, Combo};
use crate::body::Range;
use crate::error::{ArenaError, ErrorSeverity};

/// Errors raised while composing a combo.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ComboError {
    #[error("combo '{name}' has no member actions")]
    Empty { name: String },

    #[error("combo '{name}' cannot contain combo '{member}'")]
    NestedCombo { name: String, member: String },
}

impl ArenaError for ComboError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "COMBO_EMPTY",
            Self::NestedCombo { .. } => "COMBO_NESTED",
        }
    }
}

/// Errors raised by catalog lookups and registration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("action '{0}' is already registered")]
    Duplicate(String),

    #[error(transparent)]
    Combo(#[from] ComboError),
}

impl ArenaError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownAction(_) => ErrorSeverity::Fatal,
            Self::Duplicate(_) => ErrorSeverity::Validation,
            Self::Combo(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "CATALOG_UNKNOWN_ACTION",
            Self::Duplicate(_) => "CATALOG_DUPLICATE",
            Self::Combo(err) => err.error_code(),
        }
    }
}

/// Merges `templates` into a single combo template.
///
/// - Body targets are merged in order; a later member overwrites an earlier
///   member's location for the same part.
/// - Vulnerabilities and tags are concatenated, duplicates kept.
/// - Weight distributions and necessity come from the member with the largest
///   necessity (first one wins a tie).
/// - Range is the largest member range unless `override_range` is given.
///
/// # Errors
///
/// Fails if `templates` is empty or contains a combo.
pub fn build_combo(
    templates: &[Arc<ActionTemplate>],
    name: impl Into<String>,
    override_range: Option<Range>,
) -> Result<ActionTemplate, ComboError> {
    let name = name.into();

    if let Some(nested) = templates.iter().find(|t| t.is_combo()) {
        return Err(ComboError::NestedCombo {
            name,
            member: nested.name().to_owned(),
        });
    }

    let Some(first) = templates.first() else {
        return Err(ComboError::Empty { name });
    };

    let mut targets = BodyTargets::new();
    let mut vulnerabilities = Vec::new();
    let mut tags = Vec::new();
    let mut range = first.range();
    let mut weight_source = first.spec();

    for template in templates {
        let spec = template.spec();
        for (part, location) in spec.target_body_locations.iter() {
            targets.insert(part, location);
        }
        vulnerabilities.extend_from_slice(&spec.likely_vulnerabilities_after_execution);
        tags.extend_from_slice(&spec.tags);
        range = range.max(spec.range);
        if spec.weight_distribution_necessity > weight_source.weight_distribution_necessity {
            weight_source = spec;
        }
    }

    let spec = ActionSpec {
        name,
        target_body_locations: targets,
        init_weight_distribution: weight_source.init_weight_distribution,
        final_weight_distribution: weight_source.final_weight_distribution,
        weight_distribution_necessity: weight_source.weight_distribution_necessity,
        likely_vulnerabilities_after_execution: vulnerabilities,
        range: override_range.unwrap_or(range),
        tags,
    };

    Ok(ActionTemplate::Combo(Combo::new(spec, templates.to_vec())))
}

/// Named action templates, looked up by catalog key (e.g. `JAB_HEAD`).
#[derive(Clone, Debug, Default)]
pub struct ActionCatalog {
    templates: BTreeMap<String, Arc<ActionTemplate>>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `template` under `key`.
    ///
    /// # Errors
    ///
    /// Fails if `key` is already taken.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        template: ActionTemplate,
    ) -> Result<Arc<ActionTemplate>, CatalogError> {
        let key = key.into();
        if self.templates.contains_key(&key) {
            return Err(CatalogError::Duplicate(key));
        }
        let template = Arc::new(template);
        self.templates.insert(key, Arc::clone(&template));
        Ok(template)
    }

    /// Builds a combo from registered members and registers it under `key`.
    ///
    /// # Errors
    ///
    /// Fails if a member is unknown, `key` is taken, or the combo is invalid.
    pub fn register_combo<S: AsRef<str>>(
        &mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        member_keys: &[S],
        override_range: Option<Range>,
    ) -> Result<Arc<ActionTemplate>, CatalogError> {
        let members = member_keys
            .iter()
            .map(|member| self.get(member.as_ref()).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        let combo = build_combo(&members, name, override_range)?;
        self.insert(key, combo)
    }

    /// Looks up a template by key.
    ///
    /// # Errors
    ///
    /// Fails if no template is registered under `key`.
    pub fn get(&self, key: &str) -> Result<&Arc<ActionTemplate>, CatalogError> {
        self.templates
            .get(key)
            .ok_or_else(|| CatalogError::UnknownAction(key.to_owned()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Returns an iterator over all registered keys, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<ActionTemplate>)> + '_ {
        self.templates.iter().map(|(key, t)| (key.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
