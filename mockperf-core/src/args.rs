//! Option Registry
//!
//! `ArgParser` accumulates named options with default values. The settings
//! object (`Args`) grows one field per registration and is handed out live,
//! without copying.
//!
//! No process arguments are ever parsed: the resolved settings are exactly the
//! registered defaults.

use crate::error::ArgError;
use crate::value::ArgValue;
use serde::Serialize;
use std::collections::BTreeMap;

/// Normalize an option name into a settings field name.
///
/// Strips one leading `--` and replaces every `-` with `_`. Never fails;
/// anything else in the name is kept as-is.
pub fn normalize_option_name(name: &str) -> String {
    let name = name.strip_prefix("--").unwrap_or(name);
    name.replace('-', "_")
}

/// Settings object exposing registered options by normalized name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Args {
    values: BTreeMap<String, ArgValue>,
}

impl Args {
    /// Create an empty settings object
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, if registered
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// Whether a field with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no option has been registered yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Boolean field
    pub fn get_bool(&self, name: &str) -> Result<bool, ArgError> {
        self.typed(name, "bool", ArgValue::as_bool)
    }

    /// Integer field
    pub fn get_int(&self, name: &str) -> Result<i64, ArgError> {
        self.typed(name, "int", ArgValue::as_int)
    }

    /// Float field (integer defaults are accepted)
    pub fn get_float(&self, name: &str) -> Result<f64, ArgError> {
        self.typed(name, "float", ArgValue::as_float)
    }

    /// String field
    pub fn get_str(&self, name: &str) -> Result<&str, ArgError> {
        self.typed(name, "str", ArgValue::as_str)
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        view: impl FnOnce(&'a ArgValue) -> Option<T>,
    ) -> Result<T, ArgError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ArgError::Missing(name.to_string()))?;
        view(value).ok_or_else(|| ArgError::TypeMismatch {
            name: name.to_string(),
            expected,
            found: value.type_name(),
        })
    }

    fn set(&mut self, name: String, value: ArgValue) {
        self.values.insert(name, value);
    }
}

/// Extra registration metadata.
///
/// Accepted for call-site compatibility with richer argument parsers; none of
/// it changes what gets registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgOptions {
    /// Help text
    pub help: Option<String>,
    /// Placeholder shown in usage
    pub metavar: Option<String>,
    /// Name of the expected value type
    pub type_hint: Option<String>,
    /// Allowed values
    pub choices: Vec<ArgValue>,
    /// Whether the option must be given
    pub required: bool,
    /// Parser action (e.g. "store_true")
    pub action: Option<String>,
}

impl ArgOptions {
    /// Empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set help text
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set metavar
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.metavar = Some(metavar.into());
        self
    }

    /// Set type hint
    pub fn type_hint(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }

    /// Set allowed values
    pub fn choices<T: Into<ArgValue>>(mut self, choices: impl IntoIterator<Item = T>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as required
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set parser action
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Registry of named, defaulted options
#[derive(Debug, Clone, Default)]
pub struct ArgParser {
    args: Args,
}

impl ArgParser {
    /// Create a registry with an empty settings object
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option. A later registration of the same normalized name
    /// overwrites the earlier default.
    pub fn register(&mut self, name: &str, default: impl Into<ArgValue>) {
        let field = normalize_option_name(name);
        let default = default.into();
        tracing::debug!(option = name, field = %field, default = %default, "register option");
        self.args.set(field, default);
    }

    /// Register an option with extra metadata; the metadata is ignored.
    pub fn register_with(&mut self, name: &str, default: impl Into<ArgValue>, options: ArgOptions) {
        tracing::trace!(option = name, ?options, "ignoring option metadata");
        self.register(name, default);
    }

    /// The settings object as currently populated
    pub fn resolved(&self) -> &Args {
        &self.args
    }
}
