use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

pub const BLOCK_DEFAULTS: &[&str] = &["describe", "it", "context", "test", "tape", "fixture", "serial"];
pub const FOCUS_DEFAULTS: &[&str] = &["only"];

/// Options object accepted by the rule. Absent keys fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOptions {
    #[serde(default)]
    pub block: Option<Vec<String>>,
    #[serde(default)]
    pub focus: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum OptionsError {
    Json(serde_json::Error),
    DuplicateItem { key: &'static str, item: String },
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::Json(err) => write!(f, "invalid rule options: {err}"),
            OptionsError::DuplicateItem { key, item } => {
                write!(f, "invalid rule options: \"{key}\" lists \"{item}\" more than once")
            }
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptionsError::Json(err) => Some(err),
            OptionsError::DuplicateItem { .. } => None,
        }
    }
}

impl From<serde_json::Error> for OptionsError {
    fn from(err: serde_json::Error) -> Self {
        OptionsError::Json(err)
    }
}

impl RuleOptions {
    /// Parse and validate an options object such as `{"block": ["it"], "focus": ["only"]}`.
    pub fn from_json_str(text: &str) -> Result<Self, OptionsError> {
        let options: RuleOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Both arrays must hold unique items.
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_unique("block", self.block.as_deref())?;
        check_unique("focus", self.focus.as_deref())?;
        Ok(())
    }

    pub fn block_set(&self) -> HashSet<String> {
        resolve(self.block.as_deref(), BLOCK_DEFAULTS)
    }

    pub fn focus_set(&self) -> HashSet<String> {
        resolve(self.focus.as_deref(), FOCUS_DEFAULTS)
    }
}

fn check_unique(key: &'static str, items: Option<&[String]>) -> Result<(), OptionsError> {
    let Some(items) = items else {
        return Ok(());
    };
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.as_str()) {
            return Err(OptionsError::DuplicateItem {
                key,
                item: item.clone(),
            });
        }
    }
    Ok(())
}

// An explicitly empty list stays empty; only a missing key means "use defaults".
fn resolve(configured: Option<&[String]>, defaults: &[&str]) -> HashSet<String> {
    match configured {
        Some(items) => items.iter().cloned().collect(),
        None => defaults.iter().map(|s| s.to_string()).collect(),
    }
}
