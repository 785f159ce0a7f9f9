//! Template names.

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Identifier of one template unit.
///
/// A name is the path of the template file relative to the base directory,
/// exactly as it was written in a directive or passed by the caller. No
/// normalisation happens: `a.html` and `./a.html` are different names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashSet<TemplateName>` and `HashMap<TemplateName, _>` be queried with `&str`.
impl Borrow<str> for TemplateName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TemplateName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&TemplateName> for TemplateName {
    fn from(name: &TemplateName) -> Self {
        name.clone()
    }
}
