//! URI templates with a single free variable.
//!
//! Supports the `scheme://prefix{variable}suffix` shape used by
//! templated resources. Matching extracts the variable's value;
//! expansion substitutes one back in.

use crate::handler::ResourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    pattern: String,
    prefix: String,
    suffix: String,
    variable: String,
}

impl UriTemplate {
    /// Parses a pattern containing exactly one `{variable}` placeholder.
    pub fn parse(pattern: &str) -> Result<Self, ResourceError> {
        let open = pattern
            .find('{')
            .ok_or_else(|| invalid(pattern, "expected one {variable} placeholder"))?;
        let close = pattern[open..]
            .find('}')
            .map(|offset| open + offset)
            .ok_or_else(|| invalid(pattern, "unterminated placeholder"))?;
        let variable = &pattern[open + 1..close];
        if variable.is_empty() {
            return Err(invalid(pattern, "placeholder has no name"));
        }
        let suffix = &pattern[close + 1..];
        if suffix.contains('{') || suffix.contains('}') {
            return Err(invalid(pattern, "more than one placeholder"));
        }
        Ok(Self {
            pattern: pattern.to_string(),
            prefix: pattern[..open].to_string(),
            suffix: suffix.to_string(),
            variable: variable.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Matches a concrete URI against the template, returning the value
    /// of the variable on success.
    pub fn match_uri(&self, uri: &str) -> Option<String> {
        let rest = uri.strip_prefix(self.prefix.as_str())?;
        let value = rest.strip_suffix(self.suffix.as_str())?;
        Some(value.to_string())
    }

    /// Substitutes a value for the variable, producing a concrete URI.
    pub fn expand(&self, value: &str) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

fn invalid(pattern: &str, reason: &str) -> ResourceError {
    ResourceError::InvalidUri(format!("{}: {}", pattern, reason))
}
