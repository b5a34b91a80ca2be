use crate::normalize::escape_for_match;
use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// What to remove (or replace) inside a filename.
///
/// Both kinds match case-insensitively. Escaping lives here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum MatchSpec {
    /// Typed by the user, matched verbatim
    Literal(String),
    /// Inferred common prefix; each `_` also matches a space or hyphen
    Derived(String),
}

impl MatchSpec {
    pub fn text(&self) -> &str {
        match self {
            Self::Literal(text) | Self::Derived(text) => text,
        }
    }

    /// An empty spec matches nothing
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    pub fn pattern_source(&self) -> String {
        match self {
            Self::Literal(text) => regex::escape(text),
            Self::Derived(text) => escape_for_match(text),
        }
    }

    pub fn regex(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.pattern_source())
            .case_insensitive(true)
            .build()
    }

    /// Replace every match with `replacement`, taken literally (`$1` stays `$1`).
    pub fn replace_all<'a>(
        &self,
        text: &'a str,
        replacement: &str,
    ) -> Result<Cow<'a, str>, regex::Error> {
        if self.is_empty() {
            return Ok(Cow::Borrowed(text));
        }
        Ok(self.regex()?.replace_all(text, NoExpand(replacement)))
    }

    pub fn remove_all<'a>(&self, text: &'a str) -> Result<Cow<'a, str>, regex::Error> {
        self.replace_all(text, "")
    }
}

/// A [`MatchSpec`] with its regex built once, for use across a directory.
#[derive(Debug, Clone)]
pub struct CompiledSpec {
    spec: MatchSpec,
    regex: Option<Regex>,
}

impl CompiledSpec {
    pub fn new(spec: MatchSpec) -> Result<Self, regex::Error> {
        let regex = if spec.is_empty() {
            None
        } else {
            Some(spec.regex()?)
        };
        Ok(Self { spec, regex })
    }

    pub fn spec(&self) -> &MatchSpec {
        &self.spec
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        match &self.regex {
            Some(regex) => regex.replace_all(text, NoExpand(replacement)).into_owned(),
            None => text.to_string(),
        }
    }
}
