//! Page templates and the binding step
//!
//! A template is fixed HTML with `{{ field }}` placeholders. Binding checks
//! that every placeholder has a value before anything is substituted, so a
//! [`BoundTemplate`] always renders completely. Values are inserted verbatim;
//! record providers are trusted (build-controlled file or internal catalog).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::record::Bindings;
use crate::{Error, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

const PROJECT_PAGE_HTML: &str = include_str!("../templates/project_page.html");
const RELEASE_PAGE_HTML: &str = include_str!("../templates/release_page.html");

/// Templates compiled into the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTemplate {
    /// Catalog-backed page: name, source, win32, version, lastdate
    ProjectPage,
    /// Generated-file page: source, lastdate
    ReleasePage,
}

impl BuiltinTemplate {
    pub fn source_text(self) -> &'static str {
        match self {
            BuiltinTemplate::ProjectPage => PROJECT_PAGE_HTML,
            BuiltinTemplate::ReleasePage => RELEASE_PAGE_HTML,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinTemplate::ProjectPage => "project_page",
            BuiltinTemplate::ReleasePage => "release_page",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// Parsed page template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    required: BTreeSet<String>,
}

impl Template {
    /// Parse template text
    ///
    /// Fails on an unterminated `{{` or a placeholder whose name is empty or
    /// contains characters other than ASCII alphanumerics, `_`, `-` and `.`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut required = BTreeSet::new();
        let mut rest = text;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }

            let inner = &rest[start + OPEN.len()..];
            let end = inner.find(CLOSE).ok_or_else(|| Error::TemplateSyntax {
                offset: offset + start,
                message: "unterminated placeholder".to_string(),
            })?;

            let name = inner[..end].trim();
            if !is_valid_field_name(name) {
                return Err(Error::TemplateSyntax {
                    offset: offset + start,
                    message: format!("invalid placeholder name '{}'", name),
                });
            }

            required.insert(name.to_string());
            segments.push(Segment::Field(name.to_string()));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            rest = &rest[consumed..];
            offset += consumed;
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments, required })
    }

    /// Parse a built-in template
    pub fn builtin(which: BuiltinTemplate) -> Result<Self> {
        Self::parse(which.source_text())
    }

    /// Read and parse a template file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Field names this template needs a value for
    pub fn required_fields(&self) -> &BTreeSet<String> {
        &self.required
    }

    /// Validate `bindings` against the required field set
    ///
    /// Reports the first missing field in name order. Bindings the template
    /// never references are ignored.
    pub fn bind<'a>(&'a self, bindings: &'a Bindings) -> Result<BoundTemplate<'a>> {
        if let Some(missing) = self.required.iter().find(|f| !bindings.contains(f)) {
            return Err(Error::MissingField(missing.clone()));
        }
        Ok(BoundTemplate {
            template: self,
            bindings,
        })
    }
}

/// A template paired with a complete set of bindings
#[derive(Debug)]
pub struct BoundTemplate<'a> {
    template: &'a Template,
    bindings: &'a Bindings,
}

impl BoundTemplate<'_> {
    /// Substitute every placeholder and return the document
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.estimated_len());
        for segment in &self.template.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                // Presence was checked in Template::bind
                Segment::Field(name) => out.push_str(self.bindings.get(name).unwrap_or_default()),
            }
        }
        out
    }

    fn estimated_len(&self) -> usize {
        self.template
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.len(),
                Segment::Field(name) => self.bindings.get(name).map_or(0, str::len),
            })
            .sum()
    }
}

fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
