//! Named-placeholder SQL templates
//!
//! Aggregates and other SQL fragments are described by templates such as
//! `%(function)s(%(distinct)s%(field)s)`. This module tokenizes those
//! templates and renders them against a set of named parameters. Every
//! rendering failure (stray `%`, unbound placeholder, colliding parameter
//! name) is reported from here, so callers composing parameters never need
//! their own validation.

use logos::Logos;

use crate::sql::error::{SqlError, SqlResult};

/// Span represents a byte range in the template source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Token with its span information
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateToken {
    pub kind: TemplateTokenKind,
    pub span: Span,
}

/// Pieces of a placeholder template
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum TemplateTokenKind {
    /// `%(name)s`
    #[regex(r"%\([A-Za-z_][A-Za-z0-9_]*\)s", placeholder_name)]
    Placeholder(String),

    /// `%%` renders as a single `%`
    #[token("%%")]
    Percent,

    #[regex(r"[^%]+", |lex| lex.slice().to_string())]
    Literal(String),
}

fn placeholder_name(lex: &mut logos::Lexer<TemplateTokenKind>) -> String {
    let slice = lex.slice();
    // Strip "%(" and ")s"
    slice[2..slice.len() - 2].to_string()
}

/// Tokenize a template, rejecting any `%` that does not start a placeholder
pub fn tokenize_template(template: &str) -> SqlResult<Vec<TemplateToken>> {
    let mut lexer = TemplateTokenKind::lexer(template);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        match result {
            Ok(kind) => tokens.push(TemplateToken {
                kind,
                span: Span::new(range.start, range.end),
            }),
            Err(()) => {
                return Err(SqlError::MalformedTemplate {
                    template: template.to_string(),
                    position: range.start,
                })
            }
        }
    }

    Ok(tokens)
}

/// Ordered set of named template parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateParams {
    entries: Vec<(String, String)>,
}

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a parameter, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Bind a parameter that must not already be bound
    pub fn insert_unique(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> SqlResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SqlError::ConflictingParameter(name));
        }
        self.entries.push((name, value.into()));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = TemplateParams::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Render a template against a parameter set
pub fn render_template(template: &str, params: &TemplateParams) -> SqlResult<String> {
    let tokens = tokenize_template(template)?;
    let mut out = String::with_capacity(template.len());

    for token in tokens {
        match token.kind {
            TemplateTokenKind::Literal(text) => out.push_str(&text),
            TemplateTokenKind::Percent => out.push('%'),
            TemplateTokenKind::Placeholder(name) => match params.get(&name) {
                Some(value) => out.push_str(value),
                None => {
                    return Err(SqlError::MissingParameter {
                        name,
                        template: template.to_string(),
                    })
                }
            },
        }
    }

    Ok(out)
}
