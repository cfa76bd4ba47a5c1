//! Message template compilation and rendering.
//!
//! A template string is tokenized once into literal text and `{name}`
//! placeholders. Rendering walks the tokens and never rescans the source.
//!
//! Brace rules:
//! - `{name}` where `name` is `[A-Za-z_][A-Za-z0-9_]*` is a placeholder;
//! - `{{` and `}}` produce a single literal brace;
//! - any other brace is copied through unchanged.

use std::collections::HashSet;

use tenant_settings_sdk::{EmailTemplate, RenderedMessage, TemplateVariables};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Missing template variable '{name}'")]
    MissingVariable { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Placeholder(String),
}

/// Tokenize a single template string.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(idx) = rest.find(['{', '}']) {
        literal.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if let Some(after) = tail.strip_prefix("{{") {
            literal.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            literal.push('}');
            rest = after;
            continue;
        }
        if let Some(name) = tail.strip_prefix('{').and_then(placeholder_name) {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Placeholder(name.to_owned()));
            // opening brace + name + closing brace
            rest = &tail[name.len() + 2..];
            continue;
        }

        // Stray brace: keep it as text.
        literal.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Returns the identifier if `s` starts with `identifier}`.
fn placeholder_name(s: &str) -> Option<&str> {
    let end = s.find('}')?;
    let name = &s[..end];
    let mut chars = name.chars();
    let first = chars.next()?;
    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

fn render_tokens(tokens: &[Token], variables: &TemplateVariables) -> Result<String, TemplateError> {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder(name) => {
                let value = variables
                    .get(name)
                    .ok_or_else(|| TemplateError::MissingVariable { name: name.clone() })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

/// Pre-tokenized subject and body of an [`EmailTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    subject: Vec<Token>,
    body: Vec<Token>,
}

impl CompiledTemplate {
    #[must_use]
    pub fn compile(template: &EmailTemplate) -> Self {
        Self {
            subject: tokenize(&template.subject),
            body: tokenize(&template.body),
        }
    }

    /// Substitute `variables` into subject and body.
    ///
    /// Variables not referenced by the template are ignored. An empty value is
    /// a valid value.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingVariable`] for the first placeholder
    /// (subject before body) that has no entry in `variables`.
    pub fn render(&self, variables: &TemplateVariables) -> Result<RenderedMessage, TemplateError> {
        Ok(RenderedMessage {
            subject: render_tokens(&self.subject, variables)?,
            body: render_tokens(&self.body, variables)?,
        })
    }

    /// Distinct placeholder names in order of first appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.subject
            .iter()
            .chain(&self.body)
            .filter_map(|token| match token {
                Token::Placeholder(name) => Some(name.as_str()),
                Token::Literal(_) => None,
            })
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

/// Compile and render in one step.
///
/// # Errors
///
/// See [`CompiledTemplate::render`].
pub fn render(
    template: &EmailTemplate,
    variables: &TemplateVariables,
) -> Result<RenderedMessage, TemplateError> {
    CompiledTemplate::compile(template).render(variables)
}

/// Format items as a numbered list, one per line.
///
/// Used to build list-valued variables such as `missing_documents_list`.
#[must_use]
pub fn numbered_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "None - all documents received!".to_owned();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
