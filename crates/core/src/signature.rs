//! Parameter signatures
//!
//! A method's formal parameter list is normalized into an ordered
//! [`ParameterSignature`]: one `(name, mode)` pair per parameter, in
//! declaration order. Two signatures are *shape-equal* when their mode
//! sequences are equal; names are kept for diagnostics only.
//!
//! ## Extraction rules
//!
//! | Formal parameter        | Mode          |
//! |-------------------------|---------------|
//! | `name`                  | `Required`    |
//! | `name = default`        | `Optional`    |
//! | `*name`                 | `Rest`        |
//! | `name:` / `name: value` | `Keyword`     |
//! | `**name`                | `KeywordRest` |
//! | `&name`                 | `Block`       |
//!
//! Declaration order is preserved verbatim, never re-sorted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a parameter binds the arguments passed to a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterMode {
    /// Positional, no default
    Required,
    /// Positional with a default value
    Optional,
    /// Variadic collector of remaining positional arguments
    Rest,
    /// Trailing block / continuation parameter
    Block,
    /// Named keyword parameter
    Keyword,
    /// Collector of remaining keyword arguments
    KeywordRest,
}

impl ParameterMode {
    /// Short tag used in diagnostics (`req`, `opt`, `rest`, `block`, `key`, `keyrest`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterMode::Required => "req",
            ParameterMode::Optional => "opt",
            ParameterMode::Rest => "rest",
            ParameterMode::Block => "block",
            ParameterMode::Keyword => "key",
            ParameterMode::KeywordRest => "keyrest",
        }
    }
}

impl fmt::Display for ParameterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sigil in front of a formal parameter name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterPrefix {
    /// No sigil
    None,
    /// `*name`
    Splat,
    /// `**name`
    DoubleSplat,
    /// `&name`
    Ampersand,
}

/// One formal parameter as declared on a callable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalParameter {
    /// Parameter name
    pub name: String,
    /// Sigil in front of the name
    pub prefix: ParameterPrefix,
    /// Whether a default value was declared
    pub has_default: bool,
    /// Whether the parameter is passed by keyword
    pub keyword: bool,
}

impl FormalParameter {
    /// A plain positional parameter with no default
    pub fn plain(name: impl Into<String>) -> Self {
        FormalParameter {
            name: name.into(),
            prefix: ParameterPrefix::None,
            has_default: false,
            keyword: false,
        }
    }

    /// Mode this parameter normalizes to
    pub fn mode(&self) -> ParameterMode {
        match self.prefix {
            ParameterPrefix::Ampersand => ParameterMode::Block,
            ParameterPrefix::Splat => ParameterMode::Rest,
            ParameterPrefix::DoubleSplat => ParameterMode::KeywordRest,
            ParameterPrefix::None if self.keyword => ParameterMode::Keyword,
            ParameterPrefix::None if self.has_default => ParameterMode::Optional,
            ParameterPrefix::None => ParameterMode::Required,
        }
    }

    /// Parse one parameter from its textual form
    ///
    /// Accepts `name`, `name = default`, `*name`, `**name`, `&name`,
    /// `name:` and `name: default`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::malformed(text, "empty parameter"));
        }

        let (prefix, rest) = if let Some(rest) = text.strip_prefix("**") {
            (ParameterPrefix::DoubleSplat, rest)
        } else if let Some(rest) = text.strip_prefix('*') {
            (ParameterPrefix::Splat, rest)
        } else if let Some(rest) = text.strip_prefix('&') {
            (ParameterPrefix::Ampersand, rest)
        } else {
            (ParameterPrefix::None, text)
        };

        let mut param = FormalParameter::plain(rest.trim());

        if prefix == ParameterPrefix::None {
            let colon = rest.find(':');
            let equals = rest.find('=');
            match (colon, equals) {
                (Some(c), e) if e.map_or(true, |e| c < e) => {
                    param.name = rest[..c].trim().to_string();
                    param.keyword = true;
                    param.has_default = !rest[c + 1..].trim().is_empty();
                }
                (_, Some(e)) => {
                    if rest[e + 1..].trim().is_empty() {
                        return Err(Error::malformed(text, "missing default value"));
                    }
                    param.name = rest[..e].trim().to_string();
                    param.has_default = true;
                }
                (_, None) => {}
            }
        }
        param.prefix = prefix;

        if param.name.is_empty() {
            return Err(Error::malformed(text, "missing name"));
        }
        if !is_identifier(&param.name) {
            return Err(Error::malformed(text, "name is not an identifier"));
        }
        Ok(param)
    }
}

/// A named parameter with its normalized mode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Declared name
    pub name: String,
    /// Normalized mode
    pub mode: ParameterMode,
}

/// Ordered `(name, mode)` sequence describing a method's parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterSignature {
    params: Vec<Parameter>,
}

impl ParameterSignature {
    /// The empty signature (a method taking no parameters)
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a formal parameter list, preserving declaration order
    pub fn extract(formals: &[FormalParameter]) -> Self {
        ParameterSignature {
            params: formals
                .iter()
                .map(|formal| Parameter {
                    name: formal.name.clone(),
                    mode: formal.mode(),
                })
                .collect(),
        }
    }

    /// Parse a comma separated parameter list such as
    /// `"req, opt = 1, *rest, key:, **opts, &block"`
    ///
    /// Commas nested inside brackets or quotes of a default value do not
    /// split parameters. An empty or blank list is the empty signature.
    pub fn parse(list: &str) -> Result<Self> {
        if list.trim().is_empty() {
            return Ok(Self::new());
        }
        let formals = split_top_level(list)
            .into_iter()
            .map(FormalParameter::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::extract(&formals))
    }

    /// Append a parameter
    pub fn push(&mut self, name: impl Into<String>, mode: ParameterMode) {
        self.params.push(Parameter {
            name: name.into(),
            mode,
        });
    }

    /// Builder-style [`push`](Self::push)
    pub fn with(mut self, name: impl Into<String>, mode: ParameterMode) -> Self {
        self.push(name, mode);
        self
    }

    /// Parameter names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// Parameter modes in declaration order
    pub fn modes(&self) -> Vec<ParameterMode> {
        self.params.iter().map(|p| p.mode).collect()
    }

    /// Parameters in declaration order
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True for a method taking no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Shape equality: same modes in the same order, names ignored
    pub fn shape_eq(&self, other: &ParameterSignature) -> bool {
        self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.mode == b.mode)
    }
}

impl fmt::Display for ParameterSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match p.mode {
                ParameterMode::Required => write!(f, "{}", p.name)?,
                ParameterMode::Optional => write!(f, "{} = ...", p.name)?,
                ParameterMode::Rest => write!(f, "*{}", p.name)?,
                ParameterMode::Block => write!(f, "&{}", p.name)?,
                ParameterMode::Keyword => write!(f, "{}:", p.name)?,
                ParameterMode::KeywordRest => write!(f, "**{}", p.name)?,
            }
        }
        f.write_str(")")
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Split on commas that are not nested in brackets or quotes
fn split_top_level(list: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '(') | (None, '[') | (None, '{') => depth += 1,
            (None, ')') | (None, ']') | (None, '}') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                pieces.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&list[start..]);
    pieces
}
