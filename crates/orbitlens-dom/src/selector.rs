//! CSS selector subset used by page adapters.
//!
//! Supported grammar:
//!
//! ```text
//! list      := complex ("," complex)*
//! complex   := compound ((" " | ">") compound)*
//! compound  := (tag | "*")? ("#" ident | "." ident | "[" attr "]")*
//! attr      := ident (op value)?      op ∈ { =  ~=  ^=  $=  *= }
//! ```
//!
//! Matching is right-to-left against the whole document, like
//! `Element.querySelector`: ancestors outside the query scope may satisfy
//! the left-hand compounds.

use std::fmt;
use std::str::FromStr;

use crate::{Document, DomError, NodeId};

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeTest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeTest {
    name: String,
    op: Option<(AttributeOp, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeOp {
    Equals,
    Includes,
    Prefix,
    Suffix,
    Substring,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let invalid = |reason: String| DomError::InvalidSelector {
            selector: source.to_string(),
            reason,
        };

        let mut alternatives = Vec::new();
        for part in split_top_level(source) {
            let mut parser = Parser::new(part);
            let complex = parser.parse_complex().map_err(invalid)?;
            alternatives.push(complex);
        }
        if alternatives.is_empty() {
            return Err(invalid("empty selector".to_string()));
        }

        Ok(Self {
            source: source.trim().to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `node` matches any alternative of this list.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches_at(doc, node, complex.compounds.len() - 1))
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl ComplexSelector {
    fn matches_at(&self, doc: &Document, node: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(doc, node) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.combinators[idx - 1] {
            Combinator::Child => doc
                .parent(node)
                .is_some_and(|parent| self.matches_at(doc, parent, idx - 1)),
            Combinator::Descendant => doc
                .ancestors(node)
                .any(|ancestor| self.matches_at(doc, ancestor, idx - 1)),
        }
    }
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(n) = doc.node(node) else {
            return false;
        };
        let Some(tag_name) = n.tag_name() else {
            return false;
        };

        if let Some(ref tag) = self.tag {
            if tag != tag_name {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if n.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| n.has_class(c)) {
            return false;
        }

        self.attributes.iter().all(|test| {
            let Some(value) = n.attribute(&test.name) else {
                return false;
            };
            match &test.op {
                None => true,
                Some((AttributeOp::Equals, expected)) => value == expected,
                Some((AttributeOp::Includes, expected)) => {
                    value.split_ascii_whitespace().any(|v| v == expected)
                }
                Some((AttributeOp::Prefix, expected)) => {
                    !expected.is_empty() && value.starts_with(expected.as_str())
                }
                Some((AttributeOp::Suffix, expected)) => {
                    !expected.is_empty() && value.ends_with(expected.as_str())
                }
                Some((AttributeOp::Substring, expected)) => {
                    !expected.is_empty() && value.contains(expected.as_str())
                }
            }
        })
    }
}

/// Split on commas that are not inside brackets or quotes.
fn split_top_level(source: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&source[start..]);
    parts
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    /// Returns true when any whitespace was consumed.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, String> {
        let mut compounds = Vec::new();
        let mut combinators = Vec::new();

        self.skip_ws();
        loop {
            compounds.push(self.parse_compound()?);

            let had_ws = self.skip_ws();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.bump();
                    self.skip_ws();
                    combinators.push(Combinator::Child);
                }
                Some(_) if had_ws => combinators.push(Combinator::Descendant),
                Some(c) => return Err(format!("unexpected '{}'", c)),
            }
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, String> {
        let mut compound = Compound::default();
        let mut matched_any = false;

        match self.peek() {
            Some('*') => {
                self.bump();
                matched_any = true;
            }
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
                matched_any = true;
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
            matched_any = true;
        }

        if !matched_any {
            return Err(match self.peek() {
                Some(c) => format!("expected selector, found '{}'", c),
                None => "expected selector, found end of input".to_string(),
            });
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<AttributeTest, String> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();

        let op = match self.bump() {
            Some(']') => return Ok(AttributeTest { name, op: None }),
            Some('=') => AttributeOp::Equals,
            Some(c @ ('~' | '^' | '$' | '*')) => {
                if self.bump() != Some('=') {
                    return Err(format!("expected '=' after '{}'", c));
                }
                match c {
                    '~' => AttributeOp::Includes,
                    '^' => AttributeOp::Prefix,
                    '$' => AttributeOp::Suffix,
                    _ => AttributeOp::Substring,
                }
            }
            Some(c) => return Err(format!("unexpected '{}' in attribute selector", c)),
            None => return Err("unterminated attribute selector".to_string()),
        };

        self.skip_ws();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some(c) if c == q => break,
                        Some(c) => value.push(c),
                        None => return Err("unterminated string".to_string()),
                    }
                }
                value
            }
            _ => {
                let mut value = String::new();
                while let Some(c) = self.peek() {
                    if c == ']' || c.is_whitespace() {
                        break;
                    }
                    value.push(c);
                    self.pos += 1;
                }
                if value.is_empty() {
                    return Err("missing attribute value".to_string());
                }
                value
            }
        };

        self.skip_ws();
        if self.bump() != Some(']') {
            return Err("expected ']'".to_string());
        }

        Ok(AttributeTest {
            name,
            op: Some((op, value)),
        })
    }

    fn ident(&mut self) -> Result<String, String> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_char(c) {
                break;
            }
            ident.push(c);
            self.pos += 1;
        }
        if ident.is_empty() {
            return Err(match self.peek() {
                Some(c) => format!("expected identifier, found '{}'", c),
                None => "expected identifier, found end of input".to_string(),
            });
        }
        Ok(ident)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
