//! Stylesheet parser.
//!
//! A single-pass scanner over the source text. The grammar is small:
//!
//! ```text
//! rule        := selector-chain '{' declaration* '}'
//! chain       := simple (whitespace simple)*
//! simple      := tag-name | '.' class-name
//! declaration := property ':' value ';'
//! ```
//!
//! Malformed input degrades instead of aborting: a bad declaration is
//! recovered by scanning forward to the next `;` (or the closing `}`), a
//! bad rule by scanning to the next `}`. If neither delimiter exists before
//! end of input, parsing stops and the rules collected so far are
//! returned. Scan errors never escape this module; each recovery emits a
//! deduplicated warning.

use std::collections::HashMap;

use thiserror::Error;

use vireo_common::warning::warn_once;

use crate::selector::Selector;

/// A selector paired with its declarations.
///
/// The declaration map goes property name to raw (uncomputed) value; a
/// duplicate property keeps the last written value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// What the rule applies to.
    pub selector: Selector,
    /// Property name to raw value.
    pub declarations: HashMap<String, String>,
}

/// Internal scan failure; always recovered, never surfaced to callers.
#[derive(Debug, Error, PartialEq, Eq)]
enum ScanError {
    #[error("unexpected end of input")]
    Eof,
    #[error("expected '{0}'")]
    Expected(char),
    #[error("expected a property, value, or selector word")]
    EmptyWord,
}

/// Single-pass scanner over stylesheet text.
pub struct StylesheetParser {
    chars: Vec<char>,
    pos: usize,
}

impl StylesheetParser {
    /// Create a parser over the given source.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Parse the whole input into an ordered rule list.
    pub fn parse(&mut self) -> Vec<Rule> {
        let mut rules = Vec::new();
        loop {
            self.whitespace();
            if self.pos >= self.chars.len() {
                break;
            }
            match self.rule() {
                Ok(rule) => rules.push(rule),
                Err(err) => {
                    warn_once("CSS", &format!("skipping malformed rule: {err}"));
                    match self.ignore_until(&['}']) {
                        Some('}') => self.pos += 1,
                        _ => break,
                    }
                }
            }
        }
        rules
    }

    /// Parse a declaration body (without surrounding braces), as used for
    /// rule bodies and inline `style` attributes.
    pub fn body(&mut self) -> HashMap<String, String> {
        let mut pairs = HashMap::new();
        self.whitespace();
        while let Some(c) = self.peek() {
            if c == '}' {
                break;
            }
            match self.pair() {
                Ok((property, value)) => {
                    let _ = pairs.insert(property, value);
                    self.whitespace();
                    if self.literal(';').is_err() {
                        // Missing terminator: tolerated before `}` or EOF.
                        match self.ignore_until(&[';', '}']) {
                            Some(';') => self.pos += 1,
                            _ => break,
                        }
                    }
                }
                Err(err) => {
                    warn_once("CSS", &format!("skipping malformed declaration: {err}"));
                    match self.ignore_until(&[';', '}']) {
                        Some(';') => self.pos += 1,
                        _ => break,
                    }
                }
            }
            self.whitespace();
        }
        pairs
    }

    fn rule(&mut self) -> Result<Rule, ScanError> {
        let selector = self.selector()?;
        self.literal('{')?;
        let declarations = self.body();
        self.literal('}')?;
        Ok(Rule {
            selector,
            declarations,
        })
    }

    /// Parse a whitespace-separated selector chain, folding it into nested
    /// descendant selectors with the left-most word as the outermost
    /// ancestor.
    fn selector(&mut self) -> Result<Selector, ScanError> {
        let mut out = simple_selector(&self.word()?);
        self.whitespace();
        while let Some(c) = self.peek() {
            if c == '{' {
                break;
            }
            let descendant = simple_selector(&self.word()?);
            out = Selector::Descendant(Box::new(out), Box::new(descendant));
            self.whitespace();
        }
        Ok(out)
    }

    /// Parse a `property: value` pair. The property is lowercased.
    fn pair(&mut self) -> Result<(String, String), ScanError> {
        let property = self.word()?;
        self.whitespace();
        self.literal(':')?;
        self.whitespace();
        let value = self.word()?;
        Ok((property.to_lowercase(), value))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume a token word: alphanumerics plus `# - . % ' "`.
    fn word(&mut self) -> Result<String, ScanError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '#' | '-' | '.' | '%' | '\'' | '"') {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(if self.pos >= self.chars.len() {
                ScanError::Eof
            } else {
                ScanError::EmptyWord
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn literal(&mut self, expected: char) -> Result<(), ScanError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ScanError::Expected(expected)),
            None => Err(ScanError::Eof),
        }
    }

    /// Scan forward to the next occurrence of any stop character, leaving
    /// the cursor on it. Returns the character found, or `None` at EOF.
    fn ignore_until(&mut self, stops: &[char]) -> Option<char> {
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                return Some(c);
            }
            self.pos += 1;
        }
        None
    }
}

/// Interpret one selector word: a leading `.` makes it a class selector,
/// anything else a tag selector. Names are lowercased.
fn simple_selector(word: &str) -> Selector {
    match word.strip_prefix('.') {
        Some(class) => Selector::Class(class.to_lowercase()),
        None => Selector::Tag(word.to_lowercase()),
    }
}

/// Parse stylesheet source into an ordered rule list.
#[must_use]
pub fn parse_stylesheet(source: &str) -> Vec<Rule> {
    StylesheetParser::new(source).parse()
}

/// Parse an inline `style="..."` attribute with the declaration-body
/// grammar.
#[must_use]
pub fn parse_inline_style(source: &str) -> HashMap<String, String> {
    StylesheetParser::new(source).body()
}
