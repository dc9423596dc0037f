//! Streaming markup tokenizer.
//!
//! A cut-down tag/text state machine: it recognizes open tags with
//! attributes, close tags, self-closing tags, and text runs. Anything
//! opened with `<!` or `<?` (comments, doctypes, processing instructions)
//! is skipped to the next `>`. A `<` that does not start a tag is treated
//! as literal text rather than an error.

use strum_macros::Display;

use crate::token::Token;

/// The tokenizer state machine.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
enum TokenizerState {
    /// Consuming character data between tags.
    Data,
    /// Just consumed `<`.
    TagOpen,
    /// Just consumed `</`.
    EndTagOpen,
    /// Consuming a tag name.
    TagName,
    /// Between the tag name (or an attribute) and the next attribute.
    BeforeAttributeName,
    /// Consuming an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// Just consumed `=`, before the attribute value.
    BeforeAttributeValue,
    /// Consuming a double-quoted attribute value.
    AttributeValueDoubleQuoted,
    /// Consuming a single-quoted attribute value.
    AttributeValueSingleQuoted,
    /// Consuming an unquoted attribute value.
    AttributeValueUnquoted,
    /// After a quoted attribute value.
    AfterAttributeValueQuoted,
    /// Just consumed `/` before the closing `>`.
    SelfClosingStartTag,
    /// Skipping `<!...>` or `<?...>` to the next `>`.
    BogusMarkup,
}

/// Accumulates the pieces of the tag currently being tokenized.
#[derive(Debug, Default)]
struct TagBuilder {
    name: String,
    attrs: Vec<(String, Option<String>)>,
    attr_name: String,
    attr_value: String,
    closing: bool,
    self_closing: bool,
}

impl TagBuilder {
    /// Commit the attribute currently being built, with or without a value.
    fn commit_attr(&mut self, with_value: bool) {
        if self.attr_name.is_empty() {
            self.attr_value.clear();
            return;
        }
        let name = std::mem::take(&mut self.attr_name);
        let value = std::mem::take(&mut self.attr_value);
        let value = if with_value {
            Some(decode_entities(&value))
        } else {
            None
        };
        self.attrs.push((name, value));
    }
}

/// Streaming tag/text tokenizer.
pub struct MarkupTokenizer {
    input: Vec<char>,
    pos: usize,
    state: TokenizerState,
    tokens: Vec<Token>,
    text: String,
    tag: TagBuilder,
}

impl MarkupTokenizer {
    /// Create a tokenizer over the given source.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            pos: 0,
            state: TokenizerState::Data,
            tokens: Vec::new(),
            text: String::new(),
            tag: TagBuilder::default(),
        }
    }

    /// Run the state machine over the whole input.
    pub fn run(&mut self) {
        while self.pos < self.input.len() {
            let c = self.input[self.pos];
            self.pos += 1;
            self.step(c);
        }
        // EOF: flush pending text, drop any half-open tag.
        self.flush_text();
    }

    /// Consume the tokenizer and return the token stream.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn step(&mut self, c: char) {
        use TokenizerState::*;

        match self.state {
            Data => match c {
                '<' => {
                    self.flush_text();
                    self.state = TagOpen;
                }
                _ => self.text.push(c),
            },
            TagOpen => match c {
                '/' => {
                    self.tag = TagBuilder {
                        closing: true,
                        ..TagBuilder::default()
                    };
                    self.state = EndTagOpen;
                }
                '!' | '?' => self.state = BogusMarkup,
                c if c.is_ascii_alphabetic() => {
                    self.tag = TagBuilder::default();
                    self.tag.name.push(c.to_ascii_lowercase());
                    self.state = TagName;
                }
                // Not a tag after all: keep the `<` as literal text.
                _ => {
                    self.text.push('<');
                    self.state = Data;
                    self.step(c);
                }
            },
            EndTagOpen => match c {
                '>' => self.state = Data, // stray `</>`: ignored
                c if c.is_ascii_alphabetic() => {
                    self.tag.name.push(c.to_ascii_lowercase());
                    self.state = TagName;
                }
                _ => self.state = BogusMarkup,
            },
            TagName => match c {
                c if c.is_ascii_whitespace() => self.state = BeforeAttributeName,
                '/' => self.state = SelfClosingStartTag,
                '>' => self.emit_tag(),
                _ => self.tag.name.push(c.to_ascii_lowercase()),
            },
            BeforeAttributeName => match c {
                c if c.is_ascii_whitespace() => {}
                '/' => self.state = SelfClosingStartTag,
                '>' => self.emit_tag(),
                _ => {
                    self.tag.attr_name.push(c.to_ascii_lowercase());
                    self.state = AttributeName;
                }
            },
            AttributeName => match c {
                c if c.is_ascii_whitespace() => self.state = AfterAttributeName,
                '=' => self.state = BeforeAttributeValue,
                '>' => {
                    self.tag.commit_attr(false);
                    self.emit_tag();
                }
                '/' => {
                    self.tag.commit_attr(false);
                    self.state = SelfClosingStartTag;
                }
                _ => self.tag.attr_name.push(c.to_ascii_lowercase()),
            },
            AfterAttributeName => match c {
                c if c.is_ascii_whitespace() => {}
                '=' => self.state = BeforeAttributeValue,
                '>' => {
                    self.tag.commit_attr(false);
                    self.emit_tag();
                }
                '/' => {
                    self.tag.commit_attr(false);
                    self.state = SelfClosingStartTag;
                }
                _ => {
                    // Previous attribute had no value; start the next one.
                    self.tag.commit_attr(false);
                    self.tag.attr_name.push(c.to_ascii_lowercase());
                    self.state = AttributeName;
                }
            },
            BeforeAttributeValue => match c {
                c if c.is_ascii_whitespace() => {}
                '"' => self.state = AttributeValueDoubleQuoted,
                '\'' => self.state = AttributeValueSingleQuoted,
                '>' => {
                    self.tag.commit_attr(true);
                    self.emit_tag();
                }
                _ => {
                    self.tag.attr_value.push(c);
                    self.state = AttributeValueUnquoted;
                }
            },
            // Unescaped `<` and `>` inside quoted values are kept as-is.
            AttributeValueDoubleQuoted => match c {
                '"' => {
                    self.tag.commit_attr(true);
                    self.state = AfterAttributeValueQuoted;
                }
                _ => self.tag.attr_value.push(c),
            },
            AttributeValueSingleQuoted => match c {
                '\'' => {
                    self.tag.commit_attr(true);
                    self.state = AfterAttributeValueQuoted;
                }
                _ => self.tag.attr_value.push(c),
            },
            AttributeValueUnquoted => match c {
                c if c.is_ascii_whitespace() => {
                    self.tag.commit_attr(true);
                    self.state = BeforeAttributeName;
                }
                '>' => {
                    self.tag.commit_attr(true);
                    self.emit_tag();
                }
                _ => self.tag.attr_value.push(c),
            },
            AfterAttributeValueQuoted => match c {
                c if c.is_ascii_whitespace() => self.state = BeforeAttributeName,
                '/' => self.state = SelfClosingStartTag,
                '>' => self.emit_tag(),
                _ => {
                    self.state = BeforeAttributeName;
                    self.step(c);
                }
            },
            SelfClosingStartTag => match c {
                '>' => {
                    self.tag.self_closing = true;
                    self.emit_tag();
                }
                _ => {
                    self.state = BeforeAttributeName;
                    self.step(c);
                }
            },
            BogusMarkup => {
                if c == '>' {
                    self.state = Data;
                }
            }
        }
    }

    /// Emit the tag under construction and return to the data state.
    fn emit_tag(&mut self) {
        let tag = std::mem::take(&mut self.tag);
        if tag.name.is_empty() {
            self.state = TokenizerState::Data;
            return;
        }
        let token = if tag.closing {
            Token::CloseTag { name: tag.name }
        } else {
            Token::OpenTag {
                name: tag.name,
                attrs: tag.attrs,
                self_closing: tag.self_closing,
            }
        };
        self.tokens.push(token);
        self.state = TokenizerState::Data;
    }

    /// Emit buffered character data, if any.
    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.tokens.push(Token::Text(decode_entities(&text)));
        }
    }
}

/// Decode the handful of character references the viewer cares about.
///
/// Numeric references (`&#65;` / `&#x41;`) and the common named ones are
/// decoded; anything unrecognized is passed through literally.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c != '&' {
            out.push(c);
            continue;
        }
        // Scan forward for a terminating `;` within a small window.
        let rest = &text[start + 1..];
        let Some(end) = rest.find(';').filter(|&i| i <= 8) else {
            out.push('&');
            continue;
        };
        let name = &rest[..end];
        let decoded = match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => name.strip_prefix('#').and_then(|digits| {
                let code = digits
                    .strip_prefix(['x', 'X'])
                    .map_or_else(|| digits.parse().ok(), |hex| u32::from_str_radix(hex, 16).ok());
                code.and_then(char::from_u32)
            }),
        };
        match decoded {
            Some(d) => {
                out.push(d);
                // Skip the name and the `;`.
                for _ in 0..=end {
                    let _ = chars.next();
                }
            }
            None => out.push('&'),
        }
    }
    out
}
