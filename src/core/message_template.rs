//! Message template parsing and rendering
//!
//! Template syntax:
//!
//! | text            | meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `{Name}`        | property `Name`, default capture           |
//! | `{Name:format}` | format specifier passed to the renderer    |
//! | `{@Name}`       | capture the value's fields as a record     |
//! | `{$Name}`       | capture the value as a string              |
//! | `{0}`, `{1}`    | positional properties                      |
//! | `{{`, `}}`      | literal braces                             |
//!
//! Parsing never fails. Anything that is not a well-formed property token
//! is kept as literal text.

use super::property_value::LogEventProperty;

/// How an argument bound to a property token is captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureHint {
    #[default]
    Default,
    /// `@` prefix
    Structure,
    /// `$` prefix
    Stringify,
}

/// A `{...}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyToken {
    name: String,
    position: Option<usize>,
    format: Option<String>,
    hint: CaptureHint,
    raw_text: String,
}

impl PropertyToken {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index for positional tokens such as `{0}`
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn hint(&self) -> CaptureHint {
        self.hint
    }

    /// The token exactly as written, braces included
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Text(String),
    Property(PropertyToken),
}

/// A parsed, immutable message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    tokens: Vec<TemplateToken>,
}

impl MessageTemplate {
    /// Parse template text. Malformed tokens degrade to literal text.
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: tokenize(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    pub fn property_tokens(&self) -> impl Iterator<Item = &PropertyToken> {
        self.tokens.iter().filter_map(|t| match t {
            TemplateToken::Property(p) => Some(p),
            TemplateToken::Text(_) => None,
        })
    }

    /// True when the template has property tokens and all of them are positional
    pub fn is_positional(&self) -> bool {
        let mut tokens = self.property_tokens().peekable();
        tokens.peek().is_some() && tokens.all(|p| p.position.is_some())
    }

    /// Render the message, substituting property values.
    ///
    /// Tokens without a matching property are written as their raw text.
    pub fn render(&self, properties: &[LogEventProperty]) -> String {
        let mut out = String::with_capacity(self.text.len());
        for token in &self.tokens {
            match token {
                TemplateToken::Text(text) => out.push_str(text),
                TemplateToken::Property(p) => {
                    match properties.iter().find(|prop| prop.name() == p.name) {
                        Some(prop) => prop.value().render(p.format(), &mut out),
                        None => out.push_str(&p.raw_text),
                    }
                }
            }
        }
        out
    }
}

fn tokenize(text: &str) -> Vec<TemplateToken> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    let mut run_start = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                literal.push_str(&text[run_start..i]);
                if bytes.get(i + 1) == Some(&b'{') {
                    literal.push('{');
                    i += 2;
                } else {
                    // the token ends at the next brace of either kind
                    let end = bytes[i + 1..]
                        .iter()
                        .position(|&b| b == b'{' || b == b'}')
                        .map(|offset| i + 1 + offset);
                    match end {
                        Some(end) if bytes[end] == b'}' => {
                            let raw = &text[i..=end];
                            match parse_property(&text[i + 1..end], raw) {
                                Some(property) => {
                                    if !literal.is_empty() {
                                        tokens.push(TemplateToken::Text(std::mem::take(&mut literal)));
                                    }
                                    tokens.push(TemplateToken::Property(property));
                                }
                                None => literal.push_str(raw),
                            }
                            i = end + 1;
                        }
                        Some(next_open) => {
                            literal.push_str(&text[i..next_open]);
                            i = next_open;
                        }
                        None => {
                            literal.push_str(&text[i..]);
                            i = bytes.len();
                        }
                    }
                }
                run_start = i;
            }
            b'}' => {
                literal.push_str(&text[run_start..i]);
                literal.push('}');
                i += if bytes.get(i + 1) == Some(&b'}') { 2 } else { 1 };
                run_start = i;
            }
            _ => i += 1,
        }
    }
    literal.push_str(&text[run_start..]);
    if !literal.is_empty() {
        tokens.push(TemplateToken::Text(literal));
    }
    tokens
}

fn parse_property(content: &str, raw: &str) -> Option<PropertyToken> {
    let (hint, rest) = match content.as_bytes().first()? {
        b'@' => (CaptureHint::Structure, &content[1..]),
        b'$' => (CaptureHint::Stringify, &content[1..]),
        _ => (CaptureHint::Default, content),
    };

    let (name, format) = match rest.split_once(':') {
        Some((name, format)) if !format.is_empty() => (name, Some(format.to_string())),
        Some(_) => return None,
        None => (rest, None),
    };

    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }

    let position = if name.bytes().all(|b| b.is_ascii_digit()) {
        Some(name.parse().ok()?)
    } else {
        None
    };

    Some(PropertyToken {
        name: name.to_string(),
        position,
        format,
        hint,
        raw_text: raw.to_string(),
    })
}
