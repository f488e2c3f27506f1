//! Field expressions.
//!
//! Visibility, enablement and default values of fields are written as short
//! prefixed directives:
//!
//! - `val:<literal>` - a constant (`val:1`, `val:0`, `val:F`)
//! - `exp:<condition>` - a condition over `{placeholders}`, e.g.
//!   `exp:{pagestate} <> 'FILTER' and {status} = 'A'`
//!
//! Placeholders resolve to the current page state, user values, then form values.
//! Conditions support quoted strings, numbers, bare words, comparison operators
//! (`=`, `<>`, `!=`, `>`, `<`, `>=`, `<=`), `and`, `or`, `not` and parentheses.

use crate::dictionary::{value_of, FormElementField, Values};
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub const VALUE_PREFIX: &str = "val:";
pub const EXPRESSION_PREFIX: &str = "exp:";

/// The situation a form is rendered in
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PageState {
    #[default]
    List,
    View,
    Insert,
    Update,
    Filter,
    Import,
    Delete,
}

impl PageState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageState::List => "LIST",
            PageState::View => "VIEW",
            PageState::Insert => "INSERT",
            PageState::Update => "UPDATE",
            PageState::Filter => "FILTER",
            PageState::Import => "IMPORT",
            PageState::Delete => "DELETE",
        }
    }

    /// Parse a state name, ignoring case
    pub fn parse(name: &str) -> Option<PageState> {
        let state = match name.to_ascii_uppercase().as_str() {
            "LIST" => PageState::List,
            "VIEW" => PageState::View,
            "INSERT" => PageState::Insert,
            "UPDATE" => PageState::Update,
            "FILTER" => PageState::Filter,
            "IMPORT" => PageState::Import,
            "DELETE" => PageState::Delete,
            _ => return None,
        };
        Some(state)
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values available to expressions while rendering
#[derive(Debug, Clone, Default)]
pub struct ExpressionOptions {
    /// Values supplied by the caller (e.g. the logged user), taking precedence over form values
    pub user_values: Values,
    pub form_values: Values,
    pub page_state: PageState,
}

impl ExpressionOptions {
    pub fn new(user_values: &Values, form_values: Values, page_state: PageState) -> Self {
        Self {
            user_values: user_values.clone(),
            form_values,
            page_state,
        }
    }
}

/// Evaluates field expressions against [`ExpressionOptions`]
#[derive(Debug, Clone, Copy)]
pub struct ExpressionManager<'a> {
    options: &'a ExpressionOptions,
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("valid placeholder regex"))
}

impl<'a> ExpressionManager<'a> {
    pub fn new(options: &'a ExpressionOptions) -> Self {
        Self { options }
    }

    fn lookup(&self, name: &str) -> Option<String> {
        if name.eq_ignore_ascii_case("pagestate") {
            return Some(self.options.page_state.as_str().to_string());
        }

        value_of(&self.options.user_values, name)
            .or_else(|| value_of(&self.options.form_values, name))
            .map(str::to_string)
    }

    /// Replace `{name}` placeholders with their values.
    ///
    /// With `quote` set, values become SQL-style string literals unless the
    /// placeholder is already enclosed in single quotes. Unknown names resolve to
    /// an empty value.
    pub fn parse_placeholders(&self, text: &str, quote: bool) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            let value = self.lookup(caps[1].trim()).unwrap_or_default();

            out.push_str(&text[last..whole.start()]);
            if quote {
                let already_quoted = text[..whole.start()].ends_with('\'')
                    && text[whole.end()..].starts_with('\'');
                let escaped = value.replace('\'', "''");
                if already_quoted {
                    out.push_str(&escaped);
                } else {
                    out.push('\'');
                    out.push_str(&escaped);
                    out.push('\'');
                }
            } else {
                out.push_str(&value);
            }
            last = whole.end();
        }

        out.push_str(&text[last..]);
        out
    }

    /// Evaluate a boolean directive; empty expressions are true
    pub fn get_bool(&self, expression: &str, field_name: &str) -> Result<bool> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Ok(true);
        }

        let invalid = |reason: String| Error::Expression {
            field: field_name.to_string(),
            reason,
        };

        if let Some(literal) = strip_prefix_ignore_case(expression, VALUE_PREFIX) {
            return truthiness(literal.trim()).ok_or_else(|| {
                invalid(format!("'{}' is not a boolean value", literal.trim()))
            });
        }

        if let Some(condition) = strip_prefix_ignore_case(expression, EXPRESSION_PREFIX) {
            let parsed = self.parse_placeholders(condition, true);
            let value = evaluate(&parsed).map_err(|e| invalid(format!("{} in \"{}\"", e, parsed)))?;
            return value
                .as_bool()
                .ok_or_else(|| invalid(format!("\"{}\" does not evaluate to a boolean", parsed)));
        }

        Err(invalid(format!("unknown expression \"{}\"", expression)))
    }

    pub fn is_visible(&self, field: &FormElementField) -> Result<bool> {
        self.get_bool(&field.visible_expression, &field.name)
    }

    pub fn is_enabled(&self, field: &FormElementField) -> Result<bool> {
        self.get_bool(&field.enable_expression, &field.name)
    }

    /// Resolve the default value of a field, if one is configured
    pub fn get_default_value(&self, field: &FormElementField) -> Result<Option<String>> {
        let expression = match field.default_value.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(e) => e,
        };

        if let Some(literal) = strip_prefix_ignore_case(expression, VALUE_PREFIX) {
            return Ok(Some(literal.to_string()));
        }

        if let Some(condition) = strip_prefix_ignore_case(expression, EXPRESSION_PREFIX) {
            let parsed = self.parse_placeholders(condition, true);
            let value = evaluate(&parsed).map_err(|e| Error::Expression {
                field: field.name.clone(),
                reason: format!("{} in \"{}\"", e, parsed),
            })?;
            return Ok(Some(match value {
                Value::Bool(b) => if b { "1" } else { "0" }.to_string(),
                Value::Text(t) => t,
            }));
        }

        Err(Error::Expression {
            field: field.name.clone(),
            reason: format!("unknown default value \"{}\"", expression),
        })
    }
}

fn strip_prefix_ignore_case<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    match text.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&text[prefix.len()..]),
        _ => None,
    }
}

fn truthiness(literal: &str) -> Option<bool> {
    match literal.to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Result of evaluating a condition
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Text(t) => truthiness(t),
        }
    }

    fn as_text(&self) -> String {
        match self {
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => "0".to_string(),
            Value::Text(t) => t.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CmpOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Cmp(CmpOp),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> std::result::Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '\'' => {
                let mut text = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err("unterminated string".to_string()),
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            text.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(ch) => {
                            text.push(*ch);
                            i += 1;
                        }
                    }
                }
                tokens.push(Token::Text(text));
            }
            '=' => {
                tokens.push(Token::Cmp(CmpOp::Eq));
                i += if chars.get(i + 1) == Some(&'=') { 2 } else { 1 };
            }
            '!' if chars.get(i + 1) == Some(&'=') => {
                tokens.push(Token::Cmp(CmpOp::Ne));
                i += 2;
            }
            '<' => match chars.get(i + 1) {
                Some('>') => {
                    tokens.push(Token::Cmp(CmpOp::Ne));
                    i += 2;
                }
                Some('=') => {
                    tokens.push(Token::Cmp(CmpOp::Le));
                    i += 2;
                }
                _ => {
                    tokens.push(Token::Cmp(CmpOp::Lt));
                    i += 1;
                }
            },
            '>' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::Cmp(CmpOp::Ge));
                    i += 2;
                } else {
                    tokens.push(Token::Cmp(CmpOp::Gt));
                    i += 1;
                }
            }
            _ => {
                let start = i;
                while i < chars.len()
                    && !chars[i].is_whitespace()
                    && !matches!(chars[i], '(' | ')' | '\'' | '=' | '<' | '>' | '!')
                {
                    i += 1;
                }
                if start == i {
                    return Err(format!("unexpected character '{}'", c));
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(match word.to_ascii_lowercase().as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => Token::Text(word),
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn or(&mut self) -> std::result::Result<Value, String> {
        let mut left = self.and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.and()?;
            left = Value::Bool(to_bool(&left)? || to_bool(&right)?);
        }
        Ok(left)
    }

    fn and(&mut self) -> std::result::Result<Value, String> {
        let mut left = self.not()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.not()?;
            left = Value::Bool(to_bool(&left)? && to_bool(&right)?);
        }
        Ok(left)
    }

    fn not(&mut self) -> std::result::Result<Value, String> {
        if self.peek() == Some(&Token::Not) {
            self.pos += 1;
            let value = self.not()?;
            return Ok(Value::Bool(!to_bool(&value)?));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> std::result::Result<Value, String> {
        let left = self.primary()?;
        if let Some(Token::Cmp(op)) = self.peek().cloned() {
            self.pos += 1;
            let right = self.primary()?;
            return Ok(Value::Bool(compare(&left.as_text(), op, &right.as_text())));
        }
        Ok(left)
    }

    fn primary(&mut self) -> std::result::Result<Value, String> {
        match self.next() {
            Some(Token::LParen) => {
                let value = self.or()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err("missing ')'".to_string()),
                }
            }
            Some(Token::Text(text)) => Ok(Value::Text(text)),
            Some(token) => Err(format!("unexpected {:?}", token)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

fn to_bool(value: &Value) -> std::result::Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("{:?} is not a boolean", value))
}

fn compare(left: &str, op: CmpOp, right: &str) -> bool {
    use std::cmp::Ordering;

    let ordering = match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.to_lowercase().cmp(&right.to_lowercase()),
    };

    match op {
        CmpOp::Eq => ordering == Ordering::Equal,
        CmpOp::Ne => ordering != Ordering::Equal,
        CmpOp::Gt => ordering == Ordering::Greater,
        CmpOp::Lt => ordering == Ordering::Less,
        CmpOp::Ge => ordering != Ordering::Less,
        CmpOp::Le => ordering != Ordering::Greater,
    }
}

/// Evaluate a condition whose placeholders were already substituted
pub fn evaluate(condition: &str) -> std::result::Result<Value, String> {
    let tokens = tokenize(condition)?;
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.or()?;
    if parser.pos < parser.tokens.len() {
        return Err(format!("unexpected {:?}", parser.tokens[parser.pos]));
    }
    Ok(value)
}
