//! Expression resolution boundary
//!
//! Widget properties, transformers and visibility flags hold either literals
//! or `{{ … }}` expressions. Evaluation belongs to the host through the
//! `ExpressionResolver` trait; `TemplateResolver` is the reference
//! implementation used by the CLI and tests. Its grammar is intentionally
//! small: dotted and indexed paths rooted at a context name, JSON-ish
//! literals, and a leading `!`.

use crate::context::Context;
use crate::error::ResolveError;
use serde_json::{Map, Value};
use std::iter::Peekable;
use std::str::Chars;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Resolves a raw property value against a context
///
/// Implementations must be total: any failure is reported through the
/// `Result`, never by panicking. `ResolveError::Undefined` stands for a
/// JavaScript-style `undefined` result.
pub trait ExpressionResolver {
    fn resolve(&self, raw: &Value, context: &Context) -> Result<Value, ResolveError>;
}

/// Whether a raw value contains an expression anywhere
pub fn is_expression(raw: &Value) -> bool {
    match raw {
        Value::String(s) => s.contains(OPEN),
        Value::Array(items) => items.iter().any(is_expression),
        Value::Object(map) => map.values().any(is_expression),
        _ => false,
    }
}

/// JavaScript truthiness of a resolved value
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form used when an expression is interpolated into text
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Reference `{{ path }}` template resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResolver;

impl ExpressionResolver for TemplateResolver {
    fn resolve(&self, raw: &Value, context: &Context) -> Result<Value, ResolveError> {
        match raw {
            Value::String(s) => resolve_template(s, context),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match self.resolve(item, context) {
                        Ok(v) => out.push(v),
                        Err(ResolveError::Undefined(_)) => out.push(Value::Null),
                        Err(e) => return Err(e),
                    }
                }
                Ok(Value::Array(out))
            }
            Value::Object(map) => {
                let mut out = Map::new();
                for (key, item) in map {
                    match self.resolve(item, context) {
                        Ok(v) => {
                            out.insert(key.clone(), v);
                        }
                        Err(ResolveError::Undefined(_)) => {}
                        Err(e) => return Err(e),
                    }
                }
                Ok(Value::Object(out))
            }
            literal => Ok(literal.clone()),
        }
    }
}

enum Segment<'a> {
    Text(&'a str),
    Expr(&'a str),
}

fn split_template(template: &str) -> Result<Vec<Segment<'_>>, ResolveError> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find(OPEN) {
        if start > 0 {
            segments.push(Segment::Text(&rest[..start]));
        }
        let after_open = &rest[start + OPEN.len()..];
        let end = after_open
            .find(CLOSE)
            .ok_or_else(|| ResolveError::Syntax(format!("unterminated expression in {:?}", template)))?;
        segments.push(Segment::Expr(&after_open[..end]));
        rest = &after_open[end + CLOSE.len()..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}

fn resolve_template(template: &str, context: &Context) -> Result<Value, ResolveError> {
    if !template.contains(OPEN) {
        return Ok(Value::String(template.to_string()));
    }

    let segments = split_template(template.trim())?;
    if let [Segment::Expr(src)] = segments.as_slice() {
        return evaluate(src, context);
    }

    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Expr(src) => match evaluate(src, context) {
                Ok(v) => out.push_str(&display_string(&v)),
                Err(ResolveError::Undefined(_)) => {}
                Err(e) => return Err(e),
            },
        }
    }
    Ok(Value::String(out))
}

/// Evaluate the body of one `{{ … }}`
fn evaluate(src: &str, context: &Context) -> Result<Value, ResolveError> {
    let src = src.trim();
    if src.is_empty() {
        return Err(ResolveError::Syntax("empty expression".to_string()));
    }

    if let Some(operand) = src.strip_prefix('!') {
        return match evaluate(operand, context) {
            Ok(v) => Ok(Value::Bool(!truthy(&v))),
            Err(ResolveError::Undefined(_)) => Ok(Value::Bool(true)),
            Err(e) => Err(e),
        };
    }

    if let Some(literal) = parse_literal(src) {
        return Ok(literal);
    }

    let path = parse_path(src)?;
    lookup(&path, src, context)
}

fn parse_literal(src: &str) -> Option<Value> {
    match src {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        "null" => return Some(Value::Null),
        _ => {}
    }
    for quote in ['"', '\''] {
        if src.len() >= 2 && src.starts_with(quote) && src.ends_with(quote) {
            return Some(Value::String(src[1..src.len() - 1].to_string()));
        }
    }
    if src.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        if let Ok(i) = src.parse::<i64>() {
            return Some(Value::from(i));
        }
        if let Ok(f) = src.parse::<f64>() {
            return serde_json::Number::from_f64(f).map(Value::Number);
        }
    }
    None
}

#[derive(Debug, PartialEq)]
enum PathStep {
    Key(String),
    Index(usize),
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn read_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn parse_path(src: &str) -> Result<Vec<PathStep>, ResolveError> {
    let syntax = |msg: &str| ResolveError::Syntax(format!("{} in {:?}", msg, src));
    let mut chars = src.chars().peekable();
    let mut steps = Vec::new();

    match chars.peek() {
        Some(&c) if is_ident_start(c) => steps.push(PathStep::Key(read_ident(&mut chars))),
        _ => return Err(syntax("expected identifier")),
    }

    while let Some(c) = chars.next() {
        match c {
            '.' => match chars.peek() {
                Some(&c) if is_ident_start(c) || c.is_ascii_digit() => {
                    steps.push(PathStep::Key(read_ident(&mut chars)))
                }
                _ => return Err(syntax("expected member name after '.'")),
            },
            '[' => {
                let mut inner = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(c) => inner.push(c),
                        None => return Err(syntax("unterminated '['")),
                    }
                }
                let inner = inner.trim();
                if let Ok(index) = inner.parse::<usize>() {
                    steps.push(PathStep::Index(index));
                } else if let Some(Value::String(key)) = parse_literal(inner) {
                    steps.push(PathStep::Key(key));
                } else {
                    return Err(syntax("unsupported subscript"));
                }
            }
            c if c.is_whitespace() => {
                if chars.all(char::is_whitespace) {
                    break;
                }
                return Err(syntax("unexpected token"));
            }
            _ => return Err(syntax("unexpected character")),
        }
    }
    Ok(steps)
}

fn lookup(path: &[PathStep], src: &str, context: &Context) -> Result<Value, ResolveError> {
    let undefined = || ResolveError::Undefined(src.to_string());
    let mut steps = path.iter();
    let mut current = match steps.next() {
        Some(PathStep::Key(root)) => context.get(root).ok_or_else(undefined)?,
        _ => return Err(undefined()),
    };

    for step in steps {
        let next = match (current, step) {
            (Value::Null, _) => {
                return Err(ResolveError::Type(format!(
                    "cannot read properties of null in {:?}",
                    src
                )))
            }
            (Value::Object(map), PathStep::Key(key)) => map.get(key),
            (Value::Object(map), PathStep::Index(i)) => map.get(&i.to_string()),
            (Value::Array(items), PathStep::Index(i)) => items.get(*i),
            (Value::Array(items), PathStep::Key(key)) if key == "length" => {
                return Ok(Value::from(items.len()))
            }
            (Value::String(s), PathStep::Key(key)) if key == "length" => {
                return Ok(Value::from(s.chars().count()))
            }
            _ => None,
        };
        current = next.ok_or_else(undefined)?;
    }
    Ok(current.clone())
}
