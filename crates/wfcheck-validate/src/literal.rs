//! Parser for configuration blobs.
//!
//! Blob columns hold Python-literal text (`{'1': 49.5}`), sometimes with
//! JSON barewords mixed in (`{"enabled": true}`). The grammar accepted here:
//!
//! - dicts `{k: v}`, lists `[..]` and tuples `(..)`, trailing commas allowed
//! - single- or double-quoted strings with backslash escapes
//! - integers and floats with optional sign, fraction and exponent
//! - `True`, `False`, `None`
//! - `true`, `false`, `null`, read as the strings `"true"`, `"false"`, `"null"`

use thiserror::Error;

use wfcheck_model::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct LiteralError {
    /// Byte offset into the input.
    pub position: usize,
    pub kind: LiteralErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("name '{0}' is not defined")]
    UnknownName(String),
    #[error("unhashable dict key")]
    UnhashableKey,
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(char),
    #[error("nesting deeper than {} levels", MAX_DEPTH)]
    TooDeep,
}

/// Deepest container nesting accepted in a blob.
pub const MAX_DEPTH: usize = 128;

/// Parse a configuration blob into a [`Value`].
pub fn parse_literal(input: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser {
        input,
        pos: 0,
        depth: 0,
    };
    parser.skip_ws();
    let value = parser.parse_value()?;
    parser.skip_ws();
    if let Some(ch) = parser.peek() {
        return Err(parser.error(LiteralErrorKind::TrailingInput(ch)));
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error(&self, kind: LiteralErrorKind) -> LiteralError {
        LiteralError {
            position: self.pos,
            kind,
        }
    }

    fn unexpected(&self) -> LiteralError {
        match self.peek() {
            Some(ch) => self.error(LiteralErrorKind::UnexpectedChar(ch)),
            None => self.error(LiteralErrorKind::UnexpectedEnd),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        match self.peek() {
            Some('{') => self.nested(Self::parse_map),
            Some('[') => self.nested(Self::parse_list),
            Some('(') => self.nested(Self::parse_tuple),
            Some('\'' | '"') => self.parse_string().map(Value::Str),
            Some(ch) if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.') => {
                self.parse_number()
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.parse_name(),
            _ => Err(self.unexpected()),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(LiteralErrorKind::TooDeep));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    /// Comma-separated values up to `close`. Returns the items and whether
    /// any comma was seen.
    fn parse_items(&mut self, close: char) -> Result<(Vec<Value>, bool), LiteralError> {
        self.bump();
        let mut items = Vec::new();
        let mut saw_comma = false;
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok((items, saw_comma));
            }
            items.push(self.parse_value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    saw_comma = true;
                }
                Some(ch) if ch == close => {
                    self.bump();
                    return Ok((items, saw_comma));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_list(&mut self) -> Result<Value, LiteralError> {
        let (items, _) = self.parse_items(']')?;
        Ok(Value::List(items))
    }

    fn parse_tuple(&mut self) -> Result<Value, LiteralError> {
        let (mut items, saw_comma) = self.parse_items(')')?;
        if items.len() == 1 && !saw_comma {
            return Ok(items.remove(0));
        }
        Ok(Value::List(items))
    }

    fn parse_map(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        let mut entries: Vec<(String, Value)> = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Map(entries));
            }
            let key_start = self.pos;
            let key = match self.parse_value()? {
                Value::Str(s) => s,
                Value::List(_) | Value::Map(_) => {
                    return Err(LiteralError {
                        position: key_start,
                        kind: LiteralErrorKind::UnhashableKey,
                    });
                }
                scalar => scalar.to_string(),
            };
            self.skip_ws();
            if self.peek() != Some(':') {
                return Err(self.unexpected());
            }
            self.bump();
            self.skip_ws();
            let value = self.parse_value()?;
            // Later duplicates overwrite the value but keep the first position.
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(Value::Map(entries));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, LiteralError> {
        let start = self.pos;
        let quote = self.bump();
        let mut out = String::new();
        loop {
            let Some(ch) = self.bump() else {
                return Err(LiteralError {
                    position: start,
                    kind: LiteralErrorKind::UnterminatedString,
                });
            };
            if Some(ch) == quote {
                return Ok(out);
            }
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match self.bump() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some('\\') => out.push('\\'),
                Some('\'') => out.push('\''),
                Some('"') => out.push('"'),
                Some('\n') => {}
                Some('u') => out.push(self.parse_unicode_escape()?),
                // Unknown escapes are kept verbatim.
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => {
                    return Err(LiteralError {
                        position: start,
                        kind: LiteralErrorKind::UnterminatedString,
                    });
                }
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, LiteralError> {
        let end = self.pos + 4;
        let hex = self
            .input
            .get(self.pos..end)
            .ok_or_else(|| self.error(LiteralErrorKind::InvalidEscape))?;
        let code =
            u32::from_str_radix(hex, 16).map_err(|_| self.error(LiteralErrorKind::InvalidEscape))?;
        let ch = char::from_u32(code).ok_or_else(|| self.error(LiteralErrorKind::InvalidEscape))?;
        self.pos = end;
        Ok(ch)
    }

    fn parse_number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let mut is_float = false;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        self.eat_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            self.eat_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek(), Some('-' | '+')) {
                self.bump();
            }
            self.eat_digits();
        }
        let text = &self.input[start..self.pos];
        let invalid = || LiteralError {
            position: start,
            kind: LiteralErrorKind::InvalidNumber(text.to_string()),
        };
        if !text.chars().any(|ch| ch.is_ascii_digit()) {
            return Err(invalid());
        }
        if !is_float && let Ok(value) = text.parse::<i64>() {
            return Ok(Value::Int(value));
        }
        text.parse::<f64>().map(Value::Float).map_err(|_| invalid())
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.bump();
        }
    }

    fn parse_name(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
        {
            self.bump();
        }
        let name = &self.input[start..self.pos];
        match name {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            "true" | "false" | "null" => Ok(Value::Str(name.to_string())),
            // Unicode string prefix, e.g. u'abc'.
            "u" | "U" if matches!(self.peek(), Some('\'' | '"')) => {
                self.parse_string().map(Value::Str)
            }
            _ => Err(LiteralError {
                position: start,
                kind: LiteralErrorKind::UnknownName(name.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: Vec<(&str, Value)>) -> Value {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn parses_region_capacity_map() {
        let value = parse_literal("{'1': 49.5, '2': 50}").unwrap();
        assert_eq!(
            value,
            map(vec![("1", Value::Float(49.5)), ("2", Value::Int(50))])
        );
    }

    #[test]
    fn numeric_keys_are_rendered() {
        let value = parse_literal("{1: 10, 2.5: 20}").unwrap();
        assert_eq!(
            value,
            map(vec![("1", Value::Int(10)), ("2.5", Value::Int(20))])
        );
    }

    #[test]
    fn parses_method_region_list() {
        let value =
            parse_literal(r#"[{"rid": 1, "nwp_config": {"EC": 0.6, "GFS": 0.4}}, ]"#).unwrap();
        let entry = &value.as_list().unwrap()[0];
        assert_eq!(entry.get("rid"), Some(&Value::Int(1)));
        let nwp = entry.get("nwp_config").unwrap().as_map().unwrap();
        assert_eq!(nwp.len(), 2);
        assert_eq!(nwp[1].0, "GFS");
    }

    #[test]
    fn json_barewords_become_strings() {
        let value = parse_literal("{'a': true, 'b': null, 'c': False, 'd': None}").unwrap();
        assert_eq!(value.get("a"), Some(&Value::Str("true".to_string())));
        assert_eq!(value.get("b"), Some(&Value::Str("null".to_string())));
        assert_eq!(value.get("c"), Some(&Value::Bool(false)));
        assert_eq!(value.get("d"), Some(&Value::Null));
    }

    #[test]
    fn barewords_inside_strings_are_untouched() {
        let value = parse_literal("{'nullable': 'true story'}").unwrap();
        assert_eq!(
            value.get("nullable"),
            Some(&Value::Str("true story".to_string()))
        );
    }

    #[test]
    fn tuples_and_parentheses() {
        assert_eq!(
            parse_literal("(1, 2)").unwrap(),
            Value::List(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!(parse_literal("(1,)").unwrap(), Value::List(vec![Value::Int(1)]));
        assert_eq!(parse_literal("(1)").unwrap(), Value::Int(1));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_literal("-3").unwrap(), Value::Int(-3));
        assert_eq!(parse_literal("1e3").unwrap(), Value::Float(1000.0));
        assert_eq!(parse_literal(".5").unwrap(), Value::Float(0.5));
        assert_eq!(
            parse_literal("-").unwrap_err().kind,
            LiteralErrorKind::InvalidNumber("-".to_string())
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            parse_literal(r"'it\'s\né'").unwrap(),
            Value::Str("it's\né".to_string())
        );
        assert_eq!(
            parse_literal(r"'a\qb'").unwrap(),
            Value::Str("a\\qb".to_string())
        );
    }

    #[test]
    fn errors_carry_position() {
        let err = parse_literal("{'a': 1,, }").unwrap_err();
        assert_eq!(err.position, 8);
        assert_eq!(err.kind, LiteralErrorKind::UnexpectedChar(','));

        let err = parse_literal("{'a': 1").unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::UnexpectedEnd);

        let err = parse_literal("'open").unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::UnterminatedString);
        assert_eq!(err.position, 0);

        let err = parse_literal("{'a': b}").unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::UnknownName("b".to_string()));

        let err = parse_literal("{[1]: 2}").unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::UnhashableKey);

        let err = parse_literal("1 2").unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::TrailingInput('2'));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = parse_literal("   ").unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::UnexpectedEnd);
        assert_eq!(err.to_string(), "unexpected end of input at position 3");
    }

    #[test]
    fn duplicate_keys_keep_last_value() {
        let value = parse_literal("{'a': 1, 'b': 2, 'a': 3}").unwrap();
        assert_eq!(value, map(vec![("a", Value::Int(3)), ("b", Value::Int(2))]));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let err = parse_literal(&"[".repeat(10_000)).unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::TooDeep);
        assert_eq!(err.position, MAX_DEPTH);

        let err = parse_literal(&"{'a': ".repeat(200)).unwrap_err();
        assert_eq!(err.kind, LiteralErrorKind::TooDeep);
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let text = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_literal(&text).is_ok());
    }
}
