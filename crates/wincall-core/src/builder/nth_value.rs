//! The NTH_VALUE family: three positional arguments plus an optional
//! FROM FIRST / FROM LAST selector.

use super::flags::Direction;
use crate::error::BuildError;
use crate::name::FunctionName;
use sqlparser::ast::{Expr, Value};

/// Reads the direction encoded by a trailing selector expression.
///
/// Accepted spellings: `TRUE`/`FALSE` (true is FROM FIRST), `1`/`0`, and
/// `FIRST`/`LAST` as a bare word or string literal, in any case.
pub(crate) fn direction_from_selector(
    name: &FunctionName,
    selector: &Expr,
) -> Result<Direction, BuildError> {
    let direction = match selector {
        Expr::Nested(inner) => return direction_from_selector(name, inner),
        Expr::Identifier(ident) => direction_from_word(&ident.value),
        Expr::Value(value) => match &value.value {
            Value::Boolean(true) => Some(Direction::FromFirst),
            Value::Boolean(false) => Some(Direction::FromLast),
            Value::Number(n, _) if n == "1" => Some(Direction::FromFirst),
            Value::Number(n, _) if n == "0" => Some(Direction::FromLast),
            Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => direction_from_word(s),
            _ => None,
        },
        _ => None,
    };

    direction.ok_or_else(|| BuildError::InvalidDirectionSelector { name: name.clone() })
}

fn direction_from_word(word: &str) -> Option<Direction> {
    if word.eq_ignore_ascii_case("first") {
        Some(Direction::FromFirst)
    } else if word.eq_ignore_ascii_case("last") {
        Some(Direction::FromLast)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildErrorKind;
    use sqlparser::ast::Ident;

    fn name() -> FunctionName {
        FunctionName::new("NTH_VALUE")
    }

    fn value(v: Value) -> Expr {
        Expr::Value(v.with_empty_span())
    }

    #[test]
    fn test_boolean_selector() {
        assert_eq!(
            direction_from_selector(&name(), &value(Value::Boolean(true))).unwrap(),
            Direction::FromFirst
        );
        assert_eq!(
            direction_from_selector(&name(), &value(Value::Boolean(false))).unwrap(),
            Direction::FromLast
        );
    }

    #[test]
    fn test_word_selectors() {
        let bare = Expr::Identifier(Ident::new("last"));
        assert_eq!(
            direction_from_selector(&name(), &bare).unwrap(),
            Direction::FromLast
        );
        let quoted = value(Value::SingleQuotedString("First".to_string()));
        assert_eq!(
            direction_from_selector(&name(), &quoted).unwrap(),
            Direction::FromFirst
        );
    }

    #[test]
    fn test_numeric_selector() {
        let zero = value(Value::Number("0".to_string(), false));
        assert_eq!(
            direction_from_selector(&name(), &zero).unwrap(),
            Direction::FromLast
        );
        let nested = Expr::Nested(Box::new(value(Value::Number("1".to_string(), false))));
        assert_eq!(
            direction_from_selector(&name(), &nested).unwrap(),
            Direction::FromFirst
        );
    }

    #[test]
    fn test_unusable_selector() {
        let err = direction_from_selector(&name(), &value(Value::Number("2".to_string(), false)))
            .unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::InvalidDirectionSelector);
        assert_eq!(err.name().as_str(), "NTH_VALUE");

        let err =
            direction_from_selector(&name(), &Expr::Identifier(Ident::new("middle"))).unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::InvalidDirectionSelector);
    }
}
