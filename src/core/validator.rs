use crate::domain::model::{ValidatedNumber, ValidationError};

/// Parses the raw `number` query value.
///
/// The whole string must parse as an `i64`; values outside that range are
/// rejected the same way as any other malformed token. Surrounding
/// whitespace is not trimmed, so `?number=+7` (which decodes to `" 7"`) is
/// rejected while `?number=%2B7` is accepted.
pub fn validate(raw: Option<&str>) -> Result<ValidatedNumber, ValidationError> {
    let raw = match raw {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ValidationError::MissingParameter),
    };

    raw.parse::<i64>()
        .map(ValidatedNumber::new)
        .map_err(|_| ValidationError::NotANumber {
            raw: raw.to_string(),
            is_alphabetic: raw.chars().all(char::is_alphabetic),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_a_number(raw: &str, is_alphabetic: bool) -> ValidationError {
        ValidationError::NotANumber {
            raw: raw.to_string(),
            is_alphabetic,
        }
    }

    #[test]
    fn test_missing_or_empty() {
        assert_eq!(validate(None), Err(ValidationError::MissingParameter));
        assert_eq!(validate(Some("")), Err(ValidationError::MissingParameter));
    }

    #[test]
    fn test_valid_integers() {
        assert_eq!(validate(Some("153")).unwrap().get(), 153);
        assert_eq!(validate(Some("-42")).unwrap().get(), -42);
        assert_eq!(validate(Some("+7")).unwrap().get(), 7);
        assert_eq!(validate(Some("0")).unwrap().get(), 0);
        assert_eq!(
            validate(Some("9223372036854775807")).unwrap().get(),
            i64::MAX
        );
        assert_eq!(
            validate(Some("-9223372036854775808")).unwrap().get(),
            i64::MIN
        );
    }

    #[test]
    fn test_alphabetic_input() {
        assert_eq!(validate(Some("abc")), Err(not_a_number("abc", true)));
        assert_eq!(validate(Some("Zürich")), Err(not_a_number("Zürich", true)));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(validate(Some("12a")), Err(not_a_number("12a", false)));
        assert_eq!(validate(Some("1.5")), Err(not_a_number("1.5", false)));
        assert_eq!(validate(Some(" 12")), Err(not_a_number(" 12", false)));
        assert_eq!(validate(Some("-")), Err(not_a_number("-", false)));
        assert_eq!(validate(Some("a b")), Err(not_a_number("a b", false)));
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert_eq!(validate(Some(" 7")), Err(not_a_number(" 7", false)));
        assert_eq!(validate(Some("7 ")), Err(not_a_number("7 ", false)));
        assert_eq!(validate(Some(" ")), Err(not_a_number(" ", false)));
    }

    #[test]
    fn test_out_of_range_is_not_a_number() {
        assert_eq!(
            validate(Some("9223372036854775808")),
            Err(not_a_number("9223372036854775808", false))
        );
        assert_eq!(
            validate(Some("-99999999999999999999")),
            Err(not_a_number("-99999999999999999999", false))
        );
    }
}
