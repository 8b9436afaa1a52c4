pub(super) const OPEN: &str = "{{";
pub(super) const CLOSE: &str = "}}";

/// A piece of a template string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Piece<'a> {
    Literal(&'a str),
    /// The raw text between `{{` and `}}`, untrimmed.
    Expression(&'a str),
}

/// Splits a template into literal and expression pieces, left to right.
///
/// An `{{` without a matching `}}` is kept as literal text.
pub(super) fn scan(template: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };
        if open > 0 {
            pieces.push(Piece::Literal(&rest[..open]));
        }
        pieces.push(Piece::Expression(&after_open[..close]));
        rest = &after_open[close + CLOSE.len()..];
    }
    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_mixed() {
        assert_eq!(
            scan("Hello {{ n1.name }}, bye{{n2}}"),
            vec![
                Piece::Literal("Hello "),
                Piece::Expression(" n1.name "),
                Piece::Literal(", bye"),
                Piece::Expression("n2"),
            ]
        );
    }

    #[test]
    fn test_scan_unterminated_is_literal() {
        assert_eq!(
            scan("a {{b}} c {{d"),
            vec![
                Piece::Literal("a "),
                Piece::Expression("b"),
                Piece::Literal(" c {{d"),
            ]
        );
    }

    #[test]
    fn test_scan_without_delimiters() {
        assert_eq!(scan("plain } { text"), vec![Piece::Literal("plain } { text")]);
        assert!(scan("").is_empty());
    }
}
