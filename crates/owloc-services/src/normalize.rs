/// Rewrite every line break to the Windows convention the game expects.
/// Handles `\n`, `\r` and `\r\n` alike, so normalizing an
/// already-normalized string is a no-op.
pub fn normalize_line_breaks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\r\n");
            }
            '\n' => out.push_str("\r\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_lf_becomes_crlf() {
        assert_eq!(normalize_line_breaks("a\nb\nc"), "a\r\nb\r\nc");
    }

    #[test]
    fn bare_cr_becomes_crlf() {
        assert_eq!(normalize_line_breaks("a\rb"), "a\r\nb");
    }

    #[test]
    fn mixed_conventions_unify() {
        assert_eq!(normalize_line_breaks("a\r\nb\nc\rd"), "a\r\nb\r\nc\r\nd");
    }

    #[test]
    fn normalizing_twice_equals_once() {
        let input = "one\ntwo\r\nthree\rfour";
        let once = normalize_line_breaks(input);
        assert_eq!(normalize_line_breaks(&once), once);
        assert!(!once.replace("\r\n", "").contains(['\r', '\n']));
    }

    #[test]
    fn no_breaks_is_identity() {
        assert_eq!(normalize_line_breaks("plain text"), "plain text");
    }
}
