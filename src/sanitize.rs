use regex::Regex;

/// Rewrites free-text commit messages into a form that can sit inside the
/// quoted strings of the graph document.
///
/// Every character outside letters, digits and the plain space becomes a
/// single space, each one on its own, so two words never run together and a
/// sanitized message sanitizes to itself.
///
/// # Example
///
/// ```
/// # use guml::MessageSanitizer;
/// let sanitizer = MessageSanitizer::new();
/// assert_eq!(
///     sanitizer.sanitize("send every hour with 502 and read-timeout"),
///     "send every hour with 502 and read timeout"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MessageSanitizer {
    /// Matches every single character the notation cannot safely carry
    reserved: Regex,
}

impl Default for MessageSanitizer {
    fn default() -> Self {
        MessageSanitizer {
            reserved: regex!(r"[^\p{L}\p{N} ]"),
        }
    }
}

impl MessageSanitizer {
    /// Creates a sanitizer. The reserved set is fixed: everything that is
    /// neither a letter, a digit nor a space.
    pub fn new() -> MessageSanitizer {
        MessageSanitizer::default()
    }

    /// Replaces each reserved character in `message` with one space;
    /// letters, digits and spaces pass through untouched.
    pub fn sanitize(&self, message: &str) -> String {
        self.reserved.replace_all(message, " ").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphen_becomes_space() {
        let sanitizer = MessageSanitizer::new();

        assert_eq!(
            sanitizer.sanitize("send every hour with 502 and read-timeout"),
            "send every hour with 502 and read timeout"
        );
    }

    #[test]
    fn words_never_run_together() {
        let sanitizer = MessageSanitizer::new();

        assert_eq!(sanitizer.sanitize("a-b"), "a b");
        assert_eq!(sanitizer.sanitize("fix(parser): colon"), "fix parser   colon");
    }

    #[test]
    fn quotes_and_arrows_are_neutralized() {
        let sanitizer = MessageSanitizer::new();

        assert_eq!(
            sanitizer.sanitize(r#"don't "quote" --> me"#),
            "don t  quote      me"
        );
    }

    #[test]
    fn each_reserved_character_becomes_its_own_space() {
        let sanitizer = MessageSanitizer::new();

        // No collapsing: three reserved characters, three spaces
        assert_eq!(sanitizer.sanitize("a!!!b"), "a   b");
        assert_eq!(sanitizer.sanitize("tab\there"), "tab here");
    }

    #[test]
    fn idempotent() {
        let sanitizer = MessageSanitizer::new();

        let once = sanitizer.sanitize("wip: retry w/ back-off (#42)");
        assert_eq!(sanitizer.sanitize(&once), once);
    }

    #[test]
    fn letters_digits_and_spaces_pass_through() {
        let sanitizer = MessageSanitizer::new();

        assert_eq!(sanitizer.sanitize("plain words and 12345"), "plain words and 12345");
        assert_eq!(sanitizer.sanitize(""), "");
    }

    #[test]
    fn unicode_letters_are_kept() {
        let sanitizer = MessageSanitizer::new();

        assert_eq!(sanitizer.sanitize("héllo wörld"), "héllo wörld");
        assert_eq!(sanitizer.sanitize("日本語のメッセージ"), "日本語のメッセージ");
    }
}
