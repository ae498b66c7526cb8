//! Script-based language heuristics and the simple-greeting short-circuit.
//!
//! Detection is deliberately crude: the presence of any Georgian-alphabet
//! codepoint selects `ka`, everything else is `en`. That matches how the
//! assistant is actually used (two supported languages, Georgian-first).

use tracing::info;

/// Messages recognized as bare greetings after stripping non-letters.
const GREETINGS: [&str; 6] = [
    "hi",
    "hello",
    "hey",
    "gamarjoba",
    "გამარჯობა",
    "მოგესალმები",
];

const GREETING_KA: &str = "გამარჯობა! რა სტატისტიკური მონაცემები გაინტერესებთ?";
const GREETING_EN: &str = "Hello! What statistics are you looking for today?";

/// Returns `"ka"` if the text contains a Georgian-alphabet codepoint,
/// otherwise `"en"`. Empty input defaults to `"ka"`.
pub fn detect_language(text: &str) -> &'static str {
    if text.is_empty() {
        return "ka";
    }
    if text.chars().any(is_georgian_letter) {
        "ka"
    } else {
        "en"
    }
}

/// True for codepoints in the Georgian Mkhedruli block used by `detect_language`.
fn is_georgian_letter(c: char) -> bool {
    ('ა'..='ჰ').contains(&c)
}

/// Lowercases and keeps only ASCII and Georgian letters, so that
/// `"Hello!!"` and `"hello"` compare equal.
fn normalized_letters(msg: &str) -> String {
    msg.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || is_georgian_letter(*c))
        .collect()
}

/// Whether the message is a bare greeting that can skip classification.
pub fn is_simple_greeting(msg: &str) -> bool {
    let normalized = normalized_letters(msg);
    let is_greeting = GREETINGS.contains(&normalized.as_str());
    if is_greeting {
        info!(greeting = %normalized, "detected simple greeting");
    }
    is_greeting
}

/// Canned greeting reply in the language of the incoming greeting.
///
/// A romanized `gamarjoba` still gets the Georgian reply.
pub fn greeting_reply(msg: &str) -> &'static str {
    let normalized = normalized_letters(msg);

    if normalized == "gamarjoba" {
        return GREETING_KA;
    }

    match detect_language(msg) {
        "ka" => GREETING_KA,
        _ => GREETING_EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_georgian_script() {
        assert_eq!(detect_language("სად ვნახო ინფლაცია?"), "ka");
        assert_eq!(detect_language("where is inflation data"), "en");
        assert_eq!(detect_language("GDP და ინფლაცია"), "ka");
    }

    #[test]
    fn empty_input_defaults_to_georgian() {
        assert_eq!(detect_language(""), "ka");
    }

    #[test]
    fn greeting_detection_ignores_punctuation_and_case() {
        assert!(is_simple_greeting("Hello!!"));
        assert!(is_simple_greeting("  hey  "));
        assert!(is_simple_greeting("გამარჯობა"));
        assert!(!is_simple_greeting("hello, where is GDP data?"));
    }

    #[test]
    fn greeting_reply_matches_language() {
        assert_eq!(greeting_reply("hello"), GREETING_EN);
        assert_eq!(greeting_reply("გამარჯობა"), GREETING_KA);
        // Romanized Georgian greeting answers in Georgian.
        assert_eq!(greeting_reply("gamarjoba"), GREETING_KA);
    }
}
