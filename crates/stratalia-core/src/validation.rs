//! Input sanitization and character-class checks shared by request schemas.

use serde::Serialize;

/// Removes characters that could open markup: `< > " ' &`.
pub fn strip_markup(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 0 to 5, one point per satisfied rule.
    pub score: u8,
    pub feedback: Vec<&'static str>,
    pub is_valid: bool,
}

fn is_special(c: char) -> bool {
    !c.is_ascii_alphanumeric()
}

pub fn password_strength(password: &str) -> PasswordStrength {
    let rules: [(bool, &'static str); 5] = [
        (password.chars().count() >= 8, "Minimaal 8 tekens"),
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Minimaal één kleine letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Minimaal één hoofdletter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Minimaal één cijfer",
        ),
        (password.chars().any(is_special), "Minimaal één speciaal teken"),
    ];

    let score = rules.iter().filter(|(ok, _)| *ok).count() as u8;
    let feedback = rules
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, msg)| *msg)
        .collect();

    PasswordStrength {
        score,
        feedback,
        is_valid: score >= 4,
    }
}

/// First unmet complexity rule for a new password, if any.
pub fn password_problem(password: &str) -> Option<&'static str> {
    let len = password.chars().count();
    if len < 8 {
        Some("Wachtwoord moet minimaal 8 tekens lang zijn")
    } else if len > 128 {
        Some("Wachtwoord mag maximaal 128 tekens lang zijn")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Wachtwoord moet minimaal één kleine letter bevatten")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Wachtwoord moet minimaal één hoofdletter bevatten")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Wachtwoord moet minimaal één cijfer bevatten")
    } else if !password.chars().any(is_special) {
        Some("Wachtwoord moet minimaal één speciaal teken bevatten")
    } else {
        None
    }
}

/// Letters, whitespace, `-`, `'` and `.`.
pub fn is_person_name(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.'))
}

/// Letters, whitespace, `-` and `'`.
pub fn is_slang_word(input: &str) -> bool {
    !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\''))
}
