pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 128;

const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

// Checked as case-insensitive substrings of the candidate password
const COMMON_PASSWORDS: &[&str] = &[
    "password123",
    "admin123",
    "user123",
    "abc123",
    "password",
    "123456",
    "qwerty",
    "admin",
    "user",
    "test",
    "guest",
    "welcome",
    "login",
];

/// Outcome of a password policy check. Every violated rule contributes one
/// message, so a caller can report all problems at once.
#[derive(Debug, Default)]
pub struct PasswordCheck {
    errors: Vec<String>,
}

impl PasswordCheck {
    fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// Check a candidate password against the account password policy.
/// All rules are evaluated, none short-circuits.
pub fn validate_password(password: &str) -> PasswordCheck {
    let mut check = PasswordCheck::default();

    if password.trim().is_empty() {
        check.add_error("Password cannot be empty");
        return check;
    }

    let length = password.chars().count();
    if length < MIN_LENGTH {
        check.add_error(format!(
            "Password must be at least {} characters long",
            MIN_LENGTH
        ));
    }
    if length > MAX_LENGTH {
        check.add_error(format!("Password cannot exceed {} characters", MAX_LENGTH));
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        check.add_error("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        check.add_error("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        check.add_error("Password must contain at least one digit");
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        check.add_error("Password must contain at least one special character");
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.iter().any(|common| lowered.contains(common)) {
        check.add_error("Password must not contain common or easily guessable words");
    }

    if has_sequential_run(password) {
        check.add_error("Password must not contain sequential characters (e.g. abc, 123)");
    }
    if has_repeated_run(password) {
        check.add_error("Password must not contain repeated characters (e.g. aaa, 111)");
    }

    check
}

// Three consecutive ascending letters or digits, e.g. "abc" or "789"
fn has_sequential_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| {
        let same_class = w.iter().all(|c| c.is_ascii_alphabetic())
            || w.iter().all(|c| c.is_ascii_digit());
        same_class && w[1] as u32 == w[0] as u32 + 1 && w[2] as u32 == w[1] as u32 + 1
    })
}

// Three identical characters in a row, e.g. "aaa" or "!!!"
fn has_repeated_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}
