use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s]{2,}$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static MOBILE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(www\.)?linkedin\.com/in/[A-Za-z0-9_-]+/?$").unwrap()
});

/// The closed set of fields on the join form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Mobile,
    Linkedin,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Mobile, Field::Linkedin];

    pub fn is_required(self) -> bool {
        !matches!(self, Field::Linkedin)
    }

    /// Matches the `name` attribute of the rendered input.
    pub fn input_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Mobile => "mobile",
            Field::Linkedin => "linkedin",
        }
    }
}

/// Returns the message to show under the field, or `None` when the value is acceptable.
pub fn validate(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::Name => {
            if value.is_empty() {
                Some("Name required")
            } else if NAME_RE.is_match(value) {
                None
            } else if value.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
                Some("Name must be at least 2 characters")
            } else {
                Some("Name can only contain letters and spaces")
            }
        }
        Field::Email => {
            if value.is_empty() {
                Some("Email required")
            } else if EMAIL_RE.is_match(value) {
                None
            } else {
                Some("Enter a valid email address")
            }
        }
        Field::Mobile => {
            if value.is_empty() {
                Some("Mobile number required")
            } else if MOBILE_RE.is_match(value) {
                None
            } else {
                Some("Mobile number must be exactly 10 digits")
            }
        }
        Field::Linkedin => {
            if value.is_empty() || LINKEDIN_RE.is_match(value) {
                None
            } else {
                Some("Enter a valid LinkedIn profile URL")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert_eq!(validate(Field::Name, ""), Some("Name required"));
        for ok in ["Jo", "Arun Kumar", "Mary Ann Smith", "ab"] {
            assert_eq!(validate(Field::Name, ok), None, "{ok}");
        }
        for bad in ["A", "R2D2", "Anne-Marie", "O'Neil", "José"] {
            assert!(validate(Field::Name, bad).is_some(), "{bad}");
        }
    }

    #[test]
    fn short_and_invalid_names_get_different_messages() {
        assert_eq!(validate(Field::Name, "A"), Some("Name must be at least 2 characters"));
        assert_eq!(validate(Field::Name, "A1"), Some("Name can only contain letters and spaces"));
    }

    #[test]
    fn email_rules() {
        assert_eq!(validate(Field::Email, ""), Some("Email required"));
        assert_eq!(validate(Field::Email, "someone@studio.design"), None);
        for bad in ["someone", "someone@", "@studio.com", "some one@studio.com", "a@b"] {
            assert!(validate(Field::Email, bad).is_some(), "{bad}");
        }
    }

    #[test]
    fn mobile_rules() {
        assert_eq!(validate(Field::Mobile, "9876543210"), None);
        assert_eq!(validate(Field::Mobile, "0000000000"), None);
        for bad in ["987654321", "98765432100", "98765-43210", "+919876543", "abcdefghij"] {
            assert!(validate(Field::Mobile, bad).is_some(), "{bad}");
        }
        assert_eq!(validate(Field::Mobile, ""), Some("Mobile number required"));
    }

    #[test]
    fn linkedin_is_optional_but_checked_when_present() {
        assert_eq!(validate(Field::Linkedin, ""), None);
        assert_eq!(validate(Field::Linkedin, "https://linkedin.com/in/x"), None);
        assert_eq!(validate(Field::Linkedin, "https://www.linkedin.com/in/arun-kumar/"), None);
        assert!(validate(Field::Linkedin, "not-a-url").is_some());
        assert!(validate(Field::Linkedin, "https://linkedin.com/company/acme").is_some());
    }

    #[test]
    fn only_linkedin_is_optional() {
        let optional: Vec<Field> = Field::ALL.into_iter().filter(|f| !f.is_required()).collect();
        assert_eq!(optional, vec![Field::Linkedin]);
    }
}
