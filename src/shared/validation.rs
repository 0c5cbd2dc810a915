use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for charity registration numbers.
    /// Alphanumeric segments joined by single hyphens or slashes
    /// - Valid: "NPO-001", "930012345", "PBO/930/123"
    /// - Invalid: "NPO--001", "-NPO", "NPO 001"
    pub static ref REGISTRATION_NUMBER_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9]+(?:[-/][A-Za-z0-9]+)*$").unwrap();

    /// Regex for contact phone numbers: optional leading +, then digits,
    /// spaces, parentheses and hyphens, 7-20 characters total
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9 ()\-]{7,20}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_number_regex_valid() {
        assert!(REGISTRATION_NUMBER_REGEX.is_match("NPO-001"));
        assert!(REGISTRATION_NUMBER_REGEX.is_match("930012345"));
        assert!(REGISTRATION_NUMBER_REGEX.is_match("PBO/930/123"));
        assert!(REGISTRATION_NUMBER_REGEX.is_match("abc"));
    }

    #[test]
    fn test_registration_number_regex_invalid() {
        assert!(!REGISTRATION_NUMBER_REGEX.is_match("NPO--001")); // double hyphen
        assert!(!REGISTRATION_NUMBER_REGEX.is_match("-NPO")); // leading hyphen
        assert!(!REGISTRATION_NUMBER_REGEX.is_match("NPO 001")); // space
        assert!(!REGISTRATION_NUMBER_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+27 21 555 0100"));
        assert!(PHONE_REGEX.is_match("(021) 555-0100"));
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("123"));
    }
}
