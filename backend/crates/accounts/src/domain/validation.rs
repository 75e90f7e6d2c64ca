//! Registration Request Validation
//!
//! Structural rules for a registration request, applied in a fixed order.
//! The first failing rule wins:
//!
//! 1. Presence: `username`, then `password`
//! 2. Type: every present field is a string
//! 3. Trim: no present field has leading or trailing whitespace
//! 4. Length: every minimum in field order, then every maximum
//!
//! Values are checked, never rewritten: a valid request is passed through
//! byte for byte.

use derive_more::Display;
use platform::password::{ClearTextPassword, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Minimum username length (in UTF-16 code units, after trimming)
pub const USERNAME_MIN_LENGTH: usize = 1;

/// Fields of a registration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[display("username")]
    Username,
    #[display("password")]
    Password,
    #[display("fullname")]
    Fullname,
}

const REQUIRED_FIELDS: [Field; 2] = [Field::Username, Field::Password];

const STRING_FIELDS: [Field; 3] = [Field::Username, Field::Password, Field::Fullname];

const TRIMMED_FIELDS: [Field; 3] = [Field::Username, Field::Password, Field::Fullname];

/// Length bounds in UTF-16 code units
///
/// `byte_limited` fields must also fit `max` in UTF-8 bytes, the input
/// limit of the password hash.
struct SizeRule {
    field: Field,
    min: Option<usize>,
    max: Option<usize>,
    byte_limited: bool,
}

const SIZED_FIELDS: [SizeRule; 2] = [
    SizeRule {
        field: Field::Username,
        min: Some(USERNAME_MIN_LENGTH),
        max: None,
        byte_limited: false,
    },
    SizeRule {
        field: Field::Password,
        min: Some(MIN_PASSWORD_LENGTH),
        max: Some(MAX_PASSWORD_LENGTH),
        byte_limited: true,
    },
];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when a registration request is rejected
///
/// The `Display` output is the message sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing '{field}' in request body")]
    MissingField { field: Field },

    #[error("Incorrect field type: expected string")]
    WrongType { field: Field },

    #[error("Cannot start or end with whitespace")]
    NotTrimmed { field: Field },

    #[error("Must be at least {min} characters long ")]
    TooShort { field: Field, min: usize },

    #[error("Must be at most {max} characters long ")]
    TooLong { field: Field, max: usize },
}

impl ValidationError {
    /// The field that failed validation
    pub fn field(&self) -> Field {
        match self {
            Self::MissingField { field }
            | Self::WrongType { field }
            | Self::NotTrimmed { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. } => *field,
        }
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Raw registration request as received from the caller
///
/// Each field holds whatever JSON value was sent. `None` means the key was
/// absent; an explicit `null` is `Some(Value::Null)` and fails the type rule.
#[derive(Clone, Default)]
pub struct RegistrationRequest {
    pub fullname: Option<Value>,
    pub username: Option<Value>,
    pub password: Option<Value>,
}

impl RegistrationRequest {
    /// Request where every given field is a string
    pub fn new(username: &str, password: &str, fullname: Option<&str>) -> Self {
        Self {
            fullname: fullname.map(Value::from),
            username: Some(Value::from(username)),
            password: Some(Value::from(password)),
        }
    }

    fn value(&self, field: Field) -> Option<&Value> {
        match field {
            Field::Username => self.username.as_ref(),
            Field::Password => self.password.as_ref(),
            Field::Fullname => self.fullname.as_ref(),
        }
    }

    fn text(&self, field: Field) -> Option<&str> {
        self.value(field).and_then(Value::as_str)
    }

    fn trimmed_len(&self, field: Field) -> usize {
        self.text(field)
            .map(|s| trim_whitespace(s).encode_utf16().count())
            .unwrap_or(0)
    }

    fn exceeds(&self, rule: &SizeRule, max: usize) -> bool {
        let bytes = self.text(rule.field).map(|s| trim_whitespace(s).len()).unwrap_or(0);
        self.trimmed_len(rule.field) > max || (rule.byte_limited && bytes > max)
    }

    fn required_text(&self, field: Field) -> Result<String, ValidationError> {
        self.text(field)
            .map(str::to_owned)
            .ok_or(ValidationError::MissingField { field })
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("fullname", &self.fullname)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// A request that passed every rule, values unchanged
#[derive(Debug)]
pub struct NormalizedRequest {
    pub username: String,
    pub password: ClearTextPassword,
    pub fullname: Option<String>,
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a registration request
///
/// Pure: the same request always yields the same result.
pub fn validate(request: &RegistrationRequest) -> Result<NormalizedRequest, ValidationError> {
    if let Some(field) = REQUIRED_FIELDS
        .into_iter()
        .find(|&field| request.value(field).is_none())
    {
        return Err(ValidationError::MissingField { field });
    }

    if let Some(field) = STRING_FIELDS
        .into_iter()
        .find(|&field| request.value(field).is_some_and(|v| !v.is_string()))
    {
        return Err(ValidationError::WrongType { field });
    }

    if let Some(field) = TRIMMED_FIELDS
        .into_iter()
        .find(|&field| request.text(field).is_some_and(|s| trim_whitespace(s) != s))
    {
        return Err(ValidationError::NotTrimmed { field });
    }

    if let Some((field, min)) = SIZED_FIELDS.iter().find_map(|rule| {
        rule.min
            .filter(|&min| request.trimmed_len(rule.field) < min)
            .map(|min| (rule.field, min))
    }) {
        return Err(ValidationError::TooShort { field, min });
    }

    if let Some((field, max)) = SIZED_FIELDS.iter().find_map(|rule| {
        rule.max
            .filter(|&max| request.exceeds(rule, max))
            .map(|max| (rule.field, max))
    }) {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(NormalizedRequest {
        username: request.required_text(Field::Username)?,
        password: ClearTextPassword::new(request.required_text(Field::Password)?),
        fullname: request.text(Field::Fullname).map(str::to_owned),
    })
}

/// Trim Unicode whitespace and the byte order mark
fn trim_whitespace(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(username: Option<Value>, password: Option<Value>, fullname: Option<Value>) -> RegistrationRequest {
        RegistrationRequest {
            fullname,
            username,
            password,
        }
    }

    fn rejected(request: &RegistrationRequest) -> ValidationError {
        match validate(request) {
            Ok(normalized) => panic!("expected rejection, got {normalized:?}"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_valid_request_passes_unchanged() {
        let normalized =
            validate(&RegistrationRequest::new("exampleUser", "examplePass", Some("Example User")))
                .unwrap();

        assert_eq!(normalized.username, "exampleUser");
        assert_eq!(normalized.fullname.as_deref(), Some("Example User"));
    }

    #[test]
    fn test_fullname_is_optional() {
        let normalized = validate(&RegistrationRequest::new("exampleUser", "examplePass", None)).unwrap();
        assert!(normalized.fullname.is_none());
    }

    #[test]
    fn test_missing_username() {
        let err = rejected(&request(None, Some(json!("examplePass")), Some(json!("Example User"))));
        assert_eq!(err, ValidationError::MissingField { field: Field::Username });
        assert_eq!(err.to_string(), "Missing 'username' in request body");
    }

    #[test]
    fn test_missing_password() {
        let err = rejected(&request(Some(json!("exampleUser")), None, Some(json!("Example User"))));
        assert_eq!(err, ValidationError::MissingField { field: Field::Password });
        assert_eq!(err.to_string(), "Missing 'password' in request body");
    }

    #[test]
    fn test_missing_username_reported_before_password() {
        let err = rejected(&request(None, None, None));
        assert_eq!(err.field(), Field::Username);
    }

    #[test]
    fn test_presence_checked_before_type() {
        let err = rejected(&request(Some(json!(123)), None, None));
        assert_eq!(err, ValidationError::MissingField { field: Field::Password });
    }

    #[test]
    fn test_non_string_username() {
        let err = rejected(&request(Some(json!(123)), Some(json!("examplePass")), Some(json!("Example User"))));
        assert_eq!(err, ValidationError::WrongType { field: Field::Username });
        assert_eq!(err.to_string(), "Incorrect field type: expected string");
    }

    #[test]
    fn test_non_string_password() {
        let err = rejected(&request(
            Some(json!("exampleUser")),
            Some(json!({ "object": 123 })),
            Some(json!("Example User")),
        ));
        assert_eq!(err, ValidationError::WrongType { field: Field::Password });
    }

    #[test]
    fn test_non_string_fullname() {
        let err = rejected(&request(Some(json!("exampleUser")), Some(json!("examplePass")), Some(json!(["Example"]))));
        assert_eq!(err, ValidationError::WrongType { field: Field::Fullname });
    }

    #[test]
    fn test_null_counts_as_present_with_wrong_type() {
        let err = rejected(&request(Some(Value::Null), Some(json!("examplePass")), None));
        assert_eq!(err, ValidationError::WrongType { field: Field::Username });

        let err = rejected(&request(Some(json!("exampleUser")), Some(json!("examplePass")), Some(Value::Null)));
        assert_eq!(err, ValidationError::WrongType { field: Field::Fullname });
    }

    #[test]
    fn test_non_trimmed_fields() {
        let err = rejected(&RegistrationRequest::new("  username  ", "examplePass", Some("Example User")));
        assert_eq!(err, ValidationError::NotTrimmed { field: Field::Username });
        assert_eq!(err.to_string(), "Cannot start or end with whitespace");

        let err = rejected(&RegistrationRequest::new("exampleUser", "examplePass\t", None));
        assert_eq!(err, ValidationError::NotTrimmed { field: Field::Password });

        let err = rejected(&RegistrationRequest::new("exampleUser", "examplePass", Some(" Example User")));
        assert_eq!(err, ValidationError::NotTrimmed { field: Field::Fullname });
    }

    #[test]
    fn test_inner_whitespace_is_allowed() {
        assert!(validate(&RegistrationRequest::new("example user", "example pass", Some("Example  User"))).is_ok());
    }

    #[test]
    fn test_whitespace_only_username_is_not_trimmed() {
        let err = rejected(&RegistrationRequest::new("   ", "examplePass", None));
        assert_eq!(err, ValidationError::NotTrimmed { field: Field::Username });
    }

    #[test]
    fn test_type_checked_before_trim() {
        let err = rejected(&request(Some(json!(" exampleUser ")), Some(json!(12345678)), None));
        assert_eq!(err, ValidationError::WrongType { field: Field::Password });
    }

    #[test]
    fn test_empty_username() {
        let err = rejected(&RegistrationRequest::new("", "examplePass", Some("Example User")));
        assert_eq!(err, ValidationError::TooShort { field: Field::Username, min: 1 });
        assert_eq!(err.to_string(), "Must be at least 1 characters long ");
    }

    #[test]
    fn test_password_too_short() {
        for len in 1..MIN_PASSWORD_LENGTH {
            let password = "a".repeat(len);
            let err = rejected(&RegistrationRequest::new("exampleUser", &password, None));
            assert_eq!(err, ValidationError::TooShort { field: Field::Password, min: 8 });
        }

        let err = rejected(&RegistrationRequest::new("exampleUser", "abc", None));
        assert_eq!(err.to_string(), "Must be at least 8 characters long ");
    }

    #[test]
    fn test_password_too_long() {
        let password = "a".repeat(73);
        let err = rejected(&RegistrationRequest::new("exampleUser", &password, None));
        assert_eq!(err, ValidationError::TooLong { field: Field::Password, max: 72 });
        assert_eq!(err.to_string(), "Must be at most 72 characters long ");
    }

    #[test]
    fn test_password_length_bounds_are_inclusive() {
        assert!(validate(&RegistrationRequest::new("exampleUser", &"a".repeat(8), None)).is_ok());
        assert!(validate(&RegistrationRequest::new("exampleUser", &"a".repeat(72), None)).is_ok());
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // 9 units, 27 bytes
        assert!(validate(&RegistrationRequest::new("exampleUser", "パスワード安全です", None)).is_ok());
        // 7 units
        let err = rejected(&RegistrationRequest::new("exampleUser", "パスワード安全", None));
        assert_eq!(err.field(), Field::Password);
    }

    #[test]
    fn test_astral_characters_count_twice() {
        // 4 emoji, 8 units, 16 bytes
        assert!(validate(&RegistrationRequest::new("exampleUser", "😀😀😀😀", None)).is_ok());

        let err = rejected(&RegistrationRequest::new("exampleUser", "😀😀😀a", None));
        assert_eq!(err, ValidationError::TooShort { field: Field::Password, min: 8 });

        // 18 emoji fill exactly 72 bytes
        assert!(validate(&RegistrationRequest::new("exampleUser", &"😀".repeat(18), None)).is_ok());

        // 36 emoji are 72 units but 144 bytes
        let err = rejected(&RegistrationRequest::new("exampleUser", &"😀".repeat(36), None));
        assert_eq!(err, ValidationError::TooLong { field: Field::Password, max: 72 });

        let err = rejected(&RegistrationRequest::new("exampleUser", &"😀".repeat(37), None));
        assert_eq!(err, ValidationError::TooLong { field: Field::Password, max: 72 });
    }

    #[test]
    fn test_password_longer_than_72_bytes_is_rejected() {
        // 39 units, 75 bytes
        let password = format!("{}abc", "é".repeat(36));
        let err = rejected(&RegistrationRequest::new("exampleUser", &password, None));
        assert_eq!(err, ValidationError::TooLong { field: Field::Password, max: 72 });
        assert_eq!(err.to_string(), "Must be at most 72 characters long ");

        // 36 units, 72 bytes
        assert!(validate(&RegistrationRequest::new("exampleUser", &"é".repeat(36), None)).is_ok());
    }

    #[test]
    fn test_multibyte_username_has_no_byte_limit() {
        assert!(validate(&RegistrationRequest::new(&"é".repeat(100), "examplePass", None)).is_ok());
    }

    #[test]
    fn test_username_length_reported_before_password_length() {
        let err = rejected(&RegistrationRequest::new("", "abc", None));
        assert_eq!(err, ValidationError::TooShort { field: Field::Username, min: 1 });

        let err = rejected(&RegistrationRequest::new("", &"a".repeat(73), None));
        assert_eq!(err, ValidationError::TooShort { field: Field::Username, min: 1 });
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let invalid = RegistrationRequest::new("exampleUser", "abc", None);
        let first = rejected(&invalid);
        let second = rejected(&invalid);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", RegistrationRequest::new("exampleUser", "examplePass", None));
        assert!(debug.contains("exampleUser"));
        assert!(!debug.contains("examplePass"));
    }
}
