//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn ada() -> User {
    User::try_from_strings("ada-1", "Ada Lovelace", "ada@example.com").expect("valid user")
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("   ", UserValidationError::EmptyId)]
#[case(" padded", UserValidationError::InvalidId)]
#[case("padded\t", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_enforces_length_limit() {
    let at_limit = "x".repeat(USER_ID_MAX);
    assert!(UserId::new(at_limit).is_ok());

    let over_limit = "x".repeat(USER_ID_MAX + 1);
    assert_eq!(
        UserId::new(over_limit),
        Err(UserValidationError::IdTooLong { max: USER_ID_MAX })
    );
}

#[rstest]
fn random_ids_are_distinct() {
    assert_ne!(UserId::random(), UserId::random());
}

#[rstest]
#[case("", Err(UserValidationError::EmptyUsername))]
#[case("  ", Err(UserValidationError::EmptyUsername))]
#[case("Jacqualine Gilcoine", Ok(()))]
fn username_validation(#[case] raw: &str, #[case] expected: Result<(), UserValidationError>) {
    assert_eq!(Username::new(raw).map(|_| ()), expected);
}

#[rstest]
#[case("", Err(UserValidationError::EmptyEmail))]
#[case("no-at-sign", Err(UserValidationError::InvalidEmail))]
#[case("a@b", Ok(()))]
fn email_validation(#[case] raw: &str, #[case] expected: Result<(), UserValidationError>) {
    assert_eq!(Email::new(raw).map(|_| ()), expected);
}

#[rstest]
fn user_serialises_camel_case(ada: User) {
    let value = serde_json::to_value(&ada).expect("serialise user");
    assert_eq!(
        value,
        json!({"id": "ada-1", "username": "Ada Lovelace", "email": "ada@example.com"})
    );
}

#[rstest]
fn user_deserialisation_validates_fields() {
    let payload = json!({"id": "ada-1", "username": "Ada", "email": "missing-at"});
    let error = serde_json::from_value::<User>(payload).expect_err("invalid email rejected");
    assert!(error.to_string().contains("'@'"));
}

#[rstest]
fn validation_errors_describe_limits() {
    let message = UserValidationError::UsernameTooLong { max: USERNAME_MAX }.to_string();
    assert_eq!(message, "username must be at most 64 characters");
}
