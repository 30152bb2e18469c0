use cricket_terminal::player::{Field, FormValues};
use cricket_terminal::validate::{field_error, validate_form};

fn valid_form() -> FormValues {
    FormValues {
        player_name: "Rahul Sharma".to_string(),
        player_city: "Mumbai".to_string(),
        phone: "1234567890".to_string(),
        played_in: "Domestic".to_string(),
        player_type: "Batsman".to_string(),
        last_played_for: "Team A".to_string(),
    }
}

#[test]
fn valid_form_has_no_errors() {
    assert!(validate_form(&valid_form()).is_empty());
}

#[test]
fn every_missing_field_is_reported() {
    let errors = validate_form(&FormValues::default());
    let keys: Vec<Field> = errors.keys().copied().collect();
    assert_eq!(keys, Field::ALL.to_vec());
    assert_eq!(errors[&Field::PlayerName], "Name is required");
    assert_eq!(errors[&Field::PlayerCity], "Player City is required");
    assert_eq!(errors[&Field::Phone], "Phone is required");
    assert_eq!(errors[&Field::PlayedIn], "Played In is required");
    assert_eq!(errors[&Field::PlayerType], "Player Type is required");
    assert_eq!(errors[&Field::LastPlayedFor], "Last Played For is required");
}

#[test]
fn single_missing_field_keeps_its_key() {
    let mut form = valid_form();
    form.phone = String::new();
    let errors = validate_form(&form);
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key(&Field::Phone));
}

#[test]
fn phone_requires_exactly_ten_digits() {
    assert!(field_error(Field::Phone, "1234567890").is_none());
    for bad in ["12345", "12345678901", "12345abcde"] {
        let err = field_error(Field::Phone, bad).expect("should fail");
        assert_eq!(err, "Phone must be exactly 10 digits");
    }
}

#[test]
fn name_accepts_punctuated_names() {
    assert!(field_error(Field::PlayerName, "O'Brien-Smith").is_none());
    assert!(field_error(Field::PlayerName, "J. R. Jadeja").is_none());
}

#[test]
fn name_rejects_digits_and_short_input() {
    assert!(field_error(Field::PlayerName, "John123").is_some());
    let err = field_error(Field::PlayerName, "A").expect("single char fails");
    assert_eq!(err, "Name must be at least 2 characters");
}

#[test]
fn values_are_trimmed_before_validation() {
    assert!(field_error(Field::Phone, " 1234567890 ").is_none());
    assert!(field_error(Field::PlayerName, "  Rohit  ").is_none());
}

#[test]
fn first_failing_rule_supplies_the_message() {
    // Whitespace only trips required, not the pattern rule.
    assert_eq!(
        field_error(Field::PlayerName, "   ").as_deref(),
        Some("Name is required")
    );
    // A digit trips the pattern rule before the length bound.
    assert_eq!(
        field_error(Field::PlayerName, "7").as_deref(),
        Some("Name may only contain letters, spaces, apostrophes, hyphens, or dots")
    );
}

#[test]
fn selects_require_known_options() {
    assert!(field_error(Field::PlayedIn, "Domestic").is_none());
    assert!(field_error(Field::PlayerType, "Wicket-keeper").is_none());
    assert!(field_error(Field::LastPlayedFor, "Team F").is_none());
    assert_eq!(
        field_error(Field::PlayedIn, "").as_deref(),
        Some("Played In is required")
    );
    assert_eq!(
        field_error(Field::PlayedIn, "Mars").as_deref(),
        Some("Played In must be one of the listed options")
    );
}

#[test]
fn long_city_is_rejected() {
    let long = "a".repeat(61);
    assert_eq!(
        field_error(Field::PlayerCity, &long).as_deref(),
        Some("Player City must be at most 60 characters")
    );
}
