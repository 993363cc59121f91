//! Property tests for decoding.

use digo::unmarshal;
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Default, Clone, PartialEq)]
struct Account {
    name: String,
    uid: i64,
    email: String,
}

digo::impl_record!(Account {
    name => "name, stringfield(), minmax(1|16)",
    uid => "uid, intfield(), minmax(10|99)",
    email => "email, emailfield()",
});

#[derive(Debug, Default)]
struct Scored {
    score: i64,
}

digo::impl_record!(Scored {
    score => "score, intfield(), minmax(0|1000)",
});

proptest! {
    #[test]
    fn valid_documents_decode_exactly(
        name in "[a-zA-Z0-9 ]{1,16}",
        uid in 10i64..=99,
        user in "[a-z]{2,8}",
        domain in "[a-z]{2,8}",
        tld in "[a-z]{2,3}",
    ) {
        let email = format!("{user}@{domain}.{tld}");
        let input = json!({"name": name, "uid": uid, "email": email}).to_string();
        let mut account = Account::default();
        unmarshal(input.as_bytes(), &mut account).unwrap();
        prop_assert_eq!(&account.name, &name);
        prop_assert_eq!(account.uid, uid);
        prop_assert_eq!(&account.email, &email);
    }

    #[test]
    fn decoding_is_idempotent(uid in 10i64..=99, name in "[a-z]{1,16}") {
        let input = json!({"uid": uid, "name": name}).to_string();
        let mut first = Account::default();
        let mut second = Account::default();
        let a = unmarshal(input.as_bytes(), &mut first).map_err(|e| e.to_string());
        let b = unmarshal(input.as_bytes(), &mut second).map_err(|e| e.to_string());
        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn absent_keys_keep_zero_values(uid in 10i64..=99) {
        let input = json!({"uid": uid}).to_string();
        let mut account = Account::default();
        unmarshal(input.as_bytes(), &mut account).unwrap();
        prop_assert_eq!(account.name, "");
        prop_assert_eq!(account.email, "");
        prop_assert_eq!(account.uid, uid);
    }

    #[test]
    fn int_range_matches_inclusive_bounds(score in -100i64..1100) {
        let input = json!({"score": score}).to_string();
        let mut scored = Scored::default();
        let result = unmarshal(input.as_bytes(), &mut scored);
        if (0..=1000).contains(&score) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(scored.score, score);
        } else if score < 0 {
            prop_assert_eq!(result.unwrap_err().to_string(), "field: score is too small");
        } else {
            prop_assert_eq!(result.unwrap_err().to_string(), "field: score is too big");
        }
    }

    #[test]
    fn string_length_matches_inclusive_bounds(name in "[a-zé]{0,24}") {
        let input = json!({"name": name}).to_string();
        let mut account = Account::default();
        let result = unmarshal(input.as_bytes(), &mut account);
        let len = name.chars().count();
        if len == 0 {
            prop_assert_eq!(result.unwrap_err().to_string(), "field: name is too short");
        } else if len > 16 {
            prop_assert_eq!(result.unwrap_err().to_string(), "field: name is too long");
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
