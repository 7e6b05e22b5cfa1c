use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::W4001.as_str(), "W4001");
}

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let classes = [
            code.is_unexpanded_pack_error(),
            code.is_length_conflict(),
            code.is_fold_error(),
            code.is_pack_name_error(),
            code.is_warning(),
        ];
        let count = classes.iter().filter(|&&c| c).count();
        assert_eq!(count, 1, "{code} should belong to exactly one class");
    }
}

#[test]
fn test_from_str_round_trips_every_code() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
}

#[test]
fn test_from_str_is_case_insensitive() {
    assert_eq!("e2002".parse::<ErrorCode>(), Ok(ErrorCode::E2002));
    assert_eq!("w3001".parse::<ErrorCode>(), Ok(ErrorCode::W3001));
    assert!("E9999".parse::<ErrorCode>().is_err());
}

#[test]
fn test_warning_prefix_matches_is_warning() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().starts_with('W'), code.is_warning());
    }
}
