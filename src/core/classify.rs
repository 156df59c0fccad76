use crate::domain::model::CategoryCode;

/// Maps a feed line's second column to its category. Only exact matches count.
pub fn classify(second_field: Option<&str>) -> CategoryCode {
    match second_field {
        Some("phishing") => CategoryCode::Phishing,
        Some("malware") => CategoryCode::Malware,
        _ => CategoryCode::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        assert_eq!(classify(Some("phishing")), CategoryCode::Phishing);
        assert_eq!(classify(Some("malware")), CategoryCode::Malware);
        assert_eq!(classify(Some("phishing")).code(), 1);
        assert_eq!(classify(Some("malware")).code(), 2);
    }

    #[test]
    fn test_everything_else_is_none() {
        for value in [None, Some(""), Some("Malware"), Some("phishing "), Some("botnet")] {
            assert_eq!(classify(value), CategoryCode::None, "{:?}", value);
        }
    }
}
