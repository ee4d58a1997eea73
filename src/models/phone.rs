/// Country code every normalized number starts with.
pub const COUNTRY_CODE: &str = "62";

/// Converts arbitrary phone input into the canonical dialable form: digits
/// only, leading country code `62`, no separators.
///
/// The policy is permissive on purpose. Nothing is validated: an empty or
/// foreign number still comes back syntactically normalized (`""` becomes
/// `"62"`, `"+1 555"` becomes `"621555"`). Callers that need strict
/// validation layer it on top.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let digits = match digits.strip_prefix('0') {
        Some(rest) => format!("{}{}", COUNTRY_CODE, rest),
        None => digits,
    };

    if digits.starts_with(COUNTRY_CODE) {
        digits
    } else {
        format!("{}{}", COUNTRY_CODE, digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunk_prefix_is_replaced_not_removed() {
        let raw = "081234567890";
        let normalized = normalize_phone(raw);

        assert_eq!(normalized, "6281234567890");
        assert_eq!(normalized.len(), raw.len() + 1);
    }

    #[test]
    fn separators_are_stripped() {
        assert_eq!(normalize_phone("+62 812-3456-7890"), "6281234567890");
        assert_eq!(normalize_phone("(0812) 3456 7890"), "6281234567890");
    }

    #[test]
    fn already_canonical_is_idempotent() {
        let once = normalize_phone("6281234567890");
        assert_eq!(once, "6281234567890");
        assert_eq!(normalize_phone(&once), once);
    }

    #[test]
    fn bare_subscriber_number_gets_country_code() {
        assert_eq!(normalize_phone("81234567890"), "6281234567890");
    }

    #[test]
    fn malformed_input_never_fails() {
        assert_eq!(normalize_phone(""), "62");
        assert_eq!(normalize_phone("not a number"), "62");
        assert_eq!(normalize_phone("+1 555"), "621555");
    }
}
