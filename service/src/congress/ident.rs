//! Synthetic identifier and image-key derivation.
//!
//! The synthetic `congress_id` is derived from name, state, and district with
//! deterministic truncation. It does not guarantee global uniqueness: two
//! legislators in the same state/district whose names share the first five
//! alphanumeric characters would collide. That limitation is inherited from
//! the identifier scheme already persisted in user records, so it is
//! preserved rather than fixed with a disambiguation suffix that would break
//! existing references.

/// Name suffixes dropped when deriving an image key.
const SUFFIX_TOKENS: &[&str] = &["Jr.", "Sr.", "I", "II", "III", "IV"];

/// Derive the synthetic identifier for a legislator.
///
/// Senators (no district) get `"{STATE}_{NAME5}"`; representatives get
/// `"{STATE}D{district}_{NAME5}"`, with `DAL` standing in for At-Large or
/// blank districts. `NAME5` is the first five characters of the uppercased,
/// alphanumeric-only name.
#[must_use]
pub fn synthesize_id(name: &str, state_code: &str, district: Option<&str>) -> String {
    let name_part: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_uppercase)
        .take(5)
        .collect();
    let state_part = state_code.to_uppercase();

    match district {
        None => format!("{state_part}_{name_part}"),
        Some(district) => {
            let trimmed = district.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("at-large") {
                format!("{state_part}DAL_{name_part}")
            } else {
                format!("{state_part}D{trimmed}_{name_part}")
            }
        }
    }
}

/// Derive the image-lookup key for a legislator's portrait.
///
/// Drops a trailing generational suffix, lowercases, turns spaces into
/// underscores, and strips periods and apostrophes.
#[must_use]
pub fn image_key(name: &str) -> String {
    let mut parts: Vec<&str> = name.split_whitespace().collect();
    if parts.last().is_some_and(|last| SUFFIX_TOKENS.contains(last)) {
        parts.pop();
    }

    let mut key: String = parts
        .join(" ")
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '.' | '\'' => None,
            other => Some(other),
        })
        .collect();
    key.push_str(".jpg");
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_identifier() {
        assert_eq!(synthesize_id("Jerry Carl", "AL", Some("1")), "ALD1_JERRY");
    }

    #[test]
    fn at_large_representative_identifier() {
        assert_eq!(
            synthesize_id("Jerry Carl", "AL", Some("At-Large")),
            "ALDAL_JERRY"
        );
        assert_eq!(synthesize_id("Jerry Carl", "AL", Some("  ")), "ALDAL_JERRY");
    }

    #[test]
    fn senator_identifier() {
        assert_eq!(synthesize_id("Tommy Tuberville", "AL", None), "AL_TOMMY");
    }

    #[test]
    fn name_part_is_truncated_not_uniqued() {
        // Same five-character prefix collides by design.
        assert_eq!(
            synthesize_id("Jerry Carl", "AL", Some("1")),
            synthesize_id("Jerry Carlson", "AL", Some("1"))
        );
    }

    #[test]
    fn name_part_ignores_punctuation_and_keeps_accents() {
        assert_eq!(synthesize_id("Raúl Grijalva", "AZ", Some("7")), "AZD7_RAÚLG");
        assert_eq!(
            synthesize_id("Anthony D'Esposito", "NY", Some("4")),
            "NYD4_ANTHO"
        );
    }

    #[test]
    fn image_keys() {
        let cases = [
            ("Jerry Carl", "jerry_carl.jpg"),
            ("Bill Pascrell Jr.", "bill_pascrell.jpg"),
            ("Anthony D'Esposito", "anthony_desposito.jpg"),
            ("Debbie Wasserman Schultz", "debbie_wasserman_schultz.jpg"),
            ("Harold Rogers II", "harold_rogers.jpg"),
        ];

        for (name, expected) in cases {
            assert_eq!(image_key(name), expected, "name {name:?}");
        }
    }
}
