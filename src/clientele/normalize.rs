//! Name normalization.
//!
//! A client's display name is mapped to a canonical ASCII key that doubles as
//! the storage filename stem and the cache key. The mapping is pure and
//! derived only from the name text, so it is stable across restarts.

/// Normalize a display name into its storage key.
///
/// Lowercases, folds accented Latin vowels plus `ñ`/`ç` to plain ASCII,
/// replaces spaces with underscores, then strips anything outside
/// `[a-z0-9_]`.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'á' => Some('a'),
            'é' => Some('e'),
            'í' => Some('i'),
            'ó' => Some('o'),
            'ú' => Some('u'),
            'ñ' => Some('n'),
            'ç' => Some('c'),
            ' ' => Some('_'),
            'a'..='z' | '0'..='9' | '_' => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(normalize_name("Ana Torres"), "ana_torres");
    }

    #[test]
    fn folds_accents() {
        assert_eq!(normalize_name("Ana López"), "ana_lopez");
        assert_eq!(normalize_name("JOSÉ MUÑOZ"), "jose_munoz");
        assert_eq!(normalize_name("François"), "francois");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize_name("O'Brien, Jr."), "obrien_jr");
    }

    #[test]
    fn accent_variants_collide() {
        assert_eq!(normalize_name("Ana López"), normalize_name("ana lopez"));
    }

    #[test]
    fn trims_before_normalizing() {
        assert_eq!(normalize_name("  Ana Torres  "), "ana_torres");
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(normalize_name("Agent_47"), "agent_47");
    }
}
