//! Document identifiers from display names
//!
//! Lowercase, Turkish letters transliterated 1:1, everything outside
//! `[a-z0-9]` becomes `-`. No collapsing or trimming of hyphens, so the
//! same name always yields the same identifier.

/// Derive a document identifier from a human-entered name
pub fn slugify(name: &str) -> String {
    name.chars()
        // `İ` lowercases to `i` + U+0307; fold it to a plain `i` first
        .flat_map(|c| if c == 'İ' { 'i'.to_lowercase() } else { c.to_lowercase() })
        .map(|c| match transliterate(c) {
            Some(ascii) => ascii,
            None if c.is_ascii_lowercase() || c.is_ascii_digit() => c,
            None => '-',
        })
        .collect()
}

fn transliterate(c: char) -> Option<char> {
    match c {
        'ş' => Some('s'),
        'ğ' => Some('g'),
        'ü' => Some('u'),
        'ç' => Some('c'),
        'ı' => Some('i'),
        'ö' => Some('o'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turkish_names_transliterate() {
        assert_eq!(slugify("Tatlılar"), "tatlilar");
        assert_eq!(slugify("Sıcak İçecekler"), "sicak-icecekler");
        assert_eq!(slugify("Soğuk İçecekler"), "soguk-icecekler");
        assert_eq!(slugify("ŞÖLEN Çorbası"), "solen-corbasi");
        assert_eq!(slugify("Atıştırmalıklar"), "atistirmaliklar");
    }

    #[test]
    fn hyphens_are_neither_collapsed_nor_trimmed() {
        assert_eq!(slugify(" Meyve  Suyu! "), "-meyve--suyu--");
        assert_eq!(slugify("Kahve (Büyük)"), "kahve--buyuk-");
    }

    #[test]
    fn punctuation_only_names_yield_only_hyphens() {
        for name in ["!!!", "...", "—–", "¿?", "★"] {
            let id = slugify(name);
            assert!(id.chars().all(|c| c == '-'), "{name:?} -> {id:?}");
            assert_eq!(id, slugify(name));
        }
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn digits_survive_and_other_scripts_do_not() {
        assert_eq!(slugify("Menü 2024"), "menu-2024");
        assert_eq!(slugify("Crème Brûlée"), "cr-me-br-l-e");
    }
}
