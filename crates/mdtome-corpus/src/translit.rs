//! Title-to-slug helpers for the canonical pass.

/// Lowercase and transliterate Cyrillic text to Latin. Characters outside
/// the table pass through unchanged.
#[must_use]
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.to_lowercase().chars() {
        match ch {
            'а' => out.push('a'),
            'б' => out.push('b'),
            'в' => out.push('v'),
            'г' => out.push('g'),
            'д' => out.push('d'),
            'е' | 'э' => out.push('e'),
            'ё' => out.push_str("yo"),
            'ж' => out.push_str("zh"),
            'з' => out.push('z'),
            'и' | 'ы' => out.push('i'),
            'й' => out.push_str("ij"),
            'к' => out.push('k'),
            'л' => out.push('l'),
            'м' => out.push('m'),
            'н' => out.push('n'),
            'о' => out.push('o'),
            'п' => out.push('p'),
            'р' => out.push('r'),
            'с' => out.push('s'),
            'т' => out.push('t'),
            'у' => out.push('u'),
            'ф' => out.push('f'),
            'х' => out.push('h'),
            'ц' => out.push_str("ts"),
            'ч' => out.push_str("ch"),
            'ш' | 'щ' => out.push_str("sh"),
            'ь' | 'ъ' => {}
            'ю' => out.push_str("ju"),
            'я' => out.push_str("ja"),
            other => out.push(other),
        }
    }
    out
}

/// Turn a title into a path segment: parentheses are dropped; spaces,
/// slashes, and commas become dashes.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' => {}
            ' ' | '/' | ',' => out.push('-'),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_transliterate_lowercases_and_maps() {
        assert_eq!(transliterate("Настройка"), "nastroijka");
        assert_eq!(transliterate("Жизнь"), "zhizn");
        assert_eq!(transliterate("объект"), "obekt");
    }

    #[test]
    fn test_transliterate_keeps_latin_and_digits() {
        assert_eq!(transliterate("WebRTC 2.0"), "webrtc 2.0");
    }

    #[test]
    fn test_slugify_drops_parens_and_dashes_separators() {
        assert_eq!(slugify("server setup (draft)"), "server-setup-draft");
        assert_eq!(slugify("api/stream, v2"), "api-stream--v2");
    }

    #[test]
    fn test_slug_of_transliterated_title() {
        assert_eq!(
            slugify(&transliterate("Запись потока")),
            "zapis-potoka"
        );
    }
}
