//! Text normalization applied to block text before lookups.

/// Reduce block text to its lookup key: punctuation dropped, lowercased,
/// whitespace collapsed and a few accented letters folded.
pub fn minify(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '%' | '?' | ':' | '▶' | '◀' | '▸' | '◂'))
        .collect();

    let lowered = stripped.to_lowercase();
    let collapsed = regex!(r"[ \t]+").replace_all(&lowered, " ");

    let minified = collapsed
        .trim()
        .replace('ß', "ss")
        .replace('ü', "u")
        .replace('ö', "o")
        .replace('ä', "a");

    // the ellipsis block is nothing but punctuation
    if minified.is_empty() && is_ellipsis(text) {
        return "...".to_string();
    }

    minified
}

/// Pad every underscore placeholder with a space on either side.
pub fn normalize_spec(spec: &str) -> String {
    let before = regex!(r"([^ ])_").replace_all(spec, "${1} _");
    regex!(r"_([^ ])")
        .replace_all(&before, "_ ${1}")
        .into_owned()
}

fn is_ellipsis(text: &str) -> bool {
    text.chars()
        .filter(|c| *c != ' ')
        .eq("...".chars())
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn punctuation_and_case() {
        assert_eq!(minify("Touching _?"), "touching _");
        assert_eq!(minify("go to x: _ y: _"), "go to x _ y _");
        assert_eq!(minify("set size to _%"), "set size to _");
        assert_eq!(minify("  if on edge,   bounce\t"), "if on edge bounce");
        assert_eq!(minify("▶ play ◀"), "play");
    }

    #[test]
    fn folding_accents() {
        assert_eq!(minify("größe"), "grosse");
        assert_eq!(minify("Lautstärke ändern"), "lautstarke andern");
        assert_eq!(minify("übergröße"), "ubergrosse");
    }

    #[test]
    fn ellipsis() {
        assert_eq!(minify("..."), "...");
        assert_eq!(minify(". . ."), "...");
        assert_eq!(minify("…"), "…");
        assert_eq!(minify("?.."), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "...",
            "Say _ for _ Secs",
            "GRÖSSE ÄNDERN um _",
            "when  distance <  _",
            "ß ü ö ä ß",
            "  tabs\t\tand   spaces  ",
        ];
        for sample in samples {
            let once = minify(sample);
            assert_eq!(minify(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn padding_placeholders() {
        assert_eq!(normalize_spec("go to x:_ y:_"), "go to x: _ y: _");
        assert_eq!(normalize_spec("set size to _%"), "set size to _ %");
        assert_eq!(normalize_spec("move _ steps"), "move _ steps");
        assert_eq!(normalize_spec("_"), "_");
    }
}
