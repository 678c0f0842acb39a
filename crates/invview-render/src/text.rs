#![forbid(unsafe_code)]

//! Display-width helpers built on grapheme clusters.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal columns occupied by one grapheme cluster (0, 1, or 2).
#[inline]
pub fn grapheme_width(g: &str) -> usize {
    UnicodeWidthStr::width(g).min(2)
}

/// Terminal columns occupied by `text`.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

/// Longest prefix of `text` that fits in `max` columns.
pub fn truncate_to_width(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, g) in text.grapheme_indices(true) {
        let w = grapheme_width(g);
        if used + w > max {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Truncate to `max` columns, ending with `…` when anything was cut.
pub fn ellipsize(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_owned();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = truncate_to_width(text, max - 1).to_owned();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ascii_width() {
        assert_eq!(display_width("Galaxy Sword"), 12);
    }

    #[test]
    fn emoji_are_wide() {
        assert_eq!(display_width("🌈"), 2);
        assert_eq!(display_width("a🎩b"), 4);
    }

    #[test]
    fn truncate_never_splits_wide() {
        assert_eq!(truncate_to_width("a🎩b", 2), "a");
        assert_eq!(truncate_to_width("a🎩b", 3), "a🎩");
    }

    #[test]
    fn ellipsize_marks_cut() {
        assert_eq!(ellipsize("Dragon Scale Armor", 8), "Dragon …");
        assert_eq!(ellipsize("Hat", 8), "Hat");
        assert_eq!(ellipsize("Hat", 0), "");
    }

    proptest! {
        #[test]
        fn truncate_fits(s in "\\PC{0,40}", max in 0usize..30) {
            let t = truncate_to_width(&s, max);
            prop_assert!(display_width(t) <= max);
            prop_assert!(s.starts_with(t));
        }
    }
}
