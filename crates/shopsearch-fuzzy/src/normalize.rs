use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use shopsearch_core::config::SearchSettings;

/// Folds field text and queries into the character sequences that get compared.
///
/// The same normaliser must be used for an index and the queries run against
/// it; [`crate::CatalogIndex`] keeps the one it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normalizer {
    pub case_sensitive: bool,
    pub ignore_diacritics: bool,
}

impl Normalizer {
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self { case_sensitive: settings.case_sensitive, ignore_diacritics: settings.ignore_diacritics }
    }

    pub fn fold(&self, text: &str) -> Vec<char> {
        let chars: Vec<char> = if self.ignore_diacritics {
            text.nfd().filter(|c| !is_combining_mark(*c)).collect()
        } else {
            text.chars().collect()
        };
        if self.case_sensitive {
            chars
        } else {
            chars.into_iter().flat_map(char::to_lowercase).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folded(n: Normalizer, s: &str) -> String {
        n.fold(s).into_iter().collect()
    }

    #[test]
    fn lowercases_by_default() {
        assert_eq!(folded(Normalizer::default(), "Red Running SHOE"), "red running shoe");
    }

    #[test]
    fn case_sensitive_keeps_case() {
        let n = Normalizer { case_sensitive: true, ignore_diacritics: false };
        assert_eq!(folded(n, "Café"), "Café");
    }

    #[test]
    fn strips_diacritics_when_asked() {
        let n = Normalizer { case_sensitive: false, ignore_diacritics: true };
        assert_eq!(folded(n, "Crème Brûlée"), "creme brulee");
        assert_eq!(folded(Normalizer::default(), "Café"), "café");
    }
}
