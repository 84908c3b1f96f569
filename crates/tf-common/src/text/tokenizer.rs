use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of two or more Unicode word characters. Single characters are dropped.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Lowercase the document and split it into word tokens (no stemming, no stop words).
pub fn tokenize(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_word_boundaries() {
        assert_eq!(
            tokenize("Manage TEAM budget, hiring-plans"),
            vec!["manage", "team", "budget", "hiring", "plans"]
        );
    }

    #[test]
    fn drops_single_character_tokens() {
        assert_eq!(tokenize("a b cd 1 23"), vec!["cd", "23"]);
    }

    #[test]
    fn keeps_accented_words_whole() {
        assert_eq!(tokenize("Gestión de presupuesto"), vec!["gestión", "de", "presupuesto"]);
    }

    #[test]
    fn empty_document_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" - ! ").is_empty());
    }
}
