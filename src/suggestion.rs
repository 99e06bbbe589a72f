//! Suggests a category for a new transaction from its description.
//!
//! A bag-of-words vocabulary and a multinomial naive Bayes classifier are
//! fitted from scratch on every call using the `(description, category)`
//! pairs already in the ledger, then discarded.

use std::{
    collections::{BTreeMap, HashMap},
    sync::OnceLock,
};

use regex::Regex;

use crate::ledger::Transaction;

/// The categories offered when entering a transaction.
pub const CATEGORIES: [&str; 4] = ["Alimentação", "Transporte", "Lazer", "Outros"];

/// The category suggested when no prediction can be made.
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Additive smoothing applied to every token count.
const SMOOTHING: f64 = 1.0;

/// The outcome of asking for a category suggestion.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    /// The classifier predicted this category.
    Predicted(String),
    /// No prediction could be made, [DEFAULT_CATEGORY] should be used.
    Fallback(FallbackReason),
}

/// Why a suggestion fell back to the default category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The ledger has no transactions.
    EmptyLedger,
    /// No transaction in the ledger has a description.
    NoDescriptions,
    /// The description to classify is empty.
    EmptyDescription,
    /// The training descriptions did not contain a single token.
    EmptyVocabulary,
}

impl Suggestion {
    /// The suggested category, [DEFAULT_CATEGORY] for a fallback.
    pub fn category(&self) -> &str {
        match self {
            Suggestion::Predicted(category) => category,
            Suggestion::Fallback(_) => DEFAULT_CATEGORY,
        }
    }
}

/// Suggest a category for `description` based on the categories previously
/// used for similar descriptions in `ledger`.
///
/// This never fails, any case where a classifier cannot be fitted produces
/// [Suggestion::Fallback].
pub fn suggest(ledger: &[Transaction], description: &str) -> Suggestion {
    let suggestion = suggest_inner(ledger, description);

    match &suggestion {
        Suggestion::Predicted(category) => {
            tracing::debug!("Suggested category {category:?} for {description:?}")
        }
        Suggestion::Fallback(reason) => {
            tracing::debug!("Falling back to the default category for {description:?}: {reason:?}")
        }
    }

    suggestion
}

fn suggest_inner(ledger: &[Transaction], description: &str) -> Suggestion {
    if ledger.is_empty() {
        return Suggestion::Fallback(FallbackReason::EmptyLedger);
    }

    let training_set: Vec<(&str, &str)> = ledger
        .iter()
        .filter(|transaction| !transaction.description.trim().is_empty())
        .map(|transaction| (transaction.description.as_str(), transaction.category.as_str()))
        .collect();

    if training_set.is_empty() {
        return Suggestion::Fallback(FallbackReason::NoDescriptions);
    }

    if description.trim().is_empty() {
        return Suggestion::Fallback(FallbackReason::EmptyDescription);
    }

    let Some(vectorizer) = Vectorizer::fit(training_set.iter().map(|(text, _)| *text)) else {
        return Suggestion::Fallback(FallbackReason::EmptyVocabulary);
    };

    let classifier = NaiveBayes::fit(&vectorizer, &training_set);

    match classifier.predict(&vectorizer.transform(description)) {
        Some(category) => Suggestion::Predicted(category.to_owned()),
        None => Suggestion::Fallback(FallbackReason::EmptyVocabulary),
    }
}

/// Split `text` into lowercase tokens of two or more word characters.
fn tokenise(text: &str) -> impl Iterator<Item = String> + '_ {
    static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

    let pattern = TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").unwrap());

    pattern
        .find_iter(text)
        .map(|token| token.as_str().to_lowercase())
}

/// Maps tokens to column indices of a count vector.
#[derive(Debug)]
struct Vectorizer {
    vocabulary: HashMap<String, usize>,
}

impl Vectorizer {
    /// Build the vocabulary, or `None` if `texts` contain no tokens.
    fn fit<'a>(texts: impl Iterator<Item = &'a str>) -> Option<Self> {
        let mut vocabulary = HashMap::new();

        for text in texts {
            for token in tokenise(text) {
                let next_index = vocabulary.len();
                vocabulary.entry(token).or_insert(next_index);
            }
        }

        if vocabulary.is_empty() {
            None
        } else {
            Some(Self { vocabulary })
        }
    }

    fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Token counts for `text`, tokens outside the vocabulary are ignored.
    fn transform(&self, text: &str) -> Vec<usize> {
        let mut counts = vec![0; self.len()];

        for token in tokenise(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                counts[index] += 1;
            }
        }

        counts
    }
}

/// Per-category log priors and token log likelihoods.
#[derive(Debug)]
struct NaiveBayes<'a> {
    /// Keyed by category so ties resolve to the first category in sorted order.
    classes: BTreeMap<&'a str, ClassModel>,
}

#[derive(Debug)]
struct ClassModel {
    log_prior: f64,
    log_likelihoods: Vec<f64>,
}

impl<'a> NaiveBayes<'a> {
    fn fit(vectorizer: &Vectorizer, training_set: &[(&'a str, &'a str)]) -> Self {
        let mut documents_per_class: BTreeMap<&'a str, usize> = BTreeMap::new();
        let mut token_counts: BTreeMap<&'a str, Vec<usize>> = BTreeMap::new();

        for &(text, category) in training_set {
            *documents_per_class.entry(category).or_default() += 1;

            let counts = token_counts
                .entry(category)
                .or_insert_with(|| vec![0; vectorizer.len()]);

            for (total, count) in counts.iter_mut().zip(vectorizer.transform(text)) {
                *total += count;
            }
        }

        let document_count = training_set.len() as f64;
        let vocabulary_size = vectorizer.len() as f64;

        let classes = token_counts
            .into_iter()
            .map(|(category, counts)| {
                let class_total = counts.iter().sum::<usize>() as f64;
                let denominator = class_total + SMOOTHING * vocabulary_size;
                let log_likelihoods = counts
                    .iter()
                    .map(|&count| ((count as f64 + SMOOTHING) / denominator).ln())
                    .collect();
                let log_prior = (documents_per_class[category] as f64 / document_count).ln();

                (
                    category,
                    ClassModel {
                        log_prior,
                        log_likelihoods,
                    },
                )
            })
            .collect();

        Self { classes }
    }

    /// The most likely category for the token counts `features`.
    fn predict(&self, features: &[usize]) -> Option<&'a str> {
        let mut best: Option<(&'a str, f64)> = None;

        for (&category, model) in &self.classes {
            let score = model.log_prior
                + model
                    .log_likelihoods
                    .iter()
                    .zip(features)
                    .map(|(log_likelihood, &count)| log_likelihood * count as f64)
                    .sum::<f64>();

            if !score.is_finite() {
                continue;
            }

            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((category, score)),
            }
        }

        best.map(|(category, _)| category)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::ledger::Transaction;

    use super::{DEFAULT_CATEGORY, FallbackReason, Suggestion, suggest, tokenise};

    fn transaction(category: &str, description: &str) -> Transaction {
        Transaction {
            amount: 10.0,
            category: category.to_owned(),
            date: date!(2025 - 01 - 01),
            description: description.to_owned(),
        }
    }

    fn get_test_ledger() -> Vec<Transaction> {
        vec![
            transaction("Alimentação", "Pizza"),
            transaction("Alimentação", "Mercado compras"),
            transaction("Alimentação", "Pizza delivery"),
            transaction("Transporte", "Uber centro"),
            transaction("Transporte", "Uber aeroporto"),
            transaction("Lazer", "Cinema"),
            transaction("Lazer", "Cinema shopping"),
        ]
    }

    #[test]
    fn empty_ledger_falls_back_to_default() {
        let suggestion = suggest(&[], "Pizza");

        assert_eq!(suggestion, Suggestion::Fallback(FallbackReason::EmptyLedger));
        assert_eq!(suggestion.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn empty_description_falls_back_to_default() {
        let suggestion = suggest(&get_test_ledger(), "   ");

        assert_eq!(
            suggestion,
            Suggestion::Fallback(FallbackReason::EmptyDescription)
        );
        assert_eq!(suggestion.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn ledger_without_descriptions_falls_back_to_default() {
        let ledger = vec![transaction("Lazer", ""), transaction("Transporte", "")];

        let suggestion = suggest(&ledger, "Uber");

        assert_eq!(
            suggestion,
            Suggestion::Fallback(FallbackReason::NoDescriptions)
        );
    }

    #[test]
    fn descriptions_without_tokens_fall_back_to_default() {
        let ledger = vec![transaction("Lazer", "!"), transaction("Transporte", "a")];

        let suggestion = suggest(&ledger, "Uber");

        assert_eq!(
            suggestion,
            Suggestion::Fallback(FallbackReason::EmptyVocabulary)
        );
    }

    #[test]
    fn predicts_category_of_matching_words() {
        let ledger = get_test_ledger();

        assert_eq!(suggest(&ledger, "uber").category(), "Transporte");
        assert_eq!(suggest(&ledger, "Pizza grande").category(), "Alimentação");
        assert_eq!(suggest(&ledger, "CINEMA").category(), "Lazer");
    }

    #[test]
    fn single_class_training_data_predicts_that_class() {
        let ledger = vec![transaction("Lazer", "Cinema"), transaction("Lazer", "Show")];

        let suggestion = suggest(&ledger, "Teatro");

        assert_eq!(suggestion, Suggestion::Predicted("Lazer".to_owned()));
    }

    #[test]
    fn unknown_words_use_most_frequent_category() {
        let ledger = get_test_ledger();

        let suggestion = suggest(&ledger, "xyzzy");

        assert_eq!(suggestion, Suggestion::Predicted("Alimentação".to_owned()));
    }

    #[test]
    fn can_predict_categories_outside_fixed_list() {
        let ledger = vec![
            transaction("Saúde", "Farmácia remédio"),
            transaction("Lazer", "Cinema"),
        ];

        let suggestion = suggest(&ledger, "farmácia");

        assert_eq!(suggestion, Suggestion::Predicted("Saúde".to_owned()));
    }

    #[test]
    fn tokenise_lowercases_and_drops_single_characters() {
        let tokens: Vec<String> = tokenise("Uber X para o Aeroporto, 2x").collect();

        assert_eq!(tokens, vec!["uber", "para", "aeroporto", "2x"]);
    }
}
