/// TF-IDF recommendation engine.
///
/// Fits a vocabulary over the club descriptions and scores an incoming
/// payload by cosine similarity. Pipeline, in order:
/// - lowercase, word tokens of at least two word characters
/// - English stop words removed
/// - unigrams and bigrams
/// - terms present in more than 70% of documents dropped
/// - weights: raw term frequency x smoothed IDF `ln((1+n)/(1+df)) + 1`,
///   L2-normalized per document
use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::info;

use clubmatch_common::model::ClubMatch;

use crate::catalog::Club;

const MAX_DF_RATIO: f64 = 0.7;

/// Words carrying no topical signal, dropped before ngram construction.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "am", "among", "amongst", "an",
    "and", "any", "anyone", "anything", "anywhere", "are", "around", "as", "at", "be", "became",
    "because", "become", "becomes", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "either", "else", "ever", "every", "everyone", "everything", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "however", "if", "in", "into", "is", "it", "its", "itself", "just", "last",
    "least", "less", "many", "may", "me", "might", "more", "moreover", "most", "mostly", "much",
    "must", "my", "myself", "neither", "never", "nevertheless", "next", "no", "nobody", "none",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only",
    "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over",
    "own", "per", "perhaps", "rather", "same", "she", "should", "since", "so", "some", "somehow",
    "someone", "something", "sometimes", "somewhere", "still", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "therefore", "these", "they",
    "this", "those", "through", "throughout", "thus", "to", "together", "too", "toward",
    "towards", "under", "until", "up", "upon", "us", "very", "was", "we", "well", "were", "what",
    "whatever", "when", "whenever", "where", "whether", "which", "while", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

pub struct TfidfEngine {
    token_re: Regex,
    /// Term -> column index, fixed at fit time.
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
    /// One L2-normalized sparse row per fitted document, sorted by column.
    doc_vectors: Vec<Vec<(usize, f64)>>,
}

impl TfidfEngine {
    /// Fit the vocabulary and document vectors over lowercased documents.
    pub fn fit(documents: &[String]) -> Self {
        let token_re = Regex::new(r"\b\w\w+\b").expect("valid regex");
        let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();

        let term_lists: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| extract_terms(&token_re, &stop_words, doc))
            .collect();

        // Document frequency per term.
        let mut df: HashMap<&str, usize> = HashMap::new();
        for terms in &term_lists {
            let unique: HashSet<&str> = terms.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        // Drop terms appearing in more than MAX_DF_RATIO of the documents.
        // Sorted vocabulary keeps column indices deterministic across runs.
        let n = documents.len();
        let max_df = MAX_DF_RATIO * n as f64;
        let mut kept: Vec<(&str, usize)> = df
            .iter()
            .filter(|(_, &count)| (count as f64) <= max_df)
            .map(|(&term, &count)| (term, count))
            .collect();
        kept.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut vocab: HashMap<String, usize> = HashMap::with_capacity(kept.len());
        let mut idf: Vec<f64> = Vec::with_capacity(kept.len());
        for (column, (term, count)) in kept.into_iter().enumerate() {
            vocab.insert(term.to_string(), column);
            idf.push((((1 + n) as f64) / ((1 + count) as f64)).ln() + 1.0);
        }

        let engine = Self {
            token_re,
            vocab,
            idf,
            doc_vectors: Vec::new(),
        };
        let doc_vectors = term_lists
            .iter()
            .map(|terms| engine.vectorize(terms))
            .collect();

        Self {
            doc_vectors,
            ..engine
        }
    }

    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// Score every fitted document against the query, descending, strictly
    /// positive similarities only, capped at `top_k`.
    pub fn rank(&self, query: &str, top_k: usize) -> Vec<(usize, f64)> {
        let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();
        let terms = extract_terms(&self.token_re, &stop_words, query);
        let query_vector = self.vectorize(&terms);

        let mut scored: Vec<(usize, f64)> = self
            .doc_vectors
            .iter()
            .enumerate()
            .map(|(idx, doc)| (idx, sparse_dot(&query_vector, doc)))
            .filter(|&(_, score)| score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(top_k);
        scored
    }

    /// Build an L2-normalized sparse TF-IDF vector from a term list.
    fn vectorize(&self, terms: &[String]) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in terms {
            if let Some(&column) = self.vocab.get(term.as_str()) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| (column, tf * self.idf[column]))
            .collect();
        row.sort_unstable_by_key(|&(column, _)| column);

        let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }
}

/// Lowercase, tokenize, drop stop words, emit unigrams and bigrams.
fn extract_terms(token_re: &Regex, stop_words: &HashSet<&str>, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = token_re
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !stop_words.contains(token))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    for pair in tokens.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

/// Dot product of two sorted sparse vectors. Both sides are L2-normalized,
/// so this is the cosine similarity.
fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut sum = 0.0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Catalog-aware wrapper: maps ranked document indices back to clubs.
pub struct Recommender {
    clubs: Vec<Club>,
    engine: TfidfEngine,
    top_k: usize,
}

impl Recommender {
    pub fn fit(clubs: Vec<Club>, top_k: usize) -> Self {
        let documents: Vec<String> = clubs
            .iter()
            .map(|club| club.description.to_lowercase())
            .collect();
        let engine = TfidfEngine::fit(&documents);
        info!(
            clubs = clubs.len(),
            vocabulary = engine.vocab_len(),
            "recommender fitted"
        );
        Self {
            clubs,
            engine,
            top_k,
        }
    }

    /// Top recommendations for a raw payload string.
    ///
    /// Responses carry the club's original (non-lowercased) description.
    pub fn recommend(&self, query: &str) -> Vec<ClubMatch> {
        self.engine
            .rank(query, self.top_k)
            .into_iter()
            .map(|(idx, score)| ClubMatch {
                name: self.clubs[idx].name.clone(),
                score,
                description: self.clubs[idx].description.clone(),
            })
            .collect()
    }
}
