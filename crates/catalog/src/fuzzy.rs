//! Fuzzy name matching for "did you mean" suggestions

use serde::Serialize;

/// Candidates must score strictly above this
pub const SIMILARITY_FLOOR: f64 = 0.5;

/// Suggestions returned at most
pub const MAX_SUGGESTIONS: usize = 3;

/// Edit distance with unit-cost substitution, insertion and deletion
///
/// `matrix[i][j]` holds the distance between the first `i` characters of
/// `b` and the first `j` characters of `a`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a.len() {
        matrix[0][j] = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            matrix[i][j] = if b[i - 1] == a[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                (matrix[i - 1][j - 1] + 1) // substitution
                    .min(matrix[i][j - 1] + 1) // insertion
                    .min(matrix[i - 1][j] + 1) // deletion
            };
        }
    }

    matrix[b.len()][a.len()]
}

/// `(max_len - distance) / max_len`, case-insensitive, in [0, 1]
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    (max_len - levenshtein(&a, &b)) as f64 / max_len as f64
}

/// Close match for a query that found nothing exactly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    pub similarity: f64,
}

/// Best fuzzy matches for `query` among `(id, name)` candidates
///
/// Keeps names above [`SIMILARITY_FLOOR`], most similar first (input order
/// on ties), at most [`MAX_SUGGESTIONS`].
pub fn suggest<'a, I>(query: &str, candidates: I) -> Vec<Suggestion>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let query = query.trim();
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .map(|(id, name)| Suggestion {
            id: id.to_string(),
            name: name.to_string(),
            similarity: name_similarity(query, name),
        })
        .filter(|s| s.similarity > SIMILARITY_FLOOR)
        .collect();

    suggestions.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_levenshtein_symmetric() {
        assert_eq!(levenshtein("Alice", "Alicia"), levenshtein("Alicia", "Alice"));
    }

    #[test]
    fn test_levenshtein_unicode() {
        assert_eq!(levenshtein("José", "Jose"), 1);
    }

    #[test]
    fn test_name_similarity() {
        assert!((name_similarity("ALICE", "alice") - 1.0).abs() < f64::EPSILON);
        assert!((name_similarity("", "") - 1.0).abs() < f64::EPSILON);
        assert!((name_similarity("abcd", "abce") - 0.75).abs() < 1e-9);
        assert_eq!(name_similarity("abcd", "wxyz"), 0.0);
    }

    #[test]
    fn test_closer_name_scores_higher() {
        let close = name_similarity("Alise Smith", "Alice Smith");
        let far = name_similarity("Alise Smith", "Bob Jones");
        assert!(close > far);
        assert!(close > 0.9);
    }

    #[test]
    fn test_suggest_ranks_and_filters() {
        let people = [
            ("p1", "Bob Jones"),
            ("p2", "Alicia Smyth"),
            ("p3", "Alice Smith"),
        ];
        let suggestions = suggest("Alise Smith", people);
        assert_eq!(suggestions[0].name, "Alice Smith");
        assert!(suggestions.iter().all(|s| s.name != "Bob Jones"));
        assert!(suggestions.iter().all(|s| s.similarity > SIMILARITY_FLOOR));
    }

    #[test]
    fn test_suggest_excludes_dissimilar() {
        let suggestions = suggest("abcdefgh", [("x", "zyxwvuts")]);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_suggest_caps_at_three() {
        let names = [
            ("1", "Dana Lee"),
            ("2", "Dana Lea"),
            ("3", "Dane Lee"),
            ("4", "Dana Leo"),
            ("5", "Dina Lee"),
        ];
        let suggestions = suggest("Dana Lee", names);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0].id, "1");
        // Equal scores keep input order
        assert_eq!(suggestions[1].id, "2");
        assert_eq!(suggestions[2].id, "3");
    }
}
