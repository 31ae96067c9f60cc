//! Weighted-ratio string similarity.
//!
//! Scores are in `[0, 100]`. The base measure is the normalized indel similarity
//! `200 * lcs / (len_a + len_b)` over chars; the weighted ratio combines it with token-sorted,
//! token-set and best-substring variants, scaling the latter down as the length gap grows.

use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;

/// Lower-cases and replaces every non-alphanumeric char with a space, then trims.
pub fn default_process(text: &str) -> String {
    let processed: String = text
        .chars()
        .flat_map(|c| {
            let keep = c.is_alphanumeric();
            c.to_lowercase().map(move |l| if keep { l } else { ' ' })
        })
        .collect();
    processed.trim().to_owned()
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                up.max(row[j])
            };
            diag = up;
        }
    }
    row[b.len()]
}

fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * lcs_len(a, b)
}

fn norm_distance(dist: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 100.0;
    }
    100.0 - 100.0 * dist as f64 / lensum as f64
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    norm_distance(indel_distance(a, b), a.len() + b.len())
}

pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any equally long window of the longer one,
/// including windows that hang off either end.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100.0 } else { 0.0 };
    }
    if a.len() == b.len() {
        return partial_ratio_chars(&a, &b).max(partial_ratio_chars(&b, &a));
    }
    if a.len() < b.len() {
        partial_ratio_chars(&a, &b)
    } else {
        partial_ratio_chars(&b, &a)
    }
}

fn partial_ratio_chars(short: &[char], long: &[char]) -> f64 {
    let m = short.len();
    let n = long.len();
    let mut best = 0.0f64;

    for k in 1..m {
        best = best.max(ratio_chars(short, &long[..k]));
        best = best.max(ratio_chars(short, &long[n - k..]));
    }
    for start in 0..=(n - m) {
        best = best.max(ratio_chars(short, &long[start..start + m]));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

fn join(tokens: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    tokens
        .into_iter()
        .map(|t| t.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&join(sorted_tokens(a)), &join(sorted_tokens(b)))
}

pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersect = join(tokens_a.intersection(&tokens_b));
    let diff_ab = join(tokens_a.difference(&tokens_b));
    let diff_ba = join(tokens_b.difference(&tokens_a));

    if !intersect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab: Vec<char> = diff_ab.chars().collect();
    let diff_ba: Vec<char> = diff_ba.chars().collect();
    let sect_len = intersect.chars().count();
    let sep = usize::from(sect_len != 0);
    let sect_ab_len = sect_len + sep + diff_ab.len();
    let sect_ba_len = sect_len + sep + diff_ba.len();

    let result = norm_distance(
        indel_distance(&diff_ab, &diff_ba),
        sect_ab_len + sect_ba_len,
    );
    if sect_len == 0 {
        return result;
    }

    let sect_ab = norm_distance(sep + diff_ab.len(), sect_len + sect_ab_len);
    let sect_ba = norm_distance(sep + diff_ba.len(), sect_len + sect_ba_len);
    result.max(sect_ab).max(sect_ba)
}

pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let split_a: Vec<&str> = a.split_whitespace().collect();
    let split_b: Vec<&str> = b.split_whitespace().collect();
    let tokens_a: BTreeSet<&str> = split_a.iter().copied().collect();
    let tokens_b: BTreeSet<&str> = split_b.iter().copied().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    if tokens_a.intersection(&tokens_b).next().is_some() {
        return 100.0;
    }

    let result = partial_ratio(&join(sorted_tokens(a)), &join(sorted_tokens(b)));
    if split_a.len() == tokens_a.len() && split_b.len() == tokens_b.len() {
        return result;
    }
    // Duplicate tokens: also compare the deduplicated forms.
    result.max(partial_ratio(&join(&tokens_a), &join(&tokens_b)))
}

/// Weighted ratio of two already processed strings.
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let mut score = ratio(a, b);

    if len_ratio < 1.5 {
        let token = token_sort_ratio(a, b).max(token_set_ratio(a, b));
        return score.max(token * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    score = score.max(partial_ratio(a, b) * partial_scale);
    score.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_process_lowercases_and_strips_punctuation() {
        assert_eq!(default_process("  Docker-Compose, v2! "), "docker compose  v2");
    }

    #[test]
    fn ratio_matches_indel_similarity() {
        assert!(close(ratio("docker", "docker"), 100.0));
        assert!(close(ratio("docker", "dockerfile"), 75.0));
        assert!(close(ratio("", ""), 100.0));
        assert!(close(ratio("abc", ""), 0.0));
    }

    #[test]
    fn partial_ratio_finds_substring() {
        assert!(close(partial_ratio("docker", "dockerfile"), 100.0));
        assert!(close(partial_ratio("dockerfile", "docker"), 100.0));
        assert!(close(partial_ratio("net", "kubernetes"), 100.0));
    }

    #[test]
    fn token_sort_ignores_word_order() {
        assert!(close(token_sort_ratio("learning machine", "machine learning"), 100.0));
    }

    #[test]
    fn token_set_is_100_when_one_side_is_a_subset() {
        assert!(close(token_set_ratio("machine learning", "machine learning ops"), 100.0));
    }

    #[test]
    fn partial_token_short_circuits_on_shared_word() {
        assert!(close(partial_token_ratio("kubernetes", "kubernetes for ml"), 100.0));
    }

    #[test]
    fn weighted_ratio_prefers_close_matches() {
        assert!(close(weighted_ratio("docker", "docker"), 100.0));
        assert!(close(weighted_ratio("docker", "dockerfile"), 90.0));
        let kube = weighted_ratio("docker", "kubernetes");
        assert!(kube < 90.0, "kubernetes scored {kube}");
    }

    #[test]
    fn weighted_ratio_of_empty_is_zero() {
        assert!(close(weighted_ratio("", "docker"), 0.0));
    }

    #[test]
    fn weighted_ratio_handles_multibyte_text() {
        let score = weighted_ratio("café", "café au lait");
        assert!(score > 80.0, "score {score}");
    }
}
