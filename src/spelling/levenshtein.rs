//! Damerau-Levenshtein distance calculation for spelling correction.

/// Calculate the Damerau-Levenshtein (optimal string alignment) distance between
/// two strings: the minimum number of single-character insertions, deletions,
/// substitutions or adjacent transpositions required to change one into the other.
///
/// Lengths are measured in `char`s, not bytes.
pub fn damerau_levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    damerau_levenshtein_chars(&s1_chars, &s2_chars)
}

/// Damerau-Levenshtein distance over pre-split character slices.
///
/// Runs in `O(len(s1) * len(s2))` time and keeps three rolling rows sized by the
/// shorter input: the current row, the previous one, and the one before that.
/// The two-back row is what makes adjacent transpositions visible.
pub fn damerau_levenshtein_chars(s1: &[char], s2: &[char]) -> usize {
    let (short, long) = if s1.len() <= s2.len() {
        (s1, s2)
    } else {
        (s2, s1)
    };

    if short.is_empty() {
        return long.len();
    }
    if short.len() == 1 {
        // One match plus deletes, or one substitution plus deletes.
        return if long.contains(&short[0]) {
            long.len() - 1
        } else {
            long.len()
        };
    }

    let width = short.len() + 1;
    let mut two_back = vec![0usize; width];
    let mut previous: Vec<usize> = (0..width).collect();
    let mut current = vec![0usize; width];

    for i in 1..=long.len() {
        let long_char = long[i - 1];
        current[0] = i;

        for j in 1..width {
            let short_char = short[j - 1];
            let substitution = previous[j - 1] + usize::from(long_char != short_char);
            let mut best = substitution
                .min(previous[j] + 1) // deletion
                .min(current[j - 1] + 1); // insertion

            if i > 1 && j > 1 && long_char == short[j - 2] && long[i - 2] == short_char {
                best = best.min(two_back[j - 2] + 1); // transposition
            }

            current[j] = best;
        }

        std::mem::swap(&mut two_back, &mut previous);
        std::mem::swap(&mut previous, &mut current);
    }

    previous[width - 1]
}

/// Damerau-Levenshtein distance after stripping the common prefix and suffix.
///
/// Shared affixes never change the distance, so this returns the same value as
/// [`damerau_levenshtein_chars`] while filling a smaller lattice.
pub fn trimmed_distance(s1: &[char], s2: &[char]) -> usize {
    let prefix = s1
        .iter()
        .zip(s2.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let max_suffix = s1.len().min(s2.len()) - prefix;
    let suffix = s1
        .iter()
        .rev()
        .zip(s2.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    damerau_levenshtein_chars(
        &s1[prefix..s1.len() - suffix],
        &s2[prefix..s2.len() - suffix],
    )
}
