/// Canonical comparison form of a raw identifier: the input with every
/// whitespace character removed, wherever it occurs.
///
/// No other folding is applied. Punctuation, letters and leading zeros are
/// left as they are.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}
