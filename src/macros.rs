/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// ```ignore
/// if regex!(r"^[0-9]{7,11}$").is_match(input) { /* ... */ }
/// ```
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
