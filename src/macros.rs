// Convenience for compiling a pattern that is known-good at compile time
macro_rules! regex(
    ($s:expr) => (::regex::Regex::new($s).unwrap());
);
