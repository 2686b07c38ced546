/// Parse a whole number typed into a form field. Surrounding whitespace is
/// ignored; fractions, exponents and trailing units are not numbers here.
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}
