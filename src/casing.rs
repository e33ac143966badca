//! Identifier casing for wire names

/// Convert a camelCase identifier to its snake_case wire form
///
/// Every uppercase character becomes `_` followed by its lowercase form;
/// everything else passes through. Runs of capitals are not treated as a
/// single word, so `userID` becomes `user_i_d`, and a leading capital
/// produces a leading underscore.
///
/// # Examples
/// ```
/// use declsynth::casing::to_wire_case;
/// assert_eq!(to_wire_case("hogeHoge"), "hoge_hoge");
/// assert_eq!(to_wire_case("fuga"), "fuga");
/// ```
pub fn to_wire_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            result.push('_');
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}
