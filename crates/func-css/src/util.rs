//! Identifier case conversion used for class names and property keys.

/// Splits an identifier into words.
///
/// Words break on any non-alphanumeric character, on a lowercase-to-uppercase
/// transition, before the last capital of an uppercase run that is followed by
/// a lowercase letter, and between letters and digits.
pub fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in input.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
                let next = chars.get(i + 1).copied();
                let boundary = (prev.is_lowercase() && c.is_uppercase())
                    || (prev.is_alphabetic() && c.is_numeric())
                    || (prev.is_numeric() && c.is_alphabetic())
                    || (prev.is_uppercase()
                        && c.is_uppercase()
                        && next.is_some_and(|n| n.is_lowercase()));
                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

/// Converts an identifier to `kebab-case`.
///
/// ```rust
/// use func_css::kebab_case;
///
/// assert_eq!(kebab_case("darkGray"), "dark-gray");
/// assert_eq!(kebab_case("Brand Primary"), "brand-primary");
/// ```
pub fn kebab_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Converts an identifier to `camelCase`.
///
/// ```rust
/// use func_css::camel_case;
///
/// assert_eq!(camel_case("button-bg-hover"), "buttonBgHover");
/// assert_eq!(camel_case("dark-gray"), "darkGray");
/// ```
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
