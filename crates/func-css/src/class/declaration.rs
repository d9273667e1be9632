//! The class shorthand grammar.
//!
//! A class declaration is a whitespace-separated list of tokens:
//!
//! ```text
//! <reference> [<adjuster>] [<state>...]
//! ```
//!
//! - **reference**: a palette color name, or any CSS value to pass through
//! - **adjuster**: `name(argument)`, e.g. `a(0.5)` or `opacity(50%)`
//! - **state**: a selector fragment appended to the class selector
//!
//! | Token            | Modifier         | Selector suffix   |
//! |------------------|------------------|-------------------|
//! | `&:hover`        | nested           | `:hover`          |
//! | `:hover`         | same element     | `:hover`          |
//! | `*:hover`        | descendant       | ` *:hover`        |
//! | `::placeholder`  | pseudo-element   | `::placeholder`   |
//!
//! Whitespace inside parentheses does not split tokens, so
//! `rgba(0, 0, 0, 0.5) :hover` is a reference and one state.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::color::Color;
use crate::diagnostics::Diagnostic;

static ADJUSTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_-]*)\((.*)\)$").expect("adjuster pattern is valid")
});

/// A color adjustment applied to a resolved palette color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjuster {
    /// Replaces the alpha channel. Written `a()`, `alpha()` or `opacity()`.
    SetAlpha(f64),
}

impl Adjuster {
    /// Parses an adjuster from its name and argument.
    ///
    /// Returns `Ok(None)` for unknown names, `Err` for a bad argument.
    pub fn from_parts(name: &str, argument: &str) -> Result<Option<Self>, String> {
        match name.to_ascii_lowercase().as_str() {
            "a" | "alpha" | "opacity" => {
                parse_amount(argument).map(|v| Some(Adjuster::SetAlpha(v)))
            }
            _ => Ok(None),
        }
    }

    pub fn apply(&self, color: Color) -> Color {
        match *self {
            Adjuster::SetAlpha(alpha) => color.with_alpha(alpha),
        }
    }
}

/// Reads `0.5` or `50%` as a fraction clamped into `[0, 1]`.
fn parse_amount(argument: &str) -> Result<f64, String> {
    let argument = argument.trim();
    let (digits, scale) = match argument.strip_suffix('%') {
        Some(digits) => (digits.trim_end(), 100.0),
        None => (argument, 1.0),
    };

    let value: f64 = digits
        .parse()
        .map_err(|_| format!("'{}' is not a number", argument))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not finite", argument));
    }

    Ok((value / scale).clamp(0.0, 1.0))
}

/// A selector fragment attached to a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateModifier {
    /// `&:hover`: the `&` is dropped and the rest appended directly.
    Nested(String),
    /// `:hover`: appended directly.
    SameElement(String),
    /// `*:hover`: a descendant selector, appended after a space.
    Descendant(String),
    /// `::placeholder` or `&::placeholder`: appended directly.
    PseudoElement(String),
}

impl StateModifier {
    pub fn parse(token: &str) -> Self {
        if token.contains("::") {
            let element = token.strip_prefix('&').unwrap_or(token);
            return StateModifier::PseudoElement(element.to_string());
        }

        if let Some(nested) = token.strip_prefix('&') {
            StateModifier::Nested(nested.to_string())
        } else if token.starts_with(':') {
            StateModifier::SameElement(token.to_string())
        } else {
            StateModifier::Descendant(token.to_string())
        }
    }

    /// The text appended to `.{class}` to form the rule selector.
    pub fn selector_suffix(&self) -> String {
        match self {
            StateModifier::Nested(s)
            | StateModifier::SameElement(s)
            | StateModifier::PseudoElement(s) => s.clone(),
            StateModifier::Descendant(s) => format!(" {}", s),
        }
    }
}

/// A parsed class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Palette key or pass-through value.
    pub reference: String,
    pub adjuster: Option<Adjuster>,
    pub states: Vec<StateModifier>,
    /// True when the raw text mentions `hover` or `focus`. Interactive
    /// classes get no unconditional base rule.
    pub interactive: bool,
}

impl Declaration {
    /// Parses a class declaration.
    ///
    /// Returns `None` when the declaration has no tokens. Adjuster problems
    /// never fail the parse: they are pushed onto `diagnostics` and the
    /// offending token is dropped.
    ///
    /// ```rust
    /// use func_css::{Adjuster, Declaration, StateModifier};
    ///
    /// let mut diagnostics = Vec::new();
    /// let decl = Declaration::parse("link", "blue a(50%) :hover", &mut diagnostics).unwrap();
    ///
    /// assert_eq!(decl.reference, "blue");
    /// assert_eq!(decl.adjuster, Some(Adjuster::SetAlpha(0.5)));
    /// assert_eq!(decl.states, vec![StateModifier::SameElement(":hover".into())]);
    /// assert!(decl.interactive);
    /// assert!(diagnostics.is_empty());
    /// ```
    pub fn parse(class: &str, raw: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<Self> {
        let mut tokens = tokenize(raw).into_iter();
        let Some(reference) = tokens.next() else {
            diagnostics.push(Diagnostic::EmptyDeclaration {
                class: class.to_string(),
            });
            return None;
        };

        let mut adjuster = None;
        let mut states = Vec::new();

        for token in tokens {
            if !is_adjuster_call(&token) {
                states.push(StateModifier::parse(&token));
                continue;
            }

            let Some(captures) = ADJUSTER.captures(&token) else {
                diagnostics.push(Diagnostic::MalformedAdjuster {
                    class: class.to_string(),
                    token: token.clone(),
                    reason: "expected name(value)".to_string(),
                });
                continue;
            };

            if adjuster.is_some() {
                diagnostics.push(Diagnostic::ExtraAdjuster {
                    class: class.to_string(),
                    token: token.clone(),
                });
                continue;
            }

            match Adjuster::from_parts(&captures[1], &captures[2]) {
                Ok(Some(parsed)) => adjuster = Some(parsed),
                Ok(None) => diagnostics.push(Diagnostic::UnknownAdjuster {
                    class: class.to_string(),
                    name: captures[1].to_string(),
                }),
                Err(reason) => diagnostics.push(Diagnostic::MalformedAdjuster {
                    class: class.to_string(),
                    token: token.clone(),
                    reason,
                }),
            }
        }

        Some(Declaration {
            reference,
            adjuster,
            states,
            interactive: raw.contains("hover") || raw.contains("focus"),
        })
    }
}

/// True for tokens shaped like `name(...`, an identifier directly followed by
/// a parenthesis. Selector fragments such as `:nth-child(2n)` never are.
fn is_adjuster_call(token: &str) -> bool {
    let Some((name, _)) = token.split_once('(') else {
        return false;
    };
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Splits on whitespace outside parentheses.
fn tokenize(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in raw.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> (Option<Declaration>, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let decl = Declaration::parse("test", raw, &mut diagnostics);
        (decl, diagnostics)
    }

    // =========================================================================
    // Tokenizing
    // =========================================================================

    #[test]
    fn test_tokenize_keeps_parenthesized_whitespace() {
        assert_eq!(
            tokenize("rgba(0, 0, 0, 0.5)  :hover"),
            vec!["rgba(0, 0, 0, 0.5)", ":hover"]
        );
        assert_eq!(tokenize("  red\tblue \n"), vec!["red", "blue"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_empty_declaration() {
        let (decl, diagnostics) = parse("  ");
        assert_eq!(decl, None);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::EmptyDeclaration {
                class: "test".into()
            }]
        );
    }

    // =========================================================================
    // Adjusters
    // =========================================================================

    #[test]
    fn test_adjuster_aliases() {
        for raw in ["white a(0.8)", "white alpha(80%)", "white opacity(.8)"] {
            let (decl, diagnostics) = parse(raw);
            assert_eq!(decl.unwrap().adjuster, Some(Adjuster::SetAlpha(0.8)), "{}", raw);
            assert!(diagnostics.is_empty());
        }
    }

    #[test]
    fn test_adjuster_is_clamped() {
        let (decl, _) = parse("white a(150%)");
        assert_eq!(decl.unwrap().adjuster, Some(Adjuster::SetAlpha(1.0)));
    }

    #[test]
    fn test_adjuster_only_after_reference() {
        let (decl, diagnostics) = parse("rgba(0, 0, 0, 0.5)");
        let decl = decl.unwrap();
        assert_eq!(decl.reference, "rgba(0, 0, 0, 0.5)");
        assert_eq!(decl.adjuster, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_adjuster_wins() {
        let (decl, diagnostics) = parse("white a(0.5) opacity(0.9)");
        assert_eq!(decl.unwrap().adjuster, Some(Adjuster::SetAlpha(0.5)));
        assert!(matches!(diagnostics[..], [Diagnostic::ExtraAdjuster { .. }]));
    }

    #[test]
    fn test_unknown_adjuster_is_ignored() {
        let (decl, diagnostics) = parse("white blur(2px) a(0.5)");
        assert_eq!(decl.unwrap().adjuster, Some(Adjuster::SetAlpha(0.5)));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnknownAdjuster {
                class: "test".into(),
                name: "blur".into()
            }]
        );
    }

    #[test]
    fn test_malformed_adjuster_is_absent() {
        let (decl, diagnostics) = parse("white a(half) :hover");
        let decl = decl.unwrap();
        assert_eq!(decl.adjuster, None);
        assert_eq!(decl.states.len(), 1);
        assert!(matches!(diagnostics[..], [Diagnostic::MalformedAdjuster { .. }]));

        let (decl, diagnostics) = parse("white a(0.5");
        assert_eq!(decl.unwrap().adjuster, None);
        assert!(matches!(diagnostics[..], [Diagnostic::MalformedAdjuster { .. }]));
    }

    #[test]
    fn test_apply_sets_alpha() {
        let adjusted = Adjuster::SetAlpha(0.5).apply(Color::white());
        assert_eq!(adjusted.css_rgb(), "rgba(255, 255, 255, 0.5)");
    }

    // =========================================================================
    // States
    // =========================================================================

    #[test]
    fn test_state_sigils() {
        assert_eq!(StateModifier::parse("&:link").selector_suffix(), ":link");
        assert_eq!(StateModifier::parse(":hover").selector_suffix(), ":hover");
        assert_eq!(StateModifier::parse("*:visited").selector_suffix(), " *:visited");
        assert_eq!(
            StateModifier::parse("::placeholder"),
            StateModifier::PseudoElement("::placeholder".into())
        );
        assert_eq!(StateModifier::parse("&::before").selector_suffix(), "::before");
    }

    #[test]
    fn test_parenthesized_states_are_not_adjusters() {
        let (decl, diagnostics) =
            parse("red :nth-child(2n) &:not(.active) ::part(label) *:is(a, b)");
        let decl = decl.unwrap();
        assert_eq!(decl.adjuster, None);
        assert_eq!(
            decl.states,
            vec![
                StateModifier::SameElement(":nth-child(2n)".into()),
                StateModifier::Nested(":not(.active)".into()),
                StateModifier::PseudoElement("::part(label)".into()),
                StateModifier::Descendant("*:is(a, b)".into()),
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_adjuster_call_shape() {
        assert!(is_adjuster_call("a(0.5)"));
        assert!(is_adjuster_call("a(0.5"));
        assert!(is_adjuster_call("drop-shadow(1px)"));
        assert!(!is_adjuster_call(":nth-child(2n)"));
        assert!(!is_adjuster_call("li:not(.x)"));
        assert!(!is_adjuster_call("(0.5)"));
        assert!(!is_adjuster_call(":hover"));
    }

    #[test]
    fn test_interactive_detection() {
        assert!(parse("red :hover").0.unwrap().interactive);
        assert!(parse("red &:focus-within").0.unwrap().interactive);
        assert!(!parse("red :active").0.unwrap().interactive);
    }
}
