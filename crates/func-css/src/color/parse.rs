//! CSS color string parsing.
//!
//! Supports the forms a palette file realistically contains:
//!
//! - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - Named keywords: `red`, `RebeccaPurple`, `transparent`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, with comma or space
//!   separated arguments and an optional `/ alpha`
//!
//! Tokenization is done by `cssparser`, so comments, whitespace and number
//! syntax follow the CSS rules.

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token};

use super::named;
use super::Color;

/// A numeric function argument.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Component {
    Number(f64),
    /// Stored as a fraction: `50%` is `0.5`.
    Percentage(f64),
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// ```rust
    /// use func_css::Color;
    ///
    /// assert_eq!(Color::parse("#F00").unwrap().hex(), "#ff0000");
    /// assert_eq!(Color::parse("rgb(0 0 255 / 50%)").unwrap().alpha(), 0.5);
    /// assert!(Color::parse("not-a-color").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Color, String> {
        let mut input = ParserInput::new(input.trim());
        let mut parser = Parser::new(&mut input);
        parser.parse_entirely(parse_color).map_err(describe_error)
    }
}

/// Returns true if `input` parses as a CSS color.
pub fn is_color(input: &str) -> bool {
    Color::parse(input).is_ok()
}

fn parse_color<'i>(parser: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, String>> {
    let token = parser.next()?.clone();
    match token {
        Token::Hash(ref value) | Token::IDHash(ref value) => parse_hex(value)
            .ok_or_else(|| parser.new_custom_error(format!("invalid hex color '#{}'", value))),
        Token::Ident(ref name) => named::lookup(name)
            .ok_or_else(|| parser.new_custom_error(format!("unknown color name '{}'", name))),
        Token::Function(ref name) => {
            let function = name.to_ascii_lowercase();
            let args = parser.parse_nested_block(parse_arguments)?;
            from_function(&function, &args).map_err(|msg| parser.new_custom_error(msg))
        }
        other => Err(parser.new_custom_error(format!("unexpected token {:?}", other))),
    }
}

fn parse_arguments<'i>(
    block: &mut Parser<'i, '_>,
) -> Result<Vec<Component>, ParseError<'i, String>> {
    let mut args = Vec::new();
    while !block.is_exhausted() {
        let token = block.next()?.clone();
        match token {
            Token::Number { value, .. } => args.push(Component::Number(f64::from(value))),
            Token::Percentage { unit_value, .. } => {
                args.push(Component::Percentage(f64::from(unit_value)))
            }
            Token::Dimension {
                value, ref unit, ..
            } if unit.eq_ignore_ascii_case("deg") => {
                args.push(Component::Number(f64::from(value)))
            }
            Token::Comma | Token::Delim('/') => {}
            other => {
                return Err(block.new_custom_error(format!("unexpected argument {:?}", other)))
            }
        }
    }
    Ok(args)
}

fn from_function(name: &str, args: &[Component]) -> Result<Color, String> {
    let (channels, alpha) = match args {
        [a, b, c] => ([*a, *b, *c], None),
        [a, b, c, alpha] => ([*a, *b, *c], Some(*alpha)),
        _ => {
            return Err(format!(
                "{}() takes 3 or 4 arguments, got {}",
                name,
                args.len()
            ))
        }
    };

    let alpha = match alpha {
        Some(Component::Number(n)) | Some(Component::Percentage(n)) => n,
        None => 1.0,
    };

    match name {
        "rgb" | "rgba" => {
            let [r, g, b] = channels.map(|c| match c {
                Component::Number(n) => n,
                Component::Percentage(p) => p * 255.0,
            });
            Ok(Color::from_rgba(r, g, b, alpha))
        }
        "hsl" | "hsla" => {
            let hue = match channels[0] {
                Component::Number(n) => n,
                Component::Percentage(_) => {
                    return Err(format!("{}() hue cannot be a percentage", name))
                }
            };
            let [s, l] = [channels[1], channels[2]].map(|c| match c {
                Component::Percentage(p) => p,
                Component::Number(n) => n / 100.0,
            });
            Ok(Color::from_hsl(hue, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)).with_alpha(alpha))
        }
        _ => Err(format!("unsupported color function '{}()'", name)),
    }
}

fn parse_hex(digits: &str) -> Option<Color> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    let (r, g, b) = (byte(0)?, byte(2)?, byte(4)?);
    let alpha = if expanded.len() == 8 {
        f64::from(byte(6)?) / 255.0
    } else {
        1.0
    };

    Some(Color::from_rgba(
        f64::from(r),
        f64::from(g),
        f64::from(b),
        alpha,
    ))
}

fn describe_error(error: ParseError<'_, String>) -> String {
    match error.kind {
        ParseErrorKind::Custom(message) => message,
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected token {:?}", token)
        }
        ParseErrorKind::Basic(other) => format!("{:?}", other),
    }
}
