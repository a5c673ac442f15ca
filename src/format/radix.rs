// ============================================================================
// Radix-64 Text Notation
// Parsing and rendering of the `>+1.23*a^+0` grammar
// ============================================================================
//
// Grammar:
//
//   number    := endian sign? body '*' base-char exponent?
//   endian    := '<' (least significant digit first) | '>' (most significant first)
//   sign      := '+' | '-'
//   body      := digit* ([.,] digit*)?
//   exponent  := '^' sign? digit+
//
// Digits, the base character and exponent digits all use ALPHABET. The
// exponent is written in the number's own base and in the same digit order
// as the body; it is added to the power implied by the radix point.

use crate::numeric::{Base, Digit, Digits, Number, NumberError, NumberResult};

/// Digit alphabet shared by body, base marker and exponent.
pub const ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ@#";

/// Largest base whose marker fits in one alphabet character.
pub const MAX_TEXT_BASE: u8 = 63;

/// Digit order of the textual body and exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    /// `<`: least significant digit first
    Little,
    /// `>`: most significant digit first
    #[default]
    Big,
}

impl Endianness {
    fn marker(self) -> char {
        match self {
            Endianness::Little => '<',
            Endianness::Big => '>',
        }
    }
}

#[inline]
fn symbol_value(symbol: u8) -> Option<u8> {
    ALPHABET.iter().position(|&c| c == symbol).map(|i| i as u8)
}

#[inline]
fn symbol(value: Digit) -> char {
    ALPHABET[value as usize] as char
}

fn text_base(base: Option<Base>) -> NumberResult<Base> {
    match base {
        Some(b) if b.get() <= MAX_TEXT_BASE => Ok(b),
        Some(b) => Err(NumberError::InvalidBase(b.get() as u16)),
        None => Err(NumberError::InvalidBase(0)),
    }
}

/// Parse the radix-64 notation.
///
/// # Errors
/// - `Format` naming the malformed construct
/// - `InvalidBase` if the base marker encodes a value below 2
pub fn parse(text: &str) -> NumberResult<Number> {
    let bytes = text.trim().as_bytes();
    if !bytes.is_ascii() {
        return Err(NumberError::Format { construct: "character" });
    }

    let (endianness, rest) = match bytes.split_first() {
        Some((b'<', rest)) => (Endianness::Little, rest),
        Some((b'>', rest)) => (Endianness::Big, rest),
        _ => return Err(NumberError::Format { construct: "endianness marker" }),
    };

    let (negative, rest) = match rest.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, rest),
    };

    let star = rest
        .iter()
        .position(|&c| c == b'*')
        .ok_or(NumberError::Format { construct: "base marker" })?;
    let (body, rest) = rest.split_at(star);

    let base_symbol = *rest
        .get(1)
        .ok_or(NumberError::Format { construct: "base marker" })?;
    let radix = symbol_value(base_symbol).ok_or(NumberError::Format { construct: "base marker" })?;
    let base = Base::new(radix)?;
    let exponent = &rest[2..];

    let mut body: Vec<u8> = body.to_vec();
    if endianness == Endianness::Little {
        body.reverse();
    }

    let mut point: Option<usize> = None;
    let mut digits = Digits::new();
    for &c in &body {
        if c == b'.' || c == b',' {
            if point.is_some() {
                return Err(NumberError::Format { construct: "radix point" });
            }
            point = Some(digits.len());
            continue;
        }
        match symbol_value(c) {
            Some(value) if value < radix => digits.push(value as Digit),
            _ => return Err(NumberError::Format { construct: "digit" }),
        }
    }

    let mut power = match point {
        Some(p) => p as i64 - 1,
        None => digits.len() as i64 - 1,
    };
    power = power
        .checked_add(parse_exponent(exponent, base, endianness)?)
        .ok_or(NumberError::Format { construct: "exponent" })?;

    if digits.is_empty() {
        return Ok(Number::zero(base));
    }
    Ok(Number::from_raw(negative, digits, Some(base), power).fixed())
}

fn parse_exponent(text: &[u8], base: Base, endianness: Endianness) -> NumberResult<i64> {
    let Some((&caret, rest)) = text.split_first() else {
        return Ok(0);
    };
    if caret != b'^' {
        return Err(NumberError::Format { construct: "exponent" });
    }
    let (negative, rest) = match rest.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, rest),
    };
    if rest.is_empty() {
        return Err(NumberError::Format { construct: "exponent" });
    }

    let mut ordered: Vec<u8> = rest.to_vec();
    if endianness == Endianness::Little {
        ordered.reverse();
    }

    let radix = base.get() as i64;
    let mut value: i64 = 0;
    for &c in &ordered {
        let digit = match symbol_value(c) {
            Some(d) if d < base.get() => d as i64,
            _ => return Err(NumberError::Format { construct: "exponent" }),
        };
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .ok_or(NumberError::Format { construct: "exponent" })?;
    }
    Ok(if negative { -value } else { value })
}

/// Render in the radix-64 notation.
///
/// The body is written as `d.ddd` so the exponent carries the whole power.
/// `max_digits` truncates the body.
///
/// # Errors
/// - `InvalidBase` for bases above [`MAX_TEXT_BASE`] or an unset base
/// - `NonFinite` for the infinity sentinel
pub fn render(number: &Number, endianness: Endianness, max_digits: Option<usize>) -> NumberResult<String> {
    let base = text_base(number.base())?;
    if number.is_infinite() {
        return Err(NumberError::NonFinite);
    }

    let count = max_digits.unwrap_or(usize::MAX).clamp(1, number.len());
    let shown = &number.digits()[..count];

    let mut body = String::with_capacity(count + 1);
    body.push(symbol(shown[0]));
    body.push('.');
    body.extend(shown[1..].iter().map(|&d| symbol(d)));

    let mut exponent: Vec<char> = Vec::new();
    let mut magnitude = number.power().unsigned_abs();
    let radix = base.get() as u64;
    loop {
        exponent.push(symbol((magnitude % radix) as Digit));
        magnitude /= radix;
        if magnitude == 0 {
            break;
        }
    }
    // Collected least significant first
    if endianness == Endianness::Big {
        exponent.reverse();
    }

    let body: String = match endianness {
        Endianness::Big => body,
        Endianness::Little => body.chars().rev().collect(),
    };

    let mut text = String::with_capacity(body.len() + exponent.len() + 6);
    text.push(endianness.marker());
    text.push(if number.is_negative() { '-' } else { '+' });
    text.push_str(&body);
    text.push('*');
    text.push(symbol(base.get() as Digit));
    text.push('^');
    text.push(if number.power() < 0 { '-' } else { '+' });
    text.extend(exponent);
    Ok(text)
}
