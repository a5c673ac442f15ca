// ============================================================================
// Debug Record
// Labeled {Base, Sign, Powr, Nums} interchange format
// ============================================================================
//
// Pretty form:
//
//   {
//   	Base: 10,
//   	Sign: False,
//   	Powr: 2,
//   	Nums: [
//   		1,
//   		2
//   	]
//   }
//
// Compact form: {Base:10,Sign:False,Powr:2,Nums:[1,2]}
//
// `Sign: True` marks a negative value. `Base: 0` marks an unset base.
// Whitespace is insignificant when parsing.

use crate::numeric::{Base, Digit, Digits, Number, NumberError, NumberResult};

/// Render the labeled record.
///
/// # Errors
/// Returns `NonFinite` for the infinity sentinel.
pub fn render(number: &Number, pretty: bool) -> NumberResult<String> {
    if number.is_infinite() {
        return Err(NumberError::NonFinite);
    }
    let base = number.base().map_or(0, Base::get);
    let sign = if number.is_negative() { "True" } else { "False" };
    let digits: Vec<String> = number.digits().iter().map(|d| d.to_string()).collect();

    Ok(if pretty {
        format!(
            "{{\n\tBase: {},\n\tSign: {},\n\tPowr: {},\n\tNums: [\n\t\t{}\n\t]\n}}",
            base,
            sign,
            number.power(),
            digits.join(",\n\t\t")
        )
    } else {
        format!(
            "{{Base:{},Sign:{},Powr:{},Nums:[{}]}}",
            base,
            sign,
            number.power(),
            digits.join(",")
        )
    })
}

/// Parse either record form.
///
/// # Errors
/// - `Format` naming the missing or malformed field
/// - `InvalidBase` for a base of 1
pub fn parse(text: &str) -> NumberResult<Number> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut cursor = Cursor { rest: &compact };

    cursor.expect("{", "record")?;
    cursor.expect("Base:", "Base field")?;
    let radix: u16 = cursor
        .take_until(',')
        .parse()
        .map_err(|_| NumberError::Format { construct: "Base field" })?;
    cursor.expect(",", "Base field")?;

    cursor.expect("Sign:", "Sign field")?;
    let negative = match cursor.take_until(',') {
        "True" => true,
        "False" => false,
        _ => return Err(NumberError::Format { construct: "Sign field" }),
    };
    cursor.expect(",", "Sign field")?;

    cursor.expect("Powr:", "Powr field")?;
    let power: i64 = cursor
        .take_until(',')
        .trim_start_matches('+')
        .parse()
        .map_err(|_| NumberError::Format { construct: "Powr field" })?;
    cursor.expect(",", "Powr field")?;

    cursor.expect("Nums:[", "Nums field")?;
    let list = cursor.take_until(']');
    cursor.expect("]", "Nums field")?;
    cursor.expect("}", "record")?;
    if !cursor.rest.is_empty() {
        return Err(NumberError::Format { construct: "record" });
    }

    let base = match radix {
        0 => None,
        1..=255 => Some(Base::new(radix as u8)?),
        _ => return Err(NumberError::InvalidBase(radix)),
    };

    let mut digits = Digits::new();
    for item in list.split(',') {
        let digit: u16 = item
            .parse()
            .map_err(|_| NumberError::Format { construct: "Nums field" })?;
        if let Some(b) = base {
            if digit >= b.get() as u16 {
                return Err(NumberError::Format { construct: "digit" });
            }
        }
        digits.push(digit as Digit);
    }

    let number = Number::from_raw(negative, digits, base, power);
    Ok(if base.is_some() { number.fixed() } else { number })
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn expect(&mut self, token: &str, construct: &'static str) -> NumberResult<()> {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            },
            None => Err(NumberError::Format { construct }),
        }
    }

    fn take_until(&mut self, stop: char) -> &'a str {
        let end = self.rest.find(stop).unwrap_or(self.rest.len());
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pretty() {
        let x = Number::from_i64(-12, Base::DECIMAL);
        assert_eq!(
            render(&x, true).unwrap(),
            "{\n\tBase: 10,\n\tSign: True,\n\tPowr: 1,\n\tNums: [\n\t\t1,\n\t\t2\n\t]\n}"
        );
    }

    #[test]
    fn test_render_compact() {
        let x = Number::from_digits(false, &[1, 0, 1], Base::BINARY, -1).unwrap();
        assert_eq!(
            render(&x, false).unwrap(),
            "{Base:2,Sign:False,Powr:-1,Nums:[1,0,1]}"
        );
    }

    #[test]
    fn test_parse_both_forms() {
        let x = Number::from_digits(true, &[2, 5, 5], Base::new(200).unwrap(), 7).unwrap();
        for pretty in [true, false] {
            let text = render(&x, pretty).unwrap();
            assert!(parse(&text).unwrap().identical(&x));
        }
    }

    #[test]
    fn test_parse_floating_base() {
        let x = parse("{Base:0,Sign:False,Powr:0,Nums:[42]}").unwrap();
        assert_eq!(x.base(), None);
        assert_eq!(x.digits(), &[42]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("{Sign:False}").unwrap_err(),
            NumberError::Format { construct: "Base field" }
        );
        assert_eq!(
            parse("{Base:10,Sign:Maybe,Powr:0,Nums:[1]}").unwrap_err(),
            NumberError::Format { construct: "Sign field" }
        );
        assert_eq!(
            parse("{Base:10,Sign:False,Powr:x,Nums:[1]}").unwrap_err(),
            NumberError::Format { construct: "Powr field" }
        );
        assert_eq!(
            parse("{Base:10,Sign:False,Powr:0,Nums:[1,12]}").unwrap_err(),
            NumberError::Format { construct: "digit" }
        );
        assert_eq!(
            parse("{Base:1,Sign:False,Powr:0,Nums:[0]}").unwrap_err(),
            NumberError::InvalidBase(1)
        );
        assert_eq!(
            parse("{Base:10,Sign:False,Powr:0,Nums:[1]}trailing").unwrap_err(),
            NumberError::Format { construct: "record" }
        );
    }
}
