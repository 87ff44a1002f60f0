//! Lexical primitives: skipping, lookahead predicates, numeric literals.
//!
//! These are the building blocks the statement recognizers in
//! [`super::parser`] are written in. They share the parser's stream and
//! position state, so they live as an `impl` block on [`Parser`].
//!
//! Every recognizer must call `skip_to_next` before looking for a token,
//! keyword, or literal; nothing here skips implicitly on entry except
//! the compound readers (`read_int_span`, `read_weight_matrix`), which
//! skip between their own elements.

use std::io::Read;

use super::parser::Parser;
use crate::error::Result;
use crate::network::WeightSource;

/// Longest digit run accepted in an integer literal.
const MAX_INTEGER_DIGITS: usize = 10;

/// Longest text accepted for one float literal. The longest decimal
/// rendering of a 64-bit double runs 1079 characters.
const MAX_FLOAT_LEN: usize = 1080;

impl<R: Read, W: WeightSource> Parser<R, W> {
    /// Consume whitespace while it is next.
    pub(crate) fn skip_whitespace(&mut self) {
        while matches!(self.stream.peek(), Some(c) if c.is_whitespace()) {
            self.stream.accept(1);
        }
    }

    /// Consume a comment iff one is next. Comments run from `#` through
    /// (but not past) the next newline.
    pub(crate) fn skip_comment(&mut self) {
        if self.stream.token_available("#") == 0 {
            return;
        }
        while matches!(self.stream.peek(), Some(c) if c != '\n') {
            self.stream.accept(1);
        }
    }

    /// Alternate whitespace and comment skipping until neither applies.
    pub(crate) fn skip_to_next(&mut self) {
        loop {
            self.skip_whitespace();
            self.skip_comment();
            let more = matches!(self.stream.peek(), Some(c) if c.is_whitespace())
                || self.stream.token_available("#") > 0;
            if !more {
                break;
            }
        }
    }

    /// Lookahead predicate: a numeric literal may start here. Makes no
    /// promise that the full literal is well-formed.
    pub(crate) fn number_available(&mut self) -> bool {
        matches!(self.stream.peek(), Some(c) if c == '+' || c == '-' || c.is_ascii_digit())
    }

    /// Read a signed integer literal. Callers must check
    /// `number_available` first.
    pub(crate) fn read_integer(&mut self) -> Result<i64> {
        self.stream.ensure_available(2);
        let mut negate = false;
        match self.stream.peek() {
            Some('-') => {
                negate = true;
                self.stream.accept(1);
            }
            Some('+') => {
                self.stream.accept(1);
            }
            _ => {}
        }
        if !matches!(self.stream.peek(), Some(c) if c.is_ascii_digit()) {
            return Err(self.lexical("expected an integer"));
        }
        let mut digits = String::new();
        while let Some(c) = self.stream.peek() {
            if !c.is_ascii_digit() || digits.len() > MAX_INTEGER_DIGITS {
                break;
            }
            digits.push(c);
            self.stream.accept(1);
        }
        if self.stream.peek() == Some('.') {
            return Err(self.lexical("found a decimal fraction where an integer was expected"));
        }
        if digits.len() > MAX_INTEGER_DIGITS {
            return Err(self.lexical("integer literal is too long"));
        }
        let value: i64 = digits
            .parse()
            .map_err(|_| self.lexical("integer literal is out of range"))?;
        Ok(if negate { -value } else { value })
    }

    /// Read a floating-point literal: sign? digits '.' digits, with an
    /// optional `e`/`E` exponent. Callers are expected to check
    /// `number_available` first; a non-numeric lookahead yields 0.0
    /// without consuming anything (legacy fallback kept for
    /// compatibility).
    ///
    /// After conversion the literal is re-checked: text with a nonzero
    /// mantissa digit must not convert to exactly zero, and the converted
    /// value must be finite. Naive text-to-float conversion saturates
    /// silently in both directions; a literal whose magnitude class
    /// changed on read is rejected.
    pub(crate) fn read_float(&mut self) -> Result<f64> {
        if !self.number_available() {
            return Ok(0.0);
        }
        let mut text = String::new();
        if let Some(c @ ('+' | '-')) = self.stream.peek() {
            text.push(c);
            self.stream.accept(1);
        }
        if !matches!(self.stream.peek(), Some(c) if c.is_ascii_digit()) {
            return Err(self.lexical("expected a floating-point value"));
        }
        self.accept_digit_run(&mut text);
        if self.stream.peek() != Some('.') {
            return Err(self.lexical("floating-point values must have a decimal point"));
        }
        text.push('.');
        self.stream.accept(1);
        let after = self.accept_digit_run(&mut text);
        if after == 0 {
            return Err(self.lexical(
                "floating-point values must have digits before and after the decimal point",
            ));
        }
        if self.stream.accept_token("e") > 0 || self.stream.accept_token("E") > 0 {
            text.push('e');
            if let Some(c @ ('+' | '-')) = self.stream.peek() {
                text.push(c);
                self.stream.accept(1);
            }
            let exponent = self.accept_digit_run(&mut text);
            if exponent == 0 {
                return Err(
                    self.lexical("scientific-notation floats must have digits in the exponent")
                );
            }
        }
        if text.len() >= MAX_FLOAT_LEN {
            return Err(self.lexical("floating-point literal is too long"));
        }
        let value: f64 = text
            .parse()
            .map_err(|_| self.lexical("malformed floating-point literal"))?;
        let mantissa_nonzero = text
            .split('e')
            .next()
            .unwrap_or("")
            .chars()
            .any(|c| c.is_ascii_digit() && c != '0');
        if value == 0.0 && mantissa_nonzero {
            return Err(self.lexical("nonzero float literal was rounded to zero on read"));
        }
        if value.is_infinite() {
            return Err(self.lexical("float literal exceeds the representable range"));
        }
        Ok(value)
    }

    /// Consume a run of digits into `text`, bounded so pathological input
    /// cannot grow the buffer without limit. Returns how many were taken.
    fn accept_digit_run(&mut self, text: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.stream.peek() {
            if !c.is_ascii_digit() || text.len() >= MAX_FLOAT_LEN {
                break;
            }
            text.push(c);
            self.stream.accept(1);
            count += 1;
        }
        count
    }

    /// Read `{ int int }`, returning the bounds in ascending order (a
    /// descending pair is swapped). Yields `None`, consuming nothing,
    /// when no `{` is next.
    pub(crate) fn read_int_span(&mut self) -> Result<Option<(i64, i64)>> {
        self.skip_to_next();
        if self.stream.accept_token("{") == 0 {
            return Ok(None);
        }
        self.skip_to_next();
        if !self.number_available() {
            return Err(self.syntax("integer span starts with a non-numeric token; integer expected"));
        }
        let start = self.read_integer()?;
        self.skip_to_next();
        if !self.number_available() {
            return Err(self.syntax("integer span ends with a non-numeric token; integer expected"));
        }
        let end = self.read_integer()?;
        self.skip_to_next();
        if self.stream.accept_token("}") == 0 {
            return Err(self.syntax("integer spans must end with '}'"));
        }
        Ok(Some(if start > end { (end, start) } else { (start, end) }))
    }

    /// Read `[` followed by exactly `size` floats (separated only by
    /// skippable text) and `]`. Yields `None`, consuming nothing, when no
    /// `[` is next. Too few values, too many values, and a non-numeric
    /// token each fail with their own message.
    pub(crate) fn read_weight_matrix(&mut self, size: usize) -> Result<Option<Vec<f64>>> {
        self.skip_to_next();
        if self.stream.accept_token("[") == 0 {
            return Ok(None);
        }
        let mut weights = Vec::new();
        for _ in 0..size {
            self.skip_to_next();
            if self.number_available() {
                weights.push(self.read_float()?);
            } else if self.stream.token_available("]") > 0 {
                return Err(self.syntax(format!(
                    "weight matrix has too few weights; expected {size}"
                )));
            } else {
                return Err(self.syntax("non-numeric token in weight matrix"));
            }
        }
        self.skip_to_next();
        if self.number_available() {
            return Err(self.syntax(format!(
                "weight matrix has too many weights; expected {size}"
            )));
        }
        if self.stream.accept_token("]") == 0 {
            return Err(self.syntax("']' expected at end of weight matrix"));
        }
        Ok(Some(weights))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::super::parser::Parser;
    use crate::error::NnetError;
    use crate::network::UniformWeights;

    fn parser(input: &str) -> Parser<&[u8], UniformWeights> {
        Parser::new(input.as_bytes())
    }

    #[test]
    fn skip_to_next_eats_whitespace_and_comments() {
        let mut p = parser("  # a comment\n\t # another\n  token");
        p.skip_to_next();
        assert!(p.stream.token_available("token") > 0);
    }

    #[test]
    fn number_available_is_lookahead_only() {
        assert!(parser("+1").number_available());
        assert!(parser("-x").number_available());
        assert!(parser("7").number_available());
        assert!(!parser("x").number_available());
        assert!(!parser("").number_available());
    }

    #[test]
    fn read_integer_handles_signs() {
        assert_eq!(parser("42)").read_integer().unwrap(), 42);
        assert_eq!(parser("-17 ").read_integer().unwrap(), -17);
        assert_eq!(parser("+8,").read_integer().unwrap(), 8);
    }

    #[test]
    fn read_integer_rejects_decimal_fractions() {
        let err = parser("3.5").read_integer().unwrap_err();
        assert!(err.to_string().contains("decimal fraction"));
    }

    #[test]
    fn read_integer_rejects_overlong_runs() {
        let err = parser("999999999999").read_integer().unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn read_integer_rejects_a_bare_sign() {
        assert!(matches!(
            parser("- ").read_integer(),
            Err(NnetError::Lexical { .. })
        ));
    }

    #[test]
    fn read_float_basic_forms() {
        assert_relative_eq!(parser("0.5)").read_float().unwrap(), 0.5);
        assert_relative_eq!(parser("-2.25e2 ").read_float().unwrap(), -225.0);
        assert_relative_eq!(parser("+1.5E-1,").read_float().unwrap(), 0.15);
        assert_relative_eq!(parser("0.000 ").read_float().unwrap(), 0.0);
    }

    #[test]
    fn read_float_requires_a_decimal_point() {
        let err = parser("1e5").read_float().unwrap_err();
        assert!(err.to_string().contains("decimal point"));
    }

    #[test]
    fn read_float_requires_digits_after_the_point() {
        let err = parser("1.,").read_float().unwrap_err();
        assert!(err.to_string().contains("before and after"));
    }

    #[test]
    fn read_float_requires_exponent_digits() {
        let err = parser("3.0e,").read_float().unwrap_err();
        assert!(err.to_string().contains("exponent"));
    }

    #[test]
    fn read_float_detects_silent_underflow() {
        let err = parser("1.0e-400").read_float().unwrap_err();
        assert!(err.to_string().contains("rounded to zero"));
    }

    #[test]
    fn read_float_detects_overflow() {
        let err = parser("1.0e400").read_float().unwrap_err();
        assert!(err.to_string().contains("representable range"));
    }

    #[test]
    fn read_float_falls_back_to_zero_on_non_numeric_lookahead() {
        let mut p = parser("x");
        assert_relative_eq!(p.read_float().unwrap(), 0.0);
        // nothing was consumed
        assert!(p.stream.token_available("x") > 0);
    }

    #[test]
    fn read_int_span_normalizes_order() {
        assert_eq!(parser("{5 2}").read_int_span().unwrap(), Some((2, 5)));
        assert_eq!(parser("{1 3}").read_int_span().unwrap(), Some((1, 3)));
    }

    #[test]
    fn read_int_span_yields_none_without_a_brace() {
        let mut p = parser("7");
        assert_eq!(p.read_int_span().unwrap(), None);
        assert!(p.number_available());
    }

    #[test]
    fn read_int_span_reports_missing_pieces() {
        assert!(parser("{x 1}").read_int_span().is_err());
        assert!(parser("{1 x}").read_int_span().is_err());
        let err = parser("{1 2").read_int_span().unwrap_err();
        assert!(err.to_string().contains("'}'"));
    }

    #[test]
    fn read_weight_matrix_reads_exactly_size_values() {
        let weights = parser("[0.5 1.5]").read_weight_matrix(2).unwrap().unwrap();
        assert_eq!(weights.len(), 2);
        assert_relative_eq!(weights[0], 0.5);
        assert_relative_eq!(weights[1], 1.5);
    }

    #[test]
    fn read_weight_matrix_allows_comments_between_values() {
        let weights = parser("[ 0.5 # first\n 1.5 ]")
            .read_weight_matrix(2)
            .unwrap()
            .unwrap();
        assert_eq!(weights.len(), 2);
    }

    #[test]
    fn read_weight_matrix_distinguishes_its_failures() {
        let too_few = parser("[0.5]").read_weight_matrix(2).unwrap_err();
        assert!(too_few.to_string().contains("too few"));
        let too_many = parser("[0.5 1.5 2.5]").read_weight_matrix(2).unwrap_err();
        assert!(too_many.to_string().contains("too many"));
        let non_numeric = parser("[0.5 x]").read_weight_matrix(2).unwrap_err();
        assert!(non_numeric.to_string().contains("non-numeric"));
    }

    #[test]
    fn read_weight_matrix_yields_none_without_a_bracket() {
        assert_eq!(parser("0.5").read_weight_matrix(1).unwrap(), None);
    }
}
