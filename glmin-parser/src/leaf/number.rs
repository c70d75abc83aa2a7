//! Numeric values of literal leaves, and their minified text form.

/// The declared precision of a numeric literal.
///
/// Integer literals and unsuffixed or `f`-suffixed floats are single precision; floats with the
/// `lf` suffix are double precision. Folding two literals never produces a result of lower
/// precision than either operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precision {
    Single,
    Double,
}

/// The value of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer literal. The value is kept in an `i64` so that both `int` and `uint` literals
    /// fit.
    Int {
        value: i64,
        unsigned: bool,
    },

    /// A floating-point literal.
    Float {
        value: f64,
        precision: Precision,
    },
}

impl Number {
    /// Interprets the lexeme of an integer literal (decimal, octal or hexadecimal, with an
    /// optional `u` suffix). A leading `-` is accepted, as folding can produce negative literals.
    pub fn parse_int(lexeme: &str) -> Option<Self> {
        if let Some(magnitude) = lexeme.strip_prefix('-') {
            return match Self::parse_int(magnitude)? {
                Self::Int { value, unsigned } => Some(Self::Int { value: -value, unsigned }),
                float => Some(float),
            };
        }

        let (digits, unsigned) = match lexeme.strip_suffix(['u', 'U']) {
            Some(digits) => (digits, true),
            None => (lexeme, false),
        };

        let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
            i64::from_str_radix(hex, 16).ok()?
        } else if digits.len() > 1 && digits.starts_with('0') {
            i64::from_str_radix(&digits[1..], 8).ok()?
        } else {
            digits.parse().ok()?
        };

        Some(Self::Int { value, unsigned })
    }

    /// Interprets the lexeme of a floating-point literal, with an optional `f` or `lf` suffix.
    pub fn parse_float(lexeme: &str) -> Option<Self> {
        let (digits, precision) = if let Some(digits) = lexeme.strip_suffix("lf").or_else(|| lexeme.strip_suffix("LF")) {
            (digits, Precision::Double)
        } else if let Some(digits) = lexeme.strip_suffix(['f', 'F']) {
            (digits, Precision::Single)
        } else {
            (lexeme, Precision::Single)
        };

        let value = digits.parse::<f64>().ok()?;
        value.is_finite().then_some(Self::Float { value, precision })
    }

    /// Returns the declared precision of the number.
    pub fn precision(&self) -> Precision {
        match self {
            Self::Int { .. } => Precision::Single,
            Self::Float { precision, .. } => *precision,
        }
    }

    /// Returns true if the number is a floating-point value.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float { .. })
    }

    /// Converts the number to an `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int { value, .. } => *value as f64,
            Self::Float { value, .. } => *value,
        }
    }

    /// Returns the shortest text that the tokenizer reads back as this same literal.
    pub fn minified(&self) -> String {
        match self {
            Self::Int { value, unsigned } => {
                let suffix = if *unsigned { "u" } else { "" };
                let decimal = value.unsigned_abs().to_string();
                let hex = format!("0x{:x}", value.unsigned_abs());
                let digits = if hex.len() < decimal.len() { hex } else { decimal };
                let sign = if *value < 0 { "-" } else { "" };
                format!("{}{}{}", sign, digits, suffix)
            },
            Self::Float { value, precision } => {
                // values beyond the f32 range keep their f64 digits instead of becoming `inf`
                let text = match precision {
                    Precision::Single if (*value as f32).is_finite() => (*value as f32).to_string(),
                    _ => value.to_string(),
                };
                let suffix = match precision {
                    Precision::Single => "",
                    Precision::Double => "lf",
                };
                format!("{}{}", minify_float_text(&text), suffix)
            },
        }
    }
}

/// Shortens the plain decimal form of a float (as produced by `Display`), keeping at least one
/// `.` or exponent so the result still reads as a float.
fn minify_float_text(text: &str) -> String {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", text),
    };
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let int = int.trim_start_matches('0');
    let frac = frac.trim_end_matches('0');

    let mut best = if int.is_empty() && frac.is_empty() {
        String::from("0.")
    } else {
        format!("{}.{}", int, frac)
    };

    // round numbers: 100000. -> 1e5
    if frac.is_empty() && !int.is_empty() {
        let mantissa = int.trim_end_matches('0');
        let zeros = int.len() - mantissa.len();
        if zeros > 0 {
            let exponent = format!("{}e{}", mantissa, zeros);
            if exponent.len() < best.len() {
                best = exponent;
            }
        }
    }

    // small numbers: .00001 -> 1e-5
    if int.is_empty() && !frac.is_empty() {
        let exponent = format!("{}e-{}", frac.trim_start_matches('0'), frac.len());
        if exponent.len() < best.len() {
            best = exponent;
        }
    }

    format!("{}{}", sign, best)
}
