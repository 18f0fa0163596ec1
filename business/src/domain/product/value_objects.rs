/// Monetary amount of a product, in US dollars.
///
/// A price only exists when the submitted amount is "present": finite and
/// non-zero. `0`, `-0` and `NaN` count as a missing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    /// Validates a submitted amount. Returns `None` when it counts as missing.
    pub fn new(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount == 0.0 {
            return None;
        }
        Some(Self(amount))
    }

    /// Constructor for amounts already persisted in the repository (no validation).
    pub fn from_repository(amount: f64) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Formats the amount as en-US currency text, e.g. `$1,234.50` or `-$5.00`.
    ///
    /// Rounds half away from zero on the shortest decimal representation of
    /// the amount, so `1.005` renders as `$1.01`.
    pub fn to_dollar_string(&self) -> String {
        let negative = self.0.is_sign_negative();
        // f64 Display yields the shortest round-trip decimal, never exponent notation.
        let repr = format!("{}", self.0.abs());
        let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

        let mut digits: Vec<u8> = int_part
            .bytes()
            .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
            .map(|b| b - b'0')
            .collect();

        if frac_part.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
            round_up(&mut digits);
        }

        let (whole, cents) = digits.split_at(digits.len() - 2);
        let cents: String = cents.iter().map(|d| char::from(b'0' + d)).collect();

        format!(
            "{}${}.{}",
            if negative { "-" } else { "" },
            group_thousands(whole),
            cents
        )
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dollar_string())
    }
}

fn round_up(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

fn group_thousands(whole: &[u8]) -> String {
    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.iter().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(char::from(b'0' + digit));
    }
    out
}
