use std::fmt;

/// Знак выхода сети
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Положительным считается только значение строго больше нуля
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "Positive"),
            Polarity::Negative => write!(f, "Negative"),
        }
    }
}
