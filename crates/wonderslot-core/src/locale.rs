//! User-facing text in the supported languages.

use std::fmt;
use std::str::FromStr;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

/// Unknown language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language '{0}' (expected en or ru)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ru" | "russian" => Ok(Self::Ru),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Ru => "ru",
        })
    }
}

/// String table for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Strings {
    pub title: &'static str,
    pub balance: &'static str,
    pub points: &'static str,
    pub spin: &'static str,
    pub spinning: &'static str,
    pub win: &'static str,
    pub loss: &'static str,
}

const EN: Strings = Strings {
    title: "Field of Wonders",
    balance: "Balance",
    points: "points",
    spin: "Spin",
    spinning: "Spinning...",
    win: "Congratulations! You won!",
    loss: "You lost",
};

const RU: Strings = Strings {
    title: "Поле чудес",
    balance: "Баланс",
    points: "баллов",
    spin: "Крутить",
    spinning: "Крутится...",
    win: "Поздравляем! Вы выиграли!",
    loss: "Вы проиграли",
};

impl Locale {
    #[must_use]
    pub fn strings(self) -> &'static Strings {
        match self {
            Self::En => &EN,
            Self::Ru => &RU,
        }
    }
}

impl Strings {
    /// Label of the spin control when it is ready, e.g. "Spin (10 points)".
    #[must_use]
    pub fn spin_label(&self, cost: u32) -> String {
        format!("{} ({cost} {})", self.spin, self.points)
    }

    /// Balance line, e.g. "Balance: 90 points".
    #[must_use]
    pub fn balance_line(&self, balance: u32) -> String {
        format!("{}: {balance} {}", self.balance, self.points)
    }
}
