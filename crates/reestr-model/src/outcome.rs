//! In-band classification outcomes.
//!
//! Ambiguous source data never aborts a batch; it is classified into one of
//! the explicit variants below and written into the output row, so tests and
//! downstream consumers see the ambiguity instead of a silent gap.

use std::fmt;

/// Marker written where a value could not be classified.
pub const NO_CLASSIFICATION: &str = "NO_CLASSIFICATION";

/// Collection-strategy classification derived from comparing the declared
/// total debt with the computed total sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Declared and computed totals agree after rounding to whole units.
    FullCollect,
    /// Totals disagree; the contract goes back to a payment schedule.
    BackToSchedule,
    /// A row-level computation failed; recorded in-band, never raised.
    Failed,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::FullCollect => "FULL_COLLECT",
            Scheme::BackToSchedule => "BACK_TO_SCHEDULE",
            Scheme::Failed => "UNABLE TO SET FIELDS",
        }
    }

    /// Classify one row from its declared and computed totals. Totals agree
    /// when their difference rounds away at whole units, so sub-unit noise
    /// from the component sums never flips the scheme.
    ///
    /// `None` inputs mean the figure was present but not numeric; that is a
    /// per-row failure, not a missing column (missing columns skip the whole
    /// assignment upstream).
    pub fn classify(total_debt: Option<f64>, total_sum: Option<f64>) -> Scheme {
        match (total_debt, total_sum) {
            (Some(debt), Some(sum)) => {
                if (debt - sum).round() == 0.0 {
                    Scheme::FullCollect
                } else {
                    Scheme::BackToSchedule
                }
            }
            _ => Scheme::Failed,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document nationality derived from the passport number shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Russian,
    Foreign,
}

impl DocKind {
    /// A number is foreign when it opens with a letter or is 8+ characters
    /// long; a split Russian passport number is 6-7 digits.
    pub fn classify(number: &str) -> DocKind {
        let foreign = number
            .chars()
            .next()
            .is_some_and(|first| first.is_alphabetic())
            || number.chars().count() >= 8;
        if foreign { DocKind::Foreign } else { DocKind::Russian }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Russian => "Паспорт РФ",
            DocKind::Foreign => "Паспорт ин. гос.",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed product classification derived from the free-text product group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Card,
    Car,
    Pos,
    Cash,
    Unclassified,
}

impl Product {
    pub fn code(&self) -> &'static str {
        match self {
            Product::Card => "CARD",
            Product::Car => "CAR",
            Product::Pos => "POS",
            Product::Cash => "CASH",
            Product::Unclassified => NO_CLASSIFICATION,
        }
    }

    /// Human-readable product name paired with the code.
    pub fn label(&self) -> &'static str {
        match self {
            Product::Card => "Карточные продукты",
            Product::Car => "Автокредит",
            Product::Pos => "Потребительский целевой кредит",
            Product::Cash => "Потребительский нецелевой кредит",
            Product::Unclassified => NO_CLASSIFICATION,
        }
    }
}

/// Phone purpose classification for sources that label numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneKind {
    Mobile,
    Home,
    Work,
    Contact,
    Unclassified,
}

impl PhoneKind {
    pub fn classify(label: &str) -> PhoneKind {
        match label.trim() {
            "Мобильный" => PhoneKind::Mobile,
            "Домашний" => PhoneKind::Home,
            "Рабочий" => PhoneKind::Work,
            "Дополнительный" => PhoneKind::Contact,
            _ => PhoneKind::Unclassified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhoneKind::Mobile => "MOBILE",
            PhoneKind::Home => "HOME",
            PhoneKind::Work => "WORK",
            PhoneKind::Contact => "CONTACT",
            PhoneKind::Unclassified => NO_CLASSIFICATION,
        }
    }
}
