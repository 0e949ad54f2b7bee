//! Conversions between integers and Arabic, Chinese and Roman numeral text.

use std::collections::HashMap;

use clap::ValueEnum;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// Digits, units and a handful of whole-word entries (十一..二十) that are
/// looked up before positional decomposition.
static CHINESE_NUMBERS: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("零", 0),
        ("〇", 0),
        ("一", 1),
        ("壹", 1),
        ("二", 2),
        ("贰", 2),
        ("兩", 2),
        ("两", 2),
        ("三", 3),
        ("叁", 3),
        ("四", 4),
        ("肆", 4),
        ("五", 5),
        ("伍", 5),
        ("六", 6),
        ("陆", 6),
        ("七", 7),
        ("柒", 7),
        ("八", 8),
        ("捌", 8),
        ("九", 9),
        ("玖", 9),
        ("十", 10),
        ("拾", 10),
        ("十一", 11),
        ("十二", 12),
        ("十三", 13),
        ("十四", 14),
        ("十五", 15),
        ("十六", 16),
        ("十七", 17),
        ("十八", 18),
        ("十九", 19),
        ("二十", 20),
        ("廿", 20),
        ("卅", 30),
        ("卌", 40),
        ("百", 100),
        ("佰", 100),
        ("千", 1000),
        ("仟", 1000),
        ("万", 10000),
        ("萬", 10000),
    ])
});

const CHINESE_DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Numbering used when regenerating titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NumberingStyle {
    /// Zero-padded Arabic digits, e.g. `01`.
    #[default]
    Numeric,
    /// Chinese ordinal, e.g. `第一卷`.
    Chinese,
}

/// A numeral string tagged with the system it is written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumeralForm {
    Arabic(String),
    Chinese(String),
    Roman(String),
}

impl NumeralForm {
    /// Picks the numeral system for `text`: all digits is Arabic, all of
    /// `IVXLCDM` (any case) is Roman, anything else is treated as Chinese.
    pub fn classify(text: &str) -> Self {
        let text = text.trim();
        if !text.is_empty() && text.chars().all(|c| digit_value(c).is_some()) {
            NumeralForm::Arabic(text.to_string())
        } else if !text.is_empty() && text.chars().all(|c| roman_value(c).is_some()) {
            NumeralForm::Roman(text.to_string())
        } else {
            NumeralForm::Chinese(text.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NumeralForm::Arabic(s) | NumeralForm::Chinese(s) | NumeralForm::Roman(s) => s,
        }
    }

    pub fn to_int(&self) -> Result<u64> {
        let value = match self {
            NumeralForm::Arabic(s) => arabic_to_int(s),
            NumeralForm::Chinese(s) => chinese_to_int(s),
            NumeralForm::Roman(s) => roman_to_int(s),
        };
        value.ok_or_else(|| NormalizeError::UnparseableNumeral(self.as_str().to_string()))
    }
}

/// Parses numeral text in any supported system, `None` if it is malformed.
pub fn parse_numeral(text: &str) -> Option<u64> {
    NumeralForm::classify(text).to_int().ok()
}

fn digit_value(ch: char) -> Option<u64> {
    match ch {
        '0'..='9' => Some(ch as u64 - '0' as u64),
        '０'..='９' => Some(ch as u64 - '０' as u64),
        _ => None,
    }
}

fn roman_value(ch: char) -> Option<i64> {
    match ch.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

fn arabic_to_int(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }
    text.chars().try_fold(0u64, |acc, ch| {
        acc.checked_mul(10)?.checked_add(digit_value(ch)?)
    })
}

/// Parses Chinese numerals by positional accumulation.
///
/// A digit replaces the pending value; a unit (value >= 10) multiplies the
/// pending value, or 1 when there is none, and adds it to the total. Parsing
/// stops at the first character outside the table. A whole-string match in
/// the table wins over decomposition. Returns `None` only when not a single
/// character was recognised.
pub fn chinese_to_int(text: &str) -> Option<u64> {
    if let Some(&value) = CHINESE_NUMBERS.get(text) {
        return Some(value);
    }

    let mut total = 0u64;
    let mut pending = 0u64;
    let mut recognised = false;
    let mut buf = [0u8; 4];

    for ch in text.chars() {
        let Some(&value) = CHINESE_NUMBERS.get(&*ch.encode_utf8(&mut buf)) else {
            break;
        };
        recognised = true;
        if value >= 10 {
            total = total.saturating_add(pending.max(1).saturating_mul(value));
            pending = 0;
        } else {
            pending = value;
        }
    }

    recognised.then(|| total.saturating_add(pending))
}

/// Subtractive Roman numerals, scanned right to left.
pub fn roman_to_int(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }
    let mut total = 0i64;
    let mut prev = 0i64;
    for ch in text.chars().rev() {
        let value = roman_value(ch)?;
        if value < prev {
            total -= value;
        } else {
            total += value;
        }
        prev = value;
    }
    u64::try_from(total).ok()
}

/// Formats 0..=99 as Chinese numerals. Larger values come back as plain
/// decimal digits.
pub fn int_to_chinese(n: u64) -> String {
    match n {
        0..=9 => CHINESE_DIGITS[n as usize].to_string(),
        10 => "十".to_string(),
        11..=19 => format!("十{}", CHINESE_DIGITS[(n % 10) as usize]),
        20..=99 => {
            let tens = CHINESE_DIGITS[(n / 10) as usize];
            match n % 10 {
                0 => format!("{tens}十"),
                units => format!("{tens}十{}", CHINESE_DIGITS[units as usize]),
            }
        }
        _ => n.to_string(),
    }
}

/// Zero-pad width for a batch of `total` items: as many digits as `total`
/// itself needs, never fewer than two.
pub fn pad_width(total: usize) -> usize {
    total.max(1).to_string().len().max(2)
}

/// Renders the `n`-th volume marker of a batch of `total` items.
pub fn format_volume_number(n: usize, style: NumberingStyle, total: usize) -> String {
    match style {
        NumberingStyle::Numeric => format!("{:0width$}", n, width = pad_width(total)),
        NumberingStyle::Chinese => format!("第{}卷", int_to_chinese(n as u64)),
    }
}
