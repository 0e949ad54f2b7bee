//! Volume marker detection.
//!
//! Markers are tried through an ordered rule list; the first rule whose
//! pattern matches *and* whose numeral parses wins. Explicit forms such as
//! `第三卷` sit ahead of the bare trailing-digit fallback so they are never
//! shadowed by it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::numeral::NumeralForm;

/// Characters trimmed from the end of a title once its marker is removed.
pub const SEPARATORS: &[char] = &[' ', '-', '_', '·', '~', '～', ':', '：', '・'];

const NUM: &str = "零〇一壹二贰兩两三叁四肆五伍六陆七柒八捌九玖十拾廿卅卌百佰千仟万萬0-9０-９IVXLCDM";
const KEYWORD: &str = "[卷冊册部篇集季期话回]";

/// Longest bare digit run still read as a volume.
const MAX_TRAILING_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleKind {
    /// `第<n><keyword>` with optional trailing text.
    ExplicitKeyword,
    /// `Vol. <n>` / `Volume <n>`.
    VolPrefix,
    /// `-3`, `_IV`, ` 五`, optionally followed by a keyword.
    Separator,
    /// `(3)`, `（三）`, `【5】`, `〔IV〕`, `[2]`.
    Bracket,
    /// `v2`, `vIII`, `v三`.
    VPrefix,
    /// `第<n>部分`.
    Part,
    /// Up to four trailing digits.
    TrailingDigits,
}

struct VolumeRule {
    kind: RuleKind,
    pattern: Regex,
    max_digits: Option<usize>,
}

static RULES: Lazy<Vec<VolumeRule>> = Lazy::new(|| {
    let rule = |kind, pattern: String| VolumeRule {
        kind,
        pattern: Regex::new(&pattern).unwrap(),
        max_digits: None,
    };
    let mut trailing = rule(
        RuleKind::TrailingDigits,
        "(?P<marker>(?P<num>[0-9０-９]+))$".to_string(),
    );
    trailing.max_digits = Some(MAX_TRAILING_DIGITS);

    vec![
        rule(
            RuleKind::ExplicitKeyword,
            format!("(?P<marker>第(?P<num>[{NUM}]+){KEYWORD}.*)$"),
        ),
        rule(
            RuleKind::VolPrefix,
            format!(r"[^A-Za-z](?P<marker>(?i:vol(?:ume)?)\.?\s*(?P<num>[{NUM}ivxlcdm]+))$"),
        ),
        rule(
            RuleKind::Separator,
            format!(r"(?P<marker>[-_\s]+(?P<num>[{NUM}]+){KEYWORD}?)$"),
        ),
        rule(
            RuleKind::Bracket,
            format!("(?P<marker>[（(](?P<num>[{NUM}]+){KEYWORD}?[）)])$"),
        ),
        rule(
            RuleKind::Bracket,
            format!("(?P<marker>[【〔](?P<num>[{NUM}]+){KEYWORD}?[】〕])$"),
        ),
        rule(
            RuleKind::Bracket,
            format!(r"(?P<marker>[\[［](?P<num>[{NUM}]+){KEYWORD}?[\]］])$"),
        ),
        rule(
            RuleKind::VPrefix,
            format!("[^A-Za-z](?P<marker>[vV](?P<num>[{NUM}ivxlcdm]+))$"),
        ),
        rule(
            RuleKind::Part,
            format!("(?P<marker>第(?P<num>[{NUM}]+)部分)$"),
        ),
        trailing,
    ]
});

impl VolumeRule {
    fn apply(&self, title: &str) -> Option<VolumeMarker> {
        let caps = self.pattern.captures(title)?;
        let marker = caps.name("marker")?;
        let num = caps.name("num")?.as_str();

        if let Some(max) = self.max_digits {
            if num.chars().count() > max {
                debug!(rule = ?self.kind, num, "digit run too long for a volume");
                return None;
            }
        }

        let volume = match NumeralForm::classify(num).to_int() {
            Ok(volume) => volume,
            Err(err) => {
                debug!(rule = ?self.kind, %err, "marker matched, numeral rejected");
                return None;
            }
        };

        Some(VolumeMarker {
            simplified_title: title[..marker.start()]
                .trim_end_matches(SEPARATORS)
                .to_string(),
            volume,
            rule: self.kind,
        })
    }
}

/// A volume marker found in a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeMarker {
    /// The title with the marker and trailing separators removed.
    pub simplified_title: String,
    pub volume: u64,
    pub rule: RuleKind,
}

/// Finds the first volume marker in `title`.
pub fn extract_volume(title: &str) -> Option<VolumeMarker> {
    let found = RULES.iter().find_map(|rule| rule.apply(title));
    match &found {
        Some(marker) => debug!(
            title,
            simplified = %marker.simplified_title,
            volume = marker.volume,
            rule = ?marker.rule,
            "volume marker found"
        ),
        None => debug!(title, "no volume marker"),
    }
    found
}

/// Like [`extract_volume`], but hands back the untouched title when no
/// marker is recognised.
pub fn split_volume(title: &str) -> (String, Option<u64>) {
    match extract_volume(title) {
        Some(marker) => (marker.simplified_title, Some(marker.volume)),
        None => (title.to_string(), None),
    }
}
