//! Output format rules checked before duplicate detection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use examforge_core::errors::ConfigError;
use examforge_session::signature::parse_signature;
use regex::Regex;

/// Required shape of a generated candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatRule {
    None,
    #[default]
    MultipleChoice,
    YesNo,
    Numeric,
}

/// Why a candidate failed its format rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatViolation {
    #[error("no question stem ending in '?'")]
    MissingStem,

    #[error("expected at least two answer options A-D, found {found}")]
    TooFewOptions { found: usize },

    #[error("no correct answer marker")]
    MissingAnswer,
}

static OPTION_RE: OnceLock<Option<Regex>> = OnceLock::new();
static YES_NO_RE: OnceLock<Option<Regex>> = OnceLock::new();
static NUMERIC_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn option_re() -> Option<&'static Regex> {
    cached(&OPTION_RE, r"(?m)^\s*\(?([A-Da-d])[\).:]\s+\S")
}

fn yes_no_re() -> Option<&'static Regex> {
    cached(&YES_NO_RE, r"(?im)^\s*(?:correct|answer)\s*:\s*(?:yes|no)\b")
}

fn numeric_re() -> Option<&'static Regex> {
    cached(&NUMERIC_RE, r"(?im)^\s*(?:correct|answer)\s*:\s*-?\d+(?:[.,]\d+)?")
}

fn has_stem(text: &str) -> bool {
    text.lines().any(|l| l.contains('?'))
}

impl FormatRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::MultipleChoice => "multiple_choice",
            Self::YesNo => "yes_no",
            Self::Numeric => "numeric",
        }
    }

    /// Check `text` against the rule.
    pub fn check(&self, text: &str) -> Result<(), FormatViolation> {
        match self {
            Self::None => Ok(()),
            Self::MultipleChoice => {
                if !has_stem(text) {
                    return Err(FormatViolation::MissingStem);
                }
                let letters: BTreeSet<char> = option_re()
                    .map(|re| {
                        re.captures_iter(text)
                            .filter_map(|c| c.get(1))
                            .filter_map(|m| m.as_str().chars().next())
                            .map(|c| c.to_ascii_uppercase())
                            .collect()
                    })
                    .unwrap_or_default();
                if letters.len() < 2 {
                    return Err(FormatViolation::TooFewOptions {
                        found: letters.len(),
                    });
                }
                parse_signature(text)
                    .map(|_| ())
                    .ok_or(FormatViolation::MissingAnswer)
            }
            Self::YesNo => answer_line(text, yes_no_re()),
            Self::Numeric => answer_line(text, numeric_re()),
        }
    }
}

fn answer_line(text: &str, re: Option<&Regex>) -> Result<(), FormatViolation> {
    if !has_stem(text) {
        return Err(FormatViolation::MissingStem);
    }
    match re {
        Some(re) if re.is_match(text) => Ok(()),
        _ => Err(FormatViolation::MissingAnswer),
    }
}

impl fmt::Display for FormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "multiple_choice" | "mcq" => Ok(Self::MultipleChoice),
            "yes_no" => Ok(Self::YesNo),
            "numeric" => Ok(Self::Numeric),
            _ => Err(ConfigError::UnknownFormatRule {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MCQ: &str = "Which control BEST limits lateral movement?\n\
        A) Segmentation\n\
        B) Longer passwords\n\
        C) Annual audits\n\
        D) Badge readers\n\
        Correct: A";

    #[test]
    fn multiple_choice_accepts_well_formed_question() {
        assert_eq!(FormatRule::MultipleChoice.check(MCQ), Ok(()));
    }

    #[test]
    fn multiple_choice_reports_what_is_missing() {
        assert_eq!(
            FormatRule::MultipleChoice.check("Segmentation limits lateral movement."),
            Err(FormatViolation::MissingStem)
        );
        assert_eq!(
            FormatRule::MultipleChoice.check("What limits lateral movement?\nA) Segmentation\nCorrect: A"),
            Err(FormatViolation::TooFewOptions { found: 1 })
        );
        assert_eq!(
            FormatRule::MultipleChoice.check("What limits lateral movement?\nA. Segmentation\nB. Audits"),
            Err(FormatViolation::MissingAnswer)
        );
    }

    #[test]
    fn yes_no_and_numeric() {
        assert!(FormatRule::YesNo.check("Is WEP secure?\nAnswer: No").is_ok());
        assert!(FormatRule::YesNo.check("Is WEP secure?\nAnswer: maybe").is_err());
        assert!(FormatRule::Numeric.check("How many layers in OSI?\nAnswer: 7").is_ok());
        assert!(FormatRule::Numeric.check("How many layers?\nAnswer: seven").is_err());
    }

    #[test]
    fn none_accepts_anything() {
        assert!(FormatRule::None.check("").is_ok());
    }

    #[test]
    fn parse_rules() {
        assert_eq!("multiple_choice".parse::<FormatRule>().unwrap(), FormatRule::MultipleChoice);
        assert_eq!(" Yes_No ".parse::<FormatRule>().unwrap(), FormatRule::YesNo);
        assert!(matches!(
            "essay".parse::<FormatRule>(),
            Err(ConfigError::UnknownFormatRule { .. })
        ));
    }
}
