use crate::core::corpus::cleanup_text;
use crate::core::dictionary::PronouncingDictionary;
use crate::models::{ScannedWord, Scansion, StressPattern};

/// Which end of the line a word is aligned to when matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    FromStart,
    /// Lines are built backwards from the rhyme word, so words are matched
    /// against the tail of the remaining pattern
    FromEnd,
}

/// Check whether a word's stress pattern fits into a line pattern
///
/// Stresses match when they are equal, or when either side is secondary
/// stress (`2`), which matches anything. The word must be non-empty and no
/// longer than the line.
pub fn pattern_match(word: &StressPattern, line: &StressPattern, direction: Direction) -> bool {
    if word.is_empty() || word.len() > line.len() {
        return false;
    }

    let w = word.stresses();
    let l = line.stresses();

    let matched = match direction {
        Direction::FromStart => w.iter().zip(l.iter()).all(|(a, b)| a.compatible(*b)),
        Direction::FromEnd => w
            .iter()
            .rev()
            .zip(l.iter().rev())
            .all(|(a, b)| a.compatible(*b)),
    };

    tracing::trace!("pattern_match: {} vs {} ({:?}) -> {}", word, line, direction, matched);
    matched
}

/// Whether a word covers the whole line pattern on its own
#[inline]
pub fn completes(word: &StressPattern, line: &StressPattern) -> bool {
    word.len() == line.len() && pattern_match(word, line, Direction::FromEnd)
}

/// Line pattern left over after taking the word off its end
///
/// e.g. a word `1` taken off `0101` leaves `010`.
#[inline]
pub fn remaining_pattern(word: &StressPattern, line: &StressPattern) -> StressPattern {
    line.without_last(word.len())
}

/// Scan a line of verse: look up the stress of every word and, if a meter
/// is given, check the line against it
pub fn scan_line(
    dictionary: &PronouncingDictionary,
    text: &str,
    meter: Option<&StressPattern>,
) -> Scansion {
    let tokens = cleanup_text(text);

    let mut line_pattern = StressPattern::default();
    let mut unknown_words = Vec::new();
    let mut words = Vec::with_capacity(tokens.len());

    for token in tokens {
        let pattern = dictionary.stress_pattern(&token);
        match &pattern {
            Some(p) => line_pattern.extend(p),
            None => unknown_words.push(token.clone()),
        }
        words.push(ScannedWord { word: token, pattern });
    }

    let pattern = if unknown_words.is_empty() && !words.is_empty() {
        Some(line_pattern)
    } else {
        None
    };

    let matches_meter = meter.map(|m| match &pattern {
        Some(p) => completes(p, m),
        None => false,
    });

    Scansion {
        words,
        pattern,
        unknown_words,
        meter: meter.cloned(),
        matches_meter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> StressPattern {
        StressPattern::parse(s).unwrap()
    }

    #[test]
    fn test_match_from_start() {
        assert!(pattern_match(&p("010"), &p("210100"), Direction::FromStart));
        assert!(!pattern_match(&p("100"), &p("010100"), Direction::FromStart));
    }

    #[test]
    fn test_match_from_end() {
        assert!(pattern_match(&p("01"), &p("0101"), Direction::FromEnd));
        assert!(!pattern_match(&p("10"), &p("0101"), Direction::FromEnd));
        assert!(pattern_match(&p("02"), &p("0101"), Direction::FromEnd));
        // the wildcard covers the final stress only; "1" still lands on a "0"
        assert!(!pattern_match(&p("12"), &p("0101"), Direction::FromEnd));
    }

    #[test]
    fn test_wildcard_on_either_side() {
        assert!(pattern_match(&p("012"), &p("010"), Direction::FromStart));
        assert!(pattern_match(&p("011"), &p("012"), Direction::FromStart));
    }

    #[test]
    fn test_word_longer_than_line_never_matches() {
        assert!(!pattern_match(&p("0101"), &p("01"), Direction::FromEnd));
    }

    #[test]
    fn test_empty_word_never_matches() {
        assert!(!pattern_match(&p(""), &p("01"), Direction::FromEnd));
    }

    #[test]
    fn test_from_end_equals_reversed_from_start() {
        let word = p("102");
        let line = p("0110100");
        let rev = |s: &StressPattern| StressPattern::new(s.stresses().iter().rev().copied().collect());
        assert_eq!(
            pattern_match(&word, &line, Direction::FromEnd),
            pattern_match(&rev(&word), &rev(&line), Direction::FromStart)
        );
    }

    #[test]
    fn test_remaining_pattern() {
        assert_eq!(remaining_pattern(&p("1"), &p("0101")), p("010"));
        assert_eq!(remaining_pattern(&p("01"), &p("01")), p(""));
    }

    #[test]
    fn test_completes() {
        assert!(completes(&p("0101"), &p("0101")));
        assert!(completes(&p("2"), &p("1")));
        assert!(!completes(&p("01"), &p("0101")));
    }

    #[test]
    fn test_scan_line() {
        let dict = PronouncingDictionary::parse(
            "the DH AH0\ncat K AE1 T\nsat S AE1 T\nupon AH0 P AA1 N\nmat M AE1 T\n",
        );
        let scan = scan_line(&dict, "The cat sat upon the mat.", Some(&p("0110101")));
        assert_eq!(scan.pattern, Some(p("0110101")));
        assert!(scan.unknown_words.is_empty());
        assert_eq!(scan.matches_meter, Some(true));
        assert_eq!(scan.words.len(), 6);
    }

    #[test]
    fn test_scan_line_with_unknown_word() {
        let dict = PronouncingDictionary::parse("the DH AH0\ncat K AE1 T\n");
        let scan = scan_line(&dict, "the zzyzx cat", Some(&p("011")));
        assert_eq!(scan.pattern, None);
        assert_eq!(scan.unknown_words, vec!["zzyzx".to_string()]);
        assert_eq!(scan.matches_meter, Some(false));
        assert_eq!(scan.words[1].pattern, None);
    }
}
