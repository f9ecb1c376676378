use crate::error::MeasureError;
use crate::measure::TextMeasurer;
use crate::units::Pt;

/// Splits the text of one cell into lines no wider than `max_width`.
///
/// # Wrapping Behavior
///
/// - `None` gives a single empty line, so blank cells still occupy one line.
/// - Text that already fits is returned as-is in one line, leading and trailing
///   spaces included.
/// - Anything else is split at single spaces and packed greedily: a word joins
///   the current line while `line + space + word` still fits, otherwise the line
///   is closed (trimmed) and the word starts the next one.
/// - A word wider than `max_width` is never broken; it gets a line of its own and
///   overflows.
///
/// The result always holds at least one line. Wrapping is pure, re-running it
/// with the same inputs gives the same lines.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: Option<&str>,
    max_width: Pt,
    font: M::Font,
    size: Pt,
) -> Result<Vec<String>, MeasureError> {
    let Some(text) = text else {
        return Ok(vec![String::new()]);
    };

    if measurer.width(text, font, size)? <= max_width {
        return Ok(vec![text.to_string()]);
    }

    let space_width = measurer.width(" ", font, size)?;

    let mut lines: Vec<String> = Vec::new();
    // the open line and its width; `None` until a word lands on it
    let mut current: Option<(String, Pt)> = None;

    for word in text.split(' ') {
        let word_width = measurer.width(word, font, size)?;

        current = match current.take() {
            None if word_width <= max_width => Some((word.to_string(), word_width)),
            None => {
                log::warn!("word {word:?} is wider than {max_width} and will overflow");
                lines.push(word.to_string());
                None
            }
            Some((mut line, line_width)) if line_width + space_width + word_width <= max_width => {
                line.push(' ');
                line.push_str(word);
                Some((line, line_width + space_width + word_width))
            }
            Some((line, _)) => {
                lines.push(line.trim().to_string());
                Some((word.to_string(), word_width))
            }
        };
    }

    if let Some((line, _)) = current {
        lines.push(line.trim().to_string());
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedAdvance;

    // 2.5pt per character at 10pt
    fn measurer() -> FixedAdvance<&'static str> {
        FixedAdvance::new(0.25, 1.25)
    }

    fn wrap(text: Option<&str>, max: f32) -> Vec<String> {
        wrap_text(&measurer(), text, Pt(max), "regular", Pt(10.0)).unwrap()
    }

    #[test]
    fn missing_text_is_one_empty_line() {
        assert_eq!(wrap(None, 50.0), vec![""]);
        assert_eq!(wrap(Some(""), 50.0), vec![""]);
    }

    #[test]
    fn fitting_text_is_kept_verbatim() {
        assert_eq!(wrap(Some("  padded  "), 25.0), vec!["  padded  "]);
    }

    #[test]
    fn wraps_at_spaces() {
        let lines = wrap(Some("A very long product name that must wrap"), 94.0);
        assert_eq!(lines, vec!["A very long product name that must", "wrap"]);
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        // "abcdefghij" is 25pt wide, the column only 10pt
        let lines = wrap(Some("ab abcdefghij cd"), 10.0);
        assert_eq!(lines, vec!["ab", "abcdefghij", "cd"]);

        let lines = wrap(Some("abcdefghij ab"), 10.0);
        assert_eq!(lines, vec!["abcdefghij", "ab"]);
    }

    #[test]
    fn counts_the_space_after_a_break() {
        // each word is 5pt and a space 2.5pt: two words need 12.5pt
        let lines = wrap(Some("aa bb cc dd"), 12.0);
        assert_eq!(lines, vec!["aa", "bb", "cc", "dd"]);
    }

    #[test]
    fn lines_never_exceed_the_bound() {
        let m = measurer();
        let text = lipsum::lipsum_words(120);
        for max in [30.0, 47.5, 94.0, 200.0] {
            let lines = wrap_text(&m, Some(&text), Pt(max), "regular", Pt(10.0)).unwrap();
            for line in &lines {
                let longest_word = line
                    .split(' ')
                    .map(|w| m.width(w, "regular", Pt(10.0)).unwrap())
                    .fold(Pt(0.0), Pt::max);
                if longest_word <= Pt(max) {
                    assert!(m.width(line, "regular", Pt(10.0)).unwrap() <= Pt(max), "{line:?}");
                }
            }
        }
    }

    #[test]
    fn wrapping_is_deterministic() {
        let text = "the same inputs always give the same lines";
        assert_eq!(wrap(Some(text), 40.0), wrap(Some(text), 40.0));
    }

    #[test]
    fn measurement_failures_propagate() {
        let err = wrap_text(
            &measurer(),
            Some("tab\tseparated words that need wrapping"),
            Pt(20.0),
            "regular",
            Pt(10.0),
        )
        .unwrap_err();
        assert!(matches!(err, MeasureError::MissingGlyph { ch: '\t', .. }));
    }
}
