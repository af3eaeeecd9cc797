//! Text Input Module
//! Splits the raw text box contents into the ordered lines sent for analysis.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter some text.")]
    Empty,
}

/// Split raw input on newlines, dropping whitespace-only lines.
///
/// Kept lines are returned as typed; a trailing `\r` from CRLF input is removed.
pub fn parse_lines(raw: &str) -> Result<Vec<String>, InputError> {
    let lines: Vec<String> = raw
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(lines)
}

/// Number of lines that would be submitted, for the input counter.
pub fn count_lines(raw: &str) -> usize {
    raw.lines().filter(|line| !line.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_drops_blank_lines() {
        let lines = parse_lines("cat\n\n  \ndog\nbird").unwrap();
        assert_eq!(lines, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn lines_are_not_trimmed() {
        let lines = parse_lines("  padded text \r\nnext").unwrap();
        assert_eq!(lines, vec!["  padded text ", "next"]);
    }

    #[test]
    fn whitespace_only_input_is_rejected() {
        assert_eq!(parse_lines(""), Err(InputError::Empty));
        assert_eq!(parse_lines(" \n\t\n   "), Err(InputError::Empty));
    }

    #[test]
    fn counter_matches_parsed_lines() {
        let raw = "one\n\ntwo\n   \nthree\n";
        assert_eq!(count_lines(raw), parse_lines(raw).unwrap().len());
        assert_eq!(count_lines("  \n"), 0);
    }
}
