//! Path data (`d` attribute) compaction.
//!
//! Tokenizes commands and numbers, rounds numbers to a fixed precision and
//! writes them back with the fewest separators the grammar allows:
//!
//! ```text
//! M 10,20 L 30.000 40.500 L 50 60   →   M10 20L30 40.5 50 60
//! ```
//!
//! Repeated commands (other than moveto and closepath) are folded into the
//! previous one. Input that does not tokenize is returned trimmed but
//! otherwise unchanged.

use super::trim_float;

/// One command letter with its arguments.
#[derive(Debug, PartialEq)]
struct Segment {
    command: char,
    args: Vec<f64>,
}

/// Compact path data, rounding numbers to `precision` decimals.
pub fn minify_path_data(d: &str, precision: u8) -> String {
    match parse_segments(d) {
        Some(segments) => write_segments(&segments, precision as usize),
        None => d.trim().to_string(),
    }
}

#[inline]
fn is_command(b: u8) -> bool {
    matches!(
        b,
        b'M' | b'm'
            | b'L'
            | b'l'
            | b'H'
            | b'h'
            | b'V'
            | b'v'
            | b'C'
            | b'c'
            | b'S'
            | b's'
            | b'Q'
            | b'q'
            | b'T'
            | b't'
            | b'A'
            | b'a'
            | b'Z'
            | b'z'
    )
}

fn parse_segments(d: &str) -> Option<Vec<Segment>> {
    let bytes = d.as_bytes();
    let mut segments: Vec<Segment> = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];
        if b.is_ascii_whitespace() || b == b',' {
            pos += 1;
            continue;
        }
        if is_command(b) {
            segments.push(Segment {
                command: b as char,
                args: Vec::new(),
            });
            pos += 1;
            continue;
        }

        // Numbers before the first command are invalid.
        let segment = segments.last_mut()?;

        // Arc flags are single characters and may be written without separators.
        let is_flag =
            matches!(segment.command, 'A' | 'a') && matches!(segment.args.len() % 7, 3 | 4);
        if is_flag {
            match b {
                b'0' => segment.args.push(0.0),
                b'1' => segment.args.push(1.0),
                _ => return None,
            }
            pos += 1;
        } else {
            let (value, len) = lex_number(&d[pos..])?;
            segment.args.push(value);
            pos += len;
        }
    }

    Some(segments)
}

/// Lex one number at the start of `s`, returning it and its byte length.
fn lex_number(s: &str) -> Option<(f64, usize)> {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && matches!(b[i], b'+' | b'-') {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return None;
    }

    if i < b.len() && matches!(b[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < b.len() && matches!(b[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[..i].parse().ok().map(|value| (value, i))
}

/// Format a number for path data: rounded, no trailing zeros, no leading zero.
fn format_number(value: f64, precision: usize) -> String {
    let s = trim_float(value, precision);
    if let Some(rest) = s.strip_prefix("0.") {
        format!(".{rest}")
    } else if let Some(rest) = s.strip_prefix("-0.") {
        format!("-.{rest}")
    } else {
        s
    }
}

/// Whether a separator is needed between two adjacent numbers.
#[inline]
fn needs_separator(prev: &str, next: &str) -> bool {
    !(next.starts_with('-') || (next.starts_with('.') && prev.contains('.')))
}

fn write_segments(segments: &[Segment], precision: usize) -> String {
    let mut out = String::new();
    let mut prev_command: Option<char> = None;
    let mut prev_number: Option<String> = None;

    for segment in segments {
        let folds = prev_command == Some(segment.command)
            && !matches!(segment.command, 'M' | 'm' | 'Z' | 'z')
            && !segment.args.is_empty()
            && prev_number.is_some();

        if !folds {
            out.push(segment.command);
            prev_number = None;
        }

        for &value in &segment.args {
            let text = format_number(value, precision);
            if let Some(prev) = &prev_number
                && needs_separator(prev, &text)
            {
                out.push(' ');
            }
            out.push_str(&text);
            prev_number = Some(text);
        }

        prev_command = Some(segment.command);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_separators_and_repeats() {
        assert_eq!(
            minify_path_data("M 10,20 L 30.000 40.500 L 50 60", 3),
            "M10 20L30 40.5 50 60"
        );
    }

    #[test]
    fn test_leading_zero_and_negative() {
        assert_eq!(
            minify_path_data("M0.5 -0.25 l-1.0000 0.75", 3),
            "M.5-.25l-1 .75"
        );
    }

    #[test]
    fn test_adjacent_fractions() {
        // `.5.5` lexes as two numbers
        assert_eq!(minify_path_data("M.5.5", 3), "M.5.5");
    }

    #[test]
    fn test_precision_rounding() {
        assert_eq!(minify_path_data("M1.23456 2", 2), "M1.23 2");
        assert_eq!(minify_path_data("M1.23456 2", 0), "M1 2");
    }

    #[test]
    fn test_exponent() {
        assert_eq!(minify_path_data("M1e2 2E-1", 3), "M100 .2");
    }

    #[test]
    fn test_compact_arc_flags() {
        assert_eq!(
            minify_path_data("a1 1 0 00 1 1", 3),
            "a1 1 0 0 0 1 1"
        );
    }

    #[test]
    fn test_moveto_and_close_not_folded() {
        assert_eq!(
            minify_path_data("M0 0 M 5 5 z z", 3),
            "M0 0M5 5zz"
        );
    }

    #[test]
    fn test_invalid_input_passthrough() {
        assert_eq!(minify_path_data("  M10 x  ", 3), "M10 x");
        assert_eq!(minify_path_data("10 20", 3), "10 20");
    }

    #[test]
    fn test_lex_number() {
        assert_eq!(lex_number("12.5abc"), Some((12.5, 4)));
        assert_eq!(lex_number("-.5"), Some((-0.5, 3)));
        assert_eq!(lex_number("1e"), Some((1.0, 1)));
        assert_eq!(lex_number("-x"), None);
    }

    #[test]
    fn test_idempotent() {
        let once = minify_path_data("M 1.5 2.25 C 3 4, 5 6, 7 8 Z", 3);
        assert_eq!(minify_path_data(&once, 3), once);
    }
}
