//! Character-level CSV parser.

use jobtrack_model::RawRow;
use tracing::debug;

/// Accumulates the characters of one field.
#[derive(Default)]
struct FieldBuffer {
    text: String,
    /// Field started with an opening quote.
    quoted: bool,
    /// Closing quote has been seen.
    closed: bool,
}

impl FieldBuffer {
    fn push(&mut self, c: char) {
        // Padding between a closing quote and the delimiter is not content.
        if self.quoted && self.closed && c.is_whitespace() {
            return;
        }
        self.text.push(c);
    }

    fn open_quote(&mut self) {
        if !self.quoted && self.text.trim().is_empty() {
            self.text.clear();
            self.quoted = true;
        }
        self.closed = false;
    }

    fn close_quote(&mut self) {
        self.closed = true;
    }

    /// Takes the field value, trimming it unless it was quoted.
    fn finish(&mut self) -> (String, bool) {
        let buffer = std::mem::take(self);
        if buffer.quoted {
            (buffer.text, true)
        } else {
            (buffer.text.trim().to_string(), false)
        }
    }
}

/// Parses CSV text into rows of cells.
///
/// - `""` inside a quoted field is a literal quote.
/// - Commas and line breaks inside quotes are literal.
/// - `\r\n`, `\n` and a lone `\r` end a row outside quotes.
/// - Unquoted fields are trimmed; quoted content is kept verbatim.
/// - Blank lines are skipped; the last row is kept without a trailing newline.
///
/// The parser never fails. An unterminated quote swallows the rest of the
/// input into the current field.
pub fn parse(content: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut cells: RawRow = Vec::new();
    let mut field = FieldBuffer::default();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.text.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                    field.close_quote();
                }
            } else {
                field.text.push(c);
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                field.open_quote();
            }
            ',' => {
                let (value, _) = field.finish();
                cells.push(value);
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut rows, &mut cells, &mut field);
            }
            '\n' => end_row(&mut rows, &mut cells, &mut field),
            _ => field.push(c),
        }
    }

    if in_quotes {
        debug!(row = rows.len() + 1, "unterminated quoted field at end of input");
    }
    end_row(&mut rows, &mut cells, &mut field);
    rows
}

fn end_row(rows: &mut Vec<RawRow>, cells: &mut RawRow, field: &mut FieldBuffer) {
    let (value, quoted) = field.finish();
    cells.push(value);
    let blank = cells.len() == 1 && !quoted && cells[0].is_empty();
    if blank {
        cells.clear();
    } else {
        rows.push(std::mem::take(cells));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rows() {
        let rows = parse("a,b,c\n1,2,3\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn test_parse_quoted_commas() {
        let rows = parse("\"Acme, Inc.\",\"Senior Engineer, L5\"");
        assert_eq!(rows, vec![vec!["Acme, Inc.", "Senior Engineer, L5"]]);
    }

    #[test]
    fn test_parse_escaped_quotes() {
        let rows = parse("\"he said \"\"hello\"\"\",b");
        assert_eq!(rows, vec![vec!["he said \"hello\"", "b"]]);
    }

    #[test]
    fn test_parse_multiline_quoted_field() {
        let rows = parse("notes,company\n\"line one\nline two\",Acme\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["line one\nline two", "Acme"]);
    }

    #[test]
    fn test_parse_crlf_is_one_break() {
        let rows = parse("a,b\r\n1,2\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_lone_carriage_return() {
        let rows = parse("a,b\r1,2");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_trims_unquoted_fields_only() {
        let rows = parse("  a  ,\"  b  \" ,  c");
        assert_eq!(rows, vec![vec!["a", "  b  ", "c"]]);
    }

    #[test]
    fn test_parse_flushes_last_row_without_newline() {
        let rows = parse("a,b\n1,2");
        assert_eq!(rows.last().unwrap(), &vec!["1", "2"]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let rows = parse("a,b\n\n   \n1,2\n\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }

    #[test]
    fn test_parse_keeps_rows_of_empty_cells() {
        let rows = parse("a,b\n,\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["", ""]]);
    }

    #[test]
    fn test_parse_does_not_pad_short_rows() {
        let rows = parse("a,b,c\n1\n1,2,3,4\n");
        assert_eq!(rows[1], vec!["1"]);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_parse_unterminated_quote_is_permissive() {
        let rows = parse("a,b\n\"open,field\nnext");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["open,field\nnext"]);
    }

    #[test]
    fn test_parse_stray_quote_mid_field() {
        let rows = parse("ab\"cd\"ef,g");
        assert_eq!(rows, vec![vec!["abcdef", "g"]]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("\n\r\n").is_empty());
    }
}
