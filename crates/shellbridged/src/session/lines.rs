//! Bounded line reading for the request loop.

use std::io::{self, BufRead};

/// One unit read from the input stream.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line {
    /// A complete line, including its terminator when one was present.
    Complete(Vec<u8>),
    /// A line longer than the limit; its bytes were discarded.
    Oversized {
        /// Total bytes consumed for the line.
        size: usize,
    },
    /// The stream ended before any byte of a new line.
    EndOfStream,
}

/// Reads the next newline-terminated line, buffering at most `max_bytes`.
///
/// Bytes beyond the limit are consumed and dropped so the following line
/// starts cleanly. A final line without a terminator is still returned.
pub(crate) fn read_line(reader: &mut impl BufRead, max_bytes: usize) -> io::Result<Line> {
    let mut buffer = Vec::new();
    let mut size = 0_usize;
    let mut oversized = false;

    loop {
        let (consumed, finished) = {
            let available = match reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                Err(error) => return Err(error),
            };

            if available.is_empty() {
                return Ok(match (size, oversized) {
                    (0, _) => Line::EndOfStream,
                    (_, true) => Line::Oversized { size },
                    (_, false) => Line::Complete(buffer),
                });
            }

            let newline = available.iter().position(|byte| *byte == b'\n');
            let chunk = match newline {
                Some(position) => available.split_at(position + 1).0,
                None => available,
            };

            size += chunk.len();
            if !oversized {
                if size > max_bytes {
                    oversized = true;
                    buffer = Vec::new();
                } else {
                    buffer.extend_from_slice(chunk);
                }
            }
            (chunk.len(), newline.is_some())
        };

        reader.consume(consumed);
        if finished {
            return Ok(if oversized {
                Line::Oversized { size }
            } else {
                Line::Complete(buffer)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use super::*;

    fn lines(input: &[u8], max_bytes: usize) -> Vec<Line> {
        let mut reader = Cursor::new(input.to_vec());
        let mut out = Vec::new();
        loop {
            let line = read_line(&mut reader, max_bytes).expect("read line");
            if line == Line::EndOfStream {
                return out;
            }
            out.push(line);
        }
    }

    #[test]
    fn splits_on_newlines() {
        assert_eq!(
            lines(b"one\ntwo\n", 64),
            vec![
                Line::Complete(b"one\n".to_vec()),
                Line::Complete(b"two\n".to_vec())
            ]
        );
    }

    #[test]
    fn returns_unterminated_final_line() {
        assert_eq!(lines(b"last", 64), vec![Line::Complete(b"last".to_vec())]);
    }

    #[test]
    fn empty_input_is_end_of_stream() {
        assert!(lines(b"", 64).is_empty());
    }

    #[test]
    fn keeps_blank_lines() {
        assert_eq!(
            lines(b"\n\n", 64),
            vec![Line::Complete(b"\n".to_vec()), Line::Complete(b"\n".to_vec())]
        );
    }

    #[test]
    fn skips_oversized_line_and_recovers() {
        assert_eq!(
            lines(b"0123456789\nok\n", 8),
            vec![Line::Oversized { size: 11 }, Line::Complete(b"ok\n".to_vec())]
        );
    }

    #[test]
    fn limit_counts_the_terminator() {
        assert_eq!(lines(b"abc\n", 4), vec![Line::Complete(b"abc\n".to_vec())]);
        assert_eq!(lines(b"abcd\n", 4), vec![Line::Oversized { size: 5 }]);
    }

    #[test]
    fn reassembles_lines_across_small_buffers() {
        let input = b"{\"id\":\"1\"}\nsecond line\n".to_vec();
        let mut reader = BufReader::with_capacity(3, Cursor::new(input));
        assert_eq!(
            read_line(&mut reader, 64).expect("first"),
            Line::Complete(b"{\"id\":\"1\"}\n".to_vec())
        );
        assert_eq!(
            read_line(&mut reader, 64).expect("second"),
            Line::Complete(b"second line\n".to_vec())
        );
        assert_eq!(read_line(&mut reader, 64).expect("end"), Line::EndOfStream);
    }

    #[test]
    fn oversized_line_across_small_buffers() {
        let mut reader = BufReader::with_capacity(2, Cursor::new(b"abcdefgh\nxy\n".to_vec()));
        assert_eq!(
            read_line(&mut reader, 4).expect("oversized"),
            Line::Oversized { size: 9 }
        );
        assert_eq!(
            read_line(&mut reader, 4).expect("next"),
            Line::Complete(b"xy\n".to_vec())
        );
    }
}
