//! Byte-level line helpers shared by lookup and compaction.
//!
//! A line is a run of bytes terminated by `\n`, or the unterminated run at
//! the end of the buffer. An empty buffer holds no lines.

/// Return what remains of `data` after skipping exactly `n` lines.
///
/// Returns all of `data` when `n == 0`, and an empty slice once the lines
/// run out.
///
/// ```
/// use vns_table::lines::skip_lines;
///
/// let data = b"a\nbb\nccc";
/// assert_eq!(skip_lines(data, 1), b"bb\nccc");
/// assert_eq!(skip_lines(data, 2), b"ccc");
/// assert!(skip_lines(data, 3).is_empty());
/// assert!(skip_lines(data, 9).is_empty());
/// ```
pub fn skip_lines(mut data: &[u8], mut n: usize) -> &[u8] {
    while n > 0 {
        if data.is_empty() {
            return data;
        }
        let next = match data.iter().position(|&b| b == b'\n') {
            Some(idx) => idx + 1,
            None => data.len(),
        };
        data = &data[next..];
        n -= 1;
    }
    data
}

/// Iterate over lines, without their terminating `\n`.
pub fn lines(data: &[u8]) -> Lines<'_> {
    Lines { rest: data }
}

/// Number of lines in `data`.
pub fn count_lines(data: &[u8]) -> usize {
    lines(data).count()
}

/// Iterator returned by [`lines`].
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let after = skip_lines(self.rest, 1);
        let consumed = &self.rest[..self.rest.len() - after.len()];
        self.rest = after;
        Some(consumed.strip_suffix(b"\n").unwrap_or(consumed))
    }
}
