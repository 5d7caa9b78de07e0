//! Conversions between text blobs and lines

pub const LINE_SEPARATOR: &[u8] = b"\r\n";

/// Splits a blob into lines on CRLF or bare LF.
///
/// The fragment after the last separator is always a line, so an empty blob
/// yields one empty line and a trailing separator yields a trailing empty
/// line. A carriage return not followed by a line feed is kept as content.
pub fn split_lines(blob: &[u8]) -> Vec<&[u8]> {
    blob.split(|&byte| byte == b'\n')
        .map(|fragment| fragment.strip_suffix(b"\r").unwrap_or(fragment))
        .collect()
}

/// Joins lines with CRLF; `n` lines produce exactly `n - 1` separators.
pub fn join_crlf<'a, I>(lines: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut out = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        if index > 0 {
            out.extend_from_slice(LINE_SEPARATOR);
        }
        out.extend_from_slice(line);
    }
    out
}

/// True if joining `split_lines(blob)` with CRLF reproduces `blob` exactly.
pub fn is_crlf_layout(blob: &[u8]) -> bool {
    let mut previous = None;
    for &byte in blob {
        if byte == b'\n' && previous != Some(b'\r') {
            return false;
        }
        previous = Some(byte);
    }
    true
}
