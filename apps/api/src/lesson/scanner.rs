//! Bracket-depth scanning for directive payloads.
//!
//! Payloads may contain their own brackets (`list[0]`, nested `[CODE_BLOCK: ...]`),
//! so the closing bracket of a directive is found by counting depth instead of
//! taking the first `]`.

/// Returns the byte offset of the `]` that closes a directive whose payload
/// starts at `from`.
///
/// The scan starts at depth 1 for the directive's own `[`. `None` means the
/// text ended before the depth returned to zero.
pub fn find_closing_bracket(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, byte) in text.as_bytes().get(from..)?.iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + offset);
                }
            }
            _ => {}
        }
    }
    None
}
