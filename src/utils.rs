/* --- src/utils.rs --- */

/// Macro to convert an ASCII string literal to a null-terminated UTF-16
/// array at compile time. A non-ASCII literal fails the build; use
/// [`to_wstring`] for arbitrary strings.
///
/// # Example
/// ```rust
/// use msgboxrs::w;
/// let wide_str = w!("Hello");
/// assert_eq!(wide_str, &[72, 101, 108, 108, 111, 0]);
/// ```
#[macro_export]
macro_rules! w {
    ($s:literal) => {
        {
            const S: &[u8] = $s.as_bytes();
            const LEN: usize = S.len() + 1;
            const UTF16: [u16; LEN] = {
                let mut out = [0u16; LEN];
                let mut i = 0;
                while i < S.len() {
                    assert!(S[i] < 0x80, "w! only supports ASCII literals");
                    out[i] = S[i] as u16;
                    i += 1;
                }
                out[LEN - 1] = 0;
                out
            };
            &UTF16[..]
        }
    };
}

/// Convert a Rust string to a null-terminated UTF-16 vector.
pub fn to_wstring(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wstring_is_null_terminated() {
        assert_eq!(to_wstring("Hi"), vec![72, 105, 0]);
        assert_eq!(to_wstring(""), vec![0]);
    }

    #[test]
    fn test_to_wstring_encodes_surrogate_pairs() {
        // U+1F4AC needs a surrogate pair in UTF-16.
        let wide = to_wstring("\u{1F4AC}");
        assert_eq!(wide, vec![0xD83D, 0xDCAC, 0]);
    }

    #[test]
    fn test_wide_literal_macro() {
        let wide = w!("OK");
        assert_eq!(wide, &[79, 75, 0]);
    }
}
