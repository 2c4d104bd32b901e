use bstr::ByteSlice;
use memchr::memmem;

/// Field separator of the PPDB dump format
pub const FIELD_SEPARATOR: &[u8] = b"|||";

// Byte sequences left behind by broken encodings in the PPDB dumps
const DAMAGE_MARKERS: [&[u8]; 2] = [b"\\ x", b"xc3"];

/// Split a dump line into its `|||`-separated fields
#[inline]
pub fn bs_split_fields(line: &[u8]) -> Vec<&[u8]> {
    let mut fields = Vec::new();
    let mut start = 0;
    for pos in memmem::find_iter(line, FIELD_SEPARATOR) {
        fields.push(&line[start..pos]);
        start = pos + FIELD_SEPARATOR.len();
    }
    fields.push(&line[start..]);
    fields
}

/// Does the line carry an unrecoverable encoding error?
#[inline]
pub fn bs_is_damaged(line: &[u8]) -> bool {
    DAMAGE_MARKERS
        .iter()
        .any(|marker| memmem::find(line, marker).is_some())
}

/// Whitespace-separated tokens of one field
///
/// Returns `None` if the field is not valid UTF-8.
#[inline]
pub fn bs_tokens(field: &[u8]) -> Option<Vec<String>> {
    let field = field.trim().to_str().ok()?;
    Some(field.split_whitespace().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields() {
        let line = b"[X] ||| poder legislativo ||| legislatura ||| p=0.5 ||| 0-0";
        let fields = bs_split_fields(line);

        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], b"[X] ");
        assert_eq!(fields[1], b" poder legislativo ");
        assert_eq!(fields[2], b" legislatura ");
    }

    #[test]
    fn test_split_fields_no_separator() {
        let fields = bs_split_fields(b"just text");
        assert_eq!(fields, vec![&b"just text"[..]]);
    }

    #[test]
    fn test_split_fields_empty_fields() {
        let fields = bs_split_fields(b"||||||");
        assert_eq!(fields, vec![&b""[..], &b""[..], &b""[..]]);
    }

    #[test]
    fn test_split_fields_pipe_runs() {
        // Separators do not overlap: "||||" is one separator plus a pipe
        let fields = bs_split_fields(b"a||||b");
        assert_eq!(fields, vec![&b"a"[..], &b"|b"[..]]);
    }

    #[test]
    fn test_is_damaged() {
        assert!(bs_is_damaged(b"[X] ||| caf\\ xc3 ||| cafe |||"));
        assert!(bs_is_damaged(b"[X] ||| xc3 ||| a |||"));
        assert!(!bs_is_damaged(b"[X] ||| casa ||| lar |||"));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(
            bs_tokens(b"  poder   legislativo "),
            Some(vec!["poder".to_string(), "legislativo".to_string()])
        );
        assert_eq!(bs_tokens(b"   "), Some(vec![]));
        assert_eq!(bs_tokens("ação".as_bytes()), Some(vec!["ação".to_string()]));
    }

    #[test]
    fn test_tokens_invalid_utf8() {
        assert_eq!(bs_tokens(b"caf\xe9"), None);
    }
}
