//! The byte buffer handed to read handlers
//!
//! This is `netbuf::Buf`: bytes are appended at the back by the transport
//! and consumed from the front by the protocol. The readable bytes are
//! `&buf[..]`, their count is `buf.len()` and `buf.consume(n)` discards
//! the first `n` of them.
pub use netbuf::Buf;


/// Returns the offset of the first occurrence of `needle` in `haystack`
///
/// An empty needle is never found.
pub fn find_substr(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
