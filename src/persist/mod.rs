//! Durable forms of the in-memory scene: this crate's own annotation XML,
//! Xournal/Xournal++ import, and clipboard payload encode/decode.
//!
//! Grounded on the teacher's `session::storage` module (load/save as a
//! pair of free functions returning a typed error, never panicking on
//! malformed input) generalized from the teacher's ad hoc binary session
//! format to the structured formats spec.md §6 names.

pub mod clipboard;
pub mod xml;
pub mod xournal;

fn hex_encode(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{b:02x}"));
    }
    s
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_arbitrary_bytes() {
        let bytes = vec![0u8, 1, 255, 16, 128];
        assert_eq!(hex_decode(&hex_encode(&bytes)).unwrap(), bytes);
    }
}
