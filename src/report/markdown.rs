//! Telegram MarkdownV2 escaping. The API rejects the whole message if any
//! reserved character in free text is left unescaped, so site-provided
//! strings (channel names, toast text) always pass through here.

const RESERVED: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

pub fn escape_md(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_reserved_character() {
        assert_eq!(escape_md("a_b*c[d]"), "a\\_b\\*c\\[d\\]");
        assert_eq!(escape_md("1.2-3!"), "1\\.2\\-3\\!");
        assert_eq!(escape_md("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn leaves_plain_and_thai_text_alone() {
        assert_eq!(escape_md("FPAY CRYPTO"), "FPAY CRYPTO");
        assert_eq!(escape_md("เติมเงินผ่าน QR"), "เติมเงินผ่าน QR");
    }
}
