//! Markup escaping.

/// Replace every markup-significant character with its entity encoding.
///
/// | char | encoding  |
/// |------|-----------|
/// | `&`  | `&amp;`   |
/// | `<`  | `&lt;`    |
/// | `>`  | `&gt;`    |
/// | `"`  | `&quot;`  |
/// | `'`  | `&#x27;`  |
///
/// Not idempotent: escaping `&lt;` yields `&amp;lt;`.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn escapes_script_tag() {
        assert_eq!(
            escape_markup("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn escapes_quotes_and_ampersand() {
        assert_eq!(
            escape_markup(r#"a & "b" 'c'"#),
            "a &amp; &quot;b&quot; &#x27;c&#x27;"
        );
    }

    #[test]
    fn double_escapes() {
        let once = escape_markup("<");
        assert_eq!(escape_markup(&once), "&amp;lt;");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_markup("hello, wörld"), "hello, wörld");
    }

    proptest! {
        #[test]
        fn output_has_no_raw_markup(s in ".*") {
            let out = escape_markup(&s);
            prop_assert!(!out.contains('<'));
            prop_assert!(!out.contains('>'));
            prop_assert!(!out.contains('"'));
            prop_assert!(!out.contains('\''));
        }

        #[test]
        fn every_ampersand_starts_an_entity(s in ".*") {
            let out = escape_markup(&s);
            for (i, _) in out.match_indices('&') {
                let rest = &out[i..];
                prop_assert!(
                    ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;"]
                        .iter()
                        .any(|e| rest.starts_with(e))
                );
            }
        }

        #[test]
        fn deterministic(s in ".*") {
            prop_assert_eq!(escape_markup(&s), escape_markup(&s));
        }
    }
}
