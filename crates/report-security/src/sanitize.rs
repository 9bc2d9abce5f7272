//! Free-text sanitization
//!
//! Reports are plain text. Before transmission every string answer is
//! reduced to its text content: script and style blocks disappear with
//! their content, every other tag is dropped while its inner text stays.

use regex::Regex;
use std::sync::OnceLock;

use report_core::{FormAnswers, QuestionnaireAnswers};

fn blocks_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("valid block pattern")
    })
}

fn unclosed_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<(?:script|style).*$").expect("valid unclosed pattern"))
}

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?(?:-->|$)").expect("valid comment pattern"))
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</?[A-Za-z!?][^>]*>").expect("valid tag pattern"))
}

fn special_chars_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[<>"'%;()&+]"#).expect("valid special chars pattern"))
}

/// Strip HTML from a free-text answer, keeping its text content
///
/// A `<` that does not open a tag (as in `3 < 5`) is left alone. Passes
/// repeat until nothing changes, so a tag split by another tag
/// (`<<b>script>`) cannot reassemble in the output.
pub fn sanitize_input(dirty: &str) -> String {
    let mut text = dirty.replace('\0', "");

    loop {
        let next = strip_markup(&text);
        // every pass only deletes, so this terminates
        if next.len() == text.len() {
            return next;
        }
        text = next;
    }
}

fn strip_markup(text: &str) -> String {
    let text = comment_regex().replace_all(text, "");
    let text = blocks_regex().replace_all(&text, "");
    let text = unclosed_block_regex().replace_all(&text, "");
    tag_regex().replace_all(&text, "").into_owned()
}

/// Sanitize every string answer; boolean answers are untouched
pub fn sanitize_answers(answers: &FormAnswers) -> FormAnswers {
    let mut clean = answers.clone();
    sanitize_fields(clean.text_fields_mut());
    clean
}

/// Sanitize every questionnaire answer
pub fn sanitize_questionnaire(answers: &QuestionnaireAnswers) -> QuestionnaireAnswers {
    let mut clean = answers.clone();
    sanitize_fields(clean.text_fields_mut());
    clean
}

fn sanitize_fields<'a>(fields: impl IntoIterator<Item = &'a mut String>) {
    for field in fields {
        let sanitized = sanitize_input(field);
        if sanitized != *field {
            tracing::debug!("Markup removed from answer");
        }
        *field = sanitized;
    }
}

/// Drop characters commonly used in injection payloads
pub fn remove_special_characters(input: &str) -> String {
    special_chars_regex().replace_all(input, "").into_owned()
}

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(sanitize_input(""), "");
        assert_eq!(sanitize_input("Ele tem 3 < 5 anos"), "Ele tem 3 < 5 anos");
        assert_eq!(sanitize_input("Tom & Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_tags_removed_content_kept() {
        assert_eq!(sanitize_input("<b>urgente</b>"), "urgente");
        assert_eq!(
            sanitize_input("<p class=\"x\">linha <i>um</i></p>"),
            "linha um"
        );
        assert_eq!(sanitize_input("<img src=x onerror=alert(1)>texto"), "texto");
    }

    #[test]
    fn test_script_and_style_content_removed() {
        assert_eq!(sanitize_input("oi<script>alert('x')</script>!"), "oi!");
        assert_eq!(sanitize_input("a<STYLE type=text/css>b{}</STYLE>c"), "ac");
        assert_eq!(sanitize_input("antes<script>roubar()"), "antes");
    }

    #[test]
    fn test_comments_and_nul_removed() {
        assert_eq!(sanitize_input("a<!-- oculto -->b"), "ab");
        assert_eq!(sanitize_input("a\0b"), "ab");
    }

    #[test]
    fn test_sanitize_answers() {
        let answers = FormAnswers {
            description: "<b>Relato</b><script>x()</script>".to_string(),
            city: "São Paulo".to_string(),
            consent: true,
            ..Default::default()
        };
        let clean = sanitize_answers(&answers);
        assert_eq!(clean.description, "Relato");
        assert_eq!(clean.city, "São Paulo");
        assert!(clean.consent);
    }

    #[test]
    fn test_sanitize_questionnaire() {
        let answers = QuestionnaireAnswers {
            name: "<i>Bia</i>".to_string(),
            observation: "Nada<style>p{}</style> a declarar".to_string(),
            knows_abuse: "Sim".to_string(),
            ..Default::default()
        };
        let clean = sanitize_questionnaire(&answers);
        assert_eq!(clean.name, "Bia");
        assert_eq!(clean.observation, "Nada a declarar");
        assert_eq!(clean.knows_abuse, "Sim");
    }

    #[test]
    fn test_remove_special_characters() {
        assert_eq!(
            remove_special_characters("a<b>\"c\"'d'%e;f(g)&h+i"),
            "abcdefghi"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_nested_markup_cannot_reassemble() {
        let out = sanitize_input("<<b>script>alert(1)<</b>/script>");
        assert!(!out.to_lowercase().contains("<script"), "got {:?}", out);

        let out = sanitize_input("<scr<i>ipt>steal()</scr<i>ipt>ok");
        assert!(!out.to_lowercase().contains("<script"), "got {:?}", out);

        assert_eq!(sanitize_input("<sty<!-- x -->le>body{}</style>texto"), "texto");

        assert_eq!(sanitize_input("<<b>b>negrito<</b>/b>"), "negrito");
    }

    proptest! {
        #[test]
        fn test_text_without_markup_is_preserved(text in "[^<\\x00]*") {
            prop_assert_eq!(sanitize_input(&text), text);
        }

        #[test]
        fn test_output_never_grows(text in ".*") {
            let clean = sanitize_input(&text);
            prop_assert!(clean.len() <= text.len());
            prop_assert!(!clean.contains('\0'));
        }

        #[test]
        fn test_output_is_stable(text in "[a-z<>/!-]{0,40}") {
            let clean = sanitize_input(&text);
            prop_assert_eq!(sanitize_input(&clean), clean.clone());
            prop_assert!(!clean.contains("<script"));
        }
    }
}
