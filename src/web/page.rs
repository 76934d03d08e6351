//! HTML rendering for the upload page.
//!
//! Everything user-supplied goes through [`html_escape::encode_safe`]; answers
//! keep their line breaks through CSS rather than markup.

use std::fmt::Write;

use html_escape::encode_safe;

/// Page title and header text.
pub const PAGE_TITLE: &str = "AI PDF Assistant";

const STYLE: &str = r"
body { font-family: system-ui, sans-serif; background: #1e1e2e; color: #eee; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
.main-header {
  background: linear-gradient(135deg, #667eea, #764ba2);
  padding: 2rem; text-align: center; border-radius: 15px; color: white;
  box-shadow: 0 8px 32px rgba(102, 126, 234, 0.3);
}
.chat-container, .upload-area {
  background: rgba(255, 255, 255, 0.05); border-radius: 15px;
  padding: 1.5rem; margin: 1rem 0; border: 1px solid rgba(255, 255, 255, 0.1);
}
.user-message {
  background: linear-gradient(135deg, #667eea, #764ba2); color: white;
  padding: 1rem 1.5rem; border-radius: 20px 20px 5px 20px;
}
.assistant-message {
  background: rgba(255,255,255,0.1); color: white; padding: 1rem 1.5rem;
  border-radius: 20px 20px 20px 5px; border-left: 4px solid #667eea; white-space: pre-wrap;
}
.notice { color: #f5c2e7; }
label { display: block; margin: 0.75rem 0 0.25rem; }
input[type=text] { width: 100%; padding: 0.5rem; border-radius: 8px; border: none; }
button {
  margin-top: 1rem; background: linear-gradient(135deg, #667eea, #764ba2);
  color: white; border: none; border-radius: 25px; padding: 0.75rem 2rem; font-weight: 600;
}
";

/// One question and the text shown in reply.
#[derive(Debug, Clone)]
pub struct Exchange<'a> {
    /// The user's question.
    pub question: &'a str,
    /// The answer, or a `❌` message.
    pub answer: &'a str,
}

/// Renders the full page, optionally with a notice and a finished exchange.
#[must_use]
pub fn render_page(notice: Option<&str>, exchange: Option<&Exchange<'_>>) -> String {
    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n\
         <div class=\"main-header\"><h1>🤖 {PAGE_TITLE}</h1><p>Upload PDFs &amp; Ask Anything!</p></div>\n"
    );

    html.push_str(
        "<form class=\"upload-area\" method=\"post\" action=\"/ask\" enctype=\"multipart/form-data\">\n\
         <label for=\"file\">Upload your PDF file</label>\n\
         <input id=\"file\" type=\"file\" name=\"file\" accept=\".pdf,application/pdf\" required>\n\
         <label for=\"question\">What would you like to ask about this PDF?</label>\n\
         <input id=\"question\" type=\"text\" name=\"question\" placeholder=\"e.g., Summarize Chapter 2\" required>\n\
         <button type=\"submit\">Ask</button>\n</form>\n",
    );

    if let Some(notice) = notice {
        let _ = writeln!(html, "<p class=\"notice\">{}</p>", encode_safe(notice));
    }

    if let Some(exchange) = exchange {
        let _ = writeln!(
            html,
            "<div class=\"chat-container user-message\">🧑‍💻 You: {}</div>",
            encode_safe(exchange.question)
        );
        let _ = writeln!(
            html,
            "<div class=\"chat-container assistant-message\">🤖 {}</div>",
            encode_safe(exchange.answer)
        );
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("plain", "plain"; "no special characters")]
    #[test_case("<script>", "&lt;script&gt;"; "tags")]
    #[test_case("a & b", "a &amp; b"; "ampersand")]
    #[test_case(r#"say "hi" it's"#, "say &quot;hi&quot; it&#x27;s"; "quotes")]
    fn test_question_is_escaped(question: &str, expected: &str) {
        let exchange = Exchange {
            question,
            answer: "ok",
        };
        let html = render_page(None, Some(&exchange));
        assert!(html.contains(&format!("🧑‍💻 You: {expected}</div>")));
    }

    #[test]
    fn test_empty_page_has_form() {
        let html = render_page(None, None);
        assert!(html.contains("<title>AI PDF Assistant</title>"));
        assert!(html.contains("name=\"file\""));
        assert!(html.contains("name=\"question\""));
        assert!(!html.contains("user-message\">"));
    }

    #[test]
    fn test_exchange_is_escaped() {
        let exchange = Exchange {
            question: "<b>why</b>?",
            answer: "## Answer\n<img src=x>",
        };
        let html = render_page(None, Some(&exchange));
        assert!(html.contains("🧑‍💻 You: &lt;b&gt;why&lt;&#x2F;b&gt;?"));
        assert!(html.contains("🤖 ## Answer\n&lt;img src=x&gt;"));
        assert!(!html.contains("<img src=x>"));
    }

    #[test]
    fn test_notice_rendered() {
        let html = render_page(Some("Only .pdf files are accepted."), None);
        assert!(html.contains("<p class=\"notice\">Only .pdf files are accepted.</p>"));
    }
}
