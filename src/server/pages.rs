//! HTML pages for the web interface.

use crate::flow::{QaState, SummarizeState};
use crate::utils::html_escape;

const APP_TITLE: &str = "🧠 Smart Summarizer &amp; Q&amp;A App";

const STYLE: &str = r#"
        body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #262730; }
        nav.tabs { display: flex; gap: 1.5rem; border-bottom: 1px solid #ddd; margin-bottom: 1.5rem; }
        nav.tabs a { padding: 0.5rem 0; text-decoration: none; color: inherit; }
        nav.tabs a.active { border-bottom: 2px solid #ff4b4b; color: #ff4b4b; }
        .modes a { margin-right: 1rem; }
        .modes a.active { font-weight: bold; }
        label { display: block; margin: 1rem 0 0.3rem; }
        input[type=text] { width: 100%; padding: 0.4rem; }
        button { margin-top: 1rem; padding: 0.4rem 1rem; }
        .success { background: #e8f9ee; padding: 0.8rem; margin-top: 1.5rem; }
        .warning { background: #fffbe6; padding: 0.8rem; margin-top: 1.5rem; }
        .summary p { margin: 0.4rem 0; }
"#;

/// Which tab a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Summarize,
    Qa,
}

impl Tab {
    fn path(&self) -> &'static str {
        match self {
            Tab::Summarize => "/summarize",
            Tab::Qa => "/qa",
        }
    }
}

/// Source type picked on a tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Url,
    Pdf,
}

impl InputMode {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("pdf") {
            InputMode::Pdf
        } else {
            InputMode::Url
        }
    }

    fn value(&self) -> &'static str {
        match self {
            InputMode::Url => "url",
            InputMode::Pdf => "pdf",
        }
    }
}

/// What the summarization tab shows.
pub struct SummarizeView<'a> {
    pub mode: InputMode,
    pub url: &'a str,
    pub state: &'a SummarizeState,
}

/// What the Q&A tab shows.
pub struct QaView<'a> {
    pub mode: InputMode,
    pub url: &'a str,
    /// Previously uploaded PDF, base64-encoded.
    pub pdf_b64: Option<&'a str>,
    pub pdf_name: Option<&'a str>,
    pub question: &'a str,
    pub state: &'a QaState,
}

/// Base HTML template with the tab bar.
fn base_template(active: Tab, content: &str) -> String {
    let tab_link = |tab: Tab, label: &str| {
        let class = if tab == active { " class=\"active\"" } else { "" };
        format!(r#"<a href="{}"{}>{}</a>"#, tab.path(), class, label)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <h1>{title}</h1>
    <nav class="tabs">
        {summarize}
        {qa}
    </nav>
    <main>
{content}
    </main>
</body>
</html>"#,
        title = APP_TITLE,
        style = STYLE,
        summarize = tab_link(Tab::Summarize, "📝 Summarization"),
        qa = tab_link(Tab::Qa, "💬 Q&amp;A"),
        content = content,
    )
}

/// Links switching between URL and PDF input.
fn mode_switch(tab: Tab, prompt: &str, mode: InputMode) -> String {
    let link = |target: InputMode, label: &str| {
        let class = if target == mode { " class=\"active\"" } else { "" };
        format!(
            r#"<a href="{}?mode={}"{}>{}</a>"#,
            tab.path(),
            target.value(),
            class,
            label
        )
    };
    format!(
        r#"        <p class="modes">{} {} {}</p>"#,
        prompt,
        link(InputMode::Url, "🔗 URL"),
        link(InputMode::Pdf, "📄 PDF")
    )
}

fn warning(message: &str) -> String {
    format!(
        r#"        <div class="warning">{}</div>"#,
        html_escape(message)
    )
}

/// Render the summarization tab.
pub fn summarize_page(view: &SummarizeView) -> String {
    let input = match view.mode {
        InputMode::Url => format!(
            r#"            <label for="url">Enter article URL for summary:</label>
            <input type="text" id="url" name="url" value="{}">
            <button type="submit">Summarize URL</button>"#,
            html_escape(view.url)
        ),
        InputMode::Pdf => r#"            <label for="pdf">Upload a PDF for summary</label>
            <input type="file" id="pdf" name="pdf" accept=".pdf,application/pdf">
            <button type="submit">Summarize PDF</button>"#
            .to_string(),
    };

    let result = match view.state {
        SummarizeState::Done(sentences) => {
            let items: String = sentences
                .iter()
                .map(|s| format!("            <p>→ {}</p>\n", html_escape(s)))
                .collect();
            format!(
                "        <div class=\"success summary\">\n            <strong>Summary:</strong>\n{}        </div>",
                items
            )
        }
        SummarizeState::Warned(message) => warning(message),
        _ => String::new(),
    };

    let content = format!(
        r#"        <h2>Summarize from URL or PDF</h2>
{modes}
        <form method="post" action="/summarize" enctype="multipart/form-data">
            <input type="hidden" name="mode" value="{mode}">
{input}
        </form>
{result}"#,
        modes = mode_switch(
            Tab::Summarize,
            "Choose input type for summarization:",
            view.mode
        ),
        mode = view.mode.value(),
        input = input,
        result = result,
    );

    base_template(Tab::Summarize, &content)
}

/// Render the Q&A tab.
pub fn qa_page(view: &QaView) -> String {
    let source = match view.mode {
        InputMode::Url => format!(
            r#"            <label for="url">Enter article URL for Q&amp;A:</label>
            <input type="text" id="url" name="url" value="{}">"#,
            html_escape(view.url)
        ),
        InputMode::Pdf => {
            let kept = match (view.pdf_b64, view.pdf_name) {
                (Some(b64), name) => format!(
                    r#"
            <input type="hidden" name="pdf_b64" value="{}">
            <input type="hidden" name="pdf_name" value="{}">
            <p>Using {}</p>"#,
                    html_escape(b64),
                    html_escape(name.unwrap_or_default()),
                    html_escape(name.unwrap_or("uploaded PDF"))
                ),
                (None, _) => String::new(),
            };
            format!(
                r#"            <label for="pdf">Upload a PDF for Q&amp;A</label>
            <input type="file" id="pdf" name="pdf" accept=".pdf,application/pdf">{}"#,
                kept
            )
        }
    };

    let question = match view.state {
        QaState::Ready | QaState::Answered { .. } => format!(
            r#"
            <label for="question">Your question:</label>
            <input type="text" id="question" name="question" value="{}">"#,
            html_escape(view.question)
        ),
        _ => String::new(),
    };

    let result = match view.state {
        QaState::Answered { answer, .. } => format!(
            r#"        <div class="success">Answer: {}</div>"#,
            html_escape(answer)
        ),
        QaState::Warned(message) => warning(message),
        _ => String::new(),
    };

    let content = format!(
        r#"        <h2>Ask Questions Based on URL or PDF</h2>
{modes}
        <form method="post" action="/qa" enctype="multipart/form-data">
            <input type="hidden" name="mode" value="{mode}">
{source}{question}
            <button type="submit">Submit</button>
        </form>
{result}"#,
        modes = mode_switch(Tab::Qa, "Choose input type for Q&amp;A:", view.mode),
        mode = view.mode.value(),
        source = source,
        question = question,
        result = result,
    );

    base_template(Tab::Qa, &content)
}
