use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Renders markdown to an HTML fragment.
///
/// Fenced code blocks are wrapped in `<div class="codehilite">` with a `language-*` class on
/// the `<code>` element so the site stylesheet and client-side highlighter can pick them up.
pub fn render_markdown(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(md, options);
    let events = wrap_code_blocks(parser);

    let mut html = String::with_capacity(md.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}

fn wrap_code_blocks<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut in_code = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code = true;
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
                    CodeBlockKind::Indented => "",
                };
                let open = if lang.is_empty() {
                    "<div class=\"codehilite\"><pre><code>".to_owned()
                } else {
                    format!(
                        "<div class=\"codehilite\"><pre><code class=\"language-{}\">",
                        escape_html(lang)
                    )
                };
                events.push(Event::Html(CowStr::from(open)));
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code = false;
                events.push(Event::Html(CowStr::Borrowed("</code></pre></div>\n")));
            }
            Event::Text(text) if in_code => {
                events.push(Event::Html(CowStr::from(escape_html(&text))));
            }
            other => events.push(other),
        }
    }

    events
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
