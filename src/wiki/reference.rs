//! Citation HTML for book and web-article references.
//!
//! Each reference kind is described by a table of [`FieldRule`]s. A rule contributes its
//! template when its field (and every field it requires) is non-empty and every field it is
//! `unless` is empty, and its `when_empty` text otherwise. Omission is therefore decided per
//! fragment, punctuation included.

use crate::markdown::escape_html;
use crate::wiki::model::{ArticleReference, BookReference};

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub requires: &'static [&'static str],
    /// Fields that must be empty for the template to apply.
    pub unless: &'static [&'static str],
    /// `{field_name}` placeholders are replaced by the escaped field value.
    pub template: &'static str,
    pub when_empty: &'static str,
}

impl FieldRule {
    const fn new(field: &'static str, template: &'static str) -> Self {
        Self {
            field,
            requires: &[],
            unless: &[],
            template,
            when_empty: "",
        }
    }

    const fn requires(mut self, fields: &'static [&'static str]) -> Self {
        self.requires = fields;
        self
    }

    const fn unless(mut self, fields: &'static [&'static str]) -> Self {
        self.unless = fields;
        self
    }

    const fn when_empty(mut self, text: &'static str) -> Self {
        self.when_empty = text;
        self
    }
}

pub const BOOK_RULES: &[FieldRule] = &[
    FieldRule::new("authors", "{authors}"),
    FieldRule::new("source_date", " ({source_date}).").when_empty("."),
    FieldRule::new("publisher", " {publisher}."),
    FieldRule::new("source_name", " <i>{source_name}</i>."),
    FieldRule::new("pages", " {pages}."),
    FieldRule::new(
        "isbn_number",
        " <a href=\"/wiki/ISBN_{isbn_number}\" class=\"mw-redirect\" title=\"ISBN {isbn_number}\">ISBN</a>&nbsp;<a href=\"/wiki/Special:BookSources/{isbn_number}\" title=\"Special:BookSources/{isbn_number}\"><bdi>{isbn_number}</bdi></a>.",
    ),
];

pub const ARTICLE_RULES: &[FieldRule] = &[
    FieldRule::new("reference_author", "{reference_author}"),
    FieldRule::new("reference_date", " ({reference_date})").requires(&["reference_author"]),
    FieldRule::new("reference_author", ". "),
    FieldRule::new(
        "reference_title",
        "<a rel=\"nofollow\" class=\"external text\" href=\"{reference_link}\">\"{reference_title}\"</a>.",
    )
    .when_empty(
        "<a rel=\"nofollow\" class=\"external text\" href=\"{reference_link}\">{reference_link}</a>.",
    ),
    FieldRule::new("reference_source", " <i>{reference_source}</i>."),
    FieldRule::new(
        "archive_date",
        " <a rel=\"nofollow\" class=\"external text\" href=\"{archive_link}\">Archived</a> from the original on {archive_date}.",
    )
    .requires(&["archive_link"]),
    FieldRule::new(
        "archive_date",
        " <a rel=\"nofollow\" class=\"external text\" href=\"{reference_link}\">Archived</a> from the original on {archive_date}.",
    )
    .unless(&["archive_link"]),
    FieldRule::new(
        "retrieved_date",
        " <span class=\"reference-accessdate\">Retrieved <span class=\"nowrap\">{retrieved_date}</span></span>.",
    ),
];

/// A record that renders through a rule table.
pub trait Citation {
    /// `book` or `web`, used in the `citation {class} cs1` markup.
    const CLASS: &'static str;
    const RULES: &'static [FieldRule];

    fn fields(&self) -> Vec<(&'static str, &str)>;

    /// Text the anchor id is derived from.
    fn anchor_source(&self) -> &str;

    fn anchor_id(&self) -> String {
        self.anchor_source().to_lowercase().replace(' ', "_")
    }

    fn render(&self) -> String {
        let fields = self.fields();
        let body = render_rules(Self::RULES, &fields);
        format!(
            "<span class=\"reference-text\"><link rel=\"mw-deduplicated-inline-style\" href=\"mw-data:TemplateStyles:r1238218222\"><cite id=\"{}\" class=\"citation {} cs1\">{}</cite></span>",
            escape_html(&self.anchor_id()),
            Self::CLASS,
            body.trim(),
        )
    }
}

impl Citation for BookReference {
    const CLASS: &'static str = "book";
    const RULES: &'static [FieldRule] = BOOK_RULES;

    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("authors", self.authors.as_str()),
            ("source_date", self.source_date.as_str()),
            ("source_name", self.source_name.as_str()),
            ("source_link", self.source_link.as_str()),
            ("publisher", self.publisher.as_str()),
            ("pages", self.pages.as_str()),
            ("isbn_number", self.isbn_number.as_str()),
        ]
    }

    fn anchor_source(&self) -> &str {
        &self.authors
    }
}

impl Citation for ArticleReference {
    const CLASS: &'static str = "web";
    const RULES: &'static [FieldRule] = ARTICLE_RULES;

    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("reference_author", self.reference_author.as_str()),
            ("reference_title", self.reference_title.as_str()),
            ("reference_link", self.reference_link.as_str()),
            ("reference_source", self.reference_source.as_str()),
            ("reference_date", self.reference_date.as_str()),
            ("archive_link", self.archive_link.as_str()),
            ("archive_date", self.archive_date.as_str()),
            ("retrieved_date", self.retrieved_date.as_str()),
        ]
    }

    fn anchor_source(&self) -> &str {
        &self.reference_title
    }
}

pub fn render_rules(rules: &[FieldRule], fields: &[(&'static str, &str)]) -> String {
    let value = |name: &str| {
        fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
            .unwrap_or("")
    };

    let mut out = String::new();
    for rule in rules {
        let present = !value(rule.field).is_empty()
            && rule.requires.iter().all(|f| !value(*f).is_empty())
            && rule.unless.iter().all(|f| value(*f).is_empty());
        let template = if present { rule.template } else { rule.when_empty };
        fill_template(template, &value, &mut out);
    }
    out
}

// Single pass so substituted values are never re-scanned for placeholders.
fn fill_template<'a>(template: &str, value: &impl Fn(&str) -> &'a str, out: &mut String) {
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                out.push_str(&escape_html(value(&after[..end])));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
}

/// Interleaves rendered book and article citations: book[0], article[0], book[1], ...
///
/// Once the shorter list runs out the longer one continues alone.
pub fn merge_references(books: &[BookReference], articles: &[ArticleReference]) -> Vec<String> {
    interleave(
        books.iter().map(Citation::render).collect(),
        articles.iter().map(Citation::render).collect(),
    )
}

pub fn interleave<T>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    loop {
        let a = left.next();
        let b = right.next();
        if a.is_none() && b.is_none() {
            break;
        }
        out.extend(a);
        out.extend(b);
    }
    out
}
