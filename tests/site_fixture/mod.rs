use std::fs;
use std::path::Path;

/// Lays out a content root matching the default `SiteConfig` paths.
pub fn write_site(root: &Path) -> anyhow::Result<()> {
    let generated = root.join("content/generated");
    fs::create_dir_all(&generated)?;
    fs::create_dir_all(root.join("content/facts"))?;
    fs::create_dir_all(root.join("content/about"))?;
    fs::create_dir_all(root.join("content/blogs"))?;
    fs::create_dir_all(root.join("css"))?;

    fs::write(root.join("content/about/about.md"), "# About\n\nI write *software*.\n")?;
    fs::write(root.join("content/blogs/summary.md"), "# Posts\n")?;
    fs::write(
        root.join("content/blogs/Rust's Web Story.md"),
        "# Rust on the web\n\n```rust\nfn main() {}\n```\n",
    )?;
    fs::write(root.join("css/main.css"), "body { margin: 0; }\n")?;

    fs::write(
        generated.join("generated_topics.txt"),
        "Kubernetes\nDocker\nDockerfile\n",
    )?;

    let topics = ["Kubernetes", "Docker", "Dockerfile"];
    let mut sections = serde_json::Map::new();
    let mut personal = serde_json::Map::new();
    let mut books = serde_json::Map::new();
    let mut articles = serde_json::Map::new();
    for topic in topics {
        sections.insert(
            topic.to_owned(),
            serde_json::json!({
                "Overview": format!("{topic} is a container tool."),
                "History": format!("{topic} has a history."),
                "Usage": format!("Use {topic} daily."),
            }),
        );
        personal.insert(
            topic.to_owned(),
            serde_json::json!(format!("I use {topic} at work.")),
        );
        books.insert(
            topic.to_owned(),
            serde_json::json!([{
                "authors": "Nigel Poulton",
                "source_date": "2023",
                "source_name": format!("{topic} Deep Dive"),
                "source_link": "",
                "publisher": "Independent",
                "pages": "",
                "isbn_number": "978-1916585256",
            }]),
        );
        articles.insert(
            topic.to_owned(),
            serde_json::json!([{
                "reference_author": "Jane Doe",
                "reference_title": format!("Why {topic}"),
                "reference_link": "https://example.com/post",
                "reference_source": "Example Blog",
                "reference_date": "2021-05-01",
                "archive_link": "",
                "archive_date": "",
                "retreived_date": "2024-01-02",
            }]),
        );
    }
    fs::write(
        generated.join("section_bodies.json"),
        serde_json::Value::Object(sections).to_string(),
    )?;
    fs::write(
        generated.join("related_to_me.json"),
        serde_json::Value::Object(personal).to_string(),
    )?;
    fs::write(
        generated.join("book_refs.json"),
        serde_json::Value::Object(books).to_string(),
    )?;
    fs::write(
        generated.join("article_refs.json"),
        serde_json::Value::Object(articles).to_string(),
    )?;
    fs::write(
        root.join("content/facts/alfred_hitchcock.json"),
        serde_json::json!({ "facts": ["Hitchcock cameoed in 39 of his films."] }).to_string(),
    )?;
    Ok(())
}
