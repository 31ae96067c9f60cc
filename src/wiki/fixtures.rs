use std::path::Path;

use crate::wiki::store::WikiPaths;

/// Writes a small wiki data set into `dir`.
pub(crate) fn write_fixture(dir: &Path) -> anyhow::Result<WikiPaths> {
    let paths = WikiPaths {
        topics: dir.join("generated_topics.txt"),
        section_bodies: dir.join("section_bodies.json"),
        personal_sections: dir.join("related_to_me.json"),
        book_refs: dir.join("book_refs.json"),
        article_refs: dir.join("article_refs.json"),
        facts: dir.join("facts.json"),
        personal_image: "/static/img/wiki/icons/placeholder_image.jpg".to_owned(),
    };
    std::fs::write(&paths.topics, "CI/CD Pipelines\nDocker\n\nDocker\n")?;
    std::fs::write(
        &paths.section_bodies,
        serde_json::json!({
            "CI/CD Pipelines": {
                "Overview": "Pipelines **automate** delivery.",
                "Key Concepts": "Stages and jobs.",
                "Tooling": "```yaml\nsteps: []\n```",
            },
            "Docker": {},
        })
        .to_string(),
    )?;
    std::fs::write(
        &paths.personal_sections,
        serde_json::json!({ "CI_CD_Pipelines": "I build *these*." }).to_string(),
    )?;
    std::fs::write(
        &paths.book_refs,
        serde_json::json!({
            "CI CD Pipelines": [
                {
                    "authors": "Jez Humble",
                    "source_date": "2010",
                    "source_name": "Continuous Delivery",
                    "source_link": "",
                    "publisher": "Addison-Wesley",
                    "pages": "",
                    "isbn_number": "978-0321601919",
                },
                { "authors": "Missing Fields" },
            ],
        })
        .to_string(),
    )?;
    std::fs::write(
        &paths.article_refs,
        serde_json::json!({ "CI-CD-Pipelines": [] }).to_string(),
    )?;
    std::fs::write(
        &paths.facts,
        serde_json::json!({ "facts": ["Hitchcock never won a competitive Oscar."] })
            .to_string(),
    )?;
    Ok(paths)
}
