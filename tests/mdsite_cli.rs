use std::fs;

use predicates::prelude::*;

mod site_fixture;

fn mdsite(root: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("mdsite");
    cmd.env_remove("MDSITE_BASE_URL")
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(root);
    cmd
}

#[test]
fn sitemap_lists_blogs_then_pages() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;
    let out = temp.path().join("out/sitemap.xml");

    mdsite(temp.path())
        .args(["sitemap", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("8 urls"));

    let xml = fs::read_to_string(&out)?;
    let blog = xml
        .find("<loc>https://prestonblackburn.com/blog/rusts-web-story</loc>")
        .ok_or_else(|| anyhow::anyhow!("blog url missing:\n{xml}"))?;
    let about = xml
        .find("<loc>https://prestonblackburn.com/about</loc>")
        .ok_or_else(|| anyhow::anyhow!("page url missing:\n{xml}"))?;
    assert!(blog < about);
    assert_eq!(xml.matches("<lastmod>").count(), 1);
    Ok(())
}

#[test]
fn sitemap_base_url_comes_from_env() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;
    let out = temp.path().join("sitemap.xml");

    mdsite(temp.path())
        .env("MDSITE_BASE_URL", "https://staging.example.com/")
        .args(["sitemap", "--out"])
        .arg(&out)
        .assert()
        .success();

    let xml = fs::read_to_string(&out)?;
    assert!(xml.contains("<loc>https://staging.example.com/about</loc>"));
    Ok(())
}

#[test]
fn topics_check_reports_key_collisions() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;

    mdsite(temp.path())
        .args(["topics", "check"])
        .assert()
        .success()
        .stdout("ok: 3 topics\n");

    fs::write(
        temp.path().join("content/generated/generated_topics.txt"),
        "CI/CD\nCI CD\n",
    )?;
    mdsite(temp.path())
        .args(["topics", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("both normalize to \"CI_CD\""));
    Ok(())
}

#[test]
fn wiki_search_prints_ranked_hits() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;

    let output = mdsite(temp.path())
        .args(["wiki", "search", "--query", "docker"])
        .output()?;
    assert!(output.status.success());

    let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout)?;
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0]["topic"], "Docker");
    assert_eq!(hits[0]["score"], 100.0);
    assert_eq!(hits[0]["rank"], 1);
    assert_eq!(hits[1]["topic"], "Dockerfile");
    assert_eq!(hits[2]["topic"], "Kubernetes");
    Ok(())
}

#[test]
fn wiki_search_limit_flag_truncates() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;

    let output = mdsite(temp.path())
        .args(["wiki", "search", "--query", "docker", "--limit", "1"])
        .output()?;
    let hits: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout)?;
    assert_eq!(hits.len(), 1);
    Ok(())
}

#[test]
fn wiki_search_rejects_blank_query() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;

    mdsite(temp.path())
        .args(["wiki", "search", "--query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search query is empty"));
    Ok(())
}

#[test]
fn wiki_search_warns_about_hit_without_sections() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;
    let bodies = temp.path().join("content/generated/section_bodies.json");
    let mut sections: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&bodies)?)?;
    sections.remove("Dockerfile");
    fs::write(&bodies, serde_json::Value::Object(sections).to_string())?;

    mdsite(temp.path())
        .args(["wiki", "search", "--query", "docker"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search hit has no section data"))
        .stderr(predicate::str::contains("Dockerfile"));
    Ok(())
}

#[test]
fn wiki_page_prints_context() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;

    let output = mdsite(temp.path())
        .args(["wiki", "page", "--topic", "Docker"])
        .output()?;
    assert!(output.status.success());

    let page: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(page["title"], "Docker");
    assert_eq!(page["overview_title"], "Overview");
    assert_eq!(page["refs"].as_array().map(Vec::len), Some(2));
    assert_eq!(page["skipped_refs"], 0);
    let sections = page["section_data"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("section_data is not an array"))?;
    assert_eq!(sections.len(), 2);
    assert!(
        sections[1]["section_content"]
            .as_str()
            .is_some_and(|html| html.contains("token-text"))
    );
    Ok(())
}

#[test]
fn wiki_page_unknown_topic_fails() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;

    mdsite(temp.path())
        .args(["wiki", "page", "--topic", "Nonexistent Topic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown topic: Nonexistent Topic"));
    Ok(())
}

#[test]
fn rust_log_debug_emits_debug_line_to_stderr() -> anyhow::Result<()> {
    let temp = tempfile::TempDir::new()?;
    site_fixture::write_site(temp.path())?;

    mdsite(temp.path())
        .env("RUST_LOG", "debug")
        .args(["topics", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed cli"));
    Ok(())
}
