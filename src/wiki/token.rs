use rand::Rng;
use rand::seq::SliceRandom as _;
use serde::Deserialize;

use crate::markdown::escape_html;

pub const TOKEN: &str = "M-A-C-G-U-F-F-I-N";

#[derive(Debug, Clone, Deserialize)]
pub struct FactPool {
    pub facts: Vec<String>,
}

/// One randomly chosen fact, rendered twice from the same value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenToken {
    pub fact: String,
    /// Visible fragment appended to the last section.
    pub html: String,
    /// `application/ld+json` script embedded in the page metadata.
    pub structured: String,
}

impl HiddenToken {
    pub fn new(fact: &str) -> Self {
        let html = format!(
            "<p class=\"token-text\">&lt;{TOKEN}&gt; {}</p>",
            escape_html(fact)
        );

        let payload = serde_json::json!({ "fact": format!("<{TOKEN}> {fact}") });
        // `</` would close the script element early.
        let json = payload.to_string().replace("</", "<\\/");
        let structured = format!("<script type=\"application/ld+json\">{json}</script>");

        Self {
            fact: fact.to_owned(),
            html,
            structured,
        }
    }
}

impl FactPool {
    /// Picks a fact uniformly; `None` for an empty pool.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<HiddenToken> {
        self.facts.choose(rng).map(|fact| HiddenToken::new(fact))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn both_fragments_carry_the_same_fact() -> anyhow::Result<()> {
        let token = HiddenToken::new("Hitchcock was afraid of eggs.");
        assert_eq!(
            token.html,
            "<p class=\"token-text\">&lt;M-A-C-G-U-F-F-I-N&gt; Hitchcock was afraid of eggs.</p>"
        );

        let json = token
            .structured
            .strip_prefix("<script type=\"application/ld+json\">")
            .and_then(|s| s.strip_suffix("</script>"))
            .ok_or_else(|| anyhow::anyhow!("unexpected wrapper: {}", token.structured))?;
        let value: serde_json::Value = serde_json::from_str(json)?;
        assert_eq!(
            value["fact"],
            "<M-A-C-G-U-F-F-I-N> Hitchcock was afraid of eggs."
        );
        Ok(())
    }

    #[test]
    fn quotes_and_script_close_cannot_break_out() {
        let token = HiddenToken::new("He said \"</script><b>\"");
        assert!(!token.structured[..token.structured.len() - "</script>".len()].contains("</"));
        assert!(token.html.contains("&quot;&lt;/script&gt;&lt;b&gt;&quot;"));
    }

    #[test]
    fn choose_picks_from_pool() {
        let pool = FactPool {
            facts: vec!["one".to_owned(), "two".to_owned(), "three".to_owned()],
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let token = pool.choose(&mut rng).expect("non-empty pool");
            assert!(pool.facts.contains(&token.fact));
        }
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let pool = FactPool { facts: Vec::new() };
        assert!(pool.choose(&mut StdRng::seed_from_u64(1)).is_none());
    }
}
