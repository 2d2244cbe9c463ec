//! Best-effort group labels from surface patterns.
//!
//! Rules are anchored at the start of the item and evaluated in order;
//! the first match wins. The function is total: unmatched items fall into
//! the configured fallback bucket.

use anyhow::{Context, Result};
use itertools::Itertools;
use regex::Regex;

use crate::infra::config::{Labels, Vocabulary};

#[derive(Debug, Clone)]
pub struct Categorizer
{
    /// `(주)한국건설`: marker first
    leading_entity: Option<Regex>,

    /// `한국건설(주)`: marker last
    trailing_entity: Option<Regex>,

    /// `2024`, `2025-2026`, `2024~`
    year: Regex,

    /// `(수공)`
    status_tag: Regex,

    labels: Labels,
}

impl Categorizer
{
    pub fn new(
        vocab: &Vocabulary,
        labels: &Labels,
    ) -> Result<Self>
    {
        let markers = vocab
            .entity_markers
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| regex::escape(m))
            .join("|");

        let (leading_entity, trailing_entity) = if markers.is_empty()
        {
            (None, None)
        }
        else
        {
            let leading = Regex::new(&format!(r"^\((?:{markers})\)\s*[^:\s]+"))
                .context("compile leading entity rule")?;
            let trailing = Regex::new(&format!(r"^[^:\s]+\((?:{markers})\)"))
                .context("compile trailing entity rule")?;
            (Some(leading), Some(trailing))
        };

        Ok(Self {
            leading_entity,
            trailing_entity,
            year: Regex::new(r"^20\d\d[-~]?\d*").context("compile year rule")?,
            status_tag: Regex::new(r"^\(\w{2}\)").context("compile status rule")?,
            labels: labels.clone(),
        })
    }

    /// Group label for one canonical item.
    pub fn categorize(
        &self,
        item: &str,
    ) -> String
    {
        let entity = [&self.leading_entity, &self.trailing_entity]
            .into_iter()
            .flatten()
            .find_map(|rule| rule.find(item));
        if let Some(m) = entity
        {
            return m
                .as_str()
                .to_string();
        }

        if let Some(m) = self
            .year
            .find(item)
        {
            return format!("{}{}", m.as_str(), self.labels.year_suffix);
        }

        if let Some(m) = self
            .status_tag
            .find(item)
        {
            return m
                .as_str()
                .to_string();
        }

        if item
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        {
            return self
                .labels
                .latin
                .clone();
        }

        self.labels
            .fallback
            .clone()
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn categorizer() -> Categorizer
    {
        Categorizer::new(&Vocabulary::default(), &Labels::default()).unwrap()
    }

    #[test]
    fn test_leading_entity_marker()
    {
        let c = categorizer();
        assert_eq!(c.categorize("(주)한국건설 : 본사 이전"), "(주)한국건설");
        assert_eq!(c.categorize("(유) 대한상사 창고"), "(유) 대한상사");
    }

    #[test]
    fn test_trailing_entity_marker()
    {
        let c = categorizer();
        assert_eq!(c.categorize("한국건설(주) 본사"), "한국건설(주)");
        assert_eq!(c.categorize("대한상사(유):창고"), "대한상사(유)");
    }

    #[test]
    fn test_year_rule()
    {
        let c = categorizer();
        assert_eq!(c.categorize("2024년 도로 정비"), "2024년 관련");
        assert_eq!(c.categorize("2025-2026 유지보수"), "2025-2026년 관련");
        assert_eq!(c.categorize("2024~ 점검"), "2024~년 관련");
        // Not a 20xx year
        assert_eq!(c.categorize("1999 사업"), "기타");
    }

    #[test]
    fn test_status_tag_rule()
    {
        let c = categorizer();
        assert_eq!(c.categorize("(수공) 댐 정비"), "(수공)");
        // Three characters is not a status tag
        assert_eq!(c.categorize("(우수조) 납품"), "기타");
    }

    #[test]
    fn test_latin_and_fallback()
    {
        let c = categorizer();
        assert_eq!(c.categorize("Acme Corp Project"), "English / Other");
        assert_eq!(c.categorize("acme"), "English / Other");
        assert_eq!(c.categorize("한강 교량"), "기타");
        assert_eq!(c.categorize(""), "기타");
    }

    #[test]
    fn test_entity_rule_precedes_status_rule()
    {
        let c = categorizer();
        assert_eq!(c.categorize("(주)ABC"), "(주)ABC");
        assert_eq!(c.categorize("(주식) ABC"), "(주식)");
    }

    #[test]
    fn test_no_markers_skips_entity_rules()
    {
        let vocab = Vocabulary { entity_markers: Vec::new(), ..Vocabulary::default() };
        let c = Categorizer::new(&vocab, &Labels::default()).unwrap();
        assert_eq!(c.categorize("(주)한국건설"), "기타");
    }
}
