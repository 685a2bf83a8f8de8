use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::entity::EntityGraph;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub key: String,
    pub label: String,
    pub score: i64,
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Fuzzy-matches node labels, best score first.
pub fn search(graph: &EntityGraph, query: &str, limit: usize) -> Vec<SearchHit> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut hits = graph
        .nodes()
        .filter_map(|node| {
            fuzzy_match_score(&matcher, &node.label, query).map(|score| SearchHit {
                key: node.key.clone(),
                label: node.label.clone(),
                score,
            })
        })
        .collect::<Vec<_>>();

    hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.key.cmp(&b.key)));
    hits.truncate(limit);
    hits
}
