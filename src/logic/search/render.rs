//! Result List Rendering
//!
//! Every record field is escaped before it lands in markup; the ids and
//! urls are untrusted too.

use super::types::{RenderedResult, ResultList, RiskLevel, SearchResult};
use crate::constants::{NO_MATCHES_MESSAGE, UNAVAILABLE_MESSAGE};
use crate::logic::markup::{escape_html, format_score, navigation_url};

/// Render one navigable result entry
pub fn render_entry(index: usize, item: &SearchResult) -> RenderedResult {
    let class = RiskLevel::css_class_for(&item.risk_level);
    let href = navigation_url(&item.risk_url, &item.customer_id);

    let html = format!(
        concat!(
            r#"<a class="search-result-item" data-index="{index}" href="{href}">"#,
            r#"<div class="search-result-title">{surname} (ID: {id})</div>"#,
            r#"<div class="search-result-line"><span>{geography} • {gender}</span>"#,
            r#"<span class="search-risk-pill {class}">{score}% {level}</span></div>"#,
            r#"<div class="search-result-line"><span>{driver}</span></div>"#,
            "</a>"
        ),
        index = index,
        href = escape_html(&href),
        surname = escape_html(&item.surname),
        id = escape_html(&item.customer_id),
        geography = escape_html(&item.geography),
        gender = escape_html(&item.gender),
        class = class,
        score = escape_html(&format_score(item.risk_score)),
        level = escape_html(&item.risk_level),
        driver = escape_html(&item.driver),
    );

    RenderedResult {
        index,
        customer_id: item.customer_id.clone(),
        href,
        html,
    }
}

/// Render a successful lookup; an empty set becomes the "no matches" placeholder
pub fn render_results(results: &[SearchResult]) -> ResultList {
    if results.is_empty() {
        return ResultList::NoMatches;
    }
    ResultList::Entries(
        results
            .iter()
            .enumerate()
            .map(|(i, item)| render_entry(i, item))
            .collect(),
    )
}

fn placeholder(message: &str) -> String {
    format!(r#"<div class="search-empty">{}</div>"#, escape_html(message))
}

impl ResultList {
    /// Inner markup of the dropdown
    pub fn to_html(&self) -> String {
        match self {
            ResultList::Hidden => String::new(),
            ResultList::Entries(entries) => entries.iter().map(|e| e.html.as_str()).collect(),
            ResultList::NoMatches => placeholder(NO_MATCHES_MESSAGE),
            ResultList::Unavailable => placeholder(UNAVAILABLE_MESSAGE),
        }
    }
}
