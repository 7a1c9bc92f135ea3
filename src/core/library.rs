//! Case-brief library and directory fixtures
//!
//! This module loads the embedded fixture file and exposes the case-brief
//! search primitives: term filtering and page slicing. The page slice is
//! what the simulated loader serves after its fixed delay.

use serde::Deserialize;
use std::sync::OnceLock;

/// Number of briefs served per simulated page load.
pub const PAGE_SIZE: usize = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub heading: String,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseBrief {
    pub id: String,
    pub name: String,
    pub citation: String,
    pub court: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentChat {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiModel {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mutation {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct Fixtures {
    briefs: Vec<CaseBrief>,
    reference_sections: Vec<Section>,
    projects: Vec<Project>,
    recent_chats: Vec<RecentChat>,
    ai_models: Vec<AiModel>,
    prompt_templates: Vec<PromptTemplate>,
    mutations: Vec<Mutation>,
}

fn fixtures() -> &'static Fixtures {
    static FIXTURES: OnceLock<Fixtures> = OnceLock::new();
    FIXTURES.get_or_init(|| {
        const CONTENT: &str = include_str!("../fixtures.toml");
        toml::from_str(CONTENT).expect("Failed to parse fixtures.toml")
    })
}

pub fn briefs() -> &'static [CaseBrief] {
    &fixtures().briefs
}

/// Sections joined onto the main conversation when a brief is promoted.
pub fn reference_sections() -> &'static [Section] {
    &fixtures().reference_sections
}

pub fn projects() -> &'static [Project] {
    &fixtures().projects
}

pub fn recent_chats() -> &'static [RecentChat] {
    &fixtures().recent_chats
}

pub fn ai_models() -> &'static [AiModel] {
    &fixtures().ai_models
}

pub fn prompt_templates() -> &'static [PromptTemplate] {
    &fixtures().prompt_templates
}

pub fn mutations() -> &'static [Mutation] {
    &fixtures().mutations
}

/// Find a brief by id, or by name (case-insensitive) as a fallback.
pub fn find_brief(key: &str) -> Option<&'static CaseBrief> {
    briefs()
        .iter()
        .find(|b| b.id == key)
        .or_else(|| briefs().iter().find(|b| b.name.eq_ignore_ascii_case(key)))
}

/// Case-insensitive substring filter over name and citation. An empty or
/// whitespace-only term matches everything.
pub fn filter(term: &str) -> Vec<&'static CaseBrief> {
    let needle = term.trim().to_lowercase();
    briefs()
        .iter()
        .filter(|b| {
            needle.is_empty()
                || b.name.to_lowercase().contains(&needle)
                || b.citation.to_lowercase().contains(&needle)
        })
        .collect()
}

/// One page of a filtered result set, plus whether more pages remain.
pub fn page<'a>(filtered: &[&'a CaseBrief], start: usize) -> (Vec<&'a CaseBrief>, bool) {
    let stop = (start + PAGE_SIZE).min(filtered.len());
    let items = filtered.get(start..stop).unwrap_or(&[]).to_vec();
    (items, stop < filtered.len())
}

impl Section {
    /// Body flattened to display text; list items join with newlines.
    pub fn body_text(&self) -> String {
        match &self.body {
            SectionBody::Text(text) => text.clone(),
            SectionBody::List(items) => items.join("\n"),
        }
    }
}

/// `"{heading}\n{body}"` blocks separated by blank lines, the exact shape
/// the promoted-brief AI message carries.
pub fn sections_as_text(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| format!("{}\n{}", s.heading, s.body_text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
