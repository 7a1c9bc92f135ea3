//! Built-in provider catalog
//!
//! Provider/model selection is cosmetic labeling: picking a pair decides
//! which pane gets opened and what its simulated replies are attributed to.
//! The catalog is fixed at compile time.

pub const DEFAULT_PROVIDER: &str = "OpenAI";
pub const DEFAULT_MODEL: &str = "GPT-4o";

/// Pseudo provider used for panes that display a promoted case brief.
pub const CASE_BRIEF_PROVIDER: &str = "Case Brief";

#[derive(Debug, Clone, Copy)]
pub struct Provider {
    pub name: &'static str,
    pub models: &'static [&'static str],
}

const PROVIDERS: &[Provider] = &[
    Provider {
        name: "OpenAI",
        models: &["GPT-4o", "o1-preview", "o1-mini"],
    },
    Provider {
        name: "Anthropic",
        models: &["Sonnet 3.5", "Opus 3"],
    },
];

pub fn all_providers() -> &'static [Provider] {
    PROVIDERS
}

/// Case-insensitive provider lookup.
pub fn find_provider(name: &str) -> Option<&'static Provider> {
    PROVIDERS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Verify a provider/model pair against the catalog, returning the
/// canonical display spellings.
pub fn resolve_pair(provider: &str, model: &str) -> Option<(&'static str, &'static str)> {
    let provider = find_provider(provider)?;
    let model = provider
        .models
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(model))?;
    Some((provider.name, model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_both_providers() {
        let names: Vec<&str> = all_providers().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["OpenAI", "Anthropic"]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find_provider("openai").is_some());
        assert!(find_provider("ANTHROPIC").is_some());
        assert!(find_provider("mistral").is_none());
    }

    #[test]
    fn resolve_pair_returns_canonical_spellings() {
        assert_eq!(
            resolve_pair("openai", "gpt-4o"),
            Some(("OpenAI", "GPT-4o"))
        );
        assert_eq!(resolve_pair("Anthropic", "Opus 3"), Some(("Anthropic", "Opus 3")));
        assert_eq!(resolve_pair("OpenAI", "Opus 3"), None);
    }

    #[test]
    fn defaults_are_in_the_catalog() {
        assert!(resolve_pair(DEFAULT_PROVIDER, DEFAULT_MODEL).is_some());
    }
}
