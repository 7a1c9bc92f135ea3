use crate::core::library;

/// Print the case-brief library, filtered by the given term.
pub fn list_briefs(term: &str) {
    let briefs = library::filter(term);
    if briefs.is_empty() {
        println!("No case briefs matching '{term}'.");
        return;
    }

    for brief in briefs {
        println!("[{}] {}", brief.id, brief.name);
        println!("    {} · {}", brief.citation, brief.court);
        if !brief.sections.is_empty() {
            let headings: Vec<&str> = brief
                .sections
                .iter()
                .map(|s| s.heading.as_str())
                .collect();
            println!("    Sections: {}", headings.join(", "));
        }
    }
}
