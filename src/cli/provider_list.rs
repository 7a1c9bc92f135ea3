use crate::core::config::Config;
use crate::core::providers;

pub fn list_providers() {
    let default_provider = Config::load()
        .ok()
        .and_then(|config| config.default_provider);

    println!("Available providers:");
    println!();
    for provider in providers::all_providers() {
        let marker = if default_provider
            .as_ref()
            .is_some_and(|d| d.eq_ignore_ascii_case(provider.name))
        {
            "*"
        } else {
            ""
        };
        println!(
            "  {}{}  ({} models)",
            provider.name,
            marker,
            provider.models.len()
        );
    }
    if default_provider.is_some() {
        println!();
        println!("* = default provider");
    }
}
