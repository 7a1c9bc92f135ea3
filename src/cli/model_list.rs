use crate::core::config::Config;
use crate::core::providers;

/// List models for one provider, or for every provider when none is given.
pub fn list_models(provider: Option<&str>) {
    let config = Config::load().unwrap_or_default();

    let listed: Vec<_> = match provider {
        Some(name) => match providers::find_provider(name) {
            Some(p) => vec![p],
            None => {
                eprintln!("❌ Unknown provider: {name}");
                eprintln!("Run 'osgood -p' to list providers.");
                return;
            }
        },
        None => providers::all_providers().iter().collect(),
    };

    for provider in listed {
        let default_model = config.get_default_model(provider.name);
        println!("{}:", provider.name);
        for model in provider.models {
            let marker = if default_model.is_some_and(|d| d.eq_ignore_ascii_case(model)) {
                "  (default)"
            } else {
                ""
            };
            println!("  {model}{marker}");
        }
        println!();
    }
}
