#[cfg(test)]
use crate::core::app::{App, AppInit};
#[cfg(test)]
use crate::core::config::Config;
#[cfg(test)]
use crate::core::message::{Message, Role};
#[cfg(test)]
use crate::core::responder::ResponderService;

#[cfg(test)]
pub fn create_test_app() -> App {
    let (responder, _rx) = ResponderService::new();
    App::new(Config::default(), responder, AppInit::default()).expect("test app")
}

#[cfg(test)]
pub fn create_test_message(role: Role, content: &str) -> Message {
    Message::new(role, content)
}

#[cfg(test)]
pub fn create_test_messages() -> Vec<Message> {
    vec![
        create_test_message(Role::User, "What is adverse possession?"),
        create_test_message(Role::Ai, "This is a simulated AI response for GPT-4o."),
        create_test_message(Role::User, "Summarize the elements."),
        create_test_message(Role::Ai, "This is a simulated AI response for GPT-4o."),
    ]
}
