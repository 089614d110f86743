//! Prompt construction for blurb generation

use crate::types::{BlurbRequest, Message, Role};

/// Build the conversation for a blurb request.
///
/// The model is told to answer with a bare JSON object so the reply can
/// be parsed without scraping prose.
pub fn build_blurb_prompt(request: &BlurbRequest) -> Vec<Message> {
    let system = format!(
        "Du bist ein Bibliothekar. Antworte ausschließlich mit einem JSON-Objekt \
         der Form {{\"blurb\": \"...\", \"keywords\": [\"...\"]}}. Der Klappentext ist \
         ein einzelner Absatz auf {} ohne Spoiler.",
        request.language
    );

    let mut user = format!(
        "Schreibe einen kurzen Klappentext zu \"{}\" von {}.",
        request.title, request.author
    );
    if let Some(genre) = &request.genre {
        user.push_str(&format!(" Genre: {}.", genre));
    }

    vec![
        Message {
            role: Role::System,
            content: system,
        },
        Message {
            role: Role::User,
            content: user,
        },
    ]
}
