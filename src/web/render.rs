//! HTML rendering for the chat page
//!
//! Everything user-supplied goes through `html_escape` before it reaches the
//! page. Messages are keyed by their position in the log (`msg-{index}`).

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::features::conversation::{Message, Role};
use crate::features::personas::{Persona, PersonaDefinition, DEFAULT_AVATAR};

/// Preset selector value meaning "use the custom fields"
pub const CUSTOM_PRESET: &str = "Custom";

const USER_AVATAR: &str = "🧑";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; height: 100vh; }
aside { width: 22rem; padding: 1rem; background: #f4f1ec; overflow-y: auto; }
aside label { display: block; margin-top: .6rem; font-size: .85rem; }
aside input, aside select, aside textarea { width: 100%; box-sizing: border-box; }
main { flex: 1; display: flex; flex-direction: column; }
#messages { flex: 1; overflow-y: auto; padding: 1rem; }
.msg { display: flex; gap: .6rem; margin: .5rem 0; }
.msg.user { flex-direction: row-reverse; }
.bubble { padding: .5rem .8rem; border-radius: .6rem; background: #eef; white-space: pre-wrap; max-width: 70%; }
.msg.user .bubble { background: #dfd; }
.notice { margin: .5rem 1rem; padding: .6rem; background: #fdd; border: 1px solid #c66; }
form.chat { display: flex; gap: .5rem; padding: 1rem; border-top: 1px solid #ddd; }
form.chat input { flex: 1; }
"#;

/// Everything the chat page shows
pub struct PageView<'a> {
    pub session_id: &'a str,
    pub messages: &'a [Message],
    pub persona: Option<&'a Persona>,
    pub presets: Vec<&'a str>,
    pub model: &'a str,
    pub notice: Option<String>,
}

pub fn chat_page(view: &PageView<'_>) -> String {
    let assistant_avatar = view.persona.map(|p| p.avatar.as_str()).unwrap_or(DEFAULT_AVATAR);
    let title = view.persona.map(Persona::display_name).unwrap_or("Perso9");

    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
         <title>{avatar} {title}</title><style>{STYLE}</style></head><body>",
        avatar = text(assistant_avatar),
        title = text(title),
    );

    html.push_str(&persona_form(view));

    html.push_str("<main>");
    let _ = write!(
        html,
        "<h1>{} {}</h1>",
        text(assistant_avatar),
        text(title)
    );

    if let Some(notice) = &view.notice {
        let _ = write!(html, "<div class=\"notice\" role=\"alert\">{}</div>", text(notice));
    }

    html.push_str("<div id=\"messages\">");
    for (index, message) in view.messages.iter().enumerate() {
        let (class, avatar) = match message.role() {
            Role::User => ("user", USER_AVATAR),
            Role::Assistant | Role::System => ("assistant", assistant_avatar),
        };
        let _ = write!(
            html,
            "<div class=\"msg {class}\" id=\"msg-{index}\"><span>{}</span>\
             <div class=\"bubble\">{}</div></div>",
            text(avatar),
            text(message.content())
        );
    }
    html.push_str("<div id=\"bottom\"></div></div>");

    let _ = write!(
        html,
        "<form class=\"chat\" method=\"post\" action=\"/session/{id}/messages\">\
         <input name=\"message\" placeholder=\"Send a message to {name}\" autofocus autocomplete=\"off\">\
         <button type=\"submit\">Send</button></form>\
         <form method=\"post\" action=\"/session/{id}/reset\" style=\"padding: 0 1rem 1rem\">\
         <button type=\"submit\">Clear chat history</button></form>",
        id = attr(view.session_id),
        name = attr(title),
    );
    let _ = write!(
        html,
        "<footer style=\"padding: 0 1rem 1rem; font-size: .75rem; color: #777\">Model: {}</footer>",
        text(view.model)
    );

    html.push_str(
        "</main><script>var m=document.getElementById('messages');m.scrollTop=m.scrollHeight;</script>\
         </body></html>",
    );
    html
}

/// Sidebar persona builder, pre-filled with the active persona
fn persona_form(view: &PageView<'_>) -> String {
    let empty = PersonaDefinition::default();
    let current = view.persona.map(|p| &p.definition).unwrap_or(&empty);
    let selected = view
        .persona
        .and_then(|p| p.preset.as_deref())
        .unwrap_or(CUSTOM_PRESET);

    let mut html = String::new();
    let _ = write!(
        html,
        "<aside><h2>Persona</h2><form method=\"post\" action=\"/session/{}/persona\">",
        attr(view.session_id)
    );

    html.push_str("<label>Preset<select name=\"preset\">");
    for option in std::iter::once(CUSTOM_PRESET).chain(view.presets.iter().copied()) {
        let _ = write!(
            html,
            "<option value=\"{value}\"{sel}>{label}</option>",
            value = attr(option),
            sel = if option == selected { " selected" } else { "" },
            label = text(option),
        );
    }
    html.push_str("</select></label>");

    let fields = [
        ("name", "Name", current.name.as_str()),
        ("personality", "Personality", current.personality.as_str()),
        ("topics", "Favorite topics", current.topics.as_str()),
        ("communication_style", "Communication style", current.communication_style.as_str()),
        ("language", "Preferred language", current.language.as_str()),
        ("avatar", "Avatar", current.avatar.as_deref().unwrap_or_default()),
    ];
    for (name, label, value) in fields {
        let _ = write!(
            html,
            "<label>{label}<input name=\"{name}\" value=\"{}\"></label>",
            attr(value)
        );
    }

    let _ = write!(
        html,
        "<label>Custom instructions<textarea name=\"custom_instructions\" rows=\"4\">{}</textarea></label>\
         <p><button type=\"submit\">Apply persona</button></p></form></aside>",
        text(current.custom_instructions.as_deref().unwrap_or_default())
    );
    html
}

pub fn not_found_page() -> String {
    "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Session not found</title></head>\
     <body><h1>Session not found</h1><p>This chat session has expired or never existed.</p>\
     <p><a href=\"/\">Start a new chat</a></p></body></html>"
        .to_string()
}
