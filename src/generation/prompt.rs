//! Prompt assembly.

use crate::types::ConversationMessage;

/// Persona prompt used as the default `System Message`.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a professional and concise customer support assistant for an online service.\n\n\
Your primary goals are:\n\
1. Provide clear, direct, and helpful answers.\n\
2. Avoid unnecessary details or filler phrases.\n\
3. Use simple language, even for technical topics.\n\
4. Give examples when it helps clarify the solution.\n\
5. Never make up information. Say 'I don't know' if unsure.\n\n\
Examples:\n\
User: How can I reset my password?\n\
Assistant: Click on 'Forgot password' at login and follow the instructions.\n\n\
User: I want to cancel my subscription.\n\
Assistant: Go to 'Account Settings' \u{2192} 'Billing' \u{2192} click 'Cancel Subscription'.\n\n\
If the user is frustrated, stay calm and offer solutions politely.\n\
Always stay on topic and respond in a maximum of 2 to 3 short sentences.";

/// Build the outgoing message list.
///
/// The system prompt comes first, then every conversation turn in order,
/// then a user turn carrying the query and the retrieved context.
pub fn prepare_messages(
    query: &str,
    context: &str,
    conversation: &[ConversationMessage],
    system_message: &str,
) -> Vec<ConversationMessage> {
    let mut messages = Vec::with_capacity(conversation.len() + 2);
    messages.push(ConversationMessage::system(system_message));
    messages.extend(conversation.iter().cloned());
    messages.push(ConversationMessage::user(query_prompt(query, context)));
    messages
}

/// Text of the synthesized final user turn.
pub fn query_prompt(query: &str, context: &str) -> String {
    format!("Answer this query: '{query}' with this provided context: {context}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use pretty_assertions::assert_eq;

    fn history() -> Vec<ConversationMessage> {
        vec![
            ConversationMessage::user("What is Verba?"),
            ConversationMessage::assistant("A RAG app."),
            ConversationMessage::user("Who builds it?"),
        ]
    }

    #[test]
    fn wraps_history_between_system_and_query() {
        let messages = prepare_messages("How do I install it?", "pip install", &history(), "SYS");

        assert_eq!(messages.len(), history().len() + 2);
        assert_eq!(messages[0], ConversationMessage::system("SYS"));
        assert_eq!(&messages[1..4], history().as_slice());
        assert_eq!(
            messages[4],
            ConversationMessage::user(
                "Answer this query: 'How do I install it?' with this provided context: pip install"
            )
        );
    }

    #[test]
    fn empty_conversation_yields_two_messages() {
        let messages = prepare_messages("q", "c", &[], "SYS");
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User]);
    }

    #[test]
    fn history_roles_pass_through_verbatim() {
        let conversation = vec![ConversationMessage::system("earlier system note")];
        let messages = prepare_messages("q", "c", &conversation, "SYS");
        assert_eq!(messages[1], ConversationMessage::system("earlier system note"));
    }

    #[test]
    fn is_deterministic() {
        let a = prepare_messages("q", "ctx", &history(), "SYS");
        let b = prepare_messages("q", "ctx", &history(), "SYS");
        assert_eq!(a, b);
    }

    #[test]
    fn default_persona_limits_answer_length() {
        assert!(DEFAULT_SYSTEM_MESSAGE.starts_with("You are a professional and concise"));
        assert!(DEFAULT_SYSTEM_MESSAGE.ends_with("2 to 3 short sentences."));
    }
}
