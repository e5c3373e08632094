//! Append-only conversation log seeded with a greeting

use super::message::{Message, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// Only the seeded greeting is present
    Seeded,
    /// At least one message was appended since the last reset
    Active,
}

/// Ordered log of messages, oldest first.
///
/// Never empty: construction and [`Conversation::reset`] both leave exactly
/// the assistant greeting in place.
#[derive(Debug, Clone)]
pub struct Conversation {
    greeting: String,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        let messages = vec![Message::assistant(greeting.clone())];
        Self { greeting, messages }
    }

    /// Discard every message and reseed the greeting
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(Message::assistant(self.greeting.clone()));
    }

    pub fn append(&mut self, role: Role, content: impl Into<String>) -> &Message {
        self.messages.push(Message::new(role, content));
        // just pushed
        &self.messages[self.messages.len() - 1]
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn state(&self) -> ConversationState {
        if self.messages.len() == 1 {
            ConversationState::Seeded
        } else {
            ConversationState::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GREETING: &str = "Hello I'm Perso9!";

    #[test]
    fn test_new_is_seeded() {
        let conversation = Conversation::new(GREETING);
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.state(), ConversationState::Seeded);
        assert_eq!(conversation.all()[0], Message::assistant(GREETING));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut conversation = Conversation::new(GREETING);
        let inputs = [
            (Role::User, "one"),
            (Role::Assistant, "two"),
            (Role::User, "three"),
            (Role::User, "three"),
            (Role::System, "four"),
        ];
        for (role, content) in inputs {
            conversation.append(role, content);
        }

        let log = conversation.all();
        assert_eq!(log.len(), inputs.len() + 1);
        assert_eq!(log[0].content(), GREETING);
        for (msg, (role, content)) in log[1..].iter().zip(inputs) {
            assert_eq!(msg.role(), role);
            assert_eq!(msg.content(), content);
        }
        assert_eq!(conversation.state(), ConversationState::Active);
    }

    #[test]
    fn test_append_does_not_touch_earlier_entries() {
        let mut conversation = Conversation::new(GREETING);
        conversation.append(Role::User, "first");
        let snapshot: Vec<Message> = conversation.all().to_vec();

        conversation.append(Role::Assistant, "second");
        assert_eq!(&conversation.all()[..snapshot.len()], snapshot.as_slice());
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut conversation = Conversation::new(GREETING);
        conversation.reset();
        assert_eq!(conversation.all(), &[Message::assistant(GREETING)]);

        for i in 0..10 {
            conversation.append(Role::User, format!("msg {i}"));
        }
        conversation.reset();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.all()[0].role(), Role::Assistant);
        assert_eq!(conversation.all()[0].content(), GREETING);
        assert_eq!(conversation.state(), ConversationState::Seeded);
    }

    #[test]
    fn test_append_returns_new_message() {
        let mut conversation = Conversation::new(GREETING);
        let msg = conversation.append(Role::User, "Hello");
        assert_eq!(msg, &Message::user("Hello"));
    }

    fn arb_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::User), Just(Role::Assistant), Just(Role::System)]
    }

    proptest! {
        #[test]
        fn test_append_keeps_call_order(
            entries in prop::collection::vec((arb_role(), ".*"), 0..50)
        ) {
            let mut conversation = Conversation::new(GREETING);
            for (role, content) in &entries {
                conversation.append(*role, content.clone());
            }

            let log = conversation.all();
            prop_assert_eq!(log.len(), entries.len() + 1);
            prop_assert_eq!(&log[0], &Message::assistant(GREETING));
            for (msg, (role, content)) in log[1..].iter().zip(&entries) {
                prop_assert_eq!(msg.role(), *role);
                prop_assert_eq!(msg.content(), content.as_str());
            }
        }
    }
}
