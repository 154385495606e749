//! The generated request log.

use shoptrace_types::{Action, ActionKind, UserId};

/// Globally ordered, append-only sequence of actions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestLog {
    actions: Vec<Action>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// Action kinds in log order.
    pub fn kinds(&self) -> Vec<ActionKind> {
        self.actions.iter().map(Action::kind).collect()
    }

    /// The subsequence of actions owned by `user`.
    pub fn for_user(&self, user: UserId) -> impl Iterator<Item = &Action> + '_ {
        self.actions
            .iter()
            .filter(move |action| action.user_id() == Some(user))
    }
}

impl<'a> IntoIterator for &'a RequestLog {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
