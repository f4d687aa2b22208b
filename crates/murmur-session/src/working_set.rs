// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bounded list of turns sent with each request.

use std::collections::VecDeque;

use murmur_core::{Role, Turn};

/// One system turn followed by at most `capacity` user/assistant turns,
/// oldest first. Appending past capacity evicts the single oldest
/// non-system turn regardless of role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSet {
    system: Turn,
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl WorkingSet {
    /// An empty working set holding only `system`.
    pub fn new(system: Turn, capacity: usize) -> Self {
        Self {
            system,
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// A working set seeded from `history` (oldest first). System turns in
    /// `history` are skipped; only the newest `capacity` turns survive.
    pub fn seeded(system: Turn, capacity: usize, history: impl IntoIterator<Item = Turn>) -> Self {
        let mut set = Self::new(system, capacity);
        for turn in history.into_iter().filter(|t| t.role != Role::System) {
            set.push(turn);
        }
        set
    }

    /// Append a turn, returning the evicted one if the window was full.
    pub fn push(&mut self, turn: Turn) -> Option<Turn> {
        if self.capacity == 0 {
            return Some(turn);
        }
        let evicted = if self.turns.len() >= self.capacity {
            self.turns.pop_front()
        } else {
            None
        };
        self.turns.push_back(turn);
        evicted
    }

    /// Drop every non-system turn and install a new system turn and capacity.
    pub fn reset(&mut self, system: Turn, capacity: usize) {
        self.system = system;
        self.capacity = capacity;
        self.turns.clear();
    }

    pub fn system(&self) -> &Turn {
        &self.system
    }

    /// Non-system turns, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn history_len(&self) -> usize {
        self.turns.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The full request payload: system turn first.
    pub fn to_vec(&self) -> Vec<Turn> {
        std::iter::once(&self.system)
            .chain(self.turns.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::Personality;
    use proptest::prelude::*;

    fn user(text: &str) -> Turn {
        Turn::new(Role::User, text)
    }

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut set = WorkingSet::new(Turn::system(Personality::Professional), 2);
        assert!(set.push(user("a")).is_none());
        assert!(set.push(Turn::new(Role::Assistant, "b")).is_none());
        let evicted = set.push(user("c")).unwrap();
        assert_eq!(evicted.content, "a");
        let contents: Vec<_> = set.history().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["b", "c"]);
    }

    #[test]
    fn to_vec_puts_system_first() {
        let mut set = WorkingSet::new(Turn::system(Personality::Technical), 3);
        set.push(user("hello"));
        let turns = set.to_vec();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[0].content, Personality::Technical.system_prompt());
        assert_eq!(turns[1].content, "hello");
    }

    #[test]
    fn seeded_keeps_newest_and_skips_system_turns() {
        let history = vec![
            user("1"),
            Turn::system(Personality::Friendly),
            user("2"),
            user("3"),
            user("4"),
        ];
        let set = WorkingSet::seeded(Turn::system(Personality::Creative), 2, history);
        let contents: Vec<_> = set.history().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["3", "4"]);
        assert_eq!(set.system().content, Personality::Creative.system_prompt());
    }

    #[test]
    fn reset_clears_history() {
        let mut set = WorkingSet::new(Turn::system(Personality::Professional), 5);
        set.push(user("a"));
        set.reset(Turn::system(Personality::Friendly), 3);
        assert_eq!(set.history_len(), 0);
        assert_eq!(set.capacity(), 3);
        assert_eq!(set.system().content, Personality::Friendly.system_prompt());
    }

    proptest! {
        #[test]
        fn window_holds_exactly_the_newest_turns(
            capacity in 1usize..12,
            texts in proptest::collection::vec("[a-z]{1,8}", 0..40),
        ) {
            let mut set = WorkingSet::new(Turn::system(Personality::Professional), capacity);
            for (i, text) in texts.iter().enumerate() {
                let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
                set.push(Turn::new(role, text.clone()));
                prop_assert!(set.to_vec().len() <= capacity + 1);
            }
            let expected: Vec<&str> = texts
                .iter()
                .skip(texts.len().saturating_sub(capacity))
                .map(String::as_str)
                .collect();
            let actual: Vec<&str> = set.history().map(|t| t.content.as_str()).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
