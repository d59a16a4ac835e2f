//! Rewriting rule storage.
//!
//! Rules are kept in a fixed table with one slot per ASCII code, so looking up
//! the successor for a symbol during rewriting is a single index. Triggers
//! are printable ASCII and successors never hold control characters, so every
//! rule can be written to a parameter file line and read back.

use crate::error::LSystemError;

/// Code points below 32. They are dropped from every stored string.
fn is_control_symbol(symbol: char) -> bool {
    (symbol as u32) < 32
}

pub(crate) fn strip_control_symbols(text: String) -> String {
    if text.chars().any(is_control_symbol) {
        text.chars().filter(|c| !is_control_symbol(*c)).collect()
    } else {
        text
    }
}

/// Number of slots in a [`RuleTable`], one per ASCII code.
pub const RULE_SLOTS: usize = 128;

/// Maps a trigger character to its successor string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    slots: Vec<Option<String>>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            slots: vec![None; RULE_SLOTS],
        }
    }
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `successor` for `trigger`, replacing any previous rule.
    ///
    /// Triggers must be printable ASCII (`!` through `~`). Control characters
    /// in `successor` are stripped.
    pub fn insert(
        &mut self,
        trigger: char,
        successor: impl Into<String>,
    ) -> Result<(), LSystemError> {
        let slot = Self::slot_index(trigger)
            .filter(|_| trigger.is_ascii_graphic())
            .ok_or(LSystemError::InvalidTrigger(trigger))?;
        self.slots[slot] = Some(strip_control_symbols(successor.into()));
        Ok(())
    }

    /// Removes the rule for `trigger`, returning its successor if there was one.
    pub fn remove(&mut self, trigger: char) -> Option<String> {
        Self::slot_index(trigger).and_then(|slot| self.slots[slot].take())
    }

    pub fn get(&self, trigger: char) -> Option<&str> {
        Self::slot_index(trigger).and_then(|slot| self.slots[slot].as_deref())
    }

    pub fn contains(&self, trigger: char) -> bool {
        self.get(trigger).is_some()
    }

    /// Iterates over `(trigger, successor)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(code, slot)| slot.as_deref().map(|s| (code as u8 as char, s)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    fn slot_index(trigger: char) -> Option<usize> {
        let code = trigger as usize;
        (code < RULE_SLOTS).then_some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_table_order() {
        let mut rules = RuleTable::new();
        rules.insert('X', "F[+X]").unwrap();
        rules.insert('F', "FF").unwrap();

        let collected: Vec<_> = rules.iter().collect();
        assert_eq!(collected, vec![('F', "FF"), ('X', "F[+X]")]);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn non_ascii_trigger_is_rejected() {
        let mut rules = RuleTable::new();
        assert!(matches!(
            rules.insert('é', "F"),
            Err(LSystemError::InvalidTrigger('é'))
        ));
        assert!(rules.is_empty());
    }

    #[test]
    fn blank_and_control_triggers_are_rejected() {
        let mut rules = RuleTable::new();
        for trigger in [' ', '\u{7f}', '\n', '\u{1}'] {
            assert!(matches!(
                rules.insert(trigger, "F"),
                Err(LSystemError::InvalidTrigger(t)) if t == trigger
            ));
        }
        assert!(rules.is_empty());
    }

    #[test]
    fn successor_control_characters_are_stripped() {
        let mut rules = RuleTable::new();
        rules.insert('F', "F\nF\tF").unwrap();
        assert_eq!(rules.get('F'), Some("FFF"));
    }

    #[test]
    fn remove_clears_slot() {
        let mut rules = RuleTable::new();
        rules.insert('A', "B").unwrap();
        assert_eq!(rules.remove('A').as_deref(), Some("B"));
        assert!(!rules.contains('A'));
        assert_eq!(rules.remove('A'), None);
    }
}
