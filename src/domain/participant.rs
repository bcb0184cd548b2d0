use std::borrow::Borrow;

use indexmap::IndexSet;
use serde::Serialize;

/// A named party in the group. Names are compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Participant {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl core::fmt::Display for Participant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Participants in the order they joined.
///
/// Iteration order is insertion order and is what the settlement engine walks
/// when it matches debtors against creditors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantSet {
    members: IndexSet<Participant>,
}

impl ParticipantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the participant was already present.
    pub fn insert(&mut self, participant: Participant) -> bool {
        self.members.insert(participant)
    }

    pub fn remove(&mut self, name: &str) -> Option<Participant> {
        self.members.shift_take(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&Participant> {
        self.members.get(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.members.iter()
    }
}

impl FromIterator<Participant> for ParticipantSet {
    fn from_iter<T: IntoIterator<Item = Participant>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for ParticipantSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        iter.into_iter().map(Participant::from).collect()
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a Participant;
    type IntoIter = indexmap::set::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
