use crate::error::{Error, Result};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The options a roulette offers: either leaf labels or named sub-levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSet {
    Flat(Vec<Label>),
    Category(Vec<(Label, OptionSet)>),
}

/// Where a settled selection leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent<'a> {
    Level(&'a OptionSet),
    Leaf(&'a Label),
}

/// Maps any real index onto `[0, count)`. Negative and NaN inputs land on 0.
pub fn normalize(index: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    // NaN.max(0.0) is 0.0; huge values saturate in the cast
    (index.floor().max(0.0) as usize) % count
}

impl OptionSet {
    pub fn flat<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        Self::Flat(labels.into_iter().map(Into::into).collect())
    }

    pub fn category<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, OptionSet)>,
        S: Into<Label>,
    {
        Self::Category(entries.into_iter().map(|(l, o)| (l.into(), o)).collect())
    }

    pub fn labels(&self) -> Vec<&Label> {
        match self {
            Self::Flat(labels) => labels.iter().collect(),
            Self::Category(entries) => entries.iter().map(|(label, _)| label).collect(),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Flat(labels) => labels.len(),
            Self::Category(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Flat(_))
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Flat(_) => 1,
            Self::Category(entries) => {
                1 + entries
                    .iter()
                    .map(|(_, sub)| sub.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    pub fn label_at(&self, index: f64) -> Result<&Label> {
        let count = self.count();
        if count == 0 {
            return Err(Error::EmptyLevel { path: Vec::new() });
        }
        let i = normalize(index, count);
        Ok(match self {
            Self::Flat(labels) => &labels[i],
            Self::Category(entries) => &entries[i].0,
        })
    }

    /// Leaf levels yield the chosen label instead of a sub-level.
    pub fn descend(&self, index: f64) -> Result<Descent<'_>> {
        let count = self.count();
        if count == 0 {
            return Err(Error::EmptyLevel { path: Vec::new() });
        }
        let i = normalize(index, count);
        Ok(match self {
            Self::Flat(labels) => Descent::Leaf(&labels[i]),
            Self::Category(entries) => Descent::Level(&entries[i].1),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_at(&mut Vec::new())
    }

    fn validate_at(&self, path: &mut Vec<Label>) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyLevel { path: path.clone() });
        }
        if self.labels().iter().any(|l| l.trim().is_empty()) {
            return Err(Error::BlankLabel { path: path.clone() });
        }
        if let Self::Category(entries) = self {
            for (label, sub) in entries {
                path.push(label.clone());
                sub.validate_at(path)?;
                path.pop();
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Leaf(Label),
    Branch { label: Label, options: OptionSet },
}

struct OptionSetVisitor;

impl<'de> Visitor<'de> for OptionSetVisitor {
    type Value = OptionSet;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of labels, a list of {label, options} tables, or a map of categories")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<OptionSet, A::Error> {
        let mut leaves = Vec::new();
        let mut branches = Vec::new();
        while let Some(entry) = seq.next_element::<Entry>()? {
            match entry {
                Entry::Leaf(label) => leaves.push(label),
                Entry::Branch { label, options } => branches.push((label, options)),
            }
        }
        match (leaves.is_empty(), branches.is_empty()) {
            (_, true) => Ok(OptionSet::Flat(leaves)),
            (true, false) => Ok(OptionSet::Category(branches)),
            (false, false) => Err(de::Error::custom(
                "a level cannot mix plain labels and categories",
            )),
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<OptionSet, A::Error> {
        let mut entries = Vec::new();
        while let Some((label, sub)) = map.next_entry::<Label, OptionSet>()? {
            entries.push((label, sub));
        }
        Ok(OptionSet::Category(entries))
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(OptionSetVisitor)
    }
}
