use core::fmt;
use smallvec::SmallVec;

/// The reserved label of an edge whose contributing segments disagree.
pub const MIXED_LABEL: &str = "MIXED/UNKNOWN";

/// The semantic label attached to an output edge.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeLabel {
    /// None of the contributing segments carried a label.
    #[default]
    Unlabeled,
    /// The label agreed upon by the contributing segments.
    Tag(String),
    /// The contributing segments disagree on their label.
    Mixed,
}

impl EdgeLabel {
    /// The textual form of this label, `None` if unlabeled.
    ///
    /// [`EdgeLabel::Mixed`] is rendered as [`MIXED_LABEL`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EdgeLabel::Unlabeled => None,
            EdgeLabel::Tag(tag) => Some(tag),
            EdgeLabel::Mixed => Some(MIXED_LABEL),
        }
    }

    /// Is this the reserved mixed label?
    pub fn is_mixed(&self) -> bool {
        matches!(self, EdgeLabel::Mixed)
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str().unwrap_or(""))
    }
}

/// How the labels of the raw segments covering one atomic segment are reconciled.
///
/// Unlabeled contributions never cause a disagreement: they are ignored as soon as
/// one contribution carries a label.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Keep the label if every labeled contribution agrees, otherwise [`EdgeLabel::Mixed`].
    #[default]
    Unanimous,
    /// Keep the most frequent label. Ties resolve to [`EdgeLabel::Mixed`].
    Majority,
    /// Keep the first label of this list that contributes to the edge. Falls back to
    /// [`LabelPolicy::Unanimous`] if none of them does.
    Priority(Vec<String>),
}

/// The multiset of labels contributed to one atomic segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTally {
    counts: SmallVec<[(String, u32); 2]>,
    unlabeled: u32,
    mixed: u32,
}

impl LabelTally {
    /// A tally with a single contribution.
    pub fn from_label(label: Option<&str>) -> Self {
        let mut result = Self::default();
        result.add(label);
        result
    }

    /// A tally seeded from an already reconciled edge label.
    ///
    /// A [`EdgeLabel::Mixed`] seed makes every later resolution mixed as well.
    pub fn from_edge_label(label: &EdgeLabel) -> Self {
        match label {
            EdgeLabel::Unlabeled => Self::from_label(None),
            EdgeLabel::Tag(tag) => Self::from_label(Some(tag)),
            EdgeLabel::Mixed => LabelTally {
                mixed: 1,
                ..Default::default()
            },
        }
    }

    /// Records one more contribution.
    pub fn add(&mut self, label: Option<&str>) {
        match label {
            None => self.unlabeled += 1,
            Some(label) => match self.counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, count)) => *count += 1,
                None => self.counts.push((label.to_owned(), 1)),
            },
        }
    }

    /// Adds all the contributions of `other` to `self`.
    pub fn merge(&mut self, other: &LabelTally) {
        for (label, count) in &other.counts {
            match self.counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, c)) => *c += *count,
                None => self.counts.push((label.clone(), *count)),
            }
        }

        self.unlabeled += other.unlabeled;
        self.mixed += other.mixed;
    }

    /// The total number of contributions.
    pub fn contributions(&self) -> u32 {
        self.counts.iter().map(|(_, c)| *c).sum::<u32>() + self.unlabeled + self.mixed
    }

    /// Reconciles the contributions into a single edge label.
    pub fn resolve(&self, policy: &LabelPolicy) -> EdgeLabel {
        if self.mixed > 0 {
            return EdgeLabel::Mixed;
        }

        match policy {
            LabelPolicy::Unanimous => self.resolve_unanimous(),
            LabelPolicy::Majority => {
                let Some(best) = self.counts.iter().map(|(_, c)| *c).max() else {
                    return EdgeLabel::Unlabeled;
                };
                let mut winners = self.counts.iter().filter(|(_, c)| *c == best);

                match (winners.next(), winners.next()) {
                    (Some((label, _)), None) => EdgeLabel::Tag(label.clone()),
                    _ => EdgeLabel::Mixed,
                }
            }
            LabelPolicy::Priority(priorities) => priorities
                .iter()
                .find(|p| self.counts.iter().any(|(l, _)| l == *p))
                .map(|p| EdgeLabel::Tag(p.clone()))
                .unwrap_or_else(|| self.resolve_unanimous()),
        }
    }

    fn resolve_unanimous(&self) -> EdgeLabel {
        match self.counts.as_slice() {
            [] => EdgeLabel::Unlabeled,
            [(label, _)] => EdgeLabel::Tag(label.clone()),
            _ => EdgeLabel::Mixed,
        }
    }
}
