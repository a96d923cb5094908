use reconcile_core::encoding::SourceTag;
use reconcile_core::model::EntityId;

/// Tie-break rank of a contributor: smallest source tag, then smallest id.
pub(crate) type Rank = (Option<SourceTag>, EntityId);

struct Entry<T> {
    value: T,
    votes: usize,
    rank: Rank,
}

/// Frequency tally of observed values.
pub(crate) struct Ballot<T> {
    entries: Vec<Entry<T>>,
}

impl<T: PartialEq> Ballot<T> {
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub(crate) fn add(&mut self, value: T, votes: usize, rank: Rank) {
        match self.entries.iter_mut().find(|e| e.value == value) {
            Some(entry) => {
                entry.votes += votes;
                entry.rank = entry.rank.min(rank);
            }
            None => self.entries.push(Entry { value, votes, rank }),
        }
    }

    pub(crate) fn add_opt(&mut self, value: Option<T>, votes: usize, rank: Rank) {
        if let Some(value) = value {
            self.add(value, votes, rank);
        }
    }

    /// The most frequent value; ties go to the best-ranked contributor.
    pub(crate) fn winner(self) -> Option<T> {
        self.winner_by(|_| ())
    }

    /// The most frequent value; ties go to the larger `preference`, then to the
    /// best-ranked contributor.
    pub(crate) fn winner_by<K: Ord>(self, preference: impl Fn(&T) -> K) -> Option<T> {
        self.entries
            .into_iter()
            .max_by(|a, b| {
                a.votes
                    .cmp(&b.votes)
                    .then_with(|| preference(&a.value).cmp(&preference(&b.value)))
                    .then_with(|| b.rank.cmp(&a.rank))
            })
            .map(|entry| entry.value)
    }
}
