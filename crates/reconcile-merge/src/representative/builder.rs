use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use reconcile_core::encoding::{SourceSet, SourceTag, TypeSet};
use reconcile_core::errors::{PreconditionError, ReconcileResult};
use reconcile_core::model::{
    Attributes, ClusterEntity, Domain, EntityRecord, GeoAttributes, GeoPoint,
    MusicAttributes,
};
use reconcile_core::traits::Clustered;
use reconcile_observability::representative_span;
use tracing::debug;

use super::ballot::{Ballot, Rank};

/// How the geo point of a combined cluster is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PointRule {
    /// Mode of the observed points.
    Vote,
    /// Mean of the observed points.
    Average,
}

/// Grouping key of a record: its component id, or its own id when it has none.
pub fn component_key(record: &EntityRecord) -> u64 {
    record.component.unwrap_or(record.id)
}

/// Reduce a group of entities sharing a grouping key into one cluster.
///
/// Members are expected to have disjoint sources; [`build_representatives`]
/// guarantees this for record groups. Scalar properties take the most frequent value, each member voting with its
/// member count. Label ties prefer the longer string; other ties go to the value
/// of the member with the smallest source tag, then the smallest id. Source and
/// type sets and member ids are unioned. The cluster takes the smallest member id.
pub fn build_representative<C: Clustered>(
    group_key: u64,
    members: &[C],
) -> Result<ClusterEntity, PreconditionError> {
    combine(&group_key.to_string(), members, PointRule::Vote)
}

/// Group `records` by `key_fn` and build one representative per group, in parallel.
///
/// A group keeps one record per source, the one with the smallest id. Every
/// other record of a repeated source becomes a singleton representative with
/// the same origin component. The output is sorted by cluster id.
pub fn build_representatives<F>(
    records: &[EntityRecord],
    key_fn: F,
) -> ReconcileResult<Vec<ClusterEntity>>
where
    F: Fn(&EntityRecord) -> u64 + Sync,
{
    let mut groups: BTreeMap<u64, Vec<&EntityRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(key_fn(record)).or_default().push(record);
    }
    let span = representative_span!(groups.len());
    let _guard = span.enter();

    let mut clusters: Vec<ClusterEntity> = groups
        .into_par_iter()
        .map(|(key, members)| {
            let (kept, displaced) = one_per_source(members);
            let mut built = Vec::with_capacity(1 + displaced.len());
            built.push(build_representative(key, &kept)?);
            for record in displaced {
                built.push(build_representative(key, &[record])?);
            }
            Ok::<_, PreconditionError>(built)
        })
        .collect::<Result<Vec<_>, PreconditionError>>()?
        .into_iter()
        .flatten()
        .collect();
    clusters.sort_by_key(|c| c.id);

    debug!(records = records.len(), clusters = clusters.len(), "representatives built");
    Ok(clusters)
}

/// Split a record group into one record per source (smallest id wins) and the
/// displaced rest.
fn one_per_source(members: Vec<&EntityRecord>) -> (Vec<&EntityRecord>, Vec<&EntityRecord>) {
    let mut kept: BTreeMap<SourceTag, &EntityRecord> = BTreeMap::new();
    let mut displaced = Vec::new();
    for record in members {
        match kept.entry(record.source) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) if record.id < slot.get().id => {
                displaced.push(slot.insert(record));
            }
            Entry::Occupied(_) => displaced.push(record),
        }
    }
    displaced.sort_by_key(|r| r.id);
    (kept.into_values().collect(), displaced)
}

pub(crate) fn combine<C: Clustered>(
    key: &str,
    members: &[C],
    points: PointRule,
) -> Result<ClusterEntity, PreconditionError> {
    let (first, rest) = members.split_first().ok_or_else(|| PreconditionError::EmptyGroup {
        key: key.to_string(),
    })?;
    let domain = first.attributes().domain();
    if let Some(other) = rest.iter().find(|m| m.attributes().domain() != domain) {
        return Err(PreconditionError::MixedDomains {
            reason: format!(
                "entity {} is {:?}, entity {} is {:?}",
                first.id(),
                domain,
                other.id(),
                other.attributes().domain()
            ),
        });
    }

    let mut labels = Ballot::new();
    let mut sources = SourceSet::empty();
    let mut ids = BTreeSet::new();
    let mut ballots = Vec::with_capacity(members.len());
    for member in members {
        let member_ids = member.members();
        let votes = member_ids.len().max(1);
        let rank: Rank = (member.sources().first(), member.id());
        labels.add(member.label().to_string(), votes, rank);
        sources = sources.union(member.sources());
        ids.extend(member_ids);
        ballots.push((member.attributes(), votes, rank));
    }

    let attributes = match domain {
        Domain::Geography => Attributes::Geography(combine_geo(&ballots, points)),
        Domain::Music => Attributes::Music(combine_music(&ballots)),
    };

    Ok(ClusterEntity {
        id: members.iter().map(Clustered::id).min().unwrap_or(first.id()),
        label: labels.winner_by(|l| l.chars().count()).unwrap_or_default(),
        attributes,
        sources,
        members: ids,
        blocking_key: String::new(),
        active: true,
        origin_component: members.iter().filter_map(Clustered::component).min(),
    })
}

fn combine_geo(ballots: &[(&Attributes, usize, Rank)], points: PointRule) -> GeoAttributes {
    let mut types = TypeSet::empty();
    let mut point_ballot = Ballot::new();
    let mut observed = Vec::new();
    for (attributes, votes, rank) in ballots {
        types = types.union(attributes.types());
        if let Some(point) = attributes.point() {
            point_ballot.add(point, *votes, *rank);
            observed.push(point);
        }
    }

    let point = match points {
        PointRule::Vote => point_ballot.winner(),
        PointRule::Average => average(&observed),
    };
    GeoAttributes { point, types }
}

fn average(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lon = points.iter().map(|p| p.lon).sum::<f64>() / n;
    Some(GeoPoint::new(lat, lon))
}

fn combine_music(ballots: &[(&Attributes, usize, Rank)]) -> MusicAttributes {
    let mut artist = Ballot::new();
    let mut album = Ballot::new();
    let mut year = Ballot::new();
    let mut length = Ballot::new();
    let mut language = Ballot::new();
    let mut number = Ballot::new();

    for (attributes, votes, rank) in ballots {
        let Some(music) = attributes.as_music() else {
            continue;
        };
        artist.add_opt(music.artist.clone(), *votes, *rank);
        album.add_opt(music.album.clone(), *votes, *rank);
        year.add_opt(music.year, *votes, *rank);
        length.add_opt(music.length_ms, *votes, *rank);
        language.add_opt(music.language.clone(), *votes, *rank);
        number.add_opt(music.number.clone(), *votes, *rank);
    }

    MusicAttributes {
        artist: artist.winner(),
        album: album.winner(),
        year: year.winner(),
        length_ms: length.winner(),
        language: language.winner(),
        number: number.winner(),
    }
}
