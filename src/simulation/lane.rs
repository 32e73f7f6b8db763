//! Lane lookup and longitudinal span geometry
//!
//! Lateral separation between lanes is discrete, so every collision question
//! reduces to 1-D overlap of `[y, y + length]` spans within a single lane.

use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

use super::parameters::LaneBounds;
use super::types::{Lane, LaneId};

/// Resolve a lateral position to the first lane whose `[x_start, x_end)` contains it
pub fn lane_of(lanes: &[LaneBounds], x_position: f32) -> Lane {
    lanes
        .iter()
        .find(|lane| lane.contains(x_position))
        .map(|lane| Lane::On(lane.id))
        .unwrap_or(Lane::OutOfTrack)
}

/// How two longitudinal spans meet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Both spans start at the same y
    SamePosition,
    /// Zero gap: one front edge sits exactly on the other's rear edge
    Touching,
    /// An edge of one span lies strictly inside the other
    Overlapping,
}

/// Classify the contact between `[y1, y1 + len1]` and `[y2, y2 + len2]`
///
/// Conditions are checked in order; the first match wins.
pub fn contact(y1: f32, len1: f32, y2: f32, len2: f32) -> Option<Contact> {
    let (front1, front2) = (y1 + len1, y2 + len2);

    if y1 == y2 {
        return Some(Contact::SamePosition);
    }

    if front1 == y2 || front2 == y1 {
        return Some(Contact::Touching);
    }

    let strictly_inside = |edge: f32, start: f32, end: f32| edge > start && edge < end;
    if strictly_inside(y2, y1, front1)
        || strictly_inside(front2, y1, front1)
        || strictly_inside(y1, y2, front2)
        || strictly_inside(front1, y2, front2)
    {
        return Some(Contact::Overlapping);
    }

    None
}

/// Group entities by lane, each lane ordered by y-position
///
/// Entities out of track are dropped. Entities sharing a y-position in the
/// same lane are all kept.
pub fn group_by_lane<'a, T, I>(
    lanes: &[LaneBounds],
    entities: I,
    position: impl Fn(&T) -> (f32, f32),
) -> BTreeMap<LaneId, BTreeMap<OrderedFloat<f32>, Vec<&'a T>>>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut grouped: BTreeMap<LaneId, BTreeMap<OrderedFloat<f32>, Vec<&'a T>>> = BTreeMap::new();

    for entity in entities {
        let (x_position, y_position) = position(entity);
        if let Lane::On(lane_id) = lane_of(lanes, x_position) {
            grouped
                .entry(lane_id)
                .or_default()
                .entry(OrderedFloat(y_position))
                .or_default()
                .push(entity);
        }
    }

    grouped
}
