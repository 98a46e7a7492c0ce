use tracing::{debug, trace};

use crate::fixture::Fixture;
use crate::participant::Participant;

/// A position in the working set: a real participant or the idle slot added
/// when the participant count is odd.
#[derive(Clone, Copy, Debug)]
enum Slot<'a> {
    Player(&'a Participant),
    Bye,
}

fn working_slots(participants: &[Participant]) -> Vec<Slot<'_>> {
    let mut slots: Vec<Slot> = participants.iter().map(Slot::Player).collect();
    if slots.len() % 2 == 1 {
        slots.push(Slot::Bye);
    }
    slots
}

/// Slot occupying `position` after the ring (every position but the first)
/// has been rotated right `rotation` times.
fn slot_at<'a>(slots: &[Slot<'a>], position: usize, rotation: usize) -> Slot<'a> {
    if position == 0 {
        return slots[0];
    }
    let ring = slots.len() - 1;
    let original = (position - 1 + ring - rotation % ring) % ring;
    slots[1 + original]
}

fn pairings_for_rotation<'a>(slots: &[Slot<'a>], rotation: usize) -> Vec<(&'a Participant, &'a Participant)> {
    let n = slots.len();
    (0..n / 2)
        .filter_map(|i| match (slot_at(slots, i, rotation), slot_at(slots, n - 1 - i, rotation)) {
            (Slot::Player(home), Slot::Player(away)) => Some((home, away)),
            _ => None,
        })
        .collect()
}

/// Number of rounds in one full cycle: `N - 1` for even `N`, `N` for odd `N`
/// (one extra round because each participant sits out once).
pub fn rounds_per_cycle(participant_count: usize) -> usize {
    match participant_count {
        0 | 1 => 0,
        n if n % 2 == 0 => n - 1,
        n => n,
    }
}

/// Home/away pairings of a single round, `rotation` being the 0-based round
/// index within its cycle. Pairings against the idle slot are dropped.
pub fn round_pairings(participants: &[Participant], rotation: usize) -> Vec<(&Participant, &Participant)> {
    if participants.len() < 2 {
        return Vec::new();
    }
    pairings_for_rotation(&working_slots(participants), rotation)
}

/// Generate a round-robin fixture list with the circle method.
///
/// The first participant stays fixed while the others rotate one step per
/// round; after a full cycle the rotation starts over from the input order,
/// so every cycle repeats the same pairing pattern. Generation stops after
/// `max_rounds` rounds even if that cuts a cycle short.
///
/// Returns an empty list for fewer than two participants or zero rounds.
/// The output only depends on the input order and `max_rounds`.
pub fn generate_schedule(participants: &[Participant], max_rounds: u32) -> Vec<Fixture> {
    if participants.len() < 2 || max_rounds == 0 {
        debug!(
            participants = participants.len(),
            max_rounds, "nothing to schedule"
        );
        return Vec::new();
    }

    let slots = working_slots(participants);
    let per_cycle = slots.len() - 1;

    let fixtures: Vec<Fixture> = (0..max_rounds as usize)
        .flat_map(|index| {
            let round = index as u32 + 1;
            let cycle = (index / per_cycle) as u32 + 1;
            let pairings = pairings_for_rotation(&slots, index % per_cycle);
            trace!(round, cycle, matches = pairings.len(), "scheduled round");
            pairings
                .into_iter()
                .map(move |(home, away)| Fixture::new(round, cycle, home, away))
        })
        .collect();

    debug!(
        participants = participants.len(),
        max_rounds,
        fixtures = fixtures.len(),
        "generated schedule"
    );
    fixtures
}
