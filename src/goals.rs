use crate::constants::{VIRTUAL_GOALS_OFFSET, VIRTUAL_GOALS_STEP, VIRTUAL_GOALS_THRESHOLD};

/// Convert accumulated prediction points into "virtual goals".
///
/// Zero below 40 points, then one goal per 4 points above 36. Negative input
/// is treated like any other total under the threshold.
pub fn points_to_virtual_goals(points: i64) -> u32 {
    if points < VIRTUAL_GOALS_THRESHOLD {
        return 0;
    }
    let goals = (points - VIRTUAL_GOALS_OFFSET) / VIRTUAL_GOALS_STEP;
    u32::try_from(goals).unwrap_or(u32::MAX)
}
