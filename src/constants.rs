/// Points for calling the match outcome (home win / draw / away win)
pub const OUTCOME_POINTS: u32 = 5;

/// Points for each of the five secondary prediction rules
pub const BONUS_POINTS: u32 = 1;

/// Best possible score for a single prediction
pub const MAX_PREDICTION_SCORE: u32 = OUTCOME_POINTS + 5 * BONUS_POINTS;

/// Highest goal count a participant may forecast for one side
pub const MAX_PREDICTED_GOALS: u32 = 20;

/// Total-goals line used by the over/under rule (over means strictly more than 2.5)
pub const OVER_UNDER_LINE: u64 = 2;

/// Championship points for a win, a draw and a loss
pub const WIN_POINTS: u32 = 3;
pub const DRAW_POINTS: u32 = 1;
pub const LOSS_POINTS: u32 = 0;

/// Below this many prediction points no virtual goals are awarded
pub const VIRTUAL_GOALS_THRESHOLD: i64 = 40;

/// Offset and step of the points to virtual goals conversion
pub const VIRTUAL_GOALS_OFFSET: i64 = 36;
pub const VIRTUAL_GOALS_STEP: i64 = 4;

/// League sizes a league creator can pick from
pub const LEAGUE_SIZES: [usize; 6] = [4, 6, 8, 10, 12, 16];

/// Join code length and alphabet
pub const JOIN_CODE_LEN: usize = 6;
pub const JOIN_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Score tier boundaries for displaying a single scored prediction
pub const HIGH_TIER_MIN: u32 = 7;
pub const MEDIUM_TIER_MIN: u32 = 3;
