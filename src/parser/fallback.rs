use tracing::trace;

use super::rules::{Field, FALLBACK_RULES};
use super::segment::Segment;
use crate::types::InjuredPlayer;

/// Stored when an entry is accepted on its IL date or return estimate alone.
pub const UNKNOWN_INJURY: &str = "Unknown";

/// Heuristic parse for entries that do not follow the labelled layout.
///
/// Accepts a record only when a name and position are found along with at
/// least one of injury, IL date or expected return.
pub fn parse_fallback(segment: &Segment) -> Option<InjuredPlayer> {
    let field = |field: Field| {
        FALLBACK_RULES
            .first_match(field, segment)
            .map(|(value, rule)| {
                trace!(?field, rule, "fallback rule matched");
                value
            })
    };

    let name = field(Field::Name)?;
    let position = field(Field::Position)?;
    let injury = field(Field::Injury);
    let il_date = field(Field::IlDate);
    let expected_return = field(Field::ExpectedReturn);

    if injury.is_none() && il_date.is_none() && expected_return.is_none() {
        return None;
    }

    Some(InjuredPlayer {
        name,
        position,
        injury: injury.unwrap_or_else(|| UNKNOWN_INJURY.to_string()),
        il_date,
        expected_return,
        status: field(Field::Status),
        last_updated: field(Field::LastUpdated),
    })
}
