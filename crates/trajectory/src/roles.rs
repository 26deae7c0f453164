use crate::tracking::{TrackingRow, TrackingTable};

use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Role of a player during a play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
pub enum PlayerRole {
    #[strum(serialize = "Passer")]
    Passer,
    #[strum(serialize = "Targeted Receiver")]
    TargetedReceiver,
    #[strum(serialize = "Other Route Runner")]
    OtherRouteRunner,
    #[strum(serialize = "Defensive Coverage")]
    DefensiveCoverage,
}

impl PlayerRole {
    pub fn is_offensive(self) -> bool {
        matches!(
            self,
            PlayerRole::Passer | PlayerRole::TargetedReceiver | PlayerRole::OtherRouteRunner
        )
    }

    /// Parses a role label. Unknown labels give `None`.
    pub fn parse(label: &str) -> Option<Self> {
        PlayerRole::from_str(label).ok()
    }
}

/// True when `role` is one of the offensive roles
pub fn is_offensive_role(role: Option<&str>) -> bool {
    role.and_then(PlayerRole::parse)
        .is_some_and(PlayerRole::is_offensive)
}

/// Boolean mask over `roles`, true for offensive players
pub fn is_offensive_player<S: AsRef<str>>(roles: &[Option<S>]) -> Vec<bool> {
    roles
        .iter()
        .map(|role| is_offensive_role(role.as_ref().map(AsRef::as_ref)))
        .collect()
}

impl TrackingTable {
    /// Rows of offensive players only. Empty when the role column is absent.
    pub fn offensive_only(&self) -> TrackingTable {
        self.filter(|row: &TrackingRow| is_offensive_role(row.player_role.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::Schema;
    use strum::IntoEnumIterator;

    #[test]
    fn test_offensive_mask() {
        let roles = [
            Some("Passer"),
            Some("Blocker"),
            Some("Targeted Receiver"),
            None,
        ];
        assert_eq!(is_offensive_player(&roles), vec![true, false, true, false]);
    }

    #[test]
    fn test_mask_accepts_owned_strings() {
        let roles = vec![
            Some("Other Route Runner".to_string()),
            Some("Defensive Coverage".to_string()),
        ];
        assert_eq!(is_offensive_player(&roles), vec![true, false]);
    }

    #[test]
    fn test_empty_mask() {
        let roles: [Option<&str>; 0] = [];
        assert!(is_offensive_player(&roles).is_empty());
    }

    #[test]
    fn test_role_labels_round_trip() {
        for role in PlayerRole::iter() {
            assert_eq!(PlayerRole::parse(role.as_ref()), Some(role));
        }
        assert_eq!(PlayerRole::parse("passer"), None);
    }

    #[test]
    fn test_offensive_only_filters_rows() {
        let rows = ["Passer", "Defensive Coverage", "Targeted Receiver"]
            .iter()
            .enumerate()
            .map(|(i, role)| TrackingRow {
                nfl_id: i as i64,
                player_role: Some(role.to_string()),
                ..Default::default()
            })
            .chain(std::iter::once(TrackingRow {
                nfl_id: 9,
                player_role: None,
                ..Default::default()
            }))
            .collect();
        let table = TrackingTable::new(Schema::full(), rows);

        let offense = table.offensive_only();
        let ids: Vec<i64> = offense.rows().iter().map(|r| r.nfl_id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(offense.schema(), table.schema());
    }

    #[test]
    fn test_offensive_only_without_role_column() {
        let rows = (0..3)
            .map(|i| TrackingRow {
                nfl_id: i,
                player_role: None,
                ..Default::default()
            })
            .collect();
        let table = TrackingTable::new(Schema::default(), rows);

        let offense = table.offensive_only();
        assert!(offense.is_empty());
        assert_eq!(offense.schema(), Schema::default());
    }
}
