use itertools::Itertools;
use std::fmt;

/// One observation of one player at one frame of a play
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingRow {
    pub game_id: i64,
    pub play_id: i64,
    /// temporal order within a play
    pub frame_id: i64,
    pub nfl_id: i64,
    pub player_name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub player_role: Option<String>,
    pub ball_land_x: Option<f64>,
    pub ball_land_y: Option<f64>,
}

impl TrackingRow {
    pub fn selection(&self) -> PlaySelection {
        PlaySelection::new(self.game_id, self.play_id)
    }
}

/// Optional columns present in a loaded table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub player_name: bool,
    pub player_role: bool,
    /// both `ball_land_x` and `ball_land_y`
    pub ball_land: bool,
}

impl Schema {
    /// All optional columns present
    pub fn full() -> Self {
        Self {
            player_name: true,
            player_role: true,
            ball_land: true,
        }
    }

    /// Column set shared by both schemas
    pub fn intersect(self, other: Schema) -> Self {
        Self {
            player_name: self.player_name && other.player_name,
            player_role: self.player_role && other.player_role,
            ball_land: self.ball_land && other.ball_land,
        }
    }
}

/// (game, play) key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaySelection {
    pub game_id: i64,
    pub play_id: i64,
}

impl PlaySelection {
    pub fn new(game_id: i64, play_id: i64) -> Self {
        Self { game_id, play_id }
    }

    pub fn matches(&self, row: &TrackingRow) -> bool {
        row.game_id == self.game_id && row.play_id == self.play_id
    }
}

impl fmt::Display for PlaySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game: {}, Play: {}", self.game_id, self.play_id)
    }
}

/// A position sample. Missing coordinates are kept as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Both coordinates, if present and finite
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Ordered path of one player through a play
pub type Trajectory = Vec<Point>;

/// Ball landing location of a play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandingPoint {
    pub x: f64,
    pub y: f64,
}

/// Tracking rows loaded from one or more CSV files
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingTable {
    schema: Schema,
    rows: Vec<TrackingRow>,
}

impl TrackingTable {
    pub fn new(schema: Schema, rows: Vec<TrackingRow>) -> Self {
        Self { schema, rows }
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn rows(&self) -> &[TrackingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends the rows of `other`, keeping only the columns both tables have
    pub fn merge(&mut self, other: TrackingTable) {
        if self.rows.is_empty() && self.schema == Schema::default() {
            *self = other;
            return;
        }
        self.schema = self.schema.intersect(other.schema);
        self.rows.extend(other.rows);
    }

    /// Rows of a single play, in table order
    pub fn select(&self, selection: PlaySelection) -> impl Iterator<Item = &TrackingRow> {
        self.rows.iter().filter(move |row| selection.matches(row))
    }

    /// Distinct plays in ascending (game, play) order
    pub fn plays(&self) -> Vec<PlaySelection> {
        self.rows
            .iter()
            .map(TrackingRow::selection)
            .unique()
            .sorted()
            .collect()
    }

    /// New table with the rows accepted by `keep`
    pub fn filter<F>(&self, mut keep: F) -> TrackingTable
    where
        F: FnMut(&TrackingRow) -> bool,
    {
        let rows = self.rows.iter().filter(|row| keep(row)).cloned().collect();
        TrackingTable::new(self.schema, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(game_id: i64, play_id: i64) -> TrackingRow {
        TrackingRow {
            game_id,
            play_id,
            ..Default::default()
        }
    }

    #[test]
    fn test_point_coords() {
        assert_eq!(Point::new(1.0, 2.0).coords(), Some((1.0, 2.0)));
        assert_eq!(
            Point {
                x: Some(1.0),
                y: None
            }
            .coords(),
            None
        );
        assert_eq!(Point::new(f64::NAN, 2.0).coords(), None);
    }

    #[test]
    fn test_plays_are_distinct_and_sorted() {
        let table = TrackingTable::new(
            Schema::default(),
            vec![row(2, 1), row(1, 5), row(2, 1), row(1, 3)],
        );
        assert_eq!(
            table.plays(),
            vec![
                PlaySelection::new(1, 3),
                PlaySelection::new(1, 5),
                PlaySelection::new(2, 1)
            ]
        );
    }

    #[test]
    fn test_merge_intersects_schema() {
        let mut a = TrackingTable::new(Schema::full(), vec![row(1, 1)]);
        let b = TrackingTable::new(
            Schema {
                player_name: true,
                player_role: false,
                ball_land: true,
            },
            vec![row(1, 2)],
        );
        a.merge(b);
        assert_eq!(a.len(), 2);
        assert!(a.schema().player_name);
        assert!(!a.schema().player_role);
        assert!(a.schema().ball_land);
    }

    #[test]
    fn test_merge_into_empty_takes_other() {
        let mut a = TrackingTable::default();
        a.merge(TrackingTable::new(Schema::full(), vec![row(1, 1)]));
        assert_eq!(a.schema(), Schema::full());
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_select_matches_game_and_play() {
        let table = TrackingTable::new(
            Schema::default(),
            vec![row(1, 1), row(1, 2), row(2, 1), row(1, 1)],
        );
        assert_eq!(table.select(PlaySelection::new(1, 1)).count(), 2);
        assert_eq!(table.select(PlaySelection::new(9, 9)).count(), 0);
    }
}
