/// Column headers of the tracking CSV
pub const GAME_ID: &str = "game_id";
pub const PLAY_ID: &str = "play_id";
pub const FRAME_ID: &str = "frame_id";
pub const NFL_ID: &str = "nfl_id";
pub const PLAYER_NAME: &str = "player_name";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const PLAYER_ROLE: &str = "player_role";
pub const BALL_LAND_X: &str = "ball_land_x";
pub const BALL_LAND_Y: &str = "ball_land_y";

/// Cell values read as missing (compared case-insensitively)
pub const MISSING_VALUES: [&str; 4] = ["na", "nan", "null", "none"];

/// Field geometry (yards)
pub const FIELD_LENGTH: f64 = 120.0;
pub const FIELD_WIDTH: f64 = 53.3;
pub const ENDZONE_DEPTH: f64 = 10.0;
pub const YARD_LINE_STEP: usize = 10;

/// View bounds of the field plot
pub const FIELD_VIEW_X: (f64, f64) = (-10.0, 130.0);
pub const FIELD_VIEW_Y: (f64, f64) = (-5.0, 58.3);

/// View bounds of the single trajectory plot
pub const SINGLE_VIEW_X: (f64, f64) = (-5.0, 125.0);
pub const SINGLE_VIEW_Y: (f64, f64) = (-5.0, 58.0);

/// Arrow head size (yards)
pub const ARROW_HEAD_WIDTH: f64 = 2.0;
pub const ARROW_HEAD_LENGTH: f64 = 1.5;

/// Image layout (px)
pub const DEFAULT_WIDTH_PX: u32 = 1200; // 12in x 100dpi
pub const DEFAULT_HEIGHT_PX: u32 = 500; // 5in x 100dpi
pub const DEFAULT_LEGEND_WIDTH_PX: u32 = 220;
pub const MIN_IMAGE_PX: u32 = 200;
pub const MAX_IMAGE_PX: u32 = 8000;
pub const MARGIN_LEFT: f64 = 64.0;
pub const MARGIN_RIGHT: f64 = 16.0;
pub const MARGIN_TOP: f64 = 40.0;
pub const MARGIN_BOTTOM: f64 = 48.0;

/// Font sizes (px)
pub const TITLE_FONT_SIZE: f64 = 18.0;
pub const LABEL_FONT_SIZE: f64 = 15.0;
pub const TICK_FONT_SIZE: f64 = 12.0;
pub const LEGEND_FONT_SIZE: f64 = 13.0;

/// Default titles
pub const MULTI_DEFAULT_TITLE: &str = "Player Trajectories";
pub const SINGLE_DEFAULT_TITLE: &str = "Player Trajectory";
pub const BALL_LANDING_LABEL: &str = "Ball Landing";
