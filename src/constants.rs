//! Application constants

/// Default number of videos returned by GET /api/videos
pub const DEFAULT_VIDEO_LIMIT: i64 = 50;

/// Maximum number of videos returnable in one request
pub const MAX_VIDEO_LIMIT: i64 = 500;

/// Views assigned to a record when the source value can't be parsed
pub const DEFAULT_VIEWS: i64 = 1000;

/// Rating assigned to a record when the source value is missing
pub const DEFAULT_RATING: f64 = 7.0;
