pub mod format;
pub mod headers;
pub mod innings;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod table;

pub use headers::detect_kind;
pub use innings::Innings;
pub use merge::{merge_roster, MergeOutcome, Mergeable};
pub use models::{
    BattingStats, PitchingStats, SortKey, StatKind, StatLine, BATTING_HEADERS,
    PITCHING_HEADERS,
};
pub use normalize::{normalize, normalize_batting, normalize_pitching, NormalizedBatch};
pub use table::{apply_query, SortOrder, TableQuery};
