/// Daily tournament titles left out of star scoring.
///
/// These are practice, exhibition and mirror variants of the real daily
/// brackets; scoring them would double-count the same players.
const EXCLUDED_DAILY_TITLES: &[&str] = &[
    "Daily Practice",
    "Daily Exhibition",
    "Daily Iron Sandbox",
    "Daily Mirror Bracket",
    "Daily Open Practice",
    "Daily Rookie Practice",
    "Daily Test Bracket",
    "Daily Scrimmage",
    "Daily Warmup",
    "Daily Casual",
    "Daily Casual Open",
    "Daily Beta Bracket",
    "Daily Quick Exhibition",
    "Daily Sandbox 16",
    "Daily Sandbox 32",
    "Daily Mirror Iron",
    "Daily Mirror Bronze",
    "Daily Mirror Silver",
    "Daily Mirror Gold",
    "Daily Mirror Diamond",
];

pub fn excluded_daily_titles() -> Vec<String> {
    EXCLUDED_DAILY_TITLES.iter().map(|t| t.to_string()).collect()
}
