use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const SEED: &str = "0123456789abcdef0123456789abcdef";
pub const NAME: &str = "_session";
pub const HOUR: Duration = Duration::from_secs(3600);

pub fn signed_at() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

pub fn after(secs: u64) -> SystemTime {
    signed_at() + Duration::from_secs(secs)
}

pub fn before(secs: u64) -> SystemTime {
    signed_at() - Duration::from_secs(secs)
}
