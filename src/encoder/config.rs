use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

static PARALLEL_MASK_MIN_VERSION: OnceLock<u8> = OnceLock::new();

/// Versions at or above this score mask candidates on the rayon pool.
/// 41 keeps every version sequential.
pub(crate) fn parallel_mask_min_version() -> u8 {
    *PARALLEL_MASK_MIN_VERSION
        .get_or_init(|| parse_env_usize("QR_PARALLEL_MASK_MIN_VERSION", 7).clamp(1, 41) as u8)
}

static PARALLEL_EC_MIN_BLOCKS: OnceLock<usize> = OnceLock::new();

/// Symbols with at least this many EC blocks compute them on the rayon pool.
pub(crate) fn parallel_ec_min_blocks() -> usize {
    *PARALLEL_EC_MIN_BLOCKS.get_or_init(|| parse_env_usize("QR_PARALLEL_EC_MIN_BLOCKS", 8).max(1))
}
