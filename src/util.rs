const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over raw bytes. Stable across platforms and compiler versions,
/// unlike `DefaultHasher`.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// SplitMix64 finalizer, spreads low-entropy inputs over all 64 bits.
pub fn mix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e37_79b9_7f4a_7c15);
    value = (value ^ (value >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    value ^ (value >> 31)
}

/// Seed derived from an ordered list of stable identifiers.
pub fn stable_seed(parts: &[i64], tag: &str) -> u64 {
    let mut hash = fnv1a64(tag.as_bytes());
    for part in parts {
        hash = mix64(hash ^ fnv1a64(&part.to_le_bytes()));
    }
    hash
}

pub fn format_word_number(id: i64) -> String {
    format!("{id:04}")
}

/// Import placeholders such as `TODO: proposer` count as missing text.
pub fn meaningful_text(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with("TODO") {
        None
    } else {
        Some(trimmed)
    }
}
