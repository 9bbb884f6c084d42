pub fn splitmix32(mut value: u32) -> u32 {
    value = value.wrapping_add(0x9E37_79B9);
    let mut z = value;
    z = (z ^ (z >> 16)).wrapping_mul(0x85EB_CA6B);
    z = (z ^ (z >> 13)).wrapping_mul(0xC2B2_AE35);
    z ^ (z >> 16)
}

pub fn rand_unit(seed: u32, salt: u32) -> f32 {
    let mixed = splitmix32(seed ^ salt);
    let top = mixed >> 8;
    top as f32 / ((1u32 << 24) as f32)
}

/// Index in `0..len`; `len` must be non-zero.
pub fn rand_index(seed: u32, salt: u32, len: usize) -> usize {
    let scaled = (rand_unit(seed, salt) * len as f32) as usize;
    scaled.min(len.saturating_sub(1))
}
