//! XOR-shift diffusion of the low bits of a quantized value.

/*
Bit Hashing
===========

Plain bit-crushing truncates low bits and produces a staircase: a slowly
moving input walks up and down neat steps. Hashing instead scrambles the low
bits with a reversible XOR-shift sequence, so neighbouring input codes land
on unrelated output codes and the error sounds like noise.

Only the bits under `mask` take part (mask = 2^n − 1 for n hashed bits):

    b ^= (b << 3)          & mask
    b ^= (b >> 5)          & mask
    b ^= (b << 1)          & mask
    b ^= (b >> tail_shift) & mask

Every round is an invertible map on the n-bit field (an XOR with a shifted
copy of itself can be undone by repeating the shift), so the whole sequence
is a bijection: no two input codes collide. n = 0 leaves the value alone.

The same primitive serves two places: the digital reorganizer in the audio
path (8-bit sample codes) and knob "fuegoization" in the control layer
(knob codes scaled to 0..=255).
*/

/// Scramble the bits of `bits` selected by `mask`, leaving the others untouched.
#[inline]
pub fn diffuse(bits: u16, mask: u16, tail_shift: u32) -> u16 {
    let mut low = bits & mask;
    low ^= (low << 3) & mask;
    low ^= (low >> 5) & mask;
    low ^= (low << 1) & mask;
    low ^= low.checked_shr(tail_shift).unwrap_or(0) & mask;
    (bits & !mask) | low
}

/// Mask selecting the lowest `bit_count` bits.
#[inline]
pub fn low_bit_mask(bit_count: u32) -> u16 {
    ((1u32 << bit_count.min(16)) - 1) as u16
}

/// Scramble the low bits of a knob value.
///
/// `amount` in [0, 1] selects 0..=8 hashed bits of the value's 8-bit code;
/// `position` (the knob's slot on its page) varies the tail shift so knobs on
/// the same page do not scramble identically. The fractional part below one
/// code is carried through untouched, and the result never exceeds 1.
pub fn fuegoize(value: f32, amount: f32, position: usize) -> f32 {
    let bit_count = (amount.clamp(0.0, 1.0) * 8.0).round() as u32;
    let mask = low_bit_mask(bit_count);
    if mask == 0 {
        return value;
    }

    let scaled = value * 255.0;
    let code = scaled as u16;
    let remainder = scaled - code as f32;
    let tail_shift = 1 + (position as u32) % (mask as u32 + 1);
    let hashed = diffuse(code, mask, tail_shift);

    ((hashed as f32 + remainder) / 255.0).min(1.0)
}
