//! Zobrist keys for position identity hashing.
//!
//! Equal positions (piece placement, side to move, castling rights, and
//! en passant file) hash equal; the clocks are deliberately excluded so
//! transpositions reached in different move counts share a key.

use crate::castle_rights::CastleRights;
use crate::piece::Piece;
use crate::square::Square;

/// Fixed seed so hashes are identical across runs and builds.
const SEED: u64 = 0x00E0_C41D_4A5F_3D71;

/// One splitmix64 step: returns the output value and the advanced state.
const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31), state)
}

const PIECE_KEYS: usize = 12 * 64;
const SIDE_KEY: usize = PIECE_KEYS;
const CASTLING_KEYS: usize = SIDE_KEY + 1;
const EN_PASSANT_KEYS: usize = CASTLING_KEYS + 16;
const TOTAL_KEYS: usize = EN_PASSANT_KEYS + 8;

/// All keys, generated at compile time from [`SEED`].
static KEYS: [u64; TOTAL_KEYS] = {
    let mut keys = [0u64; TOTAL_KEYS];
    let mut state = SEED;
    let mut i = 0;
    while i < TOTAL_KEYS {
        let (value, next) = splitmix64(state);
        keys[i] = value;
        state = next;
        i += 1;
    }
    keys
};

/// Key for a piece standing on a square.
#[inline]
pub(crate) fn piece_square(piece: Piece, sq: Square) -> u64 {
    KEYS[piece.index() * 64 + sq.index()]
}

/// Key XORed in when Black is to move.
#[inline]
pub(crate) fn side_to_move() -> u64 {
    KEYS[SIDE_KEY]
}

/// Key for a castling-rights configuration.
#[inline]
pub(crate) fn castling(rights: CastleRights) -> u64 {
    KEYS[CASTLING_KEYS + rights.bits() as usize]
}

/// Key for an en passant target on the given file.
#[inline]
pub(crate) fn en_passant_file(file: u8) -> u64 {
    KEYS[EN_PASSANT_KEYS + file as usize]
}
