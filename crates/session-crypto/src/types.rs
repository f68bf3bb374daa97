/// AES block length in bytes (128 bits).
pub const AES_BLOCK_LENGTH: usize = 16;

/// AES-128 key length in bytes.
pub const AES_KEY_LENGTH: usize = 16;

/// CBC initialization vector length in bytes (one block).
pub const CBC_IV_LENGTH: usize = AES_BLOCK_LENGTH;
