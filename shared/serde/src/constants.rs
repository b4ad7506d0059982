/// Upper bound on the encoded byte length of a single string.
pub const MAX_STRING_BYTES: usize = 32_767;
