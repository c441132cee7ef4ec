use std::mem;

pub const DISCRIMINATOR_LEN: usize = 8;
pub const STRING_PREFIX_LEN: usize = mem::size_of::<u32>();
