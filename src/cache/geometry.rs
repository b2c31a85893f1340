use crate::cache::config::CacheConfig;
use crate::error::{SimError, SimResult};

pub const ADDRESS_BITS: u32 = 32;

/// Fields of a 32-bit address under one level's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedAddr {
    pub tag: u32,
    pub index: usize,
    pub offset: u32,
}

/// Bit-field split derived from a [`CacheConfig`]. Immutable once built;
/// `tag_bits + index_bits + offset_bits == 32` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    block_size: u32,
    ways: usize,
    num_sets: usize,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

#[inline]
fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

impl Geometry {
    /// Validates `config` and derives the field widths. `level` only names
    /// the level in error messages.
    pub fn new(level: &str, config: &CacheConfig) -> SimResult<Self> {
        let block_size = config.block_size;
        if block_size == 0 || !block_size.is_power_of_two() {
            return Err(SimError::config(
                level,
                format!("block size {} is not a power of two", block_size),
            ));
        }
        if config.size_kb == 0 {
            return Err(SimError::config(level, "total size must be non-zero"));
        }

        let total_bytes = config.total_bytes();
        if total_bytes > 1u64 << ADDRESS_BITS {
            return Err(SimError::config(
                level,
                format!(
                    "{} KiB exceeds the {}-bit address space",
                    config.size_kb, ADDRESS_BITS
                ),
            ));
        }
        let ways = if config.is_fully_associative() {
            total_bytes / block_size as u64
        } else {
            config.ways as u64
        };
        if ways == 0 {
            return Err(SimError::config(
                level,
                format!("{} KiB cannot hold a single {}-byte block", config.size_kb, block_size),
            ));
        }

        let set_bytes = ways * block_size as u64;
        if total_bytes % set_bytes != 0 {
            return Err(SimError::config(
                level,
                format!(
                    "{} bytes is not a whole number of {}-way sets of {}-byte blocks",
                    total_bytes, ways, block_size
                ),
            ));
        }
        let num_sets = total_bytes / set_bytes;
        if !num_sets.is_power_of_two() {
            return Err(SimError::config(
                level,
                format!("set count {} is not a power of two", num_sets),
            ));
        }

        let offset_bits = block_size.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits > ADDRESS_BITS {
            return Err(SimError::config(
                level,
                format!(
                    "{} offset bits and {} index bits exceed a {}-bit address",
                    offset_bits, index_bits, ADDRESS_BITS
                ),
            ));
        }

        Ok(Self {
            block_size,
            ways: ways as usize,
            num_sets: num_sets as usize,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_BITS - offset_bits - index_bits,
        })
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub fn ways(&self) -> usize {
        self.ways
    }

    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    pub fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    pub fn decode(&self, addr: u32) -> DecodedAddr {
        let addr = addr as u64;
        DecodedAddr {
            tag: ((addr >> (self.offset_bits + self.index_bits)) & mask(self.tag_bits)) as u32,
            index: ((addr >> self.offset_bits) & mask(self.index_bits)) as usize,
            offset: (addr & mask(self.offset_bits)) as u32,
        }
    }

    /// Inverse of [`Geometry::decode`] with the offset cleared: the base
    /// address of the block identified by `(tag, index)`.
    pub fn reconstruct(&self, tag: u32, index: usize) -> u32 {
        let tag = (tag as u64) & mask(self.tag_bits);
        let index = (index as u64) & mask(self.index_bits);
        ((tag << (self.offset_bits + self.index_bits)) | (index << self.offset_bits)) as u32
    }

    pub fn block_base(&self, addr: u32) -> u32 {
        ((addr as u64) & !mask(self.offset_bits)) as u32
    }
}
