pub const DIGITS: [char; 16] = [
    '0' , '1' , '2' , '3' ,
    '4' , '5' , '6' , '7' ,
    '8' , '9' , 'A' , 'B' ,
    'C' , 'D' , 'E' , 'F'
];

/// Bit strings of every nibble, indexed by nibble value.
pub const NIBBLES: [&str; 16] = [
    "0000", "0001", "0010", "0011",
    "0100", "0101", "0110", "0111",
    "1000", "1001", "1010", "1011",
    "1100", "1101", "1110", "1111",
];

pub const DEFAULT_CAPACITY: usize = 128;

pub const MIN_BASE: u32 = 2;

pub const MAX_BASE: u32 = 16;

pub const MAX_TABLE_DIVISOR: u32 = 16;

pub const SMALL_CACHE_MAX: usize = 16;

pub const U32_BYTES: usize = 4;

pub const DIGIT_BITS: u32 = u8::BITS;
