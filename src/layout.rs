use chrono::{DateTime, Utc};

/// bit length of the time delta
pub const BIT_LEN_TIME: u32 = 41;
/// bit length of machine id
pub const BIT_LEN_MACHINE_ID: u32 = 11;
/// bit length of sequence number
pub const BIT_LEN_SEQUENCE: u32 = 63 - BIT_LEN_TIME - BIT_LEN_MACHINE_ID;

pub const MACHINE_ID_SHIFT: u32 = BIT_LEN_SEQUENCE;
pub const TIME_SHIFT: u32 = BIT_LEN_SEQUENCE + BIT_LEN_MACHINE_ID;

/// Largest machine id that fits in its field (2047).
pub const MAX_MACHINE_ID: u16 = (1 << BIT_LEN_MACHINE_ID) - 1;
/// Largest sequence number within one millisecond (2047).
pub const MAX_SEQUENCE: u16 = (1 << BIT_LEN_SEQUENCE) - 1;
/// Largest time delta before the id would spill into the sign bit.
pub const MAX_TIME_DELTA: i64 = (1 << BIT_LEN_TIME) - 1;

/// Default generator epoch, 2021-01-01T00:00:00Z in unix milliseconds.
pub const DEFAULT_EPOCH: i64 = 1_609_459_200_000;

const MASK_MACHINE_ID: i64 = (MAX_MACHINE_ID as i64) << MACHINE_ID_SHIFT;
const MASK_SEQUENCE: i64 = MAX_SEQUENCE as i64;

/// Pack the three fields into an id. Callers guarantee every field is in range.
#[inline]
pub fn compose(time_delta: i64, machine_id: u16, sequence: u16) -> i64 {
    (time_delta << TIME_SHIFT) | (i64::from(machine_id) << MACHINE_ID_SHIFT) | i64::from(sequence)
}

/// DecomposedId is the parts of an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecomposedId {
    pub id: i64,
    pub msb: i64,
    pub time: i64,
    pub machine_id: u16,
    pub sequence: u16,
}

impl DecomposedId {
    /// Returns the unix timestamp in milliseconds, given the epoch the id was generated with.
    pub fn timestamp_millis(&self, epoch: i64) -> i64 {
        self.time + epoch
    }

    /// Returns the generation time, or `None` if it is not representable.
    pub fn datetime(&self, epoch: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_millis(epoch))
    }
}

/// Break an id up into its parts.
pub fn decompose(id: i64) -> DecomposedId {
    DecomposedId {
        id,
        msb: (id >> 63) & 1,
        time: (id >> TIME_SHIFT) & MAX_TIME_DELTA,
        machine_id: ((id & MASK_MACHINE_ID) >> MACHINE_ID_SHIFT) as u16,
        sequence: (id & MASK_SEQUENCE) as u16,
    }
}
