use crate::builder::Builder;
use crate::clock::Clock;
use crate::error::*;
use crate::layout::{DecomposedId, MAX_SEQUENCE, MAX_TIME_DELTA, compose, decompose};
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{trace, warn};

/// Sentinel below any valid millisecond, so the first call always opens a new window.
pub(crate) const NO_TIMESTAMP: i64 = -1;

/// Internals of IdGenerator.
/// This struct is not exposed to the public.
#[derive(Debug)]
pub(crate) struct Internals {
    pub(crate) last_timestamp: i64,
    /// Next sequence number to hand out for `last_timestamp`.
    pub(crate) sequence: u16,
}

/// IdGenerator issues 64-bit, time-sortable unique ids.
///
/// It is thread-safe. Share one instance between threads or request handlers
/// with an [`Arc`].
pub struct IdGenerator {
    pub(crate) machine_id: u16,
    pub(crate) epoch: i64,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) internals: Mutex<Internals>,
}

impl IdGenerator {
    /// Create a new IdGenerator using the default epoch.
    /// For custom configuration see [`builder`].
    ///
    /// [`builder`]: struct.IdGenerator.html#method.builder
    pub fn new<C: Clock + 'static>(clock: C, machine_id: i64) -> Result<Self, Error> {
        Builder::new().clock(clock).machine_id(machine_id).finalize()
    }

    /// Create a new [`Builder`] to construct an IdGenerator.
    ///
    /// [`Builder`]: struct.Builder.html
    pub fn builder<'a>() -> Builder<'a> {
        Builder::new()
    }

    pub(crate) fn new_inner(machine_id: u16, epoch: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            machine_id,
            epoch,
            clock,
            internals: Mutex::new(Internals {
                last_timestamp: NO_TIMESTAMP,
                sequence: 0,
            }),
        }
    }

    /// Generate the next unique id.
    ///
    /// Fails without consuming a sequence number when the clock moved
    /// backwards or the current millisecond is exhausted. The generator never
    /// waits; retrying is up to the caller.
    pub fn generate_uid(&self) -> Result<i64, Error> {
        // Clock read stays under the lock, so the window decision and the
        // sequence taken always belong to the same observed millisecond.
        let mut internals = self.internals.lock().map_err(|_| Error::MutexPoisoned)?;

        let now = self.clock.now_millis();
        if now < internals.last_timestamp {
            warn!(now, last = internals.last_timestamp, "clock moved backwards");
            return Err(Error::ClockRegression {
                now,
                last: internals.last_timestamp,
            });
        }

        let time_delta = now - self.epoch;
        if time_delta < 0 {
            warn!(now, epoch = self.epoch, "clock moved behind the epoch");
            return Err(Error::ClockRegression {
                now,
                last: self.epoch,
            });
        }
        if time_delta > MAX_TIME_DELTA {
            return Err(Error::OverTimeLimit);
        }

        let sequence = if now == internals.last_timestamp {
            internals.sequence
        } else {
            0
        };
        if sequence > MAX_SEQUENCE {
            trace!(now, "sequence exhausted");
            return Err(Error::SequenceExhausted(now));
        }

        internals.last_timestamp = now;
        internals.sequence = sequence + 1;

        Ok(compose(time_delta, self.machine_id, sequence))
    }

    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    /// The epoch in unix milliseconds subtracted from every timestamp.
    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    pub fn decompose(&self, id: i64) -> DecomposedId {
        decompose(id)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("machine_id", &self.machine_id)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
