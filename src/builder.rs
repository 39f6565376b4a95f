use crate::IdGenerator;
use crate::clock::Clock;
use crate::error::Error;
use crate::layout::{DEFAULT_EPOCH, MAX_MACHINE_ID};
use chrono::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// A builder for building the ['IdGenerator'].
///
/// [`IdGenerator`]: struct.IdGenerator.html
pub struct Builder<'a> {
    clock: Option<Arc<dyn Clock>>,
    machine_id: Option<i64>,
    epoch: Option<DateTime<Utc>>,
    check_machine_id: Option<&'a dyn Fn(u16) -> bool>,
}

impl<'a> Default for Builder<'a> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<'a> Builder<'a> {
    /// Construct a new builder for the build of ['IdGenerator'].
    ///
    /// [`IdGenerator`]: struct.IdGenerator.html
    pub fn new() -> Self {
        Self {
            clock: None,
            machine_id: None,
            epoch: None,
            check_machine_id: None,
        }
    }

    /// Set the clock the generator reads on every call.
    /// If no clock is set, 'finalize' will fail.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        self.clock = Some(clock);
        self
    }

    /// Set the machine ID.
    /// If it is outside `0..=2047`, 'finalize' will fail.
    pub fn machine_id(mut self, machine_id: i64) -> Self {
        self.machine_id = Some(machine_id);
        self
    }

    /// Set the epoch. Defaults to 2021-01-01T00:00:00Z.
    /// If the clock reads earlier than the epoch, 'finalize' will fail.
    pub fn epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Set up a function to check the machine ID.
    /// If the function returns 'false', 'finalize' will fail.
    pub fn check_machine_id(mut self, check_machine_id: &'a dyn Fn(u16) -> bool) -> Self {
        self.check_machine_id = Some(check_machine_id);
        self
    }

    /// Finish building and create an IdGenerator instance.
    /// The clock is read once here to make sure it is not behind the epoch.
    pub fn finalize(self) -> Result<IdGenerator, Error> {
        let clock = self.clock.ok_or(Error::MissingClock)?;

        let machine_id = self.machine_id.ok_or(Error::MissingMachineId)?;
        let machine_id = u16::try_from(machine_id)
            .ok()
            .filter(|id| *id <= MAX_MACHINE_ID)
            .ok_or(Error::MachineIdOutOfRange(machine_id))?;

        if let Some(check_machine_id) = self.check_machine_id {
            if !check_machine_id(machine_id) {
                return Err(Error::CheckMachineIdFailed);
            }
        }

        let epoch = match self.epoch {
            Some(epoch) if epoch.timestamp_millis() < 0 => return Err(Error::InvalidEpoch(epoch)),
            Some(epoch) => epoch.timestamp_millis(),
            None => DEFAULT_EPOCH,
        };

        let now = clock.now_millis();
        if now < epoch {
            return Err(Error::ClockBeforeEpoch { now, epoch });
        }

        debug!(machine_id, epoch, "id generator ready");
        Ok(IdGenerator::new_inner(machine_id, epoch, clock))
    }
}
