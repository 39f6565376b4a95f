// Copyright 2022 houseme
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use thiserror::Error;

/// Convenience type alias for usage within moltenflake.
pub type BoxDynError = Box<dyn StdError + 'static + Send + Sync>;

/// The error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no clock was provided")]
    MissingClock,
    #[error("no machine id was provided")]
    MissingMachineId,
    #[error("machine id {0} is out of range, it must be in the range 0..=2047")]
    MachineIdOutOfRange(i64),
    #[error("check_machine_id returned false")]
    CheckMachineIdFailed,
    #[error("epoch `{0}` is before the unix epoch")]
    InvalidEpoch(DateTime<Utc>),
    #[error("clock reads {now} ms, the clock must be later than the generator epoch ({epoch} ms)")]
    ClockBeforeEpoch { now: i64, epoch: i64 },
    #[error("clock moved backwards: {now} ms is in the observed past (last issued at {last} ms)")]
    ClockRegression { now: i64, last: i64 },
    #[error("ran out of ids for millisecond {0}")]
    SequenceExhausted(i64),
    #[error("over the time limit")]
    OverTimeLimit,
    #[error("mutex is poisoned (i.e. a panic happened while it was locked)")]
    MutexPoisoned,
}

impl Error {
    /// Returns `true` for errors raised while building a generator.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingClock
                | Error::MissingMachineId
                | Error::MachineIdOutOfRange(_)
                | Error::CheckMachineIdFailed
                | Error::InvalidEpoch(_)
                | Error::ClockBeforeEpoch { .. }
        )
    }

    pub fn is_clock_regression(&self) -> bool {
        matches!(self, Error::ClockRegression { .. })
    }

    /// Returns `true` when the current millisecond has no ids left.
    /// Retrying after the next millisecond boundary will succeed.
    pub fn is_sequence_exhausted(&self) -> bool {
        matches!(self, Error::SequenceExhausted(_))
    }
}
