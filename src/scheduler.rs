//! Interface to the cooperative job scheduler and the deferred action slot this core schedules
//! its own jobs through.
use core::fmt;

/// Monotonic scheduler time. Wraps around; compare with `wrapping_sub`.
pub type Ticks = u32;

/// Jobs this core hands to the scheduler. The scheduler glue passes them back to
/// [`Radio::run`](crate::Radio::run) when they are due.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioJob {
    /// Slow stage of the interrupt bridge.
    ProcessIrq,
    /// Watchdog recovery. Always scheduled protected.
    Timeout,
}

/// Job handles the core posts to.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobHandle {
    /// The deferred action slot owned by the radio.
    Radio,
    /// The MAC layer job which receives the completion of a radio operation.
    Mac,
}

/// A cooperative, run-to-completion job scheduler.
///
/// Posting a job to a handle that already holds a scheduled job replaces it. Protected jobs are
/// entered with interrupts disabled and are responsible for enabling them again.
pub trait Scheduler {
    type Job: Copy + fmt::Debug + From<RadioJob>;

    /// Tick rate. The default is 16 µs per tick; 32768 Hz clocks are common too.
    const TICKS_PER_SEC: u32 = 62_500;

    fn now(&self) -> Ticks;

    /// Run `job` as soon as possible.
    fn set_callback(&mut self, handle: JobHandle, job: Self::Job);

    /// Run `job` with interrupts disabled once `at` is reached.
    fn set_protected_timed_callback(&mut self, handle: JobHandle, at: Ticks, job: Self::Job);

    fn clear_callback(&mut self, handle: JobHandle);
}

pub fn ms_to_ticks<S: Scheduler>(ms: u32) -> Ticks {
    (ms as u64 * S::TICKS_PER_SEC as u64 / 1_000) as Ticks
}

pub fn us_to_ticks<S: Scheduler>(us: u32) -> Ticks {
    (us as u64 * S::TICKS_PER_SEC as u64 / 1_000_000) as Ticks
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ProcessIrq,
    Timeout(Ticks),
}

/// The single scheduler job handle shared by the watchdog timeout and the interrupt job.
///
/// Last writer wins: posting the interrupt job cancels an armed timeout and arming a timeout
/// cancels a queued interrupt job. Operations which take several interrupts to complete must
/// re-arm the timeout after each intermediate one.
#[derive(Debug, Default)]
pub struct DeferredSlot {
    held: Option<Deferred>,
}

impl DeferredSlot {
    pub const fn new() -> Self {
        Self { held: None }
    }

    pub fn post_irq<S: Scheduler>(&mut self, sched: &mut S) {
        self.held = Some(Deferred::ProcessIrq);
        sched.set_callback(JobHandle::Radio, RadioJob::ProcessIrq.into());
    }

    pub fn arm_timeout<S: Scheduler>(&mut self, sched: &mut S, at: Ticks) {
        self.held = Some(Deferred::Timeout(at));
        sched.set_protected_timed_callback(JobHandle::Radio, at, RadioJob::Timeout.into());
    }

    pub fn clear<S: Scheduler>(&mut self, sched: &mut S) {
        self.held = None;
        sched.clear_callback(JobHandle::Radio);
    }

    /// Consumes the slot if it currently holds `job`. Returns false for a stale job which was
    /// superseded after the scheduler dequeued it.
    pub fn fire(&mut self, job: RadioJob) -> bool {
        let matches = matches!(
            (self.held, job),
            (Some(Deferred::ProcessIrq), RadioJob::ProcessIrq)
                | (Some(Deferred::Timeout(_)), RadioJob::Timeout)
        );
        if matches {
            self.held = None;
        }
        matches
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    pub fn irq_pending(&self) -> bool {
        self.held == Some(Deferred::ProcessIrq)
    }

    /// Deadline of the armed timeout, if the slot holds one.
    pub fn deadline(&self) -> Option<Ticks> {
        match self.held {
            Some(Deferred::Timeout(at)) => Some(at),
            _ => None,
        }
    }
}
