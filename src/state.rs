use crate::scheduler::{DeferredSlot, Ticks};

/// State shared between the interrupt handler and the radio jobs.
///
/// `pending` is set only between the capture of an interrupt and the end of the job which
/// interprets it. A new interrupt must never arrive while it is set. The captured mask may be
/// zero when the board does not decode DIO lines; the driver then reads the chip status.
#[derive(Debug, Default)]
pub struct RadioState {
    pub(crate) irq_time: Ticks,
    pub(crate) pending: Option<u8>,
    pub(crate) tx_mode: bool,
    pub(crate) slot: DeferredSlot,
}

impl RadioState {
    pub const fn new() -> Self {
        Self { irq_time: 0, pending: None, tx_mode: false, slot: DeferredSlot::new() }
    }

    /// Time of the last captured interrupt.
    pub fn irq_time(&self) -> Ticks {
        self.irq_time
    }

    /// DIO mask of the interrupt awaiting its job.
    pub fn pending_irq(&self) -> Option<u8> {
        self.pending
    }

    pub fn tx_mode(&self) -> bool {
        self.tx_mode
    }

    pub fn slot(&self) -> &DeferredSlot {
        &self.slot
    }

    /// No interrupt awaits processing and neither a timeout nor an interrupt job is scheduled.
    pub fn is_quiescent(&self) -> bool {
        self.pending.is_none() && self.slot.is_empty()
    }
}
