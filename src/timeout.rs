//! Watchdog for radio operations whose completion interrupt never shows up.
use crate::interface::IrqGuard;
use crate::mod_traits::*;
use crate::radio::Radio;
use crate::scheduler::{JobHandle, Scheduler, Ticks};
use crate::session::MacSession;

impl<RK, IV> Radio<RK, IV>
where
    RK: RadioKind,
    IV: InterfaceVariant,
{
    /// Arm the watchdog at `deadline`, replacing the pending timeout or interrupt job.
    ///
    /// Drivers handling an intermediate interrupt report a fresh deadline through
    /// [`IrqStatus::Pending`] instead of calling this directly.
    pub fn set_irq_timeout<S: Scheduler>(&mut self, sched: &mut S, deadline: Ticks) {
        let _guard = IrqGuard::new(&mut self.iv);
        self.state.slot.arm_timeout(sched, deadline);
    }

    /// Protected job: entered with interrupts disabled.
    pub(crate) fn irq_timeout<S, M>(&mut self, sched: &mut S, session: &mut M)
    where
        S: Scheduler,
        M: MacSession<Job = S::Job>,
    {
        self.stop(sched);

        // a stuck transmission leaves the chip in an unknown state
        if self.state.tx_mode {
            if let Err(e) = self.kind.init(&mut self.iv, &*session, true) {
                error!("radio re-init after tx timeout failed: {}", e);
            }
        }

        self.iv.enable_irqs();

        warn!("radio irq timeout");

        session.set_data_len(0);
        sched.set_callback(JobHandle::Mac, session.completion());
    }
}
