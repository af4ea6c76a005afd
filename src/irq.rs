//! Interrupt bridge: capture in interrupt context, interpretation in a scheduler job.
use crate::interface::IrqGuard;
use crate::mod_traits::*;
use crate::radio::Radio;
use crate::scheduler::{JobHandle, RadioJob, Scheduler, Ticks};
use crate::session::MacSession;

impl<RK, IV> Radio<RK, IV>
where
    RK: RadioKind,
    IV: InterfaceVariant,
{
    /// To be called from the radio DIO interrupt with the lines that fired and the capture time.
    /// Boards which cannot tell the lines apart pass a zero mask.
    ///
    /// Posting the interrupt job replaces an armed timeout.
    ///
    /// # Panics
    ///
    /// If the previous interrupt has not been processed yet. The chip must not raise another
    /// interrupt before the job for the last one has run.
    pub fn irq_handler<S: Scheduler>(&mut self, mask: u8, ticks: Ticks, sched: &mut S) {
        if let Some(prev) = self.state.pending {
            panic!("radio irq {:#04x} while irq {:#04x} is unprocessed", mask, prev);
        }

        self.state.irq_time = ticks;
        self.state.pending = Some(mask);
        self.state.slot.post_irq(sched);
    }

    /// Run a job previously handed to the scheduler through [`RadioJob`].
    ///
    /// Jobs which were superseded in the deferred slot after being dequeued are dropped.
    pub fn run<S, M>(&mut self, job: RadioJob, sched: &mut S, session: &mut M)
    where
        S: Scheduler,
        M: MacSession<Job = S::Job>,
    {
        let current = {
            let _guard = IrqGuard::new(&mut self.iv);
            self.state.slot.fire(job)
        };
        if !current {
            trace!("dropping superseded radio job {}", job);
            if job == RadioJob::Timeout {
                // protected jobs are entered with interrupts disabled
                self.iv.enable_irqs();
            }
            return;
        }

        match job {
            RadioJob::ProcessIrq => self.process_irq(sched, session),
            RadioJob::Timeout => self.irq_timeout(sched, session),
        }
    }

    fn process_irq<S, M>(&mut self, sched: &mut S, session: &mut M)
    where
        S: Scheduler,
        M: MacSession<Job = S::Job>,
    {
        let mask = self.state.pending.unwrap_or_default();
        let status = self.kind.process_irq(&mut self.iv, session, self.state.irq_time, mask);
        match status {
            IrqStatus::Complete => {
                self.stop(sched);
                sched.set_callback(JobHandle::Mac, session.completion());
            }
            IrqStatus::Pending { rearm: Some(deadline) } => self.set_irq_timeout(sched, deadline),
            IrqStatus::Pending { rearm: None } => {}
        }

        // reopen the window for the next interrupt
        let _guard = IrqGuard::new(&mut self.iv);
        self.state.pending = None;
    }
}
