//! Mode controller: sequences radio operations and arms the watchdog for the ones which end
//! with an interrupt.
use crate::interface::IrqGuard;
use crate::mod_params::*;
use crate::mod_traits::*;
use crate::scheduler::{ms_to_ticks, us_to_ticks, Scheduler, Ticks};
use crate::session::MacSession;
use crate::state::RadioState;
use crate::Error;

/// Fixed part of the tx watchdog, added to the frame airtime.
pub const TX_GUARD_MS: u32 = 20;
/// Fixed part of the rx watchdog, counted from the rx window start.
pub const RX_GUARD_MS: u32 = 5;
/// Fixed part of the cad watchdog.
pub const CAD_GUARD_MS: u32 = 10;
/// Airtime is stretched by this percentage so drift never beats a legitimate completion.
pub const AIRTIME_MARGIN_PERCENT: u64 = 110;
/// Longest LoRa payload, used to bound receive operations.
pub const MAX_PAYLOAD_LEN: u8 = 255;

/// Radio control core, owning the chip driver, the board interface and the shared state.
pub struct Radio<RK, IV> {
    pub(crate) kind: RK,
    pub(crate) iv: IV,
    pub(crate) state: RadioState,
}

impl<RK, IV> Radio<RK, IV>
where
    RK: RadioKind,
    IV: InterfaceVariant,
{
    pub fn new(kind: RK, iv: IV) -> Self {
        Self { kind, iv, state: RadioState::new() }
    }

    pub fn get_radio_kind(&mut self) -> &mut RK {
        &mut self.kind
    }

    pub fn get_interface(&mut self) -> &mut IV {
        &mut self.iv
    }

    pub fn state(&self) -> &RadioState {
        &self.state
    }

    /// Start `mode`, cancelling whatever the radio was doing.
    ///
    /// Operations which finish with an interrupt post the session's completion job when they are
    /// done, or when their watchdog expires. If the chip refuses to start, the radio is left
    /// stopped and the driver error is returned.
    pub fn execute<S, M>(
        &mut self,
        mode: Mode,
        sched: &mut S,
        session: &M,
    ) -> Result<(), Error<RK::Error>>
    where
        S: Scheduler,
        M: MacSession<Job = S::Job>,
    {
        match mode {
            Mode::Stop => self.stop(sched),
            Mode::Tx => {
                self.stop(sched);
                log_tx(session);
                let started = self.kind.start_tx(&mut self.iv, session, false);
                self.started(sched, started)?;
                self.state.tx_mode = true;
                let op = session.operation();
                let deadline = sched
                    .now()
                    .wrapping_add(ms_to_ticks::<S>(TX_GUARD_MS))
                    .wrapping_add(self.guarded_airtime::<S>(&op.rf.bb, op.len));
                self.set_irq_timeout(sched, deadline);
            }
            Mode::Rx => {
                self.stop(sched);
                log_rx(session.operation(), false);
                let started = self.kind.start_rx(&mut self.iv, session, false);
                self.started(sched, started)?;
                self.state.tx_mode = false;
                let op = session.operation();
                let deadline = op
                    .rx_time
                    .wrapping_add(ms_to_ticks::<S>(RX_GUARD_MS))
                    .wrapping_add(self.guarded_airtime::<S>(&op.rf.bb, MAX_PAYLOAD_LEN));
                self.set_irq_timeout(sched, deadline);
            }
            Mode::RxContinuous => {
                self.stop(sched);
                log_rx(session.operation(), true);
                self.state.tx_mode = false;
                let started = self.kind.start_rx(&mut self.iv, session, true);
                self.started(sched, started)?;
            }
            Mode::TxContinuousWave => {
                self.stop(sched);
                let started = self.kind.start_cw(&mut self.iv, session);
                self.started(sched, started)?;
            }
            Mode::ClearChannelAssessment => {
                self.stop(sched);
                let started = self.kind.start_cca(&mut self.iv, session);
                self.started(sched, started)?;
            }
            Mode::Init => {
                // cold start, nothing to quiesce yet
                self.kind.init(&mut self.iv, session, true).map_err(Error::Radio)?;
                info!("radio initialized");
            }
            Mode::TxContinuous => {
                self.stop(sched);
                let started = self.kind.start_tx(&mut self.iv, session, true);
                self.started(sched, started)?;
            }
            Mode::ChannelActivityDetection => {
                self.stop(sched);
                self.state.tx_mode = false;
                let op = session.operation();
                let deadline = sched
                    .now()
                    .wrapping_add(ms_to_ticks::<S>(CAD_GUARD_MS))
                    .wrapping_add(self.guarded_airtime::<S>(&op.rf.bb, MAX_PAYLOAD_LEN));
                self.set_irq_timeout(sched, deadline);
                // a detected preamble turns into a receive
                let started = self.kind.start_cad(&mut self.iv, session);
                self.started(sched, started)?;
            }
        }
        Ok(())
    }

    /// Put the radio to sleep, mask its interrupts and cancel the deferred job.
    pub(crate) fn stop<S: Scheduler>(&mut self, sched: &mut S) {
        let mut iv = IrqGuard::new(&mut self.iv);
        if let Err(e) = self.kind.sleep() {
            warn!("radio sleep failed: {}", e);
        }
        iv.set_antenna_switch(AntennaSwitch::Off);
        iv.set_tcxo(false);
        iv.set_irq_mask(0);
        self.state.slot.clear(sched);
        self.state.pending = None;
    }

    fn started<S: Scheduler>(
        &mut self,
        sched: &mut S,
        result: Result<(), RK::Error>,
    ) -> Result<(), Error<RK::Error>> {
        result.map_err(|e| {
            error!("radio start failed: {}", e);
            self.stop(sched);
            Error::Radio(e)
        })
    }

    fn guarded_airtime<S: Scheduler>(&self, bb: &BaseBandModulationParams, len: u8) -> Ticks {
        let airtime = us_to_ticks::<S>(self.kind.airtime_us(bb, len)) as u64;
        (airtime * AIRTIME_MARGIN_PERCENT / 100) as Ticks
    }
}

/// Longest frame prefix dumped by the tx debug log.
#[cfg(feature = "debug-tx")]
const TX_LOG_FRAME_LEN: usize = 80;

#[cfg(feature = "debug-tx")]
fn log_tx<M: MacSession>(session: &M) {
    let op = session.operation();
    let frame = session.frame();
    debug!(
        "TX[fcnt={},freq={},sf={},bw={},pow={},len={}{}]: {:02x}",
        op.fcnt_up,
        op.rf.frequency,
        op.rf.bb.sf.factor(),
        op.rf.bb.bw.hz() / 1000,
        op.tx_power,
        op.len,
        if op.adr_ack_req { ",ADRARQ" } else { "" },
        &frame[..frame.len().min(TX_LOG_FRAME_LEN)]
    );
}

#[cfg(not(feature = "debug-tx"))]
fn log_tx<M: MacSession>(_session: &M) {}

#[cfg(feature = "debug-rx")]
fn log_rx(op: &Operation, continuous: bool) {
    if continuous {
        debug!(
            "RXON_MODE[freq={},sf={},bw={}]",
            op.rf.frequency,
            op.rf.bb.sf.factor(),
            op.rf.bb.bw.hz() / 1000
        );
    } else {
        debug!(
            "RX_MODE[freq={},sf={},bw={},rxtime={}]",
            op.rf.frequency,
            op.rf.bb.sf.factor(),
            op.rf.bb.bw.hz() / 1000,
            op.rx_time
        );
    }
}

#[cfg(not(feature = "debug-rx"))]
fn log_rx(_op: &Operation, _continuous: bool) {}
