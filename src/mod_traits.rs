use crate::mod_params::*;
use crate::scheduler::Ticks;
use crate::session::MacSession;

/// Board and MCU facilities the radio core drives directly.
pub trait InterfaceVariant {
    /// Disable all interrupts. Calls nest; interrupts come back after the matching number of
    /// [`enable_irqs`](InterfaceVariant::enable_irqs).
    fn disable_irqs(&mut self);
    fn enable_irqs(&mut self);
    /// Unmask the radio DIO lines in `mask`, masking all others. Zero masks the radio entirely.
    fn set_irq_mask(&mut self, mask: u8);
    fn set_antenna_switch(&mut self, state: AntennaSwitch);
    /// Power the TCXO, on boards which have one.
    fn set_tcxo(&mut self, on: bool);
}

/// Result of interpreting a captured interrupt.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqStatus {
    /// The radio operation has finished; received data, if any, has been written to the session.
    Complete,
    /// More interrupts are expected, eg: a valid header preceding rx done. The interrupt job has
    /// replaced the timeout, so `rearm` should carry a fresh deadline unless the operation may
    /// wait indefinitely.
    Pending { rearm: Option<Ticks> },
}

/// A chip specific radio driver.
///
/// Start routines are handed the interface and the MAC session so they can switch the antenna,
/// unmask the DIO lines they expect and move the frame in or out of the chip.
pub trait RadioKind {
    #[cfg(feature = "defmt-03")]
    type Error: defmt::Format + core::fmt::Debug;

    #[cfg(not(feature = "defmt-03"))]
    type Error: core::fmt::Debug;

    /// Preamble length in symbols programmed for LoRa frames.
    const PREAMBLE_SYMBOLS: u8 = 8;

    fn sleep(&mut self) -> Result<(), Self::Error>;

    /// Reset the chip and, when `calibrate` is set, run image calibration for the session
    /// frequency.
    fn init<IV: InterfaceVariant, M: MacSession>(
        &mut self,
        iv: &mut IV,
        session: &M,
        calibrate: bool,
    ) -> Result<(), Self::Error>;

    fn start_tx<IV: InterfaceVariant, M: MacSession>(
        &mut self,
        iv: &mut IV,
        session: &M,
        continuous: bool,
    ) -> Result<(), Self::Error>;

    /// Single shot receive at the session rx time, or continuous scan starting now.
    fn start_rx<IV: InterfaceVariant, M: MacSession>(
        &mut self,
        iv: &mut IV,
        session: &M,
        continuous: bool,
    ) -> Result<(), Self::Error>;

    fn start_cw<IV: InterfaceVariant, M: MacSession>(
        &mut self,
        iv: &mut IV,
        session: &M,
    ) -> Result<(), Self::Error>;

    fn start_cca<IV: InterfaceVariant, M: MacSession>(
        &mut self,
        iv: &mut IV,
        session: &M,
    ) -> Result<(), Self::Error>;

    fn start_cad<IV: InterfaceVariant, M: MacSession>(
        &mut self,
        iv: &mut IV,
        session: &M,
    ) -> Result<(), Self::Error>;

    /// Decode the interrupt captured at `irq_time` with sources `mask`. Bus errors and
    /// unexpected status should be reported as pending; the timeout is the backstop.
    fn process_irq<IV: InterfaceVariant, M: MacSession>(
        &mut self,
        iv: &mut IV,
        session: &mut M,
        irq_time: Ticks,
        mask: u8,
    ) -> IrqStatus;

    /// Time on air of a `len` byte frame in microseconds.
    fn airtime_us(&self, bb: &BaseBandModulationParams, len: u8) -> u32 {
        bb.time_on_air_us(Some(Self::PREAMBLE_SYMBOLS), true, len)
    }
}
