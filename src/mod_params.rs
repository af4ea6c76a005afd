pub use lora_modulation::{BaseBandModulationParams, Bandwidth, CodingRate, SpreadingFactor};

use crate::scheduler::Ticks;

/// Radio operation requested by the MAC layer through [`Radio::execute`](crate::Radio::execute).
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Quiesce the radio and cancel any outstanding operation.
    Stop,
    /// Transmit the session frame and wait for the tx done interrupt.
    Tx,
    /// Receive a single frame starting at the session rx time.
    Rx,
    /// Scan for frames starting now until explicitly stopped.
    RxContinuous,
    /// Unmodulated carrier until explicitly stopped.
    TxContinuousWave,
    /// Clear channel assessment.
    ClearChannelAssessment,
    /// Reset and calibrate the radio for the session frequency.
    Init,
    /// Unterminated modulated transmission, for test and calibration.
    TxContinuous,
    /// Channel activity detection, receiving if a preamble is found.
    ChannelActivityDetection,
}

/// Antenna switch position driven through the [`InterfaceVariant`](crate::InterfaceVariant).
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntennaSwitch {
    Off,
    Rx,
    Tx,
}

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfConfig {
    pub frequency: u32,
    pub bb: BaseBandModulationParams,
}

/// Parameters of the current MAC operation. Owned and updated by the MAC; read only here.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub rf: RfConfig,
    /// Output power in dBm.
    pub tx_power: i8,
    /// Length of the frame to transmit.
    pub len: u8,
    /// Start of the next single shot receive window.
    pub rx_time: Ticks,
    /// Uplink frame counter of the frame being sent.
    pub fcnt_up: u32,
    /// The pending uplink requests an ADR acknowledgement.
    pub adr_ack_req: bool,
}

impl Operation {
    pub fn new(rf: RfConfig) -> Self {
        Self { rf, tx_power: 14, len: 0, rx_time: 0, fcnt_up: 0, adr_ack_req: false }
    }
}
