#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Radio control core of a LoRaWAN stack running on a cooperative job scheduler.
//!
//! [`Radio::execute`] quiesces the transceiver, starts the requested operation through a
//! [`RadioKind`] driver and arms a watchdog. The DIO interrupt calls [`Radio::irq_handler`],
//! which only captures the interrupt and posts a job; the job, run through [`Radio::run`], lets
//! the driver interpret it and hands completion to the MAC layer by posting the job registered
//! in its [`MacSession`]. When no interrupt arrives in time the watchdog forces the radio to
//! sleep and completes the operation with a data length of zero.
//!
//! The watchdog and the interrupt job share a single [`DeferredSlot`]: whichever was posted
//! last is the one that runs.
//!
//! ## Feature flags
#![doc = document_features::document_features!(feature_label = r#"<span class="stab portability"><code>{feature}</code></span>"#)]

mod fmt;

pub(crate) mod interface;
mod irq;
pub mod mod_params;
pub mod mod_traits;
mod radio;
pub mod scheduler;
pub mod session;
pub mod state;
mod timeout;


pub use mod_params::{AntennaSwitch, Mode, Operation, RfConfig};
pub use mod_traits::{InterfaceVariant, IrqStatus, RadioKind};
pub use radio::{
    Radio, AIRTIME_MARGIN_PERCENT, CAD_GUARD_MS, MAX_PAYLOAD_LEN, RX_GUARD_MS, TX_GUARD_MS,
};
pub use scheduler::{DeferredSlot, JobHandle, RadioJob, Scheduler, Ticks};
pub use session::{MacSession, Session};

#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// The radio driver failed to start the requested operation.
    Radio(E),
}
