use heapless::Vec;

use crate::mod_params::Operation;

/// The MAC layer state this core reads from and reports into.
///
/// `completion` is the job registered by the MAC for the operation in flight; the core posts it
/// exactly once per operation, either when the radio reports completion or when the watchdog
/// recovers. A data length of zero after completion signals failure.
pub trait MacSession {
    type Job: Copy;

    fn operation(&self) -> &Operation;

    /// Frame to transmit.
    fn frame(&self) -> &[u8];

    /// Buffer the driver writes a received frame to, at full capacity.
    fn frame_mut(&mut self) -> &mut [u8];

    fn set_data_len(&mut self, len: u8);

    fn completion(&self) -> Self::Job;
}

/// A [`MacSession`] backed by a fixed capacity frame buffer.
pub struct Session<J, const N: usize = 256> {
    op: Operation,
    frame: Vec<u8, N>,
    on_complete: J,
}

impl<J: Copy, const N: usize> Session<J, N> {
    pub fn new(op: Operation, on_complete: J) -> Self {
        Self { op, frame: Vec::new(), on_complete }
    }

    pub fn operation_mut(&mut self) -> &mut Operation {
        &mut self.op
    }

    /// Replace the frame to transmit. The operation length follows the frame.
    pub fn set_frame(&mut self, data: &[u8]) -> Result<(), ()> {
        if data.len() > N || data.len() > u8::MAX as usize {
            return Err(());
        }
        self.frame.clear();
        self.frame.extend_from_slice(data)?;
        self.op.len = data.len() as u8;
        Ok(())
    }

    /// Register the job to run when the next radio operation finishes.
    pub fn set_completion(&mut self, job: J) {
        self.on_complete = job;
    }

    pub fn data(&self) -> &[u8] {
        &self.frame
    }

    pub fn data_len(&self) -> usize {
        self.frame.len()
    }
}

impl<J: Copy, const N: usize> MacSession for Session<J, N> {
    type Job = J;

    fn operation(&self) -> &Operation {
        &self.op
    }

    fn frame(&self) -> &[u8] {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        // never exceeds capacity
        let _ = self.frame.resize_default(N);
        &mut self.frame
    }

    fn set_data_len(&mut self, len: u8) {
        let _ = self.frame.resize_default((len as usize).min(N));
    }

    fn completion(&self) -> J {
        self.on_complete
    }
}
