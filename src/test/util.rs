use super::*;

pub type TestSession = Session<TestJob, 256>;

pub fn rf_sf7() -> RfConfig {
    RfConfig {
        frequency: 868_100_000,
        bb: BaseBandModulationParams::new(SpreadingFactor::_7, Bandwidth::_125KHz, CodingRate::_4_5),
    }
}

pub struct Harness {
    pub log: Log,
    pub radio: Radio<TestRadio, TestInterface>,
    pub sched: TestScheduler,
    pub session: TestSession,
}

impl Harness {
    pub fn execute(&mut self, mode: Mode) -> Result<(), Error<&'static str>> {
        self.radio.execute(mode, &mut self.sched, &self.session)
    }

    /// Raise a radio interrupt at the current time, as the DIO interrupt service routine would.
    pub fn irq(&mut self, mask: u8) {
        let now = self.sched.now;
        self.radio.irq_handler(mask, now, &mut self.sched);
    }

    /// Run due radio jobs, then drain the MAC job.
    pub fn run_due(&mut self) -> Option<TestJob> {
        while let Some(entry) = self.sched.take_radio() {
            if entry.protected {
                self.radio.get_interface().disable_irqs();
            }
            let TestJob::Radio(job) = entry.job else {
                panic!("non radio job in the radio slot");
            };
            self.radio.run(job, &mut self.sched, &mut self.session);
            assert_eq!(self.radio.get_interface().irq_depth, 0, "job left interrupts disabled");
        }
        self.sched.take_mac().map(|entry| entry.job)
    }

    pub fn advance_to(&mut self, t: Ticks) -> Option<TestJob> {
        self.sched.now = t;
        self.run_due()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&mut self) {
        self.log.borrow_mut().clear();
    }

    pub fn position(&self, call: Call) -> Option<usize> {
        self.log.borrow().iter().position(|c| *c == call)
    }

    pub fn last_position(&self, call: Call) -> Option<usize> {
        self.log.borrow().iter().rposition(|c| *c == call)
    }

    pub fn deadline(&self) -> Option<Ticks> {
        self.radio.state().slot().deadline()
    }

    pub fn is_quiescent(&mut self) -> bool {
        self.radio.state().is_quiescent()
            && self.sched.radio.is_none()
            && self.radio.get_interface().is_quiescent()
    }
}

pub fn setup() -> Harness {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let radio = Radio::new(TestRadio::new(log.clone()), TestInterface::new(log.clone()));
    let sched = TestScheduler::new(log.clone());
    let session = Session::new(Operation::new(rf_sf7()), TestJob::MacDone);
    Harness { log, radio, sched, session }
}

/// A harness with a 13 byte frame ready to send.
pub fn setup_with_frame() -> Harness {
    let mut harness = setup();
    harness.session.set_frame(&[0x40; 13]).unwrap();
    harness
}
