use core::ops::{Deref, DerefMut};

use crate::mod_traits::InterfaceVariant;

/// Keeps interrupts disabled for as long as it lives.
///
/// Derefs to the wrapped interface so hardware can be driven from inside the critical section.
pub(crate) struct IrqGuard<'a, IV: InterfaceVariant> {
    iv: &'a mut IV,
}

impl<'a, IV: InterfaceVariant> IrqGuard<'a, IV> {
    pub(crate) fn new(iv: &'a mut IV) -> Self {
        iv.disable_irqs();
        Self { iv }
    }
}

impl<IV: InterfaceVariant> Deref for IrqGuard<'_, IV> {
    type Target = IV;

    fn deref(&self) -> &IV {
        self.iv
    }
}

impl<IV: InterfaceVariant> DerefMut for IrqGuard<'_, IV> {
    fn deref_mut(&mut self) -> &mut IV {
        self.iv
    }
}

impl<IV: InterfaceVariant> Drop for IrqGuard<'_, IV> {
    fn drop(&mut self) {
        self.iv.enable_irqs();
    }
}
