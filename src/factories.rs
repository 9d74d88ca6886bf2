use std::sync::RwLock;

use lazy_static::lazy_static;

lazy_static! {
    static ref NUMBER: RwLock<u64> = RwLock::new(0);
}

/// Auto-incrementing request id used by the convenience builder macros
/// (`call!`, `publish!`, ...) when no id is supplied explicitly. This is a
/// test/demo convenience only — the protocol components (`Session`,
/// `Dealer`, `Broker`, `Joiner`) generate and track ids themselves via
/// [`crate::id`] and never call this.
pub fn increment() -> u64 {
    let previous = *NUMBER.read().unwrap();
    let mut num = NUMBER.write().unwrap();
    *num = previous + 1;
    *num
}
