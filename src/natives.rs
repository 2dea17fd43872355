//! Host functions installed into the global scope before a program runs.

use chrono::Utc;
use log::debug;

use crate::callable::NativeFunction;
use crate::value::Value;

/// Milliseconds since the Unix epoch.
pub const CLOCK: NativeFunction = NativeFunction {
    name: "clock",
    arity: 0,
    func: clock,
};

fn clock(_args: &[Value]) -> Value {
    let millis = Utc::now().timestamp_millis();

    debug!("Native function 'clock' returned: {}", millis);

    Value::Number(millis as f64)
}

/// Everything the interpreter installs by default.
pub fn defaults() -> Vec<NativeFunction> {
    vec![CLOCK]
}
