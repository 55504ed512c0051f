#[cfg(feature = "debug")]
use serde_json::json;

#[cfg(feature = "debug")]
thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

#[allow(unused)]
pub fn debug_vehicle(name: &str, index: usize, distance: f64, speed: f64, reaction_delay: u32) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "vehicle",
            "name": name,
            "index": index,
            "distance": distance,
            "speed": speed,
            "reaction_delay": reaction_delay,
        }))
    })
}

#[allow(unused)]
pub fn debug_light(name: &str, red: bool, yellow: bool, green: bool) {
    #[cfg(feature = "debug")]
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "light",
            "name": name,
            "lights": [red, yellow, green],
        }))
    })
}

/// Drains the records made on this thread since the last call.
#[cfg(feature = "debug")]
pub fn take_debug_records() -> Vec<serde_json::Value> {
    DEBUG_FRAME.with(|frame| frame.take())
}
