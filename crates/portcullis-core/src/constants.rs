//! Shared constants for line control.
//!
//! Node paths follow the sysfs GPIO layout (`/sys/class/gpio/gpioN/value`).
//! They are defaults only; deployments override them through
//! [`GpioConfig`](crate::GpioConfig).

// ============================================================================
// Control Nodes
// ============================================================================

/// Door lock relay.
pub const NODE_DOOR: &str = "/sys/class/gpio/gpio1/value";

/// Alarm siren.
pub const NODE_ALARM: &str = "/sys/class/gpio/gpio2/value";

/// White status light, used for the boot indication.
pub const NODE_LIGHT_WHITE: &str = "/sys/class/gpio/gpio3/value";

/// Green status light, used for a successful recognition.
pub const NODE_LIGHT_GREEN: &str = "/sys/class/gpio/gpio4/value";

/// Red status light, used for a failed recognition.
pub const NODE_LIGHT_RED: &str = "/sys/class/gpio/gpio5/value";

// ============================================================================
// Durations
// ============================================================================

/// Raw duration value marking an emergency control/cancel task.
///
/// # Examples
///
/// ```
/// use portcullis_core::constants::EMERGENCY_SENTINEL_MS;
/// use portcullis_core::Hold;
///
/// assert_eq!(Hold::from_millis(EMERGENCY_SENTINEL_MS).unwrap(), Hold::Sustained);
/// ```
pub const EMERGENCY_SENTINEL_MS: i64 = -1;

/// Default slice length (milliseconds) for timed waits.
///
/// Extensions and emergency preemption are noticed at most this long after
/// they happen.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Upper bound for the poll slice (milliseconds).
pub const MAX_POLL_INTERVAL_MS: u64 = 100;

/// How long the white light stays on after boot (milliseconds).
pub const DEFAULT_BOOT_LIGHT_MS: u64 = 5000;

/// Spacing between the flashes of recognition feedback (milliseconds).
pub const DEFAULT_FEEDBACK_PACE_MS: u64 = 200;

// ============================================================================
// Diagnostic Tags
// ============================================================================

pub const TAG_DOOR: &str = "door";
pub const TAG_ALARM: &str = "alarm";
pub const TAG_LIGHT_WHITE: &str = "light_white";
pub const TAG_LIGHT_GREEN: &str = "light_green";
pub const TAG_LIGHT_RED: &str = "light_red";
pub const TAG_FIRE_ALARM: &str = "fire_alarm";
pub const TAG_FIRE_DOOR: &str = "fire_door";
pub const TAG_FIRE_CANCEL: &str = "fire_cancel";

/// Tag attached to the auto-off write that ends a timed task.
pub const TAG_AUTO_OFF: &str = "auto_off";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_interval_within_bounds() {
        assert!(DEFAULT_POLL_INTERVAL_MS > 0);
        assert!(DEFAULT_POLL_INTERVAL_MS <= MAX_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_nodes_are_distinct() {
        let nodes = [
            NODE_DOOR,
            NODE_ALARM,
            NODE_LIGHT_WHITE,
            NODE_LIGHT_GREEN,
            NODE_LIGHT_RED,
        ];
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
