//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                        |
//! |------------|---------------|------------------------------------|
//! | `hardware` | ButtonPort    | button GPIO (embedded-hal input)   |
//! |            | ActuatorPort  | relay + LED GPIO (embedded-hal)    |
//! |            | AnalogPort    | ESP32 ADC1 oneshot                 |
//! |            | PowerPort     | ESP-IDF light sleep                |
//! |            | ClockPort     | via `time`                         |
//! | `log_sink` | EventSink     | Serial log output                  |
//! | `time`     | ClockPort     | ESP32 system timer                 |

pub mod hardware;
pub mod log_sink;
pub mod time;
