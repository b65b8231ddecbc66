//! Output drivers, button gesture logic and ESP-IDF peripheral glue.

pub mod button;
pub mod hw_init;
pub mod led_patterns;
pub mod relay;
pub mod status_led;
