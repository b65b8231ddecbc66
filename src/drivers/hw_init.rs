//! One-shot hardware peripheral initialization and low-power glue.
//!
//! Configures the battery-sense ADC, the button interrupt and the
//! light-sleep wake source using raw ESP-IDF sys calls.  Digital outputs
//! are owned by `esp_idf_hal::gpio::PinDriver`s created in `main()`.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    SleepConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)     => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc)  => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc)  => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::SleepConfigFailed(rc) => write!(f, "light-sleep wake config failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

/// What ended a light-sleep period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeCause {
    Button,
    Other,
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the main-loop thread.  The handle is
/// created and deleted by `adc_power()` on the same thread.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: main-loop thread only; see adc1_handle().
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe {
        adc_oneshot_config_channel(adc1_handle(), pins::BATTERY_ADC_CHANNEL, &chan_cfg)
    };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH{}=battery)", pins::BATTERY_ADC_CHANNEL);
    Ok(())
}

/// Power the ADC unit up or down.  Idempotent.
#[cfg(target_os = "espidf")]
pub fn adc_power(enabled: bool) -> Result<(), HwInitError> {
    // SAFETY: main-loop thread only; see adc1_handle().
    unsafe {
        let powered = !adc1_handle().is_null();
        if enabled && !powered {
            init_adc()?;
        } else if !enabled && powered {
            let ret = adc_oneshot_del_unit(adc1_handle());
            ADC1_HANDLE = core::ptr::null_mut();
            if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }
            info!("hw_init: ADC1 powered down");
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn adc_power(enabled: bool) -> Result<(), HwInitError> {
    log::debug!("hw_init(sim): ADC power {}", if enabled { "on" } else { "off" });
    Ok(())
}

/// Read one raw sample; 0 when the unit is powered down or the read fails.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: main-loop thread only; see adc1_handle().
    unsafe {
        if adc1_handle().is_null() {
            return 0;
        }
        let ret = adc_oneshot_read(adc1_handle(), channel, &mut raw);
        if ret != ESP_OK as i32 {
            return 0;
        }
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── Button ISR ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(_arg: *mut core::ffi::c_void) {
    crate::wake::button_isr_handler();
}

/// Install the GPIO ISR service and register the button falling-edge
/// handler.  The pin must already be an input with pull-up.
#[cfg(target_os = "espidf")]
pub fn init_button_isr() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed.  The handler only touches atomics.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let ret = gpio_set_intr_type(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        let ret = gpio_isr_handler_add(pins::BUTTON_GPIO, Some(button_gpio_isr), core::ptr::null_mut());
        if ret != ESP_OK as i32 { return Err(HwInitError::IsrInstallFailed(ret)); }
        gpio_intr_enable(pins::BUTTON_GPIO);
    }
    info!("hw_init: button ISR installed (GPIO{} falling edge)", pins::BUTTON_GPIO);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_button_isr() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): button ISR skipped");
    Ok(())
}

// ── Light sleep ───────────────────────────────────────────────

/// Block in light sleep until the button line goes low.
///
/// The button interrupt is masked while the pin is level-triggered for
/// wake-up, otherwise a held button re-fires the ISR as soon as
/// interrupts come back.  Edge triggering and the interrupt enable are
/// restored on every exit path.
///
/// The edge that wakes the chip is consumed by the wake-up logic rather
/// than the ISR, so on a GPIO wake the ISR handler is invoked here to keep
/// the wake signal consistent.
#[cfg(target_os = "espidf")]
pub fn light_sleep_until_button() -> Result<WakeCause, HwInitError> {
    let mask_button_irq = |masked: bool| {
        // SAFETY: called from the main loop with no concurrent GPIO
        // reconfiguration.
        unsafe {
            if masked {
                gpio_intr_disable(pins::BUTTON_GPIO);
            } else {
                gpio_wakeup_disable(pins::BUTTON_GPIO);
                gpio_set_intr_type(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_NEGEDGE);
                gpio_intr_enable(pins::BUTTON_GPIO);
            }
        }
    };

    // SAFETY: the button interrupt is masked for the whole call.
    let cause = with_irq_masked(mask_button_irq, || unsafe { sleep_with_level_wake() })?;
    if cause == esp_sleep_source_t_ESP_SLEEP_WAKEUP_GPIO {
        crate::wake::button_isr_handler();
        Ok(WakeCause::Button)
    } else {
        Ok(WakeCause::Other)
    }
}

/// Run `body` with an interrupt masked and unmask it afterwards, whatever
/// `body` returns.
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
fn with_irq_masked<T>(mut set_masked: impl FnMut(bool), body: impl FnOnce() -> T) -> T {
    set_masked(true);
    let out = body();
    set_masked(false);
    out
}

/// Arm the LOW-level GPIO wake and sleep.  The button interrupt must be
/// disabled by the caller, who also restores the pin afterwards.
#[cfg(target_os = "espidf")]
unsafe fn sleep_with_level_wake() -> Result<esp_sleep_source_t, HwInitError> {
    let ret = unsafe { gpio_wakeup_enable(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_LOW_LEVEL) };
    if ret != ESP_OK as i32 { return Err(HwInitError::SleepConfigFailed(ret)); }
    let ret = unsafe { esp_sleep_enable_gpio_wakeup() };
    if ret != ESP_OK as i32 { return Err(HwInitError::SleepConfigFailed(ret)); }

    let ret = unsafe { esp_light_sleep_start() };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::SleepConfigFailed(ret));
    }
    Ok(unsafe { esp_sleep_get_wakeup_cause() })
}

#[cfg(not(target_os = "espidf"))]
pub fn light_sleep_until_button() -> Result<WakeCause, HwInitError> {
    log::debug!("hw_init(sim): light sleep skipped");
    Ok(WakeCause::Other)
}
