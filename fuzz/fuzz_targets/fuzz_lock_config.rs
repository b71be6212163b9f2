#![no_main]

use applock_core::LockConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Settings files are user-editable; loading must not panic
    let Ok(config) = serde_json::from_slice::<LockConfig>(data) else {
        return;
    };

    if config.validate().is_ok() {
        assert!(config.max_attempts >= 1);

        let json = serde_json::to_vec(&config).unwrap();
        let reloaded: LockConfig = serde_json::from_slice(&json).unwrap();
        assert_eq!(reloaded.max_attempts, config.max_attempts);
        assert_eq!(reloaded.lock_shortcut, config.lock_shortcut);
        assert_eq!(reloaded.is_registered(), config.is_registered());
    }

    // Durations saturate instead of overflowing
    let _ = config.lockout_duration_ms();
    let _ = config.idle_timeout_ms();
});
