#![no_main]

use std::time::Duration;

use applock_core::testing::RecordingHost;
use applock_core::{
    AttemptOutcome, ExpiryPolicy, LockConfig, LockController, ManualClock, PasscodeHasher,
};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    max_attempts: u8,
    lockout_seconds: u16,
    keep_attempts: bool,
    steps: Vec<(u16, bool)>,
}

fuzz_target!(|input: Input| {
    let config = LockConfig {
        max_attempts: u32::from(input.max_attempts.max(1)),
        lockout_duration_seconds: u64::from(input.lockout_seconds),
        expiry_policy: if input.keep_attempts {
            ExpiryPolicy::KeepAttempts
        } else {
            ExpiryPolicy::ResetAttempts
        },
        ..Default::default()
    };
    let max = config.max_attempts;

    let clock = ManualClock::new(1_700_000_000_000);
    let mut controller = LockController::new(config, RecordingHost::default(), clock.clone())
        .unwrap()
        .with_hasher(PasscodeHasher::insecure_fast());
    controller.register_passcode("1234", "1234").unwrap();

    for (pause, correct) in input.steps.into_iter().take(64) {
        clock.advance(Duration::from_secs(u64::from(pause)));
        let locked = controller.is_locked_out();
        let outcome = controller
            .evaluate_attempt(if correct { "1234" } else { "0000" })
            .unwrap();

        if locked {
            assert!(!outcome.is_accepted());
        } else if correct {
            assert_eq!(outcome, AttemptOutcome::Accepted);
            assert_eq!(controller.state().attempt_count(), 0);
        }
        if controller.state().lockout_expiry_ms().is_none() {
            assert!(controller.state().attempt_count() < max);
        }
    }
});
