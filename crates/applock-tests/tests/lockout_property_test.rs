//! Property tests for attempt counting and lockout
//!
//! Sequences of right and wrong attempts with arbitrary pauses, checked
//! against the counter and expiry the controller reports.

use std::time::Duration;

use applock_core::{
    testing::RecordingHost, AttemptOutcome, ExpiryPolicy, LockConfig, LockController,
    ManualClock, PasscodeHasher, Rejection,
};
use proptest::prelude::*;

const T0: u64 = 1_700_000_000_000;
const PASSCODE: &str = "1234";

fn registered(config: LockConfig) -> (LockController<RecordingHost, ManualClock>, ManualClock) {
    let clock = ManualClock::new(T0);
    let mut controller = LockController::new(config, RecordingHost::default(), clock.clone())
        .unwrap()
        .with_hasher(PasscodeHasher::insecure_fast());
    controller.register_passcode(PASSCODE, PASSCODE).unwrap();
    (controller, clock)
}

fn policy() -> impl Strategy<Value = ExpiryPolicy> {
    prop_oneof![
        Just(ExpiryPolicy::ResetAttempts),
        Just(ExpiryPolicy::KeepAttempts)
    ]
}

/// One step: an attempt after a pause
#[derive(Clone, Debug)]
struct Step {
    pause_secs: u64,
    correct: bool,
}

fn step() -> impl Strategy<Value = Step> {
    (0u64..120, any::<bool>()).prop_map(|(pause_secs, correct)| Step {
        pause_secs,
        correct,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Fewer than max wrong attempts never block the right passcode
    #[test]
    fn correct_before_max_resets_count(max in 1u32..8, seed in any::<u32>()) {
        let wrong = seed % max;
        let (mut controller, _) = registered(LockConfig {
            max_attempts: max,
            ..Default::default()
        });

        for i in 0..wrong {
            let outcome = controller.evaluate_attempt("0000").unwrap();
            prop_assert_eq!(
                outcome,
                AttemptOutcome::Rejected(Rejection::Wrong { attempts_remaining: max - i - 1 })
            );
        }
        prop_assert_eq!(controller.evaluate_attempt(PASSCODE).unwrap(), AttemptOutcome::Accepted);
        prop_assert_eq!(controller.state().attempt_count(), 0);
        prop_assert_eq!(controller.state().lockout_expiry_ms(), None);
    }

    /// Reaching max sets expiry to now plus the duration and blocks everything until then
    #[test]
    fn max_wrong_attempts_lock_out(
        max in 1u32..6,
        duration in 1u64..3600,
        before in 0u64..3600,
    ) {
        let (mut controller, clock) = registered(LockConfig {
            max_attempts: max,
            lockout_duration_seconds: duration,
            ..Default::default()
        });

        for _ in 0..max {
            controller.evaluate_attempt("0000").unwrap();
        }
        prop_assert_eq!(controller.state().lockout_expiry_ms(), Some(T0 + duration * 1000));

        let wait = before % duration;
        clock.advance(Duration::from_secs(wait));
        let outcome = controller.evaluate_attempt(PASSCODE).unwrap();
        prop_assert_eq!(
            outcome,
            AttemptOutcome::Rejected(Rejection::Lockout { seconds_remaining: duration - wait })
        );

        clock.advance(Duration::from_secs(duration - wait));
        prop_assert_eq!(controller.evaluate_attempt(PASSCODE).unwrap(), AttemptOutcome::Accepted);
    }

    /// Counter and expiry stay consistent across any sequence of attempts
    #[test]
    fn counter_and_expiry_consistent(
        max in 1u32..5,
        duration in 1u64..90,
        policy in policy(),
        steps in prop::collection::vec(step(), 1..24),
    ) {
        let (mut controller, clock) = registered(LockConfig {
            max_attempts: max,
            lockout_duration_seconds: duration,
            expiry_policy: policy,
            ..Default::default()
        });

        for step in steps {
            clock.advance(Duration::from_secs(step.pause_secs));
            let locked_before = controller.is_locked_out();
            let entered = if step.correct { PASSCODE } else { "0000" };
            let outcome = controller.evaluate_attempt(entered).unwrap();

            if locked_before {
                let refused = matches!(outcome, AttemptOutcome::Rejected(Rejection::Lockout { .. }));
                prop_assert!(refused, "expected lockout, got {:?}", outcome);
                continue;
            }

            match outcome {
                AttemptOutcome::Accepted => {
                    prop_assert!(step.correct);
                    prop_assert_eq!(controller.state().attempt_count(), 0);
                }
                AttemptOutcome::Rejected(Rejection::Wrong { attempts_remaining }) => {
                    prop_assert!(!step.correct);
                    prop_assert!(controller.state().attempt_count() < max);
                    prop_assert_eq!(attempts_remaining, max - controller.state().attempt_count());
                }
                AttemptOutcome::Rejected(Rejection::LockoutTriggered { seconds_remaining }) => {
                    prop_assert!(!step.correct);
                    prop_assert_eq!(seconds_remaining, duration);
                    prop_assert!(controller.state().attempt_count() >= max);
                    prop_assert!(controller.is_locked_out());
                }
                AttemptOutcome::Rejected(Rejection::Lockout { .. }) => {
                    prop_assert!(false, "lockout reported while unlocked");
                }
            }

            if controller.state().lockout_expiry_ms().is_none() {
                prop_assert!(controller.state().attempt_count() < max);
            }
        }
    }
}
