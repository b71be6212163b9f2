//! The lock controller
//!
//! Owns the lock state and drives prompt cycles through the host. All methods
//! take `&mut self`; the host calls them from its event loop.


use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::{ExpiryPolicy, LockConfig};
use crate::error::{ConfigError, LockError, Result, ValidationError};
use crate::event::LockEvent;
use crate::host::{ListenerId, LockHost, Severity};
use crate::idle::IdleMonitor;
use crate::outcome::{AttemptOutcome, Rejection};
use crate::passcode::{validate_new_passcode, PasscodeHasher};
use crate::prompt::{ActivePrompt, LockTrigger, PromptHandle, PromptKind};
use crate::shortcut::KeyCombo;
use crate::state::{LockState, LockoutStatus};

/// Passcode lock controller
pub struct LockController<H: LockHost, C: Clock = SystemClock> {
    config: LockConfig,
    state: LockState,
    prompt: Option<ActivePrompt>,
    idle: IdleMonitor,
    listener: Option<ListenerId>,
    hasher: PasscodeHasher,
    host: H,
    clock: C,
}

impl<H: LockHost> LockController<H, SystemClock> {
    /// Create a controller on the system clock
    pub fn with_system_clock(config: LockConfig, host: H) -> std::result::Result<Self, ConfigError> {
        Self::new(config, host, SystemClock)
    }
}

impl<H: LockHost, C: Clock> LockController<H, C> {
    /// Create a controller. State starts empty and no prompt is open.
    pub fn new(config: LockConfig, host: H, clock: C) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let idle = IdleMonitor::new(config.idle_timeout_ms(), clock.now_millis());

        Ok(Self {
            config,
            state: LockState::default(),
            prompt: None,
            idle,
            listener: None,
            hasher: PasscodeHasher::default(),
            host,
            clock,
        })
    }

    /// Use a custom hasher for newly registered passcodes
    pub fn with_hasher(mut self, hasher: PasscodeHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn state(&self) -> &LockState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The prompt currently open, if any
    pub fn active_prompt(&self) -> Option<ActivePrompt> {
        self.prompt
    }

    /// Whether a passcode has been registered
    pub fn is_registered(&self) -> bool {
        self.config.is_registered()
    }

    /// True iff a lockout is set and has not yet expired
    pub fn is_locked_out(&self) -> bool {
        self.state.is_locked_out(self.clock.now_millis())
    }

    /// Seconds left in the current lockout, rounded up
    pub fn lockout_remaining_seconds(&self) -> Option<u64> {
        match self.state.lockout_status(self.clock.now_millis()) {
            LockoutStatus::Active { remaining_ms } => Some(remaining_ms.div_ceil(1000)),
            _ => None,
        }
    }

    /// Wrong attempts left before lockout
    pub fn attempts_remaining(&self) -> u32 {
        self.config
            .max_attempts
            .saturating_sub(self.state.attempt_count())
    }

    // ----------------------------------------------------------------
    // Attempt evaluation
    // ----------------------------------------------------------------

    /// Evaluate one unlock attempt
    ///
    /// The empty string is a valid attempt that always fails. Errors are
    /// reserved for a missing or unreadable passcode.
    pub fn evaluate_attempt(&mut self, entered: &str) -> Result<AttemptOutcome> {
        let now = self.clock.now_millis();
        let passcode = self
            .config
            .passcode
            .as_ref()
            .ok_or(LockError::NotRegistered)?;

        match self.state.lockout_status(now) {
            LockoutStatus::Active { remaining_ms } => {
                let seconds_remaining = remaining_ms.div_ceil(1000);
                let event = LockEvent::AttemptDuringLockout {
                    seconds_remaining,
                    timestamp: timestamp(now),
                };
                warn!(target: "applock", "{}", event.to_audit_string());
                return Ok(AttemptOutcome::Rejected(Rejection::Lockout { seconds_remaining }));
            }
            LockoutStatus::Elapsed => {
                let attempts_reset = self.config.expiry_policy == ExpiryPolicy::ResetAttempts;
                if attempts_reset {
                    self.state.reset();
                }
                let event = LockEvent::LockoutElapsed {
                    attempts_reset,
                    timestamp: timestamp(now),
                };
                info!(target: "applock", "{}", event.to_audit_string());
            }
            LockoutStatus::Clear => {}
        }

        if passcode.verify(entered)? {
            self.state.reset();
            let event = LockEvent::Unlocked {
                timestamp: timestamp(now),
            };
            info!(target: "applock", "{}", event.to_audit_string());
            return Ok(AttemptOutcome::Accepted);
        }

        let attempt = self.state.record_failure();
        if attempt >= self.config.max_attempts {
            let duration_secs = self.config.lockout_duration_seconds;
            self.state
                .start_lockout(now.saturating_add(self.config.lockout_duration_ms()));
            let event = LockEvent::LockoutStarted {
                duration_secs,
                timestamp: timestamp(now),
            };
            warn!(target: "applock", "{}", event.to_audit_string());
            return Ok(AttemptOutcome::Rejected(Rejection::LockoutTriggered {
                seconds_remaining: duration_secs,
            }));
        }

        let attempts_remaining = self.config.max_attempts - attempt;
        let event = LockEvent::AttemptFailed {
            attempt,
            remaining: attempts_remaining,
            timestamp: timestamp(now),
        };
        warn!(target: "applock", "{}", event.to_audit_string());
        Ok(AttemptOutcome::Rejected(Rejection::Wrong { attempts_remaining }))
    }

    // ----------------------------------------------------------------
    // Passcode management
    // ----------------------------------------------------------------

    /// Store a new passcode after checking length and confirmation
    ///
    /// Resets the attempt counter and any lockout. A failed save is logged
    /// and reported to the user, but the passcode stays active in memory.
    pub fn register_passcode(&mut self, new: &str, confirm: &str) -> Result<()> {
        if !validate_new_passcode(new) {
            return Err(ValidationError::too_short().into());
        }
        if new != confirm {
            return Err(ValidationError::Mismatch.into());
        }

        let hash = self.hasher.hash(new)?;
        self.config.passcode = Some(hash);
        self.state.reset();
        self.persist_config();

        let event = LockEvent::PasscodeRegistered {
            timestamp: timestamp(self.clock.now_millis()),
        };
        info!(target: "applock", "{}", event.to_audit_string());
        Ok(())
    }

    /// Replace the passcode, verifying the current one first
    ///
    /// The current-passcode check counts toward lockout. Anything other than
    /// `Accepted` is returned unchanged and the passcode is kept.
    pub fn change_passcode(
        &mut self,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<AttemptOutcome> {
        if !validate_new_passcode(new) {
            return Err(ValidationError::too_short().into());
        }
        if new != confirm {
            return Err(ValidationError::Mismatch.into());
        }

        let outcome = self.evaluate_attempt(current)?;
        if outcome.is_accepted() {
            self.register_passcode(new, confirm)?;
        }
        Ok(outcome)
    }

    /// Remove the passcode; the next start shows registration
    pub fn clear_passcode(&mut self) {
        self.config.passcode = None;
        self.state.reset();
        self.persist_config();

        let event = LockEvent::PasscodeCleared {
            timestamp: timestamp(self.clock.now_millis()),
        };
        warn!(target: "applock", "{}", event.to_audit_string());
    }

    fn persist_config(&mut self) {
        if let Err(e) = self.host.save(&self.config) {
            warn!(target: "applock", "Failed to save config: {}", e);
            self.host.notify(
                "Settings not saved",
                &format!("The passcode is active for this session only: {}", e),
                Severity::Warning,
            );
        }
    }

    // ----------------------------------------------------------------
    // Prompt cycle
    // ----------------------------------------------------------------

    /// Open the registration or unlock prompt for `trigger`
    ///
    /// Returns `None` without side effects when a prompt is already open.
    pub fn present_prompt_cycle(&mut self, trigger: LockTrigger) -> Option<PromptHandle> {
        if !self.state.try_open_modal() {
            debug!(target: "applock", "Prompt already open, ignoring {} trigger", trigger);
            return None;
        }

        let kind = if self.is_registered() {
            PromptKind::Unlock
        } else {
            PromptKind::Registration
        };

        self.host.set_backdrop_blur(true);
        let handle = self.host.open_prompt(kind);
        self.prompt = Some(ActivePrompt {
            handle,
            kind,
            trigger,
        });

        let event = LockEvent::Locked {
            trigger,
            prompt: kind,
            timestamp: timestamp(self.clock.now_millis()),
        };
        info!(target: "applock", "{}", event.to_audit_string());
        Some(handle)
    }

    /// Lock now
    pub fn lock(&mut self) -> Option<PromptHandle> {
        self.present_prompt_cycle(LockTrigger::Manual)
    }

    /// Close the prompt on the host's request (window closed, Esc pressed)
    ///
    /// Returns false for a stale handle.
    pub fn dismiss_prompt(&mut self, handle: PromptHandle) -> bool {
        match self.prompt {
            Some(active) if active.handle == handle => {
                self.close_prompt();
                let event = LockEvent::PromptDismissed {
                    timestamp: timestamp(self.clock.now_millis()),
                };
                info!(target: "applock", "{}", event.to_audit_string());
                true
            }
            _ => {
                debug!(target: "applock", "Ignoring dismissal of stale prompt {:?}", handle);
                false
            }
        }
    }

    fn close_prompt(&mut self) {
        if let Some(active) = self.prompt.take() {
            self.host.close_prompt(active.handle);
            self.host.set_backdrop_blur(false);
            self.state.close_modal();
            self.idle.touch(self.clock.now_millis());
        }
    }

    /// Unlock form submission
    ///
    /// Evaluates the attempt, closes the unlock prompt on success and
    /// notifies the user either way.
    pub fn submit_unlock(&mut self, entered: &str) -> Result<AttemptOutcome> {
        let outcome = self.evaluate_attempt(entered)?;

        match outcome {
            AttemptOutcome::Accepted => {
                if matches!(self.prompt, Some(p) if p.kind == PromptKind::Unlock) {
                    self.close_prompt();
                }
                self.host.notify("Unlocked", "Welcome back", Severity::Success);
            }
            AttemptOutcome::Rejected(rejection) => {
                let (title, severity) = if rejection.is_lockout() {
                    ("Locked out", Severity::Error)
                } else {
                    ("Unlock failed", Severity::Warning)
                };
                self.host.notify(title, &rejection.to_string(), severity);
            }
        }

        Ok(outcome)
    }

    /// Registration form submission
    ///
    /// Validation errors are returned for inline display and do not close
    /// the prompt.
    pub fn submit_registration(&mut self, new: &str, confirm: &str) -> Result<()> {
        self.register_passcode(new, confirm)?;

        if matches!(self.prompt, Some(p) if p.kind == PromptKind::Registration) {
            self.close_prompt();
        }
        self.host.notify(
            "Passcode set",
            "You will need it to unlock the app",
            Severity::Success,
        );
        Ok(())
    }

    // ----------------------------------------------------------------
    // Triggers and lifecycle
    // ----------------------------------------------------------------

    /// Register the shortcut listener, arm the idle timer and show the
    /// first prompt if one is due
    pub fn start(&mut self) -> Option<PromptHandle> {
        if self.listener.is_none() {
            self.listener = Some(self.host.register(self.config.lock_shortcut));
        }
        self.idle.touch(self.clock.now_millis());

        if !self.is_registered() {
            self.present_prompt_cycle(LockTrigger::FirstRun)
        } else if self.config.lock_on_startup {
            self.present_prompt_cycle(LockTrigger::Startup)
        } else {
            None
        }
    }

    /// Unregister the shortcut listener
    pub fn stop(&mut self) {
        if let Some(id) = self.listener.take() {
            self.host.unregister(id);
        }
    }

    /// Whether `start` has run without a matching `stop`
    pub fn is_started(&self) -> bool {
        self.listener.is_some()
    }

    /// Key combination delivered by the host's global listener
    pub fn handle_shortcut(&mut self, combo: KeyCombo) -> Option<PromptHandle> {
        if !self.is_started() || combo != self.config.lock_shortcut {
            return None;
        }
        self.present_prompt_cycle(LockTrigger::Shortcut)
    }

    /// Record user activity outside a prompt
    pub fn record_activity(&mut self) {
        if self.prompt.is_none() {
            self.idle.touch(self.clock.now_millis());
        }
    }

    /// Check the idle timer; opens the unlock prompt when it fires
    ///
    /// Idle locking needs a registered passcode; before registration there
    /// is nothing to unlock with.
    pub fn poll_idle(&mut self) -> Option<PromptHandle> {
        if !self.is_started() || !self.is_registered() || self.prompt.is_some() {
            return None;
        }
        if self.idle.poll(self.clock.now_millis()) {
            self.present_prompt_cycle(LockTrigger::Idle)
        } else {
            None
        }
    }

    /// Milliseconds until the idle trigger fires, `None` if disabled
    pub fn idle_remaining_ms(&self) -> Option<u64> {
        self.idle.remaining_ms(self.clock.now_millis())
    }
}

impl<H: LockHost, C: Clock> Drop for LockController<H, C> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn timestamp(millis: u64) -> DateTime<Utc> {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}
