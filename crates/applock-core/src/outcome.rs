//! Unlock attempt results

use std::fmt;

/// Result of evaluating one unlock attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Passcode matched; counter and lockout cleared
    Accepted,
    /// Attempt refused
    Rejected(Rejection),
}

impl AttemptOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AttemptOutcome::Accepted)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            AttemptOutcome::Accepted => None,
            AttemptOutcome::Rejected(rejection) => Some(*rejection),
        }
    }
}

/// Why an attempt was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Wrong passcode, more tries left
    Wrong { attempts_remaining: u32 },
    /// Refused without checking because a lockout is in force
    Lockout { seconds_remaining: u64 },
    /// Wrong passcode that used up the last try
    LockoutTriggered { seconds_remaining: u64 },
}

impl Rejection {
    /// Short machine-readable reason
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::Wrong { .. } => "wrong",
            Rejection::Lockout { .. } => "lockout",
            Rejection::LockoutTriggered { .. } => "lockout-triggered",
        }
    }

    /// Seconds until attempts are accepted again, for lockout rejections
    pub fn seconds_remaining(&self) -> Option<u64> {
        match self {
            Rejection::Wrong { .. } => None,
            Rejection::Lockout { seconds_remaining }
            | Rejection::LockoutTriggered { seconds_remaining } => Some(*seconds_remaining),
        }
    }

    /// Tries left before lockout, for wrong-passcode rejections
    pub fn attempts_remaining(&self) -> Option<u32> {
        match self {
            Rejection::Wrong { attempts_remaining } => Some(*attempts_remaining),
            _ => None,
        }
    }

    /// Whether this rejection is a lockout of either kind
    pub fn is_lockout(&self) -> bool {
        !matches!(self, Rejection::Wrong { .. })
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Wrong { attempts_remaining } => write!(
                f,
                "Incorrect passcode ({} attempt{} remaining)",
                attempts_remaining,
                if *attempts_remaining == 1 { "" } else { "s" }
            ),
            Rejection::Lockout { seconds_remaining } => write!(
                f,
                "Locked out - try again in {}",
                format_duration(*seconds_remaining)
            ),
            Rejection::LockoutTriggered { seconds_remaining } => write!(
                f,
                "Too many failed attempts - locked for {}",
                format_duration(*seconds_remaining)
            ),
        }
    }
}

/// Human-readable duration: "45 seconds", "5 minutes", "2 hours"
pub fn format_duration(secs: u64) -> String {
    let plural = |n: u64| if n == 1 { "" } else { "s" };
    if secs < 60 {
        format!("{} second{}", secs, plural(secs))
    } else if secs < 3600 && secs % 60 == 0 {
        format!("{} minute{}", secs / 60, plural(secs / 60))
    } else if secs < 3600 {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    } else {
        let hours = secs.div_ceil(3600);
        format!("{} hour{}", hours, plural(hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        assert_eq!(Rejection::Wrong { attempts_remaining: 1 }.reason(), "wrong");
        assert_eq!(Rejection::Lockout { seconds_remaining: 1 }.reason(), "lockout");
        assert_eq!(
            Rejection::LockoutTriggered { seconds_remaining: 1 }.reason(),
            "lockout-triggered"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Rejection::Wrong { attempts_remaining: 1 }.to_string(),
            "Incorrect passcode (1 attempt remaining)"
        );
        assert_eq!(
            Rejection::LockoutTriggered { seconds_remaining: 300 }.to_string(),
            "Too many failed attempts - locked for 5 minutes"
        );
        assert_eq!(
            Rejection::Lockout { seconds_remaining: 75 }.to_string(),
            "Locked out - try again in 01:15"
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1), "1 second");
        assert_eq!(format_duration(30), "30 seconds");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(3600), "1 hour");
        assert_eq!(format_duration(86400), "24 hours");
    }

    #[test]
    fn test_accessors() {
        let outcome = AttemptOutcome::Rejected(Rejection::Wrong { attempts_remaining: 2 });
        assert!(!outcome.is_accepted());
        let rejection = outcome.rejection().unwrap();
        assert_eq!(rejection.attempts_remaining(), Some(2));
        assert_eq!(rejection.seconds_remaining(), None);
        assert!(!rejection.is_lockout());
        assert!(AttemptOutcome::Accepted.rejection().is_none());
    }
}
