//! Flash Messages
//!
//! One process-wide slot for short notifications. Showing a message replaces
//! the previous one and restarts the auto-clear timer.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn alert_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert alert-success text-center flash-alert",
            Severity::Info => "alert alert-info text-center flash-alert",
            Severity::Warning => "alert alert-warning text-center flash-alert",
            Severity::Danger => "alert alert-danger text-center flash-alert",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashMessage {
    pub text: String,
    pub severity: Severity,
    pub expires_at: DateTime<Utc>,
}

/// The single slot. Each `show` bumps the generation so that a timer started
/// for an older message cannot clear a newer one.
#[derive(Debug, Default)]
pub struct FlashSlot {
    message: Option<FlashMessage>,
    generation: u64,
}

impl FlashSlot {
    pub fn show(&mut self, text: impl Into<String>, severity: Severity, ttl: Duration) -> u64 {
        self.generation += 1;
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::zero());
        self.message = Some(FlashMessage {
            text: text.into(),
            severity,
            expires_at: Utc::now() + ttl,
        });
        self.generation
    }

    /// Clear only if `generation` is still the latest message
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.message.is_none() {
            return false;
        }
        self.message = None;
        true
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn current(&self) -> Option<&FlashMessage> {
        self.message.as_ref()
    }
}

/// Reactive flash channel, provided through `AppContext`
#[derive(Clone, Copy)]
pub struct FlashChannel {
    slot: RwSignal<FlashSlot>,
    ttl: Duration,
}

impl FlashChannel {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwSignal::new(FlashSlot::default()),
            ttl,
        }
    }

    pub fn show(&self, text: impl Into<String>, severity: Severity) {
        let ttl = self.ttl;
        let Some(generation) = self.slot.try_update(|s| s.show(text, severity, ttl)) else {
            return;
        };
        let slot = self.slot;
        let millis = u32::try_from(ttl.as_millis()).unwrap_or(u32::MAX);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            // The owner may be gone by the time the timer fires
            let _ = slot.try_update(|s| s.expire(generation));
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text, Severity::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text, Severity::Danger);
    }

    pub fn clear(&self) {
        self.slot.update(|s| s.clear());
    }

    pub fn current(&self) -> Option<FlashMessage> {
        self.slot.with(|s| s.current().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3);

    #[test]
    fn test_second_message_replaces_first() {
        let mut slot = FlashSlot::default();
        let first = slot.show("Donation added to cart", Severity::Success, TTL);
        let second = slot.show("Login successful!", Severity::Info, TTL);

        let current = slot.current().unwrap();
        assert_eq!(current.text, "Login successful!");
        assert_eq!(current.severity, Severity::Info);

        // The first message's timer fires: the second stays visible
        assert!(!slot.expire(first));
        assert_eq!(slot.current().unwrap().text, "Login successful!");

        assert!(slot.expire(second));
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_clear_hides_immediately() {
        let mut slot = FlashSlot::default();
        let generation = slot.show("Registration failed", Severity::Danger, TTL);
        slot.clear();
        assert!(slot.current().is_none());
        assert!(!slot.expire(generation));
    }

    #[test]
    fn test_expiry_timestamp_uses_ttl() {
        let mut slot = FlashSlot::default();
        let before = Utc::now();
        slot.show("x", Severity::Warning, TTL);
        let expires_at = slot.current().unwrap().expires_at;
        assert!(expires_at >= before + TimeDelta::seconds(3));
    }
}
