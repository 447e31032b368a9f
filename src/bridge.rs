//! Bridges external navigation events to in-app notifications.
//!
//! Each screen mounts one bridge for its own step. The bridge owns a
//! bus subscription scoped to the screen's visible lifetime: dropping
//! the bridge (on navigation or teardown) releases the subscription,
//! and events fired afterwards are lost rather than replayed.

use std::sync::Arc;

use chrono::{Local, TimeZone};

use crate::bus::{EventBus, NavigationEvent, Subscription};
use crate::notifications::{NotificationQueue, Severity};
use crate::workflow::WorkflowStep;

/// Local-only record of the last accepted cross-app navigation,
/// retained for display on the screen that accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    pub source_app_id: String,
    /// Event timestamp rendered as local wall-clock time.
    pub timestamp: String,
    pub referrer: String,
    pub action: String,
}

/// Per-screen consumer of the navigation event bus.
pub struct NavigationBridge {
    step: WorkflowStep,
    subscription: Subscription,
}

impl NavigationBridge {
    /// Subscribe on behalf of the screen for `step`. The subscription
    /// lives exactly as long as the returned bridge.
    pub fn mount(bus: &Arc<EventBus>, step: WorkflowStep) -> Self {
        tracing::debug!(step = step.label(), "navigation bridge mounted");
        Self {
            step,
            subscription: bus.subscribe(),
        }
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    /// Drain pending events. Events addressed to other routes are
    /// ignored without any state change; each matching event opens a
    /// fresh notification (last write wins). Returns the context record
    /// of the last accepted event, if any arrived this tick.
    pub fn poll(&mut self, notifications: &mut NotificationQueue) -> Option<NavigationContext> {
        let mut accepted = None;
        while let Some(event) = self.subscription.try_recv() {
            if event.route != self.step.path() {
                tracing::debug!(
                    route = %event.route,
                    screen = self.step.path(),
                    "ignoring navigation event for another route"
                );
                continue;
            }
            let context = self.accept(&event);
            notifications.show(
                format!("Navigated from {}", event.source_or_unknown()),
                Severity::Info,
            );
            accepted = Some(context);
        }
        accepted
    }

    fn accept(&self, event: &NavigationEvent) -> NavigationContext {
        tracing::info!(
            source = event.source_or_unknown(),
            route = %event.route,
            action = event.action_or_default(),
            "cross-app navigation accepted"
        );
        NavigationContext {
            source_app_id: event.source_or_unknown().to_string(),
            timestamp: format_local_time(event.timestamp),
            referrer: event.referrer_or_unknown().to_string(),
            action: event.action_or_default().to_string(),
        }
    }
}

/// Render an epoch-millis timestamp as local wall-clock time. Absent or
/// unrepresentable timestamps fall back to the current time rather than
/// failing.
fn format_local_time(epoch_millis: Option<i64>) -> String {
    let time = epoch_millis
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .unwrap_or_else(Local::now);
    time.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::NavigationData;

    fn loan_app_event(route: &str) -> NavigationEvent {
        NavigationEvent {
            source_app_id: Some("LoanApp".to_string()),
            route: route.to_string(),
            timestamp: Some(1_700_000_000_000),
            data: Some(NavigationData {
                referrer: Some("dashboard".to_string()),
                action: Some("JUMP".to_string()),
            }),
        }
    }

    #[test]
    fn test_matching_event_opens_info_notification() {
        let bus = EventBus::new();
        let mut bridge = NavigationBridge::mount(&bus, WorkflowStep::OperationalDocxScan);
        let mut notifications = NotificationQueue::new();

        bus.publish(&loan_app_event("/dscr-trend"));
        let context = bridge.poll(&mut notifications).expect("event accepted");

        assert!(notifications.is_open());
        assert_eq!(notifications.current().message, "Navigated from LoanApp");
        assert_eq!(notifications.current().severity, Severity::Info);
        assert_eq!(context.source_app_id, "LoanApp");
        assert_eq!(context.referrer, "dashboard");
        assert_eq!(context.action, "JUMP");
    }

    #[test]
    fn test_missing_source_defaults_to_unknown() {
        let bus = EventBus::new();
        let mut bridge = NavigationBridge::mount(&bus, WorkflowStep::OperationalDocxScan);
        let mut notifications = NotificationQueue::new();

        let mut event = loan_app_event("/dscr-trend");
        event.source_app_id = None;
        bus.publish(&event);

        let context = bridge.poll(&mut notifications).expect("event accepted");
        assert_eq!(notifications.current().message, "Navigated from unknown");
        assert_eq!(context.source_app_id, "unknown");
    }

    #[test]
    fn test_partial_event_defaults_rather_than_fails() {
        let bus = EventBus::new();
        let mut bridge = NavigationBridge::mount(&bus, WorkflowStep::CovenantMonitoring);
        let mut notifications = NotificationQueue::new();

        bus.publish(&NavigationEvent {
            source_app_id: None,
            route: "/covenant-monitoring".to_string(),
            timestamp: None,
            data: None,
        });

        let context = bridge.poll(&mut notifications).expect("event accepted");
        assert_eq!(context.referrer, "unknown");
        assert_eq!(context.action, "NAVIGATE");
        assert!(!context.timestamp.is_empty());
    }

    #[test]
    fn test_mismatched_route_is_ignored() {
        let bus = EventBus::new();
        let mut bridge = NavigationBridge::mount(&bus, WorkflowStep::Welcome);
        let mut notifications = NotificationQueue::new();

        bus.publish(&loan_app_event("/dscr-trend"));
        assert!(bridge.poll(&mut notifications).is_none());
        assert!(!notifications.is_open());
    }

    #[test]
    fn test_later_event_replaces_notification() {
        let bus = EventBus::new();
        let mut bridge = NavigationBridge::mount(&bus, WorkflowStep::OperationalDocxScan);
        let mut notifications = NotificationQueue::new();

        bus.publish(&loan_app_event("/dscr-trend"));
        let mut second = loan_app_event("/dscr-trend");
        second.source_app_id = Some("ReportApp".to_string());
        bus.publish(&second);

        let context = bridge.poll(&mut notifications).expect("events accepted");
        assert_eq!(notifications.current().message, "Navigated from ReportApp");
        assert_eq!(context.source_app_id, "ReportApp");
    }

    #[test]
    fn test_unmounted_bridge_receives_nothing() {
        let bus = EventBus::new();
        let bridge = NavigationBridge::mount(&bus, WorkflowStep::OperationalDocxScan);
        drop(bridge);

        assert_eq!(bus.publish(&loan_app_event("/dscr-trend")), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_format_local_time_accepts_known_timestamp() {
        let formatted = format_local_time(Some(1_700_000_000_000));
        // HH:MM:SS shape; the wall-clock value depends on the local zone.
        assert_eq!(formatted.len(), 8);
        assert_eq!(formatted.as_bytes()[2], b':');
        assert_eq!(formatted.as_bytes()[5], b':');
    }
}
