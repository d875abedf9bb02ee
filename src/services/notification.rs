//! Notification service implementation
//!
//! This service owns the message templates for removal notices and turns a
//! template plus parameters into `RemovalNotification` records. It never
//! delivers anything; the caller stores or sends the records.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::models::{Carpool, Event, NotificationKind, RemovalNotification};
use crate::utils::errors::{CarpoolBuddyError, Result};
use crate::utils::helpers::generate_id;

pub const TEMPLATE_REMOVED_DRIVER: &str = "removed_driver";
pub const TEMPLATE_DRIVER_REMOVED: &str = "driver_removed";
pub const TEMPLATE_CARPOOL_DISBANDED: &str = "carpool_disbanded";
pub const TEMPLATE_DRIVER_NEEDED: &str = "driver_needed";

/// Message template structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub key: String,
    pub content: String,
}

/// Everything needed to render one notice
#[derive(Debug, Clone)]
pub struct NotificationRequest<'a> {
    pub kind: NotificationKind,
    pub template_key: &'a str,
    pub recipient: &'a str,
    pub parameters: HashMap<&'static str, String>,
}

/// Notification service for removal notices
#[derive(Debug, Clone)]
pub struct NotificationService {
    templates: HashMap<String, MessageTemplate>,
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    /// Create a new NotificationService with the default templates
    pub fn new() -> Self {
        Self {
            templates: Self::load_default_templates(),
        }
    }

    /// Build an unread notice for `carpool`/`event` stamped at `now`
    pub fn build(
        &self,
        request: NotificationRequest<'_>,
        carpool: &Carpool,
        event: &Event,
        now: DateTime<Utc>,
    ) -> Result<RemovalNotification> {
        let mut parameters = request.parameters;
        parameters.insert("carpool_name", carpool.name.clone());
        parameters.insert("event_name", event.name.clone());

        let message = self.format_message(request.template_key, &parameters)?;
        debug!(
            carpool_id = %carpool.id,
            recipient = request.recipient,
            kind = ?request.kind,
            "Built removal notification"
        );

        Ok(RemovalNotification {
            id: generate_id("notif"),
            kind: request.kind,
            carpool_id: carpool.id.clone(),
            event_id: event.id.clone(),
            recipient: request.recipient.to_string(),
            message,
            timestamp: now,
            read: false,
        })
    }

    /// Format message using template and parameters
    fn format_message(&self, template_key: &str, parameters: &HashMap<&'static str, String>) -> Result<String> {
        let template = self.templates.get(template_key)
            .ok_or_else(|| CarpoolBuddyError::InvalidInput(format!("Template not found: {}", template_key)))?;

        Ok(fill_placeholders(&template.content, parameters))
    }

    /// Add or replace a message template
    pub fn add_template(&mut self, template: MessageTemplate) {
        self.templates.insert(template.key.clone(), template);
    }

    /// Get available template keys
    pub fn get_template_keys(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    /// Load default message templates
    fn load_default_templates() -> HashMap<String, MessageTemplate> {
        let defaults = [
            (
                TEMPLATE_REMOVED_DRIVER,
                "You have been removed as a driver from the carpool \"{carpool_name}\" for {event_name}. Reason: {reason}",
            ),
            (
                TEMPLATE_DRIVER_REMOVED,
                "Driver {driver_name} has been removed from your carpool \"{carpool_name}\" for {event_name}. {driver_status}",
            ),
            (
                TEMPLATE_CARPOOL_DISBANDED,
                "The carpool \"{carpool_name}\" for {event_name} has been disbanded because the driver was removed. Reason: {reason}",
            ),
            (
                TEMPLATE_DRIVER_NEEDED,
                "URGENT: Your carpool \"{carpool_name}\" needs a new driver. Consider becoming a driver or finding alternative transportation.",
            ),
        ];

        defaults
            .into_iter()
            .map(|(key, content)| {
                (key.to_string(), MessageTemplate { key: key.to_string(), content: content.to_string() })
            })
            .collect()
    }
}

/// Substitute each `{key}` in `content` in a single left-to-right pass.
/// Substituted values are copied as-is and never scanned again; unknown keys
/// are left in place.
fn fill_placeholders(content: &str, parameters: &HashMap<&'static str, String>) -> String {
    let mut formatted = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(open) = rest.find('{') {
        formatted.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        match after_open.find('}') {
            Some(close) => {
                let key = &after_open[..close];
                match parameters.get(key) {
                    Some(value) => formatted.push_str(value),
                    None => {
                        formatted.push('{');
                        formatted.push_str(key);
                        formatted.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                formatted.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    formatted.push_str(rest);
    formatted
}
