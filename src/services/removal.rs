//! Driver removal service
//!
//! Decides whether an actor may remove a driver from a carpool, previews the
//! impact, and computes the resulting carpool (or its disbandment) together
//! with every notice the removal produces. All operations are pure functions
//! of their inputs: nothing is persisted or delivered here, and the caller
//! commits the returned snapshot.

use std::collections::HashMap;
use std::iter;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use tracing::{debug, error};
use crate::config::{RemovalConfig, Settings};
use crate::models::{
    Authority, Carpool, Event, EventUrgency, NotificationKind, Participant, RemovalImpact,
    RemovalNotification, RemovalRequest, RemovalRequestStatus, RemovalResult,
};
use crate::services::notification::{
    NotificationRequest, NotificationService, TEMPLATE_CARPOOL_DISBANDED, TEMPLATE_DRIVER_NEEDED,
    TEMPLATE_DRIVER_REMOVED, TEMPLATE_REMOVED_DRIVER,
};
use crate::utils::errors::{CarpoolBuddyError, Result};
use crate::utils::helpers::generate_id;
use crate::utils::logging::{log_authority_decision, log_removal_outcome};

pub const REASON_NO_PERMISSION: &str =
    "You do not have permission to remove participants from this carpool";
pub const REASON_ONLY_DRIVERS: &str = "Only drivers can be removed using this feature";
pub const REASON_SOLE_DRIVER_SELF_REMOVAL: &str =
    "You cannot remove yourself as the only driver. Transfer driving responsibility first or disband the carpool.";
pub const REASON_DRIVERS_REMOVE_SELF_ONLY: &str =
    "Drivers can only remove themselves. Contact the carpool or event organizer to remove other drivers.";
pub const REASON_UNKNOWN: &str = "Unknown authorization error";

pub const RESTRICTION_SELF_REMOVAL: &str =
    "As a driver, you can remove yourself but this may affect other passengers";

const STATUS_OTHER_DRIVERS: &str = "Other drivers are still available.";
const STATUS_NEW_DRIVER_NEEDED: &str = "A new driver is needed.";

/// Thresholds and disband behaviour applied by [`RemovalService`]
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalPolicy {
    pub imminent_window_hours: f64,
    pub emergency_window_hours: f64,
    /// When false, a carpool that loses its last driver but keeps passengers
    /// stays alive in the driver-needed state instead of being disbanded.
    pub disband_when_driverless: bool,
}

impl Default for RemovalPolicy {
    fn default() -> Self {
        Self::from(&RemovalConfig::default())
    }
}

impl From<&RemovalConfig> for RemovalPolicy {
    fn from(config: &RemovalConfig) -> Self {
        Self {
            imminent_window_hours: config.imminent_window_hours,
            emergency_window_hours: config.emergency_window_hours,
            disband_when_driverless: config.disband_when_driverless,
        }
    }
}

impl RemovalPolicy {
    pub fn urgency(&self, hours_until_event: f64) -> EventUrgency {
        if hours_until_event < self.emergency_window_hours {
            EventUrgency::Emergency
        } else if hours_until_event < self.imminent_window_hours {
            EventUrgency::Imminent
        } else {
            EventUrgency::Normal
        }
    }

    /// Advisory restriction texts for an event `hours_until_event` away.
    /// An emergency is always also imminent, so it carries both texts.
    pub fn time_restrictions(&self, hours_until_event: f64) -> Vec<String> {
        let imminent = format!(
            "Event is within {} hours - removal may significantly impact other participants",
            self.imminent_window_hours
        );
        let emergency = format!(
            "Event is within {} hours - emergency removal only",
            self.emergency_window_hours
        );

        match self.urgency(hours_until_event) {
            EventUrgency::Normal => Vec::new(),
            EventUrgency::Imminent => vec![imminent],
            EventUrgency::Emergency => vec![imminent, emergency],
        }
    }

    fn should_disband(&self, remaining: usize, remaining_drivers: usize) -> bool {
        remaining == 0 || (remaining_drivers == 0 && self.disband_when_driverless)
    }
}

/// How the actor relates to the carpool and its event
#[derive(Debug, Clone, Copy)]
struct ActorStanding {
    is_event_creator: bool,
    is_carpool_creator: bool,
    is_current_driver: bool,
}

impl ActorStanding {
    fn classify(actor: &str, carpool: &Carpool, event: &Event) -> Self {
        Self {
            is_event_creator: event.is_created_by(actor),
            is_carpool_creator: carpool.is_created_by(actor),
            is_current_driver: carpool.is_driver(actor),
        }
    }

    fn has_standing(self) -> bool {
        self.is_event_creator || self.is_carpool_creator || self.is_current_driver
    }
}

/// Driver removal service
#[derive(Debug, Clone, Default)]
pub struct RemovalService {
    policy: RemovalPolicy,
    notifications: NotificationService,
}

impl RemovalService {
    /// Create a new RemovalService from application settings
    pub fn new(settings: &Settings) -> Self {
        Self::with_policy(RemovalPolicy::from(&settings.removal))
    }

    pub fn with_policy(policy: RemovalPolicy) -> Self {
        Self {
            policy,
            notifications: NotificationService::new(),
        }
    }

    /// Use custom message templates for the produced notices
    pub fn with_notifications(mut self, notifications: NotificationService) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn policy(&self) -> &RemovalPolicy {
        &self.policy
    }

    /// Decide whether `actor` may remove `target` from `carpool`.
    ///
    /// Denials come first in a fixed order (no standing, passenger target,
    /// sole-driver self-removal); grants follow by role. `now` is the
    /// wall-clock time the event's date and time are compared against.
    pub fn evaluate_authority(
        &self,
        actor: &str,
        carpool: &Carpool,
        event: &Event,
        target: &Participant,
        now: NaiveDateTime,
    ) -> Authority {
        let authority = self.decide(actor, carpool, event, target, now);
        log_authority_decision(actor, &carpool.id, &target.id, &authority);
        authority
    }

    fn decide(
        &self,
        actor: &str,
        carpool: &Carpool,
        event: &Event,
        target: &Participant,
        now: NaiveDateTime,
    ) -> Authority {
        let standing = ActorStanding::classify(actor, carpool, event);
        let is_self_removal = target.email == actor;

        if !standing.has_standing() {
            return Authority::denied(REASON_NO_PERMISSION);
        }

        if !target.is_driver() {
            return Authority::denied(REASON_ONLY_DRIVERS);
        }

        if is_self_removal && carpool.driver_count() == 1 {
            return Authority::denied(REASON_SOLE_DRIVER_SELF_REMOVAL);
        }

        let restrictions = || self.policy.time_restrictions(event.hours_until_start(now));

        if standing.is_event_creator || standing.is_carpool_creator {
            return Authority::granted(restrictions());
        }

        if standing.is_current_driver {
            if !is_self_removal {
                return Authority::denied(REASON_DRIVERS_REMOVE_SELF_ONLY);
            }
            let mut restrictions = restrictions();
            restrictions.push(RESTRICTION_SELF_REMOVAL.to_string());
            return Authority::granted(restrictions);
        }

        error!(actor = actor, carpool_id = %carpool.id, "Actor with standing matched no authority rule");
        Authority::denied(REASON_UNKNOWN)
    }

    /// Preview what removing `target` would do
    pub fn assess_impact(
        &self,
        carpool: &Carpool,
        event: &Event,
        target: &Participant,
        now: NaiveDateTime,
    ) -> RemovalImpact {
        let remaining = carpool.participants.iter().filter(|p| p.id != target.id);
        let remaining_count = remaining.clone().count();
        let remaining_drivers = remaining.filter(|p| p.is_driver()).count();
        let hours_until_event = event.hours_until_start(now);

        RemovalImpact {
            remaining_drivers,
            affected_passengers: carpool.passengers().filter(|p| p.id != target.id).count(),
            will_disband: self.policy.should_disband(remaining_count, remaining_drivers),
            hours_until_event,
            urgency: self.policy.urgency(hours_until_event),
        }
    }

    /// Remove the participant `target_id` and compute every resulting notice.
    ///
    /// Authority is not re-checked; call [`Self::evaluate_authority`] first.
    /// Fails without producing anything when `target_id` is not a current
    /// participant.
    pub fn execute_removal(
        &self,
        carpool: &Carpool,
        event: &Event,
        target_id: &str,
        removed_by: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<RemovalResult> {
        let target = carpool.find_participant(target_id).ok_or_else(|| {
            CarpoolBuddyError::ParticipantNotFound {
                participant_id: target_id.to_string(),
                carpool_id: carpool.id.clone(),
            }
        })?;

        let remaining: Vec<Participant> = carpool
            .participants
            .iter()
            .filter(|p| p.id != target_id)
            .cloned()
            .collect();
        let remaining_drivers = remaining.iter().filter(|p| p.is_driver()).count();

        debug!(
            carpool_id = %carpool.id,
            target_id = target_id,
            remaining = remaining.len(),
            remaining_drivers = remaining_drivers,
            "Executing driver removal"
        );

        let result = if self.policy.should_disband(remaining.len(), remaining_drivers) {
            let notifications = remaining
                .iter()
                .map(|p| {
                    self.notice(
                        NotificationKind::CarpoolDisbanded,
                        TEMPLATE_CARPOOL_DISBANDED,
                        &p.email,
                        HashMap::from([("reason", reason.to_string())]),
                        carpool,
                        event,
                        now,
                    )
                })
                .collect::<Result<Vec<_>>>()?;

            RemovalResult {
                updated_carpool: None,
                notifications,
                disbanded: true,
            }
        } else {
            let notifications = self.removal_notices(carpool, event, target, &remaining, removed_by, reason, now)?;

            RemovalResult {
                updated_carpool: Some(Carpool {
                    participants: remaining,
                    ..carpool.clone()
                }),
                notifications,
                disbanded: false,
            }
        };

        log_removal_outcome(&carpool.id, removed_by, &result);
        Ok(result)
    }

    /// Notices for a removal that leaves the carpool alive: one to the removed
    /// driver, one to every remaining participant except the remover, and an
    /// urgent one to each passenger when nobody is left to drive.
    #[allow(clippy::too_many_arguments)]
    fn removal_notices(
        &self,
        carpool: &Carpool,
        event: &Event,
        target: &Participant,
        remaining: &[Participant],
        removed_by: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<RemovalNotification>> {
        let drivers_left = remaining.iter().any(|p| p.is_driver());
        let driver_status = if drivers_left { STATUS_OTHER_DRIVERS } else { STATUS_NEW_DRIVER_NEEDED };

        let to_target = iter::once(self.notice(
            NotificationKind::DriverRemoved,
            TEMPLATE_REMOVED_DRIVER,
            &target.email,
            HashMap::from([("reason", reason.to_string())]),
            carpool,
            event,
            now,
        ));

        let to_remaining = remaining.iter().filter(|p| p.email != removed_by).map(|p| {
            self.notice(
                NotificationKind::DriverRemoved,
                TEMPLATE_DRIVER_REMOVED,
                &p.email,
                HashMap::from([
                    ("driver_name", target.name.clone()),
                    ("driver_status", driver_status.to_string()),
                ]),
                carpool,
                event,
                now,
            )
        });

        let to_stranded = remaining
            .iter()
            .filter(|p| !drivers_left && !p.is_driver())
            .map(|p| {
                self.notice(
                    NotificationKind::DriverNeeded,
                    TEMPLATE_DRIVER_NEEDED,
                    &p.email,
                    HashMap::new(),
                    carpool,
                    event,
                    now,
                )
            });

        to_target.chain(to_remaining).chain(to_stranded).collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn notice(
        &self,
        kind: NotificationKind,
        template_key: &str,
        recipient: &str,
        parameters: HashMap<&'static str, String>,
        carpool: &Carpool,
        event: &Event,
        now: DateTime<Utc>,
    ) -> Result<RemovalNotification> {
        let request = NotificationRequest {
            kind,
            template_key,
            recipient,
            parameters,
        };
        self.notifications.build(request, carpool, event, now)
    }

    /// Record a pending request to remove a participant; approval is handled
    /// by the integrator
    pub fn create_removal_request(
        &self,
        carpool_id: &str,
        target_participant_id: &str,
        requested_by: &str,
        reason: &str,
        now: DateTime<Utc>,
    ) -> RemovalRequest {
        let request = RemovalRequest {
            id: generate_id("req"),
            carpool_id: carpool_id.to_string(),
            target_participant_id: target_participant_id.to_string(),
            requested_by: requested_by.to_string(),
            reason: reason.to_string(),
            timestamp: now,
            status: RemovalRequestStatus::Pending,
        };
        debug!(request_id = %request.id, carpool_id = carpool_id, "Created removal request");
        request
    }
}

/// Evaluate removal authority with the default policy against the local clock
pub fn evaluate_removal_authority(
    actor: &str,
    carpool: &Carpool,
    event: &Event,
    target: &Participant,
) -> Authority {
    RemovalService::default().evaluate_authority(actor, carpool, event, target, Local::now().naive_local())
}

/// Execute a driver removal with the default policy, stamped with the current time
pub fn execute_driver_removal(
    carpool: &Carpool,
    event: &Event,
    target_participant_id: &str,
    removed_by: &str,
    reason: &str,
) -> Result<RemovalResult> {
    RemovalService::default().execute_removal(carpool, event, target_participant_id, removed_by, reason, Utc::now())
}

/// Create a pending removal request stamped with the current time
pub fn create_removal_request(
    carpool_id: &str,
    target_participant_id: &str,
    requested_by: &str,
    reason: &str,
) -> RemovalRequest {
    RemovalService::default().create_removal_request(carpool_id, target_participant_id, requested_by, reason, Utc::now())
}
