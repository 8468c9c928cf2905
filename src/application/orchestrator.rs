//! Conversation orchestrator: the top-level state machine.
//!
//! One inbound message advances one session: the orchestrator classifies
//! the text (or resumes a flow already in progress), invokes the matching
//! handler, records the exchange, and returns the reply plus any computed
//! artifact (distance, cost band).
//!
//! FAQ and general intents are single-turn and never advance the flow
//! step. The move intent enters the linear slot-filling flow
//! (`AwaitingIntent` through the terminal `Estimating`); each subsequent
//! message fills one slot. Every turn, whatever branch ran, appends
//! exactly one user entry and one assistant entry to the session log.

use std::sync::Arc;

use crate::domain::foundation::{ChatId, DomainError};
use crate::domain::intent::{extract_route, Intent, IntentClassifier};
use crate::domain::pricing::{CostRange, PricingEngine};
use crate::domain::session::{FlowStep, MoveEstimateRequest, QueryType, UNKNOWN_FIELD};
use crate::ports::{ChatHistory, CompletionProvider, ConversationStore};

use super::distance_resolver::DistanceResolver;
use super::faq_matcher::FaqMatcher;

/// Session context keys. The slot keys double as the persisted move
/// record fields, so an estimate reads back what the flow wrote.
const KEY_CONTEXT: &str = "context";
const KEY_STEP: &str = "step";
const KEY_QUERY_TYPE: &str = "query_type";
const KEY_ORIGIN: &str = "origin";
const KEY_DESTINATION: &str = "destination";
const KEY_DISTANCE: &str = "distance";
const KEY_MOVE_DATE: &str = "move_date";
const KEY_MOVE_SIZE: &str = "move_size";
const KEY_SERVICES: &str = "additional_services";
const KEY_ESTIMATED_COST: &str = "estimated_cost";
const KEY_USERNAME: &str = "username";
const KEY_CONTACT_NO: &str = "contact_no";

/// Reply when an external provider fails on a conversational path.
const PROVIDER_APOLOGY: &str =
    "I'm sorry, I'm having trouble answering right now. Please try again in a moment.";

/// Reply when the distance cannot be resolved during estimation.
const DISTANCE_APOLOGY: &str =
    "I couldn't calculate the distance for that route. Please check the locations and try again.";

/// The outcome of one orchestrated turn.
#[derive(Debug, Clone, Default)]
pub struct ChatTurn {
    pub reply: String,
    pub distance_miles: Option<f64>,
    pub estimated_cost: Option<String>,
}

/// Top-level conversation state machine.
///
/// All collaborators are injected; the orchestrator holds no ambient
/// state of its own beyond what the store persists per session.
pub struct ConversationOrchestrator {
    store: Arc<dyn ConversationStore>,
    completion: Arc<dyn CompletionProvider>,
    classifier: IntentClassifier,
    faq: Arc<FaqMatcher>,
    distance: DistanceResolver,
    pricing: PricingEngine,
}

impl ConversationOrchestrator {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        completion: Arc<dyn CompletionProvider>,
        classifier: IntentClassifier,
        faq: Arc<FaqMatcher>,
        distance: DistanceResolver,
        pricing: PricingEngine,
    ) -> Self {
        Self {
            store,
            completion,
            classifier,
            faq,
            distance,
            pricing,
        }
    }

    /// Advances the session state machine by one user message.
    pub async fn handle_message(
        &self,
        chat_id: &ChatId,
        message: &str,
    ) -> Result<ChatTurn, DomainError> {
        self.store.ensure(chat_id).await?;

        let step = self.read_step(chat_id).await?;
        let mut turn = ChatTurn::default();

        let reply = match step {
            FlowStep::AwaitingIntent => self.start_flow(chat_id, message, &mut turn).await?,
            FlowStep::AwaitingOrigin => self.collect_origin(chat_id, message, &mut turn).await?,
            FlowStep::AwaitingDestination => {
                self.collect_destination(chat_id, message, &mut turn).await?
            }
            FlowStep::AwaitingDate => self.collect_date(chat_id, message).await?,
            FlowStep::AwaitingSize => self.collect_size(chat_id, message).await?,
            FlowStep::AwaitingServices => {
                self.collect_services(chat_id, message, &mut turn).await?
            }
            FlowStep::Estimating => self.terminal_reply(chat_id).await?,
        };

        self.store.append_turn(chat_id, message, &reply).await?;
        turn.reply = reply;
        Ok(turn)
    }

    /// General-chat exchange as a standalone request (wire route
    /// `/general_query`): context in, reply out, exchange recorded.
    pub async fn general_reply(
        &self,
        chat_id: &ChatId,
        message: &str,
    ) -> Result<String, DomainError> {
        self.store.ensure(chat_id).await?;
        let reply = self.general_exchange(chat_id, message).await?;
        self.store.append_turn(chat_id, message, &reply).await?;
        Ok(reply)
    }

    /// Single-turn FAQ lookup (wire route `/faq_query`). Provider
    /// failures propagate; the HTTP boundary decides the status.
    pub async fn faq_reply(&self, message: &str) -> Result<String, DomainError> {
        self.faq.answer(message).await
    }

    /// Validates and prices a complete estimate request (wire route
    /// `/estimate_cost`), persisting the result on the session.
    ///
    /// Fails fast on missing required fields before any provider call;
    /// an unresolvable distance is a hard failure here, unlike the
    /// best-effort resolution inside the flow.
    pub async fn estimate(
        &self,
        chat_id: &ChatId,
        request: MoveEstimateRequest,
    ) -> Result<(f64, CostRange), DomainError> {
        request.validate()?;

        let distance = self
            .distance
            .resolve(&request.origin, &request.destination)
            .await?;
        let range = self
            .pricing
            .estimate(distance, &request.move_size, &request.additional_services);

        self.store.ensure(chat_id).await?;
        self.store
            .record_move_details(chat_id, &request.into_details(Some(distance)), &range.to_string())
            .await?;

        Ok((distance, range))
    }

    /// Driving distance in miles (wire route `/calculate_distance`).
    pub async fn resolve_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<f64, DomainError> {
        self.distance.resolve(origin, destination).await
    }

    /// Session history; fails with `SessionNotFound` for an identifier
    /// that was never created.
    pub async fn history(&self, chat_id: &ChatId) -> Result<ChatHistory, DomainError> {
        Ok(self.store.get_history(chat_id).await?)
    }

    /// Explicit reset: returns the flow to `AwaitingIntent` and clears
    /// the accumulated slots. The turn log is append-only and stays.
    pub async fn reset(&self, chat_id: &ChatId) -> Result<(), DomainError> {
        self.store.ensure(chat_id).await?;
        self.write_step(chat_id, FlowStep::AwaitingIntent).await?;
        self.store
            .set_context(chat_id, KEY_QUERY_TYPE, QueryType::Unset.as_str())
            .await?;
        for key in [
            KEY_CONTEXT,
            KEY_ORIGIN,
            KEY_DESTINATION,
            KEY_DISTANCE,
            KEY_MOVE_DATE,
            KEY_MOVE_SIZE,
            KEY_SERVICES,
            KEY_ESTIMATED_COST,
        ] {
            self.store.set_context(chat_id, key, "").await?;
        }
        Ok(())
    }

    // ── AwaitingIntent ────────────────────────────────────────────────

    async fn start_flow(
        &self,
        chat_id: &ChatId,
        message: &str,
        turn: &mut ChatTurn,
    ) -> Result<String, DomainError> {
        match self.classifier.classify(message) {
            Intent::Faq => {
                self.store
                    .set_context(chat_id, KEY_QUERY_TYPE, QueryType::Faq.as_str())
                    .await?;
                match self.faq.answer(message).await {
                    Ok(answer) => Ok(answer),
                    Err(error) => {
                        tracing::warn!(%error, "FAQ lookup failed, apologizing");
                        Ok(PROVIDER_APOLOGY.to_string())
                    }
                }
            }
            Intent::General => {
                self.store
                    .set_context(chat_id, KEY_QUERY_TYPE, QueryType::General.as_str())
                    .await?;
                self.general_exchange(chat_id, message).await
            }
            Intent::Move => {
                self.store
                    .set_context(chat_id, KEY_QUERY_TYPE, QueryType::Move.as_str())
                    .await?;
                self.enter_move_flow(chat_id, message, turn).await
            }
        }
    }

    async fn enter_move_flow(
        &self,
        chat_id: &ChatId,
        message: &str,
        turn: &mut ChatTurn,
    ) -> Result<String, DomainError> {
        let route = extract_route(message);
        if let Some(ref origin) = route.origin {
            self.store.set_context(chat_id, KEY_ORIGIN, origin).await?;
        }
        if let Some(ref destination) = route.destination {
            self.store
                .set_context(chat_id, KEY_DESTINATION, destination)
                .await?;
        }

        match (route.origin, route.destination) {
            (Some(origin), Some(destination)) => {
                let miles = self
                    .try_resolve_distance(chat_id, &origin, &destination, turn)
                    .await?;
                self.write_step(chat_id, FlowStep::AwaitingDate).await?;
                Ok(match miles {
                    Some(miles) => format!(
                        "The distance from {} to {} is {} miles. {}",
                        origin,
                        destination,
                        miles,
                        FlowStep::AwaitingDate.prompt()
                    ),
                    None => format!(
                        "Got it - moving from {} to {}. {}",
                        origin,
                        destination,
                        FlowStep::AwaitingDate.prompt()
                    ),
                })
            }
            (Some(_), None) => {
                self.write_step(chat_id, FlowStep::AwaitingDestination).await?;
                Ok(FlowStep::AwaitingDestination.prompt().to_string())
            }
            (None, _) => {
                self.write_step(chat_id, FlowStep::AwaitingOrigin).await?;
                Ok(FlowStep::AwaitingOrigin.prompt().to_string())
            }
        }
    }

    // ── Origin / destination slots ────────────────────────────────────

    async fn collect_origin(
        &self,
        chat_id: &ChatId,
        message: &str,
        turn: &mut ChatTurn,
    ) -> Result<String, DomainError> {
        let origin = message.trim();
        if origin.is_empty() {
            return Ok("Please provide your starting location.".to_string());
        }
        self.store.set_context(chat_id, KEY_ORIGIN, origin).await?;

        if let Some(destination) = self.slot(chat_id, KEY_DESTINATION).await? {
            let miles = self
                .try_resolve_distance(chat_id, origin, &destination, turn)
                .await?;
            self.write_step(chat_id, FlowStep::AwaitingDate).await?;
            Ok(self.route_complete_reply(origin, &destination, miles))
        } else {
            self.write_step(chat_id, FlowStep::AwaitingDestination).await?;
            Ok(FlowStep::AwaitingDestination.prompt().to_string())
        }
    }

    async fn collect_destination(
        &self,
        chat_id: &ChatId,
        message: &str,
        turn: &mut ChatTurn,
    ) -> Result<String, DomainError> {
        let destination = message.trim();
        if destination.is_empty() {
            return Ok("Please provide your destination.".to_string());
        }
        self.store
            .set_context(chat_id, KEY_DESTINATION, destination)
            .await?;

        let miles = match self.slot(chat_id, KEY_ORIGIN).await? {
            Some(origin) => {
                self.try_resolve_distance(chat_id, &origin, destination, turn)
                    .await?
            }
            None => None,
        };
        self.write_step(chat_id, FlowStep::AwaitingDate).await?;
        Ok(match miles {
            Some(miles) => format!(
                "The distance to {} is {} miles. {}",
                destination,
                miles,
                FlowStep::AwaitingDate.prompt()
            ),
            None => FlowStep::AwaitingDate.prompt().to_string(),
        })
    }

    // ── Date / size / services slots ──────────────────────────────────

    async fn collect_date(&self, chat_id: &ChatId, message: &str) -> Result<String, DomainError> {
        let date = message.trim();
        if date.is_empty() {
            return Ok("Please tell me your moving date.".to_string());
        }
        self.store.set_context(chat_id, KEY_MOVE_DATE, date).await?;
        self.write_step(chat_id, FlowStep::AwaitingSize).await?;
        Ok(FlowStep::AwaitingSize.prompt().to_string())
    }

    async fn collect_size(&self, chat_id: &ChatId, message: &str) -> Result<String, DomainError> {
        let size = message.trim();
        if size.is_empty() {
            return Ok("Please tell me your move size.".to_string());
        }
        self.store.set_context(chat_id, KEY_MOVE_SIZE, size).await?;
        self.write_step(chat_id, FlowStep::AwaitingServices).await?;
        Ok(FlowStep::AwaitingServices.prompt().to_string())
    }

    async fn collect_services(
        &self,
        chat_id: &ChatId,
        message: &str,
        turn: &mut ChatTurn,
    ) -> Result<String, DomainError> {
        let services = parse_services(message);
        self.store
            .set_context(chat_id, KEY_SERVICES, &services.join(", "))
            .await?;
        self.write_step(chat_id, FlowStep::Estimating).await?;

        match self.estimate_from_slots(chat_id, services).await {
            Ok((distance, range)) => {
                let formatted = range.to_string();
                turn.distance_miles = Some(distance);
                turn.estimated_cost = Some(formatted.clone());
                Ok(format!(
                    "The estimated cost of your move is {}. Anything else I can help with?",
                    formatted
                ))
            }
            Err(error) if error.code.is_provider_failure() => {
                tracing::warn!(%error, "distance resolution failed during estimation");
                Ok(DISTANCE_APOLOGY.to_string())
            }
            Err(error) => Err(error),
        }
    }

    async fn terminal_reply(&self, chat_id: &ChatId) -> Result<String, DomainError> {
        Ok(match self.slot(chat_id, KEY_ESTIMATED_COST).await? {
            Some(cost) => format!(
                "Your estimated cost is {}. Reset the conversation to plan another move.",
                cost
            ),
            None => {
                "This move request is complete. Reset the conversation to start a new one."
                    .to_string()
            }
        })
    }

    // ── Shared helpers ────────────────────────────────────────────────

    /// Assembles the estimate request from accumulated slots and prices it.
    async fn estimate_from_slots(
        &self,
        chat_id: &ChatId,
        services: Vec<String>,
    ) -> Result<(f64, CostRange), DomainError> {
        let mut request = MoveEstimateRequest::new(
            self.slot(chat_id, KEY_ORIGIN).await?.unwrap_or_default(),
            self.slot(chat_id, KEY_DESTINATION).await?.unwrap_or_default(),
            self.slot(chat_id, KEY_MOVE_SIZE).await?.unwrap_or_default(),
        );
        request.additional_services = services;
        request.move_date = self
            .slot(chat_id, KEY_MOVE_DATE)
            .await?
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
        if let Some(username) = self.slot(chat_id, KEY_USERNAME).await? {
            request.username = username;
        }
        if let Some(contact_no) = self.slot(chat_id, KEY_CONTACT_NO).await? {
            request.contact_no = contact_no;
        }

        self.estimate(chat_id, request).await
    }

    /// Builds the general-chat prompt from accumulated context, completes
    /// it, and records the new context. Provider failure becomes a
    /// friendly apology rather than an error: the conversation goes on.
    async fn general_exchange(
        &self,
        chat_id: &ChatId,
        message: &str,
    ) -> Result<String, DomainError> {
        let combined = match self.slot(chat_id, KEY_CONTEXT).await? {
            Some(context) => format!("{}\nUser: {}", context, message),
            None => message.to_string(),
        };

        let reply = match self.completion.complete(&combined).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(%error, "completion provider failed, apologizing");
                PROVIDER_APOLOGY.to_string()
            }
        };

        self.store
            .set_context(
                chat_id,
                KEY_CONTEXT,
                &format!("{}\nAssistant: {}", combined, reply),
            )
            .await?;
        Ok(reply)
    }

    /// Best-effort distance resolution mid-flow: failure is surfaced in
    /// the reply wording but never blocks progression.
    async fn try_resolve_distance(
        &self,
        chat_id: &ChatId,
        origin: &str,
        destination: &str,
        turn: &mut ChatTurn,
    ) -> Result<Option<f64>, DomainError> {
        match self.distance.resolve(origin, destination).await {
            Ok(miles) => {
                self.store
                    .set_context(chat_id, KEY_DISTANCE, &miles.to_string())
                    .await?;
                turn.distance_miles = Some(miles);
                Ok(Some(miles))
            }
            Err(error) => {
                tracing::warn!(%error, origin, destination, "mid-flow distance lookup failed");
                Ok(None)
            }
        }
    }

    fn route_complete_reply(
        &self,
        origin: &str,
        destination: &str,
        miles: Option<f64>,
    ) -> String {
        match miles {
            Some(miles) => format!(
                "The distance from {} to {} is {} miles. {}",
                origin,
                destination,
                miles,
                FlowStep::AwaitingDate.prompt()
            ),
            None => FlowStep::AwaitingDate.prompt().to_string(),
        }
    }

    /// Reads a slot, treating an empty string as absent (reset writes
    /// empty strings to clear slots).
    async fn slot(&self, chat_id: &ChatId, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self
            .store
            .get_context(chat_id, key)
            .await?
            .filter(|v| !v.trim().is_empty()))
    }

    async fn read_step(&self, chat_id: &ChatId) -> Result<FlowStep, DomainError> {
        let ordinal = self
            .slot(chat_id, KEY_STEP)
            .await?
            .and_then(|raw| raw.parse::<u8>().ok())
            .unwrap_or(0);
        Ok(FlowStep::from_ordinal(ordinal))
    }

    async fn write_step(&self, chat_id: &ChatId, step: FlowStep) -> Result<(), DomainError> {
        Ok(self
            .store
            .set_context(chat_id, KEY_STEP, &step.ordinal().to_string())
            .await?)
    }
}

/// Splits a services utterance into normalized service names.
///
/// "packing and storage" and "Packing, Storage" both parse to the two
/// services; "none"/"no"/"nothing" mean no add-ons. Unknown names are
/// kept: they price at zero under the rate tables' zero-cost policy.
fn parse_services(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .flat_map(|chunk| chunk.split(" and "))
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && s != "none" && s != "no" && s != "nothing")
        .collect()
}
