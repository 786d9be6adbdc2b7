//! Dialogue engine
//!
//! Drives the turn-taking protocol over the fixed questionnaire: speak a
//! prompt, capture an answer, validate it, and either advance or re-ask in
//! place. On the final answer the engine computes the affordability
//! estimate, speaks it, and selects budget-nearest inventory matches.
//!
//! `step` only moves forward. A rejected answer self-loops without touching
//! `step` or `answers`, so the invariant "every question before `step` has a
//! normalized answer" holds throughout. No transition leaves `Finished`; a
//! new conversation requires a fresh engine instance.

use crate::afford::monthly_payment;
use crate::questions::{PAYMENT_PREFIX, QUESTIONS};
use crate::validate::{AnswerValidator, RETRY_GENERIC};
use carvoice_core::{
    Car, ConversationState, DialoguePhase, Error, Inventory, ListenOptions, Question,
    ResponseStore, Result, ValidationResult, VoiceIo,
};
use carvoice_core::traits::AnswerRecord;
use carvoice_nlu::QueryTranslator;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// How many matches the engine surfaces when the interview finishes
const MATCH_LIMIT: usize = 5;

/// Budget assumed when no usable budget answer exists
const DEFAULT_BUDGET: f64 = 30_000.0;

/// Outcome of processing one user turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Answer accepted; the next question was asked
    Asked { step: usize, key: &'static str },
    /// Answer rejected; the same question was re-asked
    Retry { retry_prompt: String },
    /// Interview complete; estimate computed and matches selected
    Finished { monthly_payment: f64 },
    /// The conversation had already finished
    AlreadyFinished,
}

/// Slot-filling dialogue engine; one instance serves one conversation
pub struct DialogueEngine {
    session_id: Uuid,
    questions: &'static [Question],
    validator: AnswerValidator,
    translator: QueryTranslator,
    voice: Arc<dyn VoiceIo>,
    store: Arc<dyn ResponseStore>,
    inventory: Arc<dyn Inventory>,
    state: ConversationState,
    listen_timeout: Duration,
    payment: Option<f64>,
    matches: Vec<Car>,
}

impl DialogueEngine {
    /// Create an engine over its collaborators
    pub fn new(
        voice: Arc<dyn VoiceIo>,
        store: Arc<dyn ResponseStore>,
        inventory: Arc<dyn Inventory>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, capabilities = ?voice.capabilities(), "New conversation");

        Self {
            session_id,
            questions: QUESTIONS,
            validator: AnswerValidator::new(),
            translator: QueryTranslator::new(),
            voice,
            store,
            inventory,
            state: ConversationState::default(),
            listen_timeout: ListenOptions::default().timeout,
            payment: None,
            matches: Vec::new(),
        }
    }

    /// Override the capture timeout
    pub fn with_listen_timeout(mut self, timeout: Duration) -> Self {
        self.listen_timeout = timeout;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn phase(&self) -> DialoguePhase {
        self.state.phase(self.questions.len())
    }

    /// Monthly payment estimate, available once finished
    pub fn monthly_payment(&self) -> Option<f64> {
        self.payment
    }

    /// Budget-nearest matches, available once finished
    pub fn matches(&self) -> &[Car] {
        &self.matches
    }

    /// Begin the interview: `Idle --start--> Asking(1)`
    pub async fn start(&mut self) -> Result<()> {
        if self.state.step != 0 {
            tracing::debug!(step = self.state.step, "start() ignored; already started");
            return Ok(());
        }

        self.state.step = 1;
        let first = &self.questions[0];
        self.voice.preload(first.prompt).await;
        self.voice.preload(PAYMENT_PREFIX).await;
        self.say(first.prompt).await
    }

    /// One full turn: capture a reply and process it
    ///
    /// From `Idle` this starts the conversation instead of capturing, so a
    /// single entry point can drive the whole interview.
    pub async fn run_turn(&mut self) -> Result<TurnOutcome> {
        match self.phase() {
            DialoguePhase::Idle => {
                self.start().await?;
                return Ok(TurnOutcome::Asked {
                    step: 1,
                    key: self.questions[0].key,
                });
            }
            DialoguePhase::Finished => return Ok(TurnOutcome::AlreadyFinished),
            DialoguePhase::Asking(_) => {}
        }

        self.state.listening = true;
        let captured = self
            .voice
            .listen(ListenOptions {
                timeout: self.listen_timeout,
            })
            .await;
        self.state.listening = false;

        let text = captured?;
        self.handle_utterance(&text).await
    }

    /// Validate one raw transcript and advance or re-ask
    ///
    /// Empty input (including capture timeouts) takes the retry path. The
    /// rejected raw text is surfaced through `last_user_utterance` but is
    /// never stored in `answers`.
    pub async fn handle_utterance(&mut self, text: &str) -> Result<TurnOutcome> {
        let step = match self.phase() {
            DialoguePhase::Idle => {
                return Err(Error::other("conversation not started; call start() first"))
            }
            DialoguePhase::Finished => return Ok(TurnOutcome::AlreadyFinished),
            DialoguePhase::Asking(step) => step,
        };

        let question = &self.questions[step - 1];
        let raw = text.trim();
        self.state.last_user_utterance = if raw.is_empty() {
            "(no response)".to_string()
        } else {
            raw.to_string()
        };

        let validation = if raw.is_empty() {
            ValidationResult::rejected(RETRY_GENERIC)
        } else {
            self.validator.validate(question.key, raw)
        };

        let value = match validation {
            ValidationResult::Rejected { retry_prompt } => {
                tracing::debug!(key = question.key, raw, "Answer rejected");
                self.say(&retry_prompt).await?;
                return Ok(TurnOutcome::Retry { retry_prompt });
            }
            ValidationResult::Accepted(value) => value,
        };

        tracing::info!(key = question.key, value = %value, "Answer accepted");
        self.state.answers.set(question.key, value.clone());

        // Logging is best-effort; a store failure never costs the step.
        let record = AnswerRecord::now(question.key, question.prompt, value);
        if let Err(err) = self.store.append(&record).await {
            tracing::warn!(error = %err, "Failed to log accepted answer");
        }

        if step < self.questions.len() {
            self.state.step = step + 1;
            let next = &self.questions[step];
            self.voice.preload(next.prompt).await;
            self.say(next.prompt).await?;
            Ok(TurnOutcome::Asked {
                step: step + 1,
                key: next.key,
            })
        } else {
            self.finish().await
        }
    }

    /// Entry into `Finished`: estimate, speak, and select matches
    async fn finish(&mut self) -> Result<TurnOutcome> {
        self.state.step = self.questions.len() + 1;

        let budget = self.state.answers.number_or("totalBudget", 0.0);
        let down = self.state.answers.number_or("downPayment", 0.0);
        let rate = self.state.answers.number_or("interestRate", 0.0);
        let term = self.state.answers.number_or("loanTerm", 60.0).round().max(0.0) as u32;

        let principal = (budget - down).max(0.0);
        let monthly = monthly_payment(principal, rate, term);
        self.payment = Some(monthly);
        tracing::info!(principal, rate, term, monthly, "Affordability computed");

        self.say(&format!("{} ${}", PAYMENT_PREFIX, monthly.round() as i64))
            .await?;
        self.say("Based on your responses, here are a few options:")
            .await?;

        self.refresh_matches().await?;
        self.say("I found a few options you might like — see the list below.")
            .await?;

        Ok(TurnOutcome::Finished {
            monthly_payment: monthly,
        })
    }

    /// Recompute budget-nearest matches from the inventory collaborator
    ///
    /// Callable again after an upstream failure; the `Finished` state and
    /// the estimate survive the error.
    pub async fn refresh_matches(&mut self) -> Result<()> {
        let mut budget = self.state.answers.number_or("totalBudget", 0.0);
        if budget <= 0.0 {
            budget = DEFAULT_BUDGET;
        }

        let cars = self.inventory.all().await?;
        self.matches = budget_nearest(cars, budget, MATCH_LIMIT);
        Ok(())
    }

    /// Cars whose standard-financing estimate fits the computed payment
    ///
    /// Empty until the interview finishes; uses the collaborator's
    /// near-miss fill, so short results are padded deterministically.
    pub async fn monthly_matches(&self, limit: usize) -> Result<Vec<Car>> {
        let Some(monthly) = self.payment else {
            return Ok(Vec::new());
        };
        self.inventory.query_by_monthly(monthly, limit).await
    }

    /// Translate free text into a filter and run it against the inventory
    pub async fn free_text_search(&self, text: &str) -> Result<Vec<Car>> {
        let filter = self.translator.translate(text);
        let cars = self.inventory.all().await?;
        Ok(cars.into_iter().filter(|car| filter.matches(car)).collect())
    }

    /// Tear the session down, truncating the response log
    pub async fn end_session(&self) -> Result<()> {
        self.store.clear().await
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.state.last_assistant_utterance = text.to_string();
        self.state.speaking = true;
        let result = self.voice.speak(text).await;
        self.state.speaking = false;
        result
    }
}

/// Select up to `limit` cars closest to the budget
///
/// Cars at or below the budget are preferred; when none qualify, the
/// cheapest stand in. Ties sort stably, so the selection is deterministic
/// for a fixed inventory and budget.
pub fn budget_nearest(cars: Vec<Car>, budget: f64, limit: usize) -> Vec<Car> {
    let affordable: Vec<Car> = cars
        .iter()
        .filter(|car| car.price <= budget)
        .cloned()
        .collect();

    let mut picks = if affordable.is_empty() {
        let mut cheapest = cars;
        cheapest.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
        cheapest.truncate(limit);
        cheapest
    } else {
        affordable
    };

    picks.sort_by(|a, b| {
        let da = (a.price - budget).abs();
        let db = (b.price - budget).abs();
        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
    });
    picks.truncate(limit);
    picks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(model: &str, price: f64) -> Car {
        Car {
            id: None,
            model: model.to_string(),
            year: None,
            price,
            body_type: None,
            fuel_type: None,
            colors: vec![],
            seats: None,
            monthly_estimate: None,
            image: None,
        }
    }

    #[test]
    fn test_budget_nearest_prefers_affordable() {
        let cars = vec![
            car("Corolla", 21000.0),
            car("Camry", 26000.0),
            car("RAV4", 28000.0),
            car("Highlander", 38000.0),
        ];
        let picks = budget_nearest(cars, 27000.0, 5);
        let models: Vec<&str> = picks.iter().map(|c| c.model.as_str()).collect();
        // 26000 is nearest to the budget, then 21000; 28000 and 38000 are
        // over budget and excluded because affordable cars exist.
        assert_eq!(models, vec!["Camry", "Corolla"]);
    }

    #[test]
    fn test_budget_nearest_falls_back_to_cheapest() {
        let cars = vec![
            car("Tundra", 46000.0),
            car("Highlander", 38000.0),
            car("Sienna", 36000.0),
        ];
        let picks = budget_nearest(cars, 10000.0, 5);
        let models: Vec<&str> = picks.iter().map(|c| c.model.as_str()).collect();
        // Nothing is affordable; the cheapest stand in, nearest first.
        assert_eq!(models, vec!["Sienna", "Highlander", "Tundra"]);
    }

    #[test]
    fn test_budget_nearest_limit() {
        let cars = (0..10).map(|i| car(&format!("M{i}"), 1000.0 * (i + 1) as f64)).collect();
        let picks = budget_nearest(cars, 20000.0, 5);
        assert_eq!(picks.len(), 5);
        // Closest to 20000 first: 10000, 9000, 8000, ...
        assert_eq!(picks[0].price, 10000.0);
    }

    #[test]
    fn test_budget_nearest_is_deterministic_on_ties() {
        let cars = vec![car("A", 25000.0), car("B", 25000.0), car("C", 20000.0)];
        let first = budget_nearest(cars.clone(), 25000.0, 5);
        let second = budget_nearest(cars, 25000.0, 5);
        let names: Vec<&str> = first.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(first, second);
    }
}
