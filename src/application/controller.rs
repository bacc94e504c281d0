//! Conversation controller - the turn-taking orchestrator.
//!
//! Owns the transcript and the current stage for one conversation, and
//! sequences classification, generation/planning, normalization, and
//! transcript appends. One controller instance is driven by one caller at a
//! time; no internal locking is provided.

use std::sync::Arc;

use tracing::info;

use crate::domain::conversation::{
    normalize_agent_text, ConversationId, Message, MessageLog, PersonaConfig, Stage, StageRegistry,
};
use crate::domain::tools::ToolRegistry;
use crate::ports::CompletionModel;

use super::classifier::StageClassifier;
use super::errors::TurnError;
use super::generator::UtteranceGenerator;
use super::planner::ToolPlanner;

/// How agent turns are produced: a single generation call, or the bounded
/// plan/invoke loop. Selected once at construction, never at runtime.
enum TurnStrategy<P: ?Sized + CompletionModel> {
    Direct(UtteranceGenerator<P>),
    Tools(ToolPlanner<P>),
}

/// Top-level orchestrator for one scripted sales conversation.
pub struct ConversationController<P: ?Sized + CompletionModel> {
    id: ConversationId,
    persona: PersonaConfig,
    registry: StageRegistry,
    classifier: StageClassifier<P>,
    strategy: TurnStrategy<P>,
    transcript: MessageLog,
    current_stage_id: u32,
    initial_stage_id: u32,
}

impl<P: ?Sized + CompletionModel> ConversationController<P> {
    /// Creates a controller for plain (tool-free) turns.
    pub fn new(model: Arc<P>, persona: PersonaConfig, registry: StageRegistry) -> Self {
        let strategy = TurnStrategy::Direct(UtteranceGenerator::new(Arc::clone(&model)));
        Self::with_strategy(model, persona, registry, strategy)
    }

    /// Creates a controller whose turns run the plan/invoke loop over the
    /// given tool set.
    pub fn with_tools(
        model: Arc<P>,
        persona: PersonaConfig,
        registry: StageRegistry,
        tools: ToolRegistry,
    ) -> Self {
        let strategy = TurnStrategy::Tools(ToolPlanner::new(Arc::clone(&model), tools));
        Self::with_strategy(model, persona, registry, strategy)
    }

    fn with_strategy(
        model: Arc<P>,
        persona: PersonaConfig,
        registry: StageRegistry,
        strategy: TurnStrategy<P>,
    ) -> Self {
        let initial_stage_id = registry.first().id();
        Self {
            id: ConversationId::new(),
            persona,
            classifier: StageClassifier::new(model),
            strategy,
            transcript: MessageLog::new(),
            current_stage_id: initial_stage_id,
            initial_stage_id,
            registry,
        }
    }

    /// Sets the stage the conversation starts in (clamped through the
    /// registry). Applies to the current state and to every later `seed`.
    pub fn with_initial_stage(mut self, stage_id: u32) -> Self {
        self.initial_stage_id = self.registry.lookup(stage_id).id();
        self.current_stage_id = self.initial_stage_id;
        self
    }

    /// Overrides the plan/invoke iteration cap. No effect in direct mode.
    pub fn with_max_plan_steps(mut self, max_steps: u32) -> Self {
        self.strategy = match self.strategy {
            TurnStrategy::Tools(planner) => {
                TurnStrategy::Tools(planner.with_max_steps(max_steps))
            }
            direct => direct,
        };
        self
    }

    /// Resets the transcript to empty and the stage to the configured
    /// initial stage. Idempotent.
    pub fn seed(&mut self) {
        self.transcript.clear();
        self.current_stage_id = self.initial_stage_id;
        info!(conversation = %self.id, stage = self.current_stage_id, "conversation seeded");
    }

    /// Appends the user's text verbatim as a User message.
    ///
    /// No model call, no stage mutation.
    pub fn human_turn(&mut self, text: impl Into<String>) {
        self.transcript.append(Message::user(text));
    }

    /// Re-classifies the conversation stage from the transcript.
    ///
    /// A no-op returning the current stage while the transcript is empty.
    /// The classified id is clamped through the registry; an unparseable
    /// response holds the current stage (handled inside the classifier).
    ///
    /// # Errors
    ///
    /// - [`TurnError::Completion`] if the classification model call fails
    pub async fn determine_stage(&mut self) -> Result<&Stage, TurnError> {
        if self.transcript.is_empty() {
            return Ok(self.current_stage());
        }

        let current = self.registry.lookup(self.current_stage_id);
        let classified = self
            .classifier
            .classify(&self.transcript, current, &self.registry)
            .await?;
        let next_id = self.registry.lookup(classified).id();

        if next_id != self.current_stage_id {
            info!(
                conversation = %self.id,
                from = self.current_stage_id,
                to = next_id,
                "stage transition"
            );
        }
        self.current_stage_id = next_id;
        Ok(self.current_stage())
    }

    /// Runs one agent turn: generate (or plan with tools), normalize the
    /// agent prefix, append to the transcript, and return the message.
    ///
    /// The only operation that appends agent content; a failed turn leaves
    /// the transcript untouched.
    ///
    /// # Errors
    ///
    /// - [`TurnError`] on model failure, unknown tool, or iteration cap
    pub async fn step(&mut self) -> Result<Message, TurnError> {
        let stage = self.registry.lookup(self.current_stage_id);
        let raw = match &self.strategy {
            TurnStrategy::Direct(generator) => {
                generator
                    .generate(&self.persona, stage, &self.transcript)
                    .await?
            }
            TurnStrategy::Tools(planner) => {
                planner
                    .run_turn(&self.persona, stage, &self.transcript)
                    .await?
            }
        };

        let message = Message::agent(normalize_agent_text(&raw, &self.persona.agent_name));
        info!(
            conversation = %self.id,
            stage = self.current_stage_id,
            utterance = %message.text(),
            "agent turn"
        );
        self.transcript.append(message.clone());
        Ok(message)
    }

    /// Returns the conversation id.
    pub fn id(&self) -> ConversationId {
        self.id
    }

    /// Returns the current stage.
    pub fn current_stage(&self) -> &Stage {
        self.registry.lookup(self.current_stage_id)
    }

    /// Returns the persona this controller speaks as.
    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    /// Returns the transcript.
    pub fn transcript(&self) -> &MessageLog {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockProvider;
    use crate::domain::tools::Tool;

    fn direct_controller(model: Arc<MockProvider>) -> ConversationController<MockProvider> {
        ConversationController::new(model, PersonaConfig::default(), StageRegistry::default())
    }

    mod seeding {
        use super::*;

        #[tokio::test]
        async fn seed_resets_transcript_and_stage() {
            let model = Arc::new(MockProvider::new().with_response("3"));
            let mut controller = direct_controller(model);

            controller.human_turn("I need a new bed");
            controller.determine_stage().await.unwrap();
            assert_eq!(controller.current_stage().id(), 3);

            controller.seed();
            assert!(controller.transcript().is_empty());
            assert_eq!(controller.current_stage().id(), 1);
        }

        #[test]
        fn seed_is_idempotent() {
            let model = Arc::new(MockProvider::new());
            let mut controller = direct_controller(model);

            controller.seed();
            controller.seed();
            assert!(controller.transcript().is_empty());
            assert_eq!(controller.current_stage().id(), 1);
        }

        #[test]
        fn initial_stage_is_clamped_through_registry() {
            let model = Arc::new(MockProvider::new());
            let mut controller = direct_controller(model).with_initial_stage(42);

            controller.seed();
            assert_eq!(controller.current_stage().id(), 1);
        }

        #[test]
        fn configured_initial_stage_survives_seed() {
            let model = Arc::new(MockProvider::new());
            let mut controller = direct_controller(model).with_initial_stage(2);

            controller.seed();
            assert_eq!(controller.current_stage().id(), 2);
        }
    }

    mod human_turns {
        use super::*;

        #[test]
        fn appends_verbatim_user_message() {
            let model = Arc::new(MockProvider::new());
            let mut controller = direct_controller(model.clone());

            controller.human_turn("I need a new bed");

            let last = controller.transcript().last().unwrap();
            assert!(last.is_user());
            assert_eq!(last.text(), "I need a new bed");
            assert_eq!(model.call_count(), 0);
        }
    }

    mod stage_determination {
        use super::*;

        #[tokio::test]
        async fn empty_transcript_is_a_no_op() {
            let model = Arc::new(MockProvider::new().with_response("5"));
            let mut controller = direct_controller(model.clone());

            let stage = controller.determine_stage().await.unwrap();
            assert_eq!(stage.id(), 1);
            assert_eq!(model.call_count(), 0);
        }

        #[tokio::test]
        async fn updates_stage_from_classifier() {
            let model = Arc::new(MockProvider::new().with_response("3"));
            let mut controller = direct_controller(model);

            controller.human_turn("I need a new bed");
            let stage = controller.determine_stage().await.unwrap();

            assert_eq!(stage.id(), 3);
            assert_eq!(stage.name(), "Value Proposition");
            assert_eq!(controller.current_stage().id(), 3);
        }

        #[tokio::test]
        async fn out_of_range_stage_clamps_to_one() {
            let model = Arc::new(MockProvider::new().with_response("42"));
            let mut controller = direct_controller(model);

            controller.human_turn("hello");
            let stage = controller.determine_stage().await.unwrap();
            assert_eq!(stage.id(), 1);
        }

        #[tokio::test]
        async fn does_not_touch_transcript() {
            let model = Arc::new(MockProvider::new().with_response("2"));
            let mut controller = direct_controller(model);

            controller.human_turn("hello");
            controller.determine_stage().await.unwrap();

            assert_eq!(controller.transcript().len(), 1);
            assert!(controller.transcript().last().unwrap().is_user());
        }
    }

    mod stepping {
        use super::*;

        #[tokio::test]
        async fn appends_prefixed_agent_message() {
            let model = Arc::new(MockProvider::new().with_response("Hello, interested in a mattress?"));
            let mut controller = direct_controller(model);
            controller.seed();

            let message = controller.step().await.unwrap();

            assert_eq!(message.text(), "Ted Lasso: Hello, interested in a mattress?");
            let last = controller.transcript().last().unwrap();
            assert!(last.is_agent());
            assert_eq!(last.text(), "Ted Lasso: Hello, interested in a mattress?");
        }

        #[tokio::test]
        async fn echoed_prefix_is_not_duplicated() {
            let model = Arc::new(MockProvider::new().with_response("Ted Lasso: Good morning!"));
            let mut controller = direct_controller(model);

            let message = controller.step().await.unwrap();

            assert_eq!(message.text(), "Ted Lasso: Good morning!");
            assert_eq!(message.text().matches("Ted Lasso: ").count(), 1);
        }

        #[tokio::test]
        async fn model_failure_leaves_transcript_unchanged() {
            let model = Arc::new(MockProvider::new().with_unavailable("down"));
            let mut controller = direct_controller(model);
            controller.human_turn("hello");

            let result = controller.step().await;

            assert!(matches!(result, Err(TurnError::Completion(_))));
            assert_eq!(controller.transcript().len(), 1);
        }
    }

    mod tool_turns {
        use super::*;

        struct CatalogStub;

        impl Tool for CatalogStub {
            fn name(&self) -> &str {
                "product_search"
            }

            fn description(&self) -> &str {
                "Looks up products in the catalog."
            }

            fn invoke(&self, _input: &str) -> String {
                "Cloud Nine: a plush king-size mattress".to_string()
            }
        }

        fn tool_controller(model: Arc<MockProvider>) -> ConversationController<MockProvider> {
            let tools = ToolRegistry::new().with_tool(Arc::new(CatalogStub));
            ConversationController::with_tools(
                model,
                PersonaConfig::default(),
                StageRegistry::default(),
                tools,
            )
        }

        #[tokio::test]
        async fn tool_turn_appends_final_utterance() {
            let model = Arc::new(
                MockProvider::new()
                    .with_response("Action: product_search\nAction Input: plush")
                    .with_response("Ted Lasso: The Cloud Nine sounds right for you."),
            );
            let mut controller = tool_controller(model);

            let message = controller.step().await.unwrap();
            assert_eq!(
                message.text(),
                "Ted Lasso: The Cloud Nine sounds right for you."
            );
        }

        #[tokio::test]
        async fn unknown_tool_surfaces_fault_and_preserves_transcript() {
            let model = Arc::new(MockProvider::new().with_response("Action: teleport\nAction Input: x"));
            let mut controller = tool_controller(model);
            controller.human_turn("take me to the showroom");

            let result = controller.step().await;

            match result {
                Err(TurnError::ToolNotFound(name)) => assert_eq!(name, "teleport"),
                other => panic!("expected tool-not-found, got {other:?}"),
            }
            assert_eq!(controller.transcript().len(), 1);
            assert!(controller.transcript().last().unwrap().is_user());
        }

        #[tokio::test]
        async fn cap_overflow_surfaces_and_preserves_transcript() {
            let model = Arc::new(
                MockProvider::new()
                    .with_default_response("Action: product_search\nAction Input: again"),
            );
            let mut controller = tool_controller(model).with_max_plan_steps(2);
            controller.human_turn("anything plush?");

            let result = controller.step().await;

            assert!(matches!(
                result,
                Err(TurnError::IterationCapExceeded { cap: 2 })
            ));
            assert_eq!(controller.transcript().len(), 1);
        }
    }
}
