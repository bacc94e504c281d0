//! Integration tests for the full conversation loop.
//!
//! These tests drive the controller the way the CLI does:
//! 1. `seed` the conversation and let the agent open with `step`
//! 2. Append user input with `human_turn`
//! 3. Re-classify the stage with `determine_stage`
//! 4. Produce the reply with `step`
//!
//! Uses the mock provider so no external model is called.

use std::io::Write as _;
use std::sync::Arc;

use tempfile::NamedTempFile;

use pitchline::adapters::ai::MockProvider;
use pitchline::adapters::catalog::{FileCatalog, ProductSearchTool};
use pitchline::application::{ConversationController, TurnError};
use pitchline::domain::conversation::{PersonaConfig, StageRegistry};
use pitchline::domain::tools::ToolRegistry;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn direct_controller(model: Arc<MockProvider>) -> ConversationController<MockProvider> {
    ConversationController::new(model, PersonaConfig::default(), StageRegistry::default())
}

fn catalog_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        b"Cloud Nine\nA plush king-size mattress with cooling gel foam.\n\n\
          Firm Foundation\nAn extra-firm queen mattress for back sleepers.\n",
    )
    .unwrap();
    file
}

fn tool_controller(model: Arc<MockProvider>) -> ConversationController<MockProvider> {
    let file = catalog_file();
    let catalog = Arc::new(FileCatalog::load(file.path()).unwrap());
    let tools = ToolRegistry::new().with_tool(Arc::new(ProductSearchTool::new(catalog)));
    ConversationController::with_tools(
        model,
        PersonaConfig::default(),
        StageRegistry::default(),
        tools,
    )
}

// =============================================================================
// Plain conversation flow
// =============================================================================

#[tokio::test]
async fn scripted_conversation_advances_stage_and_transcript() {
    let model = Arc::new(
        MockProvider::new()
            // Opening step.
            .with_response("Hello, interested in a mattress?")
            // Stage classification after the first user turn.
            .with_response("3")
            // Reply in the new stage.
            .with_response("Ted Lasso: Our mattresses pay for themselves in sleep."),
    );
    let mut controller = direct_controller(model.clone());
    controller.seed();

    let opening = controller.step().await.unwrap();
    assert_eq!(opening.text(), "Ted Lasso: Hello, interested in a mattress?");

    controller.human_turn("I need a new bed");
    let stage = controller.determine_stage().await.unwrap();
    assert_eq!(stage.id(), 3);
    assert_eq!(stage.name(), "Value Proposition");

    let reply = controller.step().await.unwrap();
    assert_eq!(
        reply.text(),
        "Ted Lasso: Our mattresses pay for themselves in sleep."
    );

    assert_eq!(
        controller.transcript().render(),
        "Ted Lasso: Hello, interested in a mattress?\n\
         User: I need a new bed\n\
         Ted Lasso: Our mattresses pay for themselves in sleep."
    );
    assert_eq!(model.call_count(), 3);
}

#[tokio::test]
async fn reseeding_starts_a_fresh_conversation() {
    let model = Arc::new(MockProvider::new().with_response("4").with_default_response("Hi."));
    let mut controller = direct_controller(model);
    controller.seed();

    controller.human_turn("tell me about pillows");
    controller.determine_stage().await.unwrap();
    assert_eq!(controller.current_stage().id(), 4);

    controller.seed();
    assert!(controller.transcript().is_empty());
    assert_eq!(controller.current_stage().id(), 1);
}

#[tokio::test]
async fn unparseable_stage_response_keeps_the_conversation_going() {
    let model = Arc::new(
        MockProvider::new()
            .with_response("2")
            .with_response("hard to say, could be qualification?")
            .with_default_response("Still here."),
    );
    let mut controller = direct_controller(model);
    controller.seed();

    controller.human_turn("hello");
    controller.determine_stage().await.unwrap();
    assert_eq!(controller.current_stage().id(), 2);

    controller.human_turn("hmm");
    let stage = controller.determine_stage().await.unwrap();
    // Garbage classification holds the current stage instead of failing.
    assert_eq!(stage.id(), 2);

    let reply = controller.step().await.unwrap();
    assert_eq!(reply.text(), "Ted Lasso: Still here.");
}

#[tokio::test]
async fn echoed_prefixes_never_stack_up() {
    let model = Arc::new(
        MockProvider::new()
            .with_response("Ted Lasso: Ted Lasso: Welcome back!")
            .with_response("1")
            .with_response("Ted Lasso: Sleep tight."),
    );
    let mut controller = direct_controller(model);
    controller.seed();

    controller.step().await.unwrap();
    controller.human_turn("thanks");
    controller.determine_stage().await.unwrap();
    controller.step().await.unwrap();

    for message in controller.transcript().messages() {
        if message.is_agent() {
            assert_eq!(message.text().matches("Ted Lasso: ").count(), 1);
        }
    }
}

// =============================================================================
// Tool-using conversation flow
// =============================================================================

#[tokio::test]
async fn tool_turn_feeds_catalog_observation_back_into_planning() {
    let model = Arc::new(
        MockProvider::new()
            .with_response("Action: product_search\nAction Input: \"cooling gel\"")
            .with_response("Ted Lasso: The Cloud Nine keeps you cool all night."),
    );
    let mut controller = tool_controller(model.clone());
    controller.seed();
    controller.human_turn("I overheat at night");

    let reply = controller.step().await.unwrap();
    assert_eq!(
        reply.text(),
        "Ted Lasso: The Cloud Nine keeps you cool all night."
    );

    // The second planning prompt carried the catalog observation.
    let second_prompt = &model.calls()[1];
    assert!(second_prompt.contains("Action: product_search"));
    assert!(second_prompt.contains("Cloud Nine: A plush king-size mattress"));

    assert_eq!(
        controller.transcript().render(),
        "User: I overheat at night\n\
         Ted Lasso: The Cloud Nine keeps you cool all night."
    );
}

#[tokio::test]
async fn unknown_tool_aborts_the_turn_without_partial_append() {
    let model = Arc::new(MockProvider::new().with_response("Action: teleport\nAction Input: x"));
    let mut controller = tool_controller(model);
    controller.seed();
    controller.human_turn("take me there");

    let result = controller.step().await;

    match result {
        Err(TurnError::ToolNotFound(name)) => assert_eq!(name, "teleport"),
        other => panic!("expected tool-not-found, got {other:?}"),
    }
    assert_eq!(controller.transcript().render(), "User: take me there");
}

#[tokio::test]
async fn runaway_planning_is_cut_off_at_the_cap() {
    let model = Arc::new(
        MockProvider::new().with_default_response("Action: product_search\nAction Input: more"),
    );
    let mut controller = tool_controller(model.clone()).with_max_plan_steps(5);
    controller.seed();
    controller.human_turn("show me everything");

    let result = controller.step().await;

    assert!(matches!(
        result,
        Err(TurnError::IterationCapExceeded { cap: 5 })
    ));
    assert_eq!(model.call_count(), 5);
    assert_eq!(controller.transcript().len(), 1);
}
