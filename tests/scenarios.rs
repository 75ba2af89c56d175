use async_trait::async_trait;
use retrochat::{
    AssistantGateway, ChatWidget, FAILURE_SENTINEL, GatewayError, Generation, KnowledgeBase,
    ModelBackend, NOT_FOUND_SENTINEL, Role, Theme, WidgetEvent, WidgetState,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Stand-in for the remote model used by every scenario
struct StubModel {
    reply: fn(&str, &str) -> Result<Generation, GatewayError>,
    instructions: Mutex<Vec<String>>,
}

impl StubModel {
    fn new(reply: fn(&str, &str) -> Result<Generation, GatewayError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            instructions: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ModelBackend for StubModel {
    async fn generate(
        &self,
        _model: &str,
        system_instruction: &str,
        content: &str,
    ) -> Result<Generation, GatewayError> {
        self.instructions
            .lock()
            .unwrap()
            .push(system_instruction.to_string());
        (self.reply)(system_instruction, content)
    }
}

fn portfolio() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::new(
        json!({
            "name": "Jia Song",
            "languages": ["French", "English", "Chinese"],
            "skills": {"ai": ["PyTorch"], "data": ["SQL", "Pandas"]}
        }),
        json!([
            {"title": "Particle Portfolio", "description": "Interactive particle field"},
            {"title": "Retro Monitor", "description": "CRT-styled project viewer"}
        ]),
    ))
}

fn open_widget(model: Arc<StubModel>) -> ChatWidget {
    let gateway = AssistantGateway::new(model, "gemini-2.5-flash", "Jia Song");
    let mut widget = ChatWidget::new(Arc::new(gateway), portfolio(), Theme::Green);
    widget.open();
    widget
}

#[tokio::test]
async fn languages_question_is_answered_verbatim() {
    let model = StubModel::new(|_, _| Ok(Generation::text("FRENCH, ENGLISH, CHINESE.")));
    let mut widget = open_widget(model);

    widget.set_draft("What languages does Jia know?");
    widget.submit().unwrap();
    assert_eq!(widget.state(), WidgetState::OpenPending);
    widget.settle().await;

    let last = widget.messages().last().unwrap();
    assert_eq!(last.role(), Role::Model);
    assert_eq!(last.text(), "FRENCH, ENGLISH, CHINESE.");
    assert!(!widget.is_pending());
    assert_eq!(widget.messages().len(), 3);
}

#[tokio::test]
async fn unknown_fact_yields_not_found_sentinel() {
    // Follows the persona rule: answer only from the archive
    let model = StubModel::new(|instruction, query| {
        let archive_mentions_mars = instruction
            .split("INSTRUCTIONS:")
            .next()
            .is_some_and(|head| head.contains("Mars"));
        if query.contains("Mars") && !archive_mentions_mars {
            Ok(Generation::text(NOT_FOUND_SENTINEL))
        } else {
            Ok(Generation::text("Retrieving records..."))
        }
    });
    let mut widget = open_widget(model);

    let reply = widget.ask("What is the capital of Mars?").await.unwrap();
    assert_eq!(reply.text(), NOT_FOUND_SENTINEL);
}

#[tokio::test]
async fn network_error_yields_failure_sentinel() {
    let model = StubModel::new(|_, _| {
        Err(GatewayError::Transport("connection reset by peer".to_string()))
    });
    let mut widget = open_widget(model);
    let before = widget.messages().len();

    widget.ask("Tell me about the Retro Monitor project").await.unwrap();

    assert_eq!(widget.messages().len(), before + 2);
    assert_eq!(widget.messages().last().unwrap().text(), FAILURE_SENTINEL);
    assert!(!widget.is_pending());
    assert!(
        widget
            .messages()
            .iter()
            .all(|m| !m.text().contains("connection reset"))
    );
}

#[tokio::test]
async fn context_does_not_grow_across_turns() {
    let model = StubModel::new(|_, _| Ok(Generation::text("ARCHIVE SWEEP COMPLETE.")));
    let mut widget = open_widget(model.clone());
    let blob = portfolio().serialize();

    widget.ask("first question").await.unwrap();
    widget.ask("second question").await.unwrap();
    widget.ask("third question").await.unwrap();

    let instructions = model.instructions.lock().unwrap();
    assert_eq!(instructions.len(), 3);
    for instruction in instructions.iter() {
        assert_eq!(instruction.matches(&blob).count(), 1);
        assert!(!instruction.contains("ARCHIVE SWEEP"));
    }
    assert_eq!(
        instructions[0].len() - "first".len(),
        instructions[2].len() - "third".len()
    );
}

#[tokio::test]
async fn view_is_told_to_scroll_after_each_append() {
    let model = StubModel::new(|_, _| Ok(Generation::text("ok")));
    let mut widget = open_widget(model);
    let mut events = widget.subscribe();

    widget.ask("ping").await.unwrap();

    let seen: Vec<WidgetEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    let scrolls = seen
        .iter()
        .filter(|e| **e == WidgetEvent::ScrollToLatest)
        .count();
    assert_eq!(scrolls, 2);
    assert!(seen.contains(&WidgetEvent::MessageAppended {
        index: 2,
        role: Role::Model
    }));
}
