//! Integration tests for the agent system
//!
//! These drive the real agent loop, session store and tool registry with a
//! scripted provider and a fake Docker runner. Tests that need a Docker
//! daemon are marked #[ignore].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use vaultdock::agent::{
    AgentConfig, AgentController, AgentService, ContainerSubject, EventKind, InvestigationOutcome,
    InvestigationRequest, InvestigationSummary, RecordedEvent, SessionStatus, SessionStore,
    Subscription,
};
use vaultdock::docker::{CommandOutput, CommandRunner, RunnerError, SystemRunner};
use vaultdock::providers::{NormalizedResponse, ProviderAdapter, ProviderError, ToolCall, ToolResult};
use vaultdock::tools::{ToolOutcome, ToolRegistry};

const CONTAINER_ID: &str = "3f2a9c1b7d4e";

const FULL_DIAGNOSIS: &str = "DIAGNOSIS: Container crashed on startup\n\
ROOT CAUSE: DATABASE_URL is not set, so the app exits during boot.\n\
EVIDENCE:\n\
- Log line: KeyError: 'DATABASE_URL'\n\
- Exit code 1 shortly after start\n\
RECOMMENDED FIX: Add DATABASE_URL to the service environment.\n\
SEVERITY: high";

// ─────────────────────────────────────────────────────────────────────────────
// Test doubles
// ─────────────────────────────────────────────────────────────────────────────

/// Provider that replays a fixed list of turns
struct ScriptedProvider {
    script: VecDeque<Result<NormalizedResponse, ProviderError>>,
    /// Returned once the script is exhausted
    fallback: Option<NormalizedResponse>,
    delay: Duration,
    appended: Arc<Mutex<Vec<Vec<ToolResult>>>>,
}

impl ScriptedProvider {
    fn new(turns: Vec<NormalizedResponse>) -> Self {
        Self {
            script: turns.into_iter().map(Ok).collect(),
            fallback: None,
            delay: Duration::ZERO,
            appended: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_results(script: Vec<Result<NormalizedResponse, ProviderError>>) -> Self {
        Self {
            script: script.into(),
            ..Self::new(Vec::new())
        }
    }

    fn repeating(turn: NormalizedResponse) -> Self {
        Self {
            fallback: Some(turn),
            ..Self::new(Vec::new())
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "test-model"
    }

    fn build_initial_messages(&mut self, _system_prompt: &str, _user_prompt: &str) {}

    async fn call(&mut self) -> Result<NormalizedResponse, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.script.pop_front() {
            Some(turn) => turn,
            None => self
                .fallback
                .clone()
                .ok_or_else(|| ProviderError::MalformedResponse("script exhausted".to_string())),
        }
    }

    fn append_tool_results(&mut self, results: &[ToolResult]) {
        self.appended.lock().unwrap().push(results.to_vec());
    }
}

/// Provider whose first call panics
struct PanickingProvider;

#[async_trait]
impl ProviderAdapter for PanickingProvider {
    fn provider_name(&self) -> &str {
        "panicking"
    }

    fn model(&self) -> &str {
        "test-model"
    }

    fn build_initial_messages(&mut self, _system_prompt: &str, _user_prompt: &str) {}

    async fn call(&mut self) -> Result<NormalizedResponse, ProviderError> {
        panic!("provider exploded");
    }

    fn append_tool_results(&mut self, _results: &[ToolResult]) {}
}

/// Runner that records every invocation and always succeeds
#[derive(Clone, Default)]
struct FakeRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl FakeRunner {
    fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        _limit: Duration,
    ) -> Result<CommandOutput, RunnerError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(CommandOutput {
            stdout: format!("output of {} {}", program, args.join(" ")),
            stderr: String::new(),
            exit_code: Some(0),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

struct Harness {
    store: Arc<SessionStore>,
    runner: FakeRunner,
    tools: Arc<ToolRegistry>,
}

impl Harness {
    fn new() -> Self {
        let runner = FakeRunner::default();
        Self {
            store: Arc::new(SessionStore::new()),
            tools: Arc::new(ToolRegistry::new(Arc::new(runner.clone()))),
            runner,
        }
    }

    async fn run(&self, provider: ScriptedProvider, config: AgentConfig) -> (String, InvestigationSummary) {
        let request = request("exited");
        let id = self.store.create(request.clone());
        let controller = AgentController::new(
            Box::new(provider),
            Arc::clone(&self.tools),
            Arc::clone(&self.store),
            config,
        );
        let summary = controller.run(&id, &request).await;
        (id, summary)
    }

    fn events(&self, id: &str) -> Vec<RecordedEvent> {
        self.store.events(id).unwrap()
    }

    fn kinds(&self, id: &str) -> Vec<EventKind> {
        self.events(id).iter().map(|e| e.kind).collect()
    }

    /// Step payloads of one sub-type
    fn steps(&self, id: &str, step_type: &str) -> Vec<Value> {
        self.events(id)
            .iter()
            .filter(|e| e.kind == EventKind::Step)
            .map(RecordedEvent::json)
            .filter(|v| v["type"] == step_type)
            .collect()
    }

    fn diagnosis(&self, id: &str) -> Value {
        self.events(id)
            .iter()
            .find(|e| e.kind == EventKind::Diagnosis)
            .map(RecordedEvent::json)
            .expect("diagnosis event")
    }
}

fn request(status: &str) -> InvestigationRequest {
    InvestigationRequest::new(ContainerSubject {
        id: CONTAINER_ID.to_string(),
        name: "api".to_string(),
        image: Some("acme/api:1.4".to_string()),
        status: Some(status.to_string()),
        ..Default::default()
    })
}

fn call(id: &str, name: &str, arguments: Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

fn tools_turn(calls: Vec<ToolCall>) -> NormalizedResponse {
    NormalizedResponse {
        content: None,
        tool_calls: calls,
        done: false,
    }
}

fn final_turn(text: &str) -> NormalizedResponse {
    NormalizedResponse {
        content: Some(text.to_string()),
        tool_calls: Vec::new(),
        done: true,
    }
}

fn assert_terminal(kinds: &[EventKind]) {
    let tail = &kinds[kinds.len() - 2..];
    assert!(
        tail == [EventKind::Diagnosis, EventKind::End] || tail == [EventKind::Error, EventKind::End],
        "unexpected terminal events: {:?}",
        tail
    );
    assert_eq!(kinds.iter().filter(|k| **k == EventKind::End).count(), 1);
}

async fn collect(mut subscription: Subscription) -> Vec<RecordedEvent> {
    let mut events = std::mem::take(&mut subscription.replay);
    if let Some(mut live) = subscription.live {
        while let Some(event) = live.recv().await {
            events.push(event);
        }
    }
    events
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

/// Logs call, then a complete diagnosis
#[tokio::test]
async fn test_logs_then_diagnosis() {
    let harness = Harness::new();
    let provider = ScriptedProvider::new(vec![
        tools_turn(vec![call("call_1", "get_container_logs", json!({ "container_id": CONTAINER_ID }))]),
        final_turn(FULL_DIAGNOSIS),
    ]);
    let appended = Arc::clone(&provider.appended);

    let (id, summary) = harness.run(provider, AgentConfig::default()).await;

    assert_eq!(summary.outcome, InvestigationOutcome::Diagnosis);
    assert_eq!(summary.iterations, 2);
    assert_eq!(harness.store.status(&id), Some(SessionStatus::Done));

    let kinds = harness.kinds(&id);
    assert_eq!(kinds[0], EventKind::Start);
    assert_terminal(&kinds);

    let diagnosis = harness.diagnosis(&id);
    assert_eq!(diagnosis["raw"], FULL_DIAGNOSIS);
    let parsed = &diagnosis["diagnosis"];
    assert_eq!(parsed["summary"], "Container crashed on startup");
    assert_eq!(
        parsed["rootCause"],
        "DATABASE_URL is not set, so the app exits during boot."
    );
    assert_eq!(
        parsed["evidence"],
        json!(["Log line: KeyError: 'DATABASE_URL'", "Exit code 1 shortly after start"])
    );
    assert_eq!(parsed["fix"], "Add DATABASE_URL to the service environment.");
    assert_eq!(parsed["severity"], "high");

    // Default tail, timestamps, validated id
    let calls = harness.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "docker");
    assert_eq!(calls[0].1, vec!["logs", "--tail", "100", "--timestamps", CONTAINER_ID]);

    // One batch, correlated by call id
    let appended = appended.lock().unwrap();
    assert_eq!(appended.len(), 1);
    assert_eq!(appended[0][0].id, "call_1");
    assert!(appended[0][0].content.starts_with("output of docker logs"));

    let end = harness.events(&id).last().unwrap().json();
    assert_eq!(end["iterations"], 2);
    assert_eq!(end["execCalls"], 0);
}

/// Provider never finishes
#[tokio::test]
async fn test_iteration_cap_synthesizes_diagnosis() {
    let harness = Harness::new();
    let provider = ScriptedProvider::repeating(tools_turn(vec![call(
        "call_x",
        "get_container_inspect",
        json!({ "container_id": CONTAINER_ID }),
    )]));

    let (id, summary) = harness.run(provider, AgentConfig::default()).await;

    assert_eq!(summary.outcome, InvestigationOutcome::MaxIterations);
    assert_eq!(summary.iterations, 15);
    assert_eq!(harness.store.status(&id), Some(SessionStatus::Done));
    assert_terminal(&harness.kinds(&id));

    let thinking = harness.steps(&id, "thinking");
    assert_eq!(thinking.len(), 15);
    assert_eq!(thinking[14]["content"], "Iteration 15/15");

    let parsed = &harness.diagnosis(&id)["diagnosis"];
    assert_eq!(parsed["severity"], "medium");
    assert!(parsed["rootCause"]
        .as_str()
        .unwrap()
        .contains("maximum iterations"));
}

/// Destructive exec is blocked and does not use the exec budget
#[tokio::test]
async fn test_blocked_exec_does_not_count() {
    let harness = Harness::new();
    let provider = ScriptedProvider::new(vec![
        tools_turn(vec![call(
            "call_rm",
            "exec_in_container",
            json!({ "container_id": CONTAINER_ID, "command": "rm -rf /data" }),
        )]),
        final_turn(FULL_DIAGNOSIS),
    ]);
    let appended = Arc::clone(&provider.appended);

    let (id, summary) = harness.run(provider, AgentConfig::default()).await;

    assert_eq!(summary.outcome, InvestigationOutcome::Diagnosis);
    assert_eq!(summary.exec_calls, 0);
    assert!(harness.runner.calls().is_empty());

    let result = &appended.lock().unwrap()[0][0];
    assert!(result.content.starts_with("Error: Command blocked:"));

    assert_eq!(harness.steps(&id, "blocked").len(), 1);
    let tool_result = &harness.steps(&id, "tool_result")[0];
    assert_eq!(tool_result["error"], true);
}

/// The sixth exec call is refused without touching the runtime
#[tokio::test]
async fn test_exec_budget_exhausted() {
    let harness = Harness::new();
    let mut turns: Vec<NormalizedResponse> = (1..=6)
        .map(|i| {
            tools_turn(vec![call(
                &format!("call_{}", i),
                "exec_on_host",
                json!({ "command": "df -h" }),
            )])
        })
        .collect();
    turns.push(final_turn(FULL_DIAGNOSIS));
    let provider = ScriptedProvider::new(turns);
    let appended = Arc::clone(&provider.appended);

    let (id, summary) = harness.run(provider, AgentConfig::default()).await;

    assert_eq!(summary.exec_calls, 5);
    assert_eq!(harness.runner.calls().len(), 5);
    assert!(harness.runner.calls().iter().all(|(program, _)| program == "sh"));

    let appended = appended.lock().unwrap();
    assert_eq!(appended.len(), 6);
    assert_eq!(appended[5][0].id, "call_6");
    assert_eq!(
        appended[5][0].content,
        "Error: Exec call limit reached (5). Use non-exec tools or produce your diagnosis."
    );

    let blocked = harness.steps(&id, "blocked");
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0]["content"], "Exec limit reached (5). Skipping exec_on_host.");
    // The refused call is not announced as a tool call
    assert_eq!(harness.steps(&id, "tool_call").len(), 5);

    let end = harness.events(&id).last().unwrap().json();
    assert_eq!(end["execCalls"], 5);
}

/// Late subscriber gets the full history and no live channel
#[tokio::test]
async fn test_subscribe_after_done_replays_everything() {
    let harness = Harness::new();
    let provider = ScriptedProvider::new(vec![final_turn(FULL_DIAGNOSIS)]);
    let (id, _) = harness.run(provider, AgentConfig::default()).await;

    let first = harness.store.subscribe(&id).unwrap();
    let second = harness.store.subscribe(&id).unwrap();
    assert!(first.live.is_none());
    assert_eq!(first.replay, harness.events(&id));
    // Byte-identical across replays
    let payloads = |s: &Subscription| s.replay.iter().map(|e| e.payload.clone()).collect::<Vec<_>>();
    assert_eq!(payloads(&first), payloads(&second));
}

// ─────────────────────────────────────────────────────────────────────────────
// Other termination paths
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_provider_failure_ends_session_with_error() {
    let harness = Harness::new();
    let provider = ScriptedProvider::with_results(vec![
        Ok(tools_turn(vec![call("c1", "get_container_top", json!({ "container_id": CONTAINER_ID }))])),
        Err(ProviderError::Api {
            status: 429,
            message: "rate limited".to_string(),
        }),
    ]);

    let (id, summary) = harness.run(provider, AgentConfig::default()).await;

    assert_eq!(summary.outcome, InvestigationOutcome::ProviderError);
    assert_eq!(harness.store.status(&id), Some(SessionStatus::Error));
    let kinds = harness.kinds(&id);
    assert_terminal(&kinds);
    assert_eq!(kinds[kinds.len() - 2], EventKind::Error);

    let error = harness.events(&id)[kinds.len() - 2].json();
    assert_eq!(error["message"], "LLM call failed: API error (429): rate limited");
}

#[tokio::test]
async fn test_done_without_marker_is_voluntary_stop() {
    let harness = Harness::new();
    let provider = ScriptedProvider::new(vec![final_turn("Nothing looks wrong with this container.")]);
    let (id, summary) = harness.run(provider, AgentConfig::default()).await;

    assert_eq!(summary.outcome, InvestigationOutcome::VoluntaryStop);
    assert_eq!(harness.store.status(&id), Some(SessionStatus::Done));
    assert_eq!(
        harness.diagnosis(&id)["raw"],
        "Nothing looks wrong with this container."
    );
}

#[tokio::test]
async fn test_done_without_content_uses_stock_text() {
    let harness = Harness::new();
    let provider = ScriptedProvider::new(vec![NormalizedResponse {
        content: None,
        tool_calls: Vec::new(),
        done: true,
    }]);
    let (id, _) = harness.run(provider, AgentConfig::default()).await;
    assert_eq!(
        harness.diagnosis(&id)["raw"],
        "Agent could not determine a diagnosis."
    );
    assert!(harness.steps(&id, "reasoning").is_empty());
}

#[tokio::test]
async fn test_timeout_produces_incomplete_diagnosis() {
    let harness = Harness::new();
    let provider = ScriptedProvider::repeating(tools_turn(vec![call(
        "c",
        "get_container_diff",
        json!({ "container_id": CONTAINER_ID }),
    )]))
    .with_delay(Duration::from_millis(50));
    let config = AgentConfig {
        total_timeout: Duration::from_millis(20),
        ..AgentConfig::default()
    };

    let (id, summary) = harness.run(provider, config).await;

    assert_eq!(summary.outcome, InvestigationOutcome::Timeout);
    assert_eq!(summary.iterations, 1);
    assert_eq!(harness.store.status(&id), Some(SessionStatus::Done));
    let warnings = harness.steps(&id, "warning");
    assert!(warnings[0]["content"]
        .as_str()
        .unwrap()
        .starts_with("Investigation timeout"));
    // The iteration cap was not hit, so it is not reported
    assert_eq!(warnings.len(), 1);
    let parsed = &harness.diagnosis(&id)["diagnosis"];
    assert_eq!(parsed["severity"], "medium");
    assert!(parsed["rootCause"].as_str().unwrap().contains("time limit"));
}

#[tokio::test]
async fn test_unknown_tool_and_bad_id_are_fed_back() {
    let harness = Harness::new();
    let provider = ScriptedProvider::new(vec![
        tools_turn(vec![
            call("a", "delete_container", json!({ "container_id": CONTAINER_ID })),
            call("b", "get_container_logs", json!({ "container_id": "../etc" })),
        ]),
        final_turn(FULL_DIAGNOSIS),
    ]);
    let appended = Arc::clone(&provider.appended);

    let (id, summary) = harness.run(provider, AgentConfig::default()).await;

    assert_eq!(summary.outcome, InvestigationOutcome::Diagnosis);
    assert!(harness.runner.calls().is_empty());
    let batch = &appended.lock().unwrap()[0];
    assert_eq!(batch[0].content, "Error: Unknown tool: delete_container");
    assert_eq!(batch[1].content, "Error: Invalid container ID");
    assert_eq!(harness.steps(&id, "error").len(), 1);
}

#[tokio::test]
async fn test_tool_result_preview_is_capped() {
    let harness = Harness::new();
    let provider = ScriptedProvider::new(vec![
        tools_turn(vec![call(
            "c",
            "exec_on_host",
            json!({ "command": "cat /proc/meminfo" }),
        )]),
        final_turn(FULL_DIAGNOSIS),
    ]);
    let config = AgentConfig {
        tool_result_preview: 10,
        ..AgentConfig::default()
    };
    let (id, _) = harness.run(provider, config).await;

    let result = &harness.steps(&id, "tool_result")[0];
    let full = "output of sh -c cat /proc/meminfo";
    assert_eq!(result["preview"], &full[..10]);
    assert_eq!(result["length"], full.len());
    assert_eq!(result["error"], false);
}

// ─────────────────────────────────────────────────────────────────────────────
// Service level
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unconfigured_service_reports_error_then_end() {
    let store = Arc::new(SessionStore::new());
    let service = AgentService::new(
        Arc::clone(&store),
        Arc::new(ToolRegistry::new(Arc::new(FakeRunner::default()))),
        None,
        AgentConfig::default(),
    );

    let id = service.start_investigation(request("running"));
    let events = collect(service.subscribe(&id).unwrap()).await;
    let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::Error, EventKind::End]);
    assert_eq!(events[1].json().as_object().unwrap().len(), 1); // only `ts`
    assert_eq!(store.status(&id), Some(SessionStatus::Error));
}

#[tokio::test]
async fn test_concurrent_subscribers_see_identical_streams() {
    let store = Arc::new(SessionStore::new());
    let service = Arc::new(AgentService::new(
        Arc::clone(&store),
        Arc::new(ToolRegistry::new(Arc::new(FakeRunner::default()))),
        None,
        AgentConfig::default(),
    ));
    let provider = ScriptedProvider::new(vec![
        tools_turn(vec![call("a", "get_container_inspect", json!({ "container_id": CONTAINER_ID }))]),
        tools_turn(vec![call("b", "get_container_events", json!({ "container_id": CONTAINER_ID }))]),
        final_turn(FULL_DIAGNOSIS),
    ])
    .with_delay(Duration::from_millis(30));

    let id = service.start_with_adapter(request("restarting"), Box::new(provider));

    let early = tokio::spawn(collect(service.subscribe(&id).unwrap()));
    tokio::time::sleep(Duration::from_millis(45)).await;
    let late = tokio::spawn(collect(service.subscribe(&id).unwrap()));

    let early = tokio::time::timeout(Duration::from_secs(5), early)
        .await
        .expect("early subscriber finished")
        .unwrap();
    let late = tokio::time::timeout(Duration::from_secs(5), late)
        .await
        .expect("late subscriber finished")
        .unwrap();

    let stored = store.events(&id).unwrap();
    assert_eq!(early, stored);
    assert_eq!(late, stored);
    assert_terminal(&stored.iter().map(|e| e.kind).collect::<Vec<_>>());
    assert_eq!(store.status(&id), Some(SessionStatus::Done));
}

/// A panic inside the loop still closes the session with error, end
#[tokio::test]
async fn test_panicking_loop_is_isolated() {
    let store = Arc::new(SessionStore::new());
    let service = AgentService::new(
        Arc::clone(&store),
        Arc::new(ToolRegistry::new(Arc::new(FakeRunner::default()))),
        None,
        AgentConfig::default(),
    );

    let id = service.start_with_adapter(request("exited"), Box::new(PanickingProvider));
    let events = tokio::time::timeout(Duration::from_secs(5), collect(service.subscribe(&id).unwrap()))
        .await
        .expect("session closed after panic");

    let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds[0], EventKind::Start);
    assert_terminal(&kinds);
    assert_eq!(kinds[kinds.len() - 2], EventKind::Error);
    let message = events[kinds.len() - 2].json()["message"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(message.starts_with("Investigation aborted: "), "{}", message);
    assert_eq!(store.status(&id), Some(SessionStatus::Error));

    // Other investigations keep working
    let provider = ScriptedProvider::new(vec![final_turn(FULL_DIAGNOSIS)]);
    let next = service.start_with_adapter(request("exited"), Box::new(provider));
    let events = collect(service.subscribe(&next).unwrap()).await;
    assert_eq!(events.last().unwrap().kind, EventKind::End);
    assert_eq!(store.status(&next), Some(SessionStatus::Done));
}

#[tokio::test]
async fn test_many_sessions_run_independently() {
    let store = Arc::new(SessionStore::new());
    let service = AgentService::new(
        Arc::clone(&store),
        Arc::new(ToolRegistry::new(Arc::new(FakeRunner::default()))),
        None,
        AgentConfig::default(),
    );

    let ids: Vec<String> = (0..8)
        .map(|_| {
            let provider = ScriptedProvider::new(vec![final_turn(FULL_DIAGNOSIS)])
                .with_delay(Duration::from_millis(10));
            service.start_with_adapter(request("exited"), Box::new(provider))
        })
        .collect();

    for id in &ids {
        let events = collect(service.subscribe(id).unwrap()).await;
        assert_eq!(events.last().unwrap().kind, EventKind::End);
        assert_eq!(store.status(id), Some(SessionStatus::Done));
    }
}

// Integration tests that require external services

/// Inspect a real container (requires Docker)
#[tokio::test]
#[ignore = "Requires a running Docker daemon with at least one container"]
async fn test_inspect_real_container() {
    let runner = Arc::new(SystemRunner::new());
    let listing = runner
        .run("docker", &["ps".to_string(), "-q".to_string()], Duration::from_secs(5))
        .await
        .unwrap();
    let id = listing.stdout.lines().next().expect("a running container").to_string();

    let registry = ToolRegistry::new(runner);
    let outcome = registry
        .execute("get_container_inspect", &json!({ "container_id": id }))
        .await;
    assert!(matches!(outcome, ToolOutcome::Output(ref text) if text.contains("\"State\"")));
}
