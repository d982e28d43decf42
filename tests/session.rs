//! Drives real quiz sessions on the tokio runtime with millisecond timings.

#![allow(non_snake_case)]

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;
use std::{sync::Arc, time::Duration};
use timed_quiz::{
    config::QuizConfig,
    engine::QuizEngine,
    handlers::quiz_handler::run_quiz_session,
    models::{
        communication::{Command, Response},
        quiz::{QuizQuestion, QuizSet},
        run_state::{Phase, QuizSnapshot, Selection},
    },
};

// ── Test helpers ─────────────────────────────────────────────────────────────

const WAIT: Duration = Duration::from_secs(5);

fn fast_config(seconds_per_question: u32) -> QuizConfig {
    QuizConfig {
        seconds_per_question,
        tick_interval_ms: 20,
        hold_delay_ms: 30,
        settle_delay_ms: 10,
    }
}

fn questions() -> Arc<QuizSet> {
    Arc::new(
        QuizSet::new(vec![
            QuizQuestion::new("2+2?", ["3", "4", "5", "6"], "4"),
            QuizQuestion::new("Sky colour?", ["Red", "Blue", "Green", "Black"], "Blue"),
        ])
        .unwrap(),
    )
}

fn single_question() -> Arc<QuizSet> {
    Arc::new(QuizSet::new(vec![QuizQuestion::new("2+2?", ["3", "4", "5", "6"], "4")]).unwrap())
}

struct Session {
    commands: UnboundedSender<Command>,
    responses: UnboundedReceiver<Response>,
    handle: tokio::task::JoinHandle<()>,
}

fn spawn_session(set: Arc<QuizSet>, config: QuizConfig) -> Session {
    let engine = QuizEngine::new(set, config).unwrap();
    let (command_tx, command_rx) = unbounded();
    let (response_tx, response_rx) = unbounded();
    let handle = tokio::spawn(run_quiz_session(
        "test-session".to_string(),
        engine,
        command_rx,
        response_tx,
    ));
    Session {
        commands: command_tx,
        responses: response_rx,
        handle,
    }
}

impl Session {
    fn send(&self, command: Command) {
        self.commands.unbounded_send(command).unwrap();
    }

    async fn next_response(&mut self) -> Response {
        tokio::time::timeout(WAIT, self.responses.next())
            .await
            .expect("session went quiet")
            .expect("session closed")
    }

    async fn next_snapshot(&mut self) -> QuizSnapshot {
        match self.next_response().await {
            Response::quizState { snapshot } => snapshot,
            other => panic!("expected a state update, got {other:?}"),
        }
    }

    /// Skips snapshots until one matches, returning everything seen.
    async fn wait_for<F>(&mut self, mut done: F) -> Vec<QuizSnapshot>
    where
        F: FnMut(&QuizSnapshot) -> bool,
    {
        let mut seen = Vec::new();
        loop {
            let snapshot = self.next_snapshot().await;
            let finished = done(&snapshot);
            seen.push(snapshot);
            if finished {
                return seen;
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn initial_snapshot_is_not_started() {
    let mut session = spawn_session(questions(), fast_config(50));
    let snapshot = session.next_snapshot().await;
    assert_eq!(snapshot.phase, Phase::NotStarted);
    assert_eq!(snapshot.total, 2);
    assert!(snapshot.question.is_none());
}

#[tokio::test]
async fn correct_answer_finishes_with_full_marks() {
    let mut session = spawn_session(single_question(), fast_config(50));
    session.next_snapshot().await;

    session.send(Command::startQuiz {});
    let started = session.next_snapshot().await;
    assert_eq!(started.phase, Phase::Running);
    assert_eq!(started.index, 0);
    assert_eq!(started.score, 0);
    assert_eq!(started.remaining_secs, 50);

    session.send(Command::selectAnswer {
        option: "4".to_string(),
    });
    let answered = session
        .wait_for(|snapshot| snapshot.phase == Phase::AwaitingAdvance)
        .await;
    let answered = answered.last().unwrap();
    assert_eq!(answered.score, 1);
    assert_eq!(answered.selection, Selection::Chosen("4".to_string()));
    assert!(!answered.countdown_running);

    let finished = session.next_snapshot().await;
    assert_eq!(finished.phase, Phase::Finished);
    let result = finished.result.unwrap();
    assert_eq!((result.score, result.total, result.percentage), (1, 1, 100));
}

#[tokio::test]
async fn countdown_expiry_scores_nothing() {
    let mut session = spawn_session(single_question(), fast_config(3));
    session.next_snapshot().await;
    session.send(Command::startQuiz {});

    let seen = session
        .wait_for(|snapshot| snapshot.phase == Phase::Finished)
        .await;

    let remaining: Vec<u32> = seen
        .iter()
        .filter(|snapshot| snapshot.phase == Phase::Running)
        .map(|snapshot| snapshot.remaining_secs)
        .collect();
    assert_eq!(remaining, vec![3, 2, 1]);

    let timed_out = seen
        .iter()
        .find(|snapshot| snapshot.phase == Phase::AwaitingAdvance)
        .unwrap();
    assert_eq!(timed_out.selection, Selection::NoAnswer);
    assert_eq!(timed_out.remaining_secs, 0);

    let result = seen.last().unwrap().result.unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.percentage, 0);
}

#[tokio::test]
async fn one_right_one_wrong_is_half() {
    let mut session = spawn_session(questions(), fast_config(50));
    session.next_snapshot().await;
    session.send(Command::startQuiz {});
    session.next_snapshot().await;

    session.send(Command::selectAnswer {
        option: "4".to_string(),
    });
    let second = session
        .wait_for(|snapshot| snapshot.phase == Phase::Running && snapshot.index == 1)
        .await;
    let second = second.last().unwrap();
    assert_eq!(second.question.as_deref(), Some("Sky colour?"));
    assert_eq!(second.selection, Selection::Unset);
    assert_eq!(second.remaining_secs, 50);

    session.send(Command::selectAnswer {
        option: "Green".to_string(),
    });
    let seen = session
        .wait_for(|snapshot| snapshot.phase == Phase::Finished)
        .await;
    let result = seen.last().unwrap().result.unwrap();
    assert_eq!((result.score, result.total, result.percentage), (1, 2, 50));
}

#[tokio::test]
async fn rejected_commands_report_errors() {
    let mut session = spawn_session(single_question(), fast_config(50));
    session.next_snapshot().await;

    session.send(Command::selectAnswer {
        option: "4".to_string(),
    });
    match session.next_response().await {
        Response::errorResponse { errorText } => assert!(errorText.contains("not running")),
        other => panic!("expected an error, got {other:?}"),
    }

    session.send(Command::startQuiz {});
    session.next_snapshot().await;
    session.send(Command::startQuiz {});
    loop {
        match session.next_response().await {
            Response::errorResponse { errorText } => {
                assert!(errorText.contains("already running"));
                break;
            }
            Response::quizState { snapshot } => assert_eq!(snapshot.phase, Phase::Running),
        }
    }
}

#[tokio::test]
async fn restart_after_finish_resets_score() {
    let mut session = spawn_session(single_question(), fast_config(50));
    session.next_snapshot().await;
    session.send(Command::startQuiz {});
    session.next_snapshot().await;
    session.send(Command::selectAnswer {
        option: "4".to_string(),
    });
    session
        .wait_for(|snapshot| snapshot.phase == Phase::Finished)
        .await;

    session.send(Command::startQuiz {});
    let restarted = session.next_snapshot().await;
    assert_eq!(restarted.phase, Phase::Running);
    assert_eq!(restarted.index, 0);
    assert_eq!(restarted.score, 0);
    assert!(restarted.result.is_none());
}

#[tokio::test]
async fn closing_commands_ends_session() {
    let session = spawn_session(questions(), fast_config(50));
    let Session {
        commands,
        mut responses,
        handle,
    } = session;
    drop(commands);

    tokio::time::timeout(WAIT, handle)
        .await
        .expect("session did not stop")
        .unwrap();

    let mut remaining = Vec::new();
    while let Some(response) = responses.next().await {
        remaining.push(response);
    }
    assert_eq!(remaining.len(), 1);
}
