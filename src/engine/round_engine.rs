//! The round engine: state machine, scoring and timing of a race.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle --StartGame--> CountdownToStart --(3, 2, 1, GO)--> RoundActive
//! RoundActive --answer/timeout--> RoundResolvedPendingNext --delay--> RoundActive
//!                              \-> Win | Lose  (terminal until Restart)
//! ```
//!
//! ## Ordering rules
//!
//! - A round closes exactly once: whichever of answer or timeout arrives
//!   first wins and the other becomes a no-op.
//! - At most one "next thing" task (countdown beat or advance-round) and one
//!   round-timer tick are pending. Restart cancels both.
//! - A task whose handle is no longer pending is ignored, so a late delivery
//!   can never resurrect an old round.

use std::time::Duration;

use log::{debug, info, warn};

use super::history::{RoundHistory, RoundRecord};
use crate::core::{car_position, GameResult, GameRng, GameState, Phase, RaceConfig, RaceError};
use crate::events::{Command, EngineEvent, Outcome, Resolution, ToneKind};
use crate::problems::{OptionSet, Problem};
use crate::services::{BestScoreStore, SoundCue};
use crate::timing::{ManualClock, RoundTimer, Scheduler, Task, TaskHandle, TimerStep};

/// Owns one race: its state, its clock and its collaborators.
pub struct RoundEngine<S: Scheduler = ManualClock> {
    config: RaceConfig,
    state: GameState,
    phase: Phase,
    seed: u64,
    /// Forked once per game; the two streams below come from the fork.
    session_rng: GameRng,
    problem_rng: GameRng,
    option_rng: GameRng,

    scheduler: S,
    timer: RoundTimer,
    /// Countdown beat or advance-round task.
    pending: Option<TaskHandle>,
    countdown: u32,

    round: u32,
    problem: Option<Problem>,
    options: Option<OptionSet>,
    history: RoundHistory,

    best_score: u32,
    events: Vec<EngineEvent>,
    store: Box<dyn BestScoreStore>,
    sound: Box<dyn SoundCue>,
}

impl<S: Scheduler> RoundEngine<S> {
    /// Assemble an engine. Prefer [`RaceBuilder`](super::RaceBuilder).
    ///
    /// An unreadable store is not an error: best-score tracking falls back
    /// to this session only.
    pub fn new(
        config: RaceConfig,
        seed: u64,
        scheduler: S,
        store: Box<dyn BestScoreStore>,
        sound: Box<dyn SoundCue>,
    ) -> Result<Self, RaceError> {
        config.validate()?;

        let best_score = match store.load() {
            Ok(best) => best.unwrap_or(0),
            Err(err) => {
                warn!("best score unavailable, tracking this session only: {err}");
                0
            }
        };

        let mut session_rng = GameRng::new(seed);
        let game_rng = session_rng.fork();
        Ok(Self {
            state: GameState::new(&config),
            phase: Phase::Idle,
            seed,
            session_rng,
            problem_rng: game_rng.for_context("problems"),
            option_rng: game_rng.for_context("options"),
            scheduler,
            timer: RoundTimer::new(config.tick_interval),
            pending: None,
            countdown: 0,
            round: 0,
            problem: None,
            options: None,
            history: RoundHistory::new(),
            best_score,
            events: Vec::new(),
            store,
            sound,
            config,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Problem of the current (or just resolved) round.
    #[must_use]
    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    /// Options of the current (or just resolved) round.
    #[must_use]
    pub fn options(&self) -> Option<&OptionSet> {
        self.options.as_ref()
    }

    /// Seconds left on the round clock.
    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.timer.seconds_left()
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// 1-based number of the current round in this game.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Track position for `score` under this engine's target.
    #[must_use]
    pub fn car_position(&self, score: u32) -> f32 {
        car_position(score, self.config.target_score)
    }

    /// Events queued since the last drain, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Jump score and lives to a given position.
    ///
    /// Intended for replays and tests. Score is held below the target and
    /// lives at most the starting count; no win or loss is triggered.
    pub fn set_progress(&mut self, score: u32, lives: u32) {
        self.state.set(score, lives);
    }

    // === Commands ===

    /// Route a presenter command.
    ///
    /// Returns the outcome for accepted answers, `None` for everything else.
    pub fn handle_command(&mut self, command: Command) -> Result<Option<Outcome>, RaceError> {
        debug!("command {command} while {}", self.phase);
        match command {
            Command::StartGame => self.start_game().map(|()| None),
            Command::SubmitAnswer(value) => Ok(self.submit_answer(value)),
            Command::Restart => {
                self.restart();
                Ok(None)
            }
        }
    }

    /// Leave the start screen and begin the pre-game countdown.
    pub fn start_game(&mut self) -> Result<(), RaceError> {
        if self.phase != Phase::Idle {
            return Err(RaceError::CommandRejected {
                command: Command::StartGame.name(),
                phase: self.phase,
            });
        }
        info!("starting race (seed {})", self.seed);
        self.begin_countdown();
        Ok(())
    }

    /// Abandon whatever is happening and count down to a fresh game.
    pub fn restart(&mut self) {
        info!("restarting race from {}", self.phase);
        self.begin_countdown();
    }

    /// Judge the player's pick.
    ///
    /// Returns `None` (and changes nothing) unless a round is active and
    /// `selected` is one of the displayed options.
    pub fn submit_answer(&mut self, selected: u32) -> Option<Outcome> {
        if self.phase != Phase::RoundActive {
            debug!("ignoring answer {selected} while {}", self.phase);
            return None;
        }
        let (problem, options) = (self.problem?, self.options?);
        if !options.contains(selected) {
            debug!("ignoring answer {selected}: not among {:?}", options.values());
            return None;
        }

        self.cancel_timer();

        if selected == problem.correct_answer {
            self.record(problem, options, Some(selected), Outcome::Correct, Resolution::Answered);
            self.process_correct_answer();
            Some(Outcome::Correct)
        } else {
            self.record(problem, options, Some(selected), Outcome::Incorrect, Resolution::Answered);
            self.process_wrong_answer(Resolution::Answered);
            Some(Outcome::Incorrect)
        }
    }

    // === Scheduled tasks ===

    /// Deliver a task that came due on the scheduler.
    ///
    /// Tasks that were cancelled or belong to an earlier round are ignored.
    pub fn fire(&mut self, handle: TaskHandle, task: Task) {
        match task {
            Task::TimerTick => self.on_timer_tick(handle),
            Task::CountdownTick | Task::AdvanceRound => {
                if self.pending != Some(handle) {
                    debug!("dropping stale {task:?} {handle}");
                    return;
                }
                self.pending = None;
                match (task, self.phase) {
                    (Task::CountdownTick, Phase::CountdownToStart) => self.on_countdown_beat(),
                    (Task::AdvanceRound, Phase::RoundResolvedPendingNext) => self.start_round(),
                    (task, phase) => debug!("dropping {task:?} while {phase}"),
                }
            }
        }
    }

    /// Stop the round clock. Safe to call when it is not running.
    pub fn cancel_timer(&mut self) {
        self.timer.cancel(&mut self.scheduler);
    }

    /// Close the active round as a miss because the clock ran out.
    pub fn handle_timeout(&mut self) {
        if self.phase != Phase::RoundActive {
            return;
        }
        let (Some(problem), Some(options)) = (self.problem, self.options) else {
            return;
        };
        self.cancel_timer();
        info!("round {} timed out on {}", self.round, problem);
        self.record(problem, options, None, Outcome::Incorrect, Resolution::TimedOut);
        self.process_wrong_answer(Resolution::TimedOut);
    }

    // === Internals ===

    fn emit(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn schedule_next(&mut self, delay: Duration, task: Task) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.schedule_after(delay, task));
    }

    fn play(&mut self, kind: ToneKind) {
        self.emit(EngineEvent::PlayTone { kind });
        if let Err(err) = self.sound.play(kind) {
            warn!("tone {kind:?} not played: {err}");
        }
    }

    fn record(
        &mut self,
        problem: Problem,
        options: OptionSet,
        selected: Option<u32>,
        outcome: Outcome,
        resolution: Resolution,
    ) {
        self.history.push(RoundRecord {
            round: self.round,
            problem,
            options,
            selected,
            outcome,
            resolution,
        });
    }

    fn begin_countdown(&mut self) {
        self.cancel_timer();
        self.cancel_pending();

        if self.phase != Phase::Idle {
            let game_rng = self.session_rng.fork();
            self.problem_rng = game_rng.for_context("problems");
            self.option_rng = game_rng.for_context("options");
        }

        self.state.reset();
        self.history.clear();
        self.round = 0;
        self.problem = None;
        self.options = None;

        self.phase = Phase::CountdownToStart;
        self.countdown = self.config.countdown_seconds;
        self.emit(EngineEvent::CountdownTick { remaining: self.countdown });
        self.schedule_next(self.config.tick_interval, Task::CountdownTick);
    }

    fn on_countdown_beat(&mut self) {
        if self.countdown > 0 {
            self.countdown -= 1;
            self.emit(EngineEvent::CountdownTick { remaining: self.countdown });
            self.schedule_next(self.config.tick_interval, Task::CountdownTick);
            return;
        }

        self.state.reset();
        self.emit(EngineEvent::LivesChanged { count: self.state.lives() });
        self.emit(EngineEvent::ScoreChanged { score: self.state.score() });
        self.emit(EngineEvent::CarMoved { position: self.state.car_position() });
        self.start_round();
    }

    fn start_round(&mut self) {
        self.cancel_pending();

        let problem = Problem::generate(&mut self.problem_rng);
        let options = OptionSet::generate(
            &problem,
            &mut self.option_rng,
            self.config.max_distractor_attempts,
        );
        self.round += 1;
        self.problem = Some(problem);
        self.options = Some(options);
        self.phase = Phase::RoundActive;
        debug!("round {}: {} options {:?}", self.round, problem, options.values());

        self.emit(EngineEvent::ProblemPresented {
            operand_a: problem.operand_a,
            operand_b: problem.operand_b,
            operator: problem.operator,
        });
        self.emit(EngineEvent::OptionsPresented { values: options.values() });
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.timer.start(self.config.round_seconds, &mut self.scheduler);
        self.emit(EngineEvent::TimerTick { seconds_left: self.timer.seconds_left() });
    }

    fn on_timer_tick(&mut self, handle: TaskHandle) {
        if self.phase != Phase::RoundActive {
            debug!("dropping timer tick {handle} while {}", self.phase);
            return;
        }
        match self.timer.tick(handle, &mut self.scheduler) {
            TimerStep::Ticked(seconds_left) => self.emit(EngineEvent::TimerTick { seconds_left }),
            TimerStep::Expired => {
                self.emit(EngineEvent::TimerTick { seconds_left: 0 });
                self.handle_timeout();
            }
            TimerStep::Stale => debug!("dropping stale timer tick {handle}"),
        }
    }

    fn process_correct_answer(&mut self) {
        self.play(ToneKind::Correct);
        let score = self.state.award_point();
        debug!("round {} correct, score {}", self.round, score);

        self.emit(EngineEvent::AnswerResult {
            outcome: Outcome::Correct,
            resolution: Resolution::Answered,
            hint: None,
        });
        self.emit(EngineEvent::ScoreChanged { score });
        self.emit(EngineEvent::CarMoved { position: self.state.car_position() });

        if self.state.has_won() {
            self.finish(GameResult::Win);
        } else {
            self.phase = Phase::RoundResolvedPendingNext;
            self.schedule_next(self.config.correct_delay, Task::AdvanceRound);
        }
    }

    fn process_wrong_answer(&mut self, resolution: Resolution) {
        let Some(problem) = self.problem else {
            return;
        };
        self.play(ToneKind::Incorrect);
        self.state.penalize();
        debug!(
            "round {} missed ({resolution:?}), lives {}, score {}",
            self.round,
            self.state.lives(),
            self.state.score()
        );

        self.emit(EngineEvent::AnswerResult {
            outcome: Outcome::Incorrect,
            resolution,
            hint: Some(problem.hint()),
        });
        self.emit(EngineEvent::LivesChanged { count: self.state.lives() });
        self.emit(EngineEvent::ScoreChanged { score: self.state.score() });
        self.emit(EngineEvent::CarMoved { position: self.state.car_position() });

        if self.state.is_out_of_lives() {
            self.finish(GameResult::Lose);
        } else {
            self.phase = Phase::RoundResolvedPendingNext;
            self.schedule_next(self.config.wrong_delay, Task::AdvanceRound);
        }
    }

    fn finish(&mut self, result: GameResult) {
        self.cancel_timer();
        self.cancel_pending();

        let final_score = self.state.score();
        self.phase = match result {
            GameResult::Win => Phase::Win,
            GameResult::Lose => Phase::Lose,
        };
        info!("race over: {result:?} with score {final_score} after {} rounds", self.round);

        if result == GameResult::Win && final_score > self.best_score {
            self.best_score = final_score;
            if let Err(err) = self.store.save(final_score) {
                warn!("best score {final_score} kept for this session only: {err}");
            }
            self.emit(EngineEvent::UpdateBestScore { new_value: final_score });
        }
        self.emit(EngineEvent::GameEnded { result, final_score });
    }
}

impl RoundEngine<ManualClock> {
    /// Move virtual time forward by `by`, firing every task that comes due.
    ///
    /// Tasks scheduled while firing also run if they fall inside the window.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some((handle, task)) = self.scheduler.pop_due(until) {
            self.fire(handle, task);
        }
        self.scheduler.set_now(until);
    }

    /// Fire the next pending task, however far away. Returns `false` if none.
    pub fn step(&mut self) -> bool {
        let Some(deadline) = self.scheduler.next_deadline() else {
            return false;
        };
        match self.scheduler.pop_due(deadline) {
            Some((handle, task)) => {
                self.fire(handle, task);
                true
            }
            None => false,
        }
    }

    /// Step until a round is waiting for an answer or the game is over.
    ///
    /// Returns the phase reached.
    pub fn run_until_input(&mut self) -> Phase {
        while self.phase != Phase::RoundActive && !self.phase.is_terminal() {
            if !self.step() {
                break;
            }
        }
        self.phase
    }
}
