use crate::*;

/// Consumer of session events, typically the presentation layer.
pub trait SessionObserver {
    fn on_win_game(&mut self, elapsed_secs: u32);

    fn on_lost_game(&mut self, elapsed_secs: u32);

    /// Called once per published state change, e.g. once per cascade layer.
    fn on_board_update(&mut self, _board: &Board) {}
}

impl SessionObserver for () {
    fn on_win_game(&mut self, _elapsed_secs: u32) {}

    fn on_lost_game(&mut self, _elapsed_secs: u32) {}
}

/// Adapts a pair of closures into a [`SessionObserver`].
pub struct Callbacks<W, L> {
    pub on_win_game: W,
    pub on_lost_game: L,
}

impl<W, L> Callbacks<W, L> {
    pub fn new(on_win_game: W, on_lost_game: L) -> Self
    where
        W: FnMut(u32),
        L: FnMut(u32),
    {
        Self {
            on_win_game,
            on_lost_game,
        }
    }
}

impl<W, L> SessionObserver for Callbacks<W, L>
where
    W: FnMut(u32),
    L: FnMut(u32),
{
    fn on_win_game(&mut self, elapsed_secs: u32) {
        (self.on_win_game)(elapsed_secs)
    }

    fn on_lost_game(&mut self, elapsed_secs: u32) {
        (self.on_lost_game)(elapsed_secs)
    }
}

pub struct SessionConfig {
    pub game: GameConfig,
    pub timings: Timings,
    pub input_mode: InputMode,
    pub observer: Box<dyn SessionObserver>,
}

impl SessionConfig {
    pub fn new(game: GameConfig) -> Self {
        Self {
            game,
            timings: Timings::default(),
            input_mode: InputMode::default(),
            observer: Box::new(()),
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Task {
    LongPress {
        generation: u64,
    },
    RevealLayer {
        generation: u64,
        layer: Vec<Coord2>,
        elapsed_secs: u32,
    },
    Settle {
        generation: u64,
        outcome: GameOutcome,
        elapsed_secs: u32,
    },
}

impl Task {
    const fn generation(&self) -> u64 {
        match self {
            Self::LongPress { generation }
            | Self::RevealLayer { generation, .. }
            | Self::Settle { generation, .. } => *generation,
        }
    }
}

/// One player's game, from board generation through every restart.
///
/// Nothing runs on its own: time only moves when [`SessionController::poll`]
/// or an input method is called, which runs every task due at the clock's
/// current time.
pub struct SessionController<C: Clock = SystemClock, G: BoardGenerator = RandomBoardGenerator> {
    config: GameConfig,
    timings: Timings,
    input_mode: InputMode,
    observer: Box<dyn SessionObserver>,
    clock: C,
    generator: G,
    scheduler: Scheduler<Task>,
    store: CellStore,
    bombs: BombSet,
    generation: u64,
    start_time: Millis,
    revision: u64,
    input: InputDispatcher,
    press_timer: Option<TimerId>,
    evaluator: GameStateEvaluator,
    active_cascades: usize,
}

impl SessionController {
    /// Session on the wall clock with randomly placed bombs.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_parts(config, SystemClock::new(), RandomBoardGenerator::from_entropy())
    }
}

impl<C: Clock, G: BoardGenerator> SessionController<C, G> {
    pub fn with_parts(config: SessionConfig, clock: C, mut generator: G) -> Result<Self> {
        let SessionConfig {
            game,
            timings,
            input_mode,
            observer,
        } = config;

        game.validate()?;
        let (board, bombs) = generator.generate(game)?;
        let now = clock.now();
        log::debug!("Session started at {}", now);

        Ok(Self {
            config: game,
            timings,
            input_mode,
            observer,
            clock,
            generator,
            scheduler: Scheduler::new(now),
            store: CellStore::new(board),
            bombs,
            generation: 0,
            start_time: now,
            revision: 0,
            input: InputDispatcher::new(),
            press_timer: None,
            evaluator: GameStateEvaluator::new(),
            active_cascades: 0,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn snapshot(&self) -> &Board {
        self.store.snapshot()
    }

    pub fn bombs(&self) -> &BombSet {
        &self.bombs
    }

    pub fn outcome(&self) -> GameOutcome {
        self.evaluator.outcome()
    }

    pub fn input_state(&self) -> PressState {
        self.input.state()
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    pub fn has_press_timer(&self) -> bool {
        self.press_timer.is_some()
    }

    /// Incremented on every board restart.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Incremented on every published board change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_revealing(&self) -> bool {
        self.active_cascades > 0
    }

    /// Time marker of the last (re)start, on the session clock.
    pub fn start_time(&self) -> Millis {
        self.start_time
    }

    pub fn elapsed_secs(&self) -> u32 {
        let elapsed = self.scheduler.now().saturating_sub(self.start_time) / 1000;
        elapsed.try_into().unwrap_or(u32::MAX)
    }

    pub fn flags_left(&self) -> isize {
        self.config.bombs as isize - self.snapshot().flag_count() as isize
    }

    /// Deadline of the next pending task, for hosts that sleep between polls.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_deadline()
    }

    /// Runs every task due at the clock's current time.
    pub fn poll(&mut self) {
        let until = self.clock.now();
        while let Some((id, task)) = self.scheduler.pop_due(until) {
            self.run_task(id, task);
        }
        self.scheduler.finish(until);
    }

    pub fn handle_pointer(&mut self, coords: Coord2, event: PointerEvent) {
        self.poll();

        if !self.input_mode.accepts(event) || !self.store.snapshot().contains(coords) {
            return;
        }

        let gesture = event.gesture();
        if gesture == Gesture::PressStart && self.outcome().is_finished() {
            log::trace!("Game ended, ignoring press at {:?}", coords);
            return;
        }

        let reaction = self.input.handle(gesture, coords);
        log::trace!("{:?} at {:?} -> {:?}", event, coords, self.input.state());

        match reaction.timer {
            TimerAction::Keep => {}
            TimerAction::Start => {
                self.cancel_press_timer();
                let generation = self.generation;
                self.press_timer = Some(
                    self.scheduler
                        .schedule(self.timings.press_ms, Task::LongPress { generation }),
                );
            }
            TimerAction::Cancel => self.cancel_press_timer(),
        }

        if let Some(intent) = reaction.intent {
            self.dispatch(intent);
        }
    }

    /// Tap intent; starts a cascade unless the cell is flagged or the game ended.
    pub fn open(&mut self, coords: Coord2) {
        self.poll();
        self.dispatch(Intent::Open(coords));
    }

    /// Long-press intent.
    pub fn toggle_flag(&mut self, coords: Coord2) {
        self.poll();
        self.dispatch(Intent::ToggleFlag(coords));
    }

    /// Discards the board and bomb set and generates new ones.
    pub fn restart(&mut self) -> Result<()> {
        self.cancel_press_timer();
        self.input.reset();

        let (board, bombs) = self.generator.generate(self.config)?;
        self.store = CellStore::new(board);
        self.bombs = bombs;
        self.generation += 1;
        self.evaluator.reset();
        self.active_cascades = 0;
        self.start_time = self.scheduler.now().max(self.clock.now());
        log::debug!(
            "Restarted session, generation {} at {}",
            self.generation,
            self.start_time
        );

        self.publish();
        Ok(())
    }

    fn dispatch(&mut self, intent: Intent) {
        if self.outcome().is_finished() {
            log::trace!("Game ended, dropping {:?}", intent);
            return;
        }

        match intent {
            Intent::Open(coords) => match self.store.get(coords) {
                Some(cell) if !cell.is_flagged && !cell.is_open => {
                    self.active_cascades += 1;
                    let elapsed_secs = self.elapsed_secs();
                    self.reveal_layer(vec![coords], elapsed_secs);
                }
                _ => {}
            },
            Intent::ToggleFlag(coords) => {
                if self.store.toggle_flag(coords).has_update() {
                    self.publish();
                }
            }
        }
    }

    fn reveal_layer(&mut self, layer: Vec<Coord2>, elapsed_secs: u32) {
        let layer = RevealEngine::reveal_layer(&mut self.store, &self.bombs, layer);
        if layer.has_update() {
            self.publish();
        }

        if layer.is_last() {
            self.active_cascades = self.active_cascades.saturating_sub(1);
            self.evaluate(elapsed_secs);
        } else {
            let task = Task::RevealLayer {
                generation: self.generation,
                layer: layer.next.into_iter().collect(),
                elapsed_secs,
            };
            self.scheduler.schedule(self.timings.open_delay_ms, task);
        }
    }

    fn evaluate(&mut self, elapsed_secs: u32) {
        let Some(outcome) = self.evaluator.evaluate(self.store.snapshot()) else {
            return;
        };
        log::debug!("Game {:?} after {}s", outcome, elapsed_secs);

        if outcome == GameOutcome::Won {
            let mut changed = false;
            for coords in self.bombs.iter() {
                changed |= self.store.set_flag(coords).has_update();
            }
            if changed {
                self.publish();
            }
        }

        let task = Task::Settle {
            generation: self.generation,
            outcome,
            elapsed_secs,
        };
        self.scheduler.schedule(self.timings.settle_ms, task);
    }

    fn run_task(&mut self, id: TimerId, task: Task) {
        if task.generation() != self.generation {
            log::trace!("Dropping stale task {:?}", task);
            return;
        }

        match task {
            Task::LongPress { .. } => {
                if self.press_timer != Some(id) {
                    return;
                }
                self.press_timer = None;
                if let Some(intent) = self.input.long_press_elapsed() {
                    self.dispatch(intent);
                }
            }
            Task::RevealLayer {
                layer,
                elapsed_secs,
                ..
            } => self.reveal_layer(layer, elapsed_secs),
            Task::Settle {
                outcome,
                elapsed_secs,
                ..
            } => {
                match outcome {
                    GameOutcome::Won => self.observer.on_win_game(elapsed_secs),
                    GameOutcome::Lost => self.observer.on_lost_game(elapsed_secs),
                    GameOutcome::Playing => return,
                }
                if let Err(err) = self.restart() {
                    log::warn!("Restart failed: {}", err);
                }
            }
        }
    }

    fn cancel_press_timer(&mut self) {
        if let Some(id) = self.press_timer.take() {
            self.scheduler.cancel(id);
        }
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.observer.on_board_update(self.store.snapshot());
    }
}
