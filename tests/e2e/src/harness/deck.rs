use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use kanjikatch_core::{
    ItemKind, LearnerProgress, ReviewItem, ReviewSession, ScheduleUpdate, Scheduler,
    SessionSummary, SessionType, build_queue,
    progress::{calculate_xp_with_config, review_day},
};

/// In-memory deck of items plus a learner, driven by a manual clock
///
/// Each test gets its own deck so nothing leaks between tests. The clock
/// only moves when the test advances it.
///
/// # Example
///
/// ```rust,ignore
/// let mut deck = TestDeck::new();
/// deck.add_item("日", ItemKind::Kanji);
///
/// deck.review("日", Grade::Good);
/// deck.advance_days(1);
/// assert_eq!(deck.due_ids(), vec!["日"]);
/// ```
pub struct TestDeck {
    pub scheduler: Scheduler,
    pub items: Vec<ReviewItem>,
    pub learner: LearnerProgress,
    now: DateTime<Utc>,
    session: Option<ReviewSession>,
    correct_run: u32,
}

impl Default for TestDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDeck {
    /// Fixed start instant shared by every deck: 2026-02-27 10:00 UTC
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 27, 10, 0, 0)
            .single()
            .expect("valid epoch")
    }

    /// Empty deck with the default tuning
    pub fn new() -> Self {
        Self::with_scheduler(Scheduler::new())
    }

    /// Empty deck with a custom scheduler
    pub fn with_scheduler(scheduler: Scheduler) -> Self {
        let goal = scheduler.progress_config().default_daily_goal;
        Self {
            scheduler,
            items: Vec::new(),
            learner: LearnerProgress::new(goal),
            now: Self::epoch(),
            session: None,
            correct_run: 0,
        }
    }

    // ========================================================================
    // CLOCK
    // ========================================================================

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        review_day(self.now)
    }

    pub fn advance_days(&mut self, days: i64) {
        self.now += Duration::days(days);
    }

    pub fn advance_hours(&mut self, hours: i64) {
        self.now += Duration::hours(hours);
    }

    /// Move the clock to an item's due time
    pub fn jump_to_due(&mut self, id: &str) {
        if let Some(at) = self.item(id).next_review_at {
            self.now = at;
        }
    }

    // ========================================================================
    // ITEMS
    // ========================================================================

    pub fn add_item(&mut self, id: &str, kind: ItemKind) {
        self.items.push(ReviewItem::new(id, kind));
    }

    /// Look up an item; panics if missing
    pub fn item(&self, id: &str) -> &ReviewItem {
        self.items
            .iter()
            .find(|item| item.id == id)
            .unwrap_or_else(|| panic!("no item {id}"))
    }

    fn item_mut(&mut self, id: &str) -> &mut ReviewItem {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .unwrap_or_else(|| panic!("no item {id}"))
    }

    /// Ids of the items a session of this type would show right now
    pub fn queue_ids(&self, session_type: SessionType, limit: usize) -> Vec<String> {
        build_queue(&self.items, session_type, limit, self.now)
            .into_iter()
            .map(|item| item.id.clone())
            .collect()
    }

    // ========================================================================
    // REVIEWS
    // ========================================================================

    /// Grade an item at the current instant, updating item, learner and any
    /// open session. Returns the schedule update and the XP awarded.
    pub fn review(&mut self, id: &str, grade: kanjikatch_core::Grade) -> (ScheduleUpdate, u32) {
        let now = self.now;
        let today = self.today();
        let state = self.item(id).state;
        let update = self.scheduler.review(grade, &state, now);
        self.item_mut(id).apply(&update);

        let streak_bonus = self.correct_run;
        let progress = self.scheduler.progress_config().clone();
        let xp = self
            .learner
            .record_review_with_config(grade, streak_bonus, today, &progress);
        debug_assert_eq!(xp, calculate_xp_with_config(grade, streak_bonus, &progress));

        self.correct_run = if grade.is_hit() { self.correct_run + 1 } else { 0 };
        if let Some(session) = self.session.as_mut() {
            session.record_answer(grade.is_hit(), xp);
        }

        (update, xp)
    }

    // ========================================================================
    // SESSIONS
    // ========================================================================

    pub fn start_session(&mut self, session_type: SessionType) {
        self.session = Some(ReviewSession::start(session_type, self.now));
        self.correct_run = 0;
    }

    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    /// Close the open session and credit the completion bonus
    pub fn finish_session(&mut self) -> SessionSummary {
        let now = self.now;
        let today = self.today();
        let progress = self.scheduler.progress_config().clone();
        let session = self.session.as_mut().expect("no open session");
        let summary = session
            .complete(now, progress.session_completion_xp)
            .expect("session completes once");
        self.learner.complete_session_with_config(today, &progress);
        summary
    }
}
