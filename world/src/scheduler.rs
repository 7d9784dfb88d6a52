//! Level-owned timer wheel driving distraction expiry, push decay, the alarm
//! pulse and the post-victory transition.

use std::time::Duration;

use pranksters_core::{LevelId, PropId};

/// Handle returned when a task is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TimerId(u64);

/// Work performed when a task becomes due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Job {
    DistractionExpiry,
    HaltProp(PropId),
    AlarmPulse,
    LevelTransition(Option<LevelId>),
}

impl Job {
    /// Jobs that keep running after the level reached a terminal outcome.
    pub(crate) const fn survives_outcome(self) -> bool {
        matches!(self, Self::AlarmPulse | Self::LevelTransition(_))
    }
}

#[derive(Debug)]
struct Task {
    id: TimerId,
    due: Duration,
    period: Option<Duration>,
    job: Job,
}

/// Cancellable one-shot and repeating tasks ordered by due time.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    now: Duration,
    next_id: u64,
    tasks: Vec<Task>,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub(crate) const fn now(&self) -> Duration {
        self.now
    }

    pub(crate) fn schedule_once(&mut self, delay: Duration, job: Job) -> TimerId {
        self.insert(delay, None, job)
    }

    /// Schedules a task that fires every `period` until cancelled.
    ///
    /// A zero period degrades to a one-shot task.
    pub(crate) fn schedule_repeating(&mut self, period: Duration, job: Job) -> TimerId {
        let period = (!period.is_zero()).then_some(period);
        self.insert(period.unwrap_or_default(), period, job)
    }

    /// Cancels a pending task, returning whether it was still pending.
    pub(crate) fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    pub(crate) fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Drops every task whose job does not satisfy the predicate.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(Job) -> bool) {
        self.tasks.retain(|task| keep(task.job));
    }

    /// Advances the clock and returns the jobs that became due, in firing order.
    ///
    /// Ties on the due time fire in scheduling order. Repeating tasks fire once
    /// for every period that elapsed.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<(TimerId, Job)> {
        self.now = self.now.saturating_add(dt);

        let mut fired = Vec::new();
        loop {
            let next = self
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| task.due <= self.now)
                .min_by_key(|(_, task)| (task.due, task.id))
                .map(|(index, _)| index);

            let Some(index) = next else {
                break;
            };

            let (id, job, period) = {
                let task = &self.tasks[index];
                (task.id, task.job, task.period)
            };
            fired.push((id, job));
            match period {
                Some(period) => {
                    let task = &mut self.tasks[index];
                    task.due = task.due.saturating_add(period);
                }
                None => {
                    let _ = self.tasks.swap_remove(index);
                }
            }
        }

        fired
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, job: Job) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.tasks.push(Task {
            id,
            due: self.now.saturating_add(delay),
            period,
            job,
        });
        id
    }
}
