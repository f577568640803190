use std::sync::{Mutex, MutexGuard, PoisonError};

/// The outcome of [`BoxJobs::pop`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Pop<J> {
    /// A job to process.
    Job(J),
    /// No job is queued but other workers may still produce some: poll again.
    Wait,
    /// Every job has been processed, or the work was stopped.
    Done,
}

#[derive(Debug)]
struct JobsState<J> {
    jobs: Vec<J>,
    in_flight: usize,
    stop_all: bool,
}

/// A stack of jobs shared by a set of workers that produce new jobs while processing others.
///
/// The work is over once the stack is empty and no worker still holds a job, since only
/// workers holding a job can push new ones.
#[derive(Debug)]
pub(crate) struct BoxJobs<J> {
    state: Mutex<JobsState<J>>,
}

impl<J> BoxJobs<J> {
    pub fn new(initial: impl IntoIterator<Item = J>) -> Self {
        Self {
            state: Mutex::new(JobsState {
                jobs: initial.into_iter().collect(),
                in_flight: 0,
                stop_all: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<JobsState<J>> {
        // Every update of the state is a single statement: a panicking holder
        // cannot leave it inconsistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes a new job.
    pub fn push(&self, job: J) {
        self.lock().jobs.push(job);
    }

    /// Takes a job.
    ///
    /// `returning_previous` must be `true` if the caller is done with the job it obtained from
    /// its previous call, in which case this job is no longer counted as in flight.
    pub fn pop(&self, returning_previous: bool) -> Pop<J> {
        let mut state = self.lock();

        if returning_previous {
            state.in_flight = state.in_flight.saturating_sub(1);
        }

        if state.stop_all {
            return Pop::Done;
        }

        match state.jobs.pop() {
            Some(job) => {
                state.in_flight += 1;
                Pop::Job(job)
            }
            None if state.in_flight > 0 => Pop::Wait,
            None => Pop::Done,
        }
    }

    /// Makes every subsequent call to [`Self::pop`] return [`Pop::Done`].
    pub fn stop_all(&self) {
        self.lock().stop_all = true;
    }

    /// The number of jobs queued or being processed.
    pub fn pending(&self) -> usize {
        let state = self.lock();
        state.jobs.len() + state.in_flight
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().stop_all
    }
}
