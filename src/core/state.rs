use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;
use std::collections::{BTreeMap, VecDeque};

use crate::sim::JobSpec;

// Index into Job Vec (== job number)
pub type JobId = usize;
pub type Ticks = u64;
// Admission order; assigned when a job enters the system
pub type Seq = u64;
new_key_type! {
    pub struct ReadySetId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    NotArrived,
    Ready,
    Running,
    Completed,
}

impl JobStatus {
    /// Status code used in reports: 0 not arrived, 1 arrived, 2 completed.
    pub fn code(self) -> u8 {
        match self {
            Self::NotArrived => 0,
            Self::Ready | Self::Running => 1,
            Self::Completed => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub arrival_time: f64,
    pub size: f64,
    pub time_left: f64,
    pub status: JobStatus,
    pub seq: Option<Seq>,
    pub start_time: Option<Ticks>,
    pub end_time: Option<Ticks>,
    pub context_switches: u32,
    pub response_time: Option<f64>,
    pub turnaround: Option<f64>,
}

impl Job {
    fn new(id: JobId, spec: &JobSpec) -> Self {
        Self {
            id,
            arrival_time: spec.arrival_time,
            size: spec.size,
            time_left: spec.size,
            status: JobStatus::NotArrived,
            seq: None,
            start_time: None,
            end_time: None,
            context_switches: 0,
            response_time: None,
            turnaround: None,
        }
    }
}

/// Ordering key for ranked ready sets: smallest `key` first, then earliest
/// admission.
#[derive(Debug, Clone, Copy)]
pub struct Rank {
    pub key: f64,
    pub seq: Seq,
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Rank {}

#[derive(Debug)]
pub enum ReadySet {
    Fifo {
        jobs: VecDeque<JobId>,
    },
    Ranked {
        jobs: KeyedPriorityQueue<JobId, Rank>,
    },
    Ring {
        jobs: BTreeMap<Seq, JobId>,
        cursor: Option<Seq>,
    },
}

impl ReadySet {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            jobs: VecDeque::new(),
        }
    }

    pub fn new_ranked() -> Self {
        Self::Ranked {
            jobs: KeyedPriorityQueue::new(),
        }
    }

    pub fn new_ring() -> Self {
        Self::Ring {
            jobs: BTreeMap::new(),
            cursor: None,
        }
    }

    pub fn contains(&self, job_id: JobId) -> bool {
        match self {
            Self::Fifo { jobs } => jobs.contains(&job_id),
            Self::Ranked { jobs } => jobs.iter().any(|j| *j.0 == job_id),
            Self::Ring { jobs, .. } => jobs.values().any(|j| *j == job_id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { jobs } => jobs.len(),
            Self::Ranked { jobs } => jobs.len(),
            Self::Ring { jobs, .. } => jobs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pop(&mut self) -> Option<JobId> {
        match self {
            Self::Fifo { jobs } => jobs.pop_front(),
            Self::Ranked { jobs } => jobs.pop().map(|j| j.0),
            Self::Ring { jobs, cursor } => {
                // First entry past the cursor, wrapping around to the oldest one
                let seq = match *cursor {
                    Some(c) => jobs
                        .range(c + 1..)
                        .next()
                        .or_else(|| jobs.iter().next())
                        .map(|(seq, _)| *seq),
                    None => jobs.keys().next().copied(),
                }?;
                *cursor = Some(seq);
                jobs.remove(&seq)
            }
        }
    }
}

#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub jobs: Vec<Job>,
    pub running: Option<JobId>,
    pub ready_sets: SlotMap<ReadySetId, ReadySet>,
    pub job_to_ready: FxHashMap<JobId, ReadySetId>,
    pub completed: usize,

    // Increment upon admission
    next_seq: Seq,
}

impl SimCtx {
    pub fn new(specs: &[JobSpec]) -> Self {
        Self {
            now: 0,
            jobs: specs
                .iter()
                .enumerate()
                .map(|(id, spec)| Job::new(id, spec))
                .collect(),
            running: None,
            ready_sets: SlotMap::with_key(),
            job_to_ready: FxHashMap::default(),
            completed: 0,
            next_seq: 0,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn create_ready_fifo(&mut self) -> ReadySetId {
        self.ready_sets.insert(ReadySet::new_fifo())
    }

    pub fn create_ready_ranked(&mut self) -> ReadySetId {
        self.ready_sets.insert(ReadySet::new_ranked())
    }

    pub fn create_ready_ring(&mut self) -> ReadySetId {
        self.ready_sets.insert(ReadySet::new_ring())
    }

    fn ready_push(&mut self, set_id: ReadySetId, job_id: JobId, key: Option<f64>) {
        assert!(
            !self.job_to_ready.contains_key(&job_id),
            "Job {job_id} already present in some ready set"
        );

        let job = self.job(job_id);
        debug_assert_eq!(
            job.status,
            JobStatus::Ready,
            "Job {job_id} must be Ready when enqueued"
        );
        let seq = job.seq.expect("Enqueued job must have been admitted");

        let set = self.ready_sets.get_mut(set_id).expect("Unknown ready set");
        match set {
            ReadySet::Fifo { jobs } => jobs.push_back(job_id),
            ReadySet::Ranked { jobs } => {
                let key = key.expect("Attempted to push to a ranked ready set with no key");
                jobs.push(job_id, Rank { key, seq });
            }
            ReadySet::Ring { jobs, .. } => {
                jobs.insert(seq, job_id);
            }
        };

        self.job_to_ready.insert(job_id, set_id);
    }

    pub fn ready_push_back(&mut self, set_id: ReadySetId, job_id: JobId) {
        self.ready_push(set_id, job_id, None);
    }

    pub fn ready_push_ranked(&mut self, set_id: ReadySetId, job_id: JobId, key: f64) {
        self.ready_push(set_id, job_id, Some(key));
    }

    pub fn ready_pop(&mut self, set_id: ReadySetId) -> Option<JobId> {
        let job = self.ready_sets.get_mut(set_id)?.pop()?;

        let removed = self.job_to_ready.remove(&job);
        debug_assert!(removed.is_some(), "Job {job} missing ready set membership");

        Some(job)
    }

    pub fn ready_len(&self, set_id: ReadySetId) -> usize {
        self.ready_sets.get(set_id).map_or(0, ReadySet::len)
    }

    pub fn job_in_any_ready_set(&self, job_id: JobId) -> bool {
        self.job_to_ready.contains_key(&job_id)
    }

    pub fn job(&self, job_id: JobId) -> &Job {
        &self.jobs[job_id]
    }

    pub fn job_mut(&mut self, job_id: JobId) -> &mut Job {
        &mut self.jobs[job_id]
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.completed == self.jobs.len()
    }

    // First admission assigns the sequence number; later calls re-ready a preempted job
    pub fn mark_ready(&mut self, job_id: JobId) {
        let seq = self.next_seq;
        let job = &mut self.jobs[job_id];
        match job.status {
            JobStatus::NotArrived => {
                job.seq = Some(seq);
                self.next_seq += 1;
            }
            JobStatus::Running => {}
            status => panic!("Job {job_id} cannot become Ready from {status:?}"),
        }
        job.status = JobStatus::Ready;
    }

    pub fn set_running(&mut self, job_id: JobId) {
        debug_assert!(
            !self.job_to_ready.contains_key(&job_id),
            "Running job {job_id} must not be enqueued"
        );
        debug_assert!(self.running.is_none(), "A job is already running");

        let job = self.job_mut(job_id);
        assert_eq!(
            job.status,
            JobStatus::Ready,
            "Job {job_id} selected to run while not Ready"
        );
        job.status = JobStatus::Running;
        self.running = Some(job_id);
    }

    pub fn clear_running(&mut self) {
        self.running = None;
    }

    pub fn mark_started(&mut self, job_id: JobId, start_time: Ticks) {
        let job = self.job_mut(job_id);
        debug_assert!(job.start_time.is_none(), "Job {job_id} started twice");
        job.start_time = Some(start_time);
        job.response_time = Some(start_time as f64 - job.arrival_time);
        job.context_switches += 1;
    }

    // Consume one unit of service; true once nothing is left
    pub fn consume_tick(&mut self, job_id: JobId) -> bool {
        let job = self.job_mut(job_id);
        debug_assert_eq!(job.status, JobStatus::Running);
        job.time_left -= 1.0;
        if job.time_left <= 0.0 {
            job.time_left = 0.0;
            return true;
        }
        false
    }

    pub fn mark_completed(&mut self, job_id: JobId, end_time: Ticks) {
        debug_assert!(
            !self.job_to_ready.contains_key(&job_id),
            "Completing job {job_id} that is still enqueued"
        );

        let job = &mut self.jobs[job_id];
        debug_assert!(
            job.status == JobStatus::Running,
            "Job {job_id} must have been running before marked complete"
        );

        job.status = JobStatus::Completed;
        job.time_left = 0.0;
        job.end_time = Some(end_time);
        job.turnaround = Some(end_time as f64 - job.arrival_time);
        self.completed += 1;
    }
}
