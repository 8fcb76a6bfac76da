//! # Task Management System
//!
//! This module provides a small thread pool for executing chunk work in
//! parallel while keeping every mutation of shared state on one thread.
//!
//! ## Architecture Overview
//!
//! - `TaskManager`: Central coordinator for task distribution and worker management
//! - `Task`: A unit of work that can be executed on a worker
//! - `TaskResult`: The result of a completed task, which can spawn additional tasks
//! - `TaskChannel`: The task sender of one worker and its bookkeeping
//!
//! Each worker has a dedicated channel for tasks. All workers report back over
//! one shared result channel, tagged with their index, so the owning thread can
//! block on "whichever finishes next" instead of polling every worker.
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. The manager hands tasks to free workers round-robin, queueing the rest
//! 3. Workers process tasks and send back results
//! 4. Results are handled on the owning thread in `process_completed_tasks()`
//! 5. Handling a result may publish new tasks
//! 6. The cycle continues until the manager is idle
//!
//! A task that panics is caught on its worker and comes back as a failed
//! result, so the worker stays usable and the in-flight count stays honest. A
//! worker thread that stops for any other reason is reaped: its in-flight
//! tasks are written off and nothing is sent to it again.
//!
//! ## Example Usage
//! ```ignore
//! let mut task_manager = TaskManager::new(num_workers, context);
//! task_manager.publish_task(Box::new(MyTask::new(...)));
//!
//! while !task_manager.is_idle() {
//!     task_manager.process_completed_tasks(true);
//!     task_manager.process_queued_tasks();
//! }
//! ```

pub mod task;

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use task::{Task, TaskContext, TaskResult};

/// A result as it travels back from a worker: the worker's index and the
/// result, or `None` if the task panicked.
type WorkerResult = (usize, Option<Box<dyn TaskResult + Send>>);

/// How long a blocking wait sleeps before checking for stopped workers.
const WORKER_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The link from the owning thread to one worker thread.
#[derive(Debug)]
pub struct TaskChannel {
    task_sender: Sender<Box<dyn Task + Send>>,
    num_tasks_in_flight: usize,
    stopped: bool,
    worker: JoinHandle<()>,
}

/// Manages a pool of worker threads and coordinates task execution.
///
/// The `TaskManager` is responsible for:
/// - Creating and joining worker threads
/// - Distributing tasks across available workers
/// - Collecting results and applying them to the shared `TaskContext`
/// - Queuing tasks when all workers are busy
pub struct TaskManager {
    channels: Vec<TaskChannel>,
    result_receiver: Receiver<WorkerResult>,
    queued_tasks: VecDeque<Box<dyn Task + Send>>,
    current_channel: usize,
    context: TaskContext,
}

/// Maximum number of tasks that can be in flight per worker channel.
///
/// Keeping this at 1 means a queued task always goes to the first worker that
/// frees up, instead of waiting behind a long task on a busy one.
pub const MAX_TASKS_IN_FLIGHT: usize = 1;

impl TaskManager {
    /// Creates a new `TaskManager` with `num_workers` threads.
    ///
    /// # Panics
    /// Panics if `num_workers` is zero or a thread cannot be spawned.
    pub fn new(num_workers: usize, context: TaskContext) -> Self {
        assert!(num_workers > 0, "a task manager needs at least one worker");

        let (result_tx, result_rx) = channel::<WorkerResult>();
        let mut channels = Vec::with_capacity(num_workers);

        for index in 0..num_workers {
            let (task_tx, task_rx) = channel::<Box<dyn Task + Send>>();
            let result_tx = result_tx.clone();

            let task_closure = move || {
                while let Ok(task) = task_rx.recv() {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| task.process())).ok();
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            };

            let worker = thread::Builder::new()
                .name(format!("chunk-worker-{index}"))
                .spawn(task_closure)
                .unwrap_or_else(|err| panic!("failed to spawn worker {index}: {err}"));

            channels.push(TaskChannel {
                task_sender: task_tx,
                num_tasks_in_flight: 0,
                stopped: false,
                worker,
            });
        }

        info!("Started {} task workers", num_workers);

        TaskManager {
            channels,
            result_receiver: result_rx,
            queued_tasks: VecDeque::new(),
            current_channel: 0,
            context,
        }
    }

    pub fn context(&self) -> &TaskContext {
        &self.context
    }

    pub fn num_workers(&self) -> usize {
        self.channels.len()
    }

    pub fn num_tasks_in_flight(&self) -> usize {
        self.channels
            .iter()
            .map(|channel| channel.num_tasks_in_flight)
            .sum()
    }

    pub fn num_queued_tasks(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Workers that can still accept tasks.
    pub fn num_live_workers(&self) -> usize {
        self.channels.iter().filter(|channel| !channel.stopped).count()
    }

    /// No task is queued or running.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty() && self.num_tasks_in_flight() == 0
    }

    /// Attempts to send a task to a specific worker channel.
    ///
    /// # Returns
    /// - `Ok(())` if the task was handed to the worker
    /// - `Err(task)` if the worker has gone away
    fn try_send_task(
        &mut self,
        task: Box<dyn Task + Send>,
        channel_idx: usize,
    ) -> Result<(), Box<dyn Task + Send>> {
        match self.channels[channel_idx].task_sender.send(task) {
            Ok(_) => {
                self.channels[channel_idx].num_tasks_in_flight += 1;
                Ok(())
            }
            Err(task) => {
                warn!("Worker {} is gone, requeueing its task", channel_idx);
                self.mark_stopped(channel_idx);
                Err(task.0)
            }
        }
    }

    /// Finds a worker channel that can accept a new task, round-robin from the
    /// last used one.
    fn find_available_channel(&self) -> Option<usize> {
        let len = self.channels.len();
        (0..len)
            .map(|step| (self.current_channel + step) % len)
            .find(|&idx| {
                let channel = &self.channels[idx];
                !channel.stopped && channel.num_tasks_in_flight < MAX_TASKS_IN_FLIGHT
            })
    }

    /// Writes off a worker and whatever it was running.
    fn mark_stopped(&mut self, channel_idx: usize) {
        let channel = &mut self.channels[channel_idx];
        if channel.num_tasks_in_flight > 0 {
            warn!(
                "Worker {} stopped with {} tasks in flight, dropping them",
                channel_idx, channel.num_tasks_in_flight
            );
        }
        channel.stopped = true;
        channel.num_tasks_in_flight = 0;
    }

    /// Marks every worker whose thread has exited as stopped.
    fn reap_stopped_workers(&mut self) {
        let finished: Vec<usize> = self
            .channels
            .iter()
            .enumerate()
            .filter(|(_, channel)| !channel.stopped && channel.worker.is_finished())
            .map(|(idx, _)| idx)
            .collect();
        for channel_idx in finished {
            self.mark_stopped(channel_idx);
        }
    }

    /// Blocks until a result arrives or nothing is left in flight.
    fn wait_for_result(&mut self) -> Option<WorkerResult> {
        while self.num_tasks_in_flight() > 0 {
            match self.result_receiver.recv_timeout(WORKER_POLL_INTERVAL) {
                Ok(result) => return Some(result),
                Err(RecvTimeoutError::Timeout) => self.reap_stopped_workers(),
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("All task workers have stopped");
                    for channel_idx in 0..self.channels.len() {
                        self.mark_stopped(channel_idx);
                    }
                }
            }
        }
        None
    }

    /// Publishes a new task for execution.
    ///
    /// # Returns
    /// - `true` if the task went straight to a worker
    /// - `false` if it was queued because all workers are busy
    pub fn publish_task(&mut self, task: Box<dyn Task + Send>) -> bool {
        match self.find_available_channel() {
            Some(channel_idx) => match self.try_send_task(task, channel_idx) {
                Ok(_) => {
                    self.current_channel = (channel_idx + 1) % self.channels.len();
                    true
                }
                Err(task) => {
                    self.queued_tasks.push_back(task);
                    false
                }
            },
            None => {
                self.queued_tasks.push_back(task);
                false
            }
        }
    }

    /// Hands queued tasks to free workers, oldest first, until either runs out.
    pub fn process_queued_tasks(&mut self) {
        while let Some(channel_idx) = self.find_available_channel() {
            let Some(task) = self.queued_tasks.pop_front() else {
                return;
            };
            match self.try_send_task(task, channel_idx) {
                Ok(_) => self.current_channel = (channel_idx + 1) % self.channels.len(),
                Err(task) => {
                    self.queued_tasks.push_front(task);
                    return;
                }
            }
        }
    }

    /// Handles every result that has arrived and publishes their follow-up
    /// tasks.
    ///
    /// With `blocking` set and work in flight, waits for at least one result
    /// first.
    ///
    /// # Returns
    /// The number of results handled.
    pub fn process_completed_tasks(&mut self, blocking: bool) -> usize {
        let mut results = Vec::new();

        if blocking {
            results.extend(self.wait_for_result());
        }
        while let Ok(result) = self.result_receiver.try_recv() {
            results.push(result);
        }

        let handled = results.len();
        let mut tasks_to_queue = Vec::new();
        for (channel_idx, result) in results {
            let channel = &mut self.channels[channel_idx];
            channel.num_tasks_in_flight = channel.num_tasks_in_flight.saturating_sub(1);
            match result {
                Some(result) => tasks_to_queue.extend(result.handle_result(&self.context)),
                None => warn!("A task panicked on worker {}, its result is lost", channel_idx),
            }
        }

        if !tasks_to_queue.is_empty() {
            debug!("Results spawned {} follow-up tasks", tasks_to_queue.len());
        }
        for task in tasks_to_queue {
            self.publish_task(task);
        }

        handled
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        for TaskChannel {
            task_sender, worker, ..
        } in self.channels.drain(..)
        {
            drop(task_sender);
            if worker.join().is_err() {
                warn!("A task worker panicked");
            }
        }
    }
}
