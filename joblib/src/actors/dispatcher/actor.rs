use super::messages::DispatcherMessage;
use crate::actors::worker::{Completion, WorkerHandle};
use crate::events::{DrainReport, JobOutcome};
use crate::job::Job;
use crate::types::{JobId, WorkerId};

use futures::future::join_all;
use std::collections::VecDeque;
use tokio::{
    select,
    sync::{mpsc, oneshot},
};

pub struct JobDispatcher {
    inbox: mpsc::UnboundedReceiver<DispatcherMessage>,
    completions: mpsc::UnboundedReceiver<Completion>,
    workers: Vec<WorkerHandle>,
    idle: Vec<WorkerId>,
    queue: VecDeque<(JobId, Job)>,
    in_flight: usize,
    finished: Vec<JobOutcome>,
    drain_waiters: Vec<oneshot::Sender<DrainReport>>,
}

impl JobDispatcher {
    pub fn spawn(inbox: mpsc::UnboundedReceiver<DispatcherMessage>, worker_count: usize) {
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let workers: Vec<_> = (0..worker_count)
            .map(|id| WorkerHandle::spawn(id, completions_tx.clone()))
            .collect();
        let actor = Self {
            inbox,
            completions,
            idle: (0..worker_count).rev().collect(),
            workers,
            queue: VecDeque::new(),
            in_flight: 0,
            finished: Vec::new(),
            drain_waiters: Vec::new(),
        };
        tokio::spawn(async move { actor.run().await });
    }

    async fn run(mut self) {
        use self::DispatcherMessage::*;
        let shutdown_response = loop {
            select! {
                maybe_msg = self.inbox.recv() => {
                    match maybe_msg {
                        Some(Submit { job_id, job }) => self.submit(job_id, job),
                        Some(Drain { response }) => self.drain(response),
                        Some(Shutdown { response }) => break Some(response),
                        // every handle dropped
                        None => break None,
                    }
                }
                Some((worker, outcome)) = self.completions.recv() => {
                    self.job_finished(worker, outcome);
                }
            }
        };
        // refuse further messages before reporting back
        self.inbox.close();
        self.shutdown().await;
        if let Some(response) = shutdown_response {
            let _ = response.send(());
        }
    }

    fn submit(&mut self, job_id: JobId, job: Job) {
        self.queue.push_back((job_id, job));
        self.dispatch();
    }

    /// Hand queued jobs to idle workers until one of the two runs out.
    fn dispatch(&mut self) {
        while !self.queue.is_empty() {
            let worker = match self.idle.pop() {
                Some(worker) => worker,
                None => return,
            };
            let (job_id, job) = match self.queue.pop_front() {
                Some(next) => next,
                None => return,
            };
            match self.workers[worker].run(job_id, job) {
                Ok(()) => self.in_flight += 1,
                Err((job_id, job)) => {
                    // a dead worker is never returned to the idle list
                    log::error!("worker {} is gone, requeueing job {}", worker, job_id);
                    self.queue.push_front((job_id, job));
                }
            }
        }
    }

    fn job_finished(&mut self, worker: WorkerId, outcome: JobOutcome) {
        if !outcome.status.success() {
            log::warn!("job {} `{}` {}", outcome.id, outcome.job, outcome.status);
        }
        self.in_flight -= 1;
        self.idle.push(worker);
        self.finished.push(outcome);
        self.dispatch();
        self.notify_drained();
    }

    fn drain(&mut self, response: oneshot::Sender<DrainReport>) {
        self.drain_waiters.push(response);
        self.notify_drained();
    }

    fn is_drained(&self) -> bool {
        self.queue.is_empty() && self.in_flight == 0
    }

    fn notify_drained(&mut self) {
        if !self.is_drained() || self.drain_waiters.is_empty() {
            return;
        }
        let report = DrainReport {
            outcomes: std::mem::take(&mut self.finished),
        };
        for waiter in self.drain_waiters.drain(..) {
            let _ = waiter.send(report.clone());
        }
    }

    async fn shutdown(&mut self) {
        if !self.queue.is_empty() {
            log::warn!(
                "shutting down with {} queued jobs which will not run",
                self.queue.len()
            );
            self.queue.clear();
        }
        let tasks = self.workers.drain(..).map(WorkerHandle::stop);
        // workers finish their current job before exiting
        let joined = join_all(tasks).await;
        for result in joined {
            if let Err(e) = result {
                log::error!("worker task failed: {}", e);
            }
        }
        log::debug!("job dispatcher stopped");
    }
}
