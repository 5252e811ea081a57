//! Frame scheduling port
//!
//! The writer never mutates the DOM inline; it asks its host to run the
//! mutation after the current render pass commits.

use std::cell::RefCell;
use std::collections::VecDeque;

pub type FrameTask = Box<dyn FnOnce() + 'static>;

pub trait FrameScheduler {
    /// Queue `task` for the next frame. Tasks are never cancelled.
    fn request_frame(&self, task: FrameTask);
}

/// Scheduler driven by hand: nothing runs until `run_frame` is called
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<FrameTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every task queued before this call, in request order.
    /// Tasks requested while the frame runs land in the next frame.
    pub fn run_frame(&self) -> usize {
        let frame: Vec<FrameTask> = self.queue.borrow_mut().drain(..).collect();
        let count = frame.len();
        for task in frame {
            task();
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, task: FrameTask) {
        self.queue.borrow_mut().push_back(task);
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for std::rc::Rc<S> {
    fn request_frame(&self, task: FrameTask) {
        (**self).request_frame(task)
    }
}
