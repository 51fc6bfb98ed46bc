#![allow(dead_code)]

use std::sync::Mutex;

use forkful_core::application::ports::{ConfirmIntent, NavigationHost, Notice, NoticePublisher};

/// Collects every published notice for assertion.
#[derive(Default)]
pub struct CapturingNoticePublisher {
    notices: Mutex<Vec<Notice>>,
}

impl CapturingNoticePublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl NoticePublisher for CapturingNoticePublisher {
    fn publish(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// Host that records compensating pushes instead of touching real history.
pub struct RecordingNavigationHost {
    path: String,
    pushed: Mutex<Vec<String>>,
}

impl RecordingNavigationHost {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            pushed: Mutex::new(Vec::new()),
        }
    }

    pub fn pushed(&self) -> Vec<String> {
        self.pushed.lock().unwrap().clone()
    }
}

impl NavigationHost for RecordingNavigationHost {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn push_path(&self, path: &str) {
        self.pushed.lock().unwrap().push(path.to_string());
    }
}

/// Confirm capability with a fixed answer, recording every prompt it saw.
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn asked(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl ConfirmIntent for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }
}
