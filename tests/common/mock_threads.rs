//! Mock thread service for testing the notification boundary

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use subaudit::error::{Error, NotificationErrorKind, Result};
use subaudit::notify::{CommentThread, ThreadService};

/// In-memory thread collection with call tracking and error injection
#[derive(Default)]
pub struct MockThreadService {
    threads: Mutex<Vec<CommentThread>>,
    created: Mutex<Vec<String>>,
    fail_create: Mutex<bool>,
}

impl MockThreadService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing threads
    pub fn with_threads(threads: Vec<CommentThread>) -> Self {
        Self {
            threads: Mutex::new(threads),
            ..Self::default()
        }
    }

    /// Make `create_thread` fail like a permission error
    pub fn fail_create(&self) {
        *self.fail_create.lock().unwrap() = true;
    }

    /// Bodies posted through `create_thread`, in call order
    pub fn created_bodies(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl ThreadService for MockThreadService {
    async fn list_threads(&self) -> Result<Vec<CommentThread>> {
        Ok(self.threads.lock().unwrap().clone())
    }

    async fn create_thread(&self, body: &str) -> Result<()> {
        if *self.fail_create.lock().unwrap() {
            return Err(Error::Notification {
                kind: NotificationErrorKind::Permission,
                message: "comment denied".to_string(),
            });
        }
        self.created.lock().unwrap().push(body.to_string());
        let mut threads = self.threads.lock().unwrap();
        let id = threads.len() as u64 + 1;
        threads.push(CommentThread {
            id,
            comments: vec![body.to_string()],
        });
        Ok(())
    }
}
