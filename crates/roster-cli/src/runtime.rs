// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use roster_api::Client;
use roster_app::{Activation, Post, Record, UserId};
use roster_tui::{AppRuntime, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

/// Serves the UI from the remote directory. Fetches started by the UI run
/// on their own threads so the event loop keeps drawing.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for ApiRuntime {
    fn load_users(&mut self) -> Result<Vec<Record>> {
        self.client.list_users()
    }

    fn load_user(&mut self, id: UserId) -> Result<Option<Record>> {
        self.client.get_user(id)
    }

    fn load_posts(&mut self, id: UserId) -> Result<Vec<Post>> {
        self.client.list_user_posts(id)
    }

    fn spawn_users_fetch(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let client = self.client.clone();
        thread::spawn(move || {
            let outcome = client.list_users();
            let _ = tx.send(InternalEvent::UsersFetched(outcome));
        });
        Ok(())
    }

    fn spawn_user_fetch(&mut self, activation: Activation, tx: Sender<InternalEvent>) -> Result<()> {
        debug!(
            user_id = activation.id().get(),
            generation = activation.generation(),
            "spawn user fetch"
        );
        let client = self.client.clone();
        thread::spawn(move || {
            let outcome = client.get_user(activation.id());
            let _ = tx.send(InternalEvent::UserFetched {
                activation,
                outcome,
            });
        });
        Ok(())
    }

    fn spawn_posts_fetch(
        &mut self,
        activation: Activation,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::spawn(move || {
            let outcome = client.list_user_posts(activation.id());
            let _ = tx.send(InternalEvent::PostsFetched {
                activation,
                outcome,
            });
        });
        Ok(())
    }
}
