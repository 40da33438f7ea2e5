// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, warn};

use crate::ids::UserId;
use crate::model::{Post, Record, ViewStatus};

/// The remote user directory. `get_user` returns `Ok(None)` when the
/// service reports the user as absent.
pub trait Directory {
    fn list_users(&self) -> Result<Vec<Record>>;
    fn get_user(&self, id: UserId) -> Result<Option<Record>>;
    fn list_posts(&self, id: UserId) -> Result<Vec<Post>>;
}

/// Identifies one detail-view activation. Fetch outcomes carry it back so
/// results from a superseded activation can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Activation {
    id: UserId,
    generation: u64,
}

impl Activation {
    pub const fn id(self) -> UserId {
        self.id
    }

    pub const fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The user is known; request the posts next.
    FetchPosts,
    /// The activation reached a terminal status or ignored the outcome.
    Done,
    /// The outcome belongs to an older activation and was discarded.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailLoader {
    current: Option<Activation>,
    generation: u64,
    status: ViewStatus,
    user: Option<Record>,
    posts: Vec<Post>,
}

impl DetailLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, id: UserId) -> Activation {
        self.generation = self.generation.wrapping_add(1);
        let activation = Activation {
            id,
            generation: self.generation,
        };
        self.current = Some(activation);
        self.status = ViewStatus::Loading;
        self.user = None;
        self.posts.clear();
        debug!(user_id = id.get(), generation = self.generation, "detail activated");
        activation
    }

    pub fn is_current(&self, activation: &Activation) -> bool {
        self.current.as_ref() == Some(activation)
    }

    pub fn commit_user(&mut self, activation: &Activation, outcome: Result<Option<Record>>) -> Step {
        if !self.is_current(activation) {
            debug!(user_id = activation.id.get(), "dropping stale user response");
            return Step::Stale;
        }
        if self.status.is_terminal() || self.user.is_some() {
            return Step::Done;
        }

        match outcome {
            Ok(Some(user)) => {
                self.user = Some(user);
                Step::FetchPosts
            }
            Ok(None) => {
                debug!(user_id = activation.id.get(), "user not found");
                self.status = ViewStatus::NotFound;
                Step::Done
            }
            Err(error) => {
                warn!(user_id = activation.id.get(), error = %format!("{error:#}"), "fetch user failed");
                self.status = ViewStatus::NotFound;
                Step::Done
            }
        }
    }

    /// Applies the posts outcome. A failed request still leaves the view
    /// ready, with no posts.
    pub fn commit_posts(&mut self, activation: &Activation, outcome: Result<Vec<Post>>) -> Step {
        if !self.is_current(activation) {
            debug!(user_id = activation.id.get(), "dropping stale posts response");
            return Step::Stale;
        }
        if self.status.is_terminal() || self.user.is_none() {
            return Step::Done;
        }

        match outcome {
            Ok(posts) => self.posts = posts,
            Err(error) => {
                warn!(user_id = activation.id.get(), error = %format!("{error:#}"), "fetch posts failed");
                self.posts.clear();
            }
        }
        self.status = ViewStatus::Ready;
        Step::Done
    }

    /// Runs both fetches in order on the calling thread.
    pub fn load<D: Directory + ?Sized>(&mut self, directory: &D, id: UserId) -> ViewStatus {
        let activation = self.activate(id);
        let user = directory.get_user(id);
        if self.commit_user(&activation, user) == Step::FetchPosts {
            let posts = directory.list_posts(id);
            self.commit_posts(&activation, posts);
        }
        self.status
    }

    pub fn activation(&self) -> Option<Activation> {
        self.current
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn user(&self) -> Option<&Record> {
        self.user.as_ref()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The user and posts, only once the view is ready.
    pub fn ready(&self) -> Option<(&Record, &[Post])> {
        match (self.status, &self.user) {
            (ViewStatus::Ready, Some(user)) => Some((user, &self.posts)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailLoader, Directory, Step};
    use crate::ids::{PostId, UserId};
    use crate::model::{Post, Record, ViewStatus};
    use anyhow::{Result, anyhow};
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Debug, Default)]
    struct FakeDirectory {
        users: Vec<Record>,
        posts: Vec<Post>,
        fail_user: bool,
        fail_posts: bool,
        calls: RefCell<Vec<String>>,
    }

    impl FakeDirectory {
        fn with_user(id: i64, name: &str) -> Result<Self> {
            Ok(Self {
                users: vec![Record::try_from(json!({"id": id, "name": name}))?],
                posts: vec![post(1, id, "first"), post(2, id, "second")],
                ..Self::default()
            })
        }
    }

    impl Directory for FakeDirectory {
        fn list_users(&self) -> Result<Vec<Record>> {
            self.calls.borrow_mut().push("users".to_owned());
            Ok(self.users.clone())
        }

        fn get_user(&self, id: UserId) -> Result<Option<Record>> {
            self.calls.borrow_mut().push(format!("user {id}"));
            if self.fail_user {
                return Err(anyhow!("connection refused"));
            }
            Ok(self.users.iter().find(|user| user.id() == Some(id)).cloned())
        }

        fn list_posts(&self, id: UserId) -> Result<Vec<Post>> {
            self.calls.borrow_mut().push(format!("posts {id}"));
            if self.fail_posts {
                return Err(anyhow!("server returned 500"));
            }
            Ok(self
                .posts
                .iter()
                .filter(|post| post.user_id == Some(id))
                .cloned()
                .collect())
        }
    }

    fn post(id: i64, user_id: i64, title: &str) -> Post {
        Post {
            id: PostId::new(id),
            user_id: Some(UserId::new(user_id)),
            title: title.to_owned(),
            body: format!("{title} body"),
        }
    }

    #[test]
    fn activation_starts_loading() {
        let mut loader = DetailLoader::new();
        let activation = loader.activate(UserId::new(4));
        assert_eq!(loader.status(), ViewStatus::Loading);
        assert_eq!(activation.id(), UserId::new(4));
        assert!(loader.is_current(&activation));
        assert!(loader.ready().is_none());
    }

    #[test]
    fn successful_load_is_ready_with_posts() -> Result<()> {
        let directory = FakeDirectory::with_user(1, "Leanne Graham")?;
        let mut loader = DetailLoader::new();

        assert_eq!(loader.load(&directory, UserId::new(1)), ViewStatus::Ready);
        let (user, posts) = loader.ready().expect("ready view");
        assert_eq!(user.text("name"), "Leanne Graham");
        assert_eq!(posts.len(), 2);
        assert_eq!(*directory.calls.borrow(), vec!["user 1", "posts 1"]);
        Ok(())
    }

    #[test]
    fn user_fetch_failure_is_not_found_and_skips_posts() -> Result<()> {
        let directory = FakeDirectory {
            fail_user: true,
            ..FakeDirectory::with_user(1, "Leanne Graham")?
        };
        let mut loader = DetailLoader::new();

        assert_eq!(loader.load(&directory, UserId::new(1)), ViewStatus::NotFound);
        assert!(loader.user().is_none());
        assert_eq!(*directory.calls.borrow(), vec!["user 1"]);
        Ok(())
    }

    #[test]
    fn absent_user_is_not_found_and_skips_posts() -> Result<()> {
        let directory = FakeDirectory::with_user(1, "Leanne Graham")?;
        let mut loader = DetailLoader::new();

        assert_eq!(loader.load(&directory, UserId::new(99)), ViewStatus::NotFound);
        assert_eq!(*directory.calls.borrow(), vec!["user 99"]);
        Ok(())
    }

    #[test]
    fn posts_failure_is_ready_with_no_posts() -> Result<()> {
        let directory = FakeDirectory {
            fail_posts: true,
            ..FakeDirectory::with_user(1, "Leanne Graham")?
        };
        let mut loader = DetailLoader::new();

        assert_eq!(loader.load(&directory, UserId::new(1)), ViewStatus::Ready);
        let (user, posts) = loader.ready().expect("ready view");
        assert_eq!(user.id(), Some(UserId::new(1)));
        assert!(posts.is_empty());
        Ok(())
    }

    #[test]
    fn posts_failure_does_not_keep_posts_from_previous_activation() -> Result<()> {
        let mut directory = FakeDirectory::with_user(1, "Leanne Graham")?;
        let mut loader = DetailLoader::new();
        loader.load(&directory, UserId::new(1));
        assert_eq!(loader.posts().len(), 2);

        directory.fail_posts = true;
        loader.load(&directory, UserId::new(1));
        assert_eq!(loader.status(), ViewStatus::Ready);
        assert!(loader.posts().is_empty());
        Ok(())
    }

    #[test]
    fn stale_responses_are_dropped() -> Result<()> {
        let mut loader = DetailLoader::new();
        let first = loader.activate(UserId::new(1));
        let second = loader.activate(UserId::new(2));

        let late_user = Record::try_from(json!({"id": 1, "name": "late"}))?;
        assert_eq!(loader.commit_user(&first, Ok(Some(late_user))), Step::Stale);
        assert_eq!(loader.commit_posts(&first, Ok(vec![post(9, 1, "late")])), Step::Stale);
        assert_eq!(loader.status(), ViewStatus::Loading);
        assert!(loader.user().is_none());

        let user = Record::try_from(json!({"id": 2, "name": "Ervin Howell"}))?;
        assert_eq!(loader.commit_user(&second, Ok(Some(user))), Step::FetchPosts);
        assert_eq!(loader.status(), ViewStatus::Loading);
        assert_eq!(loader.commit_posts(&second, Ok(Vec::new())), Step::Done);
        assert_eq!(loader.status(), ViewStatus::Ready);
        Ok(())
    }

    #[test]
    fn reactivating_the_same_id_invalidates_older_token() -> Result<()> {
        let mut loader = DetailLoader::new();
        let first = loader.activate(UserId::new(1));
        let second = loader.activate(UserId::new(1));
        assert_ne!(first, second);

        assert_eq!(loader.commit_user(&first, Ok(None)), Step::Stale);
        assert_eq!(loader.status(), ViewStatus::Loading);
        Ok(())
    }

    #[test]
    fn terminal_status_ignores_further_outcomes() -> Result<()> {
        let mut loader = DetailLoader::new();
        let activation = loader.activate(UserId::new(3));
        assert_eq!(loader.commit_user(&activation, Ok(None)), Step::Done);
        assert_eq!(loader.status(), ViewStatus::NotFound);

        let user = Record::try_from(json!({"id": 3}))?;
        assert_eq!(loader.commit_user(&activation, Ok(Some(user))), Step::Done);
        assert_eq!(loader.commit_posts(&activation, Ok(Vec::new())), Step::Done);
        assert_eq!(loader.status(), ViewStatus::NotFound);
        Ok(())
    }

    #[test]
    fn posts_before_user_are_ignored() {
        let mut loader = DetailLoader::new();
        let activation = loader.activate(UserId::new(5));
        assert_eq!(loader.commit_posts(&activation, Ok(Vec::new())), Step::Done);
        assert_eq!(loader.status(), ViewStatus::Loading);
    }

    #[test]
    fn list_users_is_reachable_through_trait_objects() -> Result<()> {
        let directory = FakeDirectory::with_user(1, "Leanne Graham")?;
        let dynamic: &dyn Directory = &directory;
        assert_eq!(dynamic.list_users()?.len(), 1);

        let mut loader = DetailLoader::new();
        assert_eq!(loader.load(dynamic, UserId::new(1)), ViewStatus::Ready);
        Ok(())
    }
}
