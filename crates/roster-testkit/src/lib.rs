// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use roster_app::{Post, PostId, Record, UserId};
use serde_json::{Value, json};
use std::path::PathBuf;

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Élodie", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "López", "Gray", "Ward", "Young", "Díaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const CITIES: [&str; 14] = [
    "Austin",
    "Seattle",
    "Denver",
    "Madison",
    "Raleigh",
    "Pittsburgh",
    "Portland",
    "Boise",
    "Phoenix",
    "Nashville",
    "Columbus",
    "Minneapolis",
    "Omaha",
    "Tucson",
];
const STREET_NAMES: [&str; 12] = [
    "Cedar", "Maple", "Oak", "Pine", "Willow", "Elm", "Birch", "Juniper", "Sunset", "Ridge",
    "Valley", "Meadow",
];
const STREET_SUFFIXES: [&str; 5] = ["Street", "Avenue", "Lane", "Court", "Way"];

const COMPANY_STEMS: [&str; 12] = [
    "Romaguera",
    "Deckow",
    "Keebler",
    "Hoeger",
    "Abernathy",
    "Considine",
    "Yost",
    "Johns",
    "Robel",
    "Kulas",
    "Lockman",
    "Schuster",
];
const COMPANY_SUFFIXES: [&str; 5] = ["Group", "LLC", "Inc", "and Sons", "Crist"];
const CATCH_PHRASES: [&str; 6] = [
    "Multi-layered client-server neural-net",
    "Proactive didactic contingency",
    "Face to face bifurcated interface",
    "Centralized empowering task-force",
    "Switchable contextually-based project",
    "Synchronised bottom-line interface",
];
const SECTORS: [&str; 6] = [
    "harness real-time e-markets",
    "synergize scalable supply-chains",
    "e-enable strategic applications",
    "transition cutting-edge web services",
    "revolutionize end-to-end systems",
    "target end-to-end models",
];
const DOMAINS: [&str; 5] = [
    "april.biz",
    "melissa.tv",
    "yesenia.net",
    "kory.org",
    "annie.ca",
];
const WORDS: [&str; 24] = [
    "sunt", "aut", "facere", "repellat", "provident", "occaecati", "excepturi", "optio",
    "reprehenderit", "qui", "est", "esse", "ea", "molestias", "quasi", "exercitationem",
    "nesciunt", "dolorem", "eum", "magnam", "tempore", "vitae", "ullam", "saepe",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for user-directory fixtures shaped like the service's
/// `/users` and `/users/:id/posts` payloads.
#[derive(Debug, Clone)]
pub struct DirectoryFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl DirectoryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn user_value(&mut self, id: i64) -> Value {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&DOMAINS);
        let company = format!(
            "{}-{}",
            self.pick(&COMPANY_STEMS),
            self.pick(&COMPANY_SUFFIXES)
        );
        let username = format!("{}{}", first, self.int_range(1, 99));

        json!({
            "id": id,
            "name": format!("{first} {last}"),
            "username": username,
            "email": format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase()),
            "phone": format!(
                "1-{:03}-{:03}-{:04}",
                self.int_range(200, 999),
                self.int_range(200, 999),
                self.int_range(0, 9_999),
            ),
            "website": domain,
            "address": {
                "street": format!("{} {}", self.pick(&STREET_NAMES), self.pick(&STREET_SUFFIXES)),
                "suite": format!("Apt. {}", self.int_range(100, 999)),
                "city": self.pick(&CITIES),
                "zipcode": format!("{:05}-{:04}", self.int_range(10_000, 99_999), self.int_range(0, 9_999)),
                "geo": {
                    "lat": format!("{:.4}", self.coordinate(90)),
                    "lng": format!("{:.4}", self.coordinate(180)),
                },
            },
            "company": {
                "name": company,
                "catchPhrase": self.pick(&CATCH_PHRASES),
                "bs": self.pick(&SECTORS),
            },
        })
    }

    pub fn user(&mut self, id: i64) -> Record {
        match self.user_value(id) {
            Value::Object(attributes) => Record::new(attributes),
            _ => Record::default(),
        }
    }

    /// Users with ids `1..=count`, in id order.
    pub fn users(&mut self, count: usize) -> Vec<Record> {
        (1..=count as i64).map(|id| self.user(id)).collect()
    }

    pub fn users_json(&mut self, count: usize) -> String {
        let values: Vec<Value> = (1..=count as i64).map(|id| self.user_value(id)).collect();
        Value::Array(values).to_string()
    }

    pub fn posts_for(&mut self, user_id: i64, count: usize) -> Vec<Post> {
        (0..count)
            .map(|index| Post {
                id: PostId::new(user_id * 100 + index as i64 + 1),
                user_id: Some(UserId::new(user_id)),
                title: self.sentence(3, 6),
                body: self.sentence(8, 16),
            })
            .collect()
    }

    pub fn posts_json(&mut self, user_id: i64, count: usize) -> String {
        let posts: Vec<Value> = self
            .posts_for(user_id, count)
            .into_iter()
            .map(|post| {
                json!({
                    "userId": user_id,
                    "id": post.id.get(),
                    "title": post.title,
                    "body": post.body,
                })
            })
            .collect();
        Value::Array(posts).to_string()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn coordinate(&mut self, bound: i64) -> f64 {
        let scaled = self.int_range(-bound * 10_000, bound * 10_000);
        scaled as f64 / 10_000.0
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let count = self.int_range(min_words as i64, max_words as i64) as usize;
        let mut parts = Vec::with_capacity(count);
        for _ in 0..count {
            parts.push(self.pick(&WORDS));
        }
        parts.join(" ")
    }
}

/// A record with just an id and a name.
pub fn named_user(id: i64, name: &str) -> Record {
    let mut attributes = serde_json::Map::new();
    attributes.insert("id".to_owned(), json!(id));
    attributes.insert("name".to_owned(), json!(name));
    Record::new(attributes)
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}
