//! In-memory fakes for the store and the two external services.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use tokio::sync::Notify;
use url::Url;
use uuid::Uuid;

use adopt_a_dog_core::{Breed, DogId, DogRecord, NewDog, UserId, UserRole};

use crate::config::{AuthServiceConfig, DEFAULT_DOG_API_BASE_URL, DogApiConfig, SiteConfig};
use crate::db::{DogStore, RepositoryError};
use crate::dog_api::{DogApiError, ImageProvider};
use crate::services::auth::{AuthError, AuthProvider, AuthSession, AuthUser};
use crate::state::AppState;

pub const GOLDEN_URL: &str = "https://images.dog.ceo/breeds/retriever-golden/n02.jpg";

pub fn test_config() -> SiteConfig {
    SiteConfig {
        database_url: SecretString::from("postgres://localhost/test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: Url::parse("http://localhost:3000").unwrap(),
        run_migrations: false,
        dog_api: DogApiConfig {
            base_url: Url::parse(DEFAULT_DOG_API_BASE_URL).unwrap(),
        },
        auth: AuthServiceConfig {
            url: Url::parse("https://abc.supabase.co").unwrap(),
            anon_key: SecretString::from("anon_key_value"),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

// =============================================================================
// MemoryDogStore
// =============================================================================

/// Dog store held in a `Vec`, in insertion order.
#[derive(Default)]
pub struct MemoryDogStore {
    records: Mutex<Vec<DogRecord>>,
    fail_list: AtomicBool,
    fail_insert: AtomicBool,
    insert_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl MemoryDogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dogs(dogs: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut records = store.records.lock().unwrap();
            for (breed, image_url) in dogs {
                records.push(
                    NewDog::new(*breed, *image_url)
                        .unwrap()
                        .into_record(DogId::new(Uuid::new_v4()), Utc::now()),
                );
            }
        }
        store
    }

    pub fn fail_list(&self) {
        self.fail_list.store(true, Ordering::SeqCst);
    }

    pub fn fail_insert(&self) {
        self.fail_insert.store(true, Ordering::SeqCst);
    }

    /// Current records in insertion order.
    pub fn records(&self) -> Vec<DogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

fn unavailable() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl DogStore for MemoryDogStore {
    async fn list_dogs(&self) -> Result<Vec<DogRecord>, RepositoryError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut records = self.records();
        // Stable sort keeps insertion order for equal breeds
        records.sort_by(|a, b| a.breed.cmp(&b.breed));
        Ok(records)
    }

    async fn insert_dog(&self, dog: NewDog) -> Result<DogRecord, RepositoryError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let record = dog.into_record(DogId::new(Uuid::new_v4()), Utc::now());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn delete_dog(&self, id: DogId) -> Result<(), RepositoryError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

// =============================================================================
// FakeImageProvider
// =============================================================================

/// Canned provider answer.
#[derive(Debug, Clone)]
pub enum FakeImage {
    Url(String),
    Status(u16),
    Malformed(String),
}

impl FakeImage {
    fn answer(&self) -> Result<String, DogApiError> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::Status(status) => Err(DogApiError::Status(*status)),
            Self::Malformed(message) => Err(DogApiError::Malformed(message.clone())),
        }
    }
}

/// Provider returning a fixed answer, optionally held until released.
pub struct FakeImageProvider {
    answer: FakeImage,
    gate: Option<Arc<Notify>>,
    random_calls: AtomicUsize,
    breed_requests: Mutex<Vec<String>>,
}

impl FakeImageProvider {
    pub fn new(answer: FakeImage) -> Self {
        Self {
            answer,
            gate: None,
            random_calls: AtomicUsize::new(0),
            breed_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn url(url: &str) -> Self {
        Self::new(FakeImage::Url(url.to_string()))
    }

    /// Hold every answer until `gate` is notified.
    pub fn gated(answer: FakeImage, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(answer)
        }
    }

    pub fn random_calls(&self) -> usize {
        self.random_calls.load(Ordering::SeqCst)
    }

    /// Breeds requested through the breed-scoped endpoint.
    pub fn breed_requests(&self) -> Vec<String> {
        self.breed_requests.lock().unwrap().clone()
    }

    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl ImageProvider for FakeImageProvider {
    async fn random_image(&self) -> Result<String, DogApiError> {
        self.random_calls.fetch_add(1, Ordering::SeqCst);
        self.wait().await;
        self.answer.answer()
    }

    async fn random_image_for_breed(&self, breed: &Breed) -> Result<String, DogApiError> {
        self.breed_requests
            .lock()
            .unwrap()
            .push(breed.as_str().to_string());
        self.wait().await;
        self.answer.answer()
    }
}

// =============================================================================
// FakeAuthProvider
// =============================================================================

pub const ADMIN_TOKEN: &str = "admin-token";
pub const MEMBER_TOKEN: &str = "member-token";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const MEMBER_EMAIL: &str = "member@example.com";
pub const PASSWORD: &str = "correct horse";

/// Auth service with one admin and one member account.
pub struct FakeAuthProvider {
    users: HashMap<String, AuthUser>,
    accounts: HashMap<String, String>,
    fail_lookup: bool,
}

impl FakeAuthProvider {
    pub fn new() -> Self {
        let admin = AuthUser {
            id: UserId::new(Uuid::new_v4()),
            email: Some(ADMIN_EMAIL.to_string()),
            role: UserRole::Admin,
        };
        let member = AuthUser {
            id: UserId::new(Uuid::new_v4()),
            email: Some(MEMBER_EMAIL.to_string()),
            role: UserRole::Member,
        };

        Self {
            users: HashMap::from([
                (ADMIN_TOKEN.to_string(), admin),
                (MEMBER_TOKEN.to_string(), member),
            ]),
            accounts: HashMap::from([
                (ADMIN_EMAIL.to_string(), ADMIN_TOKEN.to_string()),
                (MEMBER_EMAIL.to_string(), MEMBER_TOKEN.to_string()),
            ]),
            fail_lookup: false,
        }
    }

    /// Every lookup fails as if the service were down.
    pub fn failing() -> Self {
        Self {
            fail_lookup: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        if self.fail_lookup {
            return Err(AuthError::Api {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(self.users.get(access_token).cloned())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let token = self
            .accounts
            .get(email)
            .filter(|_| password == PASSWORD)
            .ok_or(AuthError::InvalidCredentials)?;
        let user = self
            .users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(AuthSession {
            access_token: SecretString::from(token.clone()),
            user,
        })
    }
}

/// State over the given fakes.
pub fn state_with(
    dogs: Arc<MemoryDogStore>,
    images: Arc<FakeImageProvider>,
    auth: FakeAuthProvider,
) -> AppState {
    AppState::new(test_config(), dogs, images, Arc::new(auth))
}
