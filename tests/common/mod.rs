#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use linkfold::application::generators::{CodeGenerator, CodeStrategy, build_generator};
use linkfold::application::services::LinkService;
use linkfold::domain::entities::UrlMapping;
use linkfold::domain::repositories::UrlRepository;
use linkfold::error::{AppError, RepositoryError};
use linkfold::infrastructure::cache::{CacheService, InMemoryCache};
use linkfold::infrastructure::persistence::InMemoryUrlRepository;
use linkfold::routes::api_router;
use linkfold::state::AppState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// In-memory store that counts reads and can be switched offline.
#[derive(Default)]
pub struct TrackingRepository {
    inner: InMemoryUrlRepository,
    pub code_lookups: AtomicUsize,
    pub url_lookups: AtomicUsize,
    pub inserts: AtomicUsize,
    pub offline: AtomicBool,
}

impl TrackingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mappings(&self) -> Vec<UrlMapping> {
        self.inner.mappings()
    }

    pub fn code_lookups(&self) -> usize {
        self.code_lookups.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), RepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for TrackingRepository {
    async fn create(
        &self,
        short_code: &str,
        long_url: &str,
    ) -> Result<UrlMapping, RepositoryError> {
        self.check_online()?;
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.create(short_code, long_url).await
    }

    async fn find_long_url_by_code(
        &self,
        short_code: &str,
    ) -> Result<Option<String>, RepositoryError> {
        self.check_online()?;
        self.code_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_long_url_by_code(short_code).await
    }

    async fn find_code_by_long_url(
        &self,
        long_url: &str,
    ) -> Result<Option<String>, RepositoryError> {
        self.check_online()?;
        self.url_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_code_by_long_url(long_url).await
    }

    async fn health_check(&self) -> bool {
        !self.offline.load(Ordering::SeqCst)
    }
}

/// Generator that hands out a fixed list of codes, in order.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

#[async_trait]
impl CodeGenerator for ScriptedGenerator {
    async fn next_code(&self) -> Result<String, AppError> {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::internal("No scripted codes left", serde_json::json!({})))
    }

    fn strategy(&self) -> CodeStrategy {
        CodeStrategy::Random
    }
}

/// Engine and state wired to in-memory collaborators, with handles kept for inspection.
pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<TrackingRepository>,
    pub cache: Arc<InMemoryCache>,
}

impl TestContext {
    pub fn service(&self) -> &LinkService {
        &self.state.link_service
    }
}

pub fn create_test_context(strategy: CodeStrategy) -> TestContext {
    create_test_context_with_ttl(strategy, None)
}

pub fn create_test_context_with_ttl(
    strategy: CodeStrategy,
    cache_ttl_seconds: Option<u64>,
) -> TestContext {
    let repository = Arc::new(TrackingRepository::new());
    let cache = Arc::new(InMemoryCache::new());

    let counter: Arc<dyn CacheService> = cache.clone();
    let generator = build_generator(strategy, 6, counter);
    build_context(repository, cache, generator, cache_ttl_seconds)
}

pub fn create_test_context_with_codes(codes: &[&str]) -> TestContext {
    build_context(
        Arc::new(TrackingRepository::new()),
        Arc::new(InMemoryCache::new()),
        Arc::new(ScriptedGenerator::new(codes)),
        None,
    )
}

fn build_context(
    repository: Arc<TrackingRepository>,
    cache: Arc<InMemoryCache>,
    generator: Arc<dyn CodeGenerator>,
    cache_ttl_seconds: Option<u64>,
) -> TestContext {
    let repo_dyn: Arc<dyn UrlRepository> = repository.clone();
    let cache_dyn: Arc<dyn CacheService> = cache.clone();

    let link_service = Arc::new(LinkService::new(
        repo_dyn.clone(),
        cache_dyn.clone(),
        generator,
        TEST_BASE_URL,
        cache_ttl_seconds,
    ));

    TestContext {
        state: AppState::new(link_service, repo_dyn, cache_dyn),
        repository,
        cache,
    }
}

pub fn create_test_server(strategy: CodeStrategy) -> (TestServer, TestContext) {
    serve(create_test_context(strategy))
}

pub fn create_test_server_with_codes(codes: &[&str]) -> (TestServer, TestContext) {
    serve(create_test_context_with_codes(codes))
}

fn serve(ctx: TestContext) -> (TestServer, TestContext) {
    let server = TestServer::new(api_router(ctx.state.clone())).unwrap();
    (server, ctx)
}
