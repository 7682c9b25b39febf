//! Builders wiring driven adapters into the services behind [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use chirp::domain::ports::{CheepRepository, LatestRepository, SocialGraphRepository, UserRepository};
use chirp::domain::{CheepService, FeedComposer, GraphService, SimulatorService, UserDirectory};
use chirp::inbound::http::state::HttpState;
use chirp::outbound::memory::InMemoryStore;
use chirp::outbound::persistence::{
    DbPool, DieselCheepRepository, DieselLatestRepository, DieselSocialGraphRepository,
    DieselUserRepository,
};

/// Storage selected at startup.
#[derive(Clone)]
pub enum StoreBackend {
    Memory(Arc<InMemoryStore>),
    Postgres(DbPool),
}

impl StoreBackend {
    /// A fresh, empty in-memory store.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(InMemoryStore::new()))
    }

    /// Short label for startup logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// Build the shared HTTP state for the configured store.
pub(super) fn build_http_state(store: &StoreBackend) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match store {
        StoreBackend::Memory(store) => compose(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            clock,
        ),
        StoreBackend::Postgres(pool) => compose(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselSocialGraphRepository::new(pool.clone())),
            Arc::new(DieselCheepRepository::new(pool.clone())),
            Arc::new(DieselLatestRepository::new(pool.clone())),
            clock,
        ),
    }
}

fn compose<U, G, C, L>(
    users: Arc<U>,
    graph: Arc<G>,
    cheeps: Arc<C>,
    latest: Arc<L>,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState>
where
    U: UserRepository + 'static,
    G: SocialGraphRepository + 'static,
    C: CheepRepository + 'static,
    L: LatestRepository + 'static,
{
    let graph_service = Arc::new(GraphService::new(users.clone(), graph.clone(), clock.clone()));
    web::Data::new(HttpState {
        graph: graph_service.clone(),
        graph_query: graph_service,
        cheeps: Arc::new(CheepService::new(users.clone(), cheeps.clone(), clock)),
        feed: Arc::new(FeedComposer::new(users.clone(), graph, cheeps)),
        users: Arc::new(UserDirectory::new(users.clone())),
        simulator: Arc::new(SimulatorService::new(users, latest)),
    })
}

/// Seed the configured store with generated example data.
#[cfg(feature = "example-data")]
pub(super) async fn seed_store(
    store: &StoreBackend,
    settings: &chirp::example_data::ExampleDataSettings,
) -> Result<Option<chirp::example_data::SeedSummary>, chirp::example_data::StartupSeedingError> {
    use chirp::example_data::seed_example_data_on_startup;

    match store {
        StoreBackend::Memory(store) => {
            let store = store.as_ref();
            seed_example_data_on_startup(settings, store, store, store, &DefaultClock).await
        }
        StoreBackend::Postgres(pool) => {
            seed_example_data_on_startup(
                settings,
                &DieselUserRepository::new(pool.clone()),
                &DieselSocialGraphRepository::new(pool.clone()),
                &DieselCheepRepository::new(pool.clone()),
                &DefaultClock,
            )
            .await
        }
    }
}
