use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::notifier::{LogNotifier, ResetNotifier};
use crate::auth::password::{Argon2Passwords, PasswordService};
use crate::auth::repo::{PgUserRepo, UserRepo};
use crate::config::AppConfig;
use crate::itinerary::repo::{ItineraryRepo, PgItineraryRepo};
use crate::trips::repo::{PgTripRepo, TripRepo};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub trips: Arc<dyn TripRepo>,
    pub itineraries: Arc<dyn ItineraryRepo>,
    pub notifier: Arc<dyn ResetNotifier>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    pub fn from_pool(config: Arc<AppConfig>, db: PgPool) -> Self {
        Self {
            config,
            users: Arc::new(PgUserRepo::new(db.clone())),
            trips: Arc::new(PgTripRepo::new(db.clone())),
            itineraries: Arc::new(PgItineraryRepo::new(db)),
            notifier: Arc::new(LogNotifier),
            passwords: Arc::new(Argon2Passwords),
        }
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepo>,
        trips: Arc<dyn TripRepo>,
        itineraries: Arc<dyn ItineraryRepo>,
        notifier: Arc<dyn ResetNotifier>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            config,
            users,
            trips,
            itineraries,
            notifier,
            passwords,
        }
    }
}
