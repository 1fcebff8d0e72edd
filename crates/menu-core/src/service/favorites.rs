//! Favorites synchronizer.
//!
//! Holds the authoritative [`FavoriteSet`] for the signed-in user and keeps it
//! consistent with the server while toggles and reads overlap:
//!
//! ```text
//!   toggle(d) ──► per-dish lock(d) ──► decide action ──► POST/DELETE
//!                     │                 (confirmed set            │
//!                     │                  + pending toggles)       ▼
//!                     │                               record pending(d)
//!                     │                                           │
//!                     └───────────── held until ◄── read #n ◄─────┘
//!                                                  applied iff n > last applied
//! ```
//!
//! The visible set only changes when a read is applied. A mutation the server
//! accepted is remembered in [`PendingToggles`] until a read issued after it is
//! applied, so a second toggle of the same dish always inverts the first even
//! if the first one's refresh failed.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::endpoints::{favorite_path, FAVORITES_PATH};
use super::gateway::{Access, RemoteGateway};
use crate::domain::{DishId, FavoriteAction, FavoriteSet, GatewayError, PendingToggles, ToggleError};

/// Outcome of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReport {
    pub dish_id: DishId,
    pub action: FavoriteAction,
    /// Membership of the dish in the set after the refresh.
    pub is_favorite: bool,
}

#[derive(Deserialize)]
struct FavoriteEntry {
    id: DishId,
}

#[derive(Debug, Default)]
struct SyncState {
    favorites: FavoriteSet,
    pending: PendingToggles,
    /// Sequence number of the last read issued.
    reads_issued: u64,
    /// Sequence number of the last read applied.
    reads_applied: u64,
    reads_in_flight: usize,
}

#[derive(Default)]
struct Shared {
    state: Mutex<SyncState>,
    dish_locks: Mutex<HashMap<DishId, Arc<tokio::sync::Mutex<()>>>>,
}

impl Shared {
    /// Empty set, no pending toggles, every outstanding read stale.
    fn reset(&self) {
        let mut state = self.state.lock();
        state.favorites = FavoriteSet::new();
        state.pending = PendingToggles::new();
        state.reads_applied = state.reads_issued;
    }
}

/// Counts one outstanding read until dropped, including when the read future
/// is cancelled.
struct InFlightRead<'a> {
    state: &'a Mutex<SyncState>,
}

impl Drop for InFlightRead<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.reads_in_flight = state.reads_in_flight.saturating_sub(1);
    }
}

/// Per-dish lock handle. Dropping it removes the map entry when nobody else
/// holds or waits on the dish.
struct DishLease<'a> {
    locks: &'a Mutex<HashMap<DishId, Arc<tokio::sync::Mutex<()>>>>,
    dish_id: DishId,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for DishLease<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock();
        // map + ours
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.dish_id);
        }
    }
}

/// Cloneable handle; clones share the same set.
///
/// The set belongs to the current session: any sign-in or sign-out on the
/// gateway's session empties it, including a 401 under
/// [`UnauthorizedPolicy::ClearSession`](crate::domain::UnauthorizedPolicy).
#[derive(Clone)]
pub struct FavoritesSynchronizer {
    gateway: RemoteGateway,
    shared: Arc<Shared>,
}

impl FavoritesSynchronizer {
    pub fn new(gateway: RemoteGateway) -> Self {
        let shared = Arc::new(Shared::default());
        let weak = Arc::downgrade(&shared);
        gateway.session().on_change(move || {
            if let Some(shared) = weak.upgrade() {
                debug!("session changed, dropping favorites");
                shared.reset();
            }
        });
        Self { gateway, shared }
    }

    /// Snapshot of the current set.
    pub fn favorites(&self) -> FavoriteSet {
        self.shared.state.lock().favorites.clone()
    }

    pub fn is_favorite(&self, dish_id: DishId) -> bool {
        self.shared.state.lock().favorites.contains(dish_id)
    }

    /// Whether a favorites read is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.shared.state.lock().reads_in_flight > 0
    }

    /// Fetch the set if signed in.
    ///
    /// Without a session nothing is sent; the set is already empty then. On
    /// failure the set keeps its last value.
    pub async fn load(&self) -> Result<(), GatewayError> {
        if !self.gateway.session().is_authenticated() {
            debug!("no session, skipping favorites load");
            return Ok(());
        }
        self.refresh().await
    }

    /// Drop the set and forget pending toggles. Reads still in flight are
    /// discarded when they complete.
    pub fn clear(&self) {
        self.shared.reset();
    }

    /// Flip the membership of `dish_id` on the server, then re-read the set.
    ///
    /// Toggles of the same dish run one at a time; toggles of different dishes
    /// overlap freely.
    pub async fn toggle(&self, dish_id: DishId) -> Result<ToggleReport, ToggleError> {
        if !self.gateway.session().is_authenticated() {
            return Err(ToggleError::NotAuthenticated);
        }

        let lease = self.dish_lease(dish_id);
        let _guard = lease.lock.lock().await;
        self.toggle_locked(dish_id).await
    }

    async fn toggle_locked(&self, dish_id: DishId) -> Result<ToggleReport, ToggleError> {
        let action = {
            let state = self.shared.state.lock();
            FavoriteAction::toggling(state.pending.effective_membership(dish_id, &state.favorites))
        };

        let path = favorite_path(dish_id);
        let mutation = match action {
            FavoriteAction::Add => self.gateway.post(&path, None, Access::Authenticated).await,
            FavoriteAction::Remove => self.gateway.delete(&path, Access::Authenticated).await,
        };
        if let Err(source) = mutation {
            warn!(dish_id, %action, error = %source, "favorite mutation failed");
            return Err(ToggleError::Mutation { dish_id, source });
        }

        {
            let mut state = self.shared.state.lock();
            let issued = state.reads_issued;
            state.pending.record(dish_id, action, issued);
        }
        info!(dish_id, %action, "favorite updated");

        if let Err(source) = self.refresh().await {
            warn!(dish_id, %action, error = %source, "favorites refresh failed");
            return Err(ToggleError::Refresh {
                dish_id,
                action,
                source,
            });
        }

        Ok(ToggleReport {
            dish_id,
            action,
            is_favorite: self.is_favorite(dish_id),
        })
    }

    /// Issue one numbered read and apply it unless a newer one already was.
    async fn refresh(&self) -> Result<(), GatewayError> {
        let seq = {
            let mut state = self.shared.state.lock();
            state.reads_issued += 1;
            state.reads_in_flight += 1;
            state.reads_issued
        };
        let in_flight = InFlightRead {
            state: &self.shared.state,
        };

        let result = self
            .gateway
            .get(FAVORITES_PATH, Access::Authenticated)
            .await
            .and_then(parse_favorites);

        drop(in_flight);
        let ids = result?;
        let mut state = self.shared.state.lock();

        if seq <= state.reads_applied {
            debug!(seq, applied = state.reads_applied, "discarding stale favorites snapshot");
            return Ok(());
        }
        state.favorites.replace(ids);
        state.reads_applied = seq;
        state.pending.settle(seq);
        debug!(seq, count = state.favorites.len(), "favorites applied");
        Ok(())
    }

    fn dish_lease(&self, dish_id: DishId) -> DishLease<'_> {
        let lock = self
            .shared
            .dish_locks
            .lock()
            .entry(dish_id)
            .or_default()
            .clone();
        DishLease {
            locks: &self.shared.dish_locks,
            dish_id,
            lock,
        }
    }
}

fn parse_favorites(value: Value) -> Result<Vec<DishId>, GatewayError> {
    let entries: Vec<FavoriteEntry> = serde_json::from_value(value)
        .map_err(|e| GatewayError::malformed(format!("favorites: {e}")))?;
    Ok(entries.into_iter().map(|e| e.id).collect())
}
