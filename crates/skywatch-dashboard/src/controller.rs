//! Dashboard state machine.
//!
//! Owns the current selection and the three hourly series. All writes go
//! through explicit transitions, and every fetch result carries the
//! ticket it was issued for, so a superseded request can never overwrite
//! state produced by a later selection.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use skywatch_weather::{
    Coordinate, FetchError, FetchForecast, ForecastTriple, LocationError, LocationService,
    Permission, SelectionKey,
};

/// What to do with previously fetched data when a refresh fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Keep showing the old data with no indication. Matches the
    /// original product behavior.
    #[default]
    SilentStale,
    /// Keep the old data but flag it so the presentation layer can show
    /// a non-blocking indicator.
    MarkStale,
}

/// Fetch phase of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
}

/// Tag for an in-flight fetch. Results may only be applied through the
/// ticket they were issued for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    key: SelectionKey,
    coordinate: Coordinate,
}

impl FetchTicket {
    /// Selection the fetch was issued for.
    pub fn key(&self) -> SelectionKey {
        self.key
    }

    /// Resolved coordinate for the request.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// How a completed fetch affected the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// New data replaced the previous triple.
    Applied,
    /// The fetch failed; the previous data was kept.
    Retained,
    /// The ticket was superseded by a later selection; result dropped.
    Discarded,
}

pub struct DashboardController {
    selection: SelectionKey,
    series: ForecastTriple,
    phase: Phase,
    generation: u64,
    policy: StalePolicy,
    stale: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl DashboardController {
    pub fn new(initial: SelectionKey, policy: StalePolicy) -> Self {
        Self {
            selection: initial,
            series: ForecastTriple::default(),
            phase: Phase::Idle,
            generation: 0,
            policy,
            stale: false,
            last_updated: None,
        }
    }

    pub fn selection(&self) -> SelectionKey {
        self.selection
    }

    pub fn series(&self) -> &ForecastTriple {
        &self.series
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True when the displayed data survived a failed refresh under
    /// `StalePolicy::MarkStale`.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Start a refresh for the given selection. Any fetch still in
    /// flight for an earlier ticket is superseded from this point on.
    pub fn begin_refresh(&mut self, key: SelectionKey) -> FetchTicket {
        self.selection = key;
        self.phase = Phase::Loading;
        self.generation += 1;

        debug!(?key, generation = self.generation, "refresh started");

        FetchTicket {
            generation: self.generation,
            key,
            coordinate: key.coordinate(),
        }
    }

    /// Apply a fetch result. Superseded tickets are discarded without
    /// touching state; failures keep the previous series.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<ForecastTriple, FetchError>,
    ) -> ApplyOutcome {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding superseded fetch result"
            );
            return ApplyOutcome::Discarded;
        }

        self.phase = Phase::Idle;

        match result {
            Ok(triple) => {
                info!(samples = triple.len(), "forecast updated");
                self.series = triple;
                self.stale = false;
                self.last_updated = Some(Utc::now());
                ApplyOutcome::Applied
            }
            Err(error) => {
                warn!(%error, "forecast refresh failed; keeping previous data");
                if self.policy == StalePolicy::MarkStale && !self.series.is_empty() {
                    self.stale = true;
                }
                ApplyOutcome::Retained
            }
        }
    }

    /// Fetch and apply in one step.
    pub async fn refresh<F>(&mut self, key: SelectionKey, fetcher: &F) -> ApplyOutcome
    where
        F: FetchForecast + ?Sized,
    {
        let ticket = self.begin_refresh(key);
        let result = fetcher.fetch_hourly(ticket.coordinate()).await;
        self.apply(ticket, result)
    }

    /// Switch the dashboard to the device position. A denied permission
    /// is the one error surfaced to the caller; nothing else changes
    /// state.
    pub async fn use_device_location<L, F>(
        &mut self,
        location: &L,
        fetcher: &F,
    ) -> Result<ApplyOutcome, LocationError>
    where
        L: LocationService + ?Sized,
        F: FetchForecast + ?Sized,
    {
        match location.request_permission().await {
            Permission::Denied => {
                warn!("location permission denied");
                Err(LocationError::PermissionDenied)
            }
            Permission::Granted => {
                let coordinate = location.current_coordinate().await?;
                Ok(self.refresh(SelectionKey::Device(coordinate), fetcher).await)
            }
        }
    }
}
