// lib/src/streak.rs

// Daily dose streak. The count and the date of the last mark live in the local
// store; after a change the new count is mirrored to the server through the
// patient update. A failed mirror is logged and the local count stands.

use chrono::NaiveDate;
use log::{error, info, warn};

use crate::api::ApiClient;
use crate::errors::{MediverseError, MediverseResult};
use crate::patient::PatientService;
use crate::store::{keys, LocalStore};
use mediverse_models::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakUpdate {
    /// Today was already marked; the count is unchanged.
    AlreadyMarked(u32),
    /// Yesterday was marked; the count grew by one.
    Continued(u32),
    /// First mark, or the chain was broken; the count restarts at 1.
    Started(u32),
}

impl StreakUpdate {
    pub fn count(&self) -> u32 {
        match *self {
            StreakUpdate::AlreadyMarked(n) | StreakUpdate::Continued(n) | StreakUpdate::Started(n) => n,
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self, StreakUpdate::AlreadyMarked(_))
    }
}

/// Computes the streak after marking `today`.
///
/// A last mark dated after `today` (clock moved backwards) counts as already
/// marked. With no recorded last mark the count carried by the session is
/// continued; only a known gap restarts the chain.
pub fn next_streak(current: u32, last_marked: Option<NaiveDate>, today: NaiveDate) -> StreakUpdate {
    match last_marked {
        Some(last) if last >= today => StreakUpdate::AlreadyMarked(current),
        Some(last) if last.succ_opt() == Some(today) => StreakUpdate::Continued(current.saturating_add(1).max(1)),
        Some(_) => StreakUpdate::Started(1),
        None if current > 0 => StreakUpdate::Continued(current.saturating_add(1)),
        None => StreakUpdate::Started(1),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakState {
    pub count: u32,
    pub last_marked: Option<NaiveDate>,
}

/// Streak bookkeeping for whoever is signed in. Count and date are stored
/// under keys scoped to the user, so users sharing a device never see each
/// other's chain.
pub struct StreakTracker<'a> {
    store: &'a LocalStore,
}

// Users without a server id are told apart by username.
fn owner(user: &User) -> String {
    match &user.id {
        Some(id) => id.to_string(),
        None => format!("@{}", user.username),
    }
}

impl<'a> StreakTracker<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        StreakTracker { store }
    }

    /// The streak of `user`. Without a local count the session's `streak` is
    /// used. The device-wide date keys are consulted when the user has no
    /// date of their own.
    pub fn state(&self, user: &User) -> MediverseResult<StreakState> {
        let owner = owner(user);
        let count = self.store.get_json::<u32>(&keys::streak_for(&owner))?.unwrap_or(user.streak);
        let mut last_marked = self.read_date(&keys::last_date_for(&owner))?;
        for key in [keys::LAST_DATE, keys::LEGACY_LAST_DATE] {
            if last_marked.is_some() {
                break;
            }
            last_marked = self.read_date(key)?;
        }
        Ok(StreakState { count, last_marked })
    }

    // An unparseable date breaks the chain instead of failing the mark.
    fn read_date(&self, key: &str) -> MediverseResult<Option<NaiveDate>> {
        match self.store.get_json::<NaiveDate>(key) {
            Ok(date) => Ok(date),
            Err(MediverseError::Serialization(e)) => {
                warn!("Ignoring unreadable {}: {}", key, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Marks `today` for `user`. The first scoped write claims and removes
    /// the device-wide keys.
    pub fn mark(&self, today: NaiveDate, user: &User) -> MediverseResult<StreakUpdate> {
        let state = self.state(user)?;
        let update = next_streak(state.count, state.last_marked, today);
        if update.changed() {
            let owner = owner(user);
            self.store.put_json(&keys::streak_for(&owner), &update.count())?;
            self.store.put_json(&keys::last_date_for(&owner), &today)?;
            for key in keys::UNSCOPED_STREAK_KEYS {
                self.store.remove(key)?;
            }
        }
        Ok(update)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StreakOutcome {
    pub update: StreakUpdate,
    /// The session after the mark; the server's copy when the mirror worked.
    pub user: User,
    pub mirrored: bool,
}

/// Marks today's dose for the signed-in patient and mirrors the count.
pub async fn mark_todays_dose(client: &ApiClient, store: &LocalStore, today: NaiveDate) -> MediverseResult<StreakOutcome> {
    let user = store.load_user()?.ok_or(MediverseError::NotLoggedIn)?;
    if user.role() != Role::Patient {
        return Err(MediverseError::Rejected("Only patients keep a daily dose streak".to_string()));
    }

    let update = StreakTracker::new(store).mark(today, &user)?;
    if !update.changed() {
        return Ok(StreakOutcome { update, user, mirrored: false });
    }
    info!("Streak is now {} day(s)", update.count());

    let mut updated = user.clone();
    updated.streak = update.count();
    match PatientService::new(client, store).update(&updated).await {
        Ok(user) => Ok(StreakOutcome { update, user, mirrored: true }),
        Err(e) => {
            error!("Streak update failed: {}", e);
            Ok(StreakOutcome { update, user, mirrored: false })
        }
    }
}
