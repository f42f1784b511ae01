use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::api::EmployeeApi;
use crate::views::manager::EmployeeManager;
use crate::views::switcher::ViewSwitcher;

pub const SESSION_COOKIE: &str = "employee_ui_session";

struct SessionState {
    switcher: ViewSwitcher,
    manager: Option<Arc<EmployeeManager>>,
    last_seen: Instant,
}

/// One browser's view state: the switcher flag plus the manager while it is displayed.
pub struct Session {
    api: Arc<dyn EmployeeApi>,
    state: Mutex<SessionState>,
}

impl Session {
    fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Session {
            api,
            state: Mutex::new(SessionState {
                switcher: ViewSwitcher::default(),
                manager: None,
                last_seen: Instant::now(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The displayed manager, or `None` while the landing view is shown.
    pub fn manager(&self) -> Option<Arc<EmployeeManager>> {
        let state = self.lock();
        if state.switcher.showing_manager() {
            state.manager.clone()
        } else {
            None
        }
    }

    /// Shows the management view. Returns the manager only when it was freshly mounted.
    pub fn open_manager(&self) -> Option<Arc<EmployeeManager>> {
        let mut state = self.lock();
        if state.switcher.showing_manager() {
            return None;
        }
        state.switcher.open_manager();
        let manager = Arc::new(EmployeeManager::new(self.api.clone()));
        state.manager = Some(manager.clone());
        Some(manager)
    }

    pub fn back(&self) {
        let mut state = self.lock();
        state.switcher.back();
        if let Some(manager) = state.manager.take() {
            manager.dismiss();
        }
    }

    fn touch(&self) {
        self.lock().last_seen = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.lock().last_seen)
    }
}

pub struct SessionStore {
    api: Arc<dyn EmployeeApi>,
    sessions: Mutex<HashMap<Uuid, Arc<Session>>>,
    idle_limit: Duration,
}

impl SessionStore {
    pub fn new(api: Arc<dyn EmployeeApi>, idle_limit: Duration) -> Self {
        SessionStore { api, sessions: Mutex::new(HashMap::new()), idle_limit }
    }

    /// Looks up the session for a cookie value, starting a new one when it is absent or unknown.
    /// The returned flag is true for a new session.
    pub fn get_or_create(&self, cookie: Option<&str>) -> (Uuid, Arc<Session>, bool) {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(id) = cookie.and_then(|value| Uuid::parse_str(value).ok()) {
            if let Some(session) = sessions.get(&id) {
                session.touch();
                return (id, session.clone(), false);
            }
        }

        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| {
            let keep = session.idle_for(now) < self.idle_limit;
            if !keep {
                session.back();
            }
            keep
        });
        if sessions.len() < before {
            log::debug!("Evicted {} idle sessions", before - sessions.len());
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Session::new(self.api.clone()));
        sessions.insert(id, session.clone());
        log::debug!("Started session {} ({} active)", id, sessions.len());
        (id, session, true)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
