//! Shared application state passed to all handlers

use crate::remote::DrillService;
use crate::session::ChallengeSessions;

#[derive(Clone)]
pub struct AppState {
  pub drill: DrillService,
  pub sessions: ChallengeSessions,
}

impl AppState {
  pub fn new(drill: DrillService) -> Self {
    Self {
      drill,
      sessions: ChallengeSessions::new(),
    }
  }
}
