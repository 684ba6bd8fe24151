use std::sync::Arc;

use roster_core::application::RosterService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: RosterService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: RosterService) -> Self {
        Self { args, service }
    }
}
