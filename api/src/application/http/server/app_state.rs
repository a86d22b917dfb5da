use std::sync::Arc;

use outfitter_core::application::OutfitterService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: OutfitterService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: OutfitterService) -> Self {
        Self { args, service }
    }
}
