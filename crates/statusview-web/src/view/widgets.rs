use std::sync::Arc;

use statusview_core::display::DisplayOptions;
use statusview_core::render::{render_database, render_updated_at, DatabaseView, UpdatedAtView};
use statusview_core::StatusModel;

use crate::feed::{FeedHub, Subscription};

/// "Última atualização: ..." line.
pub struct UpdatedAtWidget {
    pub(crate) sub: Subscription,
    opts: DisplayOptions,
}

impl UpdatedAtWidget {
    pub fn mount(hub: &Arc<FeedHub>, endpoint: &str, opts: DisplayOptions) -> Self {
        Self {
            sub: hub.subscribe(endpoint),
            opts,
        }
    }

    pub fn render(&self) -> UpdatedAtView {
        self.render_model(&self.sub.current())
    }

    pub(crate) fn render_model(&self, model: &StatusModel) -> UpdatedAtView {
        render_updated_at(model, &self.opts)
    }
}

/// Database version and connection counts.
pub struct DatabaseStatusWidget {
    pub(crate) sub: Subscription,
    opts: DisplayOptions,
}

impl DatabaseStatusWidget {
    pub fn mount(hub: &Arc<FeedHub>, endpoint: &str, opts: DisplayOptions) -> Self {
        Self {
            sub: hub.subscribe(endpoint),
            opts,
        }
    }

    pub fn render(&self) -> DatabaseView {
        self.render_model(&self.sub.current())
    }

    pub(crate) fn render_model(&self, model: &StatusModel) -> DatabaseView {
        render_database(model, &self.opts)
    }
}
